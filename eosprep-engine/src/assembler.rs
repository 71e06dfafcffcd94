//! Dataset assembly over a corpus directory
//!
//! The assembler drives the corpus reader, the window extractor and the
//! codec in one sequential pass, filling a single pre-sized [`Dataset`]
//! until the example cap is reached.

use crate::corpus::CorpusReader;
use crate::error::{EngineError, Result};
use eosprep_core::{Budget, Codec, Dataset, SentenceSegmenter, WindowExtractor, DEFAULT_RADIUS};
use std::path::Path;

/// Default example cap
pub const DEFAULT_MAX_EXAMPLES: usize = 100_000;

/// Upper bound on feature scalars reserved before extraction starts
pub const PREALLOCATION_CEILING: usize = 64 * 1024 * 1024;

/// Assembly parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Characters on each side of a punctuation mark
    pub window_radius: usize,
    /// Maximum number of examples across the whole corpus
    pub max_examples: usize,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            window_radius: DEFAULT_RADIUS,
            max_examples: DEFAULT_MAX_EXAMPLES,
        }
    }
}

/// Builds a raw dataset from a corpus directory
#[derive(Debug, Clone)]
pub struct DatasetAssembler<S> {
    codec: Codec,
    extractor: WindowExtractor<S>,
    max_examples: usize,
}

impl<S: SentenceSegmenter> DatasetAssembler<S> {
    /// Create an assembler
    pub fn new(codec: Codec, segmenter: S, options: AssemblerOptions) -> Self {
        Self {
            codec,
            extractor: WindowExtractor::new(segmenter).with_radius(options.window_radius),
            max_examples: options.max_examples,
        }
    }

    /// Codec used for every row
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Window extractor in use
    pub fn extractor(&self) -> &WindowExtractor<S> {
        &self.extractor
    }

    /// Example cap
    pub fn max_examples(&self) -> usize {
        self.max_examples
    }

    /// Assemble the dataset for the corpus at `corpus_dir`
    pub fn build(&self, corpus_dir: impl AsRef<Path>) -> Result<Dataset> {
        let corpus = CorpusReader::open(corpus_dir)?;
        self.build_from(&corpus, |_, _| {})
    }

    /// Like [`build`](Self::build), calling `observer` with each finished
    /// file and the number of examples it contributed
    pub fn build_with_progress<F>(&self, corpus_dir: impl AsRef<Path>, observer: F) -> Result<Dataset>
    where
        F: FnMut(&Path, usize),
    {
        let corpus = CorpusReader::open(corpus_dir)?;
        self.build_from(&corpus, observer)
    }

    /// Assemble from an already opened corpus
    ///
    /// Files after the one that exhausts the cap are not opened, and the
    /// observer is not called for them.
    pub fn build_from<F>(&self, corpus: &CorpusReader, mut observer: F) -> Result<Dataset>
    where
        F: FnMut(&Path, usize),
    {
        let window_len = self.extractor.window_len();
        let row_width = self.codec.row_width(window_len).max(1);
        let reserved = self.max_examples.min(PREALLOCATION_CEILING / row_width);

        let mut dataset = Dataset::with_capacity(&self.codec, window_len, reserved);
        let mut budget = Budget::new(self.max_examples);

        log::info!(
            "Assembling up to {} examples from {} files in {}",
            self.max_examples,
            corpus.len(),
            corpus.root().display()
        );

        for path in corpus.files() {
            if budget.is_exhausted() {
                break;
            }

            let mut from_file = 0;
            for paragraph in corpus.paragraphs(path)? {
                let paragraph = paragraph.map_err(|e| EngineError::corpus(path, e))?;
                from_file += self.extractor.extract_into(
                    &paragraph,
                    &self.codec,
                    &mut dataset,
                    &mut budget,
                )?;
                if budget.is_exhausted() {
                    break;
                }
            }

            log::debug!("{}: {} examples", path.display(), from_file);
            observer(path, from_file);
        }

        if budget.is_exhausted() {
            log::info!("Example cap of {} reached", self.max_examples);
        }
        log::info!("Assembled {} examples", dataset.len());
        Ok(dataset)
    }
}
