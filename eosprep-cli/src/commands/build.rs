//! Build command implementation

use super::{init_logging, load_config};
use crate::error::CliError;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use eosprep_engine::{
    ClassCounts, CorpusReader, DatasetAssembler, DatasetStore, DatasetVariant, EncodingMode,
    EngineError, Manifest, PipelineConfig,
};
use std::path::PathBuf;

/// Arguments for the build command
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Directory of UTF-8 `*.txt` corpus files
    #[arg(long, value_name = "DIR", required = true)]
    pub corpus: PathBuf,

    /// Directory for the stored arrays
    #[arg(short, long, value_name = "DIR", required = true)]
    pub output: PathBuf,

    /// Stop after this many examples
    #[arg(short = 'n', long, value_name = "N")]
    pub max_examples: Option<usize>,

    /// Characters kept on each side of a punctuation mark
    #[arg(short, long, value_name = "R")]
    pub radius: Option<usize>,

    /// Window encoding
    #[arg(short, long, value_enum)]
    pub encoding: Option<EncodingArg>,

    /// One-hot row width
    #[arg(long, value_name = "V")]
    pub vocab_size: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported window encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EncodingArg {
    /// One character ID per position
    Dense,
    /// One indicator row per position
    OneHot,
}

impl From<EncodingArg> for EncodingMode {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Dense => EncodingMode::Dense,
            EncodingArg::OneHot => EncodingMode::OneHot,
        }
    }
}

impl BuildArgs {
    /// Execute the build command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        log::info!("Starting dataset build");
        log::debug!("Arguments: {:?}", self);

        let config = self.effective_config()?;
        let codec = config
            .codec()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        let assembler =
            DatasetAssembler::new(codec.clone(), config.segmenter(), config.assembler_options());

        let corpus = CorpusReader::open(&self.corpus).map_err(|e| match e {
            EngineError::CorpusUnavailable { source, .. } => anyhow::Error::new(source)
                .context(CliError::CorpusNotFound(self.corpus.display().to_string())),
            other => other.into(),
        })?;
        if corpus.is_empty() {
            log::warn!("No *.txt files in {}", self.corpus.display());
        }

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(corpus.len() as u64);
        let dataset = assembler
            .build_from(&corpus, |path, examples| {
                let name = path.file_name().unwrap_or(path.as_os_str());
                progress.file_completed(&name.to_string_lossy(), examples);
            })
            .map_err(|e| CliError::ProcessingError(e.to_string()))?;
        progress.finish();

        let store = DatasetStore::new(&self.output);
        let manifest = Manifest::describe(&dataset, &codec, DatasetVariant::Raw);
        let paths = store
            .save(&dataset, &manifest)
            .with_context(|| format!("Failed to write dataset to {}", self.output.display()))?;

        let counts = ClassCounts::of(&dataset);
        if !self.quiet {
            println!("✓ Dataset built: {} examples", dataset.len());
            println!("  EOS:  {}", counts.eos);
            println!("  NEOS: {}", counts.neos);
            println!("  Features: {}", paths.features.display());
            println!("  Labels:   {}", paths.labels.display());
        }

        Ok(())
    }

    /// Config file values with command-line overrides applied
    fn effective_config(&self) -> Result<PipelineConfig> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(max_examples) = self.max_examples {
            config.dataset.max_examples = max_examples;
        }
        if let Some(radius) = self.radius {
            config.dataset.window_radius = radius;
        }
        if let Some(encoding) = self.encoding {
            config.dataset.encoding = EncodingMode::from(encoding).as_str().to_string();
        }
        if let Some(vocab_size) = self.vocab_size {
            config.dataset.vocab_size = Some(vocab_size);
        }

        config
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }
}
