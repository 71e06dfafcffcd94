//! Punctuation-centered window extraction
//!
//! Every `.`, `?` or `!` inside a segmented sentence yields one example:
//! the characters within `radius` of it, right-padded with spaces to
//! `2 * radius + 1`, labeled EOS when the mark is the sentence's last
//! character.

use crate::codec::Codec;
use crate::dataset::{Dataset, Label};
use crate::error::Result;
use crate::segment::SentenceSegmenter;

/// Characters on each side of the punctuation mark
pub const DEFAULT_RADIUS: usize = 10;

/// Window length for [`DEFAULT_RADIUS`]
pub const DEFAULT_WINDOW_LEN: usize = window_len(DEFAULT_RADIUS);

/// Marks that produce an example
pub const PUNCTUATION: [char; 3] = ['.', '?', '!'];

/// Window length for a given radius
pub const fn window_len(radius: usize) -> usize {
    2 * radius + 1
}

/// True for characters in [`PUNCTUATION`]
pub fn is_punctuation(ch: char) -> bool {
    PUNCTUATION.contains(&ch)
}

/// Remaining number of examples a run may still emit
///
/// One budget is threaded by `&mut` through every extraction call of a run,
/// so the cap holds across files, paragraphs and sentences alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    remaining: usize,
}

impl Budget {
    /// Budget allowing `limit` examples
    pub fn new(limit: usize) -> Self {
        Self { remaining: limit }
    }

    /// Budget that never runs out in practice
    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    /// Examples still allowed
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// True once nothing more may be emitted
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Reserve one example; false if the budget is spent
    pub fn try_take(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// A raw (unencoded) window and its label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Exactly `window_len` characters, original case
    pub window: String,
    /// EOS if the centered mark ends its sentence
    pub label: Label,
}

/// Slice `[idx - radius, idx + radius + 1)` of `sentence`, clamped to its
/// bounds and right-padded with spaces to [`window_len`]`(radius)`
pub fn window_around(sentence: &[char], idx: usize, radius: usize) -> String {
    let start = idx.saturating_sub(radius);
    let end = idx.saturating_add(radius + 1).min(sentence.len());
    let mut window: String = sentence[start..end].iter().collect();
    let padding = window_len(radius) - (end - start);
    window.extend(std::iter::repeat(' ').take(padding));
    window
}

/// Turns paragraphs into labeled windows
#[derive(Debug, Clone)]
pub struct WindowExtractor<S> {
    segmenter: S,
    radius: usize,
}

impl<S: SentenceSegmenter> WindowExtractor<S> {
    /// Extractor with [`DEFAULT_RADIUS`]
    pub fn new(segmenter: S) -> Self {
        Self {
            segmenter,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Use a different radius
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Characters on each side of the mark
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Characters per window
    pub fn window_len(&self) -> usize {
        window_len(self.radius)
    }

    /// The segmenter boundaries are taken from
    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    /// Raw examples for `paragraph`, stopping when `budget` runs out
    pub fn extract(&self, paragraph: &str, budget: &mut Budget) -> Vec<Example> {
        let mut examples = Vec::new();
        self.scan(paragraph, budget, |window, label| {
            examples.push(Example { window, label });
            Ok(())
        })
        .expect("collecting examples cannot fail");
        examples
    }

    /// Encode the examples for `paragraph` straight into `dataset`
    ///
    /// Returns how many rows were appended.
    pub fn extract_into(
        &self,
        paragraph: &str,
        codec: &Codec,
        dataset: &mut Dataset,
        budget: &mut Budget,
    ) -> Result<usize> {
        self.scan(paragraph, budget, |window, label| {
            dataset.push(codec, &window, label)
        })
    }

    fn scan<F>(&self, paragraph: &str, budget: &mut Budget, mut emit: F) -> Result<usize>
    where
        F: FnMut(String, Label) -> Result<()>,
    {
        let mut emitted = 0;
        if budget.is_exhausted() {
            return Ok(emitted);
        }

        for sentence in self.segmenter.segment(paragraph) {
            let chars: Vec<char> = sentence.chars().collect();
            let last = chars.len().saturating_sub(1);

            for (idx, &ch) in chars.iter().enumerate() {
                if !is_punctuation(ch) {
                    continue;
                }
                if !budget.try_take() {
                    return Ok(emitted);
                }

                emit(
                    window_around(&chars, idx, self.radius),
                    Label::from(idx == last),
                )?;
                emitted += 1;

                if budget.is_exhausted() {
                    return Ok(emitted);
                }
            }
        }

        Ok(emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::RuleSegmenter;

    /// Treats each line as one sentence
    struct Lines;

    impl SentenceSegmenter for Lines {
        fn segment<'a>(&self, paragraph: &'a str) -> Vec<&'a str> {
            paragraph.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
        }
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_window_len() {
        assert_eq!(DEFAULT_WINDOW_LEN, 21);
        assert_eq!(window_len(3), 7);
        assert_eq!(window_len(0), 1);
    }

    #[test]
    fn test_window_around_middle() {
        let sentence = chars("abcdefg.hijklmn");
        assert_eq!(window_around(&sentence, 7, 3), "efg.hij");
    }

    #[test]
    fn test_window_around_pads_right() {
        let sentence = chars("Hi.");
        assert_eq!(window_around(&sentence, 2, 3), "Hi.    ");
        // Near the start the slice is cut on the left, then padded on the right
        let sentence = chars("No. more text here");
        assert_eq!(window_around(&sentence, 2, 3), "No. mo ");
    }

    #[test]
    fn test_lone_terminator_is_heavily_padded() {
        let extractor = WindowExtractor::new(Lines);
        let examples = extractor.extract("?", &mut Budget::unlimited());
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].window, format!("?{}", " ".repeat(20)));
        assert_eq!(examples[0].label, Label::Eos);
    }

    #[test]
    fn test_extract_labels_each_mark() {
        let extractor = WindowExtractor::new(RuleSegmenter::english()).with_radius(3);
        let examples = extractor.extract("Hello world. Is this fine? Yes!", &mut Budget::unlimited());

        let labels: Vec<Label> = examples.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec![Label::Eos, Label::Eos, Label::Eos]);
        assert_eq!(examples[0].window, "rld.   ");
        assert_eq!(examples[1].window, "ine?   ");
        assert_eq!(examples[2].window, "Yes!   ");
    }

    #[test]
    fn test_inner_marks_are_neos() {
        let extractor = WindowExtractor::new(Lines).with_radius(3);
        let examples = extractor.extract("Mr. Smith arrived.", &mut Budget::unlimited());
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].label, Label::Neos);
        assert_eq!(examples[0].window, "Mr. Sm ");
        assert_eq!(examples[1].label, Label::Eos);
        assert_eq!(examples[1].window, "ved.   ");
    }

    #[test]
    fn test_multibyte_whitespace_in_paragraph() {
        let extractor = WindowExtractor::new(RuleSegmenter::english()).with_radius(3);
        let examples = extractor.extract("It costs 5\u{00A0}dollars. Then stop.", &mut Budget::unlimited());

        let labels: Vec<Label> = examples.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec![Label::Eos, Label::Eos]);
        assert_eq!(examples[0].window, "ars.   ");
        assert!(examples.iter().all(|e| e.window.chars().count() == 7));
    }

    #[test]
    fn test_budget_stops_mid_sentence() {
        let extractor = WindowExtractor::new(Lines);
        let mut budget = Budget::new(2);
        let examples = extractor.extract("a. b. c. d.\ne!", &mut budget);
        assert_eq!(examples.len(), 2);
        assert!(budget.is_exhausted());

        // Later calls emit nothing
        assert!(extractor.extract("more. text.", &mut budget).is_empty());
    }

    #[test]
    fn test_zero_budget_emits_nothing() {
        let extractor = WindowExtractor::new(Lines);
        assert!(extractor.extract("stop.", &mut Budget::new(0)).is_empty());
    }

    #[test]
    fn test_budget_accounting() {
        let mut budget = Budget::new(1);
        assert_eq!(budget.remaining(), 1);
        assert!(budget.try_take());
        assert!(!budget.try_take());
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn test_extract_into_dataset() {
        let codec = Codec::default();
        let extractor = WindowExtractor::new(Lines).with_radius(2);
        let mut dataset = Dataset::new(&codec, extractor.window_len());
        let mut budget = Budget::unlimited();

        let added = extractor
            .extract_into("Go. Now!", &codec, &mut dataset, &mut budget)
            .unwrap();

        assert_eq!(added, 2);
        assert_eq!(dataset.labels(), &[Label::Neos, Label::Eos]);
        assert_eq!(dataset.decode_row(&codec, 0).as_deref(), Some("go. n"));
        assert_eq!(dataset.decode_row(&codec, 1).as_deref(), Some("ow!  "));
    }
}
