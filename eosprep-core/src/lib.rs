//! Training data preparation for end-of-sentence punctuation classifiers
//!
//! This crate holds the deterministic, I/O-free half of the pipeline:
//!
//! - [`alphabet`] / [`codec`]: the fixed character table and window encodings
//! - [`segment`]: the sentence segmentation seam and a rule-based English
//!   implementation
//! - [`window`]: punctuation-centered window extraction with a shared budget
//! - [`dataset`]: labeled rows held as flat buffers
//! - [`balance`]: strict and ratio class balancing
//! - [`report`]: class distribution summaries
//!
//! # Example
//!
//! ```rust
//! use eosprep_core::{Budget, Codec, Dataset, Label, RuleSegmenter, WindowExtractor};
//!
//! let codec = Codec::default();
//! let extractor = WindowExtractor::new(RuleSegmenter::english());
//! let mut dataset = Dataset::new(&codec, extractor.window_len());
//! let mut budget = Budget::new(100);
//!
//! extractor
//!     .extract_into("Mr. Smith arrived. He sat down!", &codec, &mut dataset, &mut budget)
//!     .unwrap();
//!
//! assert_eq!(dataset.labels(), &[Label::Neos, Label::Eos, Label::Eos]);
//! assert_eq!(dataset.row_width(), 21);
//! ```

#![warn(missing_docs)]

pub mod alphabet;
pub mod balance;
pub mod codec;
pub mod dataset;
pub mod error;
pub mod report;
pub mod segment;
pub mod window;

pub use alphabet::{Alphabet, PAD_ID};
pub use balance::{balance, seeded_rng, BalanceMode, BalancePolicy, ClassCounts, DEFAULT_RATIO};
pub use codec::{Codec, EncodingMode, Features};
pub use dataset::{Dataset, FeatureRow, Label};
pub use error::{CoreError, Result};
pub use report::{DistributionReport, SampleWindow};
pub use segment::{RuleSegmenter, SentenceSegmenter};
pub use window::{
    window_around, window_len, Budget, Example, WindowExtractor, DEFAULT_RADIUS,
    DEFAULT_WINDOW_LEN, PUNCTUATION,
};
