//! Corpus-to-array orchestration for eosprep
//!
//! This crate wires the pure pieces of [`eosprep_core`] to the filesystem:
//! reading a corpus directory, assembling a capped dataset, storing arrays
//! as `.npy` files with a JSON manifest, and loading TOML configuration.

#![warn(missing_docs)]

pub mod assembler;
pub mod config;
pub mod corpus;
pub mod error;
pub mod store;

// Re-export key types
pub use assembler::{AssemblerOptions, DatasetAssembler, DEFAULT_MAX_EXAMPLES};
pub use config::{PipelineConfig, DEFAULT_SEED, MAX_RADIUS, MAX_VOCAB_SIZE, TEMPLATE};
pub use corpus::{clean_line, CorpusReader, ParagraphReader};
pub use error::{EngineError, Result};
pub use store::{BalanceRecord, DatasetStore, DatasetVariant, Manifest, VariantPaths};

// Re-export from core for convenience
pub use eosprep_core::{
    balance, seeded_rng, BalanceMode, BalancePolicy, ClassCounts, Codec, Dataset,
    DistributionReport, EncodingMode, Label, RuleSegmenter, SentenceSegmenter,
};
