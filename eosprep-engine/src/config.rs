//! Pipeline configuration loaded from TOML

use crate::assembler::{AssemblerOptions, DEFAULT_MAX_EXAMPLES};
use crate::error::{EngineError, Result};
use eosprep_core::{
    Alphabet, BalanceMode, BalancePolicy, Codec, EncodingMode, RuleSegmenter, DEFAULT_RADIUS,
    DEFAULT_RATIO,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Largest accepted window radius
pub const MAX_RADIUS: usize = 4096;

/// Largest accepted one-hot row width
pub const MAX_VOCAB_SIZE: usize = 1024;

/// Commented template written by `generate-config`
pub const TEMPLATE: &str = r#"# eosprep pipeline configuration

[dataset]
# Characters kept on each side of a punctuation mark; windows are
# 2 * window_radius + 1 characters long
window_radius = 10

# Stop after this many examples across the whole corpus
max_examples = 100000

# "dense" stores one character ID per position,
# "one-hot" stores a vocab_size-wide indicator row per position
encoding = "dense"

# One-hot row width; defaults to the alphabet size plus the pad slot (70).
# IDs at or above this value encode as all-zero rows.
# vocab_size = 97

[balance]
# "strict": equal EOS and NEOS counts at the smaller class's size
# "ratio": every NEOS example plus up to `ratio` EOS examples per NEOS example
mode = "strict"
ratio = 5

# Seed for sampling and shuffling
seed = 42

[segmenter]
# Extra abbreviations whose trailing period never ends a sentence.
# Case and dots are ignored.
extra_abbreviations = [
    # "approx", "Ph.D",
]
"#;

/// Full pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Extraction and encoding settings
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Balancing settings
    #[serde(default)]
    pub balance: BalanceConfig,

    /// Sentence segmentation settings
    #[serde(default)]
    pub segmenter: SegmenterConfig,
}

/// `[dataset]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Characters on each side of a punctuation mark
    pub window_radius: usize,

    /// Example cap across the corpus
    pub max_examples: usize,

    /// `"dense"` or `"one-hot"`
    pub encoding: String,

    /// One-hot row width override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocab_size: Option<usize>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            window_radius: DEFAULT_RADIUS,
            max_examples: DEFAULT_MAX_EXAMPLES,
            encoding: EncodingMode::Dense.as_str().to_string(),
            vocab_size: None,
        }
    }
}

/// `[balance]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// `"strict"` or `"ratio"`
    pub mode: String,

    /// EOS examples kept per NEOS example in ratio mode
    pub ratio: usize,

    /// RNG seed
    pub seed: u64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            mode: BalanceMode::Strict.as_str().to_string(),
            ratio: DEFAULT_RATIO,
            seed: DEFAULT_SEED,
        }
    }
}

/// `[segmenter]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Abbreviations added to the built-in English list
    pub extra_abbreviations: Vec<String>,
}

impl PipelineConfig {
    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
            .map_err(|e| EngineError::Config(format!("{}: {}", path.display(), config_message(&e))))
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PipelineConfig =
            toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Check every value without building anything
    pub fn validate(&self) -> Result<()> {
        self.encoding()?;
        self.balance_mode()?;
        if self.dataset.window_radius > MAX_RADIUS {
            return Err(EngineError::Config(format!(
                "dataset.window_radius must be at most {MAX_RADIUS}, got {}",
                self.dataset.window_radius
            )));
        }
        match self.dataset.vocab_size {
            Some(0) => {
                return Err(EngineError::Config(
                    "dataset.vocab_size must be at least 1".to_string(),
                ));
            }
            Some(size) if size > MAX_VOCAB_SIZE => {
                return Err(EngineError::Config(format!(
                    "dataset.vocab_size must be at most {MAX_VOCAB_SIZE}, got {size}"
                )));
            }
            _ => {}
        }
        Ok(())
    }

    /// Parsed encoding mode
    pub fn encoding(&self) -> Result<EncodingMode> {
        self.dataset
            .encoding
            .parse()
            .map_err(|e| EngineError::Config(format!("dataset.encoding: {e}")))
    }

    /// Parsed balancing mode
    pub fn balance_mode(&self) -> Result<BalanceMode> {
        self.balance
            .mode
            .parse()
            .map_err(|e| EngineError::Config(format!("balance.mode: {e}")))
    }

    /// Balancing policy from mode and ratio
    pub fn balance_policy(&self) -> Result<BalancePolicy> {
        Ok(BalancePolicy::new(self.balance_mode()?, self.balance.ratio))
    }

    /// Codec over the standard alphabet with the configured encoding
    pub fn codec(&self) -> Result<Codec> {
        let codec = Codec::new(Alphabet::standard(), self.encoding()?);
        match self.dataset.vocab_size {
            Some(size) => codec
                .with_vocab_size(size)
                .map_err(|e| EngineError::Config(format!("dataset.vocab_size: {e}"))),
            None => Ok(codec),
        }
    }

    /// English rule segmenter extended with the configured abbreviations
    pub fn segmenter(&self) -> RuleSegmenter {
        RuleSegmenter::english().with_abbreviations(&self.segmenter.extra_abbreviations)
    }

    /// Assembly parameters
    pub fn assembler_options(&self) -> AssemblerOptions {
        AssemblerOptions {
            window_radius: self.dataset.window_radius,
            max_examples: self.dataset.max_examples,
        }
    }
}

fn config_message(err: &EngineError) -> String {
    match err {
        EngineError::Config(msg) => msg.clone(),
        other => other.to_string(),
    }
}
