//! Class balancing by resampling row indices
//!
//! Balancing never touches the source dataset; it picks indices, shuffles
//! them and materializes a new [`Dataset`] from the picks. All randomness
//! comes from the caller's RNG so a fixed seed reproduces a run exactly.

use crate::dataset::{Dataset, Label};
use crate::error::{CoreError, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// EOS examples kept per NEOS example in ratio mode
pub const DEFAULT_RATIO: usize = 5;

/// Seeded RNG used for reproducible balancing runs
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Named balancing policy, as written in configs and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceMode {
    /// 1:1 classes at the smaller class's count
    Strict,
    /// All NEOS, EOS capped at a multiple of the NEOS count
    Ratio,
}

impl BalanceMode {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceMode::Strict => "strict",
            BalanceMode::Ratio => "ratio",
        }
    }
}

impl fmt::Display for BalanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BalanceMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(BalanceMode::Strict),
            "ratio" => Ok(BalanceMode::Ratio),
            other => Err(CoreError::config(format!(
                "unknown balance mode '{other}': mode must be 'strict' or 'ratio'"
            ))),
        }
    }
}

/// Fully specified balancing policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalancePolicy {
    /// `n = min(#EOS, #NEOS)`: `n` EOS without replacement, `n` NEOS with
    /// replacement
    Strict,
    /// Every NEOS plus `min(#EOS, ratio * #NEOS)` EOS without replacement
    Ratio(usize),
}

impl BalancePolicy {
    /// Policy for `mode`; `ratio` only matters for [`BalanceMode::Ratio`]
    pub fn new(mode: BalanceMode, ratio: usize) -> Self {
        match mode {
            BalanceMode::Strict => BalancePolicy::Strict,
            BalanceMode::Ratio => BalancePolicy::Ratio(ratio),
        }
    }

    /// The policy's mode
    pub fn mode(&self) -> BalanceMode {
        match self {
            BalancePolicy::Strict => BalanceMode::Strict,
            BalancePolicy::Ratio(_) => BalanceMode::Ratio,
        }
    }
}

/// Per-class example counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    /// Label 1 rows
    pub eos: usize,
    /// Label 0 rows
    pub neos: usize,
}

impl ClassCounts {
    /// Count the labels of `dataset`
    pub fn of(dataset: &Dataset) -> Self {
        Self::from_labels(dataset.labels())
    }

    /// Count a label slice
    pub fn from_labels(labels: &[Label]) -> Self {
        let eos = labels.iter().filter(|&&l| l == Label::Eos).count();
        Self {
            eos,
            neos: labels.len() - eos,
        }
    }

    /// Total rows
    pub fn total(&self) -> usize {
        self.eos + self.neos
    }

    /// Share of `label` in `[0, 1]`; 0 for an empty dataset
    pub fn fraction(&self, label: Label) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        let count = match label {
            Label::Eos => self.eos,
            Label::Neos => self.neos,
        };
        count as f64 / self.total() as f64
    }
}

/// Resample `dataset` under `policy`, then shuffle the picked rows
///
/// Strict mode draws the NEOS side with replacement even when enough unique
/// NEOS rows exist, so duplicates can appear; this matches the datasets the
/// existing models were trained on. Ratio mode needs at least one NEOS row.
pub fn balance<R>(dataset: &Dataset, policy: BalancePolicy, rng: &mut R) -> Result<Dataset>
where
    R: Rng + ?Sized,
{
    let eos = dataset.indices_of(Label::Eos);
    let neos = dataset.indices_of(Label::Neos);

    let mut picked = match policy {
        BalancePolicy::Strict => {
            let target = eos.len().min(neos.len());
            let mut picked = sample_without_replacement(&eos, target, rng);
            picked.extend(sample_with_replacement(&neos, target, rng));
            picked
        }
        BalancePolicy::Ratio(ratio) => {
            if neos.is_empty() {
                return Err(CoreError::config(
                    "ratio balancing needs at least one NEOS example",
                ));
            }
            let target = eos.len().min(ratio.saturating_mul(neos.len()));
            let mut picked = sample_without_replacement(&eos, target, rng);
            picked.extend_from_slice(&neos);
            picked
        }
    };

    picked.shuffle(rng);
    Ok(dataset.select(&picked))
}

fn sample_without_replacement<R>(pool: &[usize], amount: usize, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    if amount == 0 {
        return Vec::new();
    }
    rand::seq::index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i])
        .collect()
}

fn sample_with_replacement<R>(pool: &[usize], amount: usize, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Vec::new();
    }
    (0..amount).map(|_| pool[rng.gen_range(0..pool.len())]).collect()
}
