//! Balance command implementation

use super::{init_logging, load_config};
use crate::error::CliError;
use anyhow::{Context, Result};
use clap::Args;
use eosprep_engine::{
    balance, seeded_rng, BalanceMode, BalancePolicy, BalanceRecord, ClassCounts, DatasetStore,
    DatasetVariant, Manifest,
};
use std::path::PathBuf;

/// Arguments for the balance command
#[derive(Debug, Args)]
pub struct BalanceArgs {
    /// Directory holding the raw arrays written by `build`
    #[arg(short, long, value_name = "DIR", required = true)]
    pub data: PathBuf,

    /// Balancing mode
    #[arg(short, long, value_enum)]
    pub mode: Option<BalanceModeArg>,

    /// EOS examples kept per NEOS example in ratio mode
    #[arg(short, long, value_name = "R")]
    pub ratio: Option<usize>,

    /// RNG seed for sampling and shuffling
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress summary output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported balancing modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BalanceModeArg {
    /// Equal class counts at the smaller class's size
    Strict,
    /// All NEOS plus up to `ratio` EOS per NEOS
    Ratio,
}

impl From<BalanceModeArg> for BalanceMode {
    fn from(arg: BalanceModeArg) -> Self {
        match arg {
            BalanceModeArg::Strict => BalanceMode::Strict,
            BalanceModeArg::Ratio => BalanceMode::Ratio,
        }
    }
}

impl BalanceArgs {
    /// Execute the balance command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let (mode, ratio, seed) = self.settings()?;
        let policy = BalancePolicy::new(mode, ratio);

        let store = DatasetStore::new(&self.data);
        if !store.contains(DatasetVariant::Raw) {
            return Err(CliError::DatasetNotFound(format!(
                "no raw dataset in {}; run `eosprep build` first",
                self.data.display()
            ))
            .into());
        }
        let (raw, manifest) = store
            .load(DatasetVariant::Raw)
            .with_context(|| format!("Failed to load dataset from {}", self.data.display()))?;
        let codec = manifest.codec()?;

        log::info!("Balancing {} examples with {} mode", raw.len(), mode);
        let mut rng = seeded_rng(seed);
        let balanced =
            balance(&raw, policy, &mut rng).map_err(|e| CliError::ProcessingError(e.to_string()))?;

        let variant = DatasetVariant::from(mode);
        let record = BalanceRecord {
            mode,
            ratio: (mode == BalanceMode::Ratio).then_some(ratio),
            seed,
        };
        let manifest = Manifest::describe(&balanced, &codec, variant).with_balance(record);
        let paths = store.save(&balanced, &manifest)?;

        if !self.quiet {
            let before = ClassCounts::of(&raw);
            let after = ClassCounts::of(&balanced);
            println!("✓ Balanced dataset ({mode}, seed {seed}): {} examples", balanced.len());
            println!("  EOS:  {} -> {}", before.eos, after.eos);
            println!("  NEOS: {} -> {}", before.neos, after.neos);
            println!("  Features: {}", paths.features.display());
        }

        Ok(())
    }

    /// Mode, ratio and seed from flags, falling back to the config file
    fn settings(&self) -> Result<(BalanceMode, usize, u64)> {
        let config = load_config(self.config.as_deref())?;
        let mode = match self.mode {
            Some(mode) => mode.into(),
            None => config
                .balance_mode()
                .map_err(|e| CliError::ConfigError(e.to_string()))?,
        };
        let ratio = self.ratio.unwrap_or(config.balance.ratio);
        let seed = self.seed.unwrap_or(config.balance.seed);
        Ok((mode, ratio, seed))
    }
}
