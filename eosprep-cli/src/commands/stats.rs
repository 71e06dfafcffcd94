//! Stats command implementation

use super::init_logging;
use crate::error::CliError;
use crate::output::{JsonFormatter, ReportFormatter, TextFormatter};
use anyhow::{Context, Result};
use clap::Args;
use eosprep_engine::{DatasetStore, DatasetVariant, DistributionReport};
use std::io;
use std::path::PathBuf;

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Directory holding the stored arrays
    #[arg(short, long, value_name = "DIR", required = true)]
    pub data: PathBuf,

    /// Which stored dataset to inspect
    #[arg(long, value_enum, default_value = "raw")]
    pub variant: VariantArg,

    /// Sample windows shown per class
    #[arg(short, long, value_name = "N", default_value_t = 20)]
    pub samples: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Stored dataset variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VariantArg {
    /// Output of `build`
    Raw,
    /// Output of `balance --mode strict`
    Strict,
    /// Output of `balance --mode ratio`
    Ratio,
}

impl From<VariantArg> for DatasetVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Raw => DatasetVariant::Raw,
            VariantArg::Strict => DatasetVariant::Strict,
            VariantArg::Ratio => DatasetVariant::Ratio,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Counts, shares and quoted windows
    Text,
    /// Manifest and report as one JSON object
    Json,
}

impl StatsArgs {
    /// Execute the stats command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);

        let variant = DatasetVariant::from(self.variant);
        let store = DatasetStore::new(&self.data);
        if !store.contains(variant) {
            return Err(CliError::DatasetNotFound(format!(
                "no {variant} dataset in {}",
                self.data.display()
            ))
            .into());
        }

        let (dataset, manifest) = store
            .load(variant)
            .with_context(|| format!("Failed to load {variant} dataset"))?;
        let codec = manifest.codec()?;
        let report = DistributionReport::from_dataset(&dataset, &codec, self.samples);

        let mut formatter: Box<dyn ReportFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::stdout()),
            OutputFormat::Json => Box::new(JsonFormatter::new(io::stdout())),
        };
        formatter.write_report(&report, &manifest)
    }
}
