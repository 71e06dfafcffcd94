//! CLI command implementations

use crate::error::CliError;
use anyhow::Result;
use clap::Subcommand;
use eosprep_engine::PipelineConfig;
use std::path::Path;

pub mod balance;
pub mod build;
pub mod generate_config;
pub mod stats;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract labeled punctuation windows from a corpus directory
    Build(build::BuildArgs),

    /// Resample a built dataset into balanced classes
    Balance(balance::BalanceArgs),

    /// Show class distribution and sample windows of a stored dataset
    Stats(stats::StatsArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Build(args) => args.execute(),
            Commands::Balance(args) => args.execute(),
            Commands::Stats(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A logger may already be installed when commands run in-process
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

/// Load the config file if one was given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            PipelineConfig::from_file(path)
                .map_err(|e| CliError::ConfigError(e.to_string()).into())
        }
        None => Ok(PipelineConfig::default()),
    }
}
