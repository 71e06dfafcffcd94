//! Validate command implementation

use anyhow::Result;
use clap::Args;
use eosprep_core::window_len;
use eosprep_engine::PipelineConfig;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to pipeline configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match PipelineConfig::from_file(&self.config) {
            Ok(config) => {
                let codec = config.codec()?;
                println!("✓ Configuration is valid!");
                println!(
                    "  Window: radius {} ({} characters)",
                    config.dataset.window_radius,
                    window_len(config.dataset.window_radius)
                );
                println!("  Encoding: {} (vocab {})", codec.mode(), codec.vocab_size());
                println!("  Max examples: {}", config.dataset.max_examples);
                if config.dataset.max_examples == 0 {
                    println!("  Warning: max_examples is 0; builds will be empty");
                }
                println!(
                    "  Balance: {} (ratio {}, seed {})",
                    config.balance.mode, config.balance.ratio, config.balance.seed
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
