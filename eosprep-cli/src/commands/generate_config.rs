//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use eosprep_engine::TEMPLATE;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating pipeline configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the window, encoding and balancing settings");
        println!("2. Validate your configuration:");
        println!("   eosprep validate --config {}", self.output.display());
        println!("3. Use it to build a dataset:");
        println!(
            "   eosprep build --corpus data/en --output data_gen --config {}",
            self.output.display()
        );

        Ok(())
    }
}
