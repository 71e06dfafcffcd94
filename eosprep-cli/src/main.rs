//! eosprep command-line entry point

use clap::Parser;
use eosprep_cli::commands::Commands;
use eosprep_cli::CliResult;

/// Build labeled punctuation-window datasets for sentence boundary models
#[derive(Debug, Parser)]
#[command(name = "eosprep", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn run(cli: Cli) -> CliResult<()> {
    cli.command.execute()
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
