//! eosprep CLI library
//!
//! This library provides the command-line interface for building,
//! balancing and inspecting sentence boundary training datasets.

pub mod commands;
pub mod error;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
