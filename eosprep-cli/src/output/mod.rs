//! Distribution report formatting

use anyhow::Result;
use eosprep_engine::{DistributionReport, Manifest};

/// Trait for report formatters
pub trait ReportFormatter {
    /// Write the report for a dataset described by `manifest`
    fn write_report(&mut self, report: &DistributionReport, manifest: &Manifest) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
