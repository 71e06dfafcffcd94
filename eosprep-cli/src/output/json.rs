//! JSON report formatter

use super::ReportFormatter;
use anyhow::Result;
use eosprep_engine::{DistributionReport, Manifest};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - manifest and report in one object
pub struct JsonFormatter<W: Write> {
    writer: W,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct ReportData<'a> {
    /// Description of the stored arrays
    pub manifest: &'a Manifest,
    /// Class distribution and samples
    pub report: &'a DistributionReport,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportFormatter for JsonFormatter<W> {
    fn write_report(&mut self, report: &DistributionReport, manifest: &Manifest) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &ReportData { manifest, report })?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eosprep_engine::{Codec, Dataset, DatasetVariant, Label};

    #[test]
    fn test_json_report() {
        let codec = Codec::default();
        let mut dataset = Dataset::new(&codec, 2);
        dataset.push(&codec, "a.", Label::Eos).unwrap();
        dataset.push(&codec, ". ", Label::Neos).unwrap();

        let report = DistributionReport::from_dataset(&dataset, &codec, 5);
        let manifest = Manifest::describe(&dataset, &codec, DatasetVariant::Raw);

        let mut buffer = Vec::new();
        JsonFormatter::new(&mut buffer)
            .write_report(&report, &manifest)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["manifest"]["variant"], "raw");
        assert_eq!(value["report"]["total"], 2);
        assert_eq!(value["report"]["counts"]["eos"], 1);
        assert_eq!(value["report"]["eos_samples"][0]["window"], "a.");
        assert_eq!(value["report"]["neos_samples"][0]["label"], "Neos");
    }
}
