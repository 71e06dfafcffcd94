//! Plain text report formatter

use super::ReportFormatter;
use anyhow::Result;
use eosprep_core::SampleWindow;
use eosprep_engine::{DistributionReport, Label, Manifest};
use std::io::{self, Write};

/// Plain text formatter - counts, shares and quoted sample windows
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_samples(&mut self, label: Label, samples: &[SampleWindow]) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "First {} {} windows:",
            samples.len(),
            label.name()
        )?;
        for sample in samples {
            writeln!(self.writer, "  [{:>6}] '{}'", sample.index, sample.window)?;
        }
        Ok(())
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportFormatter for TextFormatter<W> {
    fn write_report(&mut self, report: &DistributionReport, manifest: &Manifest) -> Result<()> {
        writeln!(
            self.writer,
            "Dataset: {} ({}, window {}, vocab {})",
            manifest.variant, manifest.encoding, manifest.window_len, manifest.vocab_size
        )?;
        writeln!(self.writer, "Total examples: {}", report.total)?;
        writeln!(
            self.writer,
            "EOS=1: {}  ({:.2}%)",
            report.counts.eos,
            report.eos_fraction * 100.0
        )?;
        writeln!(
            self.writer,
            "NEOS=0: {}  ({:.2}%)",
            report.counts.neos,
            report.neos_fraction * 100.0
        )?;

        self.write_samples(Label::Eos, &report.eos_samples)?;
        self.write_samples(Label::Neos, &report.neos_samples)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eosprep_engine::{Codec, Dataset, DatasetVariant};

    #[test]
    fn test_text_report() {
        let codec = Codec::default();
        let mut dataset = Dataset::new(&codec, 3);
        dataset.push(&codec, "Hi.", Label::Eos).unwrap();
        dataset.push(&codec, "r. ", Label::Neos).unwrap();
        dataset.push(&codec, "Ok!", Label::Eos).unwrap();
        dataset.push(&codec, "No?", Label::Eos).unwrap();

        let report = DistributionReport::from_dataset(&dataset, &codec, 2);
        let manifest = Manifest::describe(&dataset, &codec, DatasetVariant::Raw);

        let mut buffer = Vec::new();
        TextFormatter::new(&mut buffer)
            .write_report(&report, &manifest)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.contains("Dataset: raw (dense, window 3, vocab 70)"));
        assert!(output.contains("Total examples: 4"));
        assert!(output.contains("EOS=1: 3  (75.00%)"));
        assert!(output.contains("NEOS=0: 1  (25.00%)"));
        assert!(output.contains("First 2 EOS windows:"));
        assert!(output.contains("'hi.'"));
        assert!(output.contains("'ok!'"));
        assert!(!output.contains("'no?'"));
        assert!(output.contains("'r. '"));
    }
}
