//! Class distribution summaries with decoded sample windows

use crate::balance::ClassCounts;
use crate::codec::Codec;
use crate::dataset::{Dataset, Label};
use serde::{Deserialize, Serialize};

/// One decoded example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleWindow {
    /// Row index in the dataset
    pub index: usize,
    /// Decoded window, pad shown as space
    pub window: String,
    /// Row label
    pub label: Label,
}

/// Totals, class shares and the first few windows of each class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    /// Total rows
    pub total: usize,
    /// Per-class counts
    pub counts: ClassCounts,
    /// EOS share in `[0, 1]`
    pub eos_fraction: f64,
    /// NEOS share in `[0, 1]`
    pub neos_fraction: f64,
    /// Leading EOS rows
    pub eos_samples: Vec<SampleWindow>,
    /// Leading NEOS rows
    pub neos_samples: Vec<SampleWindow>,
}

impl DistributionReport {
    /// Summarize `dataset`, decoding up to `samples` rows per class
    pub fn from_dataset(dataset: &Dataset, codec: &Codec, samples: usize) -> Self {
        let counts = ClassCounts::of(dataset);
        let take = |label: Label| -> Vec<SampleWindow> {
            dataset
                .indices_of(label)
                .into_iter()
                .take(samples)
                .filter_map(|index| {
                    dataset.decode_row(codec, index).map(|window| SampleWindow {
                        index,
                        window,
                        label,
                    })
                })
                .collect()
        };

        Self {
            total: counts.total(),
            counts,
            eos_fraction: counts.fraction(Label::Eos),
            neos_fraction: counts.fraction(Label::Neos),
            eos_samples: take(Label::Eos),
            neos_samples: take(Label::Neos),
        }
    }
}
