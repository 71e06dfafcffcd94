//! Labeled examples held as parallel flat buffers

use crate::codec::{Codec, EncodingMode, Features};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Whether a punctuation mark ends its sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Label {
    /// Not end of sentence
    Neos = 0,
    /// End of sentence
    Eos = 1,
}

impl Label {
    /// Stored byte value
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// Parse a stored byte value
    pub fn from_i8(value: i8) -> Result<Self> {
        match value {
            0 => Ok(Label::Neos),
            1 => Ok(Label::Eos),
            other => Err(CoreError::InvalidLabel(other)),
        }
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            Label::Neos => "NEOS",
            Label::Eos => "EOS",
        }
    }
}

impl From<bool> for Label {
    fn from(is_eos: bool) -> Self {
        if is_eos {
            Label::Eos
        } else {
            Label::Neos
        }
    }
}

/// Borrowed view of one encoded window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureRow<'a> {
    /// Dense IDs
    Dense(&'a [i32]),
    /// One-hot indicators, `window_len * vocab_size` long
    OneHot(&'a [u8]),
}

/// Encoded windows and their labels, row-aligned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    window_len: usize,
    vocab_size: usize,
    features: Features,
    labels: Vec<Label>,
}

impl Dataset {
    /// Empty dataset shaped for `codec` and `window_len`
    pub fn new(codec: &Codec, window_len: usize) -> Self {
        Self::with_capacity(codec, window_len, 0)
    }

    /// Empty dataset with buffers reserved for `rows` examples
    pub fn with_capacity(codec: &Codec, window_len: usize, rows: usize) -> Self {
        Self {
            window_len,
            vocab_size: codec.vocab_size(),
            features: Features::with_capacity(codec.mode(), rows * codec.row_width(window_len)),
            labels: Vec::with_capacity(rows),
        }
    }

    /// Reassemble a dataset from stored buffers, checking their shapes
    pub fn from_parts(
        window_len: usize,
        vocab_size: usize,
        features: Features,
        labels: Vec<Label>,
    ) -> Result<Self> {
        if vocab_size == 0 {
            return Err(CoreError::config("vocab size must be at least 1"));
        }
        let dataset = Self {
            window_len,
            vocab_size,
            features,
            labels,
        };
        let expected = dataset.labels.len() * dataset.row_width();
        if dataset.features.len() != expected {
            return Err(CoreError::shape(format!(
                "{} labels need {} feature values, found {}",
                dataset.labels.len(),
                expected,
                dataset.features.len()
            )));
        }
        Ok(dataset)
    }

    /// Encoding mode of the feature rows
    pub fn mode(&self) -> EncodingMode {
        self.features.mode()
    }

    /// Characters per window
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// One-hot row width recorded for consumers
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Scalars per example
    pub fn row_width(&self) -> usize {
        match self.mode() {
            EncodingMode::Dense => self.window_len,
            EncodingMode::OneHot => self.window_len * self.vocab_size,
        }
    }

    /// Number of examples
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if there are no examples
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in row order
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Flat feature buffer in row order
    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Encode `window` with `codec` and append it with `label`
    pub fn push(&mut self, codec: &Codec, window: &str, label: Label) -> Result<()> {
        if codec.mode() != self.mode() || codec.vocab_size() != self.vocab_size {
            return Err(CoreError::shape(format!(
                "codec ({} x {}) does not match dataset ({} x {})",
                codec.mode(),
                codec.vocab_size(),
                self.mode(),
                self.vocab_size
            )));
        }
        let len = window.chars().count();
        if len != self.window_len {
            return Err(CoreError::shape(format!(
                "window has {len} characters, dataset expects {}",
                self.window_len
            )));
        }
        codec.encode_into(window, &mut self.features);
        self.labels.push(label);
        Ok(())
    }

    /// Encoded window at `index`
    pub fn row(&self, index: usize) -> Option<FeatureRow<'_>> {
        if index >= self.len() {
            return None;
        }
        let width = self.row_width();
        let range = index * width..(index + 1) * width;
        Some(match &self.features {
            Features::Dense(values) => FeatureRow::Dense(&values[range]),
            Features::OneHot(values) => FeatureRow::OneHot(&values[range]),
        })
    }

    /// Decoded (lowercase, space-padded) window at `index`
    pub fn decode_row(&self, codec: &Codec, index: usize) -> Option<String> {
        self.row(index).map(|row| match row {
            FeatureRow::Dense(ids) => codec.decode_ids(ids),
            FeatureRow::OneHot(values) => codec.decode_one_hot(values),
        })
    }

    /// Row indices carrying `label`, ascending
    pub fn indices_of(&self, label: Label) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == label)
            .map(|(i, _)| i)
            .collect()
    }

    /// New dataset made of the rows at `indices`, in that order
    ///
    /// Indices may repeat. Panics if any index is out of range.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        let width = self.row_width();
        let mut features = Features::with_capacity(self.mode(), indices.len() * width);
        match (&self.features, &mut features) {
            (Features::Dense(src), Features::Dense(dst)) => {
                for &i in indices {
                    dst.extend_from_slice(&src[i * width..(i + 1) * width]);
                }
            }
            (Features::OneHot(src), Features::OneHot(dst)) => {
                for &i in indices {
                    dst.extend_from_slice(&src[i * width..(i + 1) * width]);
                }
            }
            _ => unreachable!("buffer created with the source mode"),
        }

        Dataset {
            window_len: self.window_len,
            vocab_size: self.vocab_size,
            features,
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn dense_dataset() -> (Codec, Dataset) {
        let codec = Codec::default();
        let mut dataset = Dataset::new(&codec, 3);
        dataset.push(&codec, "ab.", Label::Eos).unwrap();
        dataset.push(&codec, "c, ", Label::Neos).unwrap();
        dataset.push(&codec, "d! ", Label::Eos).unwrap();
        (codec, dataset)
    }

    #[test]
    fn test_label_values() {
        assert_eq!(Label::Eos.as_i8(), 1);
        assert_eq!(Label::Neos.as_i8(), 0);
        assert_eq!(Label::from_i8(1).unwrap(), Label::Eos);
        assert_eq!(Label::from_i8(2), Err(CoreError::InvalidLabel(2)));
        assert_eq!(Label::from(true), Label::Eos);
        assert_eq!(Label::Neos.name(), "NEOS");
    }

    #[test]
    fn test_push_and_row() {
        let (codec, dataset) = dense_dataset();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.row(0), Some(FeatureRow::Dense(&[1, 2, 50])));
        assert_eq!(dataset.row(3), None);
        assert_eq!(dataset.decode_row(&codec, 1).as_deref(), Some("c, "));
    }

    #[test]
    fn test_push_rejects_wrong_width() {
        let codec = Codec::default();
        let mut dataset = Dataset::new(&codec, 3);
        assert!(matches!(
            dataset.push(&codec, "toolong", Label::Eos),
            Err(CoreError::ShapeMismatch(_))
        ));
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_push_rejects_other_codec() {
        let codec = Codec::default();
        let other = Codec::new(Alphabet::standard(), EncodingMode::OneHot);
        let mut dataset = Dataset::new(&codec, 1);
        assert!(dataset.push(&other, ".", Label::Eos).is_err());
    }

    #[test]
    fn test_indices_and_select() {
        let (_, dataset) = dense_dataset();
        assert_eq!(dataset.indices_of(Label::Eos), vec![0, 2]);
        assert_eq!(dataset.indices_of(Label::Neos), vec![1]);

        let picked = dataset.select(&[2, 1, 1]);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked.labels(), &[Label::Eos, Label::Neos, Label::Neos]);
        assert_eq!(picked.row(0), dataset.row(2));
        assert_eq!(picked.row(2), dataset.row(1));
        // Source untouched
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_one_hot_rows() {
        let codec = Codec::new(Alphabet::standard(), EncodingMode::OneHot);
        let mut dataset = Dataset::with_capacity(&codec, 2, 4);
        dataset.push(&codec, "a.", Label::Eos).unwrap();
        assert_eq!(dataset.row_width(), 140);
        match dataset.row(0) {
            Some(FeatureRow::OneHot(values)) => assert_eq!(values.len(), 140),
            other => panic!("unexpected row {other:?}"),
        }
        assert_eq!(dataset.decode_row(&codec, 0).as_deref(), Some("a."));
    }

    #[test]
    fn test_from_parts_checks_shape() {
        let ok = Dataset::from_parts(2, 70, Features::Dense(vec![1, 2]), vec![Label::Eos]);
        assert!(ok.is_ok());

        let bad = Dataset::from_parts(2, 70, Features::Dense(vec![1, 2, 3]), vec![Label::Eos]);
        assert!(matches!(bad, Err(CoreError::ShapeMismatch(_))));
    }
}
