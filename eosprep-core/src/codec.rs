//! Window encoding in dense or one-hot form

use crate::alphabet::{Alphabet, PAD_ID};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a window is turned into numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingMode {
    /// One `i32` ID per window position
    #[default]
    Dense,
    /// One `u8` indicator row of width `vocab_size` per window position
    OneHot,
}

impl EncodingMode {
    /// Canonical name used in configs and manifests
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingMode::Dense => "dense",
            EncodingMode::OneHot => "one-hot",
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(EncodingMode::Dense),
            "one-hot" | "onehot" | "one_hot" => Ok(EncodingMode::OneHot),
            other => Err(CoreError::config(format!(
                "unknown encoding '{other}': expected 'dense' or 'one-hot'"
            ))),
        }
    }
}

/// Encoded rows, flattened row-major
///
/// A dense row holds `window_len` IDs; a one-hot row holds
/// `window_len * vocab_size` indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Features {
    /// Dense ID rows
    Dense(Vec<i32>),
    /// One-hot indicator rows
    OneHot(Vec<u8>),
}

impl Features {
    /// Empty buffer for `mode` with room for `values` scalars
    pub fn with_capacity(mode: EncodingMode, values: usize) -> Self {
        match mode {
            EncodingMode::Dense => Features::Dense(Vec::with_capacity(values)),
            EncodingMode::OneHot => Features::OneHot(Vec::with_capacity(values)),
        }
    }

    /// Encoding mode of this buffer
    pub fn mode(&self) -> EncodingMode {
        match self {
            Features::Dense(_) => EncodingMode::Dense,
            Features::OneHot(_) => EncodingMode::OneHot,
        }
    }

    /// Number of scalars held
    pub fn len(&self) -> usize {
        match self {
            Features::Dense(values) => values.len(),
            Features::OneHot(values) => values.len(),
        }
    }

    /// True if no scalars are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Alphabet plus encoding mode, shared by every stage of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    alphabet: Alphabet,
    mode: EncodingMode,
    vocab_size: usize,
}

impl Codec {
    /// Codec whose vocabulary is exactly the alphabet plus the pad slot
    pub fn new(alphabet: Alphabet, mode: EncodingMode) -> Self {
        let vocab_size = alphabet.vocab_size();
        Self {
            alphabet,
            mode,
            vocab_size,
        }
    }

    /// Override the one-hot row width
    ///
    /// IDs at or past `vocab_size` encode as all-zero one-hot rows. Dense
    /// output is unaffected; the value is only carried for consumers.
    pub fn with_vocab_size(mut self, vocab_size: usize) -> Result<Self> {
        if vocab_size == 0 {
            return Err(CoreError::config("vocab size must be at least 1"));
        }
        self.vocab_size = vocab_size;
        Ok(self)
    }

    /// The alphabet used for lookups
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Encoding mode
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// One-hot row width
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Scalars per encoded window of `window_len` characters
    pub fn row_width(&self, window_len: usize) -> usize {
        match self.mode {
            EncodingMode::Dense => window_len,
            EncodingMode::OneHot => window_len * self.vocab_size,
        }
    }

    /// Map one character to its ID, case-insensitively
    pub fn encode_char(&self, ch: char) -> u8 {
        self.alphabet.id_of(ch)
    }

    /// Encode a window into a single-row [`Features`] buffer
    pub fn encode_window(&self, window: &str) -> Features {
        let len = window.chars().count();
        let mut features = Features::with_capacity(self.mode, self.row_width(len));
        self.encode_into(window, &mut features);
        features
    }

    /// Append the encoding of `window` to `features`
    ///
    /// `features` must have been created for this codec's mode.
    pub(crate) fn encode_into(&self, window: &str, features: &mut Features) {
        match features {
            Features::Dense(values) => {
                values.extend(window.chars().map(|ch| i32::from(self.encode_char(ch))));
            }
            Features::OneHot(values) => {
                for ch in window.chars() {
                    let row_start = values.len();
                    values.resize(row_start + self.vocab_size, 0);
                    let id = self.encode_char(ch) as usize;
                    if id < self.vocab_size {
                        values[row_start + id] = 1;
                    }
                }
            }
        }
    }

    /// Rebuild a window from dense IDs; pad becomes a space, unknown IDs `?`
    pub fn decode_ids(&self, ids: &[i32]) -> String {
        ids.iter()
            .map(|&id| match u8::try_from(id) {
                Ok(PAD_ID) => ' ',
                Ok(id) => self.alphabet.char_of(id).unwrap_or('?'),
                Err(_) => '?',
            })
            .collect()
    }

    /// Rebuild a window from one-hot rows by taking each row's first maximum
    pub fn decode_one_hot(&self, rows: &[u8]) -> String {
        let ids: Vec<i32> = rows
            .chunks(self.vocab_size)
            .map(|row| {
                let mut best = 0;
                for (col, &value) in row.iter().enumerate() {
                    if value > row[best] {
                        best = col;
                    }
                }
                best as i32
            })
            .collect();
        self.decode_ids(&ids)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(Alphabet::standard(), EncodingMode::Dense)
    }
}
