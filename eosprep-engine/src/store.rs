//! Array persistence in `.npy` format with a JSON manifest
//!
//! Every dataset variant is stored as a feature array, a label array and a
//! manifest that records what a consumer needs to rebuild the codec: the
//! encoding mode, window length, vocab size and alphabet.

use crate::error::{EngineError, Result};
use eosprep_core::{
    Alphabet, BalanceMode, ClassCounts, Codec, Dataset, EncodingMode, Features, Label,
};
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayView3};
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which stage of the pipeline a stored array pair comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetVariant {
    /// Unbalanced assembler output
    Raw,
    /// Strictly balanced
    Strict,
    /// Ratio balanced
    Ratio,
}

impl DatasetVariant {
    /// Variant name
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetVariant::Raw => "raw",
            DatasetVariant::Strict => "strict",
            DatasetVariant::Ratio => "ratio",
        }
    }

    /// Feature array file name
    pub fn features_file(&self) -> &'static str {
        match self {
            DatasetVariant::Raw => "X.npy",
            DatasetVariant::Strict => "X_bal_strict.npy",
            DatasetVariant::Ratio => "X_bal_ratio.npy",
        }
    }

    /// Label array file name
    pub fn labels_file(&self) -> &'static str {
        match self {
            DatasetVariant::Raw => "y.npy",
            DatasetVariant::Strict => "y_bal_strict.npy",
            DatasetVariant::Ratio => "y_bal_ratio.npy",
        }
    }

    /// Manifest file name
    pub fn manifest_file(&self) -> &'static str {
        match self {
            DatasetVariant::Raw => "X.manifest.json",
            DatasetVariant::Strict => "X_bal_strict.manifest.json",
            DatasetVariant::Ratio => "X_bal_ratio.manifest.json",
        }
    }
}

impl From<BalanceMode> for DatasetVariant {
    fn from(mode: BalanceMode) -> Self {
        match mode {
            BalanceMode::Strict => DatasetVariant::Strict,
            BalanceMode::Ratio => DatasetVariant::Ratio,
        }
    }
}

impl fmt::Display for DatasetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetVariant {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" => Ok(DatasetVariant::Raw),
            "strict" => Ok(DatasetVariant::Strict),
            "ratio" => Ok(DatasetVariant::Ratio),
            other => Err(EngineError::Config(format!(
                "unknown dataset variant '{other}': expected raw, strict or ratio"
            ))),
        }
    }
}

/// How a balanced variant was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// Balancing mode
    pub mode: BalanceMode,
    /// EOS-per-NEOS ratio, ratio mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<usize>,
    /// RNG seed
    pub seed: u64,
}

/// Description of one stored array pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Stored variant
    pub variant: DatasetVariant,
    /// Dense IDs or one-hot rows
    pub encoding: EncodingMode,
    /// Characters per window
    pub window_len: usize,
    /// One-hot row width
    pub vocab_size: usize,
    /// Characters with IDs `1..=len`, in ID order
    pub alphabet: String,
    /// Number of rows
    pub examples: usize,
    /// Rows per class
    pub counts: ClassCounts,
    /// Balancing parameters for balanced variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<BalanceRecord>,
    /// Version of the writer
    pub generator: String,
}

impl Manifest {
    /// Describe `dataset`, encoded with `codec`, as `variant`
    pub fn describe(dataset: &Dataset, codec: &Codec, variant: DatasetVariant) -> Self {
        Self {
            variant,
            encoding: dataset.mode(),
            window_len: dataset.window_len(),
            vocab_size: dataset.vocab_size(),
            alphabet: codec.alphabet().as_string(),
            examples: dataset.len(),
            counts: ClassCounts::of(dataset),
            balance: None,
            generator: concat!("eosprep ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Attach balancing parameters
    pub fn with_balance(mut self, record: BalanceRecord) -> Self {
        self.balance = Some(record);
        self
    }

    /// Radius the window length was derived from
    pub fn window_radius(&self) -> usize {
        self.window_len.saturating_sub(1) / 2
    }

    /// Rebuild the codec the arrays were encoded with
    pub fn codec(&self) -> Result<Codec> {
        let alphabet = Alphabet::from_chars(&self.alphabet)?;
        Codec::new(alphabet, self.encoding)
            .with_vocab_size(self.vocab_size)
            .map_err(EngineError::from)
    }
}

/// Paths of one stored variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPaths {
    /// Feature array
    pub features: PathBuf,
    /// Label array
    pub labels: PathBuf,
    /// Manifest
    pub manifest: PathBuf,
}

/// A directory holding stored dataset variants
#[derive(Debug, Clone)]
pub struct DatasetStore {
    root: PathBuf,
}

impl DatasetStore {
    /// Store rooted at `root`; nothing is touched until a save or load
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where `variant` lives in this store
    pub fn paths(&self, variant: DatasetVariant) -> VariantPaths {
        VariantPaths {
            features: self.root.join(variant.features_file()),
            labels: self.root.join(variant.labels_file()),
            manifest: self.root.join(variant.manifest_file()),
        }
    }

    /// True if the arrays and manifest of `variant` all exist
    pub fn contains(&self, variant: DatasetVariant) -> bool {
        let paths = self.paths(variant);
        paths.features.is_file() && paths.labels.is_file() && paths.manifest.is_file()
    }

    /// Write `dataset` under the variant named in `manifest`
    pub fn save(&self, dataset: &Dataset, manifest: &Manifest) -> Result<VariantPaths> {
        check_manifest(dataset, manifest)?;
        fs::create_dir_all(&self.root)?;
        let paths = self.paths(manifest.variant);

        let rows = dataset.len();
        let window_len = dataset.window_len();
        match dataset.features() {
            Features::Dense(values) => {
                let view = ArrayView2::from_shape((rows, window_len), values.as_slice())
                    .map_err(|e| EngineError::storage(&paths.features, e))?;
                write_array(&paths.features, |w| view.write_npy(w))?;
            }
            Features::OneHot(values) => {
                let view =
                    ArrayView3::from_shape((rows, window_len, dataset.vocab_size()), values.as_slice())
                        .map_err(|e| EngineError::storage(&paths.features, e))?;
                write_array(&paths.features, |w| view.write_npy(w))?;
            }
        }

        let labels: Vec<i8> = dataset.labels().iter().map(|l| l.as_i8()).collect();
        let labels = ArrayView1::from(&labels[..]);
        write_array(&paths.labels, |w| labels.write_npy(w))?;

        let json = serde_json::to_string_pretty(manifest)
            .map_err(|e| EngineError::storage(&paths.manifest, e))?;
        fs::write(&paths.manifest, json).map_err(|e| EngineError::storage(&paths.manifest, e))?;

        log::info!(
            "Saved {} {} examples to {}",
            rows,
            manifest.variant,
            paths.features.display()
        );
        Ok(paths)
    }

    /// Read the manifest of `variant`
    pub fn load_manifest(&self, variant: DatasetVariant) -> Result<Manifest> {
        let path = self.paths(variant).manifest;
        let text = fs::read_to_string(&path).map_err(|e| EngineError::storage(&path, e))?;
        let manifest: Manifest =
            serde_json::from_str(&text).map_err(|e| EngineError::storage(&path, e))?;
        if manifest.variant != variant {
            return Err(EngineError::storage(
                &path,
                format!("manifest describes '{}', expected '{variant}'", manifest.variant),
            ));
        }
        Ok(manifest)
    }

    /// Read `variant` back, shaped by its manifest
    pub fn load(&self, variant: DatasetVariant) -> Result<(Dataset, Manifest)> {
        let manifest = self.load_manifest(variant)?;
        let paths = self.paths(variant);

        let labels: Array1<i8> = read_array(&paths.labels)?;
        let labels = labels
            .iter()
            .map(|&v| Label::from_i8(v))
            .collect::<eosprep_core::Result<Vec<_>>>()?;

        let features = match manifest.encoding {
            EncodingMode::Dense => {
                let array: Array2<i32> = read_array(&paths.features)?;
                expect_shape(&paths.features, array.shape(), &[labels.len(), manifest.window_len])?;
                Features::Dense(array.iter().copied().collect())
            }
            EncodingMode::OneHot => {
                let array: Array3<u8> = read_array(&paths.features)?;
                expect_shape(
                    &paths.features,
                    array.shape(),
                    &[labels.len(), manifest.window_len, manifest.vocab_size],
                )?;
                Features::OneHot(array.iter().copied().collect())
            }
        };

        let dataset =
            Dataset::from_parts(manifest.window_len, manifest.vocab_size, features, labels)?;
        log::debug!("Loaded {} {} examples", dataset.len(), variant);
        Ok((dataset, manifest))
    }
}

fn check_manifest(dataset: &Dataset, manifest: &Manifest) -> Result<()> {
    let consistent = manifest.encoding == dataset.mode()
        && manifest.window_len == dataset.window_len()
        && manifest.vocab_size == dataset.vocab_size()
        && manifest.examples == dataset.len();
    if consistent {
        Ok(())
    } else {
        Err(EngineError::Config(format!(
            "manifest for '{}' does not describe the dataset being saved",
            manifest.variant
        )))
    }
}

fn write_array<F, E>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::result::Result<(), E>,
    E: fmt::Display,
{
    let file = File::create(path).map_err(|e| EngineError::storage(path, e))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).map_err(|e| EngineError::storage(path, e))?;
    writer.flush().map_err(|e| EngineError::storage(path, e))
}

fn read_array<A: ReadNpyExt>(path: &Path) -> Result<A> {
    let file = File::open(path).map_err(|e| EngineError::storage(path, e))?;
    A::read_npy(BufReader::new(file)).map_err(|e| EngineError::storage(path, e))
}

fn expect_shape(path: &Path, actual: &[usize], expected: &[usize]) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(EngineError::storage(
            path,
            format!("array shape {actual:?} does not match manifest {expected:?}"),
        ))
    }
}
