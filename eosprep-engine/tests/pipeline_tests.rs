//! End-to-end tests: corpus directory to stored, balanced arrays

use eosprep_engine::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_corpus(dir: &Path) {
    fs::write(
        dir.join("01_news.txt"),
        "<doc id=\"1\">\n\
         Mr. Smith arrived at 9 a.m. on Monday.\n\
         He was late!\n\
         \n\
         Was the meeting over? Nobody knew. The U.S. office stayed quiet.\n\
         </doc>\n",
    )
    .unwrap();
    fs::write(
        dir.join("02_story.txt"),
        "It was 3.5 km away. Dr. Brown said so.\n\nWhat now? Wait... nothing.\n",
    )
    .unwrap();
    fs::write(dir.join("README.md"), "Not part. Of the corpus.").unwrap();
}

fn config(text: &str) -> PipelineConfig {
    PipelineConfig::from_toml_str(text).unwrap()
}

fn assemble(config: &PipelineConfig, corpus: &Path) -> Dataset {
    DatasetAssembler::new(
        config.codec().unwrap(),
        config.segmenter(),
        config.assembler_options(),
    )
    .build(corpus)
    .unwrap()
}

#[test]
fn test_raw_dataset_shape_and_labels() {
    let corpus = TempDir::new().unwrap();
    write_corpus(corpus.path());

    let config = PipelineConfig::default();
    let dataset = assemble(&config, corpus.path());

    assert!(!dataset.is_empty());
    assert_eq!(dataset.window_len(), 21);
    assert_eq!(dataset.features().len(), dataset.len() * 21);

    let counts = ClassCounts::of(&dataset);
    assert!(counts.eos > 0);
    assert!(counts.neos > 0);

    // Every window is centered on a mark or padded around one
    let codec = config.codec().unwrap();
    for i in 0..dataset.len() {
        let window = dataset.decode_row(&codec, i).unwrap();
        assert_eq!(window.chars().count(), 21);
        assert!(window.contains(['.', '?', '!']));
    }
}

#[test]
fn test_cap_is_exact() {
    let corpus = TempDir::new().unwrap();
    write_corpus(corpus.path());

    let full = assemble(&PipelineConfig::default(), corpus.path());
    let capped = assemble(&config("[dataset]\nmax_examples = 5\n"), corpus.path());

    assert_eq!(capped.len(), 5);
    assert_eq!(capped.labels(), &full.labels()[..5]);
}

#[test]
fn test_store_and_balance_round_trip() {
    let corpus = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_corpus(corpus.path());

    let config = PipelineConfig::default();
    let codec = config.codec().unwrap();
    let dataset = assemble(&config, corpus.path());
    let store = DatasetStore::new(out.path());

    store
        .save(&dataset, &Manifest::describe(&dataset, &codec, DatasetVariant::Raw))
        .unwrap();
    assert!(out.path().join("X.npy").is_file());
    assert!(out.path().join("y.npy").is_file());
    assert!(out.path().join("X.manifest.json").is_file());

    let (raw, manifest) = store.load(DatasetVariant::Raw).unwrap();
    assert_eq!(raw, dataset);
    let codec = manifest.codec().unwrap();

    for mode in [BalanceMode::Strict, BalanceMode::Ratio] {
        let policy = BalancePolicy::new(mode, 2);
        let balanced = balance(&raw, policy, &mut seeded_rng(42)).unwrap();
        let manifest = Manifest::describe(&balanced, &codec, mode.into()).with_balance(
            BalanceRecord {
                mode,
                ratio: Some(2),
                seed: 42,
            },
        );
        store.save(&balanced, &manifest).unwrap();

        let (loaded, loaded_manifest) = store.load(mode.into()).unwrap();
        assert_eq!(loaded, balanced);
        assert_eq!(loaded_manifest.counts, ClassCounts::of(&balanced));
    }

    assert!(out.path().join("X_bal_strict.npy").is_file());
    assert!(out.path().join("y_bal_ratio.npy").is_file());
}

#[test]
fn test_one_hot_pipeline() {
    let corpus = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_corpus(corpus.path());

    let config = config("[dataset]\nencoding = \"one-hot\"\nvocab_size = 97\nwindow_radius = 4\n");
    let codec = config.codec().unwrap();
    let dataset = assemble(&config, corpus.path());
    assert_eq!(dataset.row_width(), 9 * 97);

    let store = DatasetStore::new(out.path());
    store
        .save(&dataset, &Manifest::describe(&dataset, &codec, DatasetVariant::Raw))
        .unwrap();
    let (loaded, manifest) = store.load(DatasetVariant::Raw).unwrap();

    assert_eq!(manifest.encoding, EncodingMode::OneHot);
    assert_eq!(manifest.window_radius(), 4);
    assert_eq!(loaded, dataset);
}

#[test]
fn test_same_seed_same_files() {
    let corpus = TempDir::new().unwrap();
    write_corpus(corpus.path());
    let dataset = assemble(&PipelineConfig::default(), corpus.path());

    let a = balance(&dataset, BalancePolicy::Strict, &mut seeded_rng(9)).unwrap();
    let b = balance(&dataset, BalancePolicy::Strict, &mut seeded_rng(9)).unwrap();
    assert_eq!(a, b);
}
