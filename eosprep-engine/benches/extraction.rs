//! Benchmarks for window extraction and encoding
//!
//! Run with: cargo bench --bench extraction

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eosprep_core::{Alphabet, Budget, Codec, Dataset, EncodingMode, RuleSegmenter, WindowExtractor};
use eosprep_engine::{AssemblerOptions, DatasetAssembler};
use std::fs;
use std::hint::black_box;

/// Generate paragraph text of roughly `size` bytes
fn generate_text(size: usize) -> String {
    let base = "Dr. Smith met Mr. Jones at 3.30 p.m. on Main St. today. Was it late? Yes! ";
    let mut text = base.repeat(size / base.len() + 1);
    text.truncate(size);
    text
}

fn bench_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_into");
    let extractor = WindowExtractor::new(RuleSegmenter::english());

    for size in [1024, 10_240, 102_400] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(size as u64));

        for mode in [EncodingMode::Dense, EncodingMode::OneHot] {
            let codec = Codec::new(Alphabet::standard(), mode);
            group.bench_with_input(BenchmarkId::new(mode.as_str(), size), &text, |b, text| {
                b.iter(|| {
                    let mut dataset = Dataset::new(&codec, extractor.window_len());
                    extractor
                        .extract_into(black_box(text), &codec, &mut dataset, &mut Budget::unlimited())
                        .unwrap();
                    dataset
                });
            });
        }
    }

    group.finish();
}

fn bench_assembler(c: &mut Criterion) {
    let dir = tempfile::TempDir::new().unwrap();
    for i in 0..8 {
        let text = generate_text(32 * 1024).replace("! ", "!\n\n");
        fs::write(dir.path().join(format!("part{i:02}.txt")), text).unwrap();
    }

    let assembler = DatasetAssembler::new(
        Codec::default(),
        RuleSegmenter::english(),
        AssemblerOptions::default(),
    );

    c.bench_function("assemble_corpus", |b| {
        b.iter(|| assembler.build(black_box(dir.path())).unwrap());
    });
}

criterion_group!(benches, bench_encodings, bench_assembler);
criterion_main!(benches);
