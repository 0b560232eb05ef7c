// Criterion benchmarks for wordcast-engine.
//
// The bundled test corpus is tiny, so index benchmarks build synthetic
// n-gram sets; pipeline benchmarks use tests/data.
//
// Run:
//   cargo bench -p wordcast-engine --features handle

use std::hint::black_box;
use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};
use wordcast_engine::handle::PredictorHandle;
use wordcast_engine::{NgramIndex, PredictorOptions};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn load_handle() -> PredictorHandle {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data");
    PredictorHandle::from_dir(&dir, PredictorOptions::default()).expect("test corpus")
}

/// `count` distinct bigram keys in scrambled order.
fn synthetic_keys(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| (i * 7919) % count)
        .map(|n| format!("w{:05} x{:03}", n / 10, n % 10))
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Insert 50k scrambled keys into an index with default node capacity.
fn bench_ngram_insert(c: &mut Criterion) {
    let keys = synthetic_keys(50_000);
    c.bench_function("ngram_insert_50k", |b| {
        b.iter(|| {
            let mut index = NgramIndex::new();
            for (i, key) in keys.iter().enumerate() {
                index.insert(key, i as u64);
            }
            black_box(index.len())
        });
    });
}

/// Bigram query on a populated index.
fn bench_ngram_query(c: &mut Criterion) {
    let mut index = NgramIndex::new();
    for (i, key) in synthetic_keys(50_000).iter().enumerate() {
        index.insert(key, i as u64);
    }
    c.bench_function("ngram_query_first_word", |b| {
        b.iter(|| black_box(index.query_by_first_word(black_box("w02500"), None)));
    });
}

/// Resolve tokens through each backoff stage.
fn bench_resolve(c: &mut Criterion) {
    let handle = load_handle();
    let tokens = ["the", "hel", "lov", "dogg", "zzqx"];
    c.bench_function("resolve_5_tokens", |b| {
        b.iter(|| {
            for token in &tokens {
                black_box(handle.resolve(token));
            }
        });
    });
}

/// Full completion pipeline on a few lines.
fn bench_complete(c: &mut Criterion) {
    let handle = load_handle();
    let lines = ["I saw the cat", "a cat", "I lov the quick, brown", "the lazy zzqx"];
    c.bench_function("complete_4_lines", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(handle.complete(line));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_ngram_insert,
    bench_ngram_query,
    bench_resolve,
    bench_complete
);
criterion_main!(benches);
