//! Benchmarks for the proof-of-work search loop.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pow_attest_core::{HashAlgorithm, PowSearch, Prefix, Seed};
use std::num::NonZeroUsize;

fn bench_digest(c: &mut Criterion) {
    c.bench_function("sha256_candidate", |b| {
        b.iter(|| HashAlgorithm::Sha256.digest(black_box(b"Patrick13917")))
    });
    c.bench_function("blake3_candidate", |b| {
        b.iter(|| HashAlgorithm::Blake3.digest(black_box(b"Patrick13917")))
    });
}

fn bench_search(c: &mut Criterion) {
    let seed = Seed::new("Patrick").unwrap();
    let prefix = Prefix::new("000").unwrap();
    let search = PowSearch::default();

    c.bench_function("search_sequential_000", |b| {
        b.iter(|| search.search(black_box(&seed), black_box(&prefix)).unwrap())
    });

    let workers = NonZeroUsize::new(4).unwrap();
    c.bench_function("search_parallel4_000", |b| {
        b.iter(|| {
            search
                .search_parallel(black_box(&seed), black_box(&prefix), workers)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_digest, bench_search);
criterion_main!(benches);
