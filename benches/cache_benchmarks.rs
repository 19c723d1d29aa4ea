//! Benchmarks for the three ways a request can be served:
//! fast path, fingerprint recheck, and full re-read.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use filecache::cache::FileCache;
use filecache::clock::ManualClock;
use filecache::source::ContentHashSource;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const SIZES: [usize; 3] = [1024, 64 * 1024, 1024 * 1024];

fn fixture(size: usize) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bench.bin");
    fs::write(&path, vec![0xA5u8; size]).unwrap();
    (dir, path)
}

fn bench_fast_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_path");
    for size in SIZES {
        let (_dir, path) = fixture(size);
        let mut cache = FileCache::new(ManualClock::new(), Duration::from_secs(60));
        cache.get_content(&path).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &path, |b, path| {
            b.iter(|| black_box(cache.get_content(path).unwrap()));
        });
    }
    group.finish();
}

fn bench_metadata_recheck(c: &mut Criterion) {
    let mut group = c.benchmark_group("metadata_recheck");
    for size in SIZES {
        let (_dir, path) = fixture(size);
        let mut cache = FileCache::new(ManualClock::new(), Duration::ZERO);
        cache.get_content(&path).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &path, |b, path| {
            b.iter(|| black_box(cache.get_content(path).unwrap()));
        });
    }
    group.finish();
}

fn bench_content_hash_recheck(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_hash_recheck");
    for size in SIZES {
        let (_dir, path) = fixture(size);
        let mut cache = FileCache::with_source(ManualClock::new(), Duration::ZERO, ContentHashSource);
        cache.get_content(&path).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &path, |b, path| {
            b.iter(|| black_box(cache.get_content(path).unwrap()));
        });
    }
    group.finish();
}

fn bench_cold_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_read");
    for size in SIZES {
        let (_dir, path) = fixture(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &path, |b, path| {
            b.iter(|| {
                let mut cache = FileCache::new(ManualClock::new(), Duration::from_secs(60));
                black_box(cache.get_content(path).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_fast_path,
    bench_metadata_recheck,
    bench_content_hash_recheck,
    bench_cold_read
);
criterion_main!(benches);
