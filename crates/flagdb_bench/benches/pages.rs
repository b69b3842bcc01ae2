//! Container page serialization benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flagdb_codec::{Archive, Endian};
use flagdb_core::{build_game_data, build_save_data, load_game_data, FlagStore, SaveDataTrailer};
use flagdb_testkit::populated_store;

// 8192 entries spill the boolean partition across two game data pages.
const STORE_SIZES: [usize; 4] = [256, 1024, 4096, 8192];

/// Benchmark serializing game data containers.
fn bench_build_game_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_game_data");

    for count in STORE_SIZES {
        let store = populated_store(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &store, |b, store| {
            b.iter(|| {
                let bytes = build_game_data(black_box(store), Endian::Little).unwrap();
                black_box(bytes);
            });
        });
    }

    group.finish();
}

/// Benchmark serializing save format containers.
fn bench_build_save_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_save_data");
    let trailer = SaveDataTrailer::default();

    for count in STORE_SIZES {
        let store = populated_store(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &store, |b, store| {
            b.iter(|| {
                let bytes = build_save_data(black_box(store), Endian::Little, &trailer).unwrap();
                black_box(bytes);
            });
        });
    }

    group.finish();
}

/// Benchmark reading game data containers back into a store.
fn bench_load_game_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_game_data");

    for count in STORE_SIZES {
        let bytes = build_game_data(&populated_store(count), Endian::Little).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &bytes, |b, bytes| {
            b.iter(|| {
                let archive = Archive::from_bytes(black_box(bytes)).unwrap();
                let mut store = FlagStore::new();
                load_game_data(&archive, &mut store).unwrap();
                black_box(store);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_game_data,
    bench_build_save_data,
    bench_load_game_data,
);

criterion_main!(benches);
