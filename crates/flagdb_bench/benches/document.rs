//! Binary document codec benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flagdb_codec::{from_document_bytes, to_document_bytes, Endian, Value};
use flagdb_core::{Flag, FlagType};
use flagdb_testkit::{map_object, map_unit, revival_bool};

/// Build a map unit document with the given object count.
fn unit_doc(objects: u32) -> Value {
    map_unit(
        (0..objects)
            .map(|i| map_object("Enemy_Bokoblin_Junior", 100_000 + i))
            .collect(),
    )
}

/// Benchmark encoding map unit documents of growing size.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_encode");

    for objects in [16u32, 64, 256, 1024] {
        let doc = unit_doc(objects);
        group.throughput(Throughput::Elements(u64::from(objects)));
        group.bench_with_input(BenchmarkId::from_parameter(objects), &doc, |b, doc| {
            b.iter(|| {
                let bytes = to_document_bytes(black_box(doc), Endian::Little).unwrap();
                black_box(bytes);
            });
        });
    }

    group.finish();
}

/// Benchmark decoding the same documents back out.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_decode");

    for objects in [16u32, 64, 256, 1024] {
        let bytes = to_document_bytes(&unit_doc(objects), Endian::Little).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(objects), &bytes, |b, bytes| {
            b.iter(|| {
                let (doc, _) = from_document_bytes(black_box(bytes)).unwrap();
                black_box(doc);
            });
        });
    }

    group.finish();
}

/// Benchmark flag record conversion in both directions.
fn bench_records(c: &mut Criterion) {
    c.bench_function("flag_to_record", |b| {
        let flag = revival_bool("MainField_Enemy_Bokoblin_Junior_101");
        b.iter(|| {
            let record = black_box(&flag).to_record();
            black_box(record);
        });
    });

    c.bench_function("flag_from_record", |b| {
        let record = revival_bool("MainField_Enemy_Bokoblin_Junior_101").to_record();
        b.iter(|| {
            let flag = Flag::from_record(FlagType::Bool, black_box(&record), true).unwrap();
            black_box(flag);
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_records);

criterion_main!(benches);
