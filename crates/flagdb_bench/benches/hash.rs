//! Flag identity hash benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flagdb_core::{hash_name, Flag, FlagType, FlagValues};

/// Benchmark hashing names of typical lengths.
fn bench_hash_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_name");

    for name in [
        "IsGet_Item_Fruit_A",
        "MainField_Enemy_Bokoblin_Junior_101",
        "ShopStock_Npc_Kakariko_Shop_Item_Roast_Fish_01",
    ] {
        group.throughput(Throughput::Bytes(name.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name.len()), name, |b, name| {
            b.iter(|| {
                let hash = hash_name(black_box(name));
                black_box(hash);
            });
        });
    }

    group.finish();
}

/// Benchmark flag construction, which hashes the name and fills defaults.
fn bench_flag_identity(c: &mut Criterion) {
    c.bench_function("flag_new_bool", |b| {
        b.iter(|| {
            let flag = Flag::new(
                black_box("MainField_Weapon_Sword_001_202"),
                FlagValues::default_for(FlagType::Bool),
            );
            black_box(flag);
        });
    });

    c.bench_function("flag_rename", |b| {
        let mut flag = Flag::new_bool(true);
        b.iter(|| {
            flag.set_name(black_box("MainField_TBox_Field_Wood_303"));
            black_box(flag.hash());
        });
    });
}

criterion_group!(benches, bench_hash_name, bench_flag_identity);

criterion_main!(benches);
