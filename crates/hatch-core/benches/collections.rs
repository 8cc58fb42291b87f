//! Benchmarks for the marker-set collections (AHash vs std, ordered vs unordered)

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hatch_core::alloc::{HashSet as AHashSet, IndexSet};
use std::collections::HashSet as StdHashSet;

fn component_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Component{}", i)).collect()
}

fn bench_name_set_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("name_set_insert");

    for size in [4, 16, 64, 256] {
        let names = component_names(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("std", size), &names, |b, names| {
            b.iter(|| {
                let mut set = StdHashSet::new();
                for name in names {
                    set.insert(black_box(name.as_str()));
                }
                set
            });
        });

        group.bench_with_input(BenchmarkId::new("ahash", size), &names, |b, names| {
            b.iter(|| {
                let mut set = AHashSet::new();
                for name in names {
                    set.insert(black_box(name.as_str()));
                }
                set
            });
        });

        group.bench_with_input(BenchmarkId::new("indexset", size), &names, |b, names| {
            b.iter(|| {
                let mut set = IndexSet::default();
                for name in names {
                    set.insert(black_box(name.as_str()));
                }
                set
            });
        });
    }

    group.finish();
}

fn bench_name_set_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("name_set_contains");

    for size in [4, 16, 64, 256] {
        let names = component_names(size);
        let ahash: AHashSet<&str> = names.iter().map(String::as_str).collect();
        let ordered: IndexSet<&str> = names.iter().map(String::as_str).collect();
        let probe = names[size / 2].clone();

        group.bench_with_input(BenchmarkId::new("ahash", size), &probe, |b, probe| {
            b.iter(|| ahash.contains(black_box(probe.as_str())));
        });

        group.bench_with_input(BenchmarkId::new("indexset", size), &probe, |b, probe| {
            b.iter(|| ordered.contains(black_box(probe.as_str())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_name_set_insert, bench_name_set_contains);
criterion_main!(benches);
