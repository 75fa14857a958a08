//! Benchmarks comparing nexus-lists against std::collections::LinkedList.
//!
//! Run with: cargo bench
//!
//! Both sides clone the pushed value, so the comparison covers the
//! type-erased copy path rather than moves.

use std::collections::LinkedList;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use nexus_lists::{List, RawList, TypeInfo};

const COUNT: usize = 10_000;

// ============================================================================
// Push / Pop Benchmarks
// ============================================================================

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    group.throughput(Throughput::Elements(COUNT as u64));

    let ty = TypeInfo::of::<u64>();
    let mut nexus: List<u64> = List::new(&ty).unwrap();
    let mut std_list = LinkedList::<u64>::new();

    group.bench_function("nexus-lists", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                black_box(nexus.push_back(&i)).unwrap();
            }
            nexus.clear();
        });
    });

    group.bench_function("std", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                std_list.push_back(black_box(i));
            }
            std_list.clear();
        });
    });

    group.finish();
}

fn bench_push_pop_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop_cycle");
    group.throughput(Throughput::Elements(COUNT as u64));

    let ty = TypeInfo::of::<u64>();
    let mut nexus: List<u64> = List::new(&ty).unwrap();
    let mut std_list = LinkedList::<u64>::new();

    // Steady state: the node table is warm after the first pass
    group.bench_function("nexus-lists", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                nexus.push_back(&i).unwrap();
                black_box(nexus.pop_front());
            }
        });
    });

    group.bench_function("std", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                std_list.push_back(i);
                black_box(std_list.pop_front());
            }
        });
    });

    group.finish();
}

// ============================================================================
// Cursor Benchmarks
// ============================================================================

fn bench_insert_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_middle");
    group.throughput(Throughput::Elements(COUNT as u64));

    let ty = TypeInfo::of::<u64>();

    group.bench_function("nexus-lists", |b| {
        b.iter(|| {
            let mut list: List<u64> = List::new(&ty).unwrap();
            list.push_back(&0).unwrap();
            list.push_back(&1).unwrap();
            let mut cursor = list.end().unwrap();
            for i in 0..COUNT as u64 {
                list.insert(&mut cursor, &i).unwrap();
            }
            black_box(list.len())
        });
    });

    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    group.throughput(Throughput::Elements(COUNT as u64));

    let ty = TypeInfo::of::<u64>();
    let mut nexus: List<u64> = List::new(&ty).unwrap();
    let mut std_list = LinkedList::<u64>::new();
    for i in 0..COUNT as u64 {
        nexus.push_back(&i).unwrap();
        std_list.push_back(i);
    }

    group.bench_function("nexus-lists/iter", |b| {
        b.iter(|| black_box(nexus.iter().sum::<u64>()));
    });

    group.bench_function("nexus-lists/cursor", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let Some(mut cursor) = nexus.begin() else {
                return sum;
            };
            loop {
                sum += *nexus.get(&cursor).unwrap();
                if !nexus.advance(&mut cursor).unwrap() {
                    break;
                }
            }
            black_box(sum)
        });
    });

    group.bench_function("std", |b| {
        b.iter(|| black_box(std_list.iter().sum::<u64>()));
    });

    group.finish();
}

// ============================================================================
// Raw (type-erased) path
// ============================================================================

fn bench_raw_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_push_back");
    group.throughput(Throughput::Elements(COUNT as u64));

    let ty = TypeInfo::of::<[u64; 4]>();
    let mut raw = RawList::new(&ty).unwrap();

    group.bench_function("32-byte element", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                let value = [i; 4];
                unsafe { raw.push_back((&value as *const [u64; 4]).cast()) }.unwrap();
            }
            raw.clear();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push_back,
    bench_push_pop_cycle,
    bench_insert_middle,
    bench_iterate,
    bench_raw_push_back,
);
criterion_main!(benches);
