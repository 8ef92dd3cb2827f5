use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use crossbeam_skiplist::SkipSet;
use skipset::SkipList;

const UPPER: usize = 1_000;

fn values() -> Vec<i64> {
    let mut seed: u16 = 0xACE1;

    (0..UPPER)
        .map(|_| {
            seed ^= seed << 6;
            seed ^= seed >> 11;
            seed ^= seed << 5;
            seed as i64
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let values = values();
    let mut group = c.benchmark_group("insert");

    group.bench_function("skipset", |b| {
        b.iter(|| {
            let mut list = SkipList::new(12).unwrap();
            for &value in &values {
                list.insert(black_box(value));
            }
            list
        })
    });

    group.bench_function("crossbeam", |b| {
        b.iter(|| {
            let set = SkipSet::new();
            for &value in &values {
                set.insert(black_box(value));
            }
            set
        })
    });

    group.bench_function("btreeset", |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &value in &values {
                set.insert(black_box(value));
            }
            set
        })
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let values = values();
    let list = values.iter().copied().collect::<SkipList>();
    let set = values.iter().copied().collect::<SkipSet<_>>();

    let mut group = c.benchmark_group("search");

    group.bench_function("skipset", |b| {
        b.iter(|| {
            values
                .iter()
                .filter(|&&value| list.search(black_box(value)).found)
                .count()
        })
    });

    group.bench_function("crossbeam", |b| {
        b.iter(|| {
            values
                .iter()
                .filter(|&&value| set.contains(&black_box(value)))
                .count()
        })
    });

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let values = values();

    c.bench_function("remove/skipset", |b| {
        b.iter_batched(
            || values.iter().copied().collect::<SkipList>(),
            |mut list| {
                for &value in &values {
                    list.remove(black_box(value));
                }
                list
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_insert, bench_search, bench_remove);
criterion_main!(benches);
