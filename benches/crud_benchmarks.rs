use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use stable_tree::{Location, RbTree};
use std::collections::BTreeSet;

const N: usize = 10_000;

// ─── Helper functions to generate value sequences ───────────────────────────

fn random_values(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

fn sorted_tree(values: &[i64]) -> RbTree<i64> {
    let mut tree = RbTree::with_capacity(values.len());
    for &value in values {
        let location = tree.find(&value);
        if tree.resolve(location).is_none() {
            tree.insert(location, value).unwrap();
        }
    }
    tree
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let values: Vec<i64> = (0..N as i64).collect();
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| b.iter(|| sorted_tree(&values)));

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| values.iter().copied().collect::<BTreeSet<_>>());
    });

    group.finish();
}

fn bench_insert_reverse(c: &mut Criterion) {
    let values: Vec<i64> = (0..N as i64).rev().collect();
    let mut group = c.benchmark_group("insert_reverse");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| b.iter(|| sorted_tree(&values)));

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| values.iter().copied().collect::<BTreeSet<_>>());
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let values = random_values(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| b.iter(|| sorted_tree(&values)));

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| values.iter().copied().collect::<BTreeSet<_>>());
    });

    group.finish();
}

fn bench_insert_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_all");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter(|| {
            let mut tree = RbTree::with_capacity(N);
            tree.insert_all(Location::Root, 0..N as i64).unwrap();
            tree
        });
    });

    group.bench_function(BenchmarkId::new("Vec", N), |b| b.iter(|| (0..N as i64).collect::<Vec<_>>()));

    group.finish();
}

fn bench_insert_random_location(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random_location");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter(|| {
            let mut rng = Xoshiro256StarStar::seed_from_u64(12345);
            let mut tree = RbTree::with_capacity(N);
            for value in 0..N {
                let location = tree.random_free_location(&mut rng);
                tree.insert(location, value).unwrap();
            }
            tree
        });
    });

    group.finish();
}

// ─── Lookup Benchmarks ──────────────────────────────────────────────────────

fn bench_find_random(c: &mut Criterion) {
    let values = random_values(N);
    let tree = sorted_tree(&values);
    let set: BTreeSet<i64> = values.iter().copied().collect();

    let mut group = c.benchmark_group("find_random");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter(|| {
            let mut found = 0usize;
            for value in &values {
                if tree.resolve(tree.find(value)).is_some() {
                    found += 1;
                }
            }
            found
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| values.iter().filter(|value| set.contains(value)).count());
    });

    group.finish();
}

// ─── Order-Statistic Benchmarks ─────────────────────────────────────────────

fn bench_select(c: &mut Criterion) {
    let tree = sorted_tree(&random_values(N));
    let set: BTreeSet<i64> = tree.iter().copied().collect();
    let len = tree.len();

    let mut group = c.benchmark_group("select");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for index in (0..len).step_by(97) {
                sum = sum.wrapping_add(*tree.get_by_rank(index).unwrap());
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for index in (0..len).step_by(97) {
                sum = sum.wrapping_add(*set.iter().nth(index).unwrap());
            }
            sum
        });
    });

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let tree = sorted_tree(&random_values(N));
    let nodes: Vec<_> = tree.traverse().collect();

    let mut group = c.benchmark_group("rank");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter(|| nodes.iter().map(|&node| tree.rank(node)).sum::<usize>());
    });

    group.finish();
}

// ─── Iteration Benchmarks ───────────────────────────────────────────────────

fn bench_iter(c: &mut Criterion) {
    let values = random_values(N);
    let tree = sorted_tree(&values);
    let set: BTreeSet<i64> = values.iter().copied().collect();

    let mut group = c.benchmark_group("iter");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter(|| tree.iter().fold(0i64, |sum, value| sum.wrapping_add(*value)));
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| set.iter().fold(0i64, |sum, value| sum.wrapping_add(*value)));
    });

    group.finish();
}

// ─── Remove Benchmarks ──────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let values = random_values(N);
    let tree = sorted_tree(&values);
    let set: BTreeSet<i64> = values.iter().copied().collect();

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                for value in &values {
                    if let Some(node) = tree.resolve(tree.find(value)) {
                        tree.remove(node).unwrap();
                    }
                }
                tree
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || set.clone(),
            |mut set| {
                for value in &values {
                    set.remove(value);
                }
                set
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_ordered,
    bench_insert_reverse,
    bench_insert_random,
    bench_insert_all,
    bench_insert_random_location,
    bench_find_random,
    bench_select,
    bench_rank,
    bench_iter,
    bench_remove_random,
);
criterion_main!(benches);
