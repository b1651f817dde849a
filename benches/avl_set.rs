use avl_collections::avl_tree::{AvlSet, TraversalOrder};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 100;

fn bench_btreeset_insert(c: &mut Criterion) {
    c.bench_function("bench btreeset insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = BTreeSet::new();
            for _ in 0..NUM_OF_OPERATIONS {
                set.insert(rng.next_u32());
            }
        })
    });
}

fn bench_btreeset_get(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = BTreeSet::new();
    let mut values = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.next_u32();
        set.insert(key);
        values.push(key);
    }

    c.bench_function("bench btreeset get", move |b| {
        b.iter(|| {
            for key in &values {
                black_box(set.get(key));
            }
        })
    });
}

fn bench_avl_set_insert(c: &mut Criterion) {
    c.bench_function("bench avl_set insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = AvlSet::new().unwrap();
            for _ in 0..NUM_OF_OPERATIONS {
                let _ = set.insert(rng.next_u32());
            }
        })
    });
}

fn bench_avl_set_get(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = AvlSet::new().unwrap();
    let mut values = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.next_u32();
        let _ = set.insert(key);
        values.push(key);
    }

    c.bench_function("bench avl_set get", move |b| {
        b.iter(|| {
            for key in &values {
                black_box(set.get(key));
            }
        })
    });
}

fn bench_avl_set_remove(c: &mut Criterion) {
    c.bench_function("bench avl_set remove", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = AvlSet::new().unwrap();
            let mut values = Vec::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let _ = set.insert(key);
                values.push(key);
            }
            for key in &values {
                let _ = black_box(set.remove(key));
            }
        })
    });
}

fn bench_avl_set_traverse(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = AvlSet::new().unwrap();
    for _ in 0..NUM_OF_OPERATIONS {
        let _ = set.insert(rng.next_u32());
    }

    c.bench_function("bench avl_set traverse", move |b| {
        b.iter(|| {
            let mut sum = 0u64;
            set.traverse(TraversalOrder::InOrder, |key| sum += u64::from(*key));
            black_box(sum)
        })
    });
}

criterion_group!(
    benches,
    bench_btreeset_get,
    bench_btreeset_insert,
    bench_avl_set_get,
    bench_avl_set_insert,
    bench_avl_set_remove,
    bench_avl_set_traverse,
);
criterion_main!(benches);
