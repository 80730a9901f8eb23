use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use random_bst::treap::TreapSet;

const NUM_OF_OPERATIONS: usize = 1000;

fn bench_treap_insert_sorted(c: &mut Criterion) {
    c.bench_function("bench treap insert sorted", |b| {
        b.iter(|| {
            let mut t = TreapSet::with_rng(StdRng::seed_from_u64(1));
            for key in 0..NUM_OF_OPERATIONS {
                t.insert(key);
            }
            black_box(t.height())
        })
    });
}

fn bench_treap_insert_random(c: &mut Criterion) {
    c.bench_function("bench treap insert random", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            let mut t = TreapSet::with_rng(StdRng::seed_from_u64(2));
            for _ in 0..NUM_OF_OPERATIONS {
                t.insert(rng.gen::<u32>());
            }
        })
    });
}

fn bench_treap_contains(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut t = TreapSet::with_rng(StdRng::seed_from_u64(2));
    let mut keys = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen::<u32>();
        t.insert(key);
        keys.push(key);
    }

    c.bench_function("bench treap contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(t.contains(key));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_treap_insert_sorted,
    bench_treap_insert_random,
    bench_treap_contains,
);
criterion_main!(benches);
