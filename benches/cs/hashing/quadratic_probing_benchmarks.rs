use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quadmap::cs::hashing::quadratic_probing::ProbingHashMap;
use quadmap::cs::hashing::string_hash::{hash_function_1, hash_function_2, HashFn};
use rand::distributions::Alphanumeric;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_keys(n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let len = rng.gen_range(4..16);
            (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect()
        })
        .collect()
}

fn filled_map(keys: &[String], hasher: HashFn) -> ProbingHashMap<usize> {
    let mut map = ProbingHashMap::new(11, hasher);
    for (i, key) in keys.iter().enumerate() {
        map.put(key, i);
    }
    map
}

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");
    for size in [100, 1_000, 10_000] {
        let keys = random_keys(size, 42);
        for (name, hasher) in [
            ("hash_function_1", hash_function_1 as HashFn),
            ("hash_function_2", hash_function_2 as HashFn),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &keys, |b, keys| {
                b.iter(|| filled_map(black_box(keys), hasher))
            });
        }
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for size in [100, 1_000, 10_000] {
        let keys = random_keys(size, 7);
        let misses = random_keys(size, 8);
        let map = filled_map(&keys, hash_function_2);
        group.bench_with_input(BenchmarkId::new("hit", size), &keys, |b, keys| {
            b.iter(|| {
                for key in keys {
                    black_box(map.get(key));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &misses, |b, misses| {
            b.iter(|| {
                for key in misses {
                    black_box(map.contains_key(key));
                }
            })
        });
    }
    group.finish();
}

fn bench_remove_and_reinsert(c: &mut Criterion) {
    let keys = random_keys(1_000, 99);
    c.bench_function("remove_then_put_1000", |b| {
        b.iter(|| {
            let mut map = filled_map(&keys, hash_function_2);
            for key in keys.iter().step_by(2) {
                map.remove(key);
            }
            for (i, key) in keys.iter().enumerate().step_by(2) {
                map.put(key, i);
            }
            black_box(map.size())
        })
    });
}

criterion_group!(benches, bench_put, bench_get, bench_remove_and_reinsert);
criterion_main!(benches);
