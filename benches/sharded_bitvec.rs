//! Criterion benchmarks for the sharded bit vector and its lock wrappers.
//!
//! ```bash
//! cargo bench --bench sharded_bitvec
//! cargo bench --bench sharded_bitvec -- "concurrent"
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shardbit::core::SharedBitStore;
use shardbit::sync::{ExclusiveBitVec, ShardLockedBitVec};
use shardbit::ShardedBitVec;
use std::sync::Arc;
use std::thread;

const WIDTH: u64 = 1 << 24;
const OPS: usize = 10_000;

/// Deterministic bit numbers in `[0, width)`.
fn generate_bits(count: usize, width: u64, seed: u64) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(0..width)).collect()
}

fn bench_point_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_ops");
    group.throughput(Throughput::Elements(OPS as u64));
    let bits = generate_bits(OPS, WIDTH, 42);

    for shard_bits in [1u64 << 16, 1 << 20, shardbit::SHARD_BITS] {
        let mut bv = ShardedBitVec::with_shard_bits(WIDTH, shard_bits).unwrap();

        group.bench_with_input(BenchmarkId::new("set", shard_bits), &bits, |b, bits| {
            b.iter(|| {
                for &bit in bits {
                    bv.set(black_box(bit)).unwrap();
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("test", shard_bits), &bits, |b, bits| {
            b.iter(|| {
                let mut hits = 0usize;
                for &bit in bits {
                    hits += usize::from(bv.test(black_box(bit)).unwrap());
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

fn bench_set_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_range");
    let mut bv = ShardedBitVec::with_shard_bits(WIDTH, 1 << 20).unwrap();

    for len in [64u64, 4096, 1 << 20] {
        group.throughput(Throughput::Elements(len));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| bv.set_range(black_box(1_000), black_box(1_000 + len), true).unwrap());
        });
    }

    group.finish();
}

fn run_concurrent<S: SharedBitStore + 'static>(store: &Arc<S>, threads: usize, bits: &Arc<Vec<u64>>) {
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let store = Arc::clone(store);
            let bits = Arc::clone(bits);
            thread::spawn(move || {
                for &bit in bits.iter().skip(t).step_by(threads) {
                    store.set(bit).unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}

fn bench_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");
    group.throughput(Throughput::Elements(OPS as u64));
    let bits = Arc::new(generate_bits(OPS, WIDTH, 7));

    for threads in [1usize, 2, 4, 8] {
        let exclusive = Arc::new(ExclusiveBitVec::from(
            ShardedBitVec::with_shard_bits(WIDTH, 1 << 16).unwrap(),
        ));
        group.bench_with_input(BenchmarkId::new("exclusive", threads), &threads, |b, &threads| {
            b.iter(|| run_concurrent(&exclusive, threads, &bits));
        });

        let shard_locked = Arc::new(ShardLockedBitVec::with_shard_bits(WIDTH, 1 << 16).unwrap());
        group.bench_with_input(BenchmarkId::new("shard_locked", threads), &threads, |b, &threads| {
            b.iter(|| run_concurrent(&shard_locked, threads, &bits));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_point_ops, bench_set_range, bench_concurrent);
criterion_main!(benches);
