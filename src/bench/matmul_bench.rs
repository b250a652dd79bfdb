//! Criterion benchmarks for every multiplier variant.
//!
//! Shapes are kept small enough that the lock-per-scalar variant finishes
//! in reasonable time. Two shapes show the trade-off between the
//! decompositions: a deep q favours inner products, wide p and r favour
//! outer products.

use concmul::{Algorithm, generate_seeded};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const SHAPES: [(usize, usize, usize); 2] = [
    (16, 512, 16), // deep q
    (128, 8, 128), // wide p, r
];

fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    group.sample_size(10);

    for (p, q, r) in SHAPES {
        let a = generate_seeded(p, q, 1).unwrap();
        let bt = generate_seeded(r, q, 2).unwrap();
        let label = format!("{}x{}x{}", p, q, r);
        group.throughput(Throughput::Elements((p * q * r) as u64));

        for algorithm in Algorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), &label),
                &(&a, &bt),
                |b, (a, bt)| b.iter(|| algorithm.multiply(black_box(a), black_box(bt)).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_variants);
criterion_main!(benches);
