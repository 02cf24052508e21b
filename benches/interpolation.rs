use bernstein::interpolation;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn interpolate_uniform_10(c: &mut Criterion) {
    let xs: Vec<f64> = (0..=10).map(|k| k as f64 / 10.0).collect();
    let ys: Vec<f64> = xs.iter().map(|x| (4.0 * x).sin()).collect();
    c.bench_function("interpolate_uniform_10", |b| {
        b.iter(|| {
            let poly = interpolation::bernstein(
                black_box(xs.iter().copied()),
                black_box(ys.iter().copied()),
                0.0,
                1.0,
            )
            .unwrap();
            black_box(poly)
        })
    });
}

fn lobatto_20(c: &mut Criterion) {
    c.bench_function("lobatto_20", |b| {
        b.iter(|| {
            let poly = interpolation::lobatto(f64::exp, black_box(20), -1.0, 1.0).unwrap();
            black_box(poly)
        })
    });
}

criterion_group!(benches, interpolate_uniform_10, lobatto_20);
criterion_main!(benches);
