use bernstein::{Bernstein, casteljau};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn eval_cubic(c: &mut Criterion) {
    let poly = Bernstein::new([1.0, -3.0, 2.5, -10.0], -1.0, 2.0).unwrap();
    c.bench_function("eval_cubic", |b| {
        b.iter(|| {
            let value = poly.eval(black_box(0.37));
            black_box(value)
        })
    });
}

fn eval_degree_20(c: &mut Criterion) {
    let coeffs: Vec<f64> = (0..=20).map(|k| (k as f64).sin()).collect();
    let poly = Bernstein::new(coeffs.iter().copied(), 0.0, 1.0).unwrap();
    c.bench_function("eval_degree_20", |b| {
        b.iter(|| {
            let value = poly.eval(black_box(0.61));
            black_box(value)
        })
    });
    c.bench_function("casteljau_degree_20", |b| {
        b.iter(|| {
            let value = casteljau(black_box(&coeffs), black_box(0.61));
            black_box(value)
        })
    });
}

fn resample_degree_10(c: &mut Criterion) {
    let coeffs: Vec<f64> = (0..=10).map(|k| (k as f64).cos()).collect();
    let poly = Bernstein::new(coeffs, -2.0, 2.0).unwrap();
    c.bench_function("resample_degree_10", |b| {
        b.iter(|| {
            let sub = poly.resampled(black_box(-0.4), black_box(1.3)).unwrap();
            black_box(sub)
        })
    });
}

criterion_group!(benches, eval_cubic, eval_degree_20, resample_degree_10);
criterion_main!(benches);
