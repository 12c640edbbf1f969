//! Criterion benchmarks for per-observation detector updates.
//!
//! Covers baseline ST/SR/CU accumulators, mixtures over growing tilt grids,
//! and the windowed GLR detector across window sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stcp_core::{BaselineE, BernoulliLr, EProcess, GlrCu, Mixture, Normal, NormalLr, Side, Stcp};

fn observations(len: usize) -> Vec<f64> {
    // Deterministic, mildly shifted sawtooth.
    (0..len).map(|i| ((i % 17) as f64 - 8.0) / 4.0 + 0.2).collect()
}

fn bench_baseline_rules(c: &mut Criterion) {
    let xs = observations(1_000);
    let mut group = c.benchmark_group("baseline_rules");
    for (name, e) in [
        ("st", BaselineE::st(Normal::standard(0.5))),
        ("sr", BaselineE::sr(Normal::standard(0.5))),
        ("cu", BaselineE::cu(Normal::standard(0.5))),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut e = e.clone();
                for &x in &xs {
                    e.update(black_box(x)).unwrap();
                }
                black_box(e.log_value())
            })
        });
    }
    group.finish();
}

fn bench_mixture_grid(c: &mut Criterion) {
    let xs = observations(1_000);
    let mut group = c.benchmark_group("mixture_sr");
    for &size in &[1usize, 4, 16, 64] {
        let children: Vec<_> = (1..=size)
            .map(|i| BaselineE::sr(Normal::standard(i as f64 / size as f64)))
            .collect();
        let det = Stcp::with_default_threshold(Mixture::uniform(children).unwrap());
        group.bench_with_input(BenchmarkId::from_parameter(size), &det, |b, det| {
            b.iter(|| {
                let mut det = det.clone();
                det.update_many(black_box(&xs)).unwrap();
                black_box(det.log_value())
            })
        });
    }
    group.finish();
}

fn bench_glr_window(c: &mut Criterion) {
    let xs = observations(1_000);
    let bits: Vec<f64> = xs.iter().map(|&x| if x > 0.0 { 1.0 } else { 0.0 }).collect();
    let mut group = c.benchmark_group("glr_cu");
    for &window in &[10usize, 100, 500] {
        let normal = GlrCu::new(NormalLr::glr(0.0, 1.0, Side::TwoSided).unwrap(), window).unwrap();
        group.bench_with_input(BenchmarkId::new("normal", window), &normal, |b, g| {
            b.iter(|| {
                let mut g = g.clone();
                for &x in &xs {
                    g.update(black_box(x)).unwrap();
                }
                black_box(g.log_value())
            })
        });
        let bernoulli = GlrCu::new(BernoulliLr::glr(0.4, Side::Greater).unwrap(), window).unwrap();
        group.bench_with_input(BenchmarkId::new("bernoulli", window), &bernoulli, |b, g| {
            b.iter(|| {
                let mut g = g.clone();
                for &x in &bits {
                    g.update(black_box(x)).unwrap();
                }
                black_box(g.log_value())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_baseline_rules, bench_mixture_grid, bench_glr_window);
criterion_main!(benches);
