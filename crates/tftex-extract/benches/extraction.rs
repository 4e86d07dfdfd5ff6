//! Benchmarks for the per-sweep extraction hot path.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tftex_core::TransferPoint;
use tftex_extract::{
    ConstantCurrent, SubthresholdFit, ThresholdExtractor, TransconductanceCurve,
    subthreshold_analysis,
};

fn synthetic_sweep(n: usize) -> Vec<TransferPoint> {
    (0..n)
        .map(|i| {
            let vg = -10.0 + i as f64 * 30.0 / n as f64;
            let id = if vg < 2.0 {
                1e-7 * 10f64.powf(2.0 * (vg - 2.0))
            } else {
                1e-7 + 1e-5 * (vg - 2.0)
            };
            TransferPoint::new(vg, id)
        })
        .collect()
}

fn bench_transconductance(c: &mut Criterion) {
    let sweep = synthetic_sweep(1000);
    c.bench_function("gm_central_difference_1k", |b| {
        b.iter(|| TransconductanceCurve::from_sweep(black_box(&sweep)))
    });
}

fn bench_threshold(c: &mut Criterion) {
    let sweep = synthetic_sweep(1000);
    let gm = TransconductanceCurve::from_sweep(&sweep);

    c.bench_function("vth_constant_current_1k", |b| {
        b.iter(|| ConstantCurrent::default().extract(black_box(&sweep), black_box(&gm)))
    });
    c.bench_function("vth_subthreshold_fit_1k", |b| {
        b.iter(|| SubthresholdFit::default().extract(black_box(&sweep), black_box(&gm)))
    });
}

fn bench_subthreshold(c: &mut Criterion) {
    let sweep = synthetic_sweep(1000);
    c.bench_function("subthreshold_swing_1k", |b| {
        b.iter(|| subthreshold_analysis(black_box(&sweep), (-10.0, -6.0)))
    });
}

criterion_group!(
    benches,
    bench_transconductance,
    bench_threshold,
    bench_subthreshold
);
criterion_main!(benches);
