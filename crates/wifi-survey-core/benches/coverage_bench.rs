//! Benchmarks for the surface interpolation hot path.

use criterion::{criterion_group, criterion_main, Criterion};

use wifi_survey_core::config::SurveyConfig;
use wifi_survey_core::coverage::{
    per_cell_surface, smoothed_surface, FloorExtent, Sample, SurfaceUnit,
};

/// Deterministic scattered survey: a jittered grid of spots with a radial
/// signal falloff, no OS entropy involved.
fn synthetic_samples(side: usize) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(side * side);
    for i in 0..side {
        for j in 0..side {
            let base_x = i as f64 * 2.0;
            let base_y = j as f64 * 2.0;
            let jitter_x = ((i * 31 + j * 17) % 13) as f64 / 13.0 - 0.5;
            let jitter_y = ((i * 7 + j * 29) % 11) as f64 / 11.0 - 0.5;
            let x = base_x + jitter_x;
            let y = base_y + jitter_y;
            let distance = x.hypot(y).max(1.0);
            samples.push(Sample {
                x_m: x,
                y_m: y,
                value: -30.0 - 20.0 * distance.log10(),
            });
        }
    }
    samples
}

fn bench_surfaces(c: &mut Criterion) {
    let config = SurveyConfig::default();
    let samples = synthetic_samples(12);
    let extent = FloorExtent {
        width_m: 30.0,
        height_m: 30.0,
    };

    c.bench_function("per_cell_surface_144_samples", |b| {
        b.iter(|| {
            per_cell_surface(&samples, SurfaceUnit::Dbm, &config).expect("surface")
        });
    });

    c.bench_function("smoothed_surface_144_samples", |b| {
        b.iter(|| {
            smoothed_surface(&samples, &extent, SurfaceUnit::Dbm, &config).expect("surface")
        });
    });
}

criterion_group!(benches, bench_surfaces);
criterion_main!(benches);
