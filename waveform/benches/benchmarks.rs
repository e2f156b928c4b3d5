use criterion::{criterion_group, criterion_main, Criterion};
use waveform::{RhMetrics, Waveform, DEFAULT_RH_PERCENTILES};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Deterministic canopy-like height sample: dense ground returns around
/// 300 m with a vegetation layer up to ~320 m.
fn synthetic_heights(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            300.0 + 20.0 * t * (13.0 * t).sin().abs()
        })
        .collect()
}

fn simulate_waveform(c: &mut Criterion) {
    let mut group = c.benchmark_group("Waveform");

    let heights = synthetic_heights(10_000);

    group.bench_with_input("synthesize", &heights, |b, h| {
        b.iter(|| {
            Waveform::builder()
                .heights(h.clone())
                .build()
                .unwrap()
        })
    });

    let waveform = Waveform::builder()
        .heights(heights)
        .build()
        .unwrap();

    group.bench_with_input("rh_metrics", &waveform, |b, w| {
        b.iter(|| RhMetrics::from_waveform(w, &DEFAULT_RH_PERCENTILES).unwrap())
    });
}

criterion_group!(benches, simulate_waveform);
criterion_main!(benches);
