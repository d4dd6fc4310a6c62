use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use std::f64::consts::PI;
use streaming_spectrogram::{EngineConfig, SpectrogramEngine, TaperSet, WindowFunction};

fn filled_engine(window_size: usize, window: WindowFunction, num_tapers: usize) -> SpectrogramEngine {
    let tapers = TaperSet::new(
        Array2::from_shape_fn((num_tapers, window_size), |(k, n)| {
            (PI * (k + 1) as f64 * (n + 1) as f64 / (window_size as f64 + 1.0)).sin()
        }),
        vec![1.0; num_tapers],
    )
    .unwrap();

    let config = EngineConfig {
        num_tapers,
        ..EngineConfig::new(window_size, window, 48000.0)
    };
    let mut engine = SpectrogramEngine::with_taper_source(config, &tapers).unwrap();
    for n in 0..window_size {
        engine.add_point((2.0 * PI * 1000.0 * n as f64 / 48000.0).sin());
    }
    engine
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");

    for &size in &[256usize, 1024, 4096] {
        let mut hamming = filled_engine(size, WindowFunction::Hamming, 1);
        group.bench_with_input(BenchmarkId::new("hamming", size), &size, |b, _| {
            b.iter(|| {
                hamming.add_point(black_box(0.5));
                black_box(hamming.process().unwrap())
            })
        });

        let mut multitaper = filled_engine(size, WindowFunction::Multitaper, 5);
        group.bench_with_input(BenchmarkId::new("multitaper_5", size), &size, |b, _| {
            b.iter(|| {
                multitaper.add_point(black_box(0.5));
                black_box(multitaper.process().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut engine = filled_engine(1024, WindowFunction::BlackmanHarris, 1);
    engine.process().unwrap();
    let mut power = vec![0.0; engine.num_bins()];
    let mut phase = vec![0.0; engine.num_bins()];

    c.bench_function("power_phase_1024", |b| {
        b.iter(|| {
            engine.power(&mut power).unwrap();
            engine.phase(&mut phase, black_box(12345), None).unwrap();
        })
    });
}

criterion_group!(benches, bench_process, bench_extract);
criterion_main!(benches);
