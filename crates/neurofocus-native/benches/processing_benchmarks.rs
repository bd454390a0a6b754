//! Benchmarks for cleaning, band power and classification

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use neurofocus_native::processing::{
    clean::{BandpassCleaner, SignalCleaner},
    fft::SpectralAnalyzer,
};
use neurofocus_native::{ClassifierConfig, ConcentrationClassifier, ConcentrationPipeline};

/// Generate synthetic EEG data (alpha + beta sinusoids with pseudo-noise)
fn generate_eeg_samples(n: usize, sample_rate: f64) -> Vec<f64> {
    use std::f64::consts::PI;

    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate;
            let alpha = (2.0 * PI * 10.0 * t).sin();
            let beta = 0.6 * (2.0 * PI * 21.0 * t).sin();
            let noise = (i as f64 * 0.123).sin() * 0.1;
            (alpha + beta + noise) * 50.0 // Scale to ~50 µV
        })
        .collect()
}

fn bench_bandpass_cleaner(c: &mut Criterion) {
    let mut group = c.benchmark_group("bandpass_cleaner");

    for size in [256, 512, 1024, 2048].iter() {
        let samples = generate_eeg_samples(*size, 250.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            let mut cleaner = BandpassCleaner::with_default_passband(250.0);
            b.iter(|| black_box(cleaner.clean(black_box(&samples))));
        });
    }

    group.finish();
}

fn bench_mean_band_powers(c: &mut Criterion) {
    let mut group = c.benchmark_group("mean_band_powers");

    for size in [256, 512, 1024].iter() {
        let samples = generate_eeg_samples(2048, 250.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut analyzer = SpectralAnalyzer::new(size, 250.0);
            b.iter(|| black_box(analyzer.mean_band_powers(black_box(&samples))));
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let classifier = ConcentrationClassifier::default();

    c.bench_function("classify", |b| {
        b.iter(|| black_box(classifier.classify(black_box(1.7), black_box(6.2))));
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let samples = generate_eeg_samples(1024, 250.0);
    let mut pipeline = ConcentrationPipeline::from_config(&ClassifierConfig::default())
        .expect("default config is valid");

    c.bench_function("process_window_1024", |b| {
        b.iter(|| black_box(pipeline.process_window(black_box(&samples))));
    });
}

criterion_group!(
    benches,
    bench_bandpass_cleaner,
    bench_mean_band_powers,
    bench_classify,
    bench_pipeline,
);

criterion_main!(benches);
