//! Performance benchmarks for the transcription pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pitchscribe::{analyze_segment, AnalysisConfig};

fn bench_analyze_segment(c: &mut Criterion) {
    // 5 seconds of A4 at 44.1kHz
    let samples: Vec<f32> = (0..44100 * 5)
        .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 44100.0).sin() * 0.5)
        .collect();

    c.bench_function("analyze_segment_5s", |b| {
        b.iter(|| {
            let _ = analyze_segment(
                black_box(&samples),
                black_box(44100),
                black_box(0.0),
                AnalysisConfig::default(),
            );
        });
    });
}

criterion_group!(benches, bench_analyze_segment);
criterion_main!(benches);
