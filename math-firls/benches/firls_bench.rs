use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use math_audio_firls::{firls, freqz, freqz_naive};

fn lowpass(num_taps: usize) -> Vec<f64> {
    firls(num_taps, &[0.0, 0.2, 0.3, 1.0], &[1.0, 0.0], &[1.0, 0.0], &[1.0, 1.0], 2.0)
        .expect("valid design")
}

fn bench_firls(c: &mut Criterion) {
    let mut group = c.benchmark_group("firls");
    for num_taps in (1..1010).step_by(100) {
        group.bench_with_input(BenchmarkId::from_parameter(num_taps), &num_taps, |b, &n| {
            b.iter(|| lowpass(black_box(n)))
        });
    }
    group.finish();
}

fn bench_freqz(c: &mut Criterion) {
    let taps = lowpass(101);
    let mut group = c.benchmark_group("freqz");
    for num_freqs in [513, 2001, 2049] {
        group.bench_with_input(BenchmarkId::new("fft", num_freqs), &num_freqs, |b, &n| {
            b.iter(|| freqz(black_box(n), &taps, 48000.0))
        });
    }
    group.bench_function("naive/2049", |b| {
        b.iter(|| freqz_naive(black_box(2049), &taps, 48000.0))
    });
    group.finish();
}

criterion_group!(benches, bench_firls, bench_freqz);
criterion_main!(benches);
