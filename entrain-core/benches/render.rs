//! Block-render throughput for the stereo beat generator.
//!
//! The realtime budget at 48 kHz with 480-frame blocks is 10 ms per call;
//! this should come in orders of magnitude under that on any host CPU.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use entrain_core::beat::StereoBeat;
use entrain_core::params::BeatParams;

fn bench_render(c: &mut Criterion) {
    let params = BeatParams::default();

    c.bench_function("render_480_frames", |b| {
        let mut gen = StereoBeat::new(48_000.0);
        let mut left = [0.0f32; 480];
        let mut right = [0.0f32; 480];
        b.iter(|| {
            gen.render(black_box(&params), &mut left, &mut right);
            black_box(left[0]) + black_box(right[0])
        });
    });

    c.bench_function("render_4096_frames", |b| {
        let mut gen = StereoBeat::new(48_000.0);
        let mut left = vec![0.0f32; 4096];
        let mut right = vec![0.0f32; 4096];
        b.iter(|| {
            gen.render(black_box(&params), &mut left, &mut right);
            black_box(left[0]) + black_box(right[0])
        });
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
