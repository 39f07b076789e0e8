//! Benchmarks for copying rendered frames into an RGBA surface.
//!
//! Run with: cargo bench --bench presenter_copy

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mandelbrot_explorer::adapters::pixel_format::copy_framebuffer_to_rgba;
use mandelbrot_explorer::core::data::framebuffer::Framebuffer;

fn bench_copy_framebuffer_to_rgba(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_framebuffer_to_rgba");

    for (width, height) in [(320, 240), (800, 800), (1920, 1080)] {
        let framebuffer = Framebuffer::new(width, height);
        let mut surface = vec![0u8; width as usize * height as usize * 4];

        group.throughput(Throughput::Bytes(surface.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, height)),
            &framebuffer,
            |b, framebuffer| {
                b.iter(|| {
                    copy_framebuffer_to_rgba(black_box(framebuffer), &mut surface).unwrap();
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_copy_framebuffer_to_rgba);
criterion_main!(benches);
