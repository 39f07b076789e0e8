//! Benchmarks for the render passes over the initial view.
//!
//! Run with: cargo bench --bench render_pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mandelbrot_explorer::core::actions::render_frame::render_preview::render_preview;
use mandelbrot_explorer::core::actions::render_frame::render_slices::{
    render_full_parallel, render_full_serial,
};
use mandelbrot_explorer::core::data::framebuffer::Framebuffer;
use mandelbrot_explorer::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use mandelbrot_explorer::core::fractals::mandelbrot::colour_maps::hsb_rainbow::MandelbrotHsbRainbow;
use mandelbrot_explorer::{
    FrameSink, MandelbrotConfig, RenderEvent, RenderRequest, RenderScheduler, RenderSubmission,
};
use std::sync::Arc;
use std::time::Duration;

struct DiscardingFrameSink;

impl FrameSink for DiscardingFrameSink {
    fn present(&self, event: RenderEvent) {
        black_box(event);
    }
}

fn initial_algorithm(config: &MandelbrotConfig) -> MandelbrotAlgorithm {
    let viewport = config.initial_viewport().unwrap();
    let max_iterations = config.iteration_budget.max_iterations(&viewport);

    MandelbrotAlgorithm::new(viewport, max_iterations).unwrap()
}

fn bench_full_pass(c: &mut Criterion) {
    let config = MandelbrotConfig::default().with_canvas(400, 400);
    let algorithm = initial_algorithm(&config);
    let mut group = c.benchmark_group("full_pass");
    group.throughput(Throughput::Elements(400 * 400));
    group.sample_size(20);

    group.bench_function("serial", |b| {
        b.iter(|| {
            let mut framebuffer = Framebuffer::new(400, 400);
            render_full_serial(&mut framebuffer, &algorithm, &MandelbrotHsbRainbow).unwrap();
            black_box(framebuffer)
        })
    });

    for slices in [2, 4, 8, 16, 64] {
        group.bench_with_input(BenchmarkId::new("parallel", slices), &slices, |b, &slices| {
            b.iter(|| {
                let mut framebuffer = Framebuffer::new(400, 400);
                render_full_parallel(&mut framebuffer, &algorithm, &MandelbrotHsbRainbow, slices)
                    .unwrap();
                black_box(framebuffer)
            })
        });
    }

    group.finish();
}

fn bench_preview_pass(c: &mut Criterion) {
    let config = MandelbrotConfig::default();
    let algorithm = initial_algorithm(&config);
    let mut group = c.benchmark_group("preview_pass");
    group.throughput(Throughput::Elements(800 * 800));

    for stride in [2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(stride), &stride, |b, &stride| {
            b.iter(|| {
                let mut framebuffer = Framebuffer::new(800, 800);
                render_preview(&mut framebuffer, &algorithm, &MandelbrotHsbRainbow, stride)
                    .unwrap();
                black_box(framebuffer)
            })
        });
    }

    group.finish();
}

fn bench_scheduled_render(c: &mut Criterion) {
    let config = MandelbrotConfig::default();
    let viewport = config.initial_viewport().unwrap();
    let scheduler = RenderScheduler::new(
        Arc::new(DiscardingFrameSink),
        Arc::new(MandelbrotHsbRainbow),
        &config,
    )
    .unwrap();

    let mut group = c.benchmark_group("scheduled_render");
    group.sample_size(10);

    for (name, request) in [("full", RenderRequest::FULL), ("progressive", RenderRequest::PROGRESSIVE)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let submission = scheduler.render(viewport, request);
                assert!(matches!(submission, RenderSubmission::Accepted { .. }));
                assert!(scheduler.wait_until_idle(Duration::from_secs(60)));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_full_pass, bench_preview_pass, bench_scheduled_render);
criterion_main!(benches);
