#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmarks for the rasterizers and polygon fill.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_raster::prelude::*;
use trueno_raster::render::{draw_axes, plot_points};

fn circle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle");

    for radius in [10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::new("bresenham", radius), &radius, |b, &r| {
            b.iter(|| bresenham_circle(black_box(IntPoint::new(0, 0)), black_box(r)).expect("valid radius"));
        });
        group.bench_with_input(BenchmarkId::new("midpoint_ellipse", radius), &radius, |b, &r| {
            b.iter(|| midpoint_ellipse(black_box(IntPoint::new(0, 0)), black_box(r), black_box(r / 2 + 1)).expect("valid axes"));
        });
    }

    group.finish();
}

fn line_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("line");
    let p0 = IntPoint::new(0, 0);
    let p1 = IntPoint::new(1_000, 370);

    for algorithm in LineAlgorithm::ALL {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| algorithm.rasterize(black_box(p0), black_box(p1), 1.5).expect("valid segment"));
        });
    }

    group.finish();
}

fn polygon_fill_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("polygon_fill");

    for sides in [6, 64, 512] {
        let vertices: Vec<Point> = (0..sides)
            .map(|i| {
                let t = std::f32::consts::TAU * i as f32 / sides as f32;
                // Star-shaped so the scanlines see many crossings.
                let r = if i % 2 == 0 { 200.0 } else { 120.0 };
                Point::new(r * t.cos(), r * t.sin())
            })
            .collect();
        let polygon = Polygon::new(vertices).expect("valid polygon");

        group.bench_with_input(BenchmarkId::from_parameter(sides), &polygon, |b, polygon| {
            b.iter(|| black_box(polygon).fill_spans());
        });
    }

    group.finish();
}

fn plot_benchmark(c: &mut Criterion) {
    let pixels = bresenham_circle(IntPoint::new(0, 0), 200).expect("valid radius");
    let bounds = Rect::new(-210.0, -210.0, 420.0, 420.0);

    c.bench_function("plot_circle_800x800", |b| {
        let viewport = Viewport::new(bounds, 800, 800).expect("valid viewport");
        let mut fb = Framebuffer::new(800, 800).expect("framebuffer creation should succeed");
        b.iter(|| {
            fb.clear(Rgba::WHITE);
            draw_axes(&mut fb, &viewport, 50.0, Rgba::gray(160));
            plot_points(&mut fb, &viewport, black_box(&pixels), 2.0, Rgba::BLACK);
        });
    });
}

criterion_group!(benches, circle_benchmark, line_benchmark, polygon_fill_benchmark, plot_benchmark);
criterion_main!(benches);
