//! Benchmarks for the two smoothers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use terrasmooth_algorithms::smoothing::{gaussian_smoothing, perona_malik, DiffusionParams, GaussianParams};
use terrasmooth_core::{GeoTransform, Raster};

fn create_dem(size: usize) -> Raster<f64> {
    let mut dem = Raster::new(size, size);
    dem.set_transform(GeoTransform::new(0.0, size as f64, 1.0, -1.0));

    for row in 0..size {
        for col in 0..size {
            let base = (row + col) as f64;
            let variation = ((row * 7 + col * 13) % 100) as f64 / 10.0;
            dem.set(row, col, base + variation).unwrap();
        }
    }
    dem
}

fn bench_gaussian(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaussian_smoothing");

    for size in [256, 512, 1024].iter() {
        let dem = create_dem(*size);
        let params = GaussianParams::default();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| gaussian_smoothing(black_box(&dem), &params).unwrap())
        });
    }

    group.finish();
}

fn bench_perona_malik(c: &mut Criterion) {
    let mut group = c.benchmark_group("perona_malik");
    group.sample_size(20);

    for size in [256, 512, 1024].iter() {
        let dem = create_dem(*size);
        let params = DiffusionParams::default();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| perona_malik(black_box(&dem), &params).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gaussian, bench_perona_malik);
criterion_main!(benches);
