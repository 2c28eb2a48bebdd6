//! Benchmarks for ndimg operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use ndimg_core::{ArrayImg, Identity, Interval, Normalize};
use ndimg_ops::{affine_real, Mode, OutOfBoundsFactory, Projector2D};

fn volume(size: u64, depth: u64) -> ArrayImg<u16> {
    ArrayImg::from_fn(Interval::from_dims(&[size, size, depth]).unwrap(), |p| {
        ((p[0] ^ p[1]) + p[2]) as u16
    })
    .unwrap()
}

/// Sequential vs random-access projection of one plane.
fn bench_projector(c: &mut Criterion) {
    let mut group = c.benchmark_group("projector");

    for size in [64u64, 256, 1024] {
        let vol = volume(size, 4);
        let mut plane = ArrayImg::new(&[size, size], 0.0f32).unwrap();
        group.throughput(Throughput::Elements(size * size));

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, _| {
            b.iter(|| {
                let mut p =
                    Projector2D::new(0, 1, &vol, &mut plane, Normalize::new(0.0, 4096.0)).unwrap();
                p.set_position(2, 2);
                black_box(p.map().unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("random_access", size), &size, |b, _| {
            b.iter(|| {
                let mut p =
                    Projector2D::new(0, 1, &vol, &mut plane, Normalize::new(0.0, 4096.0)).unwrap();
                p.set_position(2, 2);
                p.map_random_access();
            })
        });

        group.bench_with_input(BenchmarkId::new("transposed", size), &size, |b, _| {
            let mut t = ArrayImg::new(&[size, size], 0u16).unwrap();
            b.iter(|| {
                let mut p = Projector2D::new(1, 0, &vol, &mut t, Identity).unwrap();
                p.set_position(2, 2);
                black_box(p.map().unwrap())
            })
        });
    }

    group.finish();
}

/// Rotation of a 2D grid under both interpolation modes.
fn bench_affine(c: &mut Criterion) {
    let mut group = c.benchmark_group("affine");
    let (s, co) = 15f64.to_radians().sin_cos();
    let matrix = [co, -s, 3.5, s, co, -1.25];

    for size in [128u64, 512] {
        let img = ArrayImg::from_fn(Interval::from_dims(&[size, size]).unwrap(), |p| {
            (p[0] * 3 + p[1]) as f32
        })
        .unwrap();
        group.throughput(Throughput::Elements(size * size));

        for (name, mode) in [("linear", Mode::Linear), ("nearest", Mode::NearestNeighbor)] {
            group.bench_with_input(BenchmarkId::new(name, size), &img, |b, img| {
                b.iter(|| {
                    affine_real(img, black_box(&matrix), mode, &OutOfBoundsFactory::Border).unwrap()
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_projector, bench_affine);
criterion_main!(benches);
