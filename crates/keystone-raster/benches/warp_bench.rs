// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for raster warping in the keystone-raster crate.
// Measures a full corner-to-corrected-image pass on a synthetic page photo.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage, Luma};

use keystone_core::Point2D;
use keystone_raster::Rectifier;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark rectification of a 400x500 synthetic grayscale photo.
///
/// The image is a dark background with a bright page from (50, 60) to
/// (350, 440); the marked corners are nudged inward to simulate a slightly
/// skewed hand placement.
fn bench_rectify_page(c: &mut Criterion) {
    let (width, height) = (400u32, 500u32);
    let mut img = GrayImage::from_pixel(width, height, Luma([30u8]));
    for y in 60..440 {
        for x in 50..350 {
            img.put_pixel(x, y, Luma([240u8]));
        }
    }
    let dynamic = DynamicImage::ImageLuma8(img);
    let corners = [
        Point2D::new(52.0, 64.0),
        Point2D::new(346.0, 61.0),
        Point2D::new(349.0, 437.0),
        Point2D::new(55.0, 432.0),
    ];

    c.bench_function("rectify_page crop (400x500)", |b| {
        b.iter(|| {
            let rectifier = Rectifier::from_dynamic(black_box(dynamic.clone()));
            let result = rectifier.rectify(black_box(&corners));
            black_box(result.map(|(r, _)| r.into_dynamic()).ok());
        });
    });
}

criterion_group!(benches, bench_rectify_page);
criterion_main!(benches);
