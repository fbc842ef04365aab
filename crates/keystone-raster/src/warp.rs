// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Projective warp — resamples a source image onto the rectified canvas using
// `imageproc::geometric_transformations::warp_into`.

use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use keystone_core::error::{KeystoneError, Result};
use keystone_core::{Homography, InterpolationKind, WarpSettings};
use keystone_geometry::Rectification;
use tracing::{debug, info, instrument};

/// Warp `image` onto the canvas described by `rectification`.
///
/// Output pixels with no source pixel take `settings.fill`. 8-bit grayscale
/// input stays grayscale and uses the fill's first channel; every other
/// colour type is warped as RGBA8.
#[instrument(skip_all, fields(
    src_w = image.width(),
    src_h = image.height(),
    out_w = rectification.canvas.width,
    out_h = rectification.canvas.height
))]
pub fn warp_image(
    image: &DynamicImage,
    rectification: &Rectification,
    settings: &WarpSettings,
) -> Result<DynamicImage> {
    let projection = to_projection(&rectification.homography)?;
    let interpolation = to_interpolation(settings.interpolation);
    let (out_w, out_h) = (rectification.canvas.width, rectification.canvas.height);

    let output = match image {
        DynamicImage::ImageLuma8(gray) => {
            debug!("Warping grayscale image");
            let mut out = GrayImage::new(out_w, out_h);
            warp_into(
                gray,
                &projection,
                interpolation,
                Luma([settings.fill[0]]),
                &mut out,
            );
            DynamicImage::ImageLuma8(out)
        }
        other => {
            let rgba = other.to_rgba8();
            let mut out = RgbaImage::new(out_w, out_h);
            warp_into(
                &rgba,
                &projection,
                interpolation,
                Rgba(settings.fill),
                &mut out,
            );
            DynamicImage::ImageRgba8(out)
        }
    };

    info!(out_w, out_h, interpolation = ?settings.interpolation, "Warp applied");
    Ok(output)
}

/// `warp_into` samples through the inverse, so a singular transform is
/// rejected before the `f32` projection is built.
fn to_projection(h: &Homography) -> Result<Projection> {
    if h.inverse().is_none() {
        return Err(KeystoneError::ImageError("homography is singular".into()));
    }
    Projection::from_matrix(h.to_row_major_f32()).ok_or_else(|| {
        KeystoneError::ImageError("homography is not invertible in single precision".into())
    })
}

fn to_interpolation(kind: InterpolationKind) -> Interpolation {
    match kind {
        InterpolationKind::Nearest => Interpolation::Nearest,
        InterpolationKind::Bilinear => Interpolation::Bilinear,
        InterpolationKind::Bicubic => Interpolation::Bicubic,
    }
}
