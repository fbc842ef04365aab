// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Size-preserving fit — scales and centres the corrected rectangle inside the
// source image's own canvas.

use keystone_core::error::{KeystoneError, Result};
use keystone_core::{
    CanvasSize, Homography, ImageSize, Point2D, Quadrilateral, RectDimensions, ScaleCenter,
};
use tracing::{info, instrument};

use crate::dimensions::destination_rect;
use crate::solve::solve_homography;

/// Homography whose output fits the original canvas unclipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedCanvas {
    pub homography: Homography,
    /// Always the source image size.
    pub canvas: CanvasSize,
    pub scale_center: ScaleCenter,
}

/// Re-solve the homography so the corrected rectangle fits inside `image`.
///
/// The canonical `dims` rectangle is scaled uniformly by
/// `min(w / W, h / H)` and centred, then `quad` is solved onto the adjusted
/// corners. Pixels outside the mapped quadrilateral are left for the raster
/// warper's border fill.
#[instrument(skip(quad))]
pub fn fit_within(
    quad: &Quadrilateral,
    dims: RectDimensions,
    image: ImageSize,
) -> Result<FittedCanvas> {
    if dims.width == 0 || dims.height == 0 || image.width == 0 || image.height == 0 {
        return Err(KeystoneError::NonPositiveDimension {
            width: f64::from(dims.width.min(image.width)),
            height: f64::from(dims.height.min(image.height)),
        });
    }

    let (w, h) = (f64::from(image.width), f64::from(image.height));
    let scale = (w / f64::from(dims.width)).min(h / f64::from(dims.height));
    if !scale.is_finite() || scale <= 0.0 {
        return Err(KeystoneError::NonPositiveDimension {
            width: f64::from(dims.width) * scale,
            height: f64::from(dims.height) * scale,
        });
    }

    let rect = destination_rect(dims);
    let content_w = rect[2].x * scale;
    let content_h = rect[2].y * scale;
    let offset = Point2D::new((w - content_w) / 2.0, (h - content_h) / 2.0);
    let dst = rect.map(|p| Point2D::new(p.x * scale + offset.x, p.y * scale + offset.y));

    let homography = solve_homography(&quad.corners(), &dst)?;

    info!(
        scale,
        offset_x = offset.x,
        offset_y = offset.y,
        width = image.width,
        height = image.height,
        "Content fitted to original canvas"
    );

    Ok(FittedCanvas {
        homography,
        canvas: CanvasSize::from(image),
        scale_center: ScaleCenter { scale, offset },
    })
}
