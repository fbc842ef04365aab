// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification pipeline — composes ordering, sizing, solving, and canvas
// framing for each output policy.

use keystone_core::error::{KeystoneError, Result};
use keystone_core::{
    CanvasSize, Homography, ImageSize, Point2D, Quadrilateral, RectDimensions, RectifyOptions,
    ScaleCenter, Translation, WarpPolicy,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::canvas::expand_canvas;
use crate::dimensions::estimate_dimensions;
use crate::fit::fit_within;
use crate::order::order_points;
use crate::solve::solve_to_rect;

/// Everything the raster warper needs, plus per-policy diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rectification {
    pub policy: WarpPolicy,
    /// The input points in canonical order.
    pub quad: Quadrilateral,
    /// Natural size of the corrected rectangle.
    pub dimensions: RectDimensions,
    /// Maps source pixel coordinates to output pixel coordinates.
    pub homography: Homography,
    /// Size of the output raster.
    pub canvas: CanvasSize,
    /// Shift folded into the homography (full-extent only).
    pub translation: Option<Translation>,
    /// Scale and centering applied (size-preserving only).
    pub scale_center: Option<ScaleCenter>,
}

/// One independent rectification job.
#[derive(Debug, Clone, PartialEq)]
pub struct RectifyRequest {
    pub points: Vec<Point2D>,
    pub image: ImageSize,
}

/// Compute the homography and output canvas for four corner points.
///
/// ## Pipeline
///
/// 1. Order the points into (TL, TR, BR, BL); anything but four points is
///    rejected before any geometry runs
/// 2. Estimate the corrected rectangle's width and height
/// 3. Solve the homography onto `(0,0)..(W-1,H-1)`
/// 4. Frame the output for the policy:
///    - `Crop`: canvas is `W x H`, bounded by `max_canvas_side`
///    - `FullExtent`: canvas grows to hold the whole transformed image
///    - `PreserveSize`: canvas stays `image`; the rectangle is scaled,
///      centred, and re-solved
///
/// `image` is only consulted by the last two policies.
#[instrument(skip(points), fields(count = points.len()))]
pub fn rectify(
    points: &[Point2D],
    image: ImageSize,
    options: &RectifyOptions,
) -> Result<Rectification> {
    let quad = order_points(points, options.ordering)?;
    let dimensions = estimate_dimensions(&quad)?;
    let homography = solve_to_rect(&quad, dimensions)?;

    let rectification = match options.policy {
        WarpPolicy::Crop => {
            check_side_limit(dimensions, options.max_canvas_side)?;
            Rectification {
                policy: WarpPolicy::Crop,
                quad,
                dimensions,
                homography,
                canvas: CanvasSize {
                    width: dimensions.width,
                    height: dimensions.height,
                },
                translation: None,
                scale_center: None,
            }
        }
        WarpPolicy::FullExtent => {
            let expanded = expand_canvas(&homography, image, options.max_canvas_side)?;
            Rectification {
                policy: WarpPolicy::FullExtent,
                quad,
                dimensions,
                homography: expanded.homography,
                canvas: expanded.canvas,
                translation: Some(expanded.translation),
                scale_center: None,
            }
        }
        WarpPolicy::PreserveSize => {
            let fitted = fit_within(&quad, dimensions, image)?;
            Rectification {
                policy: WarpPolicy::PreserveSize,
                quad,
                dimensions,
                homography: fitted.homography,
                canvas: fitted.canvas,
                translation: None,
                scale_center: Some(fitted.scale_center),
            }
        }
    };

    info!(
        policy = ?rectification.policy,
        width = rectification.canvas.width,
        height = rectification.canvas.height,
        "Rectification computed"
    );
    Ok(rectification)
}

fn check_side_limit(dims: RectDimensions, limit: u32) -> Result<()> {
    if dims.width > limit || dims.height > limit {
        warn!(
            width = dims.width,
            height = dims.height,
            limit,
            "Cropped canvas exceeds side limit"
        );
        return Err(KeystoneError::CanvasTooLarge {
            width: u64::from(dims.width),
            height: u64::from(dims.height),
            limit,
        });
    }
    Ok(())
}

/// Rectify many independent requests with shared options.
///
/// Returns one result per request, in order. A failing request is logged and
/// reported in its slot; the rest still run.
pub fn rectify_batch(
    requests: &[RectifyRequest],
    options: &RectifyOptions,
) -> Vec<Result<Rectification>> {
    requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            let result = rectify(&request.points, request.image, options);
            if let Err(err) = &result {
                warn!(index, error = %err, "Rectification request failed");
            }
            result
        })
        .collect()
}
