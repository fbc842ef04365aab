// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Target rectangle size estimation from the ordered quadrilateral.

use keystone_core::error::{KeystoneError, Result};
use keystone_core::{Point2D, Quadrilateral, RectDimensions};
use tracing::{debug, warn};

/// Estimate the corrected rectangle's width and height.
///
/// Each dimension is the longer of the two opposite edges, truncated toward
/// zero. Fails with `NonPositiveDimension` when either truncates to zero and
/// with `CanvasTooLarge` when either does not fit a pixel count.
pub fn estimate_dimensions(quad: &Quadrilateral) -> Result<RectDimensions> {
    let width_top = quad.top_right.distance(&quad.top_left);
    let width_bottom = quad.bottom_right.distance(&quad.bottom_left);
    let height_left = quad.bottom_left.distance(&quad.top_left);
    let height_right = quad.bottom_right.distance(&quad.top_right);

    let width = width_top.max(width_bottom).trunc();
    let height = height_left.max(height_right).trunc();
    debug!(
        width_top,
        width_bottom,
        height_left,
        height_right,
        width,
        height,
        "Edge lengths measured"
    );

    // `!(x > 0)` also catches NaN.
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        warn!(width, height, "Estimated rectangle has no area");
        return Err(KeystoneError::NonPositiveDimension { width, height });
    }

    if width > f64::from(u32::MAX) || height > f64::from(u32::MAX) {
        warn!(width, height, "Estimated rectangle exceeds pixel range");
        return Err(KeystoneError::CanvasTooLarge {
            width: width as u64,
            height: height as u64,
            limit: u32::MAX,
        });
    }

    Ok(RectDimensions {
        width: width as u32,
        height: height as u32,
    })
}

/// Corners of the axis-aligned destination rectangle, in (TL, TR, BR, BL)
/// order: (0,0), (W-1,0), (W-1,H-1), (0,H-1).
pub fn destination_rect(dims: RectDimensions) -> [Point2D; 4] {
    let right = f64::from(dims.width) - 1.0;
    let bottom = f64::from(dims.height) - 1.0;
    [
        Point2D::new(0.0, 0.0),
        Point2D::new(right, 0.0),
        Point2D::new(right, bottom),
        Point2D::new(0.0, bottom),
    ]
}
