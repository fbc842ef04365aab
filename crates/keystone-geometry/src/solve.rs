// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Closed-form 4-point homography solve.

use keystone_core::error::{KeystoneError, Result};
use keystone_core::{Homography, Point2D, Quadrilateral, RectDimensions};
use nalgebra::{Matrix3, SMatrix, SVector};
use tracing::{debug, instrument, warn};

use crate::dimensions::destination_rect;

/// Relative tolerance for the collinearity check.
const SINGULAR_EPS: f64 = 1e-10;

/// Solve the homography mapping each `src[i]` exactly onto `dst[i]`.
///
/// Four correspondences with `h22 = 1` give eight linear equations in eight
/// unknowns:
///
/// ```text
/// [ x  y  1  0  0  0  -u*x  -u*y ] h = u
/// [ 0  0  0  x  y  1  -v*x  -v*y ] h = v
/// ```
///
/// solved by LU decomposition with partial pivoting. Fails with
/// `DegenerateQuadrilateral` if three points on either side are collinear or
/// coincident.
pub fn solve_homography(src: &[Point2D; 4], dst: &[Point2D; 4]) -> Result<Homography> {
    check_general_position(src, "source")?;
    check_general_position(dst, "destination")?;

    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for i in 0..4 {
        let (x, y) = (src[i].x, src[i].y);
        let (u, v) = (dst[i].x, dst[i].y);
        let (r0, r1) = (2 * i, 2 * i + 1);

        a[(r0, 0)] = x;
        a[(r0, 1)] = y;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -u * x;
        a[(r0, 7)] = -u * y;
        b[r0] = u;

        a[(r1, 3)] = x;
        a[(r1, 4)] = y;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -v * x;
        a[(r1, 7)] = -v * y;
        b[r1] = v;
    }

    let Some(h) = a.lu().solve(&b) else {
        warn!("Homography system is singular");
        return Err(KeystoneError::DegenerateQuadrilateral(
            "correspondence system is singular".into(),
        ));
    };
    if h.iter().any(|v| !v.is_finite()) {
        return Err(KeystoneError::DegenerateQuadrilateral(
            "homography has non-finite entries".into(),
        ));
    }

    Ok(Homography {
        m: Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0),
    })
}

/// Solve the homography taking `quad` onto the canonical `W x H` rectangle.
#[instrument(skip(quad))]
pub fn solve_to_rect(quad: &Quadrilateral, dims: RectDimensions) -> Result<Homography> {
    let h = solve_homography(&quad.corners(), &destination_rect(dims))?;
    debug!(matrix = ?h.to_row_major_f32(), "Homography solved");
    Ok(h)
}

/// Reject point sets where any three points are (nearly) collinear.
fn check_general_position(pts: &[Point2D; 4], side: &str) -> Result<()> {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

    for [i, j, k] in TRIPLES {
        let (a, b, c) = (pts[i], pts[j], pts[k]);
        let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
        let span = a
            .distance(&b)
            .max(a.distance(&c))
            .max(b.distance(&c));
        if !cross.is_finite() || cross.abs() <= SINGULAR_EPS * span * span {
            return Err(KeystoneError::DegenerateQuadrilateral(format!(
                "{side} points {i}, {j}, {k} are collinear or coincident"
            )));
        }
    }
    Ok(())
}
