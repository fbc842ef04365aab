// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering — assigns the TL/TR/BR/BL roles to four unordered points.

use keystone_core::error::{KeystoneError, Result};
use keystone_core::{Corner, OrderingMode, Point2D, Quadrilateral};
use tracing::{debug, instrument, warn};

/// Assign canonical corner roles to four points given in any order.
///
/// The top-left corner has the smallest `x + y` and the bottom-right the
/// largest. The top-right corner has the smallest `y - x` and the bottom-left
/// the largest. Ties resolve to the earliest point in `points`.
///
/// In [`OrderingMode::Reference`] the difference criterion considers all four
/// points, so a strongly rotated quadrilateral can hand one point two roles.
/// That is reported as [`KeystoneError::AmbiguousOrdering`]. Coincident input
/// points are not checked here; they surface later as a dimension or solver
/// failure.
///
/// In [`OrderingMode::Exclusive`] the difference criterion only chooses
/// between the two points left after TL and BR are taken.
#[instrument(skip(points), fields(count = points.len()))]
pub fn order_points(points: &[Point2D], mode: OrderingMode) -> Result<Quadrilateral> {
    let pts: [Point2D; 4] = points
        .try_into()
        .map_err(|_| KeystoneError::InvalidPointCount { got: points.len() })?;

    if let Some(bad) = pts.iter().position(|p| !p.is_finite()) {
        return Err(KeystoneError::DegenerateQuadrilateral(format!(
            "point {bad} has a non-finite coordinate"
        )));
    }

    let sums = pts.map(|p| p.x + p.y);
    let diffs = pts.map(|p| p.y - p.x);

    let tl = arg_min(&sums, &[0, 1, 2, 3]);
    let br = arg_max(&sums, &[0, 1, 2, 3]);

    let (tr, br, bl) = match mode {
        OrderingMode::Reference => {
            let tr = arg_min(&diffs, &[0, 1, 2, 3]);
            let bl = arg_max(&diffs, &[0, 1, 2, 3]);
            if all_distinct(&pts) {
                check_unique_roles([tl, tr, br, bl])?;
            }
            (tr, br, bl)
        }
        OrderingMode::Exclusive => {
            // Equal sums everywhere would leave TL and BR on the same point;
            // move BR so the remaining pair is always two points.
            let br = if br == tl { first_other(tl) } else { br };
            let rest: Vec<usize> = (0..4).filter(|&i| i != tl && i != br).collect();
            let tr = arg_min(&diffs, &rest);
            let bl = rest.iter().copied().find(|&i| i != tr).unwrap_or(tr);
            (tr, br, bl)
        }
    };

    Ok(assemble(&pts, tl, tr, br, bl))
}

fn assemble(pts: &[Point2D; 4], tl: usize, tr: usize, br: usize, bl: usize) -> Quadrilateral {
    let quad = Quadrilateral::from_ordered([pts[tl], pts[tr], pts[br], pts[bl]]);
    debug!(
        top_left = ?quad.top_left,
        top_right = ?quad.top_right,
        bottom_right = ?quad.bottom_right,
        bottom_left = ?quad.bottom_left,
        "Corners ordered"
    );
    quad
}

/// Reject an assignment where one input point holds two roles.
fn check_unique_roles(indices: [usize; 4]) -> Result<()> {
    for a in 0..4 {
        for b in (a + 1)..4 {
            if indices[a] == indices[b] {
                warn!(
                    point = indices[a],
                    first = ?Corner::ALL[a],
                    second = ?Corner::ALL[b],
                    "Point assigned two corner roles"
                );
                return Err(KeystoneError::AmbiguousOrdering {
                    point: indices[a],
                    first: Corner::ALL[a],
                    second: Corner::ALL[b],
                });
            }
        }
    }
    Ok(())
}

fn all_distinct(pts: &[Point2D; 4]) -> bool {
    (0..4).all(|a| ((a + 1)..4).all(|b| pts[a] != pts[b]))
}

fn first_other(taken: usize) -> usize {
    if taken == 0 { 1 } else { 0 }
}

/// Index (from `candidates`) of the smallest value; first wins on ties.
fn arg_min(values: &[f64; 4], candidates: &[usize]) -> usize {
    let mut best = candidates[0];
    for &i in &candidates[1..] {
        if values[i] < values[best] {
            best = i;
        }
    }
    best
}

/// Index (from `candidates`) of the largest value; first wins on ties.
fn arg_max(values: &[f64; 4], candidates: &[usize]) -> usize {
    let mut best = candidates[0];
    for &i in &candidates[1..] {
        if values[i] > values[best] {
            best = i;
        }
    }
    best
}
