// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// keystone-geometry — The geometric core of four-point perspective
// rectification.
//
// Orders the user's corner points, estimates the corrected rectangle's size,
// solves the 4-point homography, and frames the result for one of three
// output policies (crop, full extent, size preserving). Everything here is a
// pure function of its inputs.

pub mod canvas;
pub mod dimensions;
pub mod fit;
pub mod order;
pub mod pipeline;
pub mod solve;

#[cfg(test)]
mod fixtures;

pub use canvas::{ExpandedCanvas, expand_canvas};
pub use dimensions::{destination_rect, estimate_dimensions};
pub use fit::{FittedCanvas, fit_within};
pub use order::order_points;
pub use pipeline::{Rectification, RectifyRequest, rectify, rectify_batch};
pub use solve::{solve_homography, solve_to_rect};
