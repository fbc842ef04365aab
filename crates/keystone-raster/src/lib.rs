// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// keystone-raster — Applies a rectification to in-memory images.
//
// Hands the homography and canvas computed by keystone-geometry to imageproc's
// projective warp, with configurable interpolation and constant border fill.

pub mod rectifier;
pub mod warp;

pub use rectifier::Rectifier;
pub use warp::warp_image;
