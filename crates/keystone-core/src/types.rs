// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Keystone: points, quadrilaterals, homographies, and
// the canvas/scale parameters produced by the output policies.

use nalgebra::{Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Homogeneous `w` below this magnitude is treated as a point at infinity.
pub const HOMOGENEOUS_EPS: f64 = 1e-12;

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// The four roles a quadrilateral corner can take, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All roles in canonical (TL, TR, BR, BL) order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
}

/// A quadrilateral whose corners have been assigned their canonical roles.
///
/// Only the point orderer produces these from raw input, so every consumer can
/// rely on `corners()` returning (TL, TR, BR, BL).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub top_left: Point2D,
    pub top_right: Point2D,
    pub bottom_right: Point2D,
    pub bottom_left: Point2D,
}

impl Quadrilateral {
    /// Build from corners already listed as (TL, TR, BR, BL).
    pub fn from_ordered(corners: [Point2D; 4]) -> Self {
        let [top_left, top_right, bottom_right, bottom_left] = corners;
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Corners in canonical (TL, TR, BR, BL) order.
    pub fn corners(&self) -> [Point2D; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

/// A 3x3 projective transform mapping source pixels to output pixels.
///
/// Solved transforms keep the bottom-right entry at 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Homography {
    pub m: Matrix3<f64>,
}

impl Homography {
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    /// Build from row-major entries.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [r0, r1, r2] = rows;
        Self {
            m: Matrix3::new(
                r0[0], r0[1], r0[2], r1[0], r1[1], r1[2], r2[0], r2[1], r2[2],
            ),
        }
    }

    /// Map a point through the transform.
    ///
    /// Returns `None` when the point lands on the line at infinity.
    pub fn project(&self, p: Point2D) -> Option<Point2D> {
        let v = self.m * Vector3::new(p.x, p.y, 1.0);
        if !v.z.is_finite() || v.z.abs() <= HOMOGENEOUS_EPS {
            return None;
        }
        Some(Point2D::new(v.x / v.z, v.y / v.z))
    }

    /// Homogeneous `w` of `p` under this transform, before division.
    pub fn weight(&self, p: Point2D) -> f64 {
        (self.m * Vector3::new(p.x, p.y, 1.0)).z
    }

    /// The inverse transform, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Homography> {
        self.m.try_inverse().map(|m| Homography { m })
    }

    /// Compose a translation of the output plane after this transform,
    /// `T(tx, ty) * H`.
    ///
    /// The perspective row is untouched, so a normalised transform stays
    /// normalised and every projected point moves by the same offset.
    pub fn translated(&self, tx: f64, ty: f64) -> Homography {
        Homography {
            m: Matrix3::new_translation(&Vector2::new(tx, ty)) * self.m,
        }
    }

    /// Row-major `f32` entries, the layout raster warpers expect.
    pub fn to_row_major_f32(&self) -> [f32; 9] {
        let mut out = [0.0f32; 9];
        // Column-major iteration over the transpose walks the rows.
        for (dst, src) in out.iter_mut().zip(self.m.transpose().iter()) {
            *dst = *src as f32;
        }
        out
    }
}

/// Pixel dimensions of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Pixel dimensions of the corrected output raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl From<ImageSize> for CanvasSize {
    fn from(size: ImageSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

/// Natural width/height of the corrected rectangle, estimated from the
/// quadrilateral's edge lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectDimensions {
    pub width: u32,
    pub height: u32,
}

/// Output-plane shift folded into the homography by the full-extent policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Translation {
    pub tx: i64,
    pub ty: i64,
}

/// Uniform scale and centering offset applied by the size-preserving policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleCenter {
    pub scale: f64,
    pub offset: Point2D,
}

/// How the corrected content is framed in the output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarpPolicy {
    /// Crop tightly to the corrected rectangle.
    #[default]
    Crop,
    /// Keep every transformed source pixel, growing the canvas as needed.
    FullExtent,
    /// Keep the source canvas size, scaling and centering the content.
    PreserveSize,
}

/// How corner roles are resolved when the sum and difference criteria
/// disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingMode {
    /// Both criteria run over all four points; a point claiming two roles is
    /// rejected with `AmbiguousOrdering`.
    #[default]
    Reference,
    /// TR/BL are chosen only among the two points TL/BR left unclaimed.
    Exclusive,
}

/// Resampling method requested from the raster warper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationKind {
    Nearest,
    #[default]
    Bilinear,
    Bicubic,
}
