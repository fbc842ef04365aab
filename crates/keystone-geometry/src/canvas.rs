// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Full-extent canvas — grows the output so no transformed source pixel is
// clipped.

use keystone_core::error::{KeystoneError, Result};
use keystone_core::{CanvasSize, Homography, ImageSize, Point2D, Translation};
use tracing::{debug, info, instrument, warn};

/// Homography and canvas that keep the whole source image visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandedCanvas {
    /// The input homography with the translation folded in.
    pub homography: Homography,
    pub canvas: CanvasSize,
    /// Offset added to every output coordinate.
    pub translation: Translation,
}

/// Expand the output canvas to the bounding box of the transformed image.
///
/// The source image's corners `(0,0)`, `(w,0)`, `(w,h)`, `(0,h)` are mapped
/// through `h`. Their bounding box (floored/ceiled to whole pixels) gives the
/// canvas size, and a shift of `(-xmin, -ymin)` is folded into the homography
/// so the box starts at the origin. The shift is negative when the marked
/// region lies beyond the photo's top-left edges.
///
/// Fails with `UnboundedCanvas` when the line at infinity crosses the image
/// (some corner has no finite image), and with `CanvasTooLarge` when either
/// side exceeds `max_side`.
#[instrument(skip(h))]
pub fn expand_canvas(h: &Homography, image: ImageSize, max_side: u32) -> Result<ExpandedCanvas> {
    if image.width == 0 || image.height == 0 {
        return Err(KeystoneError::NonPositiveDimension {
            width: f64::from(image.width),
            height: f64::from(image.height),
        });
    }

    let (w, h_px) = (f64::from(image.width), f64::from(image.height));
    let corners = [
        Point2D::new(0.0, 0.0),
        Point2D::new(w, 0.0),
        Point2D::new(w, h_px),
        Point2D::new(0.0, h_px),
    ];

    // `w` is affine over the image, so one sign at all four corners means
    // the whole image stays on one side of the line at infinity.
    let weights = corners.map(|p| h.weight(p));
    let same_side = weights.iter().all(|&wt| wt > 0.0) || weights.iter().all(|&wt| wt < 0.0);
    if !same_side {
        warn!(?weights, "Image straddles the line at infinity");
        return Err(KeystoneError::UnboundedCanvas(
            "the horizon of the corrected plane crosses the image".into(),
        ));
    }

    let mut mapped = [Point2D::default(); 4];
    for (slot, corner) in mapped.iter_mut().zip(corners) {
        *slot = h.project(corner).ok_or_else(|| {
            KeystoneError::UnboundedCanvas(format!(
                "image corner ({}, {}) maps to infinity",
                corner.x, corner.y
            ))
        })?;
    }
    debug!(?mapped, "Image corners transformed");

    let xmin = mapped.iter().map(|p| p.x).fold(f64::INFINITY, f64::min).floor();
    let xmax = mapped.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max).ceil();
    let ymin = mapped.iter().map(|p| p.y).fold(f64::INFINITY, f64::min).floor();
    let ymax = mapped.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max).ceil();

    let width = xmax - xmin;
    let height = ymax - ymin;
    if !width.is_finite() || !height.is_finite() {
        return Err(KeystoneError::UnboundedCanvas(
            "transformed extent is not finite".into(),
        ));
    }
    if width > f64::from(max_side) || height > f64::from(max_side) {
        warn!(width, height, max_side, "Expanded canvas exceeds side limit");
        return Err(KeystoneError::CanvasTooLarge {
            width: width as u64,
            height: height as u64,
            limit: max_side,
        });
    }
    if width <= 0.0 || height <= 0.0 {
        return Err(KeystoneError::NonPositiveDimension { width, height });
    }

    // Both bounds are whole numbers here.
    let translation = Translation {
        tx: -xmin as i64,
        ty: -ymin as i64,
    };
    let homography = h.translated(translation.tx as f64, translation.ty as f64);
    let canvas = CanvasSize {
        width: width as u32,
        height: height as u32,
    };

    info!(
        width = canvas.width,
        height = canvas.height,
        tx = translation.tx,
        ty = translation.ty,
        "Full-extent canvas computed"
    );

    Ok(ExpandedCanvas {
        homography,
        canvas,
        translation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::estimate_dimensions;
    use crate::fixtures::QUAD_CASES;
    use crate::order::order_points;
    use crate::solve::solve_to_rect;
    use keystone_core::{OrderingMode, Quadrilateral};

    const LIMIT: u32 = 32_768;

    fn scenario() -> (Quadrilateral, Homography) {
        let points =
            [[50.0, 50.0], [200.0, 100.0], [220.0, 300.0], [30.0, 250.0]].map(Point2D::from);
        let quad = order_points(&points, OrderingMode::Reference).expect("ordered");
        let dims = estimate_dimensions(&quad).expect("dimensions");
        let h = solve_to_rect(&quad, dims).expect("solved");
        (quad, h)
    }

    fn image_corners(image: ImageSize) -> [Point2D; 4] {
        let (w, h) = (f64::from(image.width), f64::from(image.height));
        [
            Point2D::new(0.0, 0.0),
            Point2D::new(w, 0.0),
            Point2D::new(w, h),
            Point2D::new(0.0, h),
        ]
    }

    fn mapped_extent(h: &Homography, image: ImageSize) -> (f64, f64, f64, f64) {
        let mapped: Vec<Point2D> = image_corners(image)
            .iter()
            .map(|&p| h.project(p).expect("finite"))
            .collect();
        (
            mapped.iter().map(|p| p.x).fold(f64::INFINITY, f64::min),
            mapped.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max),
            mapped.iter().map(|p| p.y).fold(f64::INFINITY, f64::min),
            mapped.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max),
        )
    }

    /// The transformed image fills the canvas, starting at the origin, with
    /// at most one pixel of rounding slack per side.
    fn assert_tight_fit(expanded: &ExpandedCanvas, image: ImageSize, label: &str) {
        let eps = 1e-6;
        let (xmin, xmax, ymin, ymax) = mapped_extent(&expanded.homography, image);
        let (w, h) = (
            f64::from(expanded.canvas.width),
            f64::from(expanded.canvas.height),
        );
        assert!(xmin >= -eps && ymin >= -eps, "{label}: negative coordinate");
        assert!(xmax <= w + eps && ymax <= h + eps, "{label}: clipped at far edge");
        assert!(xmin < 1.0 + eps && ymin < 1.0 + eps, "{label}: slack at origin");
        assert!(
            w - (xmax - xmin) <= 2.0 + eps && h - (ymax - ymin) <= 2.0 + eps,
            "{label}: canvas larger than its bounding box"
        );
    }

    #[test]
    fn bounding_box_matches_canvas_for_every_quad() {
        for case in QUAD_CASES {
            let h = solve_to_rect(&case.quad(), case.dimensions()).expect(case.name);
            let expanded = expand_canvas(&h, case.image, LIMIT).expect(case.name);
            assert_tight_fit(&expanded, case.image, case.name);
        }
    }

    /// Corners marked beyond the photo's top-left edges put the whole
    /// transformed image at positive coordinates; the shift pulls it back to
    /// the origin rather than clipping its far side.
    #[test]
    fn region_beyond_image_shifts_back_to_origin() {
        let quad = Quadrilateral::from_ordered(
            [[-300.0, -300.0], [-100.0, -300.0], [-100.0, -100.0], [-300.0, -100.0]]
                .map(Point2D::from),
        );
        let h = solve_to_rect(&quad, estimate_dimensions(&quad).expect("dims")).expect("solved");
        let image = ImageSize::new(100, 100);
        let expanded = expand_canvas(&h, image, LIMIT).expect("expanded");

        assert!(expanded.translation.tx < 0 && expanded.translation.ty < 0);
        assert!(expanded.canvas.width <= 101 && expanded.canvas.height <= 101);
        assert_tight_fit(&expanded, image, "beyond image");
    }

    /// The quad sits inside the image, so its TL corner (mapped to the origin)
    /// forces a positive shift on both axes.
    #[test]
    fn translation_moves_quad_origin() {
        let (quad, h) = scenario();
        let expanded = expand_canvas(&h, ImageSize::new(320, 400), LIMIT).expect("expanded");
        assert!(expanded.translation.tx > 0);
        assert!(expanded.translation.ty > 0);

        let tl = expanded.homography.project(quad.top_left).expect("finite");
        assert!((tl.x - expanded.translation.tx as f64).abs() < 1e-6);
        assert!((tl.y - expanded.translation.ty as f64).abs() < 1e-6);
    }

    #[test]
    fn identity_keeps_image_size() {
        let expanded =
            expand_canvas(&Homography::identity(), ImageSize::new(640, 480), LIMIT).expect("ok");
        assert_eq!(expanded.canvas, CanvasSize { width: 640, height: 480 });
        assert_eq!(expanded.translation, Translation::default());
        assert_eq!(expanded.homography, Homography::identity());
    }

    #[test]
    fn horizon_through_image_is_unbounded() {
        // w = 1 - x/100 changes sign at x = 100.
        let h = Homography::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-0.01, 0.0, 1.0]]);
        assert!(matches!(
            expand_canvas(&h, ImageSize::new(200, 100), LIMIT),
            Err(KeystoneError::UnboundedCanvas(_))
        ));
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let h = Homography::from_rows([[50.0, 0.0, 0.0], [0.0, 50.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(matches!(
            expand_canvas(&h, ImageSize::new(1000, 1000), LIMIT),
            Err(KeystoneError::CanvasTooLarge { limit: LIMIT, .. })
        ));
    }

    #[test]
    fn empty_image_is_non_positive() {
        assert!(matches!(
            expand_canvas(&Homography::identity(), ImageSize::new(0, 10), LIMIT),
            Err(KeystoneError::NonPositiveDimension { .. })
        ));
    }
}
