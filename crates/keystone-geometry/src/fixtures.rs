// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared convex quadrilaterals for tests that must hold for any page shape.

use keystone_core::{ImageSize, Point2D, Quadrilateral, RectDimensions};

use crate::dimensions::estimate_dimensions;

/// A marked page and the photo it was marked on. Corners are (TL, TR, BR, BL).
pub(crate) struct QuadCase {
    pub name: &'static str,
    pub corners: [[f64; 2]; 4],
    pub image: ImageSize,
}

impl QuadCase {
    pub fn quad(&self) -> Quadrilateral {
        Quadrilateral::from_ordered(self.corners.map(Point2D::from))
    }

    pub fn points(&self) -> Vec<Point2D> {
        self.corners.iter().map(|&p| Point2D::from(p)).collect()
    }

    pub fn dimensions(&self) -> RectDimensions {
        estimate_dimensions(&self.quad()).expect(self.name)
    }
}

pub(crate) const QUAD_CASES: &[QuadCase] = &[
    QuadCase {
        name: "skewed document",
        corners: [[50.0, 50.0], [200.0, 100.0], [220.0, 300.0], [30.0, 250.0]],
        image: ImageSize::new(320, 400),
    },
    // 200x120 rectangle centred on (250, 250), turned 30 degrees clockwise.
    QuadCase {
        name: "rotated 30 degrees",
        corners: [[193.4, 148.04], [366.6, 248.04], [306.6, 351.96], [133.4, 251.96]],
        image: ImageSize::new(500, 500),
    },
    QuadCase {
        name: "strong trapezoid",
        corners: [[150.0, 40.0], [250.0, 40.0], [390.0, 300.0], [10.0, 300.0]],
        image: ImageSize::new(400, 340),
    },
    QuadCase {
        name: "very wide strip",
        corners: [[20.0, 100.0], [980.0, 120.0], [975.0, 180.0], [25.0, 170.0]],
        image: ImageSize::new(1000, 300),
    },
    QuadCase {
        name: "touching image border",
        corners: [[0.0, 0.0], [299.0, 10.0], [320.0, 240.0], [5.0, 240.0]],
        image: ImageSize::new(320, 240),
    },
];
