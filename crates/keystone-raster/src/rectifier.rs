// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectifier — straightens a photographed document from four user-marked
// corners.

use image::DynamicImage;
use keystone_core::error::Result;
use keystone_core::{ImageSize, Point2D, RectifyConfig};
use keystone_geometry::{Rectification, rectify};
use tracing::{info, instrument};

use crate::warp::warp_image;

/// Perspective-corrects a single in-memory image.
///
/// Operations consume `self` and return a new `Rectifier` wrapping the
/// transformed image, so corrections chain:
///
/// ```ignore
/// let (corrected, report) = Rectifier::from_dynamic(photo)
///     .with_config(config)
///     .rectify(&corners)?;
/// let page = corrected.into_dynamic();
/// ```
pub struct Rectifier {
    /// The working image.
    image: DynamicImage,
    /// Policy, ordering, and warp settings.
    config: RectifyConfig,
}

impl Rectifier {
    // -- Construction ---------------------------------------------------------

    /// Wrap an already-decoded `DynamicImage` with default settings.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image,
            config: RectifyConfig::default(),
        }
    }

    /// Replace the settings.
    pub fn with_config(self, config: RectifyConfig) -> Self {
        Self { config, ..self }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &RectifyConfig {
        &self.config
    }

    pub fn image_size(&self) -> ImageSize {
        ImageSize::new(self.image.width(), self.image.height())
    }

    /// Borrow the current working image.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the rectifier and return the underlying image.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Correction -----------------------------------------------------------

    /// Compute the rectification for `corners` without touching pixels.
    pub fn plan(&self, corners: &[Point2D]) -> Result<Rectification> {
        rectify(corners, self.image_size(), &self.config.options())
    }

    /// Straighten the region outlined by `corners`.
    ///
    /// On success the returned rectifier holds the corrected image, alongside
    /// the rectification that produced it. On failure the input is dropped
    /// and nothing partial is returned.
    #[instrument(skip(self, corners), fields(policy = ?self.config.policy))]
    pub fn rectify(self, corners: &[Point2D]) -> Result<(Self, Rectification)> {
        let rectification = self.plan(corners)?;
        let image = warp_image(&self.image, &rectification, &self.config.warp_settings())?;

        info!(
            width = image.width(),
            height = image.height(),
            "Document rectified"
        );

        Ok((
            Self {
                image,
                config: self.config,
            },
            rectification,
        ))
    }
}
