// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KeystoneError, Result};
use crate::types::{InterpolationKind, OrderingMode, WarpPolicy};

/// Persistent rectification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyConfig {
    /// How the corrected content is framed in the output canvas.
    pub policy: WarpPolicy,
    /// Corner role resolution when sum and difference criteria collide.
    pub ordering: OrderingMode,
    /// Resampling method used by the raster warper.
    pub interpolation: InterpolationKind,
    /// RGBA colour for output pixels with no source pixel.
    pub fill: [u8; 4],
    /// Largest canvas side (pixels) the full-extent policy may produce.
    pub max_canvas_side: u32,
}

impl Default for RectifyConfig {
    fn default() -> Self {
        Self {
            policy: WarpPolicy::Crop,
            ordering: OrderingMode::Reference,
            interpolation: InterpolationKind::Bilinear,
            fill: [255, 255, 255, 255],
            max_canvas_side: 32_768,
        }
    }
}

impl RectifyConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_canvas_side == 0 {
            return Err(KeystoneError::InvalidConfig(
                "max_canvas_side must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The geometry-only subset of the settings.
    pub fn options(&self) -> RectifyOptions {
        RectifyOptions {
            policy: self.policy,
            ordering: self.ordering,
            max_canvas_side: self.max_canvas_side,
        }
    }

    /// The raster-only subset of the settings.
    pub fn warp_settings(&self) -> WarpSettings {
        WarpSettings {
            interpolation: self.interpolation,
            fill: self.fill,
        }
    }
}

/// Inputs to the geometric pipeline besides the points and image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectifyOptions {
    pub policy: WarpPolicy,
    pub ordering: OrderingMode,
    pub max_canvas_side: u32,
}

impl Default for RectifyOptions {
    fn default() -> Self {
        RectifyConfig::default().options()
    }
}

impl RectifyOptions {
    pub fn with_policy(policy: WarpPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}

/// Interpolation and border fill handed to the raster warper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpSettings {
    pub interpolation: InterpolationKind,
    pub fill: [u8; 4],
}

impl Default for WarpSettings {
    fn default() -> Self {
        RectifyConfig::default().warp_settings()
    }
}
