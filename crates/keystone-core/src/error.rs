// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Keystone.

use thiserror::Error;

use crate::types::Corner;

/// Top-level error type for all Keystone operations.
#[derive(Debug, Error)]
pub enum KeystoneError {
    // -- Input validation --
    #[error("expected exactly 4 corner points, got {got}")]
    InvalidPointCount { got: usize },

    #[error("degenerate quadrilateral: {0}")]
    DegenerateQuadrilateral(String),

    #[error("non-positive dimension: width {width}, height {height}")]
    NonPositiveDimension { width: f64, height: f64 },

    #[error("ambiguous corner ordering: point {point} claims both {first:?} and {second:?}")]
    AmbiguousOrdering {
        point: usize,
        first: Corner,
        second: Corner,
    },

    // -- Canvas --
    #[error("transformed image extent is unbounded: {0}")]
    UnboundedCanvas(String),

    #[error("canvas {width}x{height} exceeds the {limit}px side limit")]
    CanvasTooLarge { width: u64, height: u64, limit: u32 },

    // -- Raster --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KeystoneError>;
