// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for people marking document corners by hand.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how a front end presents it.

use crate::error::KeystoneError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user must adjust the corner points and try again.
    ActionRequired,
    /// Cannot be fixed by the user at the point-picking stage.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `KeystoneError` into a `HumanError`.
pub fn humanize_error(err: &KeystoneError) -> HumanError {
    match err {
        KeystoneError::InvalidPointCount { got } => HumanError {
            message: "Exactly four corners are needed.".into(),
            suggestion: format!("Mark one point on each corner of the page. ({got} marked)"),
            severity: Severity::ActionRequired,
        },

        KeystoneError::DegenerateQuadrilateral(detail) => HumanError {
            message: "The corners don't outline a page.".into(),
            suggestion: format!(
                "Some corners are on top of each other or in a straight line. Spread them out to the page corners. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        KeystoneError::NonPositiveDimension { .. } => HumanError {
            message: "The marked area is too small.".into(),
            suggestion: "Move the corners further apart so they cover the whole page.".into(),
            severity: Severity::ActionRequired,
        },

        KeystoneError::AmbiguousOrdering { .. } => HumanError {
            message: "We couldn't tell which corner is which.".into(),
            suggestion: "The page is turned too far. Rotate the photo so the page is roughly upright, then mark the corners again.".into(),
            severity: Severity::ActionRequired,
        },

        KeystoneError::UnboundedCanvas(_) => HumanError {
            message: "The whole photo can't be straightened this way.".into(),
            suggestion: "Choose the crop option instead, or keep the original size.".into(),
            severity: Severity::ActionRequired,
        },

        KeystoneError::CanvasTooLarge { width, height, limit } => HumanError {
            message: "The straightened page would be too large.".into(),
            suggestion: format!(
                "Keep the original size, or raise the size limit in settings. ({width}x{height}, limit {limit})"
            ),
            severity: Severity::ActionRequired,
        },

        KeystoneError::ImageError(detail) => HumanError {
            message: "The picture couldn't be processed.".into(),
            suggestion: format!("Try a different photo. (Detail: {detail})"),
            severity: Severity::Permanent,
        },

        KeystoneError::InvalidConfig(detail) => HumanError {
            message: "The settings file has a mistake.".into(),
            suggestion: format!("Fix the setting or delete the file to use defaults. ({detail})"),
            severity: Severity::Permanent,
        },

        KeystoneError::Io(io_err) => HumanError {
            message: "A file couldn't be read.".into(),
            suggestion: format!("Check that the file exists and can be opened. ({io_err})"),
            severity: Severity::Permanent,
        },

        KeystoneError::Serialization(json_err) => HumanError {
            message: "The settings file couldn't be understood.".into(),
            suggestion: format!("Check the file is valid JSON. ({json_err})"),
            severity: Severity::Permanent,
        },
    }
}
