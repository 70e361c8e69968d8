// SPDX-License-Identifier: MIT

//! Errors raised before any generation happens.
//!
//! Only malformed input is an error. A scale that cannot reach its contrast
//! target is reported through [`ScaleNote`](crate::ScaleNote) and
//! [`ContrastIssue`](crate::ContrastIssue) instead.

use hued_color::ColorError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("at least one brand color is required")]
    EmptyInput,

    #[error("{count} brand colors given, at most {max} are supported")]
    TooManyInputs { count: usize, max: usize },

    #[error("invalid brand color '{color}': {source}")]
    InvalidColor {
        color: String,
        #[source]
        source: ColorError,
        suggestion: Option<String>,
    },

    #[error("unknown mode '{name}', expected 'light' or 'dark'")]
    UnknownMode { name: String },
}

impl PaletteError {
    /// Wrap a parse failure, carrying its suggested correction along.
    pub fn invalid_color<S: Into<String>>(color: S, source: ColorError) -> Self {
        let suggestion = source.suggestion();
        Self::InvalidColor {
            color: color.into(),
            source,
            suggestion,
        }
    }

    /// Suggested fix for the offending input, if one is known.
    #[must_use]
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::InvalidColor { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn invalid_color_keeps_source_and_suggestion() {
        let source = "FF6A00".parse::<hued_color::Color>().unwrap_err();
        let err = PaletteError::invalid_color("FF6A00", source);
        assert_eq!(err.suggestion(), Some("#FF6A00"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("FF6A00"));
    }

    #[test]
    fn too_many_inputs_message() {
        let err = PaletteError::TooManyInputs { count: 8, max: 7 };
        assert_eq!(err.to_string(), "8 brand colors given, at most 7 are supported");
        assert_eq!(err.suggestion(), None);
    }
}
