// SPDX-License-Identifier: MIT

//! Appearance modes.

use std::fmt;
use std::str::FromStr;

use hued_color::Color;
use serde::{Deserialize, Serialize};

use crate::error::PaletteError;

/// Light or dark appearance. Every palette is generated for exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Step 1 is the lightest background, step 12 the darkest text.
    Light,
    /// Step 1 is the darkest background, step 12 the lightest text.
    Dark,
}

impl Mode {
    /// Lowercase name of this mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a mode from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::all().iter().find(|m| m.name() == lower).copied()
    }

    /// Both modes, light first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Light, Self::Dark]
    }

    /// The surface translucent colors are composited over: white in light
    /// mode, black in dark mode.
    #[must_use]
    pub const fn backdrop(self) -> Color {
        match self {
            Self::Light => Color::WHITE,
            Self::Dark => Color::BLACK,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| PaletteError::UnknownMode {
            name: s.to_owned(),
        })
    }
}
