// SPDX-License-Identifier: MIT

//! # hued-palette — brand colors in, accessible color system out
//!
//! Turns one to seven brand colors into 31 hue families × 12 lightness
//! steps for a light or dark appearance mode. Every family is regenerated
//! under a tuning profile measured from the brand, and the text steps are
//! pushed until they read against the backgrounds.
//!
//! # Architecture
//!
//! ```text
//! brand colors + Mode
//!     │
//!     ▼
//! analyze.rs:  snap inputs to taxonomy slots, measure hue/chroma/lightness
//!     │        deviation, split off custom rows → TuningProfile
//!     ▼
//! scale.rs:    one 12-step scale per hue (taxonomy.rs reference curves),
//!     │        pin anchors, APCA correction loop (apca.rs)
//!     ▼
//! palette.rs:  31 standard scales + custom rows → Palette
//!     │
//!     ├──▶ validate.rs: replay the APCA checks → ContrastReport
//!     └──▶ alpha.rs:    translucent equivalents over the mode backdrop
//! ```
//!
//! # Color Space
//!
//! Generation happens in OKLCH via [`hued_color::Color`]. Contrast is
//! measured with APCA on the 8-bit sRGB values a consumer would render, so
//! what passes here passes on screen.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Step indices and counts become floats in averages and curve math.
#![allow(clippy::cast_precision_loss)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]
// The taxonomy table is one long literal.
#![allow(clippy::too_many_lines)]
// f64→f32 narrowing is intentional where contrast feeds back into OKLCH.
#![allow(clippy::cast_possible_truncation)]

pub mod alpha;
pub mod analyze;
pub mod apca;
pub mod error;
pub mod mode;
pub mod palette;
pub mod scale;
pub mod taxonomy;
pub mod tuning;
pub mod validate;

pub use alpha::{alpha_scale, solve_alpha_color, solve_alpha_color_at, AlphaColor};
pub use analyze::{analyze, MAX_BRAND_COLORS};
pub use error::PaletteError;
pub use mode::Mode;
pub use palette::{generate_palette, Palette, PaletteStats};
pub use scale::{generate_scale, CustomHue, HueSource, Scale, ScaleNote, ScaleStep};
pub use taxonomy::{find_closest_hue, HueCategory, HueDefinition, TAXONOMY};
pub use tuning::{Anchor, AnchorConflict, CustomRowInfo, CustomRowReason, Deviation, TuningProfile};
pub use validate::{validate_contrast, ContrastIssue, ContrastReport, Severity, TextRole, ValidateOptions};
