// SPDX-License-Identifier: MIT
//
// hued-color — OKLCH color values for brand palette generation.
//
// The color layer under hued's palette engine. Brand colors come in as
// text (hex, rgb(), oklch()), are held as OKLCH values while palettes are
// generated and contrast-corrected, and go back out as gamut-mapped hex or
// CSS oklch() strings. Nothing above this crate touches sRGB math.

pub mod color;
pub mod parse;

pub use color::{hue_delta, hue_distance, normalize_hue, Color};
pub use parse::ColorError;
