// SPDX-License-Identifier: MIT
//
// Color text parsing.
//
// Accepted forms:
//
//   #RGB  #RGBA  #RRGGBB  #RRGGBBAA
//   rgb(255, 106, 0)  rgba(255 106 0 / 50%)
//   oklch(64% 0.18 45)  oklch(0.64 0.18 45deg / 0.5)
//
// Functional values outside their range are clamped on read rather than
// rejected. Malformed input produces a `ColorError` that can offer a
// corrected spelling for the common slips (missing `#`, letter O for zero).

use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::color::Color;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Why a piece of color text could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,

    #[error("'{input}' is missing the leading '#'")]
    MissingHash { input: String },

    #[error("'{input}' has {len} hex digits, expected 3, 4, 6 or 8")]
    InvalidLength { input: String, len: usize },

    #[error("'{input}' contains invalid character '{ch}' at position {position}")]
    InvalidCharacter {
        input: String,
        ch: char,
        position: usize,
    },

    #[error("'{input}' is not a recognized color format")]
    Unsupported { input: String },
}

impl ColorError {
    /// A corrected spelling of the input, when an obvious one exists.
    ///
    /// ```
    /// use hued_color::{Color, ColorError};
    ///
    /// let err = "FF6A00".parse::<Color>().unwrap_err();
    /// assert_eq!(err.suggestion().as_deref(), Some("#FF6A00"));
    ///
    /// let err = "#FF6AOO".parse::<Color>().unwrap_err();
    /// assert_eq!(err.suggestion().as_deref(), Some("#FF6A00"));
    /// ```
    #[must_use]
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::MissingHash { input } => Some(format!("#{input}")),
            Self::InvalidCharacter { input, .. } | Self::Unsupported { input } => {
                lookalike_fix(input)
            }
            Self::Empty | Self::InvalidLength { .. } => None,
        }
    }
}

/// Swap letters that are commonly typed in place of hex digits.
fn lookalike_fix(input: &str) -> Option<String> {
    let swapped: String = input
        .chars()
        .map(|ch| match ch {
            'O' | 'o' => '0',
            'l' | 'I' => '1',
            other => other,
        })
        .collect();

    let candidate = if swapped.starts_with('#') {
        swapped
    } else {
        format!("#{swapped}")
    };

    (candidate != input && parse_hex(&candidate).is_ok()).then_some(candidate)
}

// ─── FromStr ─────────────────────────────────────────────────────────────────

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }

        if s.starts_with('#') {
            return parse_hex(s);
        }

        let lower = s.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return parse_rgb(s);
        }
        if lower.starts_with("oklch") {
            return parse_oklch(s);
        }

        if matches!(s.len(), 3 | 4 | 6 | 8) && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::MissingHash { input: s.to_owned() });
        }

        Err(ColorError::Unsupported { input: s.to_owned() })
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

/// Parse `#`-prefixed hex notation.
fn parse_hex(s: &str) -> Result<Color, ColorError> {
    let digits = s.strip_prefix('#').unwrap_or(s);

    if let Some((position, ch)) = digits
        .chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii_hexdigit())
    {
        return Err(ColorError::InvalidCharacter {
            input: s.to_owned(),
            ch,
            position: position + 1,
        });
    }

    // Only ASCII hex digits remain, so byte indexing is safe.
    let bytes = digits.as_bytes();
    let nibble = |i: usize| parse_hex_digit(bytes[i]);
    let byte = |i: usize| parse_hex_digit(bytes[i]) << 4 | parse_hex_digit(bytes[i + 1]);

    match bytes.len() {
        // #RGB
        3 => {
            let (r, g, b) = (nibble(0), nibble(1), nibble(2));
            Ok(Color::rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RGBA
        4 => {
            let (r, g, b, a) = (nibble(0), nibble(1), nibble(2), nibble(3));
            Ok(Color::rgba8(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a))
        }
        // #RRGGBB
        6 => Ok(Color::rgb8(byte(0), byte(2), byte(4))),
        // #RRGGBBAA
        8 => Ok(Color::rgba8(byte(0), byte(2), byte(4), byte(6))),
        len => Err(ColorError::InvalidLength {
            input: s.to_owned(),
            len,
        }),
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

// ─── Functional Notation ─────────────────────────────────────────────────────

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^rgba?\(\s*([\d.]+)(%?)\s*[,\s]\s*([\d.]+)(%?)\s*[,\s]\s*([\d.]+)(%?)\s*(?:[,/]\s*([\d.]+)(%?)\s*)?\)$",
    )
    .expect("valid regex")
});

static OKLCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^oklch\(\s*(-?[\d.]+)(%?)\s+(-?[\d.]+)(%?)\s+(-?[\d.]+)(?:deg)?\s*(?:/\s*([\d.]+)(%?)\s*)?\)$",
    )
    .expect("valid regex")
});

/// Read capture `i` as a number, scaling by `percent_scale` when the
/// following capture holds a `%` sign.
fn number(caps: &Captures<'_>, i: usize, percent_scale: f32) -> Option<f32> {
    let value: f32 = caps.get(i)?.as_str().parse().ok()?;
    let is_percent = caps.get(i + 1).is_some_and(|m| m.as_str() == "%");
    Some(if is_percent { value * percent_scale } else { value })
}

/// Optional alpha in capture `i`, defaulting to opaque.
fn alpha(caps: &Captures<'_>, i: usize) -> Option<f32> {
    if caps.get(i).is_none() {
        return Some(1.0);
    }
    number(caps, i, 0.01)
}

fn parse_rgb(s: &str) -> Result<Color, ColorError> {
    let unsupported = || ColorError::Unsupported { input: s.to_owned() };
    let caps = RGB_RE.captures(s).ok_or_else(unsupported)?;

    // Percent channels map 100% to 255.
    let channel = |i| number(&caps, i, 2.55).map(|v| v.clamp(0.0, 255.0) / 255.0);
    let r = channel(1).ok_or_else(unsupported)?;
    let g = channel(3).ok_or_else(unsupported)?;
    let b = channel(5).ok_or_else(unsupported)?;
    let a = alpha(&caps, 7).ok_or_else(unsupported)?;

    Ok(Color::srgba(r, g, b, a.clamp(0.0, 1.0)))
}

fn parse_oklch(s: &str) -> Result<Color, ColorError> {
    let unsupported = || ColorError::Unsupported { input: s.to_owned() };
    let caps = OKLCH_RE.captures(s).ok_or_else(unsupported)?;

    let l = number(&caps, 1, 0.01).ok_or_else(unsupported)?;
    // CSS maps 100% chroma to 0.4.
    let c = number(&caps, 3, 0.004).ok_or_else(unsupported)?;
    let h: f32 = caps[5].parse().map_err(|_| unsupported())?;
    let a = alpha(&caps, 6).ok_or_else(unsupported)?;

    Ok(Color::oklcha(l, c, h, a).clamped())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hue_distance;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    fn parse(s: &str) -> Color {
        s.parse().unwrap()
    }

    // ── Hex ──────────────────────────────────────────────────────────────

    #[test]
    fn hex_rrggbb() {
        assert_eq!(parse("#FF6A00").to_rgb8(), (0xff, 0x6a, 0x00));
        assert_eq!(parse("#30a46c").to_rgb8(), (0x30, 0xa4, 0x6c));
    }

    #[test]
    fn hex_short_forms_expand() {
        assert_eq!(parse("#f00").to_rgb8(), (255, 0, 0));
        let c = parse("#f008");
        assert_eq!(c.to_rgba8().3, 0x88);
    }

    #[test]
    fn hex_with_alpha() {
        let c = parse("#0000ff80");
        assert_eq!(c.to_rgba8(), (0, 0, 255, 0x80));
        assert!(!c.is_opaque());
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        assert_eq!(parse("  #ffffff \n").to_rgb8(), (255, 255, 255));
    }

    // ── Errors ───────────────────────────────────────────────────────────

    #[test]
    fn empty_input() {
        assert_eq!("".parse::<Color>(), Err(ColorError::Empty));
        assert_eq!("   ".parse::<Color>(), Err(ColorError::Empty));
    }

    #[test]
    fn missing_hash_suggests_prefixed_form() {
        let err = "30a46c".parse::<Color>().unwrap_err();
        assert_eq!(
            err,
            ColorError::MissingHash {
                input: "30a46c".to_owned()
            }
        );
        assert_eq!(err.suggestion().as_deref(), Some("#30a46c"));
    }

    #[test]
    fn wrong_length() {
        let err = "#12345".parse::<Color>().unwrap_err();
        assert_eq!(
            err,
            ColorError::InvalidLength {
                input: "#12345".to_owned(),
                len: 5
            }
        );
        assert_eq!(err.suggestion(), None);
    }

    #[test]
    fn invalid_character_reports_position() {
        let err = "#12G456".parse::<Color>().unwrap_err();
        assert_eq!(
            err,
            ColorError::InvalidCharacter {
                input: "#12G456".to_owned(),
                ch: 'G',
                position: 3
            }
        );
        assert_eq!(err.suggestion(), None);
    }

    #[test]
    fn lookalike_letters_suggest_digits() {
        let err = "#FFOOl0".parse::<Color>().unwrap_err();
        assert_eq!(err.suggestion().as_deref(), Some("#FF0010"));

        // Without the hash the fix adds it too.
        let err = "FF6AOO".parse::<Color>().unwrap_err();
        assert!(matches!(err, ColorError::Unsupported { .. }));
        assert_eq!(err.suggestion().as_deref(), Some("#FF6A00"));
    }

    #[test]
    fn unrelated_text_is_unsupported() {
        let err = "cornflowerblue".parse::<Color>().unwrap_err();
        assert!(matches!(err, ColorError::Unsupported { .. }));
        assert_eq!(err.suggestion(), None);
        assert!(err.to_string().contains("cornflowerblue"));
    }

    // ── Functional Notation ──────────────────────────────────────────────

    #[test]
    fn rgb_comma_and_space_syntax() {
        assert_eq!(parse("rgb(255, 106, 0)").to_rgb8(), (255, 106, 0));
        assert_eq!(parse("rgb(255 106 0)").to_rgb8(), (255, 106, 0));
        assert_eq!(parse("RGB(48,164,108)").to_rgb8(), (48, 164, 108));
    }

    #[test]
    fn rgba_alpha_forms() {
        let c = parse("rgba(0, 0, 0, 0.5)");
        assert!(approx_eq(c.alpha, 0.5, 0.001));
        let c = parse("rgb(0 0 0 / 25%)");
        assert!(approx_eq(c.alpha, 0.25, 0.001));
    }

    #[test]
    fn rgb_channels_clamped() {
        assert_eq!(parse("rgb(300, 0, 0)").to_rgb8(), (255, 0, 0));
        assert_eq!(parse("rgb(100%, 0%, 0%)").to_rgb8(), (255, 0, 0));
    }

    #[test]
    fn oklch_percent_lightness() {
        let c = parse("oklch(64% 0.18 45)");
        assert!(approx_eq(c.l, 0.64, 0.0001));
        assert!(approx_eq(c.c, 0.18, 0.0001));
        assert!(approx_eq(c.h, 45.0, 0.0001));
    }

    #[test]
    fn oklch_out_of_range_values_clamped() {
        let c = parse("oklch(1.4 -0.1 -30deg / 2)");
        assert!(approx_eq(c.l, 1.0, 0.0001));
        assert!(approx_eq(c.c, 0.0, 0.0001));
        assert!(hue_distance(c.h, 330.0) < 0.001);
        assert!(approx_eq(c.alpha, 1.0, 0.0001));
    }

    #[test]
    fn oklch_with_alpha() {
        let c = parse("oklch(0.5 0.1 200 / 0.4)");
        assert!(approx_eq(c.alpha, 0.4, 0.0001));
    }

    #[test]
    fn malformed_functional_is_unsupported() {
        assert!(matches!(
            "rgb(1, 2)".parse::<Color>(),
            Err(ColorError::Unsupported { .. })
        ));
        assert!(matches!(
            "oklch(0.5, 0.1)".parse::<Color>(),
            Err(ColorError::Unsupported { .. })
        ));
    }
}
