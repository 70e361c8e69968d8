// SPDX-License-Identifier: MIT

//! APCA contrast measurement and enforcement for text steps.
//!
//! Contrast is scored with the Accessible Perceptual Contrast Algorithm
//! (APCA-W3 0.0.98G constants) on the 8-bit sRGB values that will actually
//! be rendered. The result is a signed lightness contrast `Lc`:
//!
//! - positive: dark text on a light background
//! - negative: light text on a dark background
//!
//! Thresholds compare against `|Lc|`:
//!
//! - body text (step 12): `|Lc| >= 75`
//! - large text (step 11) and text on solid fills: `|Lc| >= 60`
//!
//! Enforcement moves only OKLCH lightness, one small step at a time, so a
//! corrected color keeps its hue and (gamut permitting) its chroma.

use hued_color::Color;
use tracing::trace;

/// Minimum `|Lc|` for body text.
pub const BODY_TEXT_LC: f64 = 75.0;

/// Minimum `|Lc|` for large text and labels on solid fills.
pub const LARGE_TEXT_LC: f64 = 60.0;

/// Lightness moved per correction iteration.
pub const CORRECTION_STEP: f32 = 0.01;

/// Iteration cap for one correction search.
pub const MAX_CORRECTION_ITERATIONS: u32 = 64;

/// Total lightness a correction may move a color.
pub const MAX_CORRECTION_DISPLACEMENT: f32 = 0.6;

// Luminance coefficients for sRGB D65.
const COEF_R: f64 = 0.212_672_9;
const COEF_G: f64 = 0.715_152_2;
const COEF_B: f64 = 0.072_175_0;

const GAMMA: f64 = 2.4;

// Soft clamp for near-black luminance.
const BLACK_THRESHOLD: f64 = 0.022;
const BLACK_EXPONENT: f64 = 1.414;

const SCALE: f64 = 1.14;
const OFFSET: f64 = 0.027;
const LOW_CLIP: f64 = 0.1;

// Dark text on light background.
const EXP_BG_NORMAL: f64 = 0.56;
const EXP_TEXT_NORMAL: f64 = 0.57;

// Light text on dark background.
const EXP_BG_REVERSE: f64 = 0.65;
const EXP_TEXT_REVERSE: f64 = 0.62;

/// APCA screen luminance of an 8-bit sRGB triple, soft-clamped near black.
#[must_use]
pub fn screen_luminance((r, g, b): (u8, u8, u8)) -> f64 {
    let lin = |v: u8| (f64::from(v) / 255.0).powf(GAMMA);
    let y = COEF_B.mul_add(lin(b), COEF_R.mul_add(lin(r), COEF_G * lin(g)));

    if y < BLACK_THRESHOLD {
        y + (BLACK_THRESHOLD - y).powf(BLACK_EXPONENT)
    } else {
        y
    }
}

/// Signed APCA contrast `Lc` of `text` drawn on `background`.
///
/// Both colors are gamut-mapped and quantized to 8 bits first. Alpha is
/// ignored; composite translucent colors before measuring.
#[must_use]
pub fn apca_contrast(text: Color, background: Color) -> f64 {
    let y_text = screen_luminance(text.to_rgb8());
    let y_bg = screen_luminance(background.to_rgb8());

    let c = if y_bg > y_text {
        SCALE * (y_bg.powf(EXP_BG_NORMAL) - y_text.powf(EXP_TEXT_NORMAL))
    } else {
        SCALE * (y_bg.powf(EXP_BG_REVERSE) - y_text.powf(EXP_TEXT_REVERSE))
    };

    if c.abs() < LOW_CLIP {
        0.0
    } else if c > 0.0 {
        (c - OFFSET) * 100.0
    } else {
        (c + OFFSET) * 100.0
    }
}

/// Weakest `|Lc|` of `text` across every background.
#[must_use]
pub fn worst_contrast(text: Color, backgrounds: &[Color]) -> f64 {
    backgrounds
        .iter()
        .map(|&bg| apca_contrast(text, bg).abs())
        .fold(f64::INFINITY, f64::min)
}

// ---------------------------------------------------------------------------
// Correction
// ---------------------------------------------------------------------------

/// Outcome of [`push_for_contrast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    /// Best color found (the input itself when no move was needed).
    pub color: Color,
    /// Weakest `|Lc|` of `color` across the backgrounds.
    pub contrast: f64,
    /// Lightness steps taken.
    pub iterations: u32,
    /// Whether `contrast` reaches the requested minimum.
    pub met: bool,
}

/// Move `text` away from the first background in small lightness steps
/// until its weakest `|Lc|` against `backgrounds` reaches `min_lc`.
///
/// The search is bounded by [`MAX_CORRECTION_ITERATIONS`] and
/// [`MAX_CORRECTION_DISPLACEMENT`]. When neither bound allows the target to
/// be met, the best color seen is returned with `met: false`. Hue and chroma
/// are held; only gamut mapping may trim chroma.
#[must_use]
pub fn push_for_contrast(text: Color, backgrounds: &[Color], min_lc: f64) -> Correction {
    let start = text.to_gamut();
    let mut best = Correction {
        color: start,
        contrast: worst_contrast(start, backgrounds),
        iterations: 0,
        met: false,
    };
    if best.contrast >= min_lc {
        best.met = true;
        return best;
    }

    // Lighter text on a dark background, darker text on a light one.
    let direction: f32 = match backgrounds.first() {
        Some(bg) if bg.l > text.l => -1.0,
        _ => 1.0,
    };

    let mut lightness = text.l;
    for iteration in 1..=MAX_CORRECTION_ITERATIONS {
        let next = direction.mul_add(CORRECTION_STEP, lightness).clamp(0.0, 1.0);
        if (next - lightness).abs() < f32::EPSILON
            || (next - text.l).abs() > MAX_CORRECTION_DISPLACEMENT + f32::EPSILON
        {
            break;
        }
        lightness = next;

        let candidate = Color::oklcha(lightness, text.c, text.h, text.alpha).to_gamut();
        let contrast = worst_contrast(candidate, backgrounds);
        trace!(iteration, lightness, contrast, "contrast correction step");

        if contrast > best.contrast {
            best = Correction {
                color: candidate,
                contrast,
                iterations: iteration,
                met: false,
            };
        }
        if contrast >= min_lc {
            best.met = true;
            break;
        }
    }

    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Screen luminance ────────────────────────────────────────────

    #[test]
    fn luminance_extremes() {
        let white = screen_luminance((255, 255, 255));
        assert!(approx_eq(white, 1.0, 0.001), "White luminance: {white}");
        // Black is lifted by the soft clamp.
        let black = screen_luminance((0, 0, 0));
        assert!(black > 0.0 && black < 0.01, "Black luminance: {black}");
    }

    // ── Contrast ────────────────────────────────────────────────────

    #[test]
    fn black_on_white_is_strongly_positive() {
        let lc = apca_contrast(Color::BLACK, Color::WHITE);
        assert!(approx_eq(lc, 106.0, 0.5), "Lc: {lc}");
    }

    #[test]
    fn white_on_black_is_strongly_negative() {
        let lc = apca_contrast(Color::WHITE, Color::BLACK);
        assert!(approx_eq(lc, -107.9, 0.5), "Lc: {lc}");
    }

    #[test]
    fn same_color_is_zero() {
        let c = Color::oklch(0.6, 0.1, 200.0);
        assert!(approx_eq(apca_contrast(c, c), 0.0, f64::EPSILON));
    }

    #[test]
    fn polarity_is_asymmetric() {
        let dark = Color::rgb8(0x33, 0x33, 0x33);
        let light = Color::rgb8(0xee, 0xee, 0xee);
        let normal = apca_contrast(dark, light);
        let reverse = apca_contrast(light, dark);
        assert!(normal > 0.0 && reverse < 0.0);
        assert!((normal.abs() - reverse.abs()).abs() > 0.5);
    }

    #[test]
    fn mid_gray_on_white() {
        // #888 on #fff is a well-known reference point near Lc 63.
        let lc = apca_contrast(Color::rgb8(0x88, 0x88, 0x88), Color::WHITE);
        assert!(approx_eq(lc, 63.1, 1.0), "Lc: {lc}");
    }

    #[test]
    fn worst_contrast_takes_minimum() {
        let text = Color::gray(0.2);
        let w = worst_contrast(text, &[Color::WHITE, Color::gray(0.9)]);
        let against_white = apca_contrast(text, Color::WHITE).abs();
        assert!(w < against_white);
    }

    // ── Correction ──────────────────────────────────────────────────

    #[test]
    fn already_passing_text_is_untouched() {
        let text = Color::oklch(0.3, 0.05, 250.0);
        let fix = push_for_contrast(text, &[Color::WHITE], LARGE_TEXT_LC);
        assert!(fix.met);
        assert_eq!(fix.iterations, 0);
        assert_eq!(fix.color, text.to_gamut());
    }

    #[test]
    fn light_background_darkens_text() {
        let text = Color::oklch(0.6, 0.12, 150.0);
        let bg = Color::oklch(0.99, 0.005, 150.0);
        let fix = push_for_contrast(text, &[bg], BODY_TEXT_LC);
        assert!(fix.met, "contrast {}", fix.contrast);
        assert!(fix.contrast >= BODY_TEXT_LC);
        assert!(fix.color.l < text.l);
        assert!(fix.iterations > 0);
    }

    #[test]
    fn dark_background_lightens_text() {
        let text = Color::oklch(0.55, 0.1, 30.0);
        let bg = Color::oklch(0.18, 0.01, 30.0);
        let fix = push_for_contrast(text, &[bg], BODY_TEXT_LC);
        assert!(fix.met, "contrast {}", fix.contrast);
        assert!(fix.color.l > text.l);
    }

    #[test]
    fn correction_preserves_hue() {
        let text = Color::oklch(0.6, 0.1, 250.0);
        let fix = push_for_contrast(text, &[Color::WHITE], BODY_TEXT_LC);
        let diff = hued_color::hue_distance(fix.color.h, text.h);
        assert!(diff < 0.01, "Hue shifted: {diff}");
    }

    #[test]
    fn impossible_target_is_best_effort() {
        // Nothing reaches Lc 200; the search must stop at its bounds.
        let text = Color::gray(0.5);
        let fix = push_for_contrast(text, &[Color::WHITE], 200.0);
        assert!(!fix.met);
        assert!(fix.iterations <= MAX_CORRECTION_ITERATIONS);
        assert!((text.l - fix.color.l) <= MAX_CORRECTION_DISPLACEMENT + 0.001);
        assert!(fix.contrast > apca_contrast(text, Color::WHITE).abs());
    }
}
