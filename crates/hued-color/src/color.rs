// SPDX-License-Identifier: MIT
//
// hued color system — OKLCH-native perceptual color.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Brand palettes are generated, tuned, and contrast-corrected entirely in
// OKLCH. Lightness steps are perceptually even, hue shifts keep lightness
// intact, and chroma can be scaled without the hue drifting. sRGB only
// shows up at the edges: parsing input and rendering hex for output.
//
// Conversion pipeline:
//
//   OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB ↔ 8-bit hex
//
// Gamut mapping reduces chroma (never lightness or hue) when an OKLCH value
// falls outside the displayable sRGB range.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Color ───────────────────────────────────────────────────────────────────

/// A perceptual color stored in OKLCH space with alpha transparency.
///
/// OKLCH is a cylindrical representation of the Oklab color space, designed
/// by Björn Ottosson. It provides perceptually uniform lightness, chroma,
/// and hue — meaning equal numerical steps produce equal visual steps.
///
/// `Color` is a `Copy` value type. Every operation returns a new color.
///
/// # Examples
///
/// ```
/// use hued_color::Color;
///
/// // Create from OKLCH values directly
/// let orange = Color::oklch(0.69, 0.19, 45.0);
///
/// // Create from familiar sRGB
/// let blue = Color::srgb(0.0, 0.0, 1.0);
///
/// // Parse CSS-style text
/// let green: Color = "#30a46c".parse().unwrap();
///
/// // Out-of-gamut values keep lightness and hue, losing only chroma
/// let vivid = Color::oklch(0.9, 0.35, 140.0);
/// let mapped = vivid.to_gamut();
/// assert!(mapped.in_srgb_gamut());
/// assert!(mapped.c < vivid.c);
/// assert_eq!(mapped.to_hex().len(), 7);
/// # let _ = (orange, blue, green);
/// ```
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Color {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f32,

    /// Chroma (colorfulness): 0.0 (gray) to ~0.37 (most vivid).
    /// Unbounded in theory, but sRGB gamut limits practical values.
    pub c: f32,

    /// Hue angle in degrees: 0.0 to 360.0.
    /// 0° = pink/red, 90° = yellow, 180° = cyan/green, 270° = blue/purple.
    pub h: f32,

    /// Alpha (opacity): 0.0 (fully transparent) to 1.0 (fully opaque).
    pub alpha: f32,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from OKLCH values.
    ///
    /// - `l`: Lightness, 0.0 to 1.0
    /// - `c`: Chroma, 0.0 to ~0.37
    /// - `h`: Hue angle in degrees, 0.0 to 360.0
    #[inline]
    #[must_use]
    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h, alpha: 1.0 }
    }

    /// Create a color from OKLCH values with alpha.
    #[inline]
    #[must_use]
    pub const fn oklcha(l: f32, c: f32, h: f32, alpha: f32) -> Self {
        Self { l, c, h, alpha }
    }

    /// Create a color from sRGB values (0.0 to 1.0 range).
    #[must_use]
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        let (l, c, h) = srgb_to_oklch(r, g, b);
        Self { l, c, h, alpha: 1.0 }
    }

    /// Create a color from sRGB values with alpha.
    #[must_use]
    pub fn srgba(r: f32, g: f32, b: f32, alpha: f32) -> Self {
        let (l, c, h) = srgb_to_oklch(r, g, b);
        Self { l, c, h, alpha }
    }

    /// Create a color from 8-bit sRGB values (0 to 255).
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::srgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Create a color from 8-bit sRGB values with alpha.
    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::srgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Create a pure gray color at the given lightness.
    ///
    /// Uses OKLCH lightness, so 0.5 is perceptual mid-gray (not sRGB 128).
    #[inline]
    #[must_use]
    pub const fn gray(lightness: f32) -> Self {
        Self::oklch(lightness, 0.0, 0.0)
    }

    /// Pure black.
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    // ─── Alpha ───────────────────────────────────────────────────────────

    /// Return a copy with the given alpha value.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Whether this color is fully opaque (alpha >= 1.0).
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    /// Whether this color is achromatic (no visible chroma).
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-5
    }

    /// Bring every component into its valid range.
    ///
    /// Hue wraps mod 360, lightness and alpha clamp to 0.0–1.0, chroma is
    /// floored at 0.0. Nothing is rejected for being out of gamut; use
    /// [`to_gamut`](Self::to_gamut) for that.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            l: self.l.clamp(0.0, 1.0),
            c: self.c.max(0.0),
            h: normalize_hue(self.h),
            alpha: self.alpha.clamp(0.0, 1.0),
        }
    }

    // ─── Conversions to sRGB ─────────────────────────────────────────────

    /// sRGB channels, each clamped into 0.0–1.0.
    fn to_srgb(self) -> (f32, f32, f32) {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Convert to 8-bit sRGB with gamut mapping.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_srgb();
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Convert to 8-bit sRGBA with gamut mapping.
    #[must_use]
    pub fn to_rgba8(self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.to_rgb8();
        (r, g, b, to_u8(self.alpha.clamp(0.0, 1.0)))
    }

    /// Convert to hex string (`#rrggbb` or `#rrggbbaa` if alpha < 1.0).
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            let a = to_u8(self.alpha.clamp(0.0, 1.0));
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Render as a CSS Color Level 4 `oklch()` string.
    ///
    /// ```
    /// use hued_color::Color;
    ///
    /// assert_eq!(Color::oklch(0.6412, 0.133, 157.7).to_css(), "oklch(64.12% 0.1330 157.70)");
    /// assert_eq!(
    ///     Color::oklcha(0.5, 0.1, 20.0, 0.5).to_css(),
    ///     "oklch(50.00% 0.1000 20.00 / 0.500)"
    /// );
    /// ```
    #[must_use]
    pub fn to_css(self) -> String {
        let l = self.l * 100.0;
        let (c, h) = (self.c, self.h);
        if self.is_opaque() {
            format!("oklch({l:.2}% {c:.4} {h:.2})")
        } else {
            let a = self.alpha;
            format!("oklch({l:.2}% {c:.4} {h:.2} / {a:.3})")
        }
    }

    /// Whether every sRGB channel lands in 0.0–1.0 without clamping.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        (0.0..=1.0).contains(&r) && (0.0..=1.0).contains(&g) && (0.0..=1.0).contains(&b)
    }

    /// Largest in-gamut chroma at this lightness and hue, found by a
    /// 16-round bisection. In-gamut colors come back unchanged.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        if self.in_srgb_gamut() {
            return self;
        }

        let mut lo: f32 = 0.0;
        let mut hi: f32 = self.c;

        for _ in 0..16 {
            let mid = (lo + hi) * 0.5;
            let candidate = Self { c: mid, ..self };
            if candidate.in_srgb_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Self { c: lo, ..self }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "Color::oklch({:.4}, {:.4}, {:.1})", self.l, self.c, self.h)
        } else {
            write!(
                f,
                "Color::oklcha({:.4}, {:.4}, {:.1}, {:.2})",
                self.l, self.c, self.h, self.alpha
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        // Compare with small epsilon for floating point
        const EPS: f32 = 1e-5;
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.alpha - other.alpha).abs() < EPS
            && (self.is_achromatic()
                || other.is_achromatic()
                || hue_distance(self.h, other.h) < EPS)
    }
}

impl Default for Color {
    /// Default is fully opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Hue Arithmetic ──────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f32) -> f32 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Absolute hue difference (shortest arc on the color wheel), in [0, 180].
#[inline]
#[must_use]
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

/// Signed hue difference `to - from` along the shortest arc, in (-180, 180].
#[inline]
#[must_use]
pub fn hue_delta(from: f32, to: f32) -> f32 {
    let diff = normalize_hue(to - from);
    if diff > 180.0 { diff - 360.0 } else { diff }
}

// ─── Color Space Conversion Functions ────────────────────────────────────────
//
// These implement the Oklab color space math created by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/
//
// Pipeline: OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

/// Convert OKLCH chroma and hue to Oklab a, b components.
#[inline]
fn oklch_to_oklab_ab(c: f32, h: f32) -> (f32, f32) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

/// Convert Oklab a, b components to OKLCH chroma and hue.
#[inline]
fn oklab_ab_to_oklch(a: f32, b: f32) -> (f32, f32) {
    let c = a.hypot(b);
    let h = if c < 1e-8 {
        0.0 // Achromatic — hue is undefined, default to 0
    } else {
        let h = b.atan2(a).to_degrees();
        if h < 0.0 { h + 360.0 } else { h }
    };
    (c, h)
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// The Oklab ↔ Linear sRGB conversion goes through an intermediate LMS
// (Long, Medium, Short cone response) space. The matrices below are from
// Björn Ottosson's original specification.

/// Convert Oklab (L, a, b) to linear sRGB.
#[inline]
fn oklab_to_linear_srgb(l_ok: f32, a: f32, b: f32) -> (f32, f32, f32) {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_76f32.mul_add(b, 0.396_337_78f32.mul_add(a, l_ok));
    let m_ = 0.063_854_17f32.mul_add(-b, 0.105_561_346f32.mul_add(-a, l_ok));
    let s_ = 1.291_485_5f32.mul_add(-b, 0.089_484_18f32.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_94f32.mul_add(s, 4.076_741_7f32.mul_add(l, -(3.307_711_6 * m)));
    let g = 0.341_319_38f32.mul_add(-s, (-1.268_438f32).mul_add(l, 2.609_757_4 * m));
    let bl = 1.707_614_7f32.mul_add(s, (-0.004_196_086_3f32).mul_add(l, -(0.703_418_6 * m)));

    (r, g, bl)
}

/// Convert linear sRGB to Oklab (L, a, b).
#[inline]
fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    // Linear sRGB → LMS
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g));
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g));
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g));

    // Cube root (LMS → Oklab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    // Oklab intermediate → Oklab
    let l_ok = 0.004_072_047f32.mul_add(-s_, 0.210_454_26f32.mul_add(l_, 0.793_617_8 * m_));
    let a = 0.450_593_7f32.mul_add(s_, 1.977_998_5f32.mul_add(l_, -(2.428_592_2 * m_)));
    let b_ok = 0.808_675_77f32.mul_add(-s_, 0.025_904_037f32.mul_add(l_, 0.782_771_77 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────
//
// sRGB uses a piecewise transfer function (gamma curve) to encode linear
// light values into the perceptual domain.

/// Gamma-encode one linear channel.
#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Gamma-decode one encoded channel.
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

/// Convert sRGB (0.0–1.0) → OKLCH.
fn srgb_to_oklch(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let lr = srgb_to_linear(r);
    let lg = srgb_to_linear(g);
    let lb = srgb_to_linear(b);
    let (l, a, b_ok) = linear_srgb_to_oklab(lr, lg, lb);
    let (c, h) = oklab_ab_to_oklch(a, b_ok);
    (l, c, h)
}

/// Convert OKLCH → sRGB (0.0–1.0, may be out of gamut).
fn oklch_to_srgb(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
