// SPDX-License-Identifier: MIT

//! Translucent equivalents of opaque colors.
//!
//! Given an opaque target and the backdrop it sits on, find the least opaque
//! 8-bit RGBA foreground that composites back to the target. Alpha variants
//! of a scale let overlays tint whatever surface they land on while matching
//! the solid scale on the mode's default backdrop.
//!
//! All math is on 8-bit channels with the compositing rule browsers use:
//! `out = round(bg × (1 − α) + fg × α)`.

use hued_color::Color;
use serde::Serialize;

use crate::scale::Scale;

/// An 8-bit RGBA color meant to be composited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AlphaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl AlphaColor {
    /// Opacity as a fraction.
    #[must_use]
    pub fn alpha(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// `#rrggbbaa`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    #[must_use]
    pub fn to_color(self) -> Color {
        Color::rgba8(self.r, self.g, self.b, self.a)
    }

    /// The opaque color produced by drawing this over `backdrop`.
    #[must_use]
    pub fn composite_over(self, backdrop: Color) -> Color {
        let (br, bg, bb) = backdrop.to_rgb8();
        let alpha = f64::from(self.a) / 255.0;
        Color::rgb8(
            composite(self.r, br, alpha),
            composite(self.g, bg, alpha),
            composite(self.b, bb, alpha),
        )
    }
}

// ---------------------------------------------------------------------------
// Solving
// ---------------------------------------------------------------------------

/// Smallest alpha that lets one channel move from `backdrop` to `target`.
fn required_alpha(target: u8, backdrop: u8) -> f64 {
    let (t, b) = (f64::from(target), f64::from(backdrop));
    match target.cmp(&backdrop) {
        std::cmp::Ordering::Greater => (t - b) / (255.0 - b),
        std::cmp::Ordering::Less => (b - t) / b,
        std::cmp::Ordering::Equal => 0.0,
    }
}

#[allow(clippy::cast_sign_loss)]
fn composite(fg: u8, bg: u8, alpha: f64) -> u8 {
    let v = f64::from(bg).mul_add(1.0 - alpha, f64::from(fg) * alpha);
    v.round().clamp(0.0, 255.0) as u8
}

/// Foreground channel that best reproduces `target` over `backdrop` at
/// `alpha`: the exact inverse rounded, then nudged by one if rounding
/// missed.
#[allow(clippy::cast_sign_loss)]
fn solve_channel(target: u8, backdrop: u8, alpha: f64) -> u8 {
    let (t, b) = (f64::from(target), f64::from(backdrop));
    let exact = (b + (t - b) / alpha).round().clamp(0.0, 255.0) as u8;

    let error = |fg: u8| composite(fg, backdrop, alpha).abs_diff(target);
    [exact, exact.saturating_sub(1), exact.saturating_add(1)]
        .into_iter()
        .min_by_key(|&fg| error(fg))
        .unwrap_or(exact)
}

#[allow(clippy::cast_sign_loss)]
fn solve(target: (u8, u8, u8), backdrop: (u8, u8, u8), alpha8: u8) -> AlphaColor {
    if alpha8 == 0 {
        let (r, g, b) = target;
        return AlphaColor { r, g, b, a: 0 };
    }
    let alpha = f64::from(alpha8) / 255.0;
    AlphaColor {
        r: solve_channel(target.0, backdrop.0, alpha),
        g: solve_channel(target.1, backdrop.1, alpha),
        b: solve_channel(target.2, backdrop.2, alpha),
        a: alpha8,
    }
}

/// Least opaque 8-bit RGBA that composites over `backdrop` to `target`.
///
/// Alpha is the largest per-channel requirement rounded up to the next
/// 8-bit step, so every channel stays reachable. A target equal to the
/// backdrop needs no ink at all and gets alpha 0.
///
/// ```
/// use hued_color::Color;
/// use hued_palette::solve_alpha_color;
///
/// let target = Color::rgb8(0xe6, 0xf6, 0xeb);
/// let overlay = solve_alpha_color(target, Color::WHITE);
/// assert!(overlay.a < 255);
/// assert_eq!(overlay.composite_over(Color::WHITE).to_rgb8(), (0xe6, 0xf6, 0xeb));
/// ```
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn solve_alpha_color(target: Color, backdrop: Color) -> AlphaColor {
    let t = target.to_rgb8();
    let b = backdrop.to_rgb8();

    let needed = required_alpha(t.0, b.0)
        .max(required_alpha(t.1, b.1))
        .max(required_alpha(t.2, b.2));
    // The small epsilon keeps an exact step like 128/255 from ceiling to 129.
    let alpha8 = (needed * 255.0 - 1e-9).ceil().clamp(0.0, 255.0) as u8;

    solve(t, b, alpha8)
}

/// Closest 8-bit RGBA to `target` over `backdrop` at a fixed `alpha`.
///
/// Channels that would need more than full intensity are clamped, so the
/// result may composite short of the target when `alpha` is too low.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn solve_alpha_color_at(target: Color, backdrop: Color, alpha: f32) -> AlphaColor {
    let alpha8 = (f64::from(alpha.clamp(0.0, 1.0)) * 255.0).round() as u8;
    solve(target.to_rgb8(), backdrop.to_rgb8(), alpha8)
}

/// Alpha variants of every step of `scale` over its mode's backdrop.
#[must_use]
pub fn alpha_scale(scale: &Scale) -> Vec<AlphaColor> {
    let backdrop = scale.mode.backdrop();
    scale
        .steps
        .iter()
        .map(|step| solve_alpha_color(step.color, backdrop))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use crate::palette::generate_palette;
    use pretty_assertions::assert_eq;

    fn within_one(a: (u8, u8, u8), b: (u8, u8, u8)) -> bool {
        a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1 && a.2.abs_diff(b.2) <= 1
    }

    // ── Edge cases ──────────────────────────────────────────────────

    #[test]
    fn backdrop_itself_needs_no_alpha() {
        let overlay = solve_alpha_color(Color::WHITE, Color::WHITE);
        assert_eq!(overlay.a, 0);
        assert_eq!(overlay.composite_over(Color::WHITE).to_rgb8(), (255, 255, 255));
    }

    #[test]
    fn black_on_white_is_opaque_black() {
        let overlay = solve_alpha_color(Color::BLACK, Color::WHITE);
        assert_eq!(overlay, AlphaColor { r: 0, g: 0, b: 0, a: 255 });
        assert_eq!(overlay.to_hex(), "#000000ff");
    }

    #[test]
    fn gray_on_white_is_translucent_black() {
        let target = Color::rgb8(128, 128, 128);
        let overlay = solve_alpha_color(target, Color::WHITE);
        assert_eq!((overlay.r, overlay.g, overlay.b), (0, 0, 0));
        assert_eq!(overlay.a, 127);
        assert_eq!(overlay.composite_over(Color::WHITE).to_rgb8(), (128, 128, 128));
    }

    #[test]
    fn light_on_black_is_translucent_white_ish() {
        let target = Color::rgb8(40, 40, 40);
        let overlay = solve_alpha_color(target, Color::BLACK);
        assert_eq!(overlay.r, 255);
        assert_eq!(overlay.composite_over(Color::BLACK).to_rgb8(), (40, 40, 40));
    }

    // ── Minimality ──────────────────────────────────────────────────

    #[test]
    fn alpha_is_minimal() {
        let backdrop = Color::WHITE;
        for target in [
            Color::rgb8(0xe6, 0xf6, 0xeb),
            Color::rgb8(0x30, 0xa4, 0x6c),
            Color::rgb8(0xff, 0x6a, 0x00),
        ] {
            let overlay = solve_alpha_color(target, backdrop);
            let t = target.to_rgb8();
            let needed = required_alpha(t.0, 255)
                .max(required_alpha(t.1, 255))
                .max(required_alpha(t.2, 255));
            assert!(f64::from(overlay.a) / 255.0 >= needed - 1e-9);
            assert!(f64::from(overlay.a - 1) / 255.0 < needed, "{target:?}");
        }
    }

    // ── Round trip ──────────────────────────────────────────────────

    #[test]
    fn palette_alpha_scales_round_trip() {
        for &mode in Mode::all() {
            let palette = generate_palette(&["#FF6A00", "#39FF14"], mode, None).unwrap();
            for scale in palette.scales.values() {
                let alphas = alpha_scale(scale);
                assert_eq!(alphas.len(), 12);
                for (step, overlay) in scale.steps.iter().zip(&alphas) {
                    let back = overlay.composite_over(mode.backdrop()).to_rgb8();
                    assert!(
                        within_one(back, step.color.to_rgb8()),
                        "{} {mode} step {}: {back:?} vs {}",
                        scale.name,
                        step.step,
                        step.hex
                    );
                }
            }
        }
    }

    // ── Fixed alpha ─────────────────────────────────────────────────

    #[test]
    fn fixed_alpha_reproduces_reachable_target() {
        let target = Color::rgb8(192, 192, 192);
        let overlay = solve_alpha_color_at(target, Color::WHITE, 0.5);
        assert_eq!(overlay.a, 128);
        assert_eq!(overlay.composite_over(Color::WHITE).to_rgb8(), (192, 192, 192));
    }

    #[test]
    fn fixed_alpha_clamps_unreachable_target() {
        let overlay = solve_alpha_color_at(Color::BLACK, Color::WHITE, 0.5);
        assert_eq!((overlay.r, overlay.g, overlay.b, overlay.a), (0, 0, 0, 128));
        let (r, _, _) = overlay.composite_over(Color::WHITE).to_rgb8();
        assert_eq!(r, 127);
    }

    #[test]
    fn to_color_keeps_alpha() {
        let overlay = AlphaColor { r: 10, g: 20, b: 30, a: 64 };
        let color = overlay.to_color();
        assert!(!color.is_opaque());
        assert!((overlay.alpha() - 64.0 / 255.0).abs() < 1e-6);
    }
}
