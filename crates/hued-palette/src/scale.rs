// SPDX-License-Identifier: MIT

//! Scale generation: one hue family, twelve steps, one mode.
//!
//! A scale starts from the family's reference curves with the tuning
//! profile applied, pins any brand colors anchored into it, then runs the
//! bounded APCA correction loop on the two text steps:
//!
//! - step 12 (body text) must reach `|Lc| >= 75` on steps 1 and 2
//! - step 11 (large text) must reach `|Lc| >= 60` on steps 1 and 2
//!
//! A text step that cannot get there keeps its best-effort color and the
//! scale carries a [`ScaleNote::ContrastShortfall`]. Generation itself never
//! fails.

use hued_color::{normalize_hue, Color};
use serde::Serialize;
use tracing::{debug, warn};

use crate::apca::{apca_contrast, push_for_contrast, worst_contrast, BODY_TEXT_LC, LARGE_TEXT_LC};
use crate::mode::Mode;
use crate::taxonomy::{step_index, HueDefinition, LightnessCurve, STANDARD_CHROMA, STEP_COUNT};
use crate::tuning::{CustomRowInfo, TuningProfile};

/// Text steps and the `|Lc|` each must reach on backgrounds 1 and 2.
pub const TEXT_REQUIREMENTS: [(u8, f64); 2] = [(12, BODY_TEXT_LC), (11, LARGE_TEXT_LC)];

/// Background steps text is measured against.
pub const BACKGROUND_STEPS: [u8; 2] = [1, 2];

/// The solid fill that labels are drawn on.
pub const SOLID_STEP: u8 = 9;

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// A bespoke hue row built for one brand color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomHue {
    /// Row key (`custom-1`, …).
    pub name: String,
    pub hue: f32,
    pub peak_chroma: f32,
    pub lightness: LightnessCurve,
}

impl From<&CustomRowInfo> for CustomHue {
    fn from(row: &CustomRowInfo) -> Self {
        Self {
            name: row.row_key.clone(),
            hue: row.color.h,
            peak_chroma: row.peak_chroma,
            lightness: LightnessCurve::anchored_at(row.solid_lightness),
        }
    }
}

/// What a scale is generated from.
#[derive(Debug, Clone, PartialEq)]
pub enum HueSource {
    /// A family from the static taxonomy.
    Standard(&'static HueDefinition),
    /// A custom row. Never added to the taxonomy.
    Custom(CustomHue),
}

impl HueSource {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Standard(def) => def.name,
            Self::Custom(row) => &row.name,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Standard(_) => ScaleKind::Standard,
            Self::Custom(_) => ScaleKind::Custom,
        }
    }

    fn hue(&self) -> f32 {
        match self {
            Self::Standard(def) => def.hue,
            Self::Custom(row) => row.hue,
        }
    }

    fn peak_chroma(&self) -> f32 {
        match self {
            Self::Standard(def) => def.peak_chroma,
            Self::Custom(row) => row.peak_chroma,
        }
    }

    fn lightness(&self) -> &LightnessCurve {
        match self {
            Self::Standard(def) => &def.lightness,
            Self::Custom(row) => &row.lightness,
        }
    }

    fn chroma_shape(&self) -> &[f32; STEP_COUNT] {
        match self {
            Self::Standard(def) => def.chroma,
            Self::Custom(_) => &STANDARD_CHROMA,
        }
    }
}

// ---------------------------------------------------------------------------
// Scale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Standard,
    Custom,
}

/// One step of a scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleStep {
    /// 1-based step number.
    pub step: u8,
    pub color: Color,
    pub hex: String,
    pub css: String,
    /// Whether this step is an exact brand color.
    pub pinned: bool,
}

impl ScaleStep {
    fn new(step: u8, color: Color, pinned: bool) -> Self {
        Self {
            step,
            color,
            hex: color.to_hex(),
            css: color.to_css(),
            pinned,
        }
    }
}

/// Something worth knowing about a scale that is not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScaleNote {
    /// A text step ended below its contrast target.
    ContrastShortfall {
        step: u8,
        required: f64,
        /// Weakest `|Lc|` against the backgrounds.
        achieved: f64,
    },
    /// White text on the solid step is below the large-text target.
    LowWhiteTextContrast { contrast: f64 },
}

/// Twelve steps of one hue in one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scale {
    pub name: String,
    pub mode: Mode,
    pub kind: ScaleKind,
    pub steps: Vec<ScaleStep>,
    /// First step pinned to a brand color, if any.
    pub anchor_step: Option<u8>,
    /// Text color for labels on step 9: white, or a dark tint of the hue
    /// when white does not read.
    pub contrast_text: Color,
    pub notes: Vec<ScaleNote>,
}

impl Scale {
    /// Color of `step` (1-based, clamped into 1..=12).
    #[must_use]
    pub fn color(&self, step: u8) -> Color {
        self.steps
            .get(step_index(step))
            .map_or(Color::BLACK, |s| s.color)
    }

    #[must_use]
    pub fn step(&self, step: u8) -> Option<&ScaleStep> {
        self.steps.iter().find(|s| s.step == step)
    }

    #[must_use]
    pub fn has_shortfall(&self) -> bool {
        self.notes
            .iter()
            .any(|note| matches!(note, ScaleNote::ContrastShortfall { .. }))
    }

    /// Whether a contrast shortfall was recorded for text `step`.
    #[must_use]
    pub fn has_shortfall_at(&self, step: u8) -> bool {
        self.notes
            .iter()
            .any(|note| matches!(note, ScaleNote::ContrastShortfall { step: s, .. } if *s == step))
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.kind == ScaleKind::Custom
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate the scale for `source` in `mode` under `profile`.
///
/// Custom rows ignore the global adjustments; they already encode the
/// brand color they were built from.
#[must_use]
pub fn generate_scale(source: &HueSource, profile: &TuningProfile, mode: Mode) -> Scale {
    let (hue_shift, chroma_multiplier, lightness_shift) = match source {
        HueSource::Standard(_) => (
            profile.hue_shift,
            profile.chroma_multiplier,
            profile.lightness_shift,
        ),
        HueSource::Custom(_) => (0.0, 1.0, 0.0),
    };

    let curve = source.lightness().for_mode(mode);
    let shape = source.chroma_shape();
    let hue = normalize_hue(source.hue() + hue_shift);

    let mut colors: [Color; STEP_COUNT] = std::array::from_fn(|i| {
        let l = (curve[i] + lightness_shift).clamp(0.0, 1.0);
        let c = (source.peak_chroma() * shape[i] * chroma_multiplier).max(0.0);
        Color::oklch(l, c, hue).to_gamut()
    });

    // Pin brand colors. The first input to claim a step keeps it.
    let mut pinned = [false; STEP_COUNT];
    let mut anchor_step = None;
    for anchor in profile.anchors_in(source.name()) {
        let i = step_index(anchor.step);
        if pinned[i] {
            debug!(scale = source.name(), step = anchor.step, "step already pinned");
            continue;
        }
        colors[i] = anchor.color;
        pinned[i] = true;
        if anchor_step.is_none() {
            anchor_step = Some(anchor.step);
        }
    }

    let mut notes = Vec::new();
    correct_text_steps(source.name(), mode, &mut colors, &pinned, &mut notes);

    let solid = colors[step_index(SOLID_STEP)];
    let white_contrast = apca_contrast(Color::WHITE, solid).abs();
    if white_contrast < LARGE_TEXT_LC {
        notes.push(ScaleNote::LowWhiteTextContrast {
            contrast: white_contrast,
        });
    }
    let contrast_text = contrast_text_for(solid, white_contrast);

    Scale {
        name: source.name().to_owned(),
        mode,
        kind: source.kind(),
        steps: (1u8..)
            .zip(colors.iter().zip(pinned))
            .map(|(step, (&color, pinned))| ScaleStep::new(step, color, pinned))
            .collect(),
        anchor_step,
        contrast_text,
        notes,
    }
}

/// Bring steps 11 and 12 up to their contrast targets on steps 1 and 2.
fn correct_text_steps(
    name: &str,
    mode: Mode,
    colors: &mut [Color; STEP_COUNT],
    pinned: &[bool; STEP_COUNT],
    notes: &mut Vec<ScaleNote>,
) {
    let backgrounds = BACKGROUND_STEPS.map(|step| colors[step_index(step)]);

    for (step, required) in TEXT_REQUIREMENTS {
        let i = step_index(step);
        let (color, achieved, met) = if pinned[i] {
            let achieved = worst_contrast(colors[i], &backgrounds);
            (colors[i], achieved, achieved >= required)
        } else {
            let fix = push_for_contrast(colors[i], &backgrounds, required);
            if fix.iterations > 0 {
                debug!(
                    scale = name,
                    %mode,
                    step,
                    iterations = fix.iterations,
                    contrast = fix.contrast,
                    "corrected text step"
                );
            }
            (fix.color, fix.contrast, fix.met)
        };

        colors[i] = color;
        if !met {
            warn!(scale = name, %mode, step, required, achieved, "contrast target not met");
            notes.push(ScaleNote::ContrastShortfall {
                step,
                required,
                achieved,
            });
        }
    }
}

/// White when it reads on `solid`, otherwise whichever of white and a dark
/// tint of the hue reads better.
fn contrast_text_for(solid: Color, white_contrast: f64) -> Color {
    if white_contrast >= LARGE_TEXT_LC {
        return Color::WHITE;
    }
    let tint = Color::oklch(0.22, (solid.c * 0.25).min(0.04), solid.h).to_gamut();
    if apca_contrast(tint, solid).abs() > white_contrast {
        tint
    } else {
        Color::WHITE
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{find, TAXONOMY};
    use crate::tuning::Anchor;
    use hued_color::hue_distance;
    use pretty_assertions::assert_eq;

    fn standard(name: &str) -> HueSource {
        HueSource::Standard(find(name).unwrap())
    }

    fn baseline(name: &str, mode: Mode) -> Scale {
        generate_scale(&standard(name), &TuningProfile::neutral(), mode)
    }

    fn anchor(slot: &str, step: u8, hex: &str) -> (String, Anchor) {
        (
            hex.to_owned(),
            Anchor {
                slot: slot.to_owned(),
                step,
                is_custom_row: false,
                color: hex.parse().unwrap(),
            },
        )
    }

    // ── Shape ───────────────────────────────────────────────────────

    #[test]
    fn twelve_numbered_steps() {
        let scale = baseline("blue", Mode::Light);
        let numbers: Vec<u8> = scale.steps.iter().map(|s| s.step).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<u8>>());
        assert_eq!(scale.kind, ScaleKind::Standard);
        assert_eq!(scale.anchor_step, None);
    }

    #[test]
    fn steps_carry_hex_and_css() {
        let scale = baseline("green", Mode::Light);
        let nine = scale.step(9).unwrap();
        assert_eq!(nine.hex, nine.color.to_hex());
        assert!(nine.css.starts_with("oklch("));
        assert!(!nine.pinned);
    }

    #[test]
    fn all_steps_in_gamut() {
        for def in &TAXONOMY {
            for &mode in Mode::all() {
                let scale = generate_scale(&HueSource::Standard(def), &TuningProfile::neutral(), mode);
                for s in &scale.steps {
                    assert!(s.color.in_srgb_gamut(), "{} {mode} step {}", def.name, s.step);
                }
            }
        }
    }

    // ── Contrast ────────────────────────────────────────────────────

    #[test]
    fn baseline_text_steps_meet_targets() {
        for def in &TAXONOMY {
            for &mode in Mode::all() {
                let scale = generate_scale(&HueSource::Standard(def), &TuningProfile::neutral(), mode);
                assert!(!scale.has_shortfall(), "{} {mode}: {:?}", def.name, scale.notes);
                for (step, required) in TEXT_REQUIREMENTS {
                    for bg in BACKGROUND_STEPS {
                        let lc = apca_contrast(scale.color(step), scale.color(bg)).abs();
                        assert!(lc >= required, "{} {mode} {step}/{bg}: {lc}", def.name);
                    }
                }
            }
        }
    }

    #[test]
    fn tuning_bounds_stay_readable() {
        // Both ends of every band the analyzer can produce.
        let max_shift = TuningProfile::MAX_LIGHTNESS_SHIFT;
        for hue_shift in [-12.0, 12.0] {
            for chroma_multiplier in [
                TuningProfile::MIN_CHROMA_MULTIPLIER,
                TuningProfile::MAX_CHROMA_MULTIPLIER,
            ] {
                for lightness_shift in [-max_shift, max_shift] {
                    let profile = TuningProfile {
                        hue_shift,
                        chroma_multiplier,
                        lightness_shift,
                        ..TuningProfile::neutral()
                    };
                    for def in &TAXONOMY {
                        for &mode in Mode::all() {
                            let scale = generate_scale(&HueSource::Standard(def), &profile, mode);
                            assert!(
                                !scale.has_shortfall(),
                                "{} {mode} ({hue_shift}, {chroma_multiplier}, {lightness_shift}): {:?}",
                                def.name,
                                scale.notes
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn custom_rows_readable_in_both_modes() {
        let inputs = ["#39FF14", "#FF00FF", "#00FFFF", "#E0D0D8", "#FF9900", "#3209CF"];
        for &mode in Mode::all() {
            let profile = crate::analyze::analyze(&inputs, mode).unwrap();
            assert_eq!(profile.custom_rows.len(), inputs.len(), "{mode}");
            for row in &profile.custom_rows {
                let scale = generate_scale(&HueSource::Custom(CustomHue::from(row)), &profile, mode);
                for (step, _) in TEXT_REQUIREMENTS {
                    if scale.step(step).is_some_and(|s| s.pinned) {
                        continue;
                    }
                    assert!(
                        !scale.has_shortfall_at(step),
                        "{} ({}) {mode} step {step}: {:?}",
                        row.row_key,
                        row.source,
                        scale.notes
                    );
                }
            }
        }
    }

    #[test]
    fn bright_solids_flag_white_text() {
        for name in ["amber", "yellow", "lime", "mint", "sky"] {
            let scale = baseline(name, Mode::Light);
            assert!(
                scale
                    .notes
                    .iter()
                    .any(|n| matches!(n, ScaleNote::LowWhiteTextContrast { .. })),
                "{name}"
            );
            assert_ne!(scale.contrast_text, Color::WHITE, "{name}");
            let lc = apca_contrast(scale.contrast_text, scale.color(9)).abs();
            assert!(lc >= LARGE_TEXT_LC, "{name}: {lc}");
        }
    }

    #[test]
    fn deep_solids_take_white_text() {
        for name in ["blue", "red", "indigo"] {
            let scale = baseline(name, Mode::Dark);
            assert_eq!(scale.contrast_text, Color::WHITE, "{name}");
            assert!(scale.notes.is_empty(), "{name}: {:?}", scale.notes);
        }
    }

    // ── Tuning ──────────────────────────────────────────────────────

    #[test]
    fn tuning_moves_every_step() {
        let profile = TuningProfile {
            hue_shift: 8.0,
            lightness_shift: -0.03,
            ..TuningProfile::neutral()
        };
        let tuned = generate_scale(&standard("teal"), &profile, Mode::Light);
        let base = baseline("teal", Mode::Light);
        let (t9, b9) = (tuned.color(9), base.color(9));
        assert!(hue_distance(t9.h, b9.h + 8.0) < 0.5, "{t9:?} vs {b9:?}");
        assert!((t9.l - (b9.l - 0.03)).abs() < 1e-4);
        assert!(tuned.color(3).l < base.color(3).l);
    }

    #[test]
    fn custom_rows_ignore_global_tuning() {
        let row = HueSource::Custom(CustomHue {
            name: "custom-1".to_owned(),
            hue: 64.6,
            peak_chroma: 0.174,
            lightness: LightnessCurve::anchored_at(0.772),
        });
        let tuned = TuningProfile {
            hue_shift: 10.0,
            chroma_multiplier: 0.5,
            lightness_shift: 0.05,
            ..TuningProfile::neutral()
        };
        let a = generate_scale(&row, &tuned, Mode::Light);
        let b = generate_scale(&row, &TuningProfile::neutral(), Mode::Light);
        assert_eq!(a.steps, b.steps);
        assert!(a.is_custom());
        assert_eq!(a.name, "custom-1");
    }

    // ── Pinning ─────────────────────────────────────────────────────

    #[test]
    fn anchored_step_is_exact_brand_color() {
        let mut profile = TuningProfile::neutral();
        profile.anchors.extend([anchor("orange", 9, "#ff6a00")]);
        let scale = generate_scale(&standard("orange"), &profile, Mode::Light);

        let nine = scale.step(9).unwrap();
        assert!(nine.pinned);
        assert_eq!(nine.hex, "#ff6a00");
        assert_eq!(scale.anchor_step, Some(9));

        // Other families are unaffected by the anchor itself.
        assert_eq!(baseline("blue", Mode::Light).anchor_step, None);
    }

    #[test]
    fn first_input_keeps_contested_step() {
        let mut profile = TuningProfile::neutral();
        profile
            .anchors
            .extend([anchor("green", 9, "#30a46c"), anchor("green", 9, "#2b9a66")]);
        let scale = generate_scale(&standard("green"), &profile, Mode::Light);
        assert_eq!(scale.step(9).unwrap().hex, "#30a46c");
    }

    #[test]
    fn pinned_text_step_is_never_moved() {
        // A mid gray cannot carry body text on a near-white background.
        let mut profile = TuningProfile::neutral();
        profile.anchors.extend([anchor("gray", 12, "#999999")]);
        let scale = generate_scale(&standard("gray"), &profile, Mode::Light);

        assert_eq!(scale.step(12).unwrap().hex, "#999999");
        assert!(scale.has_shortfall_at(12));
        assert!(!scale.has_shortfall_at(11));
        match scale.notes.first() {
            Some(ScaleNote::ContrastShortfall {
                step,
                required,
                achieved,
            }) => {
                assert_eq!(*step, 12);
                assert!((*required - BODY_TEXT_LC).abs() < f64::EPSILON);
                assert!(*achieved < BODY_TEXT_LC);
            }
            other => panic!("expected shortfall, got {other:?}"),
        }
    }

    #[test]
    fn custom_hue_from_row_info() {
        let row = CustomRowInfo {
            row_key: "custom-2".to_owned(),
            source: "#39ff14".to_owned(),
            color: Color::oklch(0.871, 0.286, 141.5),
            anchor_step: 9,
            reason: crate::tuning::CustomRowReason::Neon,
            deviations: crate::tuning::Deviation::NEON,
            nearest: "grass".to_owned(),
            solid_lightness: 0.871,
            peak_chroma: 0.286,
        };
        let hue = CustomHue::from(&row);
        assert_eq!(hue.name, "custom-2");
        assert!((hue.lightness.solid() - 0.871).abs() < 1e-6);
        assert!((hue.hue - 141.5).abs() < 1e-6);
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(baseline("plum", Mode::Dark), baseline("plum", Mode::Dark));
    }
}
