// SPDX-License-Identifier: MIT

//! The baseline hue taxonomy: 31 reference families × 12 steps.
//!
//! Every family is described by a reference hue angle, the chroma it peaks
//! at (step 9), a per-step chroma shape, and a lightness curve for each mode.
//! The table is static. Brand tuning is applied on top of it at generation
//! time and never written back.
//!
//! Step roles, light mode (dark mode runs the same roles on an inverted
//! lightness curve):
//!
//! ```text
//!  1  2      app / subtle background
//!  3  4  5   component backgrounds (normal, hover, active)
//!  6  7  8   borders
//!  9  10     solid fills (hovered solid)
//!  11 12     low / high contrast text
//! ```

use hued_color::{hue_distance, Color};
use serde::Serialize;

use crate::mode::Mode;

/// Steps per scale.
pub const STEP_COUNT: usize = 12;

/// Maximum hue distance (degrees) at which a brand color may stand in for a
/// taxonomy family.
pub const SNAP_THRESHOLD: f32 = 12.0;

/// Whether a color `distance` degrees from a family's reference hue is close
/// enough to anchor into that family.
#[inline]
#[must_use]
pub fn should_snap_to_slot(distance: f32) -> bool {
    distance <= SNAP_THRESHOLD
}

// ---------------------------------------------------------------------------
// HueCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HueCategory {
    /// Near-gray families; chroma only tints.
    Neutral,
    /// Low-chroma earth tones (bronze, gold, brown).
    WarmNeutral,
    /// Saturated families.
    Chromatic,
}

// ---------------------------------------------------------------------------
// LightnessCurve
// ---------------------------------------------------------------------------

/// OKLCH lightness targets for steps 1–12 in each mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LightnessCurve {
    pub light: [f32; STEP_COUNT],
    pub dark: [f32; STEP_COUNT],
}

impl LightnessCurve {
    /// Standard curve whose solid steps (9, 10) sit at `solid` lightness.
    ///
    /// Backgrounds, borders and text use fixed targets so every family reads
    /// at the same level; only the solid fills follow the family's own
    /// lightness (yellow is bright at step 9, indigo is deep).
    #[must_use]
    pub const fn anchored_at(solid: f32) -> Self {
        let hover_dark = if solid + 0.035 > 1.0 { 1.0 } else { solid + 0.035 };
        Self {
            light: [
                0.993, 0.982, 0.958, 0.932, 0.901, 0.862, 0.806, 0.732,
                solid, solid - 0.035, 0.52, 0.33,
            ],
            dark: [
                0.178, 0.205, 0.255, 0.293, 0.331, 0.373, 0.432, 0.510,
                solid, hover_dark, 0.78, 0.93,
            ],
        }
    }

    #[must_use]
    pub const fn for_mode(&self, mode: Mode) -> &[f32; STEP_COUNT] {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    /// Lightness target of `step` (1-based, clamped into 1..=12).
    #[must_use]
    pub const fn target(&self, mode: Mode, step: u8) -> f32 {
        self.for_mode(mode)[step_index(step)]
    }

    /// The solid (step 9) lightness shared by both modes.
    #[must_use]
    pub const fn solid(&self) -> f32 {
        self.light[8]
    }

    /// Step whose target lightness is nearest `l`. Earlier steps win ties.
    #[must_use]
    pub fn nearest_step(&self, mode: Mode, l: f32) -> u8 {
        let mut best = (1, f32::INFINITY);
        for (step, &target) in (1u8..).zip(self.for_mode(mode)) {
            let d = (target - l).abs();
            if d < best.1 {
                best = (step, d);
            }
        }
        best.0
    }
}

/// Zero-based index of a 1-based step number.
#[inline]
#[must_use]
pub const fn step_index(step: u8) -> usize {
    let step = if step < 1 {
        1
    } else if step > 12 {
        12
    } else {
        step
    };
    step as usize - 1
}

// ---------------------------------------------------------------------------
// Chroma shapes
// ---------------------------------------------------------------------------

/// Chroma per step relative to step 9, for chromatic and warm-neutral
/// families. Backgrounds barely tint; text keeps about half the solid chroma.
pub const STANDARD_CHROMA: [f32; STEP_COUNT] = [
    0.03, 0.07, 0.16, 0.26, 0.35, 0.44, 0.53, 0.68, 1.0, 0.96, 0.78, 0.45,
];

/// Chroma shape for neutral families, flatter so the tint survives at the
/// ends of the scale.
pub const NEUTRAL_CHROMA: [f32; STEP_COUNT] = [
    0.15, 0.25, 0.4, 0.5, 0.58, 0.66, 0.75, 0.85, 1.0, 0.95, 0.8, 0.6,
];

// ---------------------------------------------------------------------------
// HueDefinition
// ---------------------------------------------------------------------------

/// One baseline family in the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HueDefinition {
    /// Unique lowercase key.
    pub name: &'static str,
    /// Reference hue angle in degrees.
    pub hue: f32,
    /// OKLCH chroma at step 9, before gamut mapping.
    pub peak_chroma: f32,
    pub lightness: LightnessCurve,
    /// Per-step chroma relative to `peak_chroma`.
    pub chroma: &'static [f32; STEP_COUNT],
    pub category: HueCategory,
}

impl HueDefinition {
    const fn new(
        name: &'static str,
        category: HueCategory,
        hue: f32,
        solid: f32,
        peak_chroma: f32,
    ) -> Self {
        Self {
            name,
            hue,
            peak_chroma,
            lightness: LightnessCurve::anchored_at(solid),
            chroma: match category {
                HueCategory::Neutral => &NEUTRAL_CHROMA,
                HueCategory::WarmNeutral | HueCategory::Chromatic => &STANDARD_CHROMA,
            },
            category,
        }
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.category == HueCategory::Neutral
    }

    /// Untuned chroma of `step` (1-based), before gamut mapping.
    #[must_use]
    pub const fn chroma_at(&self, step: u8) -> f32 {
        self.peak_chroma * self.chroma[step_index(step)]
    }

    /// The untuned, gamut-mapped color of `step` (1-based) in `mode`.
    ///
    /// Its chroma is the "expected chroma" brand colors are measured
    /// against.
    #[must_use]
    pub fn reference_color(&self, mode: Mode, step: u8) -> Color {
        Color::oklch(self.lightness.target(mode, step), self.chroma_at(step), self.hue).to_gamut()
    }

    /// All twelve reference colors for `mode`.
    #[must_use]
    pub fn reference_scale(&self, mode: Mode) -> [Color; STEP_COUNT] {
        std::array::from_fn(|i| self.reference_color(mode, i as u8 + 1))
    }
}

// ---------------------------------------------------------------------------
// The table
// ---------------------------------------------------------------------------

use HueCategory::{Chromatic as C, Neutral as N, WarmNeutral as W};

/// The 31 baseline families in output order: neutrals, warm neutrals, then
/// chromatic families around the wheel with the bright families last.
pub static TAXONOMY: [HueDefinition; 31] = [
    // name                  cat  hue    solid  peak
    HueDefinition::new("gray", N, 0.0, 0.643, 0.0),
    HueDefinition::new("mauve", N, 292.9, 0.646, 0.019),
    HueDefinition::new("slate", N, 277.7, 0.645, 0.016),
    HueDefinition::new("sage", N, 171.6, 0.639, 0.010),
    HueDefinition::new("olive", N, 136.6, 0.640, 0.012),
    HueDefinition::new("sand", N, 106.7, 0.641, 0.010),
    HueDefinition::new("bronze", W, 44.2, 0.627, 0.046),
    HueDefinition::new("gold", W, 77.7, 0.620, 0.049),
    HueDefinition::new("brown", W, 61.0, 0.633, 0.078),
    HueDefinition::new("tomato", C, 33.3, 0.627, 0.194),
    HueDefinition::new("red", C, 23.0, 0.626, 0.193),
    HueDefinition::new("ruby", C, 13.2, 0.628, 0.195),
    HueDefinition::new("crimson", C, 1.3, 0.634, 0.213),
    HueDefinition::new("pink", C, 346.0, 0.617, 0.208),
    HueDefinition::new("plum", C, 322.1, 0.579, 0.188),
    HueDefinition::new("purple", C, 305.9, 0.556, 0.183),
    HueDefinition::new("violet", C, 288.0, 0.542, 0.179),
    HueDefinition::new("iris", C, 278.3, 0.540, 0.184),
    HueDefinition::new("indigo", C, 267.0, 0.544, 0.191),
    HueDefinition::new("blue", C, 251.8, 0.649, 0.193),
    HueDefinition::new("cyan", C, 221.7, 0.660, 0.122),
    HueDefinition::new("teal", C, 182.0, 0.649, 0.114),
    HueDefinition::new("jade", C, 170.7, 0.642, 0.115),
    HueDefinition::new("green", C, 157.7, 0.641, 0.133),
    HueDefinition::new("grass", C, 147.4, 0.651, 0.147),
    HueDefinition::new("orange", C, 45.0, 0.691, 0.191),
    HueDefinition::new("amber", C, 84.1, 0.854, 0.157),
    HueDefinition::new("yellow", C, 100.9, 0.918, 0.184),
    HueDefinition::new("lime", C, 126.1, 0.887, 0.175),
    HueDefinition::new("mint", C, 178.0, 0.870, 0.100),
    HueDefinition::new("sky", C, 217.8, 0.861, 0.103),
];

/// The gray family, target for achromatic input.
#[must_use]
pub fn gray() -> &'static HueDefinition {
    &TAXONOMY[0]
}

/// Look up a family by name (case-insensitive).
#[must_use]
pub fn find(name: &str) -> Option<&'static HueDefinition> {
    TAXONOMY.iter().find(|def| def.name.eq_ignore_ascii_case(name))
}

/// Nearest family to `angle` among those accepted by `filter`, with its
/// circular hue distance. Earlier table entries win ties.
#[must_use]
pub fn find_closest_in<F>(angle: f32, filter: F) -> Option<(&'static HueDefinition, f32)>
where
    F: Fn(&HueDefinition) -> bool,
{
    TAXONOMY
        .iter()
        .filter(|def| filter(def))
        .map(|def| (def, hue_distance(angle, def.hue)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Nearest chromatic family to `angle`, with its circular hue distance.
#[must_use]
pub fn find_closest_hue(angle: f32) -> (&'static HueDefinition, f32) {
    find_closest_in(angle, |def| def.category == HueCategory::Chromatic)
        .unwrap_or_else(|| (gray(), hue_distance(angle, gray().hue)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
