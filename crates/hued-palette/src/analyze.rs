// SPDX-License-Identifier: MIT

//! Brand analysis: place each input in the taxonomy and measure how the
//! brand as a whole deviates from it.
//!
//! Each input goes through three questions:
//!
//! 1. Which family? Nearest reference hue within a candidate pool chosen by
//!    the input's chroma (gray for achromatic input, the neutral families
//!    for barely tinted input, chromatic families otherwise).
//! 2. Which step? The step whose target lightness is nearest the input's
//!    lightness.
//! 3. Does it fit? An input whose hue sits in a gap between families, or
//!    whose chroma is far outside what the family carries at that step,
//!    gets its own custom row instead of anchoring into the family.
//!
//! Anchored inputs are then averaged into the three global adjustments of
//! the [`TuningProfile`].

use hued_color::{hue_delta, Color};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{PaletteError, Result};
use crate::mode::Mode;
use crate::taxonomy::{
    find_closest_in, gray, should_snap_to_slot, step_index, HueCategory, HueDefinition,
    LightnessCurve, STANDARD_CHROMA,
};
use crate::tuning::{Anchor, AnchorConflict, CustomRowInfo, CustomRowReason, Deviation, TuningProfile};

/// Most brand colors one analysis accepts.
pub const MAX_BRAND_COLORS: usize = 7;

/// Below this chroma an input is treated as pure gray.
pub const ACHROMATIC_CHROMA: f32 = 0.004;

/// Below this chroma an input only matches neutral families.
pub const NEUTRAL_CHROMA: f32 = 0.02;

/// Up to this chroma, warm neutrals compete with chromatic families.
pub const WARM_NEUTRAL_CHROMA: f32 = 0.09;

/// Chroma ratio (input ÷ expected) above which an input may be neon.
pub const NEON_RATIO: f32 = 1.6;

/// Absolute chroma excess an input also needs before it counts as neon.
pub const NEON_EXCESS: f32 = 0.07;

/// Minimum lightness for the pastel check.
pub const PASTEL_LIGHTNESS: f32 = 0.8;

/// Chroma ratio below which a light input counts as pastel.
pub const PASTEL_RATIO: f32 = 0.5;

const CUSTOM_SOLID_MIN: f32 = 0.45;
const CUSTOM_SOLID_MAX: f32 = 0.92;
const CUSTOM_MAX_CHROMA: f32 = 0.37;

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Check the input count and parse every brand color.
///
/// # Errors
///
/// [`PaletteError::EmptyInput`], [`PaletteError::TooManyInputs`], or the
/// first [`PaletteError::InvalidColor`] in input order.
pub fn parse_brand_colors<S: AsRef<str>>(brand_colors: &[S]) -> Result<Vec<Color>> {
    if brand_colors.is_empty() {
        return Err(PaletteError::EmptyInput);
    }
    if brand_colors.len() > MAX_BRAND_COLORS {
        return Err(PaletteError::TooManyInputs {
            count: brand_colors.len(),
            max: MAX_BRAND_COLORS,
        });
    }

    brand_colors
        .iter()
        .map(|input| {
            let input = input.as_ref();
            input
                .parse::<Color>()
                .map(|color| color.with_alpha(1.0))
                .map_err(|err| PaletteError::invalid_color(input.trim(), err))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Where a single color lands in the taxonomy for one mode.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Placement {
    pub family: &'static HueDefinition,
    /// Circular distance from the family's reference hue, in degrees.
    pub hue_distance: f32,
    /// 1-based step whose target lightness is nearest the input's.
    pub step: u8,
    /// Chroma of the family's reference color at `step`.
    pub expected_chroma: f32,
    /// Input chroma ÷ expected chroma (1.0 when nothing is expected).
    pub chroma_ratio: f32,
    pub deviations: Deviation,
}

impl Placement {
    #[must_use]
    pub fn is_custom(&self) -> bool {
        !self.deviations.is_empty()
    }
}

/// Place `color` in the taxonomy for `mode`.
#[must_use]
pub fn place(color: Color, mode: Mode) -> Placement {
    let (family, hue_distance) = closest_family(color);

    let step = family.lightness.nearest_step(mode, color.l);

    let expected_chroma = family.reference_color(mode, step).c;
    let chroma_ratio = if expected_chroma > 1e-3 {
        color.c / expected_chroma
    } else {
        1.0
    };

    let mut deviations = Deviation::empty();
    if !family.is_neutral() {
        if !should_snap_to_slot(hue_distance) {
            deviations |= Deviation::HUE_GAP;
        }
        if chroma_ratio > NEON_RATIO && color.c - expected_chroma > NEON_EXCESS {
            deviations |= Deviation::NEON;
        }
        if color.l >= PASTEL_LIGHTNESS && chroma_ratio < PASTEL_RATIO {
            deviations |= Deviation::PASTEL;
        }
    }

    Placement {
        family,
        hue_distance,
        step,
        expected_chroma,
        chroma_ratio,
        deviations,
    }
}

/// Nearest family from the pool the color's chroma allows.
fn closest_family(color: Color) -> (&'static HueDefinition, f32) {
    if color.c < ACHROMATIC_CHROMA {
        return (gray(), 0.0);
    }

    let found = if color.c < NEUTRAL_CHROMA {
        find_closest_in(color.h, |def| def.category == HueCategory::Neutral)
    } else {
        find_closest_in(color.h, |def| match def.category {
            HueCategory::Chromatic => true,
            HueCategory::WarmNeutral => color.c <= WARM_NEUTRAL_CHROMA,
            HueCategory::Neutral => false,
        })
    };
    found.unwrap_or((gray(), 0.0))
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Analyze up to seven brand colors for `mode`.
///
/// Duplicate inputs (same canonical hex) are counted once.
///
/// # Errors
///
/// See [`parse_brand_colors`].
#[instrument(level = "debug", skip_all, fields(mode = %mode, inputs = brand_colors.len()))]
pub fn analyze<S: AsRef<str>>(brand_colors: &[S], mode: Mode) -> Result<TuningProfile> {
    let colors = parse_brand_colors(brand_colors)?;

    let mut profile = TuningProfile::neutral();
    let mut samples: Vec<(Color, Placement)> = Vec::new();

    for color in colors {
        let key = color.to_hex();
        if profile.anchors.contains_key(&key) {
            debug!(input = %key, "duplicate brand color ignored");
            continue;
        }

        let placement = place(color, mode);
        debug!(
            input = %key,
            family = placement.family.name,
            step = placement.step,
            hue_distance = placement.hue_distance,
            chroma_ratio = placement.chroma_ratio,
            deviations = ?placement.deviations,
            "placed brand color"
        );

        if let Some(reason) = placement.deviations.primary_reason() {
            let index = profile.custom_rows.len() + 1;
            let row = custom_row(index, &key, color, &placement, reason, mode);
            profile.anchors.insert(
                key,
                Anchor {
                    slot: row.row_key.clone(),
                    step: row.anchor_step,
                    is_custom_row: true,
                    color,
                },
            );
            profile.custom_rows.push(row);
        } else {
            profile.anchors.insert(
                key,
                Anchor {
                    slot: placement.family.name.to_owned(),
                    step: placement.step,
                    is_custom_row: false,
                    color,
                },
            );
            samples.push((color, placement));
        }
    }

    aggregate(&mut profile, &samples, mode);
    profile.conflicts = find_conflicts(&profile);

    debug!(
        hue_shift = profile.hue_shift,
        chroma_multiplier = profile.chroma_multiplier,
        lightness_shift = profile.lightness_shift,
        anchors = profile.anchors.len(),
        custom_rows = profile.custom_rows.len(),
        "tuning profile"
    );
    Ok(profile)
}

/// Fold anchored samples into the three global adjustments.
fn aggregate(profile: &mut TuningProfile, samples: &[(Color, Placement)], mode: Mode) {
    let tinted = || samples.iter().filter(|(_, p)| !p.family.is_neutral());

    // Circular mean, so -170° and +170° average to 180°, not 0°.
    let (sin, cos, n) = tinted().fold((0.0f32, 0.0f32, 0usize), |(s, c, n), (color, p)| {
        let delta = hue_delta(p.family.hue, color.h).to_radians();
        (s + delta.sin(), c + delta.cos(), n + 1)
    });
    if n > 0 {
        profile.hue_shift = sin.atan2(cos).to_degrees();
    }

    let ratios: Vec<f32> = tinted()
        .filter(|(_, p)| p.expected_chroma > 0.005)
        .map(|(color, p)| color.c / p.expected_chroma)
        .collect();
    if let Some(mean) = mean(&ratios) {
        profile.chroma_multiplier = mean.clamp(
            TuningProfile::MIN_CHROMA_MULTIPLIER,
            TuningProfile::MAX_CHROMA_MULTIPLIER,
        );
    }

    let offsets: Vec<f32> = samples
        .iter()
        .map(|(color, p)| color.l - p.family.lightness.target(mode, p.step))
        .collect();
    if let Some(mean) = mean(&offsets) {
        profile.lightness_shift = mean.clamp(
            -TuningProfile::MAX_LIGHTNESS_SHIFT,
            TuningProfile::MAX_LIGHTNESS_SHIFT,
        );
    }
}

fn mean(values: &[f32]) -> Option<f32> {
    (!values.is_empty()).then(|| values.iter().sum::<f32>() / values.len() as f32)
}

/// Standard slots claimed by more than one input.
fn find_conflicts(profile: &TuningProfile) -> Vec<AnchorConflict> {
    let mut by_slot: IndexMap<&str, Vec<String>> = IndexMap::new();
    for (key, anchor) in &profile.anchors {
        if !anchor.is_custom_row {
            by_slot.entry(anchor.slot.as_str()).or_default().push(key.clone());
        }
    }

    by_slot
        .into_iter()
        .filter(|(_, inputs)| inputs.len() > 1)
        .map(|(slot, inputs)| {
            debug!(slot, ?inputs, "several brand colors share a slot");
            AnchorConflict {
                slot: slot.to_owned(),
                inputs,
            }
        })
        .collect()
}

/// Build the bespoke row for an input the taxonomy cannot hold.
fn custom_row(
    index: usize,
    key: &str,
    color: Color,
    placement: &Placement,
    reason: CustomRowReason,
    mode: Mode,
) -> CustomRowInfo {
    // A pastel keeps the family's solid lightness so the tint itself lands
    // on a light background step.
    let solid_lightness = if reason == CustomRowReason::Pastel {
        placement.family.lightness.solid()
    } else {
        color.l.clamp(CUSTOM_SOLID_MIN, CUSTOM_SOLID_MAX)
    };

    let curve = LightnessCurve::anchored_at(solid_lightness);
    let anchor_step = curve.nearest_step(mode, color.l);
    let peak_chroma = (color.c / STANDARD_CHROMA[step_index(anchor_step)]).min(CUSTOM_MAX_CHROMA);

    CustomRowInfo {
        row_key: format!("custom-{index}"),
        source: key.to_owned(),
        color,
        anchor_step,
        reason,
        deviations: placement.deviations,
        nearest: placement.family.name.to_owned(),
        solid_lightness,
        peak_chroma,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
