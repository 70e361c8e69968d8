// SPDX-License-Identifier: MIT

//! Palette assembly — every scale for one mode.
//!
//! Runs the analyzer (or takes a precomputed tuning profile), generates the
//! 31 standard scales in taxonomy order, then one scale per custom row.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::analyze::{analyze, parse_brand_colors};
use crate::error::Result;
use crate::mode::Mode;
use crate::scale::{generate_scale, CustomHue, HueSource, Scale};
use crate::taxonomy::{STEP_COUNT, TAXONOMY};
use crate::tuning::TuningProfile;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A complete color system for one appearance mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub mode: Mode,
    /// Hue name → scale; taxonomy order, then custom rows.
    pub scales: IndexMap<String, Scale>,
    pub tuning: TuningProfile,
    /// Standard families holding at least one brand color, in input order.
    pub anchored: Vec<String>,
    /// Custom row keys, in input order.
    pub custom: Vec<String>,
    pub stats: PaletteStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteStats {
    pub hue_count: usize,
    /// `hue_count × 12`.
    pub color_count: usize,
    pub anchored_count: usize,
    pub custom_count: usize,
}

impl Palette {
    #[must_use]
    pub fn scale(&self, name: &str) -> Option<&Scale> {
        self.scales.get(name)
    }

    /// Standard scales, in taxonomy order.
    pub fn standard_scales(&self) -> impl Iterator<Item = &Scale> {
        self.scales.values().filter(|s| !s.is_custom())
    }

    /// Custom row scales, in input order.
    pub fn custom_scales(&self) -> impl Iterator<Item = &Scale> {
        self.scales.values().filter(|s| s.is_custom())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Build the palette for `brand_colors` in `mode`.
///
/// With `tuning_override` the analyzer is skipped and the given profile is
/// used as-is; the inputs are still validated.
///
/// # Errors
///
/// Input errors from [`parse_brand_colors`]. Contrast shortfalls are not
/// errors; see [`Scale::has_shortfall`].
#[instrument(skip_all, fields(mode = %mode, inputs = brand_colors.len()))]
pub fn generate_palette<S: AsRef<str>>(
    brand_colors: &[S],
    mode: Mode,
    tuning_override: Option<&TuningProfile>,
) -> Result<Palette> {
    let tuning = match tuning_override {
        Some(profile) => {
            parse_brand_colors(brand_colors)?;
            profile.clone()
        }
        None => analyze(brand_colors, mode)?,
    };

    let mut scales = IndexMap::with_capacity(TAXONOMY.len() + tuning.custom_rows.len());
    for def in &TAXONOMY {
        let scale = generate_scale(&HueSource::Standard(def), &tuning, mode);
        scales.insert(scale.name.clone(), scale);
    }
    for row in &tuning.custom_rows {
        let scale = generate_scale(&HueSource::Custom(CustomHue::from(row)), &tuning, mode);
        scales.insert(scale.name.clone(), scale);
    }

    let mut anchored: Vec<String> = Vec::new();
    for anchor in tuning.anchors.values().filter(|a| !a.is_custom_row) {
        if !anchored.contains(&anchor.slot) {
            anchored.push(anchor.slot.clone());
        }
    }
    let custom: Vec<String> = tuning.custom_rows.iter().map(|r| r.row_key.clone()).collect();

    let stats = PaletteStats {
        hue_count: scales.len(),
        color_count: scales.len() * STEP_COUNT,
        anchored_count: anchored.len(),
        custom_count: custom.len(),
    };
    debug!(
        hues = stats.hue_count,
        anchored = stats.anchored_count,
        custom = stats.custom_count,
        shortfalls = scales.values().filter(|s| s.has_shortfall()).count(),
        "palette generated"
    );

    Ok(Palette {
        mode,
        scales,
        tuning,
        anchored,
        custom,
        stats,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
