// SPDX-License-Identifier: MIT

//! The tuning profile: how a brand deviates from the baseline taxonomy.
//!
//! Produced once per [`analyze`](crate::analyze) call and then only read.
//! Every scale generation borrows the same profile.

use hued_color::Color;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Global adjustments plus per-input bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningProfile {
    /// Degrees added to every reference hue (signed).
    pub hue_shift: f32,
    /// Factor applied to every reference chroma, in [0.5, 1.5].
    pub chroma_multiplier: f32,
    /// Added to every lightness target, in [-0.05, 0.05].
    pub lightness_shift: f32,
    /// Canonical input hex → where that input landed.
    pub anchors: IndexMap<String, Anchor>,
    /// Bespoke rows for inputs the taxonomy cannot represent, in input order.
    pub custom_rows: Vec<CustomRowInfo>,
    /// Slots claimed by more than one input.
    pub conflicts: Vec<AnchorConflict>,
}

impl TuningProfile {
    /// Smallest chroma multiplier the analyzer will produce.
    pub const MIN_CHROMA_MULTIPLIER: f32 = 0.5;
    /// Largest chroma multiplier the analyzer will produce.
    pub const MAX_CHROMA_MULTIPLIER: f32 = 1.5;
    /// Largest lightness shift, either direction.
    pub const MAX_LIGHTNESS_SHIFT: f32 = 0.05;

    /// A profile that leaves the taxonomy untouched.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            hue_shift: 0.0,
            chroma_multiplier: 1.0,
            lightness_shift: 0.0,
            anchors: IndexMap::new(),
            custom_rows: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// Whether the global adjustments are all at their neutral values.
    #[must_use]
    pub fn is_untuned(&self) -> bool {
        self.hue_shift.abs() < f32::EPSILON
            && (self.chroma_multiplier - 1.0).abs() < f32::EPSILON
            && self.lightness_shift.abs() < f32::EPSILON
    }

    /// Anchors that pin a step of `slot`, in input order.
    pub fn anchors_in<'a>(&'a self, slot: &'a str) -> impl Iterator<Item = &'a Anchor> + 'a {
        self.anchors.values().filter(move |a| a.slot == slot)
    }
}

impl Default for TuningProfile {
    fn default() -> Self {
        Self::neutral()
    }
}

// ---------------------------------------------------------------------------
// Anchors
// ---------------------------------------------------------------------------

/// Where one brand color was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Taxonomy family name, or a custom row key.
    pub slot: String,
    /// 1-based step the color is pinned to.
    pub step: u8,
    pub is_custom_row: bool,
    /// The exact input color.
    pub color: Color,
}

/// Several inputs landed in the same slot. All of them feed the tuning; the
/// first one keeps any step they both claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorConflict {
    pub slot: String,
    /// Canonical hex of every input in the slot, in input order.
    pub inputs: Vec<String>,
}

// ---------------------------------------------------------------------------
// Custom rows
// ---------------------------------------------------------------------------

bitflags::bitflags! {
    /// Every way an input fell outside its family's envelope.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
    pub struct Deviation: u8 {
        /// Hue further than the snap threshold from every family.
        const HUE_GAP = 1;
        /// Far more chroma than the family carries at that step.
        const NEON = 1 << 1;
        /// Very light and far less chroma than the family's step.
        const PASTEL = 1 << 2;
    }
}

impl Deviation {
    /// The reason reported for a custom row: hue gap, then neon, then pastel.
    #[must_use]
    pub fn primary_reason(self) -> Option<CustomRowReason> {
        if self.contains(Self::HUE_GAP) {
            Some(CustomRowReason::HueGap)
        } else if self.contains(Self::NEON) {
            Some(CustomRowReason::Neon)
        } else if self.contains(Self::PASTEL) {
            Some(CustomRowReason::Pastel)
        } else {
            None
        }
    }
}

/// Why an input got its own row instead of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomRowReason {
    Neon,
    Pastel,
    HueGap,
}

impl CustomRowReason {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Neon => "neon",
            Self::Pastel => "pastel",
            Self::HueGap => "hue-gap",
        }
    }
}

/// A synthesized hue row for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRowInfo {
    /// `custom-1`, `custom-2`, … in input order.
    pub row_key: String,
    /// Canonical hex of the input.
    pub source: String,
    pub color: Color,
    /// 1-based step the input is pinned to.
    pub anchor_step: u8,
    pub reason: CustomRowReason,
    pub deviations: Deviation,
    /// Closest taxonomy family, for reference only.
    pub nearest: String,
    /// Step 9 lightness of the row's curve.
    pub solid_lightness: f32,
    /// Chroma at step 9, before gamut mapping.
    pub peak_chroma: f32,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
