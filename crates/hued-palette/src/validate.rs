// SPDX-License-Identifier: MIT

//! Contrast audit of a finished palette.
//!
//! Replays the text checks the scale generator enforces, plus the advisory
//! white-on-solid check, and reports every miss. The palette is only read.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::apca::{apca_contrast, BODY_TEXT_LC, LARGE_TEXT_LC};
use crate::mode::Mode;
use crate::palette::Palette;
use crate::scale::{Scale, SOLID_STEP};

/// Which scales to audit and how much to report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Hue names to check; empty checks every scale.
    pub hues: Vec<String>,
    /// Skip the advisory white-on-solid check.
    pub errors_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A text step the generator promises to make readable.
    Error,
    /// Advisory only.
    Warning,
}

/// The kind of text a check covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextRole {
    /// Step 12 on the backgrounds.
    Body,
    /// Step 11 on the backgrounds.
    Large,
    /// White labels on the solid step.
    OnSolid,
}

impl TextRole {
    /// Minimum `|Lc|` for this role.
    #[must_use]
    pub const fn required(self) -> f64 {
        match self {
            Self::Body => BODY_TEXT_LC,
            Self::Large | Self::OnSolid => LARGE_TEXT_LC,
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Body | Self::Large => Severity::Error,
            Self::OnSolid => Severity::Warning,
        }
    }
}

/// One failed check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastIssue {
    pub hue: String,
    pub mode: Mode,
    pub role: TextRole,
    /// Text step, or `None` for white text.
    pub text_step: Option<u8>,
    pub background_step: u8,
    pub expected: f64,
    /// Measured `|Lc|`.
    pub actual: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastReport {
    pub mode: Mode,
    pub total_checks: usize,
    pub passed_checks: usize,
    pub issues: Vec<ContrastIssue>,
}

impl ContrastReport {
    pub fn errors(&self) -> impl Iterator<Item = &ContrastIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ContrastIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Text-on-background pairs checked per scale: (role, text step, background step).
const TEXT_CHECKS: [(TextRole, u8, u8); 4] = [
    (TextRole::Body, 12, 1),
    (TextRole::Body, 12, 2),
    (TextRole::Large, 11, 1),
    (TextRole::Large, 11, 2),
];

/// Audit `palette`.
///
/// Unknown names in `options.hues` are skipped with a warning.
#[must_use]
pub fn validate_contrast(palette: &Palette, options: &ValidateOptions) -> ContrastReport {
    let selected: Vec<&Scale> = if options.hues.is_empty() {
        palette.scales.values().collect()
    } else {
        options
            .hues
            .iter()
            .filter_map(|name| {
                let scale = palette.scale(name);
                if scale.is_none() {
                    warn!(hue = %name, "unknown hue skipped in contrast validation");
                }
                scale
            })
            .collect()
    };

    let mut report = ContrastReport {
        mode: palette.mode,
        total_checks: 0,
        passed_checks: 0,
        issues: Vec::new(),
    };

    for scale in selected {
        for (role, text_step, background_step) in TEXT_CHECKS {
            let actual = apca_contrast(scale.color(text_step), scale.color(background_step)).abs();
            record(&mut report, scale, role, Some(text_step), background_step, actual);
        }
        if !options.errors_only {
            let actual = apca_contrast(hued_color::Color::WHITE, scale.color(SOLID_STEP)).abs();
            record(&mut report, scale, TextRole::OnSolid, None, SOLID_STEP, actual);
        }
    }

    report
}

fn record(
    report: &mut ContrastReport,
    scale: &Scale,
    role: TextRole,
    text_step: Option<u8>,
    background_step: u8,
    actual: f64,
) {
    report.total_checks += 1;
    let expected = role.required();
    if actual >= expected {
        report.passed_checks += 1;
        return;
    }
    report.issues.push(ContrastIssue {
        hue: scale.name.clone(),
        mode: scale.mode,
        role,
        text_step,
        background_step,
        expected,
        actual,
        severity: role.severity(),
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
