// SPDX-License-Identifier: MIT
//
// Output of one run: per mode, the palette, its contrast report and
// optionally the alpha variants. Serialized as-is for `--json`, or laid out
// as a terminal listing:
//
//   light · 31 hues · anchored: orange
//   tuning: hue +0.8°, chroma ×1.12, lightness +0.000
//
//     gray       #fcfcfc #f9f9f9 … #202020
//     orange     #fefcfb #fff7ed … [#ff6a00] … #582d1d
//
//   contrast: 155 of 155 checks passed
//
// The bracketed swatch is the step pinned to a brand color.

use std::fmt::Write as _;

use hued_palette::{
    AlphaColor, ContrastIssue, ContrastReport, Palette, Scale, ScaleNote, Severity, alpha_scale,
};
use serde::Serialize;

/// Everything produced for one mode.
#[derive(Debug, Serialize)]
pub struct ModeOutput {
    pub palette: Palette,
    pub contrast: ContrastReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Vec<AlphaRow>>,
}

/// Alpha variants of one scale, as `#rrggbbaa`.
#[derive(Debug, Serialize)]
pub struct AlphaRow {
    pub hue: String,
    pub steps: Vec<String>,
}

impl ModeOutput {
    pub fn new(palette: Palette, contrast: ContrastReport, with_alpha: bool) -> Self {
        let alpha = with_alpha.then(|| {
            palette
                .scales
                .values()
                .map(|scale| AlphaRow {
                    hue: scale.name.clone(),
                    steps: alpha_scale(scale).into_iter().map(AlphaColor::to_hex).collect(),
                })
                .collect()
        });
        Self {
            palette,
            contrast,
            alpha,
        }
    }
}

// ─── Text listing ───────────────────────────────────────────────────────────

const NAME_WIDTH: usize = 10;

pub fn text(outputs: &[ModeOutput]) -> String {
    let mut out = String::new();
    for (i, output) in outputs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_mode(&mut out, output);
    }
    out
}

fn write_mode(out: &mut String, output: &ModeOutput) {
    let palette = &output.palette;
    let tuning = &palette.tuning;

    let _ = write!(out, "{} · {} hues", palette.mode, palette.stats.hue_count);
    if !palette.anchored.is_empty() {
        let _ = write!(out, " · anchored: {}", palette.anchored.join(", "));
    }
    if !palette.custom.is_empty() {
        let _ = write!(out, " · custom: {}", palette.custom.join(", "));
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "tuning: hue {:+.1}°, chroma ×{:.2}, lightness {:+.3}",
        tuning.hue_shift, tuning.chroma_multiplier, tuning.lightness_shift
    );
    for row in &tuning.custom_rows {
        let _ = writeln!(
            out,
            "{}: {} ({}, nearest {})",
            row.row_key,
            row.source,
            row.reason.name(),
            row.nearest
        );
    }
    for conflict in &tuning.conflicts {
        let _ = writeln!(out, "conflict: {} ← {}", conflict.slot, conflict.inputs.join(", "));
    }
    out.push('\n');

    let alpha = output.alpha.as_deref().unwrap_or_default();
    for scale in palette.scales.values() {
        write_scale(out, scale);
        if let Some(row) = alpha.iter().find(|row| row.hue == scale.name) {
            let _ = writeln!(out, "  {:NAME_WIDTH$} {}", "", row.steps.join(" "));
        }
    }
    out.push('\n');

    write_report(out, &output.contrast);
}

fn write_scale(out: &mut String, scale: &Scale) {
    let _ = write!(out, "  {:NAME_WIDTH$}", scale.name);
    for step in &scale.steps {
        if step.pinned {
            let _ = write!(out, " [{}]", step.hex);
        } else {
            let _ = write!(out, " {}", step.hex);
        }
    }
    out.push('\n');

    for note in &scale.notes {
        match note {
            ScaleNote::ContrastShortfall {
                step,
                required,
                achieved,
            } => {
                let _ = writeln!(
                    out,
                    "  {:NAME_WIDTH$} ! step {step} reaches Lc {achieved:.1} of {required:.0}",
                    ""
                );
            }
            ScaleNote::LowWhiteTextContrast { contrast } => {
                let _ = writeln!(
                    out,
                    "  {:NAME_WIDTH$} ~ white on 9 is Lc {contrast:.1}, use {}",
                    "", scale.contrast_text
                );
            }
        }
    }
}

fn write_report(out: &mut String, report: &ContrastReport) {
    let _ = writeln!(
        out,
        "contrast: {} of {} checks passed",
        report.passed_checks, report.total_checks
    );
    for issue in &report.issues {
        let _ = writeln!(out, "  {}", describe_issue(issue));
    }
}

fn describe_issue(issue: &ContrastIssue) -> String {
    let level = match issue.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    let pair = match issue.text_step {
        Some(step) => format!("{step} on {}", issue.background_step),
        None => format!("white on {}", issue.background_step),
    };
    format!(
        "{level:7} {:NAME_WIDTH$} {pair:10} Lc {:.1} < {:.0}",
        issue.hue, issue.actual, issue.expected
    )
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use hued_palette::{Mode, ValidateOptions, generate_palette, validate_contrast};
    use pretty_assertions::assert_eq;

    fn output(colors: &[&str], mode: Mode, with_alpha: bool) -> ModeOutput {
        let palette = generate_palette(colors, mode, None).unwrap();
        let report = validate_contrast(&palette, &ValidateOptions::default());
        ModeOutput::new(palette, report, with_alpha)
    }

    #[test]
    fn listing_marks_pinned_step() {
        let text = text(&[output(&["#FF6A00"], Mode::Light, false)]);
        assert!(text.starts_with("light · 31 hues · anchored: orange\n"));
        assert!(text.contains("[#ff6a00]"));
        assert!(text.contains("contrast: "));
        assert_eq!(text.matches('[').count(), 1);
    }

    #[test]
    fn listing_names_custom_rows() {
        let text = text(&[output(&["#39FF14"], Mode::Light, false)]);
        assert!(text.contains("custom: custom-1"));
        assert!(text.contains("custom-1: #39ff14 (neon, nearest grass)"));
    }

    #[test]
    fn alpha_rows_only_when_requested() {
        let without = output(&["#1E90FF"], Mode::Light, false);
        assert!(without.alpha.is_none());

        let with = output(&["#1E90FF"], Mode::Light, true);
        let rows = with.alpha.as_ref().unwrap();
        assert_eq!(rows.len(), 31);
        assert!(rows.iter().all(|row| row.steps.len() == 12 && row.steps[0].len() == 9));
    }

    #[test]
    fn json_skips_missing_alpha() {
        let json = serde_json::to_value(output(&["#1E90FF"], Mode::Dark, false)).unwrap();
        assert!(json.get("alpha").is_none());
        assert_eq!(json["palette"]["mode"], "dark");
        assert_eq!(json["contrast"]["total_checks"], 31 * 5);
    }

    #[test]
    fn both_modes_are_separated() {
        let text = text(&[
            output(&["#1E90FF"], Mode::Light, false),
            output(&["#1E90FF"], Mode::Dark, false),
        ]);
        assert!(text.contains("\n\ndark · 31 hues"));
    }
}
