// SPDX-License-Identifier: MIT
//
// Command-line surface.
//
//   hued [--config FILE] [--mode light|dark|both] [--json] [--alpha]
//        [--errors-only] [--hue NAME]... [COLOR...]
//
// Flags only ever override; anything left unset defers
// to the config file (see `Config::with_args`).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hued_palette::Mode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "hued")]
#[command(
    version,
    about = "Generate 12-step light/dark palettes anchored on up to 7 brand colors",
    long_about = None,
    after_help = "Colors: #rgb, #rrggbb, #rrggbbaa, rgb(...) or oklch(...)\n\
                  Logging: set HUED_LOG (e.g. HUED_LOG=debug) to trace the analysis on stderr"
)]
pub struct Args {
    /// Read settings from FILE (default: ./hued.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Appearance modes to generate (default: both)
    #[arg(long, value_enum, ignore_case = true)]
    pub mode: Option<ModeArg>,

    /// Print palettes and contrast reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Include translucent variants of every step
    #[arg(long)]
    pub alpha: bool,

    /// Skip the advisory white-on-solid contrast check
    #[arg(long)]
    pub errors_only: bool,

    /// Validate only this hue (repeatable)
    #[arg(long = "hue", value_name = "NAME")]
    pub hues: Vec<String>,

    /// Brand colors; replace `brand_colors` from the config file
    #[arg(value_name = "COLOR")]
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Light,
    Dark,
    Both,
}

impl ModeArg {
    #[must_use]
    pub fn modes(self) -> Vec<Mode> {
        match self {
            Self::Light => vec![Mode::Light],
            Self::Dark => vec![Mode::Dark],
            Self::Both => Mode::all().to_vec(),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
