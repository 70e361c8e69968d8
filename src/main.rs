// SPDX-License-Identifier: MIT
//
// hued — brand-aware palette generator.
//
// This is the driver that wires the library crates to a command line:
//
//   hued-color   → color parsing, OKLCH math, gamut mapping
//   hued-palette → brand analysis, scale generation, contrast audit, alpha
//
// One run flows through:
//
//   args + hued.toml → Config → per mode: generate_palette → validate_contrast
//   → text listing or JSON on stdout
//
// Logs go to stderr, filtered by HUED_LOG (default `warn`), so stdout stays
// clean for `--json`.

mod cli;
mod config;
mod render;

use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Parser;
use hued_palette::{PaletteError, generate_palette, validate_contrast};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::config::Config;
use crate::render::ModeOutput;

// ─── Logging ────────────────────────────────────────────────────────────────

const LOG_ENV: &str = "HUED_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ─── Run ────────────────────────────────────────────────────────────────────

fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?.with_args(args);
    if config.brand_colors.is_empty() {
        // Same error the library gives, before any mode is attempted.
        return Err(PaletteError::EmptyInput.into());
    }
    if config.modes.is_empty() {
        bail!("no modes to generate; set `modes` or pass --mode");
    }
    debug!(?config, "resolved configuration");

    let mut outputs = Vec::with_capacity(config.modes.len());
    for &mode in &config.modes {
        let palette = generate_palette(&config.brand_colors, mode, None)?;
        let report = validate_contrast(&palette, &config.validation);
        info!(
            mode = %mode,
            passed = report.passed_checks,
            total = report.total_checks,
            "contrast validated"
        );
        outputs.push(ModeOutput::new(palette, report, config.output.alpha));
    }

    if config.output.json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        print!("{}", render::text(&outputs));
    }
    Ok(())
}

/// One line per distinct message in the error chain, plus the suggested fix
/// for a malformed color.
fn describe(err: &anyhow::Error) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
    }
    if let Some(suggestion) = err.downcast_ref::<PaletteError>().and_then(PaletteError::suggestion) {
        message.push_str(&format!("\n  did you mean '{suggestion}'?"));
    }
    message
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", describe(&err));
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
