// SPDX-License-Identifier: MIT
//
// Run configuration: `hued.toml` merged with command-line overrides.
//
//   brand_colors = ["#FF6A00", "#1E90FF"]
//   modes = ["light", "dark"]
//
//   [validation]
//   hues = []          # empty = all
//   errors_only = false
//
//   [output]
//   json = false
//   alpha = false
//
// Every key is optional. A missing `hued.toml` in the working directory
// means defaults; a file named with `--config` must exist and parse.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hued_palette::{Mode, ValidateOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{Args, ModeArg};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "hued.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub brand_colors: Vec<String>,
    /// Modes to generate, in output order.
    pub modes: Vec<Mode>,
    pub validation: ValidateOptions,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Emit JSON instead of the text listing.
    pub json: bool,
    /// Include alpha variants of every scale.
    pub alpha: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brand_colors: Vec::new(),
            modes: Mode::all().to_vec(),
            validation: ValidateOptions::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            Self::read(default)
        } else {
            debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        debug!(path = %path.display(), colors = config.brand_colors.len(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply command-line overrides. Colors given on the command line
    /// replace the configured list; flags only ever switch options on.
    #[must_use]
    pub fn with_args(mut self, args: Args) -> Self {
        if !args.colors.is_empty() {
            self.brand_colors = args.colors;
        }
        if let Some(mode) = args.mode {
            self.modes = mode.modes();
        }
        if !args.hues.is_empty() {
            self.validation.hues = args.hues;
        }
        self.validation.errors_only |= args.errors_only;
        self.output.json |= args.json;
        self.output.alpha |= args.alpha;
        self
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
