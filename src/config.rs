// src/config.rs

//! Manages configuration for the `treedoc` binary: loading from TOML and validation.

use crate::core::codec::pretty::DEFAULT_INDENT;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::warn;

/// The largest accepted indentation width.
pub const MAX_INDENT_WIDTH: usize = 16;

const KNOWN_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// The main configuration struct.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// A `tracing` filter directive, e.g. `"info"` or `"treedoc=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Spaces per nesting level in pretty-printed output.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    /// Sort every array whose elements share one variant before printing.
    #[serde(default)]
    pub sort_arrays: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_indent_width() -> usize {
    DEFAULT_INDENT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            indent_width: default_indent_width(),
            sort_arrays: false,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file and validates it.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from '{path}'"))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.indent_width == 0 || self.indent_width > MAX_INDENT_WIDTH {
            return Err(anyhow!(
                "indent_width must be between 1 and {MAX_INDENT_WIDTH}, got {}",
                self.indent_width
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err(anyhow!("log_level cannot be empty"));
        }
        let level = self.log_level.trim().to_ascii_lowercase();
        if !level.contains('=') && !KNOWN_LOG_LEVELS.contains(&level.as_str()) {
            warn!(
                "unrecognized log_level '{}'; it will be used as a raw filter directive",
                self.log_level
            );
        }
        Ok(())
    }
}
