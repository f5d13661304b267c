//! Host configuration loaded from `glint.toml`
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! usable configuration. Script-supplied `run` settings take precedence over
//! the `[window]` values here; these only fill in what the script omits.

use crate::error::{GlintError, Result};
use serde::Deserialize;
use std::path::Path;

/// File name looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "glint.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlintConfig {
    pub window: WindowConfig,
    pub log: LogConfig,
}

/// Window fallbacks for fields a script's `run` config leaves out
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            width: 640,
            height: 480,
            vsync: true,
        }
    }
}

/// Logging defaults, overridden by `RUST_LOG`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl GlintConfig {
    /// Parse a configuration from TOML source
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GlintConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    ///
    /// With `explicit == false` a missing file is not an error and defaults are
    /// returned; an explicitly requested file must exist.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !path.exists() {
            if explicit {
                return Err(GlintError::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(GlintError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }
}
