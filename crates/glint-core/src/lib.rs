//! Glint Core - Foundational types for the glint script host
//!
//! This crate provides the types every other glint crate depends on:
//! - `GlintError` and the `Result` alias
//! - `GlintConfig` - TOML configuration with window and logging defaults

mod config;
mod error;

pub use config::{GlintConfig, LogConfig, WindowConfig, DEFAULT_CONFIG_FILE};
pub use error::{GlintError, Result};
