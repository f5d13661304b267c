//! Script execution context and command types
//!
//! ScriptCallContext is the shared state read and written by Rhai API functions.
//! ScriptCommand represents deferred requests collected during a script call.

use glint_core::WindowConfig;
use glint_runtime::{AppContext, RunConfig};
use rhai::{Dynamic, FnPtr};
use std::path::{Path, PathBuf};

/// Deferred requests produced by scripts, drained after each callback
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Quit,
    Clear { color: [f32; 4] },
}

/// A recorded `run(config)` call
#[derive(Clone)]
pub struct RunRequest {
    pub config: RunConfig,
    pub init: Option<FnPtr>,
    pub frame: FnPtr,
}

/// A finished load waiting to be handed to its callback on the next tick
#[derive(Clone)]
pub struct Completion {
    pub callback: FnPtr,
    pub value: Dynamic,
    /// Path that was loaded, for error messages
    pub source: String,
}

/// Shared context read by registered Rhai functions.
///
/// `app` is a copy of the driver's state taken right before each callback, so
/// scripts can never write input or clock state.
pub struct ScriptCallContext {
    pub app: AppContext,
    pub commands: Vec<ScriptCommand>,
    pub run_request: Option<RunRequest>,
    pub completions: Vec<Completion>,
    /// Fallbacks for `run` fields the script leaves out
    pub window_defaults: WindowConfig,
    /// Relative load paths resolve against this directory
    pub base_dir: PathBuf,
}

impl Default for ScriptCallContext {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

impl ScriptCallContext {
    pub fn new(window_defaults: WindowConfig) -> Self {
        Self {
            app: AppContext::default(),
            commands: Vec::new(),
            run_request: None,
            completions: Vec::new(),
            window_defaults,
            base_dir: PathBuf::from("."),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
