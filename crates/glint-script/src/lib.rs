//! Glint Script - Rhai scripting host
//!
//! Connects a Rhai script to the glint frame loop:
//! - `ScriptEngine` - compiles and evaluates the script, calls its callbacks
//! - `ScriptSystem` - implements `ScriptHost` so a `FrameDriver` can drive it
//!
//! A script calls `run(#{ ... })` at top level to request a window and register
//! its `init`/`frame` callbacks. During callbacks it reads input, time, and
//! surface size, and may call `quit()` or `clear(r, g, b, a)`.

pub mod api;
pub mod context;
pub mod engine;
pub mod loader;

pub use context::ScriptCommand;
use engine::{apply_commands, ScriptEngine};
use glint_core::{Result, WindowConfig};
use glint_runtime::{AppContext, LoopControl, RunConfig, ScriptHost};
use std::path::Path;

/// Default clear color until the script sets one
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Top-level scripting system integrating the engine with the frame driver
pub struct ScriptSystem {
    pub engine: ScriptEngine,
    clear_color: [f32; 4],
}

impl Default for ScriptSystem {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

impl ScriptSystem {
    pub fn new(window_defaults: WindowConfig) -> Self {
        Self {
            engine: ScriptEngine::new(window_defaults),
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }

    /// Load a script file and evaluate its top level
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        self.engine.load_file(path)?;
        log::info!("Loaded script: {}", path.display());
        self.engine.evaluate()
    }

    /// Load a script from source and evaluate its top level
    pub fn load_source(&mut self, source: &str, name: &str) -> Result<()> {
        self.engine.load_source(source, name)?;
        self.engine.evaluate()
    }

    /// Window settings from the script's `run` call, if any
    pub fn run_config(&self) -> Option<RunConfig> {
        self.engine.run_config()
    }

    /// Color the next frame should be cleared to
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Apply queued commands. A quit queued before a failing frame still quits.
    fn finish_call(&mut self, result: Result<()>) -> Result<LoopControl> {
        let control = apply_commands(self.engine.drain_commands(), &mut self.clear_color);
        match result {
            Ok(()) => Ok(control),
            Err(e) if control == LoopControl::Quit => {
                log::error!("{}", e);
                Ok(LoopControl::Quit)
            }
            Err(e) => Err(e),
        }
    }
}

impl ScriptHost for ScriptSystem {
    fn invoke_init(&mut self, app: &AppContext) -> Result<LoopControl> {
        self.engine.provide_context(app);
        let result = self.engine.call_init();
        let control = apply_commands(self.engine.drain_commands(), &mut self.clear_color);
        result.map(|_| control)
    }

    fn invoke_frame(&mut self, app: &AppContext) -> Result<LoopControl> {
        self.engine.provide_context(app);
        let result = self.engine.call_frame();
        self.finish_call(result)
    }

    fn drain_completions(&mut self, app: &AppContext) -> Result<LoopControl> {
        if self.engine.pending_completions() == 0 {
            return Ok(LoopControl::Continue);
        }
        self.engine.provide_context(app);
        self.engine.deliver_completions();
        self.finish_call(Ok(()))
    }

    fn cleanup(&mut self) {
        log::debug!("script host cleanup ({})", self.engine.source_path());
        self.engine.drain_commands();
    }
}
