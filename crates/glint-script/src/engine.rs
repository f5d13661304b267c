//! ScriptEngine - Rhai engine setup, script evaluation, callback invocation
//!
//! Wraps rhai::Engine with all API functions registered. Holds the compiled
//! script and its top-level scope, and calls the `init`/`frame` callbacks
//! recorded by `run`.

use crate::api;
use crate::context::{RunRequest, ScriptCallContext, ScriptCommand};
use glint_core::{GlintError, Result, WindowConfig};
use glint_runtime::{AppContext, LoopControl, RunConfig};
use rhai::{Dynamic, Engine, FnPtr, Scope, AST};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// The scripting engine - owns the Rhai Engine and the loaded script
pub struct ScriptEngine {
    engine: Engine,
    pub ctx: Arc<Mutex<ScriptCallContext>>,
    ast: AST,
    scope: Scope<'static>,
    source_path: String,
}

impl ScriptEngine {
    pub fn new(window_defaults: WindowConfig) -> Self {
        let ctx = Arc::new(Mutex::new(ScriptCallContext::new(window_defaults)));
        let mut engine = Engine::new();

        // Register all API functions
        api::register_all(&mut engine, ctx.clone());

        Self {
            engine,
            ctx,
            ast: AST::empty(),
            scope: Scope::new(),
            source_path: String::new(),
        }
    }

    /// Compile a Rhai source string into an AST
    pub fn compile(&self, source: &str) -> Result<AST> {
        self.engine
            .compile(source)
            .map_err(|e| GlintError::ScriptCompile(e.to_string()))
    }

    /// Compile source and make it the loaded script
    pub fn load_source(&mut self, source: &str, source_path: &str) -> Result<()> {
        let mut ast = self.compile(source)?;
        ast.set_source(source_path);
        self.ast = ast;
        self.scope = Scope::new();
        self.source_path = source_path.to_string();
        Ok(())
    }

    /// Read, compile, and load a script file. Relative load paths used by the
    /// script resolve against the file's directory.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let source = std::fs::read_to_string(path)?;
        self.load_source(&source, &path.display().to_string())?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let mut c = self.ctx.lock().unwrap();
        c.base_dir = base.to_path_buf();
        Ok(())
    }

    /// Evaluate the script's top level, where it is expected to call `run`
    pub fn evaluate(&mut self) -> Result<()> {
        self.engine
            .run_ast_with_scope(&mut self.scope, &self.ast)
            .map_err(|e| GlintError::script("top level", e))
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Window settings from `run`, if the script called it
    pub fn run_config(&self) -> Option<RunConfig> {
        let c = self.ctx.lock().unwrap();
        c.run_request.as_ref().map(|r| r.config.clone())
    }

    fn run_request(&self) -> Result<RunRequest> {
        let c = self.ctx.lock().unwrap();
        c.run_request.clone().ok_or(GlintError::NoRunRequested)
    }

    /// Copy the driver's state into the context for the next callback
    pub fn provide_context(&self, app: &AppContext) {
        let mut c = self.ctx.lock().unwrap();
        c.app = app.clone();
    }

    /// Call the `init` callback, if one was given
    pub fn call_init(&mut self) -> Result<()> {
        match self.run_request()?.init {
            Some(init) => self.call_callback("init", &init, ()),
            None => Ok(()),
        }
    }

    /// Call the `frame` callback
    pub fn call_frame(&mut self) -> Result<()> {
        let frame = self.run_request()?.frame;
        self.call_callback("frame", &frame, ())
    }

    /// Hand queued load results to their callbacks.
    ///
    /// Loads started by these callbacks are delivered on the next drain. Every
    /// completion is delivered; each failing callback is logged where it fails.
    /// Returns the number of callbacks that failed.
    pub fn deliver_completions(&mut self) -> usize {
        let pending = {
            let mut c = self.ctx.lock().unwrap();
            std::mem::take(&mut c.completions)
        };

        let mut failed = 0;
        for completion in pending {
            let name = format!("load callback ({})", completion.source);
            if let Err(e) = self.call_callback(&name, &completion.callback, (completion.value,)) {
                log::error!("{}", e);
                failed += 1;
            }
        }
        failed
    }

    fn call_callback(
        &mut self,
        name: &str,
        callback: &FnPtr,
        args: impl rhai::FuncArgs,
    ) -> Result<()> {
        callback
            .call::<Dynamic>(&self.engine, &self.ast, args)
            .map(|_| ())
            .map_err(|e| GlintError::script(name, e))
    }

    /// Drain all accumulated script commands
    pub fn drain_commands(&self) -> Vec<ScriptCommand> {
        let mut c = self.ctx.lock().unwrap();
        std::mem::take(&mut c.commands)
    }

    /// Number of load results waiting for the next drain
    pub fn pending_completions(&self) -> usize {
        self.ctx.lock().unwrap().completions.len()
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

/// Fold drained commands into a loop decision, keeping the last clear color
pub(crate) fn apply_commands(commands: Vec<ScriptCommand>, clear_color: &mut [f32; 4]) -> LoopControl {
    let mut control = LoopControl::Continue;
    for command in commands {
        match command {
            ScriptCommand::Quit => control = LoopControl::Quit,
            ScriptCommand::Clear { color } => *clear_color = color,
        }
    }
    control
}
