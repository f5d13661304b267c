//! Script host trait

use crate::driver::AppContext;
use glint_core::Result;

/// What the loop should do after a callback returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    /// The script asked to quit; no further frames run after this tick
    Quit,
}

/// The embedded script, as seen by the frame driver.
///
/// The driver never touches engine internals; it only calls these hooks in the
/// fixed tick order and handles their errors. Every hook receives the app
/// state read-only.
pub trait ScriptHost {
    /// Called once when the driver starts, before any frame
    fn invoke_init(&mut self, app: &AppContext) -> Result<LoopControl>;

    /// Called once per tick, while edge states are still visible
    fn invoke_frame(&mut self, app: &AppContext) -> Result<LoopControl>;

    /// Deliver deferred completions queued since the last tick
    fn drain_completions(&mut self, _app: &AppContext) -> Result<LoopControl> {
        Ok(LoopControl::Continue)
    }

    /// Called once when the driver shuts down
    fn cleanup(&mut self) {}
}
