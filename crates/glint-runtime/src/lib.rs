//! Glint Runtime - Frame loop infrastructure
//!
//! Provides the building blocks the platform layer drives every frame:
//! - `ButtonState` - five-state edge/level automaton for one button
//! - `Key` - fixed key table, name lookup, and winit translation
//! - `InputState` - keyboard table plus the primary pointer button
//! - `GameClock` - elapsed time and per-frame delta
//! - `FrameDriver` / `ScriptHost` - lifecycle and per-tick ordering

mod button;
mod clock;
mod driver;
mod host;
mod input;
mod key;

pub use button::ButtonState;
pub use clock::GameClock;
pub use driver::{AppContext, DriverState, FrameDriver, RunConfig};
pub use host::{LoopControl, ScriptHost};
pub use input::{InputState, PRIMARY_BUTTON};
pub use key::Key;
