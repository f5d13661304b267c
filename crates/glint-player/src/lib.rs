//! Glint Player - window host library
//!
//! This crate provides the `PlayerApp` application handler
//! that runs a glint script in a winit window.

mod player_app;
mod render;

pub use player_app::PlayerApp;
pub use render::RenderContext;
