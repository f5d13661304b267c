//! Player application implementing winit ApplicationHandler
//!
//! Owns the window, the wgpu surface and the frame driver. Platform events are
//! fed into the driver's input state as they arrive; each redraw runs one tick
//! and presents the script's clear color.

use crate::render::RenderContext;
use glint_core::{GlintError, Result};
use glint_runtime::{FrameDriver, Key, RunConfig, PRIMARY_BUTTON};
use glint_script::ScriptSystem;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

pub struct PlayerApp {
    pub driver: FrameDriver,
    pub scripts: ScriptSystem,
    run_config: RunConfig,
    vsync: bool,

    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,

    /// First error that ended the run abnormally
    fatal: Option<GlintError>,
}

impl PlayerApp {
    pub fn new(scripts: ScriptSystem, run_config: RunConfig, vsync: bool) -> Self {
        Self {
            driver: FrameDriver::new(),
            scripts,
            run_config,
            vsync,
            window: None,
            render_context: None,
            fatal: None,
        }
    }

    /// Consume the app after the event loop returns
    pub fn finish(mut self) -> Result<()> {
        self.driver.shutdown(&mut self.scripts);
        match self.fatal {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.run_config.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.run_config.width,
                self.run_config.height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| GlintError::Window(e.to_string()))?,
        );
        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window.clone(), self.vsync))?;
        let size = window.inner_size();
        self.driver.set_surface_size(size.width, size.height);
        self.render_context = Some(render_context);

        log::info!(
            "Window '{}' {}x{}",
            self.run_config.title,
            size.width,
            size.height
        );

        self.driver.start(&mut self.scripts)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: GlintError) {
        log::error!("{}", error);
        self.fatal.get_or_insert(error);
        self.driver.request_quit();
        event_loop.exit();
    }

    /// Query the drawable size from the window so callbacks see the latest
    fn refresh_surface_size(&mut self) {
        if let Some(window) = &self.window {
            let size = window.inner_size();
            self.driver.set_surface_size(size.width, size.height);
        }
    }

    fn render(&mut self) {
        let Some(context) = &mut self.render_context else {
            return;
        };
        context.clear(self.scripts.clear_color());
    }
}

/// Key table entry for a keyboard event. Synthetic events (held keys replayed
/// on focus gain) are dropped.
fn tracked_key(physical_key: PhysicalKey, is_synthetic: bool) -> Option<Key> {
    if is_synthetic {
        return None;
    }
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };
    let key = Key::from_winit(code);
    if key.is_none() {
        log::trace!("ignoring untracked key {:?}", code);
    }
    key
}

/// Pointer button index as seen by the input table
fn pointer_button(button: MouseButton) -> Option<u32> {
    match button {
        MouseButton::Left => Some(PRIMARY_BUTTON),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        _ => None,
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.driver.request_quit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                }
                self.refresh_surface_size();
            }

            WindowEvent::KeyboardInput {
                event,
                is_synthetic,
                ..
            } => {
                let Some(key) = tracked_key(event.physical_key, is_synthetic) else {
                    return;
                };
                let input = self.driver.input_mut();
                match event.state {
                    ElementState::Pressed => input.process_key_down(key, event.repeat),
                    ElementState::Released => input.process_key_up(key),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(btn) = pointer_button(button) else {
                    return;
                };
                let input = self.driver.input_mut();
                match state {
                    ElementState::Pressed => input.process_pointer_down(btn),
                    ElementState::Released => input.process_pointer_up(btn),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.driver
                    .input_mut()
                    .process_pointer_move(position.x, position.y);
            }

            WindowEvent::RedrawRequested => {
                self.refresh_surface_size();
                if self.driver.tick(&mut self.scripts) {
                    self.render();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.driver.is_running() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        } else if self.window.is_some() {
            self.driver.shutdown(&mut self.scripts);
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.driver.shutdown(&mut self.scripts);
    }
}
