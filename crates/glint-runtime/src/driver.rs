//! Frame driver: lifecycle and the fixed per-tick ordering
//!
//! The driver owns all input and timing state. Platform events are applied to
//! it as they arrive (through [`FrameDriver::input_mut`]); scripts only see it
//! read-only through [`ScriptHost`] callbacks. Each tick runs, in order:
//!
//! 1. deferred completions
//! 2. the frame callback (edge states visible)
//! 3. clock advance
//! 4. input decay (edges collapse to levels)

use crate::clock::GameClock;
use crate::host::{LoopControl, ScriptHost};
use crate::input::InputState;
use glint_core::{GlintError, Result};
use std::time::Instant;

/// Window settings requested by the script's `run` call
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Lifecycle of a [`FrameDriver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    Running,
    Terminating,
}

/// State exposed read-only to script callbacks
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub input: InputState,
    pub clock: GameClock,
    /// Current drawable size in physical pixels
    pub surface_size: (u32, u32),
}

impl AppContext {
    pub fn time(&self) -> f64 {
        self.clock.total_time
    }

    pub fn dt(&self) -> f64 {
        self.clock.delta_time
    }

    pub fn width(&self) -> u32 {
        self.surface_size.0
    }

    pub fn height(&self) -> u32 {
        self.surface_size.1
    }

    pub fn mouse_x(&self) -> f64 {
        self.input.pointer_position.0
    }

    pub fn mouse_y(&self) -> f64 {
        self.input.pointer_position.1
    }
}

/// Drives a [`ScriptHost`] through init, ticks, and shutdown
pub struct FrameDriver {
    app: AppContext,
    state: DriverState,
    frame_count: u64,
    cleaned_up: bool,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            app: AppContext::default(),
            state: DriverState::Uninitialized,
            frame_count: 0,
            cleaned_up: false,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn app(&self) -> &AppContext {
        &self.app
    }

    /// Mutable input for platform event delivery
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.app.input
    }

    /// Record the latest drawable size reported by the platform
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.app.surface_size = (width, height);
    }

    /// Number of completed ticks
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Enter `Running` and call the init hook.
    ///
    /// Starting twice is an error. A failing init hook is fatal: the driver
    /// moves to `Terminating` and the error is returned.
    pub fn start<H: ScriptHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        self.start_at(host, Instant::now())
    }

    pub fn start_at<H: ScriptHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> Result<()> {
        if self.state != DriverState::Uninitialized {
            return Err(GlintError::AlreadyRunning);
        }

        self.app.input.reset();
        self.app.clock.start_at(now);
        self.state = DriverState::Running;
        log::debug!("frame driver running");

        match host.invoke_init(&self.app) {
            Ok(LoopControl::Continue) => Ok(()),
            Ok(LoopControl::Quit) => {
                self.request_quit();
                Ok(())
            }
            Err(e) => {
                self.state = DriverState::Terminating;
                Err(e)
            }
        }
    }

    /// Run one tick. Returns whether the driver is still running afterwards.
    pub fn tick<H: ScriptHost + ?Sized>(&mut self, host: &mut H) -> bool {
        self.tick_at(host, Instant::now())
    }

    pub fn tick_at<H: ScriptHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> bool {
        if self.state != DriverState::Running {
            return false;
        }

        let mut control = recover(host.drain_completions(&self.app));
        if control == LoopControl::Continue {
            control = recover(host.invoke_frame(&self.app));
        }

        self.app.clock.advance_to(now);
        self.app.input.decay_frame();
        self.frame_count += 1;

        if control == LoopControl::Quit {
            self.request_quit();
        }
        self.is_running()
    }

    /// Stop ticking after the current tick. Idempotent.
    pub fn request_quit(&mut self) {
        if self.state == DriverState::Running {
            log::info!("quit requested after {} frames", self.frame_count);
            self.state = DriverState::Terminating;
        }
    }

    /// Run the host's cleanup hook once, if the driver was ever started
    pub fn shutdown<H: ScriptHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == DriverState::Uninitialized || self.cleaned_up {
            return;
        }
        self.state = DriverState::Terminating;
        self.cleaned_up = true;
        host.cleanup();
    }
}

/// Script failures inside the loop are logged and the loop carries on
fn recover(result: Result<LoopControl>) -> LoopControl {
    result.unwrap_or_else(|e| {
        log::error!("{}", e);
        LoopControl::Continue
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use crate::ButtonState;
    use std::time::Duration;

    /// Records what each callback observed
    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<&'static str>,
        observed_a: Vec<ButtonState>,
        observed_time: Vec<(f64, f64)>,
        quit_on_frame: Option<usize>,
        fail_init: bool,
        fail_frames: bool,
        quit_on_completion: bool,
        cleanups: usize,
    }

    impl ScriptHost for RecordingHost {
        fn invoke_init(&mut self, app: &AppContext) -> Result<LoopControl> {
            self.calls.push("init");
            self.observed_time.push((app.time(), app.dt()));
            if self.fail_init {
                return Err(GlintError::script("init", "boom"));
            }
            Ok(LoopControl::Continue)
        }

        fn invoke_frame(&mut self, app: &AppContext) -> Result<LoopControl> {
            self.calls.push("frame");
            self.observed_a.push(app.input.named_key_state("a"));
            self.observed_time.push((app.time(), app.dt()));
            if self.fail_frames {
                return Err(GlintError::script("frame", "boom"));
            }
            let frames = self.calls.iter().filter(|c| **c == "frame").count();
            if self.quit_on_frame == Some(frames) {
                return Ok(LoopControl::Quit);
            }
            Ok(LoopControl::Continue)
        }

        fn drain_completions(&mut self, _app: &AppContext) -> Result<LoopControl> {
            self.calls.push("completions");
            if self.quit_on_completion {
                return Ok(LoopControl::Quit);
            }
            Ok(LoopControl::Continue)
        }

        fn cleanup(&mut self) {
            self.cleanups += 1;
        }
    }

    #[test]
    fn test_start_calls_init_once() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost::default();
        assert_eq!(driver.state(), DriverState::Uninitialized);

        driver.start(&mut host).unwrap();
        assert_eq!(driver.state(), DriverState::Running);
        assert_eq!(host.calls, vec!["init"]);
        assert_eq!(host.observed_time, vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_second_start_is_error() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost::default();
        driver.start(&mut host).unwrap();
        let err = driver.start(&mut host).unwrap_err();
        assert!(matches!(err, GlintError::AlreadyRunning));
        assert_eq!(host.calls, vec!["init"]);
    }

    #[test]
    fn test_init_failure_is_fatal() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost {
            fail_init: true,
            ..Default::default()
        };
        assert!(driver.start(&mut host).is_err());
        assert_eq!(driver.state(), DriverState::Terminating);
        assert!(!driver.tick(&mut host));
        assert_eq!(host.calls, vec!["init"]);
    }

    #[test]
    fn test_tick_order() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost::default();
        driver.start(&mut host).unwrap();
        assert!(driver.tick(&mut host));
        assert!(driver.tick(&mut host));
        assert_eq!(
            host.calls,
            vec!["init", "completions", "frame", "completions", "frame"]
        );
        assert_eq!(driver.frame_count(), 2);
    }

    #[test]
    fn test_frame_sees_edge_before_decay() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost::default();
        driver.start(&mut host).unwrap();

        driver.input_mut().process_key_down(Key::KeyA, false);
        driver.tick(&mut host);

        assert_eq!(host.observed_a, vec![ButtonState::Pressed]);
        assert!(!driver.app().input.is_key_pressed("a"));
        assert!(driver.app().input.is_key_down("a"));

        driver.tick(&mut host);
        assert_eq!(host.observed_a[1], ButtonState::Down);
    }

    #[test]
    fn test_release_visible_for_one_frame() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost::default();
        driver.start(&mut host).unwrap();

        driver.input_mut().process_key_down(Key::KeyA, false);
        driver.tick(&mut host);
        driver.input_mut().process_key_up(Key::KeyA);
        driver.tick(&mut host);
        driver.tick(&mut host);

        assert_eq!(
            host.observed_a,
            vec![ButtonState::Pressed, ButtonState::Released, ButtonState::Idle]
        );
    }

    #[test]
    fn test_clock_convention() {
        let t0 = Instant::now();
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost::default();
        driver.start_at(&mut host, t0).unwrap();

        driver.tick_at(&mut host, t0 + Duration::from_millis(20));
        driver.tick_at(&mut host, t0 + Duration::from_millis(50));
        driver.tick_at(&mut host, t0 + Duration::from_millis(60));

        // init, then frames observe the clock as of the previous tick
        let times: Vec<f64> = host.observed_time.iter().map(|t| t.0).collect();
        assert_eq!(times[0], 0.0);
        assert_eq!(times[1], 0.0);
        assert!((times[2] - 0.020).abs() < 1e-9);
        assert!((times[3] - 0.050).abs() < 1e-9);
        assert!((host.observed_time[3].1 - 0.030).abs() < 1e-9);

        assert!((driver.app().time() - 0.060).abs() < 1e-9);
        assert!((driver.app().dt() - 0.010).abs() < 1e-9);
    }

    #[test]
    fn test_quit_during_frame_stops_after_tick() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost {
            quit_on_frame: Some(2),
            ..Default::default()
        };
        driver.start(&mut host).unwrap();

        driver.input_mut().process_key_down(Key::KeyA, false);
        assert!(driver.tick(&mut host));
        assert!(!driver.tick(&mut host));
        assert!(!driver.tick(&mut host));
        assert_eq!(driver.state(), DriverState::Terminating);

        let frames = host.calls.iter().filter(|c| **c == "frame").count();
        assert_eq!(frames, 2);
        // The quitting tick still completes its bookkeeping
        assert_eq!(driver.frame_count(), 2);
    }

    #[test]
    fn test_quit_from_completion_skips_frame() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost {
            quit_on_completion: true,
            ..Default::default()
        };
        driver.start(&mut host).unwrap();
        assert!(!driver.tick(&mut host));
        assert_eq!(host.calls, vec!["init", "completions"]);
    }

    #[test]
    fn test_frame_errors_do_not_stop_loop() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost {
            fail_frames: true,
            ..Default::default()
        };
        driver.start(&mut host).unwrap();
        assert!(driver.tick(&mut host));
        assert!(driver.tick(&mut host));
        assert_eq!(driver.frame_count(), 2);
    }

    #[test]
    fn test_platform_quit_is_idempotent() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost::default();

        // Before start: no-op
        driver.request_quit();
        assert_eq!(driver.state(), DriverState::Uninitialized);

        driver.start(&mut host).unwrap();
        driver.request_quit();
        driver.request_quit();
        assert_eq!(driver.state(), DriverState::Terminating);
        assert!(!driver.tick(&mut host));
    }

    #[test]
    fn test_shutdown_runs_cleanup_once() {
        let mut driver = FrameDriver::new();
        let mut host = RecordingHost::default();

        driver.shutdown(&mut host);
        assert_eq!(host.cleanups, 0);

        driver.start(&mut host).unwrap();
        driver.shutdown(&mut host);
        driver.shutdown(&mut host);
        assert_eq!(host.cleanups, 1);
        assert_eq!(driver.state(), DriverState::Terminating);
    }

    #[test]
    fn test_surface_size_and_pointer_accessors() {
        let mut driver = FrameDriver::new();
        driver.set_surface_size(800, 600);
        driver.input_mut().process_pointer_move(10.0, 20.0);
        driver.input_mut().process_pointer_move(15.0, 25.0);

        let app = driver.app();
        assert_eq!((app.width(), app.height()), (800, 600));
        assert_eq!((app.mouse_x(), app.mouse_y()), (15.0, 25.0));
    }
}
