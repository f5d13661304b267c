//! Input state management

use crate::button::ButtonState;
use crate::key::Key;

/// Index of the only tracked pointer button (left mouse button)
pub const PRIMARY_BUTTON: u32 = 0;

/// Tracks keyboard and primary pointer state per frame.
///
/// Platform events mutate it as they arrive; [`InputState::decay_frame`] runs
/// once per tick after the script frame callback has observed the edges.
#[derive(Debug, Clone)]
pub struct InputState {
    /// One cell per tracked key, indexed by `Key::index`
    keys: [ButtonState; Key::COUNT],
    /// Primary pointer button
    pointer: ButtonState,
    /// Last observed pointer position in window pixels
    pub pointer_position: (f64, f64),
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: [ButtonState::Idle; Key::COUNT],
            pointer: ButtonState::Idle,
            pointer_position: (0.0, 0.0),
        }
    }

    /// Return every button to `Idle` and the pointer to the origin
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: Key, repeat: bool) {
        self.keys[key.index()] = if repeat {
            ButtonState::RepeatPressed
        } else {
            ButtonState::Pressed
        };
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: Key) {
        self.keys[key.index()] = ButtonState::Released;
    }

    /// Key press by raw table slot. Out-of-range codes are ignored.
    pub fn process_key_code_down(&mut self, code: usize, repeat: bool) {
        match Key::from_index(code) {
            Some(key) => self.process_key_down(key, repeat),
            None => log::trace!("ignoring key down for untracked code {}", code),
        }
    }

    /// Key release by raw table slot. Out-of-range codes are ignored.
    pub fn process_key_code_up(&mut self, code: usize) {
        match Key::from_index(code) {
            Some(key) => self.process_key_up(key),
            None => log::trace!("ignoring key up for untracked code {}", code),
        }
    }

    /// Process pointer button press; only the primary button is tracked
    pub fn process_pointer_down(&mut self, button: u32) {
        if button == PRIMARY_BUTTON {
            self.pointer = ButtonState::Pressed;
        }
    }

    /// Process pointer button release; only the primary button is tracked
    pub fn process_pointer_up(&mut self, button: u32) {
        if button == PRIMARY_BUTTON {
            self.pointer = ButtonState::Released;
        }
    }

    /// Overwrite the pointer position. No smoothing or clamping.
    pub fn process_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer_position = (x, y);
    }

    /// Call once per frame, after the frame callback, to collapse edge states
    pub fn decay_frame(&mut self) {
        for state in self.keys.iter_mut() {
            *state = state.decay();
        }
        self.pointer = self.pointer.decay();
    }

    // --- Query methods ---

    pub fn key_state(&self, key: Key) -> ButtonState {
        self.keys[key.index()]
    }

    pub fn pointer_state(&self) -> ButtonState {
        self.pointer
    }

    /// State for a script key name; unknown names read as `Idle`
    pub fn named_key_state(&self, name: &str) -> ButtonState {
        Key::from_name(name)
            .map(|key| self.key_state(key))
            .unwrap_or(ButtonState::Idle)
    }

    /// Was a key pressed this frame (not counting auto-repeat)?
    pub fn is_key_pressed(&self, name: &str) -> bool {
        self.named_key_state(name).is_pressed()
    }

    /// Was a key pressed or auto-repeated this frame?
    pub fn is_key_pressed_or_repeat(&self, name: &str) -> bool {
        self.named_key_state(name).is_pressed_or_repeat()
    }

    /// Is a key held in any form?
    pub fn is_key_down(&self, name: &str) -> bool {
        self.named_key_state(name).is_down()
    }

    /// Was a key released this frame?
    pub fn is_key_released(&self, name: &str) -> bool {
        self.named_key_state(name).is_released()
    }

    pub fn is_pointer_pressed(&self) -> bool {
        self.pointer.is_pressed()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer.is_down()
    }

    pub fn is_pointer_released(&self) -> bool {
        self.pointer.is_released()
    }
}
