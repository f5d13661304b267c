//! Per-button edge/level state

/// State of a single tracked button.
///
/// `Pressed`, `RepeatPressed` and `Released` are edge states: they last for one
/// frame and collapse in [`ButtonState::decay`]. `Idle` and `Down` are level
/// states and persist until the next edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    Pressed,
    /// A down edge generated by OS key repeat
    RepeatPressed,
    Released,
    Down,
}

impl ButtonState {
    /// Once-per-frame collapse of edge states into level states
    pub fn decay(self) -> Self {
        match self {
            ButtonState::Pressed | ButtonState::RepeatPressed => ButtonState::Down,
            ButtonState::Released => ButtonState::Idle,
            other => other,
        }
    }

    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }

    /// Fresh press or auto-repeat
    pub fn is_pressed_or_repeat(self) -> bool {
        matches!(self, ButtonState::Pressed | ButtonState::RepeatPressed)
    }

    /// Held in any form: pressed, repeat-pressed, or down
    pub fn is_down(self) -> bool {
        matches!(
            self,
            ButtonState::Pressed | ButtonState::RepeatPressed | ButtonState::Down
        )
    }

    pub fn is_released(self) -> bool {
        self == ButtonState::Released
    }

    pub fn is_edge(self) -> bool {
        matches!(
            self,
            ButtonState::Pressed | ButtonState::RepeatPressed | ButtonState::Released
        )
    }
}
