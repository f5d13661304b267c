//! Tracked keys, the script-facing name table, and winit translation

use bimap::BiMap;
use once_cell::sync::Lazy;
use winit::keyboard::KeyCode;

macro_rules! keys {
    ($($variant:ident),+ $(,)?) => {
        /// A physical key with a slot in the keyboard table.
        ///
        /// Variant names match `winit::keyboard::KeyCode` so translation is a
        /// one-to-one match; anything not listed is not tracked.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum Key {
            $($variant),+
        }

        impl Key {
            /// Every tracked key, in table order
            pub const ALL: &'static [Key] = &[$(Key::$variant),+];

            /// Translate a winit physical key; `None` for untracked keys
            pub fn from_winit(code: KeyCode) -> Option<Key> {
                match code {
                    $(KeyCode::$variant => Some(Key::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

keys! {
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
    KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
    Minus, Equal, Space, Comma, Period, Slash, BracketLeft, BracketRight,
    Backslash, Semicolon, Quote, Backquote,
    Enter, Escape, Backspace, Tab,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    ArrowRight, ArrowLeft, ArrowDown, ArrowUp,
    ControlLeft, ControlRight, ShiftLeft, ShiftRight, AltLeft, AltRight,
}

/// Script key names. Not every key has a name; `control` is the right control key.
#[rustfmt::skip]
const KEY_NAMES: &[(&str, Key)] = &[
    ("a", Key::KeyA), ("b", Key::KeyB), ("c", Key::KeyC), ("d", Key::KeyD),
    ("e", Key::KeyE), ("f", Key::KeyF), ("g", Key::KeyG), ("h", Key::KeyH),
    ("i", Key::KeyI), ("j", Key::KeyJ), ("k", Key::KeyK), ("l", Key::KeyL),
    ("m", Key::KeyM), ("n", Key::KeyN), ("o", Key::KeyO), ("p", Key::KeyP),
    ("q", Key::KeyQ), ("r", Key::KeyR), ("s", Key::KeyS), ("t", Key::KeyT),
    ("u", Key::KeyU), ("v", Key::KeyV), ("w", Key::KeyW), ("x", Key::KeyX),
    ("y", Key::KeyY), ("z", Key::KeyZ),
    ("0", Key::Digit0), ("1", Key::Digit1), ("2", Key::Digit2), ("3", Key::Digit3),
    ("4", Key::Digit4), ("5", Key::Digit5), ("6", Key::Digit6), ("7", Key::Digit7),
    ("8", Key::Digit8), ("9", Key::Digit9),
    ("-", Key::Minus), ("=", Key::Equal), ("space", Key::Space), (",", Key::Comma),
    (".", Key::Period), ("/", Key::Slash), ("[", Key::BracketLeft),
    ("]", Key::BracketRight), ("\\", Key::Backslash), (";", Key::Semicolon),
    ("'", Key::Quote), ("`", Key::Backquote),
    ("enter", Key::Enter), ("escape", Key::Escape), ("backspace", Key::Backspace),
    ("tab", Key::Tab),
    ("f1", Key::F1), ("f2", Key::F2), ("f3", Key::F3), ("f4", Key::F4),
    ("f5", Key::F5), ("f6", Key::F6), ("f7", Key::F7), ("f8", Key::F8),
    ("f9", Key::F9), ("f10", Key::F10), ("f11", Key::F11), ("f12", Key::F12),
    ("right", Key::ArrowRight), ("left", Key::ArrowLeft), ("down", Key::ArrowDown),
    ("up", Key::ArrowUp),
    ("control", Key::ControlRight), ("shift", Key::ShiftLeft), ("alt", Key::AltLeft),
];

static NAME_TABLE: Lazy<BiMap<&'static str, Key>> =
    Lazy::new(|| KEY_NAMES.iter().copied().collect());

impl Key {
    /// Number of slots in the keyboard table
    pub const COUNT: usize = Key::ALL.len();

    /// Slot of this key in the keyboard table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key at a table slot; `None` when out of range
    pub fn from_index(index: usize) -> Option<Key> {
        Key::ALL.get(index).copied()
    }

    /// Look up a script key name. Unknown names yield `None`, which every
    /// query treats as an idle key.
    pub fn from_name(name: &str) -> Option<Key> {
        NAME_TABLE.get_by_left(name).copied()
    }

    /// Script name of this key, if it has one
    pub fn name(self) -> Option<&'static str> {
        NAME_TABLE.get_by_right(&self).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_every_slot() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(Key::from_index(i), Some(*key));
        }
        assert_eq!(Key::from_index(Key::COUNT), None);
    }

    #[test]
    fn every_name_resolves_to_its_key() {
        for (name, key) in KEY_NAMES {
            assert_eq!(Key::from_name(name), Some(*key), "name {:?}", name);
            assert_eq!(key.name(), Some(*name));
        }
    }

    #[test]
    fn names_are_unique() {
        assert_eq!(NAME_TABLE.len(), KEY_NAMES.len());
    }

    #[test]
    fn unknown_names() {
        assert_eq!(Key::from_name("nonexistent"), None);
        assert_eq!(Key::from_name(""), None);
        assert_eq!(Key::from_name("A"), None);
        assert_eq!(Key::from_name("f13"), None);
    }

    #[test]
    fn control_maps_to_right_control() {
        assert_eq!(Key::from_name("control"), Some(Key::ControlRight));
        assert_eq!(Key::ControlLeft.name(), None);
    }

    #[test]
    fn winit_translation() {
        assert_eq!(Key::from_winit(KeyCode::KeyA), Some(Key::KeyA));
        assert_eq!(Key::from_winit(KeyCode::Space), Some(Key::Space));
        assert_eq!(Key::from_winit(KeyCode::ArrowUp), Some(Key::ArrowUp));
        assert_eq!(Key::from_winit(KeyCode::NumpadAdd), None);
        assert_eq!(Key::from_winit(KeyCode::CapsLock), None);
    }
}
