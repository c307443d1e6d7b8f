// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::KeyModifiers;
use serde::{Deserialize, Serialize};

/// The set of modifier keys held down with a key. Key bindings compare masks for exact
/// equality: `Ctrl+Left` does not match a `Ctrl+Shift+Left` press.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self {
        ModifierKeysMask {
            shift_key_state: KeyState::NotPressed,
            ctrl_key_state: KeyState::NotPressed,
            alt_key_state: KeyState::NotPressed,
        }
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::new() }
}

impl From<KeyModifiers> for ModifierKeysMask {
    /// Only `SHIFT`, `CONTROL` and `ALT` are carried over. `SUPER`, `HYPER` and `META`
    /// are dropped, since no binding uses them.
    fn from(other: KeyModifiers) -> ModifierKeysMask {
        let mut it = ModifierKeysMask::new();

        if other.intersects(KeyModifiers::SHIFT) {
            it.shift_key_state = KeyState::Pressed;
        }
        if other.intersects(KeyModifiers::CONTROL) {
            it.ctrl_key_state = KeyState::Pressed;
        }
        if other.intersects(KeyModifiers::ALT) {
            it.alt_key_state = KeyState::Pressed;
        }

        it
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_empty_mask() {
        let mask = ModifierKeysMask::new();
        assert!(mask.is_empty());
        assert_eq!(mask, ModifierKeysMask::default());
    }

    #[test_case(KeyModifiers::SHIFT, ModifierKeysMask::new().with_shift())]
    #[test_case(KeyModifiers::CONTROL, ModifierKeysMask::new().with_ctrl())]
    #[test_case(KeyModifiers::ALT, ModifierKeysMask::new().with_alt())]
    #[test_case(
        KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        ModifierKeysMask::new().with_ctrl().with_shift()
    )]
    #[test_case(KeyModifiers::SUPER, ModifierKeysMask::new())]
    fn test_from_crossterm_modifiers(input: KeyModifiers, expected: ModifierKeysMask) {
        assert_eq!(ModifierKeysMask::from(input), expected);
    }

    #[test]
    fn test_masks_are_compared_exactly() {
        let ctrl = ModifierKeysMask::new().with_ctrl();
        let ctrl_shift = ModifierKeysMask::new().with_ctrl().with_shift();
        assert_ne!(ctrl, ctrl_shift);
    }
}
