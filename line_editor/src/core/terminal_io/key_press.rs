// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

use super::ModifierKeysMask;

/// Examples.
///
/// ```rust
/// use r3bl_line_editor::*;
///
/// let a = keypress!(@char 'a');
/// assert_eq!(a, KeyPress::Plain { key: Key::Character('a') });
///
/// let ctrl_left = keypress!(@special ModifierKeysMask::new().with_ctrl(), SpecialKey::Left);
/// assert_eq!(
///     ctrl_left,
///     KeyPress::WithModifiers {
///         key: Key::SpecialKey(SpecialKey::Left),
///         mask: ModifierKeysMask::new().with_ctrl(),
///     }
/// );
///
/// let f1 = keypress!(@fn FunctionKey::F1);
/// assert_eq!(f1, KeyPress::Plain { key: Key::FunctionKey(FunctionKey::F1) });
/// ```
#[macro_export]
macro_rules! keypress {
    // @char
    (@char $arg_char : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::Character($arg_char),
        }
    };

    (@char $arg_modifiers : expr, $arg_char : expr) => {
        $crate::KeyPress::new($crate::Key::Character($arg_char), $arg_modifiers)
    };

    // @special
    (@special $arg_special : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    (@special $arg_modifiers : expr, $arg_special : expr) => {
        $crate::KeyPress::new($crate::Key::SpecialKey($arg_special), $arg_modifiers)
    };

    // @fn
    (@fn $arg_function : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::FunctionKey($arg_function),
        }
    };

    (@fn $arg_modifiers : expr, $arg_function : expr) => {
        $crate::KeyPress::new($crate::Key::FunctionKey($arg_function), $arg_modifiers)
    };
}

/// This is equivalent to [`crossterm::event::KeyEvent`] except that it is cleaned up
/// semantically and impossible states are removed. A key press is the unit the editor
/// consumes: [`crate::InputSource`] produces them and [`crate::KeyBindingRegistry`]
/// maps them to commands.
///
/// Use [`KeyPress::new`] or the [`keypress!`] macro to construct one. They normalize
/// an empty [`ModifierKeysMask`] to [`KeyPress::Plain`], so two presses of the same key
/// with the same modifiers always compare (and hash) equal.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum KeyPress {
    Plain { key: Key },
    WithModifiers { key: Key, mask: ModifierKeysMask },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum Key {
    /// A [char] that is typed, eg: `a`, `Z`, `7`, `?`, `😀`.
    Character(char),
    SpecialKey(SpecialKey),
    FunctionKey(FunctionKey),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum FunctionKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum SpecialKey {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab, /* Shift + Tab */
    Delete,
    Insert,
    Esc,
}

impl KeyPress {
    #[must_use]
    pub fn new(key: Key, mask: ModifierKeysMask) -> Self {
        if mask.is_empty() {
            KeyPress::Plain { key }
        } else {
            KeyPress::WithModifiers { key, mask }
        }
    }

    #[must_use]
    pub fn key(&self) -> Key {
        match self {
            KeyPress::Plain { key } | KeyPress::WithModifiers { key, .. } => *key,
        }
    }

    #[must_use]
    pub fn mask(&self) -> ModifierKeysMask {
        match self {
            KeyPress::Plain { .. } => ModifierKeysMask::new(),
            KeyPress::WithModifiers { mask, .. } => *mask,
        }
    }

    /// Same key and modifiers, with an empty mask folded into [`KeyPress::Plain`].
    #[must_use]
    pub fn normalized(self) -> Self { Self::new(self.key(), self.mask()) }

    /// A character typed without modifiers that can be inserted into a line. Control
    /// characters (`NUL`, `\t`, `\x7f`, ...) are not printable.
    #[must_use]
    pub fn printable_char(&self) -> Option<char> {
        match self.normalized() {
            KeyPress::Plain {
                key: Key::Character(character),
            } if !character.is_control() => Some(character),
            _ => None,
        }
    }
}

/// Typecast / convert [`KeyEvent`] to [`KeyPress`].
///
/// Only [`KeyEventKind::Press`] events are converted; repeats and releases (which
/// terminals using the kitty keyboard protocol report) are dropped.
///
/// Typing "X" shows up in crossterm as "Shift + X". The `SHIFT` modifier is ignored for
/// [`KeyCode::Char`] events, so it becomes `keypress!(@char 'X')`.
pub mod convert_key_event {
    use super::*;

    impl TryFrom<KeyEvent> for KeyPress {
        type Error = ();

        fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
            if key_event.kind != KeyEventKind::Press {
                return Err(());
            }

            match key_event {
                // If character keys, then ignore SHIFT or NONE modifiers.
                KeyEvent {
                    code: KeyCode::Char(character),
                    modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                    ..
                } => Ok(keypress! { @char character }),
                // `BackTab` already means `Shift+Tab`.
                KeyEvent {
                    code: KeyCode::BackTab,
                    modifiers,
                    ..
                } => Ok(KeyPress::new(
                    Key::SpecialKey(SpecialKey::BackTab),
                    ModifierKeysMask::from(modifiers.difference(KeyModifiers::SHIFT)),
                )),
                _ => {
                    let key = copy_code_from_key_event(&key_event).ok_or(())?;
                    Ok(KeyPress::new(key, ModifierKeysMask::from(key_event.modifiers)))
                }
            }
        }
    }

    fn match_fn_key(fn_key: u8) -> Option<Key> {
        let it = match fn_key {
            1 => FunctionKey::F1,
            2 => FunctionKey::F2,
            3 => FunctionKey::F3,
            4 => FunctionKey::F4,
            5 => FunctionKey::F5,
            6 => FunctionKey::F6,
            7 => FunctionKey::F7,
            8 => FunctionKey::F8,
            9 => FunctionKey::F9,
            10 => FunctionKey::F10,
            11 => FunctionKey::F11,
            12 => FunctionKey::F12,
            _ => return None,
        };
        Some(Key::FunctionKey(it))
    }

    #[must_use]
    pub fn copy_code_from_key_event(key_event: &KeyEvent) -> Option<Key> {
        // Make the code easier to read below using this alias.
        type KC = KeyCode;
        let special = |it: SpecialKey| Some(Key::SpecialKey(it));
        match key_event.code {
            KC::Backspace => special(SpecialKey::Backspace),
            KC::Enter => special(SpecialKey::Enter),
            KC::Left => special(SpecialKey::Left),
            KC::Right => special(SpecialKey::Right),
            KC::Up => special(SpecialKey::Up),
            KC::Down => special(SpecialKey::Down),
            KC::Home => special(SpecialKey::Home),
            KC::End => special(SpecialKey::End),
            KC::PageUp => special(SpecialKey::PageUp),
            KC::PageDown => special(SpecialKey::PageDown),
            KC::Tab => special(SpecialKey::Tab),
            KC::BackTab => special(SpecialKey::BackTab),
            KC::Delete => special(SpecialKey::Delete),
            KC::Insert => special(SpecialKey::Insert),
            KC::Esc => special(SpecialKey::Esc),
            KC::F(fn_key) => match_fn_key(fn_key),
            KC::Char(character) => Some(Key::Character(character)),
            _ => None,
        }
    }
}
