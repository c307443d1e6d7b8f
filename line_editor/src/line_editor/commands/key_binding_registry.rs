// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap, sync::Arc};

use super::{AutoCompleteDirection, EditCommand, EditCommandKind};
use crate::{KeyPress, ModifierKeysMask, SpecialKey, keypress};

/// Builds a fresh command every time its key is pressed.
pub type CommandFactory = Arc<dyn Fn() -> EditCommand + Send + Sync>;

/// Maps key presses to commands.
///
/// Lookups are exact: the key and the full modifier set have to match. A plain key
/// press never matches a binding that declares modifiers, and vice versa.
#[derive(Default, Clone)]
pub struct KeyBindingRegistry {
    bindings: HashMap<KeyPress, CommandFactory>,
    /// The key most recently bound to each kind of command.
    last_bound: HashMap<EditCommandKind, KeyPress>,
}

impl std::fmt::Debug for KeyBindingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyBindingRegistry")
            .field("count", &self.bindings.len())
            .field("last_bound", &self.last_bound)
            .finish()
    }
}

impl KeyBindingRegistry {
    /// An empty registry. See [`KeyBindingRegistry::with_defaults`] for the usual
    /// starting point.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_defaults() -> Self { default_key_bindings() }

    /// Binds `key_press` to `factory`, replacing any previous binding of that key.
    pub fn add(&mut self, key_press: KeyPress, factory: CommandFactory) {
        let key_press = key_press.normalized();
        self.last_bound.insert(factory().kind(), key_press);
        self.bindings.insert(key_press, factory);
    }

    /// Binds `key_press` to a clone of `command`.
    pub fn add_command(&mut self, key_press: KeyPress, command: EditCommand) {
        self.add(key_press, Arc::new(move || command.clone()));
    }

    /// Returns `false` if `key_press` wasn't bound.
    pub fn remove(&mut self, key_press: KeyPress) -> bool {
        let key_press = key_press.normalized();
        let removed = self.bindings.remove(&key_press).is_some();
        self.last_bound.retain(|_, it| *it != key_press);
        removed
    }

    #[must_use]
    pub fn get_command(&self, key_press: KeyPress) -> Option<EditCommand> {
        self.bindings
            .get(&key_press.normalized())
            .map(|factory| factory())
    }

    /// The key most recently bound to a command of `kind`, if it is still bound.
    #[must_use]
    pub fn find_key_for(&self, kind: EditCommandKind) -> Option<KeyPress> {
        self.last_bound.get(&kind).copied()
    }

    #[must_use]
    pub fn count(&self) -> usize { self.bindings.len() }

    pub fn clear(&mut self) {
        self.bindings.clear();
        self.last_bound.clear();
    }
}

/// The default key map.
///
/// | Keys                      | Command                    |
/// |---------------------------|----------------------------|
/// | `Tab` / `Shift+Tab`       | complete next / previous   |
/// | `Backspace` / `Delete`    | delete before / at cursor  |
/// | `Left` / `Right`          | move one grapheme          |
/// | `Ctrl+Left` / `Ctrl+Right`| previous / next word       |
/// | `Home` / `End`            | line start / end           |
/// | `Ctrl+Home` / `Ctrl+End`  | text start / end           |
/// | `Up` / `Down`             | previous / next line       |
/// | `PageUp` / `PageDown`     | one page up / down         |
/// | `Ctrl+PageUp/PageDown`    | first / last line          |
/// | `Ctrl+Up` / `Ctrl+Down`   | history previous / next    |
/// | `Esc`                     | cancel                     |
/// | `Enter`                   | submit                     |
/// | `Shift+Enter`             | new line                   |
#[must_use]
pub fn default_key_bindings() -> KeyBindingRegistry {
    let ctrl = ModifierKeysMask::new().with_ctrl();
    let shift = ModifierKeysMask::new().with_shift();

    let table: [(KeyPress, EditCommand); 23] = [
        (
            keypress!(@special SpecialKey::Tab),
            EditCommand::AutoComplete(AutoCompleteDirection::Next),
        ),
        (
            keypress!(@special SpecialKey::BackTab),
            EditCommand::AutoComplete(AutoCompleteDirection::Previous),
        ),
        (keypress!(@special SpecialKey::Backspace), EditCommand::Backspace),
        (keypress!(@special SpecialKey::Delete), EditCommand::Delete),
        (keypress!(@special SpecialKey::Left), EditCommand::MoveLeft),
        (keypress!(@special SpecialKey::Right), EditCommand::MoveRight),
        (keypress!(@special ctrl, SpecialKey::Left), EditCommand::MoveToPreviousWord),
        (keypress!(@special ctrl, SpecialKey::Right), EditCommand::MoveToNextWord),
        (keypress!(@special SpecialKey::Home), EditCommand::MoveLineStart),
        (keypress!(@special SpecialKey::End), EditCommand::MoveLineEnd),
        (keypress!(@special ctrl, SpecialKey::Home), EditCommand::MoveTextStart),
        (keypress!(@special ctrl, SpecialKey::End), EditCommand::MoveTextEnd),
        (keypress!(@special SpecialKey::Up), EditCommand::MoveUp),
        (keypress!(@special SpecialKey::Down), EditCommand::MoveDown),
        (keypress!(@special SpecialKey::PageUp), EditCommand::MovePageUp),
        (keypress!(@special SpecialKey::PageDown), EditCommand::MovePageDown),
        (keypress!(@special ctrl, SpecialKey::PageUp), EditCommand::MoveFirstLine),
        (keypress!(@special ctrl, SpecialKey::PageDown), EditCommand::MoveLastLine),
        (keypress!(@special ctrl, SpecialKey::Up), EditCommand::PreviousHistory),
        (keypress!(@special ctrl, SpecialKey::Down), EditCommand::NextHistory),
        (keypress!(@special SpecialKey::Esc), EditCommand::Cancel),
        (keypress!(@special SpecialKey::Enter), EditCommand::Submit),
        (keypress!(@special shift, SpecialKey::Enter), EditCommand::NewLine),
    ];

    let mut registry = KeyBindingRegistry::new();
    for (key_press, command) in table {
        registry.add_command(key_press, command);
    }
    registry
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_bindings() {
        let registry = default_key_bindings();
        assert_eq!(registry.count(), 23);
        assert_eq!(
            registry.get_command(keypress!(@special SpecialKey::Enter)),
            Some(EditCommand::Submit)
        );
        assert_eq!(
            registry.get_command(keypress!(
                @special ModifierKeysMask::new().with_shift(), SpecialKey::Enter
            )),
            Some(EditCommand::NewLine)
        );
        assert_eq!(
            registry.get_command(keypress!(@special SpecialKey::BackTab)),
            Some(EditCommand::AutoComplete(AutoCompleteDirection::Previous))
        );
    }

    #[test]
    fn test_lookup_requires_exact_modifiers() {
        let registry = default_key_bindings();
        let ctrl_shift = ModifierKeysMask::new().with_ctrl().with_shift();

        assert_eq!(
            registry.get_command(keypress!(@special ctrl_shift, SpecialKey::Left)),
            None
        );
        assert_eq!(
            registry.get_command(keypress!(@special SpecialKey::Left)),
            Some(EditCommand::MoveLeft)
        );
        assert_eq!(
            registry.get_command(keypress!(@char ModifierKeysMask::new().with_alt(), 'x')),
            None
        );
    }

    #[test]
    fn test_add_replaces_and_remove() {
        let mut registry = KeyBindingRegistry::new();
        let key = keypress!(@char ModifierKeysMask::new().with_ctrl(), 's');

        registry.add_command(key, EditCommand::Insert(":)".into()));
        registry.add_command(key, EditCommand::Insert("😀".into()));
        assert_eq!(registry.count(), 1);
        assert_eq!(registry.get_command(key), Some(EditCommand::Insert("😀".into())));

        assert!(registry.remove(key));
        assert!(!registry.remove(key));
        assert_eq!(registry.count(), 0);
        assert_eq!(registry.get_command(key), None);
    }

    #[test]
    fn test_factory_builds_fresh_command() {
        let mut registry = KeyBindingRegistry::new();
        let key = keypress!(@fn crate::FunctionKey::F2);
        registry.add(key, Arc::new(|| EditCommand::Insert("now".into())));
        assert_eq!(registry.get_command(key), Some(EditCommand::Insert("now".into())));
    }

    #[test]
    fn test_find_key_for_tracks_latest_binding() {
        let mut registry = default_key_bindings();
        assert_eq!(
            registry.find_key_for(EditCommandKind::Submit),
            Some(keypress!(@special SpecialKey::Enter))
        );

        let ctrl_j = keypress!(@char ModifierKeysMask::new().with_ctrl(), 'j');
        registry.add_command(ctrl_j, EditCommand::Submit);
        assert_eq!(registry.find_key_for(EditCommandKind::Submit), Some(ctrl_j));

        registry.remove(ctrl_j);
        assert_eq!(registry.find_key_for(EditCommandKind::Submit), None);

        registry.clear();
        assert_eq!(registry.count(), 0);
        assert_eq!(registry.find_key_for(EditCommandKind::NewLine), None);
    }
}
