// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque, sync::Arc};

use crate::{InputSource, Key, KeyPress, ModifierKeysMask, SpecialKey, StdMutex,
            keypress, lock_or_recover};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptedInput {
    Key(KeyPress),
    /// Report "no key available" once, which ends the current burst.
    BurstBreak,
}

/// An [`InputSource`] that replays keys pushed by a test. Clones share the same
/// queue, so a test can keep a handle and push more keys between two sessions.
///
/// All queued keys are "available" at once, which the paste heuristic would treat as
/// a paste. So this source is exempt from it by default; use
/// [`ScriptedInputSource::with_paste_heuristic`] to test the heuristic itself.
#[derive(Debug, Clone)]
pub struct ScriptedInputSource {
    queue: Arc<StdMutex<VecDeque<ScriptedInput>>>,
    exempt_from_paste_heuristic: bool,
}

impl Default for ScriptedInputSource {
    fn default() -> Self {
        Self {
            queue: Arc::new(StdMutex::new(VecDeque::new())),
            exempt_from_paste_heuristic: true,
        }
    }
}

impl ScriptedInputSource {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_paste_heuristic(mut self) -> Self {
        self.exempt_from_paste_heuristic = false;
        self
    }

    fn push_input(&self, input: ScriptedInput) -> &Self {
        lock_or_recover!(self.queue).push_back(input);
        self
    }

    /// Each char of `text` is typed as a plain key.
    pub fn push_str(&self, text: &str) -> &Self {
        for character in text.chars() {
            self.push_key(keypress!(@char character));
        }
        self
    }

    pub fn push_key(&self, key_press: KeyPress) -> &Self {
        self.push_input(ScriptedInput::Key(key_press))
    }

    pub fn push_special(&self, special_key: SpecialKey) -> &Self {
        self.push_key(keypress!(@special special_key))
    }

    pub fn push_with_modifiers(&self, key: Key, mask: ModifierKeysMask) -> &Self {
        self.push_key(KeyPress::new(key, mask))
    }

    /// `Enter`.
    pub fn push_submit(&self) -> &Self { self.push_special(SpecialKey::Enter) }

    /// `Shift+Enter`.
    pub fn push_new_line(&self) -> &Self {
        self.push_key(keypress!(@special ModifierKeysMask::new().with_shift(), SpecialKey::Enter))
    }

    /// `Esc`.
    pub fn push_escape(&self) -> &Self { self.push_special(SpecialKey::Esc) }

    pub fn push_burst_break(&self) -> &Self { self.push_input(ScriptedInput::BurstBreak) }

    /// Number of keys not read yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        lock_or_recover!(self.queue)
            .iter()
            .filter(|it| matches!(it, ScriptedInput::Key(_)))
            .count()
    }
}

impl InputSource for ScriptedInputSource {
    fn is_key_available(&mut self) -> std::io::Result<bool> {
        let mut queue = lock_or_recover!(self.queue);
        match queue.front().copied() {
            Some(ScriptedInput::Key(_)) => Ok(true),
            Some(ScriptedInput::BurstBreak) => {
                queue.pop_front();
                Ok(false)
            }
            None => Ok(false),
        }
    }

    fn read_key(&mut self) -> std::io::Result<Option<KeyPress>> {
        let mut queue = lock_or_recover!(self.queue);
        match queue.front().copied() {
            Some(ScriptedInput::Key(key_press)) => {
                queue.pop_front();
                Ok(Some(key_press))
            }
            _ => Ok(None),
        }
    }

    fn is_exempt_from_paste_heuristic(&self) -> bool { self.exempt_from_paste_heuristic }
}
