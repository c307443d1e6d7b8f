// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use crossterm::event::{self, Event};

use crate::KeyPress;

/// The input side of the editor. Polled, never blocking: the [`crate::InputPump`]
/// asks [`InputSource::is_key_available`] and only then calls
/// [`InputSource::read_key`].
pub trait InputSource: Send {
    /// # Errors
    ///
    /// Returns an error if the underlying device can't be polled.
    fn is_key_available(&mut self) -> std::io::Result<bool>;

    /// Returns the next key. Only called after [`InputSource::is_key_available`]
    /// returned `true`; returns `None` if the key vanished in between.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying device can't be read.
    fn read_key(&mut self) -> std::io::Result<Option<KeyPress>>;

    /// Scripted sources deliver all their keys at once, which would look like a
    /// paste. They opt out of the paste heuristic here.
    fn is_exempt_from_paste_heuristic(&self) -> bool { false }
}

/// Reads keys from the real terminal via [`crossterm::event`]. Mouse, focus, paste
/// and resize events are discarded, as are key releases.
#[derive(Debug, Default)]
pub struct CrosstermInputSource {
    pending: Option<KeyPress>,
}

impl CrosstermInputSource {
    #[must_use]
    pub fn new() -> Self { Self::default() }
}

impl InputSource for CrosstermInputSource {
    fn is_key_available(&mut self) -> std::io::Result<bool> {
        if self.pending.is_some() {
            return Ok(true);
        }
        while event::poll(Duration::ZERO)? {
            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            if let Ok(key_press) = KeyPress::try_from(key_event) {
                self.pending = Some(key_press);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn read_key(&mut self) -> std::io::Result<Option<KeyPress>> {
        if self.pending.is_none() {
            self.is_key_available()?;
        }
        Ok(self.pending.take())
    }
}
