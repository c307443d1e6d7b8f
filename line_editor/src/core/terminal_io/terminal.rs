// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{IsTerminal, Write};

use crossterm::{QueueableCommand, cursor, terminal};

use crate::{OutputDevice, lock_output_device_as_mut, ok};

/// Used when the terminal size can't be queried (eg: output is piped).
pub const FALLBACK_TERMINAL_WIDTH: usize = 80;
pub const FALLBACK_TERMINAL_HEIGHT: usize = 24;

/// The output side of the editor. The renderer assembles each frame into a single
/// string and hands it over with one [`Terminal::write_str`] and one
/// [`Terminal::flush`], so a frame is never observed half drawn.
pub trait Terminal: Send {
    /// Width in columns.
    fn width(&self) -> usize;

    /// Height in rows.
    fn height(&self) -> usize;

    fn supports_ansi(&self) -> bool;

    fn is_interactive(&self) -> bool;

    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    fn set_cursor_visible(&mut self, visible: bool) -> std::io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    fn write_str(&mut self, text: &str) -> std::io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if flushing the terminal fails.
    fn flush(&mut self) -> std::io::Result<()>;

    /// Called before the first frame of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode can't be enabled.
    fn enter_raw_mode(&mut self) -> std::io::Result<()> { ok!() }

    /// Called after the last frame of a session, even if the session failed.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode can't be disabled.
    fn exit_raw_mode(&mut self) -> std::io::Result<()> { ok!() }
}

/// A [`Terminal`] backed by crossterm and an [`OutputDevice`] (stdout by default).
#[allow(missing_debug_implementations)]
pub struct CrosstermTerminal {
    pub output_device: OutputDevice,
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self {
            output_device: OutputDevice::new_stdout(),
        }
    }
}

impl CrosstermTerminal {
    #[must_use]
    pub fn new(output_device: OutputDevice) -> Self { Self { output_device } }

    fn size() -> (usize, usize) {
        match terminal::size() {
            Ok((columns, rows)) if columns > 0 && rows > 0 => {
                (usize::from(columns), usize::from(rows))
            }
            _ => (FALLBACK_TERMINAL_WIDTH, FALLBACK_TERMINAL_HEIGHT),
        }
    }
}

impl Terminal for CrosstermTerminal {
    fn width(&self) -> usize { Self::size().0 }

    fn height(&self) -> usize { Self::size().1 }

    /// A `dumb` terminal (eg: the Emacs shell buffer) doesn't interpret escape
    /// sequences.
    fn supports_ansi(&self) -> bool {
        !matches!(std::env::var("TERM").as_deref(), Ok("dumb"))
    }

    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
    }

    fn set_cursor_visible(&mut self, visible: bool) -> std::io::Result<()> {
        let out = lock_output_device_as_mut!(self.output_device);
        if visible {
            out.queue(cursor::Show)?;
        } else {
            out.queue(cursor::Hide)?;
        }
        out.flush()
    }

    fn write_str(&mut self, text: &str) -> std::io::Result<()> {
        lock_output_device_as_mut!(self.output_device).write_all(text.as_bytes())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        lock_output_device_as_mut!(self.output_device).flush()
    }

    fn enter_raw_mode(&mut self) -> std::io::Result<()> {
        if self.output_device.is_mock {
            return ok!();
        }
        terminal::enable_raw_mode()
    }

    fn exit_raw_mode(&mut self) -> std::io::Result<()> {
        if self.output_device.is_mock {
            return ok!();
        }
        terminal::disable_raw_mode()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::OutputDeviceExt;

    #[test]
    fn test_crossterm_terminal_writes_to_output_device() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let mut terminal = CrosstermTerminal::new(output_device);

        terminal.write_str("> hi").unwrap();
        terminal.set_cursor_visible(false).unwrap();
        terminal.set_cursor_visible(true).unwrap();
        terminal.flush().unwrap();

        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "> hi\x1b[?25l\x1b[?25h"
        );
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string_strip_ansi(), "> hi");
    }

    #[test]
    fn test_crossterm_terminal_size_is_never_zero() {
        let terminal = CrosstermTerminal::default();
        assert!(terminal.width() > 0);
        assert!(terminal.height() > 0);
    }

    #[test]
    fn test_mock_output_skips_raw_mode() {
        let (output_device, _stdout_mock) = OutputDevice::new_mock();
        let mut terminal = CrosstermTerminal::new(output_device);
        assert!(terminal.enter_raw_mode().is_ok());
        assert!(terminal.exit_raw_mode().is_ok());
    }
}
