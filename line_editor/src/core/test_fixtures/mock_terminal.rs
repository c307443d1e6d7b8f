// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::Write;

use crate::{StdoutMock, Terminal, ok};

/// A [`Terminal`] of a fixed size that records everything written to it in a
/// [`StdoutMock`]. Clone the mock before handing the terminal to the editor to
/// inspect the output afterwards.
#[derive(Debug, Clone)]
pub struct MockTerminal {
    pub stdout_mock: StdoutMock,
    pub width: usize,
    pub height: usize,
    pub supports_ansi: bool,
    pub is_interactive: bool,
    pub cursor_visible: bool,
}

impl Default for MockTerminal {
    fn default() -> Self { Self::new(80, 24) }
}

impl MockTerminal {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            stdout_mock: StdoutMock::new(),
            width,
            height,
            supports_ansi: true,
            is_interactive: true,
            cursor_visible: true,
        }
    }

    /// A terminal that can't host the editor, eg: output redirected to a file.
    #[must_use]
    pub fn new_non_interactive() -> Self {
        Self {
            is_interactive: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn output(&self) -> String { self.stdout_mock.get_copy_of_buffer_as_string() }

    #[must_use]
    pub fn output_strip_ansi(&self) -> String {
        self.stdout_mock.get_copy_of_buffer_as_string_strip_ansi()
    }
}

impl Terminal for MockTerminal {
    fn width(&self) -> usize { self.width }

    fn height(&self) -> usize { self.height }

    fn supports_ansi(&self) -> bool { self.supports_ansi }

    fn is_interactive(&self) -> bool { self.is_interactive }

    fn set_cursor_visible(&mut self, visible: bool) -> std::io::Result<()> {
        self.cursor_visible = visible;
        ok!()
    }

    fn write_str(&mut self, text: &str) -> std::io::Result<()> {
        self.stdout_mock.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> std::io::Result<()> { self.stdout_mock.flush() }
}
