// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::LineBuffer;

/// Separator used when joining lines into the submitted text.
pub const LINE_SEPARATOR: &str = "\n";

/// An ordered list of [`LineBuffer`]s and the index of the active one, which is the
/// line the cursor is on.
///
/// Invariants:
/// 1. There is always at least one line.
/// 2. `active_line_index() < line_count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<LineBuffer>,
    active_line: usize,
}

impl Default for Document {
    fn default() -> Self { Self::new("") }
}

impl Document {
    /// Splits `text` on line breaks (`\n` or `\r\n`). The last line is active, and every
    /// cursor is at the end of its line.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut it = Self {
            lines: vec![],
            active_line: 0,
        };
        it.set_lines(text.replace("\r\n", "\n").split('\n'));
        it
    }

    /// Replaces every line. The last line becomes active with its cursor at the end.
    /// An empty iterator leaves one empty line.
    pub fn set_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(LineBuffer::new).collect();
        if self.lines.is_empty() {
            self.lines.push(LineBuffer::default());
        }
        self.active_line = self.lines.len() - 1;
    }

    /// The full text, lines joined with [`LINE_SEPARATOR`].
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(LineBuffer::content)
            .collect::<Vec<_>>()
            .join(LINE_SEPARATOR)
    }

    #[must_use]
    pub fn lines_as_strings(&self) -> Vec<String> {
        self.lines.iter().map(|it| it.content().to_string()).collect()
    }

    /// Empty, or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|it| it.content().trim().is_empty())
    }

    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    #[must_use]
    pub fn lines(&self) -> &[LineBuffer] { &self.lines }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&LineBuffer> { self.lines.get(index) }

    #[must_use]
    pub fn active_line_index(&self) -> usize { self.active_line }

    #[must_use]
    pub fn last_line_index(&self) -> usize { self.lines.len() - 1 }

    #[must_use]
    pub fn is_on_first_line(&self) -> bool { self.active_line == 0 }

    #[must_use]
    pub fn is_on_last_line(&self) -> bool { self.active_line == self.last_line_index() }

    #[must_use]
    pub fn active_buffer(&self) -> &LineBuffer { &self.lines[self.active_line] }

    pub fn active_buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.lines[self.active_line]
    }

    /// Adds a line at the bottom. The active line doesn't change.
    pub fn append_line(&mut self, content: impl Into<String>) {
        self.lines.push(LineBuffer::new(content));
    }

    /// Inserts a line at `index` (clamped to `line_count()`). The active line keeps
    /// pointing at the same buffer.
    pub fn insert_line(&mut self, index: usize, content: impl Into<String>) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, LineBuffer::new(content));
        if index <= self.active_line {
            self.active_line += 1;
        }
    }

    /// Removes the line at `index` and returns it. Removing the only line leaves a
    /// single empty line behind. The active index is clamped.
    pub fn remove_line(&mut self, index: usize) -> Option<LineBuffer> {
        if index >= self.lines.len() {
            return None;
        }
        if self.lines.len() == 1 {
            return Some(std::mem::take(&mut self.lines[0]));
        }
        let removed = self.lines.remove(index);
        if self.active_line > index || self.active_line >= self.lines.len() {
            self.active_line = self.active_line.saturating_sub(1);
        }
        Some(removed)
    }

    /// Collapses the document to a single empty line.
    pub fn clear(&mut self) {
        self.lines = vec![LineBuffer::default()];
        self.active_line = 0;
    }

    pub fn move_up(&mut self) -> bool {
        if self.active_line == 0 {
            return false;
        }
        self.active_line -= 1;
        true
    }

    pub fn move_down(&mut self) -> bool {
        if self.is_on_last_line() {
            return false;
        }
        self.active_line += 1;
        true
    }

    /// Makes line `index` (clamped) active. Returns `false` if it already was.
    pub fn move_to(&mut self, index: usize) -> bool {
        let index = index.min(self.last_line_index());
        if index == self.active_line {
            return false;
        }
        self.active_line = index;
        true
    }

    /// Moves the text after the cursor onto a new line below the active one, which
    /// becomes active with its cursor at the start.
    pub fn split_at_cursor(&mut self) {
        let rest = self.active_buffer_mut().split_off_at_cursor();
        let new_index = self.active_line + 1;
        self.lines.insert(new_index, LineBuffer::new(rest));
        self.active_line = new_index;
        self.active_buffer_mut().move_to_line_start();
    }

    /// Appends the active line to the one above, which becomes active with its cursor
    /// where its old end was. Returns `false` on the first line.
    pub fn join_backward(&mut self) -> bool {
        if self.is_on_first_line() {
            return false;
        }
        let current = self.lines.remove(self.active_line);
        self.active_line -= 1;
        let previous = self.active_buffer_mut();
        previous.move_to_line_end();
        previous.insert(current.content());
        true
    }

    /// Appends the next line to the active one. The cursor doesn't move. Returns
    /// `false` on the last line.
    pub fn join_forward(&mut self) -> bool {
        if self.is_on_last_line() {
            return false;
        }
        let next = self.lines.remove(self.active_line + 1);
        let buffer = self.active_buffer_mut();
        let cursor = buffer.cursor();
        buffer.move_to_line_end();
        buffer.insert(next.content());
        buffer.set_position(cursor);
        true
    }
}
