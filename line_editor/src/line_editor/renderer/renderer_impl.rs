// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::{cursor::{Hide, MoveDown, MoveTo, MoveToColumn, MoveToNextLine, MoveUp,
                         Show},
                terminal::{Clear, ClearType}};

use super::{RowLayout, as_u16, build_line, queue_ansi};
use crate::{CommonResultWithError, Document, Highlighter, LineEditorError,
            PromptPrefixProvider, Terminal, compute_row_window, ok};

pub const DEBUG_RENDERER: bool = false;

/// The collaborators that decide what a line looks like.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub prompt: &'a dyn PromptPrefixProvider,
    pub highlighter: Option<&'a dyn Highlighter>,
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("has_highlighter", &self.highlighter.is_some())
            .finish_non_exhaustive()
    }
}

/// How the document is laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// The document fits. It starts on the row where the session started, and the
    /// renderer only moves relative to that row.
    #[default]
    Partial,
    /// The document is taller than the terminal. It takes over the whole screen from
    /// the top left corner and scrolls vertically, starting at `skip`.
    Full { skip: usize, take: usize },
}

/// Draws a [`Document`] on a [`Terminal`] and keeps track of where the terminal cursor
/// is, so the next update can be drawn in place.
///
/// Every public method assembles its output into one string, then writes and flushes
/// it once. Redraws of more than one line hide the terminal cursor while they run.
#[derive(Debug, Default)]
pub struct Renderer {
    mode: RenderMode,
    /// Row the terminal cursor is on: relative to the first line of the document in
    /// [`RenderMode::Partial`], a screen row in [`RenderMode::Full`].
    cursor_row: usize,
    /// Rows drawn by the last redraw. Rows past the current line count get cleared.
    rendered_rows: usize,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn mode(&self) -> RenderMode { self.mode }

    /// Starts a new session: the terminal cursor is at the start of the row where the
    /// first line goes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn initialize(
        &mut self,
        terminal: &mut dyn Terminal,
        document: &Document,
        context: RenderContext<'_>,
    ) -> CommonResultWithError<(), LineEditorError> {
        *self = Self::default();
        self.refresh(terminal, document, context)
    }

    /// Redraws every visible line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn refresh(
        &mut self,
        terminal: &mut dyn Terminal,
        document: &Document,
        context: RenderContext<'_>,
    ) -> CommonResultWithError<(), LineEditorError> {
        let mut acc = String::new();
        queue_ansi(&mut acc, Hide)?;
        if document.line_count() > terminal.height() {
            self.build_full_refresh(&mut acc, terminal, document, context)?;
        } else {
            self.build_partial_refresh(&mut acc, terminal, document, context)?;
        }
        queue_ansi(&mut acc, Show)?;

        DEBUG_RENDERER.then(|| {
            tracing::debug!(
                message = "renderer: refresh",
                mode = ?self.mode,
                cursor_row = self.cursor_row,
                line_count = document.line_count()
            );
        });

        write_and_flush(terminal, &acc)
    }

    /// Redraws only the active line. `cursor_override` replaces the buffer cursor
    /// for placing the terminal cursor and picking the horizontal scroll.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn render_active_line(
        &mut self,
        terminal: &mut dyn Terminal,
        document: &Document,
        context: RenderContext<'_>,
        cursor_override: Option<usize>,
    ) -> CommonResultWithError<(), LineEditorError> {
        let mut acc = String::new();
        self.build_line_at(
            &mut acc,
            terminal,
            document,
            context,
            document.active_line_index(),
            cursor_override,
        )?;
        write_and_flush(terminal, &acc)
    }

    /// Call after the active line changed from `previous_line`. The line that was left
    /// is scrolled back to its start, then the new active line is drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn move_active_line(
        &mut self,
        terminal: &mut dyn Terminal,
        document: &Document,
        context: RenderContext<'_>,
        previous_line: usize,
    ) -> CommonResultWithError<(), LineEditorError> {
        let needs_full_refresh = match self.mode {
            RenderMode::Partial => document.line_count() > terminal.height(),
            RenderMode::Full { .. } => true,
        };
        if needs_full_refresh {
            return self.refresh(terminal, document, context);
        }

        let mut acc = String::new();
        queue_ansi(&mut acc, Hide)?;
        if previous_line != document.active_line_index() {
            self.build_line_at(&mut acc, terminal, document, context, previous_line, Some(0))?;
        }
        self.build_line_at(
            &mut acc,
            terminal,
            document,
            context,
            document.active_line_index(),
            None,
        )?;
        queue_ansi(&mut acc, Show)?;
        write_and_flush(terminal, &acc)
    }

    /// Ends the session: the active line is scrolled back to its start and the
    /// terminal cursor moves to a fresh row below the document.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn finish(
        &mut self,
        terminal: &mut dyn Terminal,
        document: &Document,
        context: RenderContext<'_>,
    ) -> CommonResultWithError<(), LineEditorError> {
        let mut acc = String::new();
        let active = document.active_line_index();
        self.build_line_at(&mut acc, terminal, document, context, active, Some(0))?;

        let last_row = match self.mode {
            RenderMode::Partial => document.last_line_index(),
            RenderMode::Full { take, .. } => take.saturating_sub(1),
        };
        if last_row > self.cursor_row {
            queue_ansi(&mut acc, MoveDown(as_u16(last_row - self.cursor_row)))?;
        }
        acc.push_str("\r\n");

        *self = Self::default();
        write_and_flush(terminal, &acc)
    }

    /// Draws line `index` on its row, if that row is visible. In full mode an
    /// invisible line means the window is stale, so everything is redrawn.
    fn build_line_at(
        &mut self,
        acc: &mut String,
        terminal: &dyn Terminal,
        document: &Document,
        context: RenderContext<'_>,
        index: usize,
        cursor_override: Option<usize>,
    ) -> CommonResultWithError<(), LineEditorError> {
        let Some(buffer) = document.line(index) else {
            return Err(LineEditorError::new_invariant_violation(format!(
                "line {index} doesn't exist, the document has {} lines",
                document.line_count()
            )));
        };

        match self.mode {
            RenderMode::Partial => {
                self.move_to_row(acc, index)?;
            }
            RenderMode::Full { skip, take } => {
                if index < skip || index >= skip + take {
                    return self.build_full_refresh(acc, terminal, document, context);
                }
                let row = index - skip;
                queue_ansi(acc, MoveTo(0, as_u16(row)))?;
                self.cursor_row = row;
            }
        }

        let prompt = context.prompt.prompt_for(index);
        build_line(
            acc,
            RowLayout {
                prompt: &prompt,
                buffer,
                cursor: cursor_override.unwrap_or_else(|| buffer.cursor()),
                terminal_width: terminal.width(),
                highlighter: context.highlighter,
            },
        )?;
        ok!()
    }

    /// Relative vertical move, for [`RenderMode::Partial`].
    fn move_to_row(
        &mut self,
        acc: &mut String,
        row: usize,
    ) -> CommonResultWithError<(), LineEditorError> {
        if row < self.cursor_row {
            queue_ansi(acc, MoveUp(as_u16(self.cursor_row - row)))?;
        } else if row > self.cursor_row {
            queue_ansi(acc, MoveDown(as_u16(row - self.cursor_row)))?;
        }
        self.cursor_row = row;
        ok!()
    }

    /// Draws every line below the first row of the document. New rows are created
    /// with line breaks (scrolling the terminal if needed), and rows left over from a
    /// taller previous frame are cleared.
    fn build_partial_refresh(
        &mut self,
        acc: &mut String,
        terminal: &dyn Terminal,
        document: &Document,
        context: RenderContext<'_>,
    ) -> CommonResultWithError<(), LineEditorError> {
        match self.mode {
            RenderMode::Partial => self.move_to_row(acc, 0)?,
            RenderMode::Full { .. } => queue_ansi(acc, MoveTo(0, 0))?,
        }
        self.mode = RenderMode::Partial;
        self.cursor_row = 0;

        let line_count = document.line_count();
        let row_count = line_count.max(self.rendered_rows);
        let mut active_column = 0;

        for row in 0..row_count {
            if row > 0 {
                acc.push_str("\r\n");
            }
            if let Some(column) = build_row(acc, terminal, document, context, row)? {
                active_column = column;
            }
        }
        self.cursor_row = row_count.saturating_sub(1);
        self.rendered_rows = line_count;

        self.move_to_row(acc, document.active_line_index())?;
        queue_ansi(acc, MoveToColumn(as_u16(active_column)))?;
        ok!()
    }

    /// Draws the window of lines around the active line, from the top of the screen.
    fn build_full_refresh(
        &mut self,
        acc: &mut String,
        terminal: &dyn Terminal,
        document: &Document,
        context: RenderContext<'_>,
    ) -> CommonResultWithError<(), LineEditorError> {
        let height = terminal.height();
        let window = compute_row_window(
            document.line_count(),
            height,
            document.active_line_index(),
        );
        let mut active_column = 0;

        queue_ansi(acc, MoveTo(0, 0))?;
        for row in 0..height {
            if row > 0 {
                queue_ansi(acc, MoveToNextLine(1))?;
            }
            if row < window.take {
                if let Some(column) =
                    build_row(acc, terminal, document, context, window.skip + row)?
                {
                    active_column = column;
                }
            } else {
                clear_row(acc)?;
            }
        }

        self.mode = RenderMode::Full {
            skip: window.skip,
            take: window.take,
        };
        self.rendered_rows = height;
        self.cursor_row = window.cursor;

        queue_ansi(acc, MoveTo(as_u16(active_column), as_u16(window.cursor)))?;
        ok!()
    }
}

/// Draws line `index` (or clears the row if there is no such line) on the row the
/// terminal cursor is on. Only the active line shows its cursor; the others are
/// drawn from their start. Returns the cursor column if `index` is the active line.
fn build_row(
    acc: &mut String,
    terminal: &dyn Terminal,
    document: &Document,
    context: RenderContext<'_>,
    index: usize,
) -> CommonResultWithError<Option<usize>, LineEditorError> {
    let Some(buffer) = document.line(index) else {
        clear_row(acc)?;
        return Ok(None);
    };
    let is_active = index == document.active_line_index();
    let prompt = context.prompt.prompt_for(index);
    let layout = build_line(
        acc,
        RowLayout {
            prompt: &prompt,
            buffer,
            cursor: if is_active { buffer.cursor() } else { 0 },
            terminal_width: terminal.width(),
            highlighter: context.highlighter,
        },
    )?;
    Ok(is_active.then_some(layout.cursor_column))
}

fn clear_row(acc: &mut String) -> CommonResultWithError<(), LineEditorError> {
    queue_ansi(acc, MoveToColumn(0))?;
    queue_ansi(acc, Clear(ClearType::CurrentLine))
}

fn write_and_flush(
    terminal: &mut dyn Terminal,
    acc: &str,
) -> CommonResultWithError<(), LineEditorError> {
    terminal.write_str(acc)?;
    terminal.flush()?;
    ok!()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{DefaultPromptPrefix, LineNumberPromptPrefix, MockTerminal};

    fn context(prompt: &dyn PromptPrefixProvider) -> RenderContext<'_> {
        RenderContext {
            prompt,
            highlighter: None,
        }
    }

    fn rows_of(output: &str) -> Vec<String> {
        strip_ansi_escapes::strip_str(output)
            .split("\r\n")
            .map(|it| it.trim_end().to_string())
            .collect()
    }

    #[test]
    fn test_initialize_draws_every_line_and_ends_on_active_line() {
        let mut terminal = MockTerminal::new(20, 10);
        let prompt = DefaultPromptPrefix::default();
        let document = Document::new("Foo\nBar");
        let mut renderer = Renderer::new();

        renderer
            .initialize(&mut terminal, &document, context(&prompt))
            .unwrap();

        let output = terminal.output();
        assert_eq!(rows_of(&output), vec!["> Foo", "> Bar"]);
        assert!(output.starts_with("\u{1b}[?25l"));
        assert!(output.ends_with("\u{1b}[6G\u{1b}[?25h"));
        assert_eq!(renderer.mode(), RenderMode::Partial);
    }

    #[test]
    fn test_move_active_line_moves_relative_to_current_row() {
        let mut terminal = MockTerminal::new(20, 10);
        let prompt = DefaultPromptPrefix::default();
        let mut document = Document::new("Foo\nBar");
        let mut renderer = Renderer::new();
        renderer
            .initialize(&mut terminal, &document, context(&prompt))
            .unwrap();
        terminal.stdout_mock.clear();

        let previous = document.active_line_index();
        document.move_up();
        renderer
            .move_active_line(&mut terminal, &document, context(&prompt), previous)
            .unwrap();

        let output = terminal.output();
        // Back to the start of "Bar", then one row up to redraw "Foo".
        assert!(output.contains("\u{1b}[1A"));
        assert!(output.contains("> Foo"));
        assert!(output.contains("> Bar"));
    }

    #[test]
    fn test_refresh_clears_rows_of_a_taller_previous_frame() {
        let mut terminal = MockTerminal::new(20, 10);
        let prompt = DefaultPromptPrefix::default();
        let mut renderer = Renderer::new();
        renderer
            .initialize(&mut terminal, &Document::new("a\nb\nc"), context(&prompt))
            .unwrap();
        terminal.stdout_mock.clear();

        renderer
            .refresh(&mut terminal, &Document::new("z"), context(&prompt))
            .unwrap();

        // From row 2 back up to row 0, then three rows: one line and two cleared.
        let output = terminal.output();
        assert!(output.starts_with("\u{1b}[?25l\u{1b}[2A"));
        assert_eq!(rows_of(&output), vec!["> z", "", ""]);
    }

    #[test]
    fn test_tall_document_uses_full_mode_with_window() {
        let mut terminal = MockTerminal::new(20, 3);
        let prompt = LineNumberPromptPrefix::default();
        let document = Document::new("1\n2\n3\n4\n5\n6");
        let mut renderer = Renderer::new();

        renderer
            .initialize(&mut terminal, &document, context(&prompt))
            .unwrap();

        // Active line is the last one (index 5): the window is pulled back so all
        // three rows show a line.
        assert_eq!(renderer.mode(), RenderMode::Full { skip: 3, take: 3 });
        let text = strip_ansi_escapes::strip_str(terminal.output());
        assert!(text.contains("04 4"));
        assert!(text.contains("05 5"));
        assert!(text.contains("06 6"));
        assert!(!text.contains("03 3"));
    }

    #[test]
    fn test_finish_moves_below_document() {
        let mut terminal = MockTerminal::new(20, 10);
        let prompt = DefaultPromptPrefix::default();
        let mut document = Document::new("a\nb\nc");
        let mut renderer = Renderer::new();
        renderer
            .initialize(&mut terminal, &document, context(&prompt))
            .unwrap();
        let previous = document.active_line_index();
        document.move_to(0);
        renderer
            .move_active_line(&mut terminal, &document, context(&prompt), previous)
            .unwrap();
        terminal.stdout_mock.clear();

        renderer.finish(&mut terminal, &document, context(&prompt)).unwrap();

        let output = terminal.output();
        assert!(output.contains("\u{1b}[2B"));
        assert!(output.ends_with("\r\n"));
    }
}
