// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Write as _;

use crossterm::{Command,
                cursor::MoveToColumn,
                style::StyledContent,
                terminal::{Clear, ClearType}};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{CommonResultWithError, Highlighter, LineBuffer, LineEditorError,
            PromptSegment, StyledSegments, ViewportWindow, compute_column_window,
            plain_segments};

/// Appends the ANSI encoding of `command` to `acc`.
///
/// # Errors
///
/// Returns [`LineEditorError::Render`] if formatting fails.
pub fn queue_ansi(
    acc: &mut String,
    command: impl Command,
) -> CommonResultWithError<(), LineEditorError> {
    command.write_ansi(acc)?;
    Ok(())
}

/// Converts a row or column count into what crossterm expects.
#[must_use]
pub fn as_u16(value: usize) -> u16 { u16::try_from(value).unwrap_or(u16::MAX) }

/// Everything [`build_line`] needs to draw one line.
#[derive(Clone, Copy)]
pub struct RowLayout<'a> {
    pub prompt: &'a PromptSegment,
    pub buffer: &'a LineBuffer,
    /// Grapheme index to put the terminal cursor at. Also decides the horizontal
    /// scroll, so passing `0` shows the line from its start.
    pub cursor: usize,
    pub terminal_width: usize,
    pub highlighter: Option<&'a dyn Highlighter>,
}

impl std::fmt::Debug for RowLayout<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowLayout")
            .field("prompt", &self.prompt)
            .field("buffer", &self.buffer)
            .field("cursor", &self.cursor)
            .field("terminal_width", &self.terminal_width)
            .field("has_highlighter", &self.highlighter.is_some())
            .finish()
    }
}

impl RowLayout<'_> {
    /// Columns left for content after the prompt. The last terminal column is kept
    /// free for the cursor.
    #[must_use]
    pub fn content_budget(&self) -> usize {
        self.terminal_width
            .saturating_sub(self.prompt.display_width())
            .saturating_sub(1)
    }
}

/// Where [`build_line`] left things.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLayout {
    pub window: ViewportWindow,
    /// Screen column of the terminal cursor.
    pub cursor_column: usize,
}

/// Redraws the row the terminal cursor is on: clears it, draws the prompt and the
/// visible part of the highlighted content, pads to the end of the content budget,
/// and moves the terminal cursor to the buffer cursor.
///
/// # Errors
///
/// Returns [`LineEditorError::Render`] if formatting fails.
pub fn build_line(
    acc: &mut String,
    row: RowLayout<'_>,
) -> CommonResultWithError<LineLayout, LineEditorError> {
    queue_ansi(acc, MoveToColumn(0))?;
    queue_ansi(acc, Clear(ClearType::CurrentLine))?;
    row.prompt.render_into(acc)?;

    let budget = row.content_budget();
    let widths: Vec<usize> = row.buffer.graphemes().map(UnicodeWidthStr::width).collect();
    let window = compute_column_window(&widths, budget, row.cursor);

    let segments = match row.highlighter {
        Some(highlighter) => highlighter.highlight(row.buffer.content()),
        None => plain_segments(row.buffer.content()),
    };
    let drawn_width = write_clipped_segments(acc, &segments, window, budget)?;
    write!(acc, "{:width$}", "", width = budget.saturating_sub(drawn_width))?;

    let before_cursor = row
        .buffer
        .slice(window.skip, window.skip + window.cursor);
    let cursor_column = (row.prompt.display_width() + UnicodeWidthStr::width(before_cursor))
        .min(row.terminal_width.saturating_sub(1));
    queue_ansi(acc, MoveToColumn(as_u16(cursor_column)))?;

    Ok(LineLayout {
        window,
        cursor_column,
    })
}

/// Writes the graphemes of `segments` inside `window`, keeping each segment's style.
/// Stops before exceeding `max_width` columns. Returns the columns written.
fn write_clipped_segments(
    acc: &mut String,
    segments: &StyledSegments,
    window: ViewportWindow,
    max_width: usize,
) -> CommonResultWithError<usize, LineEditorError> {
    let mut grapheme_index = 0;
    let mut drawn_width = 0;

    for segment in segments {
        let mut piece = String::new();
        for grapheme in segment.content().graphemes(true) {
            let is_visible = window.contains(grapheme_index);
            grapheme_index += 1;
            if !is_visible {
                continue;
            }
            let width = UnicodeWidthStr::width(grapheme);
            if drawn_width + width > max_width {
                break;
            }
            drawn_width += width;
            piece.push_str(grapheme);
        }
        if !piece.is_empty() {
            write!(acc, "{}", StyledContent::new(*segment.style(), piece))?;
        }
        if grapheme_index >= window.end() {
            break;
        }
    }

    Ok(drawn_width)
}

#[cfg(test)]
mod tests {
    use crossterm::style::{Color, ContentStyle};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::WordHighlighter;

    fn prompt() -> PromptSegment { PromptSegment::new(">", ContentStyle::new(), 1) }

    fn build(buffer: &LineBuffer, cursor: usize, width: usize) -> (String, LineLayout) {
        let prompt = prompt();
        let mut acc = String::new();
        let layout = build_line(
            &mut acc,
            RowLayout {
                prompt: &prompt,
                buffer,
                cursor,
                terminal_width: width,
                highlighter: None,
            },
        )
        .unwrap();
        (acc, layout)
    }

    #[test]
    fn test_short_line_is_padded_and_cursor_placed() {
        let buffer = LineBuffer::new("Foo");
        let (output, layout) = build(&buffer, 3, 10);

        // Budget: 10 - "> " - 1 = 7.
        assert_eq!(layout.window, ViewportWindow { skip: 0, take: 3, cursor: 3 });
        assert_eq!(layout.cursor_column, 5);
        assert_eq!(
            output,
            format!("\u{1b}[1G\u{1b}[2K> Foo{}\u{1b}[6G", " ".repeat(4))
        );
    }

    #[test]
    fn test_long_line_scrolls_to_cursor() {
        let buffer = LineBuffer::new("abcdefghijklmnopqrstuvwxyz");
        let (output, layout) = build(&buffer, 26, 12);

        // Budget: 12 - 2 - 1 = 9 graphemes, the cursor sits in the last column.
        assert_eq!(layout.window, ViewportWindow { skip: 17, take: 9, cursor: 9 });
        let text = strip_ansi_escapes::strip_str(&output);
        assert_eq!(text, "> rstuvwxyz");
        assert!(output.ends_with("\u{1b}[12G"));
    }

    #[test]
    fn test_cursor_zero_shows_line_start() {
        let buffer = LineBuffer::new("abcdefghijklmnopqrstuvwxyz");
        let (output, _) = build(&buffer, 0, 12);
        let text = strip_ansi_escapes::strip_str(&output);
        assert_eq!(text, "> abcdefghi");
        assert!(output.ends_with("\u{1b}[3G"));
    }

    #[test]
    fn test_wide_graphemes_move_cursor_by_display_width() {
        let buffer = LineBuffer::new("😀😀x");
        let (output, _) = build(&buffer, 2, 40);
        // Prompt "> " is 2 columns, two emoji are 4 more.
        assert!(output.ends_with("\u{1b}[7G"));
    }

    #[test]
    fn test_wide_graphemes_scroll_by_columns() {
        let buffer = LineBuffer::new("中".repeat(40));
        let (output, layout) = build(&buffer, 40, 12);

        // Budget of 9 columns holds four 2 column graphemes, the cursor follows them.
        assert_eq!(layout.window, ViewportWindow { skip: 36, take: 4, cursor: 4 });
        assert_eq!(layout.cursor_column, 10);
        assert_eq!(strip_ansi_escapes::strip_str(&output), "> 中中中中 ");
        assert!(output.ends_with("\u{1b}[11G"));
    }

    #[test]
    fn test_wide_graphemes_keep_cursor_on_screen_mid_line() {
        let buffer = LineBuffer::new("😀".repeat(30));
        for cursor in 0..=30 {
            let (_, layout) = build(&buffer, cursor, 12);
            assert!(layout.cursor_column < 12, "cursor={cursor}");
            assert!(layout.window.cursor <= layout.window.take, "cursor={cursor}");
        }
    }

    #[test]
    fn test_highlighted_segments_are_clipped_with_their_style() {
        let red = ContentStyle {
            foreground_color: Some(Color::Red),
            ..ContentStyle::new()
        };
        let highlighter = WordHighlighter::new().add_word("let", red);
        let buffer = LineBuffer::new("let value = 1");
        let prompt = prompt();
        let mut acc = String::new();
        build_line(
            &mut acc,
            RowLayout {
                prompt: &prompt,
                buffer: &buffer,
                cursor: 0,
                terminal_width: 40,
                highlighter: Some(&highlighter),
            },
        )
        .unwrap();

        assert!(acc.contains(&format!("{}", StyledContent::new(red, "let"))));
        assert_eq!(
            strip_ansi_escapes::strip_str(&acc).trim_end(),
            "> let value = 1"
        );
    }

    #[test]
    fn test_content_budget_never_underflows() {
        let prompt = prompt();
        let buffer = LineBuffer::new("abc");
        let row = RowLayout {
            prompt: &prompt,
            buffer: &buffer,
            cursor: 0,
            terminal_width: 1,
            highlighter: None,
        };
        assert_eq!(row.content_budget(), 0);
    }
}
