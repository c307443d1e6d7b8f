// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Write as _;

use crossterm::style::{Color, ContentStyle, StyledContent};
use unicode_width::UnicodeWidthStr;

use crate::{CommonResultWithError, InlineString, LineEditorError};

pub const DEFAULT_PROMPT: &str = ">";

/// The prompt drawn in front of one line: a label, then `margin` spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSegment {
    pub label: InlineString,
    pub style: ContentStyle,
    pub margin: usize,
}

impl PromptSegment {
    pub fn new(label: &str, style: ContentStyle, margin: usize) -> Self {
        Self {
            label: label.into(),
            style,
            margin,
        }
    }

    /// Columns taken by the label. Escape sequences embedded in it take none.
    #[must_use]
    pub fn label_width(&self) -> usize {
        UnicodeWidthStr::width(strip_ansi_escapes::strip_str(&self.label).as_str())
    }

    /// Columns taken by the label and the margin.
    #[must_use]
    pub fn display_width(&self) -> usize { self.label_width() + self.margin }

    /// Appends the styled label and the margin to `acc`.
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::Render`] if formatting fails.
    pub fn render_into(&self, acc: &mut String) -> CommonResultWithError<(), LineEditorError> {
        write!(acc, "{}", StyledContent::new(self.style, self.label.as_str()))?;
        write!(acc, "{:width$}", "", width = self.margin)?;
        Ok(())
    }
}

/// Decides the prompt for each line of the document.
pub trait PromptPrefixProvider: Send + Sync {
    fn prompt_for(&self, line_index: usize) -> PromptSegment;
}

fn check_for_line_break(label: &str) -> CommonResultWithError<(), LineEditorError> {
    if label.contains(['\n', '\r']) {
        return Err(LineEditorError::new_configuration(format!(
            "prompt {label:?} can't contain a line break"
        )));
    }
    Ok(())
}

/// One label for the first line and another for the lines after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPromptPrefix {
    first_line: InlineString,
    other_lines: InlineString,
    style: ContentStyle,
}

impl Default for DefaultPromptPrefix {
    fn default() -> Self {
        Self {
            first_line: DEFAULT_PROMPT.into(),
            other_lines: DEFAULT_PROMPT.into(),
            style: ContentStyle::new(),
        }
    }
}

impl DefaultPromptPrefix {
    /// # Errors
    ///
    /// Returns [`LineEditorError::Configuration`] if either label contains a line
    /// break.
    pub fn try_new(
        first_line: &str,
        other_lines: &str,
    ) -> CommonResultWithError<Self, LineEditorError> {
        check_for_line_break(first_line)?;
        check_for_line_break(other_lines)?;
        Ok(Self {
            first_line: first_line.into(),
            other_lines: other_lines.into(),
            style: ContentStyle::new(),
        })
    }

    /// Same label on every line.
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::Configuration`] if `prompt` contains a line break.
    pub fn try_new_uniform(prompt: &str) -> CommonResultWithError<Self, LineEditorError> {
        Self::try_new(prompt, prompt)
    }

    #[must_use]
    pub fn with_style(mut self, style: ContentStyle) -> Self {
        self.style = style;
        self
    }
}

impl PromptPrefixProvider for DefaultPromptPrefix {
    fn prompt_for(&self, line_index: usize) -> PromptSegment {
        let label = match line_index {
            0 => &self.first_line,
            _ => &self.other_lines,
        };
        PromptSegment::new(label, self.style, 1)
    }
}

/// Numbers the lines, starting at `01`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumberPromptPrefix {
    style: ContentStyle,
}

impl Default for LineNumberPromptPrefix {
    fn default() -> Self {
        Self {
            style: ContentStyle {
                foreground_color: Some(Color::Yellow),
                background_color: Some(Color::Blue),
                ..ContentStyle::new()
            },
        }
    }
}

impl LineNumberPromptPrefix {
    #[must_use]
    pub fn new(style: ContentStyle) -> Self { Self { style } }
}

impl PromptPrefixProvider for LineNumberPromptPrefix {
    fn prompt_for(&self, line_index: usize) -> PromptSegment {
        PromptSegment {
            label: InlineString::from(format!("{:02}", line_index + 1)),
            style: self.style,
            margin: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_default_prompt() {
        let prefix = DefaultPromptPrefix::default();
        let segment = prefix.prompt_for(0);
        assert_eq!(segment.label.as_str(), ">");
        assert_eq!(segment.display_width(), 2);
        assert_eq!(prefix.prompt_for(5), segment);
    }

    #[test]
    fn test_first_and_other_lines() {
        let prefix = DefaultPromptPrefix::try_new("[[", "..").unwrap();
        assert_eq!(prefix.prompt_for(0).label.as_str(), "[[");
        assert_eq!(prefix.prompt_for(1).label.as_str(), "..");
        assert_eq!(prefix.prompt_for(2).label.as_str(), "..");
    }

    #[test_case("a\nb", ">" ; "first line")]
    #[test_case(">", "a\r\nb" ; "other lines")]
    fn test_line_break_is_a_configuration_error(first: &str, others: &str) {
        let result = DefaultPromptPrefix::try_new(first, others);
        assert!(matches!(result, Err(LineEditorError::Configuration { .. })));
    }

    #[test]
    fn test_line_numbers() {
        let prefix = LineNumberPromptPrefix::default();
        assert_eq!(prefix.prompt_for(0).label.as_str(), "01");
        assert_eq!(prefix.prompt_for(9).label.as_str(), "10");
        assert_eq!(prefix.prompt_for(99).label.as_str(), "100");
        assert_eq!(prefix.prompt_for(0).style.foreground_color, Some(Color::Yellow));
        assert_eq!(prefix.prompt_for(0).display_width(), 3);
    }

    #[test]
    fn test_width_ignores_escape_sequences_and_counts_wide_chars() {
        let segment = PromptSegment::new("\u{1b}[31m😀\u{1b}[0m", ContentStyle::new(), 2);
        assert_eq!(segment.label_width(), 2);
        assert_eq!(segment.display_width(), 4);
    }

    #[test]
    fn test_render_plain_and_styled() {
        let mut acc = String::new();
        PromptSegment::new(">", ContentStyle::new(), 1)
            .render_into(&mut acc)
            .unwrap();
        assert_eq!(acc, "> ");

        let mut acc = String::new();
        LineNumberPromptPrefix::default()
            .prompt_for(0)
            .render_into(&mut acc)
            .unwrap();
        assert!(acc.contains("01"));
        assert_eq!(strip_ansi_escapes::strip_str(&acc), "01 ");
    }
}
