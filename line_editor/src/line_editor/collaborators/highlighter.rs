// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::HashMap;

use crossterm::style::{ContentStyle, StyledContent};
use unicode_segmentation::UnicodeSegmentation;

use crate::InlineVec;

/// Highlighted text, in order. Concatenating the contents gives back the input.
pub type StyledSegments = InlineVec<StyledContent<String>>;

/// Colors the content of a line. It is handed the whole line, and the renderer clips
/// the result to the visible part.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, text: &str) -> StyledSegments;
}

/// The whole text as one unstyled segment. Used when there is no [`Highlighter`].
#[must_use]
pub fn plain_segments(text: &str) -> StyledSegments {
    let mut acc = StyledSegments::new();
    if !text.is_empty() {
        acc.push(StyledContent::new(ContentStyle::new(), text.to_string()));
    }
    acc
}

/// Styles whole words from a table, eg: keywords of a small language. Words are
/// found with Unicode word boundaries and matched ignoring case, unless
/// [`WordHighlighter::case_sensitive`] is set.
#[derive(Debug, Clone, Default)]
pub struct WordHighlighter {
    words: HashMap<String, ContentStyle>,
    is_case_sensitive: bool,
}

impl WordHighlighter {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Call before adding words.
    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.is_case_sensitive = true;
        self
    }

    #[must_use]
    pub fn add_word(mut self, word: &str, style: ContentStyle) -> Self {
        let key = self.key_for(word);
        self.words.insert(key, style);
        self
    }

    fn key_for(&self, word: &str) -> String {
        if self.is_case_sensitive {
            word.to_string()
        } else {
            word.to_lowercase()
        }
    }
}

impl Highlighter for WordHighlighter {
    fn highlight(&self, text: &str) -> StyledSegments {
        let mut acc = StyledSegments::new();
        let mut plain = String::new();

        for token in text.split_word_bounds() {
            match self.words.get(&self.key_for(token)) {
                Some(style) => {
                    if !plain.is_empty() {
                        acc.push(StyledContent::new(
                            ContentStyle::new(),
                            std::mem::take(&mut plain),
                        ));
                    }
                    acc.push(StyledContent::new(*style, token.to_string()));
                }
                None => plain.push_str(token),
            }
        }

        if !plain.is_empty() {
            acc.push(StyledContent::new(ContentStyle::new(), plain));
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use crossterm::style::Color;
    use pretty_assertions::assert_eq;

    use super::*;

    fn red() -> ContentStyle {
        ContentStyle {
            foreground_color: Some(Color::Red),
            ..ContentStyle::new()
        }
    }

    fn contents(segments: &StyledSegments) -> Vec<(&str, bool)> {
        segments
            .iter()
            .map(|it| (it.content().as_str(), *it.style() != ContentStyle::new()))
            .collect()
    }

    #[test]
    fn test_keywords_are_styled() {
        let highlighter = WordHighlighter::new().add_word("let", red());
        let segments = highlighter.highlight("let a = LET; letter");
        assert_eq!(
            contents(&segments),
            vec![
                ("let", true),
                (" a = ", false),
                ("LET", true),
                ("; letter", false),
            ]
        );
    }

    #[test]
    fn test_case_sensitive() {
        let highlighter = WordHighlighter::new().case_sensitive().add_word("let", red());
        let segments = highlighter.highlight("LET let");
        assert_eq!(contents(&segments), vec![("LET ", false), ("let", true)]);
    }

    #[test]
    fn test_segments_concatenate_to_input() {
        let highlighter = WordHighlighter::new().add_word("👍", red());
        let text = "ok 👍 done";
        let joined: String = highlighter
            .highlight(text)
            .iter()
            .map(|it| it.content().as_str())
            .collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_plain_segments() {
        assert_eq!(plain_segments("").len(), 0);
        assert_eq!(contents(&plain_segments("abc")), vec![("abc", false)]);
    }
}
