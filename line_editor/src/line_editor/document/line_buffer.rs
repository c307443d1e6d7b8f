// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::cmp::Ordering;

use unicode_segmentation::UnicodeSegmentation;

use crate::{CommonResultWithError, LineEditorError};

/// One line of editable text and a cursor.
///
/// Both the cursor and every index in this API count grapheme clusters, not bytes or
/// chars. So `👨‍👩‍👧` (7 chars, 18 bytes) is one step for the cursor, and `clear(0, 1)`
/// removes all of it.
///
/// Invariants:
/// 1. `0 <= cursor <= len()`.
/// 2. The cursor always sits on a grapheme boundary. Byte offsets coming from the
///    outside go through [`LineBuffer::set_byte_position`], which snaps them.
/// 3. A new buffer starts with the cursor at the end of its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    initial_content: String,
    content: String,
    /// Byte offset of the start of each grapheme cluster, followed by
    /// `content.len()`. Always has `len() + 1` entries.
    boundaries: Vec<usize>,
    cursor: usize,
}

impl Default for LineBuffer {
    fn default() -> Self { Self::new("") }
}

impl LineBuffer {
    pub fn new(content: impl Into<String>) -> Self {
        let content: String = content.into();
        let mut it = Self {
            initial_content: content.clone(),
            content,
            boundaries: vec![],
            cursor: 0,
        };
        it.recompute_boundaries();
        it.cursor = it.len();
        it
    }

    fn recompute_boundaries(&mut self) {
        self.boundaries.clear();
        self.boundaries
            .extend(self.content.grapheme_indices(true).map(|(offset, _)| offset));
        self.boundaries.push(self.content.len());
        self.cursor = self.cursor.min(self.len());
    }

    #[must_use]
    pub fn content(&self) -> &str { &self.content }

    /// Number of grapheme clusters.
    #[must_use]
    pub fn len(&self) -> usize { self.boundaries.len() - 1 }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.content.is_empty() }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn cursor_byte_offset(&self) -> usize { self.byte_offset_of(self.cursor) }

    #[must_use]
    pub fn is_at_end(&self) -> bool { self.cursor == self.len() }

    fn byte_offset_of(&self, grapheme_index: usize) -> usize {
        self.boundaries[grapheme_index.min(self.len())]
    }

    #[must_use]
    pub fn grapheme_at(&self, grapheme_index: usize) -> Option<&str> {
        if grapheme_index >= self.len() {
            return None;
        }
        let start = self.boundaries[grapheme_index];
        let end = self.boundaries[grapheme_index + 1];
        Some(&self.content[start..end])
    }

    /// Content of the graphemes in `start..end`, clamped to the buffer.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.len());
        let start = start.min(end);
        &self.content[self.byte_offset_of(start)..self.byte_offset_of(end)]
    }

    pub fn graphemes(&self) -> impl Iterator<Item = &str> {
        self.content.graphemes(true)
    }

    /// Inserts `text` at the cursor. The cursor keeps its index, so it ends up in
    /// front of the inserted text.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let offset = self.cursor_byte_offset();
        self.content.insert_str(offset, text);
        self.recompute_boundaries();
    }

    /// Inserts `text` at the cursor and moves the cursor past it. A leading combining
    /// mark merges with the grapheme in front of the cursor, so the cursor advances by
    /// the bytes inserted, snapped to the next boundary.
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::InternalInvariantViolation`] if no grapheme
    /// boundary can be found after the inserted text.
    pub fn insert_and_advance(
        &mut self,
        text: &str,
    ) -> CommonResultWithError<(), LineEditorError> {
        let target = self.cursor_byte_offset() + text.len();
        self.insert(text);
        self.set_byte_position(target)?;
        Ok(())
    }

    /// Moves the cursor to `target` (clamped to `0..=len()`). Returns `false` if the
    /// cursor was already there.
    pub fn set_position(&mut self, target: usize) -> bool {
        let target = target.min(self.len());
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        true
    }

    /// Moves the cursor to the grapheme boundary nearest to byte offset `target` in
    /// the direction of travel: moving left lands on the last boundary at or before
    /// `target`, moving right on the first boundary at or after it. Returns `false` if
    /// the cursor was already there.
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::InternalInvariantViolation`] if no boundary exists
    /// in the direction of travel.
    pub fn set_byte_position(
        &mut self,
        target: usize,
    ) -> CommonResultWithError<bool, LineEditorError> {
        let target = target.min(self.content.len());
        let index = match self.boundaries.binary_search(&target) {
            Ok(index) => Some(index),
            Err(insertion_point) => match target.cmp(&self.cursor_byte_offset()) {
                Ordering::Less => insertion_point.checked_sub(1),
                Ordering::Greater | Ordering::Equal => {
                    (insertion_point < self.boundaries.len()).then_some(insertion_point)
                }
            },
        };
        match index {
            Some(index) => Ok(self.set_position(index)),
            None => Err(LineEditorError::new_invariant_violation(format!(
                "no grapheme boundary near byte offset {target} in {:?}",
                self.content
            ))),
        }
    }

    /// Removes `count` graphemes starting at `index`, clamped to the end of the
    /// content. An `index` past the last grapheme, or a `count` of zero, is a no-op.
    ///
    /// With `move_cursor_back` set, a cursor that sat after the removed span steps
    /// back by one (this is what `Backspace` wants). Returns the number of graphemes
    /// removed.
    pub fn clear(&mut self, index: usize, count: usize, move_cursor_back: bool) -> usize {
        let len = self.len();
        if count == 0 || index >= len {
            return 0;
        }
        let removed = count.min(len - index);
        let start = self.boundaries[index];
        let end = self.boundaries[index + removed];
        self.content.replace_range(start..end, "");

        if move_cursor_back && self.cursor >= index + removed {
            self.cursor = self.cursor.saturating_sub(1);
        }
        self.recompute_boundaries();
        removed
    }

    /// Removes everything from the cursor to the end and returns it.
    pub fn split_off_at_cursor(&mut self) -> String {
        let offset = self.cursor_byte_offset();
        let rest = self.content.split_off(offset);
        self.recompute_boundaries();
        rest
    }

    /// Restores the content this buffer was created with, cursor at the end.
    pub fn reset(&mut self) {
        self.content.clone_from(&self.initial_content);
        self.recompute_boundaries();
        self.cursor = self.len();
    }

    pub fn move_left(&mut self) -> bool { self.move_left_by(1) }

    pub fn move_right(&mut self) -> bool { self.move_right_by(1) }

    pub fn move_left_by(&mut self, count: usize) -> bool {
        self.set_position(self.cursor.saturating_sub(count))
    }

    pub fn move_right_by(&mut self, count: usize) -> bool {
        self.set_position(self.cursor.saturating_add(count))
    }

    pub fn move_to_line_start(&mut self) -> bool { self.set_position(0) }

    pub fn move_to_line_end(&mut self) -> bool { self.set_position(self.len()) }

    /// Whether the grapheme at `index` is whitespace. Out of range is `None`.
    pub(crate) fn is_whitespace_at(&self, index: usize) -> Option<bool> {
        self.grapheme_at(index)
            .map(|grapheme| grapheme.chars().all(char::is_whitespace))
    }

    /// The cursor is on a non-whitespace grapheme (never true at the end).
    #[must_use]
    pub fn is_at_character(&self) -> bool {
        self.is_whitespace_at(self.cursor) == Some(false)
    }

    /// At position 0 with non-whitespace there, or right after whitespace.
    #[must_use]
    pub fn is_at_beginning_of_word(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.cursor == 0 {
            return self.is_whitespace_at(0) == Some(false);
        }
        self.is_whitespace_at(self.cursor - 1) == Some(true)
    }

    /// Right after a non-whitespace grapheme.
    #[must_use]
    pub fn is_at_end_of_word(&self) -> bool {
        if self.is_empty() || self.cursor == 0 {
            return false;
        }
        self.is_whitespace_at(self.cursor - 1) == Some(false)
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    /// Graphemes that never merge with their neighbors.
    fn grapheme() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "a", "b", "Z", " ", "é", "e\u{301}", "😄", "👍🏽", "👨‍👩‍👧", "中", "-",
        ])
    }

    fn text(max: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(grapheme(), 0..max).prop_map(|it| it.concat())
    }

    proptest! {
        #[test]
        fn cursor_is_always_on_a_boundary(
            content in text(12),
            targets in prop::collection::vec(0usize..64, 1..8),
        ) {
            let mut buffer = LineBuffer::new(content);
            for target in targets {
                buffer.set_byte_position(target).unwrap();
                prop_assert!(buffer.cursor() <= buffer.len());
                prop_assert!(buffer.content().is_char_boundary(buffer.cursor_byte_offset()));
                prop_assert!(buffer.boundaries.contains(&buffer.cursor_byte_offset()));
            }
        }

        #[test]
        fn insert_then_clear_is_identity(
            content in text(10),
            inserted in text(6),
            position in 0usize..12,
        ) {
            let mut buffer = LineBuffer::new(content.clone());
            buffer.set_position(position);
            let index = buffer.cursor();
            let inserted_len = inserted.graphemes(true).count();

            buffer.insert(&inserted);
            buffer.clear(index, inserted_len, false);

            prop_assert_eq!(buffer.content(), content.as_str());
            prop_assert!(buffer.cursor() <= buffer.len());
        }
    }
}
