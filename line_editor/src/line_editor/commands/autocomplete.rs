// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tab completion. Each invocation replaces the word under (or just before) the
//! cursor with a candidate from the [`crate::TextCompletion`] provider. Invoking it
//! again at the same word start cycles through the candidates.

use super::{AutoCompleteDirection, EditContext};
use crate::{CommonResultWithError, LineEditorError, ok};

pub const DEBUG_AUTOCOMPLETE: bool = false;

/// Remembers where the last completion started and which candidate comes next, so
/// that repeated presses cycle. Reset at the start of each session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AutoCompleteState {
    /// Line of the document the cycle belongs to.
    pub last_line: Option<usize>,
    pub last_start: Option<usize>,
    pub index: isize,
}

impl AutoCompleteState {
    /// Call with the active line before each command. A different line than last
    /// time starts over, so the same column on another line doesn't continue the
    /// old cycle.
    pub fn follow_line(&mut self, line: usize) {
        if self.last_line != Some(line) {
            *self = Self {
                last_line: Some(line),
                ..Self::default()
            };
        }
    }
}

/// Completes the word at the cursor in `context.buffer`. Leaves the cursor where it
/// was when there is no provider, no candidate, or no match.
///
/// # Errors
///
/// Returns [`LineEditorError::InternalInvariantViolation`] if the cursor can't be
/// placed after the inserted candidate.
pub fn complete(
    context: &mut EditContext<'_>,
    direction: AutoCompleteDirection,
) -> CommonResultWithError<(), LineEditorError> {
    let Some(completion) = context.completion else {
        return ok!();
    };
    let buffer = &mut *context.buffer;
    let state = &mut *context.autocomplete_state;
    let original_position = buffer.cursor();

    // Find the word span.
    if buffer.is_at_character() {
        buffer.move_to_beginning_of_word();
    } else if buffer.is_at_end_of_word() {
        buffer.move_to_previous_word();
    }
    let start = buffer.cursor();
    if buffer.is_at_character() {
        buffer.move_to_end_of_word();
    }
    let end = buffer.cursor();

    // A new word start begins a new cycle.
    if state.last_start != Some(start) {
        state.index = match direction {
            AutoCompleteDirection::Next => 0,
            AutoCompleteDirection::Previous => -1,
        };
    }

    let prefix = buffer.slice(0, start).to_string();
    let word = buffer.slice(start, end).to_string();
    let suffix = buffer.slice(end, buffer.len()).to_string();

    let candidates = completion
        .get_completions(&prefix, &word, &suffix)
        .unwrap_or_default();

    let Some(index) = find_candidate_index(&word, &candidates, state.index, direction)
    else {
        buffer.set_position(original_position);
        return ok!();
    };

    DEBUG_AUTOCOMPLETE.then(|| {
        tracing::debug!(
            message = "autocomplete",
            ?direction,
            word = ?word,
            candidate = ?candidates[index],
        );
    });

    if start != end {
        buffer.clear(start, end - start, false);
    }
    buffer.set_position(start);
    buffer.insert_and_advance(&candidates[index])?;

    let index = isize::try_from(index).unwrap_or(isize::MAX);
    state.last_start = Some(start);
    state.index = match direction {
        AutoCompleteDirection::Next => index.saturating_add(1),
        AutoCompleteDirection::Previous => index.saturating_sub(1),
    };

    ok!()
}

/// Picks the candidate to insert.
/// 1. Blank word: the stored cycle index, wrapped into range.
/// 2. Word equals a candidate: its neighbor in `direction`, wrapped.
/// 3. Word is a prefix of a candidate: the first such candidate.
/// 4. Otherwise nothing.
fn find_candidate_index(
    word: &str,
    candidates: &[String],
    stored_index: isize,
    direction: AutoCompleteDirection,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    let max = isize::try_from(candidates.len() - 1).unwrap_or(isize::MAX);

    if word.trim().is_empty() {
        return usize::try_from(wrap_around(stored_index, max)).ok();
    }

    if let Some(exact) = candidates.iter().position(|it| it == word) {
        let exact = isize::try_from(exact).unwrap_or(isize::MAX);
        let neighbor = match direction {
            AutoCompleteDirection::Next => exact.saturating_add(1),
            AutoCompleteDirection::Previous => exact.saturating_sub(1),
        };
        return usize::try_from(wrap_around(neighbor, max)).ok();
    }

    candidates.iter().position(|it| it.starts_with(word))
}

/// Below zero wraps to `max`, above `max` wraps to zero.
fn wrap_around(value: isize, max: isize) -> isize {
    if value < 0 {
        max
    } else if value > max {
        0
    } else {
        value
    }
}
