// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{CommonResultWithError, Document, HISTORY_SIZE_MAX, LINE_SEPARATOR,
            LineEditorError};

pub const DEBUG_HISTORY: bool = false;

/// One submitted document, line by line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub lines: Vec<String>,
}

impl HistoryEntry {
    #[must_use]
    pub fn text(&self) -> String { self.lines.join(LINE_SEPARATOR) }
}

impl From<&str> for HistoryEntry {
    fn from(text: &str) -> Self {
        Self {
            lines: text
                .replace("\r\n", "\n")
                .split('\n')
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl From<&Document> for HistoryEntry {
    fn from(document: &Document) -> Self {
        Self {
            lines: document.lines_as_strings(),
        }
    }
}

/// Previously submitted documents, oldest first, and the navigation state of the
/// current session.
///
/// Navigation starts with nothing selected. The first step back selects the newest
/// entry. Before leaving the document being typed, it is saved as the *intermediate
/// draft*, and stepping forward past the newest entry brings it back.
///
/// Entries survive across sessions; the navigation state is [`History::reset`] at the
/// start of each one. The editor never writes history to disk. Hosts that want to keep
/// it use [`History::to_json`] and [`History::try_from_json`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    pub max_size: usize,
    /// Index into `entries`. `None` means nothing is selected.
    cursor: Option<usize>,
    intermediate: Option<HistoryEntry>,
    show_intermediate: bool,
}

impl Default for History {
    fn default() -> Self { Self::new(HISTORY_SIZE_MAX) }
}

impl History {
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
            cursor: None,
            intermediate: None,
            show_intermediate: false,
        }
    }

    #[must_use]
    pub fn count(&self) -> usize { self.entries.len() }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> { self.entries.iter() }

    /// Adds `text`, split into lines.
    pub fn add(&mut self, text: &str) { self.add_entry(HistoryEntry::from(text)); }

    /// Adds `entry` unless it equals the newest entry, line by line. Drops the oldest
    /// entry once there are more than `max_size`. Always clears the selection.
    pub fn add_entry(&mut self, entry: HistoryEntry) {
        self.cursor = None;

        if self.entries.back() == Some(&entry) {
            DEBUG_HISTORY.then(|| {
                tracing::debug!(message = "history: skip duplicate", entry = ?entry);
            });
            return;
        }

        self.entries.push_back(entry);
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
    }

    /// Clears the navigation state. Entries are kept.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.intermediate = None;
        self.show_intermediate = false;
    }

    /// What navigation currently shows: the draft, if it was just brought back, else
    /// the selected entry.
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        if self.show_intermediate && self.intermediate.is_some() {
            return self.intermediate.as_ref();
        }
        self.cursor.and_then(|index| self.entries.get(index))
    }

    /// Steps to an older entry. `document` is what is on screen right now, which is
    /// saved as the draft when leaving it (unless it is blank). Returns `true` if
    /// [`History::current`] changed.
    pub fn move_previous(&mut self, document: &Document) -> bool {
        let is_leaving_draft =
            (self.cursor.is_none() && self.intermediate.is_none()) || self.show_intermediate;
        if is_leaving_draft && !document.is_blank() {
            self.intermediate = Some(HistoryEntry::from(document));
        }

        let was_showing_draft = std::mem::replace(&mut self.show_intermediate, false);

        let moved = match self.cursor {
            None if self.entries.is_empty() => false,
            None => {
                self.cursor = Some(self.entries.len() - 1);
                true
            }
            Some(0) => false,
            Some(index) => {
                self.cursor = Some(index - 1);
                true
            }
        };

        // Nothing older to step to, so the draft stays on screen.
        if !moved && was_showing_draft {
            self.show_intermediate = true;
        }

        DEBUG_HISTORY.then(|| {
            tracing::debug!(message = "history: previous", moved, cursor = ?self.cursor);
        });
        moved
    }

    /// Steps to a newer entry, or from the newest entry to the draft. Returns `true`
    /// if [`History::current`] changed.
    pub fn move_next(&mut self) -> bool {
        let Some(index) = self.cursor else {
            return false;
        };

        let moved = if index + 1 < self.entries.len() {
            self.cursor = Some(index + 1);
            true
        } else if self.intermediate.is_some() && !self.show_intermediate {
            self.show_intermediate = true;
            true
        } else {
            false
        };

        DEBUG_HISTORY.then(|| {
            tracing::debug!(
                message = "history: next",
                moved,
                cursor = ?self.cursor,
                show_intermediate = self.show_intermediate
            );
        });
        moved
    }

    /// Copy of all entries, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<HistoryEntry> { self.entries.iter().cloned().collect() }

    /// Replaces all entries with `entries` (oldest first), keeping only the newest
    /// `max_size`. Clears the navigation state.
    pub fn restore(&mut self, entries: Vec<HistoryEntry>) {
        self.reset();
        let skip = entries.len().saturating_sub(self.max_size);
        self.entries = entries.into_iter().skip(skip).collect();
    }

    /// # Errors
    ///
    /// Returns [`LineEditorError::HistorySnapshot`] if serialization fails.
    pub fn to_json(&self) -> CommonResultWithError<String, LineEditorError> {
        serde_json::to_string(&self.entries).map_err(|error| {
            LineEditorError::HistorySnapshot {
                message: error.to_string(),
            }
        })
    }

    /// Builds a history with the default `max_size` from the output of
    /// [`History::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::HistorySnapshot`] if `json` isn't a list of entries.
    pub fn try_from_json(json: &str) -> CommonResultWithError<Self, LineEditorError> {
        let entries: Vec<HistoryEntry> =
            serde_json::from_str(json).map_err(|error| {
                LineEditorError::HistorySnapshot {
                    message: error.to_string(),
                }
            })?;
        let mut it = Self::default();
        it.restore(entries);
        Ok(it)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn history_of(texts: &[&str]) -> History {
        let mut history = History::default();
        for text in texts {
            history.add(text);
        }
        history
    }

    fn current_text(history: &History) -> Option<String> {
        history.current().map(HistoryEntry::text)
    }

    #[test]
    fn test_add_skips_consecutive_duplicates() {
        let mut history = history_of(&["Patrik", "Patrik"]);
        assert_eq!(history.count(), 1);

        history.add("Svensson");
        history.add("Patrik");
        assert_eq!(history.count(), 3);
    }

    #[test]
    fn test_add_compares_line_by_line() {
        let mut history = history_of(&["a\nb"]);
        history.add("a\nb");
        assert_eq!(history.count(), 1);
        history.add("a\nb\n");
        assert_eq!(history.count(), 2);
    }

    #[test]
    fn test_add_evicts_oldest_past_max_size() {
        let mut history = History::new(2);
        history.add("one");
        history.add("two");
        history.add("three");
        let texts: Vec<_> = history.entries().map(HistoryEntry::text).collect();
        assert_eq!(texts, vec!["two", "three"]);
    }

    #[test]
    fn test_navigate_back_and_forth() {
        let mut history = history_of(&["Foo", "Bar", "Baz"]);
        let document = Document::default();

        assert!(history.move_previous(&document));
        assert_eq!(current_text(&history).as_deref(), Some("Baz"));
        assert!(history.move_previous(&document));
        assert!(history.move_previous(&document));
        assert_eq!(current_text(&history).as_deref(), Some("Foo"));
        assert!(!history.move_previous(&document));
        assert_eq!(current_text(&history).as_deref(), Some("Foo"));

        assert!(history.move_next());
        assert!(history.move_next());
        assert_eq!(current_text(&history).as_deref(), Some("Baz"));
        // No draft was saved, since the document was blank.
        assert!(!history.move_next());
    }

    #[test]
    fn test_empty_history_does_not_move() {
        let mut history = History::default();
        assert!(!history.move_previous(&Document::new("draft")));
        assert!(!history.move_next());
        assert_eq!(history.current(), None);
    }

    #[test]
    fn test_draft_is_restored_after_newest_entry() {
        let mut history = history_of(&["Foo"]);
        let draft = Document::new("half typed\nsecond line");

        assert!(history.move_previous(&draft));
        assert_eq!(current_text(&history).as_deref(), Some("Foo"));

        assert!(history.move_next());
        assert_eq!(
            current_text(&history).as_deref(),
            Some("half typed\nsecond line")
        );
        assert!(!history.move_next());

        // "Foo" was selected before the draft, and nothing is older than it.
        assert!(!history.move_previous(&draft));
        assert_eq!(
            current_text(&history).as_deref(),
            Some("half typed\nsecond line")
        );
    }

    #[test]
    fn test_previous_from_draft_steps_to_older_entry() {
        let mut history = history_of(&["Foo", "Bar"]);
        let draft = Document::new("draft");

        assert!(history.move_previous(&draft));
        assert_eq!(current_text(&history).as_deref(), Some("Bar"));
        assert!(history.move_next());
        assert_eq!(current_text(&history).as_deref(), Some("draft"));

        assert!(history.move_previous(&draft));
        assert_eq!(current_text(&history).as_deref(), Some("Foo"));
        assert!(history.move_next());
        assert!(history.move_next());
        assert_eq!(current_text(&history).as_deref(), Some("draft"));
    }

    #[test]
    fn test_draft_is_not_overwritten_while_browsing() {
        let mut history = history_of(&["Foo", "Bar"]);
        history.move_previous(&Document::new("draft"));
        history.move_previous(&Document::new("Bar"));
        history.move_next();
        history.move_next();
        assert_eq!(current_text(&history).as_deref(), Some("draft"));
    }

    #[test]
    fn test_reset_and_add_clear_navigation() {
        let mut history = history_of(&["Foo"]);
        history.move_previous(&Document::new("draft"));
        history.reset();
        assert_eq!(history.current(), None);
        assert!(!history.move_next());

        history.move_previous(&Document::default());
        history.add("Bar");
        assert_eq!(history.current(), None);
    }

    #[test]
    fn test_json_snapshot_roundtrip() {
        let history = history_of(&["Foo", "multi\nline"]);
        let json = history.to_json().unwrap();
        let restored = History::try_from_json(&json).unwrap();
        assert_eq!(restored.snapshot(), history.snapshot());
        assert_eq!(restored.count(), 2);
    }

    #[test]
    fn test_invalid_json_is_a_snapshot_error() {
        let result = History::try_from_json("{ not a list");
        assert!(matches!(result, Err(LineEditorError::HistorySnapshot { .. })));
    }

    #[test]
    fn test_restore_keeps_newest_entries() {
        let mut history = History::new(2);
        history.restore(vec![
            HistoryEntry::from("a"),
            HistoryEntry::from("b"),
            HistoryEntry::from("c"),
        ]);
        assert_eq!(history.snapshot(), vec![HistoryEntry::from("b"), HistoryEntry::from("c")]);
    }
}
