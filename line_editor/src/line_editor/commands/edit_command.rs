// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{Display, EnumDiscriminants};

use super::{EditContext, autocomplete};
use crate::{CommonResultWithError, LineEditorError, ok};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoCompleteDirection {
    Next,
    Previous,
}

/// Everything a key can be bound to.
///
/// [`EditCommand::Insert`] and [`EditCommand::AutoComplete`] edit the active
/// [`crate::LineBuffer`] directly. Every other variant is forwarded to the
/// [`crate::LineEditor`] as a [`SubmitAction`], since it either ends the session or
/// needs the whole document (or history, or the renderer) to carry out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumDiscriminants)]
#[strum_discriminants(name(EditCommandKind), derive(Hash))]
pub enum EditCommand {
    Insert(String),
    AutoComplete(AutoCompleteDirection),
    Cancel,
    Submit,
    NewLine,
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveToPreviousWord,
    MoveToNextWord,
    MoveLineStart,
    MoveLineEnd,
    MoveTextStart,
    MoveTextEnd,
    MoveUp,
    MoveDown,
    MovePageUp,
    MovePageDown,
    MoveFirstLine,
    MoveLastLine,
    PreviousHistory,
    NextHistory,
}

/// The requests an [`EditCommand`] hands back to the [`crate::LineEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SubmitAction {
    Cancel,
    Submit,
    NewLine,
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveToPreviousWord,
    MoveToNextWord,
    MoveLineStart,
    MoveLineEnd,
    MoveTextStart,
    MoveTextEnd,
    MoveUp,
    MoveDown,
    MovePageUp,
    MovePageDown,
    MoveFirstLine,
    MoveLastLine,
    PreviousHistory,
    NextHistory,
}

impl EditCommand {
    #[must_use]
    pub fn kind(&self) -> EditCommandKind { EditCommandKind::from(self) }

    /// `None` for the commands that edit the buffer themselves.
    #[must_use]
    pub fn submit_action(&self) -> Option<SubmitAction> {
        let it = match self {
            EditCommand::Insert(_) | EditCommand::AutoComplete(_) => return None,
            EditCommand::Cancel => SubmitAction::Cancel,
            EditCommand::Submit => SubmitAction::Submit,
            EditCommand::NewLine => SubmitAction::NewLine,
            EditCommand::Backspace => SubmitAction::Backspace,
            EditCommand::Delete => SubmitAction::Delete,
            EditCommand::MoveLeft => SubmitAction::MoveLeft,
            EditCommand::MoveRight => SubmitAction::MoveRight,
            EditCommand::MoveToPreviousWord => SubmitAction::MoveToPreviousWord,
            EditCommand::MoveToNextWord => SubmitAction::MoveToNextWord,
            EditCommand::MoveLineStart => SubmitAction::MoveLineStart,
            EditCommand::MoveLineEnd => SubmitAction::MoveLineEnd,
            EditCommand::MoveTextStart => SubmitAction::MoveTextStart,
            EditCommand::MoveTextEnd => SubmitAction::MoveTextEnd,
            EditCommand::MoveUp => SubmitAction::MoveUp,
            EditCommand::MoveDown => SubmitAction::MoveDown,
            EditCommand::MovePageUp => SubmitAction::MovePageUp,
            EditCommand::MovePageDown => SubmitAction::MovePageDown,
            EditCommand::MoveFirstLine => SubmitAction::MoveFirstLine,
            EditCommand::MoveLastLine => SubmitAction::MoveLastLine,
            EditCommand::PreviousHistory => SubmitAction::PreviousHistory,
            EditCommand::NextHistory => SubmitAction::NextHistory,
        };
        Some(it)
    }

    /// Runs this command against `context`.
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::InternalInvariantViolation`] if the cursor can't be
    /// placed on a grapheme boundary after an edit.
    pub fn execute(
        &self,
        context: &mut EditContext<'_>,
    ) -> CommonResultWithError<(), LineEditorError> {
        match self {
            EditCommand::Insert(text) => context.buffer.insert_and_advance(text)?,
            EditCommand::AutoComplete(direction) => {
                autocomplete::complete(context, *direction)?;
            }
            _ => {
                if let Some(action) = self.submit_action() {
                    context.submit(action);
                }
            }
        }
        ok!()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_kind_ignores_payload() {
        assert_eq!(
            EditCommand::Insert("a".into()).kind(),
            EditCommand::Insert("b".into()).kind()
        );
        assert_eq!(EditCommand::Submit.kind(), EditCommandKind::Submit);
        assert_ne!(EditCommand::Submit.kind(), EditCommandKind::NewLine);
    }

    #[test]
    fn test_submit_action_mapping() {
        assert_eq!(EditCommand::Insert("x".into()).submit_action(), None);
        assert_eq!(
            EditCommand::AutoComplete(AutoCompleteDirection::Next).submit_action(),
            None
        );
        assert_eq!(
            EditCommand::PreviousHistory.submit_action(),
            Some(SubmitAction::PreviousHistory)
        );
        assert_eq!(SubmitAction::MoveTextEnd.to_string(), "MoveTextEnd");
    }
}
