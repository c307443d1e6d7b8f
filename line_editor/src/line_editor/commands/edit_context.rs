// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{AutoCompleteState, EditCommand, SubmitAction};
use crate::{CommonResultWithError, LineBuffer, LineEditorError, TextCompletion, ok};

/// What a command gets to work with: the active line, the completion provider, and
/// the autocomplete cycle state that survives between keystrokes of one session.
///
/// The first [`SubmitAction`] requested wins. After that, further commands are
/// ignored until the editor has handled the action.
pub struct EditContext<'a> {
    pub buffer: &'a mut LineBuffer,
    pub completion: Option<&'a dyn TextCompletion>,
    pub autocomplete_state: &'a mut AutoCompleteState,
    submit_action: Option<SubmitAction>,
}

impl std::fmt::Debug for EditContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditContext")
            .field("buffer", &self.buffer)
            .field("has_completion", &self.completion.is_some())
            .field("autocomplete_state", &self.autocomplete_state)
            .field("submit_action", &self.submit_action)
            .finish()
    }
}

impl<'a> EditContext<'a> {
    pub fn new(
        buffer: &'a mut LineBuffer,
        completion: Option<&'a dyn TextCompletion>,
        autocomplete_state: &'a mut AutoCompleteState,
    ) -> Self {
        Self {
            buffer,
            completion,
            autocomplete_state,
            submit_action: None,
        }
    }

    /// Runs `command`, unless an action has already been submitted.
    ///
    /// # Errors
    ///
    /// Propagates the error of [`EditCommand::execute`].
    pub fn execute(
        &mut self,
        command: &EditCommand,
    ) -> CommonResultWithError<(), LineEditorError> {
        if self.submit_action.is_some() {
            return ok!();
        }
        command.execute(self)
    }

    /// Records `action` for the editor, unless one is already recorded.
    pub fn submit(&mut self, action: SubmitAction) {
        if self.submit_action.is_none() {
            self.submit_action = Some(action);
        }
    }

    #[must_use]
    pub fn submit_action(&self) -> Option<SubmitAction> { self.submit_action }
}
