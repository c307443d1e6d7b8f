// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::Display;

/// Where a [`crate::LineEditor`] is in its session.
///
/// `Ok` and `Cancel` end a session. `Invalid` ends one attempt: the rejected text is
/// kept, and the next [`crate::LineEditor::read_document`] picks it up again so the
/// user can fix it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum TextEditorState {
    #[default]
    Active,
    Ok,
    Cancel,
    Invalid,
}

impl TextEditorState {
    #[must_use]
    pub fn is_active(&self) -> bool { matches!(self, TextEditorState::Active) }
}

/// What the key loop does after a keystroke has been handled.
#[derive(Debug)]
pub enum ControlFlowExtended<T, E> {
    ReturnOk(T),
    ReturnError(E),
    Continue,
}

/// How a session ended, and the text it ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Submitted(String),
    Cancelled(String),
    Invalid {
        text: String,
        message: Option<String>,
    },
}

impl SessionOutcome {
    #[must_use]
    pub fn state(&self) -> TextEditorState {
        match self {
            SessionOutcome::Submitted(_) => TextEditorState::Ok,
            SessionOutcome::Cancelled(_) => TextEditorState::Cancel,
            SessionOutcome::Invalid { .. } => TextEditorState::Invalid,
        }
    }
}
