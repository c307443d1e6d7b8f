// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Outcome of a [`Validator`]. A failure is not an error: the editor moves to
/// [`crate::TextEditorState::Invalid`], keeps the text, and exposes `message` through
/// [`crate::LineEditor::error_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_successful: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    #[must_use]
    pub fn success() -> Self {
        Self {
            is_successful: true,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_successful: false,
            message: Some(message.into()),
        }
    }
}

/// Checks the full text of a document when the user submits it. Any
/// `Fn(&str) -> ValidationResult` closure is a `Validator`.
pub trait Validator: Send + Sync {
    fn validate(&self, text: &str) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn(&str) -> ValidationResult + Send + Sync,
{
    fn validate(&self, text: &str) -> ValidationResult { self(text) }
}
