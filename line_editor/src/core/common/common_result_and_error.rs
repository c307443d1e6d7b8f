// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

/// Type alias to make it easy to work with [`miette::Result`] and [`miette::Report`],
/// which are [`std::error::Error`] wrappers. Used at the edges of the crate (logging
/// setup, history snapshots) where errors are reported to a human.
pub type CommonResult<T> = miette::Result<T>;

/// Type alias for results that carry a concrete error type. Most of the editing engine
/// uses this with [`LineEditorError`], so callers can `match` on the failure.
pub type CommonResultWithError<T, E> = std::result::Result<T, E>;

/// Every way in which the line editor can fail.
///
/// Note that neither cancellation (the user pressed `Esc`, or the host cancelled the
/// token) nor a failed validation is an error. Both are reported through
/// [`crate::TextEditorState`].
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LineEditorError {
    /// Setup time mistakes, eg: a prompt that contains a line break.
    #[error("📝 Invalid configuration: {message}")]
    #[diagnostic(
        code(r3bl_line_editor::configuration),
        help("Fix the configuration before creating the editor")
    )]
    Configuration { message: String },

    /// The terminal can't run an interactive editor.
    #[error("🖥️ Unsupported terminal environment: {reason}")]
    #[diagnostic(
        code(r3bl_line_editor::unsupported_environment),
        help("The terminal must be interactive and support ANSI escape sequences")
    )]
    UnsupportedEnvironment { reason: String },

    /// A bug in the editor itself, eg: no grapheme boundary could be found.
    #[error("🐞 Internal invariant violated: {message}")]
    #[diagnostic(code(r3bl_line_editor::internal_invariant_violation))]
    InternalInvariantViolation { message: String },

    /// History can't be serialized or deserialized.
    #[error("📜 History snapshot error: {message}")]
    #[diagnostic(code(r3bl_line_editor::history_snapshot))]
    HistorySnapshot { message: String },

    /// Assembling a frame of control sequences failed.
    #[error("🎨 Render error: {0}")]
    #[diagnostic(code(r3bl_line_editor::render))]
    Render(#[from] std::fmt::Error),

    #[error("💾 IO error: {0}")]
    #[diagnostic(code(r3bl_line_editor::io))]
    Io(#[from] std::io::Error),
}

impl LineEditorError {
    pub fn new_configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn new_unsupported_environment(reason: impl Into<String>) -> Self {
        Self::UnsupportedEnvironment {
            reason: reason.into(),
        }
    }

    pub fn new_invariant_violation(message: impl Into<String>) -> Self {
        Self::InternalInvariantViolation {
            message: message.into(),
        }
    }
}
