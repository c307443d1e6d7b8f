// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

//! # r3bl_line_editor
//!
//! An embeddable, async, readline-like line editor for terminal programs. A host program
//! asks a [`LineEditor`] for one document at a time; the editor reads keystrokes from an
//! [`InputSource`], edits a (possibly multi-line) [`Document`] made of [`LineBuffer`]s,
//! redraws it on a [`Terminal`] after every keystroke, and returns the final text when
//! the user submits. Cancelling returns the session's initial text instead.
//!
//! ```text
//! keystrokes ─► InputPump ─► KeyBindingRegistry ─► EditCommand ─► EditContext
//!                (paste                               │               │
//!                 heuristic)                          │ SubmitAction  │ LineBuffer edits
//!                                                     ▼               ▼
//!                                   LineEditor (state machine) ─► Renderer ─► Terminal
//!                                        │
//!                                        └─► History, Validator, TextCompletion, Highlighter
//! ```
//!
//! Everything is in terms of grapheme clusters. The cursor never lands inside a
//! cluster, so emoji, combining marks and ZWJ sequences are edited as single units.
//!
//! # Features
//!
//! - Single-line and multi-line editing, with an optional maximum line count.
//! - Word navigation, line and document start/end, page up/down.
//! - Per-session history navigation that preserves the in-progress draft.
//! - Tab completion cycling through candidates supplied by a [`TextCompletion`].
//! - Syntax highlighting through a [`Highlighter`] (eg: [`WordHighlighter`]).
//! - Validation through a [`Validator`], which keeps the buffer for correction.
//! - Paste detection: a burst of keystrokes turns `Enter` into new lines.
//! - Horizontal scrolling of long lines and vertical scrolling of tall documents.
//!
//! # Logging
//!
//! The crate logs via [`tracing`]. Use [`TracingConfig`] and
//! [`try_initialize_logging`] to route the logs to a file, since writing them to
//! stdout would corrupt the editor's output.

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod core;
pub mod line_editor;

// Re-export.
pub use core::*;
pub use line_editor::*;
