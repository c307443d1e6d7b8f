// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The pluggable parts of the editor. The host hands these to
//! [`crate::LineEditor::new`] through [`crate::EditorCapabilities`] and the
//! [`crate::LineEditorConfig`]; none of them is required.

// Attach sources.
pub mod completion;
pub mod highlighter;
pub mod prompt_prefix;
pub mod validator;

// Re-export.
pub use completion::*;
pub use highlighter::*;
pub use prompt_prefix::*;
pub use validator::*;
