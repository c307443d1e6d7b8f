// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod document;
pub mod line_buffer;
pub mod line_buffer_word_motion;

// Re-export.
pub use document::*;
pub use line_buffer::*;
