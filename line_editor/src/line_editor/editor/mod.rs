// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod editor_config;
pub mod editor_state;
pub mod line_editor_impl;
pub mod session;

// Re-export.
pub use editor_config::*;
pub use editor_state::*;
pub use line_editor_impl::*;
pub use session::*;
