// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The editing engine. [`editor::LineEditor`] drives a session: the [`InputPump`]
//! hands it keys, the [`KeyBindingRegistry`] turns them into [`EditCommand`]s that
//! edit a [`Document`], and the [`Renderer`] draws the result.

// Attach sources.
pub mod collaborators;
pub mod commands;
pub mod document;
pub mod editor;
pub mod history;
pub mod input_pump;
pub mod renderer;

// Re-export.
pub use collaborators::*;
pub use commands::*;
pub use document::*;
pub use editor::*;
pub use history::*;
pub use input_pump::*;
pub use renderer::*;
