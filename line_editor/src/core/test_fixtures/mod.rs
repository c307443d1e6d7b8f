// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures for driving a [`crate::LineEditor`] without a real terminal. They are
//! public so that programs embedding the editor can test their own key bindings,
//! completions and validators the same way this crate does.

// Attach sources.
pub mod mock_terminal;
pub mod output_device_ext;
pub mod scripted_input_source;
pub mod stdout_mock;

// Re-export.
pub use mock_terminal::*;
pub use output_device_ext::*;
pub use scripted_input_source::*;
pub use stdout_mock::*;
