// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod autocomplete;
pub mod edit_command;
pub mod edit_context;
pub mod key_binding_registry;

// Re-export.
pub use autocomplete::{AutoCompleteState, DEBUG_AUTOCOMPLETE};
pub use edit_command::*;
pub use edit_context::*;
pub use key_binding_registry::*;
