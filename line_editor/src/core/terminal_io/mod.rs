// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod input_source;
pub mod key_press;
pub mod modifier_keys_mask;
pub mod output_device;
pub mod terminal;
pub mod terminal_io_type_aliases;

// Re-export.
pub use input_source::*;
pub use key_press::*;
pub use modifier_keys_mask::*;
pub use output_device::*;
pub use terminal::*;
pub use terminal_io_type_aliases::*;
