// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod line_builder;
pub mod renderer_impl;
pub mod viewport;

// Re-export.
pub use line_builder::*;
pub use renderer_impl::*;
pub use viewport::*;
