// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod log_file_appender;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use log_file_appender::*;
pub use tracing_config::*;
pub use tracing_init::*;
