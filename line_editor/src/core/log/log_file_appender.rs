// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use miette::IntoDiagnostic;
use tracing_appender::rolling::RollingFileAppender;

use crate::CommonResult;

/// Opens `log_file_path` for appending, creating missing parent folders. The file is
/// never rotated, so one debugging run of a host program ends up in one file.
///
/// Wrapping the result in [`tracing_appender::non_blocking`] loses the lines written
/// right before the process exits, which are the interesting ones when a session
/// goes wrong. So it is used as a blocking writer.
///
/// # Errors
///
/// Returns an error if the path doesn't end in a file name, or if its folder can't be
/// created.
pub fn try_create_log_file_appender(log_file_path: &str) -> CommonResult<RollingFileAppender> {
    let path = Path::new(log_file_path);

    let Some(file_name) = path.file_name() else {
        miette::bail!("log file path {log_file_path:?} doesn't end in a file name");
    };

    let folder = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(folder).into_diagnostic()?;

    Ok(tracing_appender::rolling::never(folder, file_name))
}
