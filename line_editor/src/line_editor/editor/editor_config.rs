// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use crate::{CommonResultWithError, DefaultPromptPrefix, LineEditorError,
            PromptPrefixProvider, ok};

/// How long the input pump sleeps between two polls of the input source. Also the
/// worst case latency of a cancellation.
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Smallest batch of keys that is taken to be a paste.
pub const PASTE_BATCH_THRESHOLD: usize = 5;

pub const HISTORY_SIZE_MAX: usize = 1_000;

/// Settings for a [`crate::LineEditor`]. Start from [`Default`] and use the `with_*`
/// methods.
///
/// ```
/// use r3bl_line_editor::{LineEditorConfig, LineNumberPromptPrefix};
///
/// let config = LineEditorConfig::default()
///     .with_multiline(true)
///     .with_max_line_count(10)
///     .with_prompt(LineNumberPromptPrefix::default());
/// assert!(config.validate().is_ok());
/// ```
pub struct LineEditorConfig {
    /// Text every session starts with, and what a cancelled session returns.
    pub initial_text: String,
    pub multiline: bool,
    /// `None` means no limit.
    pub max_line_count: Option<usize>,
    /// Lines moved by page up and page down. `None` uses the terminal height.
    pub page_size: Option<usize>,
    pub prompt: Box<dyn PromptPrefixProvider>,
    pub history_max_size: usize,
}

impl Default for LineEditorConfig {
    fn default() -> Self {
        Self {
            initial_text: String::new(),
            multiline: false,
            max_line_count: None,
            page_size: None,
            prompt: Box::new(DefaultPromptPrefix::default()),
            history_max_size: HISTORY_SIZE_MAX,
        }
    }
}

impl std::fmt::Debug for LineEditorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditorConfig")
            .field("initial_text", &self.initial_text)
            .field("multiline", &self.multiline)
            .field("max_line_count", &self.max_line_count)
            .field("page_size", &self.page_size)
            .field("history_max_size", &self.history_max_size)
            .finish_non_exhaustive()
    }
}

impl LineEditorConfig {
    #[must_use]
    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.initial_text = text.into();
        self
    }

    #[must_use]
    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    #[must_use]
    pub fn with_max_line_count(mut self, max_line_count: usize) -> Self {
        self.max_line_count = Some(max_line_count);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl PromptPrefixProvider + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    #[must_use]
    pub fn with_history_max_size(mut self, history_max_size: usize) -> Self {
        self.history_max_size = history_max_size;
        self
    }

    /// # Errors
    ///
    /// Returns [`LineEditorError::Configuration`] if a limit is zero, or if more than
    /// one line is allowed while multi-line editing is off.
    pub fn validate(&self) -> CommonResultWithError<(), LineEditorError> {
        match self.max_line_count {
            Some(0) => {
                return Err(LineEditorError::new_configuration(
                    "max_line_count must be at least 1",
                ));
            }
            Some(max) if max > 1 && !self.multiline => {
                return Err(LineEditorError::new_configuration(format!(
                    "max_line_count is {max} but multiline editing is off"
                )));
            }
            _ => {}
        }
        if self.page_size == Some(0) {
            return Err(LineEditorError::new_configuration(
                "page_size must be at least 1",
            ));
        }
        if self.history_max_size == 0 {
            return Err(LineEditorError::new_configuration(
                "history_max_size must be at least 1",
            ));
        }
        ok!()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = LineEditorConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.multiline);
        assert_eq!(config.history_max_size, HISTORY_SIZE_MAX);
        assert_eq!(config.prompt.prompt_for(0).label.as_str(), ">");
    }

    #[test_case(LineEditorConfig::default().with_max_line_count(0) ; "zero max line count")]
    #[test_case(LineEditorConfig::default().with_max_line_count(3) ; "many lines without multiline")]
    #[test_case(LineEditorConfig::default().with_page_size(0) ; "zero page size")]
    #[test_case(LineEditorConfig::default().with_history_max_size(0) ; "zero history size")]
    fn test_invalid_configuration(config: LineEditorConfig) {
        assert!(matches!(
            config.validate(),
            Err(LineEditorError::Configuration { .. })
        ));
    }

    #[test]
    fn test_single_line_limit_without_multiline_is_fine() {
        let config = LineEditorConfig::default().with_max_line_count(1);
        assert!(config.validate().is_ok());
    }
}
