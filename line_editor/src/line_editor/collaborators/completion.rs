// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Supplies candidates for tab completion.
///
/// The active line is split around the word at the cursor into `prefix`, `word` and
/// `suffix`. Return the candidates in the order they should cycle, or `None` (or an
/// empty list) for no suggestions.
///
/// Any `Fn(&str, &str, &str) -> Option<Vec<String>>` closure is a `TextCompletion`.
pub trait TextCompletion: Send + Sync {
    fn get_completions(&self, prefix: &str, word: &str, suffix: &str)
    -> Option<Vec<String>>;
}

impl<F> TextCompletion for F
where
    F: Fn(&str, &str, &str) -> Option<Vec<String>> + Send + Sync,
{
    fn get_completions(
        &self,
        prefix: &str,
        word: &str,
        suffix: &str,
    ) -> Option<Vec<String>> {
        self(prefix, word, suffix)
    }
}
