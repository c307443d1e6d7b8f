// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use tokio_util::sync::CancellationToken;

use crate::{CommonResultWithError, EditCommandKind, INPUT_POLL_INTERVAL, InlineVec,
            InputSource, KeyBindingRegistry, KeyPress, LineEditorError,
            PASTE_BATCH_THRESHOLD};

pub const DEBUG_INPUT_PUMP: bool = false;

/// Pulls keys out of an [`InputSource`] one at a time.
///
/// After a key is read, every other key the source already has ready is drained into
/// a batch. The key that was read first is never part of the batch and is handed out
/// as-is. A batch of at least [`PASTE_BATCH_THRESHOLD`] keys is taken to be a paste
/// (nobody types that fast), so in multi-line mode every key bound to
/// [`crate::EditCommand::Submit`] in the batch is rewritten to the key bound to
/// [`crate::EditCommand::NewLine`]. Pasting several lines then inserts them instead
/// of submitting the first one.
pub struct InputPump {
    source: Box<dyn InputSource>,
    queue: VecDeque<KeyPress>,
}

impl std::fmt::Debug for InputPump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputPump")
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

impl InputPump {
    #[must_use]
    pub fn new(source: Box<dyn InputSource>) -> Self {
        Self {
            source,
            queue: VecDeque::new(),
        }
    }

    /// Number of keys already drained from the source but not handed out yet.
    #[must_use]
    pub fn queued(&self) -> usize { self.queue.len() }

    /// Returns the next key, waiting for one if needed. The source is polled every
    /// [`INPUT_POLL_INTERVAL`] and `cancellation` is checked before each poll. Returns
    /// `None` once `cancellation` fires.
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::Io`] if the source can't be polled or read.
    pub async fn read_key(
        &mut self,
        registry: &KeyBindingRegistry,
        multiline: bool,
        cancellation: &CancellationToken,
    ) -> CommonResultWithError<Option<KeyPress>, LineEditorError> {
        loop {
            if let Some(key_press) = self.queue.pop_front() {
                return Ok(Some(key_press));
            }

            if !self.wait_for_key(cancellation).await? {
                return Ok(None);
            }

            let Some(first) = self.source.read_key()? else {
                continue;
            };

            let mut batch: InlineVec<KeyPress> = InlineVec::new();
            while self.source.is_key_available()? {
                match self.source.read_key()? {
                    Some(key_press) => batch.push(key_press),
                    None => break,
                }
            }

            if multiline
                && batch.len() >= PASTE_BATCH_THRESHOLD
                && !self.source.is_exempt_from_paste_heuristic()
            {
                rewrite_submit_as_new_line(&mut batch, registry);
            }

            DEBUG_INPUT_PUMP.then(|| {
                tracing::debug!(message = "input pump: batch", size = batch.len());
            });

            self.queue.extend(batch);
            return Ok(Some(first));
        }
    }

    /// Returns `false` if `cancellation` fired before a key became available.
    async fn wait_for_key(
        &mut self,
        cancellation: &CancellationToken,
    ) -> CommonResultWithError<bool, LineEditorError> {
        loop {
            if cancellation.is_cancelled() {
                return Ok(false);
            }
            if self.source.is_key_available()? {
                return Ok(true);
            }
            tokio::select! {
                () = cancellation.cancelled() => return Ok(false),
                () = tokio::time::sleep(INPUT_POLL_INTERVAL) => {}
            }
        }
    }
}

fn rewrite_submit_as_new_line(
    batch: &mut InlineVec<KeyPress>,
    registry: &KeyBindingRegistry,
) {
    let (Some(submit), Some(new_line)) = (
        registry.find_key_for(EditCommandKind::Submit),
        registry.find_key_for(EditCommandKind::NewLine),
    ) else {
        return;
    };
    for key_press in batch.iter_mut() {
        if *key_press == submit {
            *key_press = new_line;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ModifierKeysMask, ScriptedInputSource, SpecialKey, keypress};

    fn new_line_key() -> KeyPress {
        keypress!(@special ModifierKeysMask::new().with_shift(), SpecialKey::Enter)
    }

    fn enter_key() -> KeyPress { keypress!(@special SpecialKey::Enter) }

    async fn read_all(
        pump: &mut InputPump,
        registry: &KeyBindingRegistry,
        multiline: bool,
    ) -> Vec<KeyPress> {
        let token = CancellationToken::new();
        let mut keys = vec![];
        while pump.queued() > 0 || keys.is_empty() {
            match pump.read_key(registry, multiline, &token).await.unwrap() {
                Some(key_press) => keys.push(key_press),
                None => break,
            }
        }
        keys
    }

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_paste_burst_turns_enters_into_new_lines() {
        let source = ScriptedInputSource::new().with_paste_heuristic();
        source.push_str("x");
        for _ in 0..6 {
            source.push_submit();
        }
        let registry = KeyBindingRegistry::with_defaults();
        let mut pump = InputPump::new(Box::new(source));

        let keys = read_all(&mut pump, &registry, true).await;
        let mut expected = vec![keypress!(@char 'x')];
        expected.extend(vec![new_line_key(); 6]);
        assert_eq!(keys, expected);
    }

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_first_key_is_never_rewritten() {
        let source = ScriptedInputSource::new().with_paste_heuristic();
        for _ in 0..6 {
            source.push_submit();
        }
        let registry = KeyBindingRegistry::with_defaults();
        let mut pump = InputPump::new(Box::new(source));

        let keys = read_all(&mut pump, &registry, true).await;
        let mut expected = vec![enter_key()];
        expected.extend(vec![new_line_key(); 5]);
        assert_eq!(keys, expected);
    }

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_four_drained_keys_are_not_a_paste() {
        let source = ScriptedInputSource::new().with_paste_heuristic();
        source.push_str("abcd").push_submit();
        let registry = KeyBindingRegistry::with_defaults();
        let mut pump = InputPump::new(Box::new(source));

        let keys = read_all(&mut pump, &registry, true).await;
        assert_eq!(keys.len(), 5);
        assert_eq!(keys[4], enter_key());
    }

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_small_batch_is_left_alone() {
        let source = ScriptedInputSource::new().with_paste_heuristic();
        source.push_str("abc").push_submit();
        let registry = KeyBindingRegistry::with_defaults();
        let mut pump = InputPump::new(Box::new(source));

        let keys = read_all(&mut pump, &registry, true).await;
        assert_eq!(keys.len(), 4);
        assert_eq!(keys[3], enter_key());
    }

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_single_line_mode_never_rewrites() {
        let source = ScriptedInputSource::new().with_paste_heuristic();
        source.push_str("hello").push_submit();
        let registry = KeyBindingRegistry::with_defaults();
        let mut pump = InputPump::new(Box::new(source));

        let keys = read_all(&mut pump, &registry, false).await;
        assert_eq!(keys.last(), Some(&enter_key()));
    }

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_exempt_source_never_rewrites() {
        let source = ScriptedInputSource::new();
        source.push_str("hello").push_submit();
        let registry = KeyBindingRegistry::with_defaults();
        let mut pump = InputPump::new(Box::new(source));

        let keys = read_all(&mut pump, &registry, true).await;
        assert_eq!(keys.last(), Some(&enter_key()));
    }

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_burst_break_splits_batches() {
        let source = ScriptedInputSource::new().with_paste_heuristic();
        source.push_str("hello").push_burst_break().push_submit();
        let registry = KeyBindingRegistry::with_defaults();
        let mut pump = InputPump::new(Box::new(source));
        let token = CancellationToken::new();

        let mut keys = vec![];
        for _ in 0..6 {
            keys.push(pump.read_key(&registry, true, &token).await.unwrap());
        }
        assert_eq!(keys[5], Some(enter_key()));
    }

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_cancellation_returns_none() {
        let registry = KeyBindingRegistry::with_defaults();
        let mut pump = InputPump::new(Box::new(ScriptedInputSource::new()));
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(INPUT_POLL_INTERVAL * 4).await;
            canceller.cancel();
        });

        let key = pump.read_key(&registry, false, &token).await.unwrap();
        assert_eq!(key, None);
    }

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_already_cancelled_returns_none_even_with_keys() {
        let source = ScriptedInputSource::new();
        source.push_str("x");
        let registry = KeyBindingRegistry::with_defaults();
        let mut pump = InputPump::new(Box::new(source));
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(pump.read_key(&registry, false, &token).await.unwrap(), None);
    }
}
