// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{ControlFlowExtended, LineEditorConfig, SessionDispatcher, SessionOutcome,
            TextEditorState};
use crate::{AutoCompleteState, CommonResultWithError, CrosstermInputSource,
            CrosstermTerminal, Document, EditCommand, EditContext, Highlighter, History,
            InputPump, InputSource, Key, KeyBindingRegistry, KeyPress, LineEditorError,
            ModifierKeysMask, RenderContext, Renderer, SubmitAction, Terminal,
            TextCompletion, Validator};

pub const DEBUG_LINE_EDITOR: bool = false;

/// The optional collaborators of a [`LineEditor`]. Each one is absent by default:
/// no completion, plain text, and every submission accepted.
#[derive(Default)]
pub struct EditorCapabilities {
    pub completion: Option<Box<dyn TextCompletion>>,
    pub highlighter: Option<Box<dyn Highlighter>>,
    pub validator: Option<Box<dyn Validator>>,
}

impl std::fmt::Debug for EditorCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorCapabilities")
            .field("has_completion", &self.completion.is_some())
            .field("has_highlighter", &self.highlighter.is_some())
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

impl EditorCapabilities {
    #[must_use]
    pub fn with_completion(mut self, completion: impl TextCompletion + 'static) -> Self {
        self.completion = Some(Box::new(completion));
        self
    }

    #[must_use]
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Some(Box::new(highlighter));
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }
}

/// An embeddable line editor. Each call to [`LineEditor::read_document`] runs one
/// session: it draws the document below the terminal cursor, edits it key by key, and
/// returns its text once the user submits or cancels.
///
/// History and key bindings live as long as the editor and are shared by all of its
/// sessions. One editor runs one session at a time.
///
/// ```no_run
/// use r3bl_line_editor::*;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn run() -> CommonResultWithError<(), LineEditorError> {
/// let config = LineEditorConfig::default().with_multiline(true);
/// let mut editor = LineEditor::try_new_crossterm(config, EditorCapabilities::default())?;
/// let text = editor.read_document(CancellationToken::new()).await?;
/// if editor.state() == TextEditorState::Ok {
///     println!("{text}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct LineEditor {
    terminal: Box<dyn Terminal>,
    input: InputPump,
    key_bindings: KeyBindingRegistry,
    history: History,
    capabilities: EditorCapabilities,
    config: LineEditorConfig,
    renderer: Renderer,
    autocomplete_state: AutoCompleteState,
    state: TextEditorState,
    error_message: Option<String>,
    /// The text of the last session, if the validator rejected it.
    retained_document: Option<Document>,
}

impl std::fmt::Debug for LineEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("input", &self.input)
            .field("key_bindings", &self.key_bindings)
            .field("history_count", &self.history.count())
            .field("capabilities", &self.capabilities)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}

impl LineEditor {
    /// Creates an editor with the default key bindings.
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::Configuration`] if `config` is invalid.
    pub fn new(
        terminal: Box<dyn Terminal>,
        input_source: Box<dyn InputSource>,
        config: LineEditorConfig,
        capabilities: EditorCapabilities,
    ) -> CommonResultWithError<Self, LineEditorError> {
        config.validate()?;
        Ok(Self {
            terminal,
            input: InputPump::new(input_source),
            key_bindings: KeyBindingRegistry::with_defaults(),
            history: History::new(config.history_max_size),
            capabilities,
            config,
            renderer: Renderer::new(),
            autocomplete_state: AutoCompleteState::default(),
            state: TextEditorState::Active,
            error_message: None,
            retained_document: None,
        })
    }

    /// An editor on stdout and the crossterm event stream.
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::Configuration`] if `config` is invalid.
    pub fn try_new_crossterm(
        config: LineEditorConfig,
        capabilities: EditorCapabilities,
    ) -> CommonResultWithError<Self, LineEditorError> {
        Self::new(
            Box::new(CrosstermTerminal::default()),
            Box::new(CrosstermInputSource::new()),
            config,
            capabilities,
        )
    }

    /// Whether `terminal` can host a session. [`LineEditor::read_document`] fails on a
    /// terminal for which this is `false`.
    #[must_use]
    pub fn is_supported(terminal: &dyn Terminal) -> bool {
        terminal.is_interactive() && terminal.supports_ansi()
    }

    #[must_use]
    pub fn state(&self) -> TextEditorState { self.state }

    /// Why the validator rejected the last submission.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> { self.error_message.as_deref() }

    /// Back to [`TextEditorState::Active`] after a rejected submission. The rejected
    /// text stays, so the next session starts with it.
    pub fn reset_state(&mut self) {
        self.state = TextEditorState::Active;
        self.error_message = None;
    }

    /// Drops the text kept from a rejected submission. The next session starts with
    /// the initial text again.
    pub fn discard_retained_document(&mut self) { self.retained_document = None; }

    #[must_use]
    pub fn config(&self) -> &LineEditorConfig { &self.config }

    #[must_use]
    pub fn history(&self) -> &History { &self.history }

    pub fn history_mut(&mut self) -> &mut History { &mut self.history }

    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindingRegistry { &self.key_bindings }

    pub fn key_bindings_mut(&mut self) -> &mut KeyBindingRegistry {
        &mut self.key_bindings
    }

    /// Binds `key` with exactly the modifiers in `mask`. `factory` is called for every
    /// press.
    pub fn register_key_binding(
        &mut self,
        key: Key,
        mask: ModifierKeysMask,
        factory: impl Fn() -> EditCommand + Send + Sync + 'static,
    ) {
        self.key_bindings
            .add(KeyPress::new(key, mask), Arc::new(factory));
    }

    /// Returns `false` if nothing was bound to `key` with `mask`.
    pub fn remove_key_binding(&mut self, key: Key, mask: ModifierKeysMask) -> bool {
        self.key_bindings.remove(KeyPress::new(key, mask))
    }

    /// Runs one session and returns its text:
    /// - Submitted: the document, and [`TextEditorState::Ok`]. Non blank text is
    ///   added to the history.
    /// - Rejected by the validator: the document, and [`TextEditorState::Invalid`].
    ///   The next session continues with it.
    /// - Cancelled by the user or by `cancellation`: the initial text, and
    ///   [`TextEditorState::Cancel`].
    ///
    /// The terminal is in raw mode for the duration of the session, and the cursor is
    /// visible once it ends, also when it ends with an error.
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::UnsupportedEnvironment`] if the terminal can't host
    /// a session (see [`LineEditor::is_supported`]), and propagates I/O and internal
    /// errors.
    pub async fn read_document(
        &mut self,
        cancellation: CancellationToken,
    ) -> CommonResultWithError<String, LineEditorError> {
        if !self.terminal.is_interactive() {
            return Err(LineEditorError::new_unsupported_environment(
                "the terminal is not interactive",
            ));
        }
        if !self.terminal.supports_ansi() {
            return Err(LineEditorError::new_unsupported_environment(
                "the terminal doesn't support ANSI escape sequences",
            ));
        }

        self.state = TextEditorState::Active;
        self.history.reset();
        self.autocomplete_state = AutoCompleteState::default();
        let mut document = self
            .retained_document
            .take()
            .unwrap_or_else(|| Document::new(&self.config.initial_text));

        self.terminal.enter_raw_mode()?;
        let result = self.run_session(&mut document, &cancellation).await;
        let cursor_result = self.terminal.set_cursor_visible(true);
        let raw_mode_result = self.terminal.exit_raw_mode();
        let outcome = result?;
        cursor_result?;
        raw_mode_result?;

        DEBUG_LINE_EDITOR.then(|| {
            tracing::debug!(message = "line editor: session ended", outcome = ?outcome);
        });

        self.state = outcome.state();
        let text = match outcome {
            SessionOutcome::Submitted(text) => {
                self.error_message = None;
                text
            }
            SessionOutcome::Cancelled(text) => text,
            SessionOutcome::Invalid { text, message } => {
                self.error_message = message;
                self.retained_document = Some(document);
                text
            }
        };
        Ok(text)
    }

    async fn run_session(
        &mut self,
        document: &mut Document,
        cancellation: &CancellationToken,
    ) -> CommonResultWithError<SessionOutcome, LineEditorError> {
        let Self {
            terminal,
            input,
            key_bindings,
            history,
            capabilities,
            config,
            renderer,
            autocomplete_state,
            ..
        } = self;
        let config = &*config;
        let capabilities = &*capabilities;

        let mut dispatcher = SessionDispatcher {
            terminal: terminal.as_mut(),
            renderer,
            history,
            config,
            render_context: RenderContext {
                prompt: config.prompt.as_ref(),
                highlighter: capabilities.highlighter.as_deref(),
            },
            validator: capabilities.validator.as_deref(),
        };
        dispatcher.start(document)?;

        loop {
            let maybe_key_press = input
                .read_key(key_bindings, config.multiline, cancellation)
                .await?;

            let action = match maybe_key_press {
                None => {
                    DEBUG_LINE_EDITOR.then(|| {
                        tracing::debug!(message = "line editor: cancellation requested");
                    });
                    SubmitAction::Cancel
                }
                Some(key_press) => {
                    let Some(command) = resolve_command(key_bindings, key_press) else {
                        continue;
                    };
                    autocomplete_state.follow_line(document.active_line_index());
                    let mut context = EditContext::new(
                        document.active_buffer_mut(),
                        capabilities.completion.as_deref(),
                        autocomplete_state,
                    );
                    context.execute(&command)?;
                    let Some(action) = context.submit_action() else {
                        dispatcher.render_line(document)?;
                        continue;
                    };
                    action
                }
            };

            match dispatcher.dispatch(document, action) {
                ControlFlowExtended::ReturnOk(outcome) => return Ok(outcome),
                ControlFlowExtended::ReturnError(error) => return Err(error),
                ControlFlowExtended::Continue if action == SubmitAction::Cancel => {
                    return Err(LineEditorError::new_invariant_violation(
                        "cancel did not end the session",
                    ));
                }
                ControlFlowExtended::Continue => {}
            }
        }
    }
}

/// The bound command, else the insertion of a printable character. Other keys have
/// no command.
fn resolve_command(registry: &KeyBindingRegistry, key_press: KeyPress) -> Option<EditCommand> {
    registry.get_command(key_press).or_else(|| {
        key_press
            .printable_char()
            .map(|character| EditCommand::Insert(character.to_string()))
    })
}
