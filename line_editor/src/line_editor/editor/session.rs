// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ControlFlowExtended, DEBUG_LINE_EDITOR, LineEditorConfig, SessionOutcome};
use crate::{CommonResultWithError, Document, History, HistoryEntry, LineEditorError,
            RenderContext, Renderer, SubmitAction, Terminal, ValidationResult,
            Validator, ok};

/// Carries out the [`SubmitAction`]s of one session: the document level edits and
/// moves that a command can't do on its own line, and the end of the session.
///
/// It only borrows the parts of the [`crate::LineEditor`] it needs, which leaves the
/// input pump and the autocomplete state free for the key loop.
pub struct SessionDispatcher<'a> {
    pub terminal: &'a mut dyn Terminal,
    pub renderer: &'a mut Renderer,
    pub history: &'a mut History,
    pub config: &'a LineEditorConfig,
    pub render_context: RenderContext<'a>,
    pub validator: Option<&'a dyn Validator>,
}

impl std::fmt::Debug for SessionDispatcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDispatcher")
            .field("renderer", &self.renderer)
            .field("history_count", &self.history.count())
            .field("config", &self.config)
            .field("has_validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

impl SessionDispatcher<'_> {
    /// Draws the document for the first time.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn start(&mut self, document: &Document) -> CommonResultWithError<(), LineEditorError> {
        self.renderer
            .initialize(&mut *self.terminal, document, self.render_context)
    }

    /// Redraws the active line after a command edited it in place.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn render_line(
        &mut self,
        document: &Document,
    ) -> CommonResultWithError<(), LineEditorError> {
        self.renderer.render_active_line(
            &mut *self.terminal,
            document,
            self.render_context,
            None,
        )
    }

    pub fn dispatch(
        &mut self,
        document: &mut Document,
        action: SubmitAction,
    ) -> ControlFlowExtended<SessionOutcome, LineEditorError> {
        DEBUG_LINE_EDITOR.then(|| {
            tracing::debug!(
                message = "line editor: dispatch",
                action = %action,
                active_line = document.active_line_index(),
                cursor = document.active_buffer().cursor()
            );
        });

        match self.apply(document, action) {
            Ok(Some(outcome)) => ControlFlowExtended::ReturnOk(outcome),
            Ok(None) => ControlFlowExtended::Continue,
            Err(error) => ControlFlowExtended::ReturnError(error),
        }
    }

    fn apply(
        &mut self,
        document: &mut Document,
        action: SubmitAction,
    ) -> CommonResultWithError<Option<SessionOutcome>, LineEditorError> {
        match action {
            SubmitAction::Cancel => return self.cancel(document).map(Some),
            SubmitAction::Submit => return self.submit(document).map(Some),
            SubmitAction::NewLine => self.new_line(document)?,
            SubmitAction::Backspace => self.backspace(document)?,
            SubmitAction::Delete => self.delete(document)?,
            SubmitAction::MoveLeft => self.move_left(document)?,
            SubmitAction::MoveRight => self.move_right(document)?,
            SubmitAction::MoveToPreviousWord => self.move_to_previous_word(document)?,
            SubmitAction::MoveToNextWord => self.move_to_next_word(document)?,
            SubmitAction::MoveLineStart => {
                document.active_buffer_mut().move_to_line_start();
                self.render_line(document)?;
            }
            SubmitAction::MoveLineEnd => {
                document.active_buffer_mut().move_to_line_end();
                self.render_line(document)?;
            }
            SubmitAction::MoveTextStart => {
                let previous = document.active_line_index();
                document.move_to(0);
                document.active_buffer_mut().move_to_line_start();
                self.redraw_after_move(document, previous)?;
            }
            SubmitAction::MoveTextEnd => {
                let previous = document.active_line_index();
                document.move_to(document.last_line_index());
                document.active_buffer_mut().move_to_line_end();
                self.redraw_after_move(document, previous)?;
            }
            SubmitAction::MoveUp => {
                let target = document.active_line_index().saturating_sub(1);
                self.move_vertically(document, target)?;
            }
            SubmitAction::MoveDown => {
                let target = document.active_line_index() + 1;
                self.move_vertically(document, target)?;
            }
            SubmitAction::MovePageUp => {
                let target = document.active_line_index().saturating_sub(self.page_size());
                self.move_vertically(document, target)?;
            }
            SubmitAction::MovePageDown => {
                let target = document.active_line_index().saturating_add(self.page_size());
                self.move_vertically(document, target)?;
            }
            SubmitAction::MoveFirstLine => self.move_vertically(document, 0)?,
            SubmitAction::MoveLastLine => {
                let target = document.last_line_index();
                self.move_vertically(document, target)?;
            }
            SubmitAction::PreviousHistory => {
                if self.history.move_previous(document) {
                    self.show_history_entry(document)?;
                }
            }
            SubmitAction::NextHistory => {
                if self.history.move_next() {
                    self.show_history_entry(document)?;
                }
            }
        }
        Ok(None)
    }

    fn page_size(&self) -> usize {
        self.config
            .page_size
            .unwrap_or_else(|| self.terminal.height())
            .max(1)
    }

    fn refresh(&mut self, document: &Document) -> CommonResultWithError<(), LineEditorError> {
        self.renderer
            .refresh(&mut *self.terminal, document, self.render_context)
    }

    fn finish(&mut self, document: &Document) -> CommonResultWithError<(), LineEditorError> {
        self.renderer
            .finish(&mut *self.terminal, document, self.render_context)
    }

    /// Redraws after the active line may have changed from `previous`.
    fn redraw_after_move(
        &mut self,
        document: &Document,
        previous: usize,
    ) -> CommonResultWithError<(), LineEditorError> {
        if previous == document.active_line_index() {
            return self.render_line(document);
        }
        self.renderer.move_active_line(
            &mut *self.terminal,
            document,
            self.render_context,
            previous,
        )
    }

    fn cancel(
        &mut self,
        document: &mut Document,
    ) -> CommonResultWithError<SessionOutcome, LineEditorError> {
        *document = Document::new(&self.config.initial_text);
        self.refresh(document)?;
        self.finish(document)?;
        Ok(SessionOutcome::Cancelled(self.config.initial_text.clone()))
    }

    fn submit(
        &mut self,
        document: &Document,
    ) -> CommonResultWithError<SessionOutcome, LineEditorError> {
        let text = document.text();
        let result = self
            .validator
            .map_or_else(ValidationResult::success, |validator| {
                validator.validate(&text)
            });
        self.finish(document)?;

        if !result.is_successful {
            return Ok(SessionOutcome::Invalid {
                text,
                message: result.message,
            });
        }
        if !document.is_blank() {
            self.history.add_entry(HistoryEntry::from(document));
        }
        Ok(SessionOutcome::Submitted(text))
    }

    fn new_line(&mut self, document: &mut Document) -> CommonResultWithError<(), LineEditorError> {
        if !self.config.multiline {
            return ok!();
        }
        if self
            .config
            .max_line_count
            .is_some_and(|max| document.line_count() >= max)
        {
            return ok!();
        }
        document.split_at_cursor();
        self.refresh(document)
    }

    fn backspace(&mut self, document: &mut Document) -> CommonResultWithError<(), LineEditorError> {
        let buffer = document.active_buffer_mut();
        let cursor = buffer.cursor();
        if cursor > 0 {
            buffer.clear(cursor - 1, 1, true);
            return self.render_line(document);
        }
        if document.join_backward() {
            self.refresh(document)?;
        }
        ok!()
    }

    fn delete(&mut self, document: &mut Document) -> CommonResultWithError<(), LineEditorError> {
        let buffer = document.active_buffer_mut();
        if !buffer.is_at_end() {
            let cursor = buffer.cursor();
            buffer.clear(cursor, 1, false);
            return self.render_line(document);
        }
        if document.join_forward() {
            self.refresh(document)?;
        }
        ok!()
    }

    fn move_left(&mut self, document: &mut Document) -> CommonResultWithError<(), LineEditorError> {
        if document.active_buffer_mut().move_left() {
            return self.render_line(document);
        }
        self.move_to_end_of_previous_line(document)
    }

    fn move_right(&mut self, document: &mut Document) -> CommonResultWithError<(), LineEditorError> {
        if document.active_buffer_mut().move_right() {
            return self.render_line(document);
        }
        self.move_to_start_of_next_line(document)
    }

    fn move_to_previous_word(
        &mut self,
        document: &mut Document,
    ) -> CommonResultWithError<(), LineEditorError> {
        if document.active_buffer().cursor() == 0 {
            return self.move_to_end_of_previous_line(document);
        }
        document.active_buffer_mut().move_to_previous_word();
        self.render_line(document)
    }

    fn move_to_next_word(
        &mut self,
        document: &mut Document,
    ) -> CommonResultWithError<(), LineEditorError> {
        if document.active_buffer().is_at_end() {
            return self.move_to_start_of_next_line(document);
        }
        document.active_buffer_mut().move_to_next_word();
        self.render_line(document)
    }

    fn move_to_end_of_previous_line(
        &mut self,
        document: &mut Document,
    ) -> CommonResultWithError<(), LineEditorError> {
        let previous = document.active_line_index();
        if !document.move_up() {
            return ok!();
        }
        document.active_buffer_mut().move_to_line_end();
        self.redraw_after_move(document, previous)
    }

    fn move_to_start_of_next_line(
        &mut self,
        document: &mut Document,
    ) -> CommonResultWithError<(), LineEditorError> {
        let previous = document.active_line_index();
        if !document.move_down() {
            return ok!();
        }
        document.active_buffer_mut().move_to_line_start();
        self.redraw_after_move(document, previous)
    }

    /// Makes line `target` (clamped) active. The cursor keeps its column where the
    /// new line is long enough.
    fn move_vertically(
        &mut self,
        document: &mut Document,
        target: usize,
    ) -> CommonResultWithError<(), LineEditorError> {
        let previous = document.active_line_index();
        let column = document.active_buffer().cursor();
        if !document.move_to(target) {
            return ok!();
        }
        document.active_buffer_mut().set_position(column);
        self.redraw_after_move(document, previous)
    }

    fn show_history_entry(
        &mut self,
        document: &mut Document,
    ) -> CommonResultWithError<(), LineEditorError> {
        let Some(lines) = self.history.current().map(|entry| entry.lines.clone()) else {
            return ok!();
        };
        document.set_lines(lines);
        self.refresh(document)
    }
}
