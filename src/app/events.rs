//! Event handling logic for the application.
//!
//! Keyboard input is dispatched by mode first (settings overlay wins), then
//! by whichever panel currently captures input on the wizard: the feedback
//! editor, the required-inputs form, or the active step's field list.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::app::state::{AppMode, ContentField, ContextField, FeedbackPhase, WizardStep};
use crate::core::{cycle_platform, cycle_tone, visual_line_count};

impl App {
    /// Handles a pasted block of text.
    ///
    /// Multi-line targets take the paste verbatim; single-line fields take
    /// it with newlines collapsed to spaces.
    pub fn handle_paste(&mut self, text: &str) {
        if self.mode == AppMode::Settings {
            if let Some(panel) = self.settings_panel.as_mut() {
                panel.selected_text_mut().push_str(&flatten(text));
            }
            return;
        }

        if self.feedback.phase == FeedbackPhase::Editing {
            self.feedback.editor.insert_str(text);
            return;
        }

        if let Some(form) = self.required_inputs.as_mut() {
            if let Some(field) = form.selected_field_mut() {
                field.value.push_str(&flatten(text));
            }
            return;
        }

        match self.step {
            WizardStep::Context => {
                self.context.selected_text_mut().push_str(&flatten(text));
            }
            WizardStep::Content => match self.content.selected {
                ContentField::Subject => self.content.subject.push_str(&flatten(text)),
                ContentField::Description => {
                    self.content.description.insert_str(text);
                }
                ContentField::MaxHashtags => {
                    let flat = flatten(text);
                    self.content
                        .max_hashtags
                        .extend(flat.chars().filter(char::is_ascii_digit));
                }
                _ => {}
            },
        }
    }

    /// Handles a key event.
    ///
    /// Non-press events are ignored so terminals reporting key releases do
    /// not double every keystroke.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Ctrl+C always quits, even mid-request.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.mode {
            AppMode::Settings => self.handle_settings_key(key),
            AppMode::Wizard => self.handle_wizard_key(key),
        }
    }

    // =========================================================================
    // Settings Overlay
    // =========================================================================

    fn handle_settings_key(&mut self, key: KeyEvent) {
        let Some(panel) = self.settings_panel.as_mut() else {
            self.mode = AppMode::Wizard;
            return;
        };

        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.close_settings(),
            KeyCode::Tab | KeyCode::Down => panel.select_next(),
            KeyCode::BackTab | KeyCode::Up => panel.select_prev(),
            KeyCode::Backspace => {
                panel.selected_text_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                panel.selected_text_mut().push(c);
            }
            _ => {}
        }
    }

    // =========================================================================
    // Wizard Mode
    // =========================================================================

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        // The feedback editor captures everything while it is open.
        match self.feedback.phase {
            FeedbackPhase::Editing => {
                self.handle_feedback_key(key);
                return;
            }
            FeedbackPhase::Submitting => return,
            FeedbackPhase::Idle => {}
        }

        // The required-inputs form captures everything while present.
        if self.required_inputs.is_some() {
            self.handle_required_inputs_key(key);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.open_settings(),
                KeyCode::Char('r') => match self.step {
                    WizardStep::Context => self.reset_context(),
                    WizardStep::Content => self.reset_form(),
                },
                KeyCode::Char('n') => self.next_step(),
                KeyCode::Char('b') => self.back_step(),
                // The result panel only exists on the content step; firing
                // these earlier would act on state the user cannot see.
                KeyCode::Char('g') if self.step == WizardStep::Content => {
                    self.submit_generate();
                }
                KeyCode::Char('f') if self.step == WizardStep::Content => self.open_feedback(),
                KeyCode::Char('d') if self.step == WizardStep::Content => self.save_draft(),
                _ => {}
            }
            return;
        }

        match self.step {
            WizardStep::Context => self.handle_context_key(key),
            WizardStep::Content => self.handle_content_key(key),
        }
    }

    fn handle_context_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.context.select_next(),
            KeyCode::BackTab | KeyCode::Up => self.context.select_prev(),
            KeyCode::Enter => {
                if self.context.selected == ContextField::AttachmentPath {
                    self.load_attachment();
                } else {
                    self.next_step();
                }
            }
            KeyCode::Delete => {
                if self.context.selected == ContextField::AttachmentPath {
                    self.clear_attachment();
                }
            }
            KeyCode::Backspace => {
                self.context.selected_text_mut().pop();
            }
            KeyCode::Char(c) => {
                self.context.selected_text_mut().push(c);
            }
            _ => {}
        }
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        // The description editor takes everything except field navigation.
        if self.content.selected == ContentField::Description {
            match key.code {
                KeyCode::Tab => self.content.select_next(),
                KeyCode::BackTab => self.content.select_prev(),
                _ => {
                    self.content.description.input(key);
                }
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.content.select_next(),
            KeyCode::BackTab | KeyCode::Up => self.content.select_prev(),
            KeyCode::PageDown => {
                let limit = self.result.content.as_deref().map_or(0, |content| {
                    visual_line_count(content, self.layout.result_inner_width.max(1))
                });
                self.result.scroll = self
                    .result
                    .scroll
                    .saturating_add(1)
                    .min(limit.saturating_sub(1));
            }
            KeyCode::PageUp => {
                self.result.scroll = self.result.scroll.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ')
                if matches!(
                    self.content.selected,
                    ContentField::Platform | ContentField::Tone | ContentField::IncludeHashtags
                ) =>
            {
                match self.content.selected {
                    ContentField::Platform => {
                        self.content.platform = cycle_platform(self.content.platform);
                    }
                    ContentField::Tone => {
                        self.content.tone = cycle_tone(self.content.tone);
                    }
                    ContentField::IncludeHashtags => {
                        self.content.include_hashtags = !self.content.include_hashtags;
                    }
                    _ => {}
                }
            }
            KeyCode::Backspace => match self.content.selected {
                ContentField::Subject => {
                    self.content.subject.pop();
                }
                ContentField::MaxHashtags => {
                    self.content.max_hashtags.pop();
                }
                _ => {}
            },
            KeyCode::Char(c) => match self.content.selected {
                ContentField::Subject => self.content.subject.push(c),
                ContentField::MaxHashtags => {
                    if c.is_ascii_digit() {
                        self.content.max_hashtags.push(c);
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_feedback_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.feedback.close(),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.feedback.editor.insert_newline();
            }
            KeyCode::Enter => self.submit_feedback(),
            _ => {
                self.feedback.editor.input(key);
            }
        }
    }

    fn handle_required_inputs_key(&mut self, key: KeyEvent) {
        let Some(form) = self.required_inputs.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.dismiss_required_inputs(),
            KeyCode::Enter => self.submit_required_inputs(),
            KeyCode::Tab | KeyCode::Down => form.select_next(),
            KeyCode::BackTab | KeyCode::Up => form.select_prev(),
            KeyCode::Backspace => {
                if let Some(field) = form.selected_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = form.selected_field_mut() {
                    field.value.push(c);
                }
            }
            _ => {}
        }
    }
}

/// Collapses newlines to spaces for single-line fields.
fn flatten(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}
