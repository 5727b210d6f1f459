//! Rendering methods for the App.
//!
//! This module contains all UI rendering logic including:
//! - **Wizard mode**: Header, step indicator, form body, activity log,
//!   status line, and footer
//! - **Settings panel**: Modal overlay for provider credentials

mod content;
mod context;
mod result;
mod settings;

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::widgets::LogWidget;

use super::{App, AppMode, WizardStep};

impl App {
    /// Renders the application UI.
    pub fn render(&self, frame: &mut Frame) {
        match self.mode {
            AppMode::Wizard => self.render_wizard(frame),
            AppMode::Settings => {
                // Render the wizard as background, then overlay settings
                self.render_wizard(frame);
                self.render_settings(frame);
            }
        }
    }

    /// Renders the wizard interface.
    ///
    /// Uses the cached layout from `self.layout` which is calculated once
    /// per frame in `update_layout()`.
    fn render_wizard(&self, frame: &mut Frame) {
        let layout = self.layout;

        self.render_header(frame, layout.header);
        self.render_step_indicator(frame, layout.step);

        match self.step {
            WizardStep::Context => self.render_context_step(frame, layout.body),
            WizardStep::Content => self.render_content_step(frame, layout.body),
        }

        frame.render_widget(LogWidget::new(&self.log, &self.theme), layout.log);
        self.render_status(frame, layout.status);
        self.render_footer(frame, layout.footer);
    }

    /// Renders the header (app title, single line).
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(" Postcraft ", self.theme.header_style()),
            Span::styled("[", self.theme.muted_style()),
            Span::styled(self.settings.effective_model(), self.theme.normal_style()),
            Span::styled("]", self.theme.muted_style()),
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }

    /// Renders the step indicator line.
    fn render_step_indicator(&self, frame: &mut Frame, area: Rect) {
        let indicator = Line::from(Span::styled(
            format!(" {}", self.step.title()),
            self.theme.muted_style(),
        ));
        frame.render_widget(Paragraph::new(indicator), area);
    }

    /// Renders the status line below the log panel.
    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match self.pending {
            Some(request) => Line::from(Span::styled(
                format!(" {}", request.status_text()),
                self.theme.highlight_style(),
            )),
            None => Line::from(Span::styled(" Ready", self.theme.muted_style())),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Renders the footer with key hints for the current panel.
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = if self.required_inputs.is_some() {
            &[
                ("Tab", "Field"),
                ("Enter", "Submit"),
                ("Esc", "Dismiss"),
                ("Ctrl+C", "Quit"),
            ]
        } else if self.feedback.phase != super::FeedbackPhase::Idle {
            &[
                ("Enter", "Send"),
                ("Shift+Enter", "Newline"),
                ("Esc", "Cancel"),
                ("Ctrl+C", "Quit"),
            ]
        } else {
            match self.step {
                WizardStep::Context => &[
                    ("Tab", "Field"),
                    ("Enter", "Load file / Next"),
                    ("Ctrl+N", "Next"),
                    ("Ctrl+R", "Reset"),
                    ("Ctrl+S", "Settings"),
                    ("Ctrl+C", "Quit"),
                ],
                WizardStep::Content => &[
                    ("Ctrl+G", "Generate"),
                    ("Ctrl+F", "Feedback"),
                    ("Ctrl+D", "Save draft"),
                    ("Ctrl+B", "Back"),
                    ("Ctrl+R", "Reset"),
                    ("Ctrl+C", "Quit"),
                ],
            }
        };

        let mut spans = vec![Span::raw(" ")];
        for (keys, action) in hints {
            spans.push(Span::styled(format!("[{keys}] "), self.theme.highlight_style()));
            spans.push(Span::styled(format!("{action}  "), self.theme.muted_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
