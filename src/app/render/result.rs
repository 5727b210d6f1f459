//! Result panel rendering.
//!
//! The right-hand panel on the content step shows, in priority order:
//! the required-inputs follow-up form, the feedback editor, or the
//! generated content (with a transient notice overlaid on its last line).

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::app::state::{FeedbackPhase, NoticeKind, RequiredInputsState};
use crate::core::{content_lines, wrap_line_to_width};

impl App {
    /// Renders the result panel or whichever flow currently replaces it.
    pub(crate) fn render_result_panel(&self, frame: &mut Frame, area: Rect) {
        if let Some(form) = &self.required_inputs {
            self.render_required_inputs(frame, area, form);
            return;
        }

        if self.feedback.phase == FeedbackPhase::Idle {
            self.render_result(frame, area);
        } else {
            let chunks =
                Layout::vertical([Constraint::Min(4), Constraint::Length(7)]).split(area);
            self.render_result(frame, chunks[0]);
            self.render_feedback_editor(frame, chunks[1]);
        }
    }

    fn render_result(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Generated Post ", self.theme.header_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = inner.width as usize;
        let height = inner.height as usize;

        let mut lines: Vec<Line> = if let Some(error) = &self.result.error {
            wrap_line_to_width(error, width)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, self.theme.error_style())))
                .collect()
        } else if let Some(content) = &self.result.content {
            content_lines(content)
                .into_iter()
                .flat_map(|line| wrap_line_to_width(line, width))
                .skip(self.result.scroll)
                .map(|l| Line::from(Span::styled(l, self.theme.normal_style())))
                .collect()
        } else {
            vec![Line::from(Span::styled(
                "Nothing generated yet. Fill in the form and press Ctrl+G.",
                self.theme.placeholder_style(),
            ))]
        };

        // The transient notice takes over the bottom line of the panel.
        if let Some(notice) = &self.result.notice {
            let style = match notice.kind {
                NoticeKind::Success => self.theme.success_style(),
                NoticeKind::Warning => self.theme.warning_style(),
                NoticeKind::Error => self.theme.error_style(),
            };
            lines.truncate(height.saturating_sub(1));
            while lines.len() < height.saturating_sub(1) {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(notice.text.clone(), style)));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_feedback_editor(&self, frame: &mut Frame, area: Rect) {
        let title = match self.feedback.phase {
            FeedbackPhase::Submitting => " Feedback (sending...) ",
            _ => " Feedback ",
        };
        let block = Block::default()
            .title(Span::styled(title, self.theme.header_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.highlight_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.feedback.phase == FeedbackPhase::Submitting {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "Improving content...",
                    self.theme.highlight_style(),
                ))),
                inner,
            );
        } else {
            frame.render_widget(&self.feedback.editor, inner);
        }
    }

    fn render_required_inputs(
        &self,
        frame: &mut Frame,
        area: Rect,
        form: &RequiredInputsState,
    ) {
        let block = Block::default()
            .title(Span::styled(
                " Additional Inputs Needed ",
                self.theme.header_style(),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.warning_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            "The server needs more detail before it can finish the post.",
            self.theme.muted_style(),
        )));
        lines.push(Line::from(""));

        for (i, field) in form.fields.iter().enumerate() {
            let is_selected = i == form.selected;
            let prefix = if is_selected { "› " } else { "  " };
            let label_style = if field.flagged {
                self.theme.error_style()
            } else if is_selected {
                self.theme.highlight_style()
            } else {
                self.theme.normal_style()
            };

            lines.push(Line::from(vec![
                Span::styled(prefix, self.theme.highlight_style()),
                Span::styled(format!("{:<20}", field.name), label_style),
                Span::styled(format!("[{}]", field.value), self.theme.normal_style()),
            ]));
            if field.flagged {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled("This field is required", self.theme.error_style()),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[Enter] ", self.theme.highlight_style()),
            Span::styled("Submit  ", self.theme.muted_style()),
            Span::styled("[Esc] ", self.theme.highlight_style()),
            Span::styled("Dismiss", self.theme.muted_style()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
