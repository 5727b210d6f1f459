//! Context step rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::app::state::ContextField;

impl App {
    /// Renders the context step form.
    pub(crate) fn render_context_step(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();

        lines.push(Line::from(Span::styled(
            "Optional background for the post. Everything here may be left empty.",
            self.theme.muted_style(),
        )));
        lines.push(Line::from(""));

        for field in ContextField::all() {
            let is_selected = *field == self.context.selected;
            let prefix = if is_selected { "› " } else { "  " };

            let value = match field {
                ContextField::AttachmentPath => self.context.attachment_path.clone(),
                ContextField::ProfileUrl => self.context.profile_url.clone(),
                ContextField::ScrapeUrl => self.context.scrape_url.clone(),
                ContextField::ScrapePrompt => self.context.scrape_prompt.clone(),
            };

            let (label_style, value_style) = if is_selected {
                (self.theme.highlight_style(), self.theme.normal_style())
            } else {
                (self.theme.normal_style(), self.theme.muted_style())
            };

            lines.push(Line::from(vec![
                Span::styled(prefix, self.theme.highlight_style()),
                Span::styled(format!("{:<14}", field.label()), label_style),
                Span::styled(format!("[{value}]"), value_style),
            ]));

            if is_selected {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(field.description(), self.theme.muted_style()),
                ]));
            }
        }

        lines.push(Line::from(""));
        match &self.context.attachment {
            Some(file) => {
                lines.push(Line::from(vec![
                    Span::styled("  Attached: ", self.theme.muted_style()),
                    Span::styled(
                        format!("{} ({} bytes)", file.name, file.bytes.len()),
                        self.theme.success_style(),
                    ),
                    Span::styled("  (Delete to remove)", self.theme.muted_style()),
                ]));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "  No file attached",
                    self.theme.muted_style(),
                )));
            }
        }

        let block = Block::default()
            .title(Span::styled(" Context ", self.theme.header_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
