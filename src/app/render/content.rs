//! Content step rendering.
//!
//! The content step splits the body horizontally: the form fields on the
//! left, the result panel (or the required-inputs follow-up form, or the
//! feedback editor) on the right.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::app::layout::CONTENT_SPLIT;
use crate::app::state::ContentField;

impl App {
    /// Renders the content step: form on the left, result on the right.
    pub(crate) fn render_content_step(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::horizontal(CONTENT_SPLIT).split(area);

        self.render_content_form(frame, chunks[0]);
        self.render_result_panel(frame, chunks[1]);
    }

    fn render_content_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Post Details ", self.theme.header_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Fixed rows for the simple fields, remaining space for the
        // description editor.
        let rows = Layout::vertical([
            Constraint::Length(1), // Subject
            Constraint::Length(1), // Description label
            Constraint::Min(3),    // Description editor
            Constraint::Length(1), // Platform
            Constraint::Length(1), // Tone
            Constraint::Length(1), // Include hashtags
            Constraint::Length(1), // Max hashtags
        ])
        .split(inner);

        self.render_text_row(
            frame,
            rows[0],
            ContentField::Subject,
            &self.content.subject,
            true,
        );

        let description_selected = self.content.selected == ContentField::Description;
        let label_style = if description_selected {
            self.theme.highlight_style()
        } else {
            self.theme.normal_style()
        };
        let prefix = if description_selected { "› " } else { "  " };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(prefix, self.theme.highlight_style()),
                Span::styled("Description", label_style),
            ])),
            rows[1],
        );
        frame.render_widget(&self.content.description, rows[2]);

        self.render_select_row(
            frame,
            rows[3],
            ContentField::Platform,
            self.content.platform.map_or("-- choose --", |p| p.name()),
            self.content.platform.is_none(),
            true,
        );
        self.render_select_row(
            frame,
            rows[4],
            ContentField::Tone,
            self.content.tone.map_or("-- choose --", |t| t.name()),
            self.content.tone.is_none(),
            true,
        );

        let checkbox = if self.content.include_hashtags {
            "[x]"
        } else {
            "[ ]"
        };
        self.render_select_row(
            frame,
            rows[5],
            ContentField::IncludeHashtags,
            checkbox,
            false,
            false,
        );

        if self.content.include_hashtags {
            self.render_text_row(
                frame,
                rows[6],
                ContentField::MaxHashtags,
                &self.content.max_hashtags,
                false,
            );
        }
    }

    /// Renders a single-line editable field row.
    fn render_text_row(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: ContentField,
        value: &str,
        required: bool,
    ) {
        let is_selected = field == self.content.selected;
        let prefix = if is_selected { "› " } else { "  " };
        let label = if required {
            format!("{}*", field.label())
        } else {
            field.label().to_string()
        };
        let (label_style, value_style) = if is_selected {
            (self.theme.highlight_style(), self.theme.normal_style())
        } else {
            (self.theme.normal_style(), self.theme.muted_style())
        };

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(prefix, self.theme.highlight_style()),
                Span::styled(format!("{label:<18}"), label_style),
                Span::styled(format!("[{value}]"), value_style),
            ])),
            area,
        );
    }

    /// Renders a cycling-select or checkbox row.
    fn render_select_row(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: ContentField,
        value: &str,
        unset: bool,
        required: bool,
    ) {
        let is_selected = field == self.content.selected;
        let prefix = if is_selected { "› " } else { "  " };
        let label = if required {
            format!("{}*", field.label())
        } else {
            field.label().to_string()
        };
        let label_style = if is_selected {
            self.theme.highlight_style()
        } else {
            self.theme.normal_style()
        };
        let value_style = if unset {
            self.theme.placeholder_style()
        } else if is_selected {
            self.theme.normal_style()
        } else {
            self.theme.muted_style()
        };

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(prefix, self.theme.highlight_style()),
                Span::styled(format!("{label:<18}"), label_style),
                Span::styled(value.to_string(), value_style),
            ])),
            area,
        );
    }
}
