//! Settings panel rendering.
//!
//! This module contains the rendering logic for the settings modal overlay.
//! API keys are masked except for a short tail so a shared screen does not
//! leak credentials.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, SettingsItem};

/// Masks a secret, keeping only the last four characters visible.
fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= 4 {
        return "•".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{tail}", "•".repeat(chars.len() - 4))
}

impl App {
    /// Renders the settings panel as a centered overlay.
    pub(crate) fn render_settings(&self, frame: &mut Frame) {
        let Some(panel) = &self.settings_panel else {
            return;
        };

        let area = frame.area();

        // Centered popup: header + 3 items with descriptions + footer
        let popup_width = 58u16.min(area.width);
        let popup_height = 13u16.min(area.height);
        let x = area.width.saturating_sub(popup_width) / 2;
        let y = area.height.saturating_sub(popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let mut content_lines = Vec::new();
        content_lines.push(Line::from(Span::styled(
            "Provider Settings",
            self.theme.header_style(),
        )));
        content_lines.push(Line::from(Span::styled(
            "Stored in .postcraft/settings.json, saved on close.",
            self.theme.muted_style(),
        )));
        content_lines.push(Line::from(""));

        for item in SettingsItem::all() {
            let is_selected = *item == panel.selected;
            let prefix = if is_selected { "› " } else { "  " };

            let value = match item {
                SettingsItem::ApiKey => mask_secret(&panel.api_key),
                SettingsItem::Model => panel.model.clone(),
                SettingsItem::ScrapegraphApiKey => mask_secret(&panel.scrapegraph_api_key),
            };

            let line = if is_selected {
                Line::from(vec![
                    Span::styled(prefix, self.theme.highlight_style()),
                    Span::styled(format!("{:<20}", item.label()), self.theme.highlight_style()),
                    Span::styled(format!("[{value}]"), self.theme.highlight_style()),
                ])
            } else {
                Line::from(vec![
                    Span::raw(prefix),
                    Span::styled(format!("{:<20}", item.label()), self.theme.normal_style()),
                    Span::styled(format!("[{value}]"), self.theme.muted_style()),
                ])
            };
            content_lines.push(line);

            if is_selected {
                content_lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(item.description(), self.theme.muted_style()),
                ]));
            }
        }

        content_lines.push(Line::from(""));
        content_lines.push(Line::from(vec![
            Span::styled("[↑/↓] ", self.theme.highlight_style()),
            Span::styled("Navigate  ", self.theme.muted_style()),
            Span::styled("[Type] ", self.theme.highlight_style()),
            Span::styled("Edit  ", self.theme.muted_style()),
            Span::styled("[Esc] ", self.theme.highlight_style()),
            Span::styled("Save & Close", self.theme.muted_style()),
        ]));

        let block = Block::default()
            .title(" Settings ")
            .title_style(self.theme.header_style())
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        frame.render_widget(Paragraph::new(content_lines).block(block), popup_area);
    }
}
