//! Activity log widget.
//!
//! Displays the append-only activity log: submissions, server outcomes,
//! settings saves, file errors. The newest lines are kept visible; older
//! lines scroll off the top.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::wrap_line_to_width;
use crate::tui::Theme;

/// Maximum number of log lines to keep in buffer.
/// Lines beyond this are truncated from the beginning to prevent unbounded
/// memory growth.
pub const MAX_LOG_LINES: usize = 1000;

/// Types of log lines for different styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLineType {
    /// Informational message.
    #[default]
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Progress/running message.
    Running,
}

/// A line of the activity log with type for styling.
#[derive(Debug, Clone)]
pub struct LogLine {
    /// The text content.
    pub text: String,
    /// The line type for styling.
    pub line_type: LogLineType,
}

impl LogLine {
    /// Creates an info line.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: format!("  {}", text.into()),
            line_type: LogLineType::Info,
        }
    }

    /// Creates a success line.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: format!("+ {}", text.into()),
            line_type: LogLineType::Success,
        }
    }

    /// Creates a warning line.
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: format!("! {}", text.into()),
            line_type: LogLineType::Warning,
        }
    }

    /// Creates an error line.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: format!("✗ {}", text.into()),
            line_type: LogLineType::Error,
        }
    }

    /// Creates a running line.
    #[must_use]
    pub fn running(text: impl Into<String>) -> Self {
        Self {
            text: format!("> {}", text.into()),
            line_type: LogLineType::Running,
        }
    }
}

/// A wrapped visual line with style information.
struct VisualLine {
    text: String,
    line_type: LogLineType,
}

/// The activity log panel. Always shows the tail of the log.
pub struct LogWidget<'a> {
    lines: &'a [LogLine],
    theme: &'a Theme,
}

impl<'a> LogWidget<'a> {
    #[must_use]
    pub const fn new(lines: &'a [LogLine], theme: &'a Theme) -> Self {
        Self { lines, theme }
    }
}

impl Widget for LogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(Span::styled(
                "Activity",
                self.theme.header_style(),
            )))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let inner_area = block.inner(area);
        let visible_height = inner_area.height as usize;
        let content_width = inner_area.width as usize;

        let visual_lines: Vec<VisualLine> = self
            .lines
            .iter()
            .flat_map(|line| {
                wrap_line_to_width(&line.text, content_width)
                    .into_iter()
                    .map(move |text| VisualLine {
                        text,
                        line_type: line.line_type,
                    })
            })
            .collect();

        // Tail view: skip everything that doesn't fit above the bottom.
        let skip = visual_lines.len().saturating_sub(visible_height);
        let visible: Vec<Line> = visual_lines
            .into_iter()
            .skip(skip)
            .map(|vline| {
                let style = match vline.line_type {
                    LogLineType::Info => self.theme.muted_style(),
                    LogLineType::Success => self.theme.success_style(),
                    LogLineType::Warning => self.theme.warning_style(),
                    LogLineType::Error => self.theme.error_style(),
                    LogLineType::Running => self.theme.highlight_style(),
                };
                Line::from(Span::styled(vline.text, style))
            })
            .collect();

        block.render(area, buf);
        Paragraph::new(visible).render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn prefixes_match_line_type() {
        assert!(LogLine::info("x").text.starts_with("  "));
        assert!(LogLine::success("x").text.starts_with("+ "));
        assert!(LogLine::warning("x").text.starts_with("! "));
        assert!(LogLine::error("x").text.starts_with("✗ "));
        assert!(LogLine::running("x").text.starts_with("> "));
    }

    #[test]
    fn renders_empty_log() -> Result<()> {
        let backend = TestBackend::new(40, 5);
        let mut terminal = Terminal::new(backend)?;

        let theme = Theme::default();
        let lines: Vec<LogLine> = vec![];

        terminal.draw(|frame| {
            let widget = LogWidget::new(&lines, &theme);
            frame.render_widget(widget, frame.area());
        })?;

        let buffer = terminal.backend().buffer();
        let title_line: String = (0..40).map(|x| buffer[(x, 0)].symbol()).collect();
        assert!(title_line.contains("Activity"));

        assert_eq!(buffer[(0, 0)].symbol(), "┌");
        assert_eq!(buffer[(39, 4)].symbol(), "┘");
        Ok(())
    }

    #[test]
    fn renders_log_lines() -> Result<()> {
        let backend = TestBackend::new(50, 5);
        let mut terminal = Terminal::new(backend)?;

        let theme = Theme::default();
        let lines = vec![LogLine::success("Content generated")];

        terminal.draw(|frame| {
            let widget = LogWidget::new(&lines, &theme);
            frame.render_widget(widget, frame.area());
        })?;

        let buffer = terminal.backend().buffer();
        let content_line: String = (1..49).map(|x| buffer[(x, 1)].symbol()).collect();
        assert!(content_line.contains("+ Content generated"));
        Ok(())
    }

    #[test]
    fn shows_tail_when_log_overflows() -> Result<()> {
        let backend = TestBackend::new(50, 4);
        let mut terminal = Terminal::new(backend)?;

        let theme = Theme::default();
        let lines: Vec<LogLine> = (0..10).map(|i| LogLine::info(format!("line {i}"))).collect();

        terminal.draw(|frame| {
            let widget = LogWidget::new(&lines, &theme);
            frame.render_widget(widget, frame.area());
        })?;

        let buffer = terminal.backend().buffer();
        let last_content: String = (1..49).map(|x| buffer[(x, 2)].symbol()).collect();
        assert!(last_content.contains("line 9"));
        Ok(())
    }
}
