//! Helpers for displaying generated content.

use unicode_width::UnicodeWidthChar;

/// Splits content into display lines, one per `\n`.
///
/// Uses `split` rather than `lines` so a trailing newline produces a
/// trailing blank display line, matching how the content was authored.
#[must_use]
pub fn content_lines(content: &str) -> Vec<&str> {
    content.split('\n').collect()
}

/// Wraps a single line to fit within the given width, Unicode-aware.
///
/// Returns at least one (possibly empty) line.
#[must_use]
pub fn wrap_line_to_width(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in line.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            wrapped.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() || wrapped.is_empty() {
        wrapped.push(current);
    }

    wrapped
}

/// Total visual line count for content after wrapping, for scroll bounds.
#[must_use]
pub fn visual_line_count(content: &str, width: usize) -> usize {
    content_lines(content)
        .iter()
        .map(|line| {
            if line.is_empty() {
                1
            } else {
                wrap_line_to_width(line, width).len()
            }
        })
        .sum()
}
