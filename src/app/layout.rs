//! Layout calculation helpers for the TUI.
//!
//! This module provides a single source of truth for layout definitions,
//! ensuring that dimension calculations in `App::update_layout` and
//! rendering are always in sync.

use ratatui::layout::{Constraint, Layout, Rect};

/// Layout information for the wizard interface.
///
/// Vertically the screen is split into:
/// - a one-line header with the app name
/// - a one-line step indicator
/// - the form/result body (grows)
/// - the activity log panel
/// - a one-line status line
/// - a one-line footer with key hints
#[derive(Debug, Clone, Copy, Default)]
pub struct WizardLayout {
    /// Header area (app title, 1 line).
    pub header: Rect,
    /// Step indicator area (1 line).
    pub step: Rect,
    /// Main form or result area (grows).
    pub body: Rect,
    /// Activity log panel.
    pub log: Rect,
    /// Status line (1 line).
    pub status: Rect,
    /// Footer area (key hints, 1 line).
    pub footer: Rect,
    /// Inner content width of the result panel on the content step.
    ///
    /// The content step splits the body horizontally; generated text wraps
    /// at this width, so scroll bounds must be computed against it.
    pub result_inner_width: usize,
}

/// Height of the activity log panel including borders.
const LOG_PANEL_HEIGHT: u16 = 6;

/// Horizontal split of the content step body: form on the left, result
/// panel on the right.
pub const CONTENT_SPLIT: [Constraint; 2] =
    [Constraint::Percentage(45), Constraint::Percentage(55)];

const WIZARD_LAYOUT_CONSTRAINTS: [Constraint; 6] = [
    Constraint::Length(1),                // Header
    Constraint::Length(1),                // Step indicator
    Constraint::Min(8),                   // Body (grows)
    Constraint::Length(LOG_PANEL_HEIGHT), // Activity log
    Constraint::Length(1),                // Status line
    Constraint::Length(1),                // Footer (key hints)
];

/// Calculates the wizard layout for the given terminal area.
#[must_use]
pub fn calculate_wizard_layout(area: Rect) -> WizardLayout {
    let chunks = Layout::vertical(WIZARD_LAYOUT_CONSTRAINTS).split(area);

    let body = chunks[2];
    let content_chunks = Layout::horizontal(CONTENT_SPLIT).split(body);
    let result_inner_width = content_chunks[1].width.saturating_sub(2) as usize;

    WizardLayout {
        header: chunks[0],
        step: chunks[1],
        body,
        log: chunks[3],
        status: chunks[4],
        footer: chunks[5],
        result_inner_width,
    }
}
