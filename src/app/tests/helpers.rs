//! Shared test utilities for the app module.
//!
//! Provides:
//! - `create_test_app` - An `App` rooted in an isolated temp directory
//! - Key event helpers (`char_key`, `key`, `ctrl_key`)
//! - `render_app` - Renders the app to a `TestBackend` buffer
//! - `fill_required_fields` - Fills subject, platform, and tone

use anyhow::Result;
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use tempfile::TempDir;

use crate::app::App;
use crate::core::{Platform, Tone};
use crate::fs::PostcraftPaths;

/// Backend URL used by test apps. Nothing listens there; tests never await
/// the spawned requests.
pub const TEST_SERVER: &str = "http://localhost:5000";

/// Creates an `App` rooted in a fresh temp directory.
///
/// The temp dir must be kept alive for the duration of the test, otherwise
/// the paths disappear from under the app.
pub fn create_test_app() -> Result<(App, TempDir)> {
    let temp = TempDir::new()?;
    let app = App::new_with_paths(TEST_SERVER, PostcraftPaths::new(temp.path()))?;
    Ok((app, temp))
}

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for an arbitrary key with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for Ctrl + a character key.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Renders the app into a `TestBackend` buffer of the given size.
pub fn render_app(app: &mut App, width: u16, height: u16) -> Result<Buffer> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|frame| {
        app.update_layout(frame.area());
        app.render(frame);
    })?;
    Ok(terminal.backend().buffer().clone())
}

/// Flattens a buffer into one string with rows separated by newlines.
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fills the three required content fields so validation passes.
pub fn fill_required_fields(app: &mut App) {
    app.content.subject = "Product launch".to_string();
    app.content.platform = Some(Platform::Twitter);
    app.content.tone = Some(Tone::Professional);
}
