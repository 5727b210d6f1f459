//! Custom TUI widgets.

pub mod log;

pub use log::{LogLine, LogLineType, LogWidget, MAX_LOG_LINES};
