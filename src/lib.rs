//! `Postcraft` - TUI client for an AI social media post generation service.
//!
//! Drives a two-step wizard (context, then content) against a backend
//! generation API, with persisted provider settings and a feedback loop.

pub mod api;
pub mod app;
pub mod cli;
pub mod core;
pub mod fs;
pub mod tui;
