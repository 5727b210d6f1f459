//! Tests for the app module.
//!
//! This module is organized into submodules by functionality:
//! - `feedback` - Feedback editor flow tests
//! - `generation` - Request assembly and response handling tests
//! - `helpers` - Shared test utilities
//! - `settings` - Settings overlay and persistence tests
//! - `wizard` - Step navigation, field editing, and rendering tests

#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
