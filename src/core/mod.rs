//! Pure form and content logic, independent of the UI layer.

pub mod content;
pub mod form;
pub mod options;

pub use form::{
    GENERIC_FAILURE_MESSAGE, GenerationForm, REQUIRED_FIELDS_MESSAGE, effective_max_hashtags,
    effective_scrape_prompt,
};
pub use content::{content_lines, visual_line_count, wrap_line_to_width};
pub use options::{Platform, Tone, cycle_platform, cycle_tone};
