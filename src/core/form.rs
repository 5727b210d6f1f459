//! Generation form snapshot and validation.
//!
//! The form is assembled fresh on every submit from the current UI state and
//! validated synchronously before any network call happens. Keeping this
//! logic free of UI types makes the request pipeline testable on its own.

use crate::api::GenerateRequest;
use crate::fs::settings::PersistedSettings;

/// Fixed message shown when a required field is empty.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Fixed message shown for transport or parse failures. The real cause is
/// only written to the activity log.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate content. Please try again later.";

/// Default max-hashtags count when the field is empty or unparsable.
const DEFAULT_MAX_HASHTAGS: u32 = 5;

/// Fallback scrape prompt when the user leaves the field empty.
const DEFAULT_SCRAPE_PROMPT: &str = "Extract the main content from this page";

/// Snapshot of all generation form fields at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationForm {
    pub subject: String,
    pub description: String,
    pub platform: String,
    pub tone: String,
    pub include_hashtags: bool,
    pub max_hashtags: u32,
    pub profile_url: String,
    pub scrape_url: String,
    pub scrape_prompt: String,
}

impl GenerationForm {
    /// Checks the three required fields.
    ///
    /// # Errors
    ///
    /// Returns [`REQUIRED_FIELDS_MESSAGE`] if any of subject, platform, or
    /// tone is empty. Description and all context fields are optional.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.subject.is_empty() || self.platform.is_empty() || self.tone.is_empty() {
            return Err(REQUIRED_FIELDS_MESSAGE);
        }
        Ok(())
    }

    /// Combines the form with the current settings into an outbound request.
    ///
    /// Credentials are included verbatim even when empty; rejecting invalid
    /// credentials is the backend's job.
    #[must_use]
    pub fn into_request(self, settings: &PersistedSettings) -> GenerateRequest {
        GenerateRequest {
            subject: self.subject,
            description: self.description,
            platform: self.platform,
            tone: self.tone,
            include_hashtags: self.include_hashtags,
            max_hashtags: self.max_hashtags,
            provider: "openai".to_string(),
            api_key: settings.api_key.clone(),
            model: settings.effective_model(),
            scrapegraph_api_key: settings.scrapegraph_api_key.clone(),
            profile_url: self.profile_url,
            scrape_url: self.scrape_url,
            scrape_prompt: self.scrape_prompt,
        }
    }
}

/// Resolves the max-hashtags count from the raw field value.
///
/// Hashtags disabled always means 0; enabled with an empty or unparsable
/// value falls back to 5.
#[must_use]
pub fn effective_max_hashtags(include_hashtags: bool, raw: &str) -> u32 {
    if include_hashtags {
        raw.trim().parse().unwrap_or(DEFAULT_MAX_HASHTAGS)
    } else {
        0
    }
}

/// Resolves the scrape prompt, substituting the default for an empty field.
#[must_use]
pub fn effective_scrape_prompt(raw: &str) -> String {
    if raw.trim().is_empty() {
        DEFAULT_SCRAPE_PROMPT.to_string()
    } else {
        raw.to_string()
    }
}
