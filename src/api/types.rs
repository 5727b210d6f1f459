//! Request and response types for the generation backend.
//!
//! Field names follow the backend's form/JSON contract: camelCase for the
//! form fields the web UI historically sent, snake_case for credentials and
//! the feedback endpoint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An uploaded context file held in memory until submit time.
///
/// At most one attachment is tracked at a time; it is only ever read when a
/// generation request is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name, shown in the UI and sent as the part file name.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Payload for `POST /generate`.
///
/// Sent as JSON when no attachment or scrape context is present, otherwise
/// as multipart form data so the file bytes can travel alongside the fields.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub subject: String,
    pub description: String,
    pub platform: String,
    pub tone: String,
    #[serde(rename = "includeHashtags")]
    pub include_hashtags: bool,
    #[serde(rename = "maxHashtags")]
    pub max_hashtags: u32,
    /// Provider identifier; the backend currently only supports "openai".
    pub provider: String,
    #[serde(rename = "openai_api_key")]
    pub api_key: String,
    #[serde(rename = "openai_model")]
    pub model: String,
    pub scrapegraph_api_key: String,
    #[serde(rename = "profileUrl")]
    pub profile_url: String,
    #[serde(rename = "scrapeUrl")]
    pub scrape_url: String,
    #[serde(rename = "scrapePrompt")]
    pub scrape_prompt: String,
}

impl GenerateRequest {
    /// Returns true if the request carries scrape context and therefore
    /// needs the multipart encoding even without an attachment.
    #[must_use]
    pub fn has_scrape_context(&self) -> bool {
        !self.scrape_url.is_empty()
    }
}

/// Response from `/generate` and `/generate_with_inputs`.
///
/// The backend reports domain failures in-band via the `error` field; a
/// successful response carries `content` and may additionally name extra
/// inputs it needs to finish the draft.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GenerateResponse {
    pub content: Option<String>,
    #[serde(default)]
    pub required_inputs: Vec<String>,
    pub error: Option<String>,
}

/// Payload for `POST /generate_with_inputs`: the original form fields plus
/// the user-supplied values for the backend's required inputs and the draft
/// content the first pass produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateWithInputsRequest {
    #[serde(flatten)]
    pub original: GenerateRequest,
    #[serde(rename = "additionalInputs")]
    pub additional_inputs: HashMap<String, String>,
    #[serde(rename = "originalContent")]
    pub original_content: String,
}

/// Payload for `POST /submit-feedback`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    /// The currently rendered content, as plain text.
    pub original_content: String,
    pub feedback: String,
    #[serde(rename = "openai_api_key")]
    pub api_key: String,
    #[serde(rename = "openai_model")]
    pub model: String,
}

/// Response from `/submit-feedback`.
///
/// Absence of `improved_content` is a soft failure: the backend accepted the
/// feedback but produced no revision.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeedbackResponse {
    pub improved_content: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_request() -> GenerateRequest {
        GenerateRequest {
            subject: "Product launch".to_string(),
            description: String::new(),
            platform: "LinkedIn".to_string(),
            tone: "Professional".to_string(),
            include_hashtags: true,
            max_hashtags: 5,
            provider: "openai".to_string(),
            api_key: "sk-test".to_string(),
            model: "gpt-4".to_string(),
            scrapegraph_api_key: String::new(),
            profile_url: String::new(),
            scrape_url: String::new(),
            scrape_prompt: "Extract the main content from this page".to_string(),
        }
    }

    #[test]
    fn generate_request_serializes_with_wire_names() {
        let json = serde_json::to_value(sample_request()).unwrap();

        assert_eq!(json["subject"], "Product launch");
        assert_eq!(json["includeHashtags"], true);
        assert_eq!(json["maxHashtags"], 5);
        assert_eq!(json["openai_api_key"], "sk-test");
        assert_eq!(json["openai_model"], "gpt-4");
        assert_eq!(json["profileUrl"], "");
        assert_eq!(json["scrapePrompt"], "Extract the main content from this page");
    }

    #[test]
    fn has_scrape_context_follows_scrape_url() {
        let mut req = sample_request();
        assert!(!req.has_scrape_context());

        req.scrape_url = "https://example.com".to_string();
        assert!(req.has_scrape_context());
    }

    #[test]
    fn generate_response_parses_content_only() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"content":"Hello\nworld"}"#).unwrap();
        assert_eq!(resp.content.as_deref(), Some("Hello\nworld"));
        assert!(resp.required_inputs.is_empty());
        assert!(resp.error.is_none());
    }

    #[test]
    fn generate_response_parses_required_inputs() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"content":"draft","required_inputs":["audience","cta"]}"#,
        )
        .unwrap();
        assert_eq!(resp.content.as_deref(), Some("draft"));
        assert_eq!(resp.required_inputs, vec!["audience", "cta"]);
    }

    #[test]
    fn generate_response_parses_error() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"error":"Invalid API key"}"#).unwrap();
        assert!(resp.content.is_none());
        assert_eq!(resp.error.as_deref(), Some("Invalid API key"));
    }

    #[test]
    fn with_inputs_request_flattens_original_fields() {
        let req = GenerateWithInputsRequest {
            original: sample_request(),
            additional_inputs: HashMap::from([(
                "audience".to_string(),
                "developers".to_string(),
            )]),
            original_content: "draft".to_string(),
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["subject"], "Product launch");
        assert_eq!(json["additionalInputs"]["audience"], "developers");
        assert_eq!(json["originalContent"], "draft");
    }

    #[test]
    fn feedback_response_tolerates_empty_body() {
        let resp: FeedbackResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.improved_content.is_none());
    }
}
