//! Reqwest-based client for the generation backend.
//!
//! One request per user action, no retry and no timeout: a stalled call is
//! surfaced by the UI loader staying visible while the in-flight guard keeps
//! the user from stacking a second request on top.

use reqwest::multipart;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::types::{
    Attachment, FeedbackRequest, FeedbackResponse, GenerateRequest, GenerateResponse,
    GenerateWithInputsRequest,
};

/// Errors from talking to the backend.
///
/// Domain failures (bad credentials, scrape errors) arrive in-band as an
/// `error` field in a 200 response and are not represented here.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request failed in transit or the response body failed to parse.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend returned a non-success status code.
    #[error("Server returned status {0}: {1}")]
    Status(reqwest::StatusCode, String),
}

/// Client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL (trailing slash tolerated).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Submits a generation request.
    ///
    /// Uses multipart encoding when an attachment or scrape context is
    /// present so the file bytes can travel; plain JSON otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] on network or parse failure and
    /// [`ApiError::Status`] on a non-success status code.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
        attachment: Option<&Attachment>,
    ) -> Result<GenerateResponse, ApiError> {
        if attachment.is_some() || request.has_scrape_context() {
            let form = build_generate_form(request, attachment);
            let response = self
                .http
                .post(self.url("/generate"))
                .multipart(form)
                .send()
                .await?;
            parse_response(response).await
        } else {
            self.post_json("/generate", request).await
        }
    }

    /// Re-submits a generation with the backend's required inputs filled in.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiClient::generate`].
    pub async fn generate_with_inputs(
        &self,
        request: &GenerateWithInputsRequest,
    ) -> Result<GenerateResponse, ApiError> {
        self.post_json("/generate_with_inputs", request).await
    }

    /// Submits free-text feedback on previously generated content.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiClient::generate`].
    pub async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, ApiError> {
        self.post_json("/submit-feedback", request).await
    }

    /// POSTs a JSON body and parses the JSON response.
    async fn post_json<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        parse_response(response).await
    }
}

/// Checks the status code, then deserializes the body.
async fn parse_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<R>().await?)
    } else {
        Err(ApiError::Status(
            status,
            response.text().await.unwrap_or_default(),
        ))
    }
}

/// Builds the multipart form for `/generate`.
///
/// Every scalar travels as a text part (the backend reads form fields as
/// strings); the attachment, when present, is the `context_file` part.
fn build_generate_form(
    request: &GenerateRequest,
    attachment: Option<&Attachment>,
) -> multipart::Form {
    let mut form = multipart::Form::new()
        .text("subject", request.subject.clone())
        .text("description", request.description.clone())
        .text("platform", request.platform.clone())
        .text("tone", request.tone.clone())
        .text("includeHashtags", request.include_hashtags.to_string())
        .text("maxHashtags", request.max_hashtags.to_string())
        .text("provider", request.provider.clone())
        .text("openai_api_key", request.api_key.clone())
        .text("openai_model", request.model.clone())
        .text("scrapegraph_api_key", request.scrapegraph_api_key.clone())
        .text("profileUrl", request.profile_url.clone())
        .text("scrapeUrl", request.scrape_url.clone())
        .text("scrapePrompt", request.scrape_prompt.clone());

    if let Some(file) = attachment {
        form = form.part(
            "context_file",
            multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone()),
        );
    }

    form
}
