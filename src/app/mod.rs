//! Main application state and logic.
//!
//! This module contains the core App struct and its implementation,
//! organized into submodules:
//! - `events` - Event handling logic
//! - `layout` - Layout calculation helpers
//! - `render` - UI rendering
//! - `state` - Application state structures
//!
//! ## Application Modes
//!
//! The application operates in two modes:
//!
//! - **`Wizard`**: The main two-step form, moving between the context step
//!   (attachment, profile and scrape inputs) and the content step (subject,
//!   description, platform, tone, hashtags), with the generated result and
//!   feedback flow living on the content step.
//! - **`Settings`**: Modal overlay for provider credentials (Ctrl+S).
//!
//! ## Request lifecycle
//!
//! At most one backend request is in flight at a time. Submits spawn a task
//! that performs the HTTP call and reports back through the event channel;
//! further submits are ignored until the pending request resolves.

pub mod events;
pub mod layout;
mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use layout::{WizardLayout, calculate_wizard_layout};
pub use state::{
    ApiEvent, AppMode, ContentField, ContentState, ContextField, ContextState, FeedbackPhase,
    FeedbackState, Notice, NoticeKind, PendingRequest, RequiredInputsState, ResultState,
    SettingsItem, SettingsState, WizardStep,
};

use std::collections::HashMap;

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::api::{
    ApiClient, Attachment, FeedbackRequest, FeedbackResponse, GenerateRequest, GenerateResponse,
    GenerateWithInputsRequest,
};
use crate::core::{
    GENERIC_FAILURE_MESSAGE, GenerationForm, effective_max_hashtags, effective_scrape_prompt,
};
use crate::fs::{ContextData, PersistedSettings, PostcraftPaths, session};
use crate::tui::Theme;
use crate::tui::widgets::{LogLine, MAX_LOG_LINES};

/// Channel buffer size for API events.
const EVENT_CHANNEL_SIZE: usize = 16;

/// Main application state.
///
/// Organized into component sub-structs for better separation of concerns:
/// - `context`: state for the context wizard step
/// - `content`: state for the content wizard step
/// - `result`: the generated content display
/// - `feedback`: the feedback editor flow
/// - `required_inputs`: follow-up form, present only while the server asks
/// - `layout`: dynamic layout dimensions updated each frame
pub struct App {
    // =========================================================================
    // Shared State
    // =========================================================================
    /// All postcraft-related filesystem paths.
    pub(crate) paths: PostcraftPaths,
    /// HTTP client bound to the backend base URL.
    client: ApiClient,
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// Current application mode.
    pub(crate) mode: AppMode,
    /// Current wizard step.
    pub(crate) step: WizardStep,
    /// Should quit flag.
    should_quit: bool,
    /// In-flight request, if any. Acts as the submit guard.
    pub(crate) pending: Option<PendingRequest>,

    // =========================================================================
    // Event Channels
    // =========================================================================
    /// Event receiver for API completions.
    event_rx: mpsc::Receiver<ApiEvent>,
    /// Event sender (for spawning request tasks).
    event_tx: mpsc::Sender<ApiEvent>,

    // =========================================================================
    // Component States
    // =========================================================================
    /// Context step state.
    pub(crate) context: ContextState,
    /// Content step state.
    pub(crate) content: ContentState,
    /// Generated result display state.
    pub(crate) result: ResultState,
    /// Feedback editor state.
    pub(crate) feedback: FeedbackState,
    /// Required-inputs follow-up form, present only while the server asks.
    pub(crate) required_inputs: Option<RequiredInputsState>,
    /// Settings overlay state, present only in Settings mode.
    pub(crate) settings_panel: Option<SettingsState>,
    /// Persisted provider settings, the source of truth between overlays.
    pub(crate) settings: PersistedSettings,
    /// Activity log lines.
    pub(crate) log: Vec<LogLine>,
    /// Dynamic layout dimensions, cached once per frame.
    pub(crate) layout: WizardLayout,
    /// The request behind the current result, kept for follow-up submits.
    pub(crate) last_request: Option<GenerateRequest>,
}

impl App {
    /// Creates a new application instance using the current working directory.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible to match the setup call sites.
    pub fn new(server: &str) -> Result<Self> {
        Self::new_with_paths(server, PostcraftPaths::from_cwd())
    }

    /// Creates a new application instance with custom paths.
    ///
    /// This constructor is primarily used for testing, allowing tests to use
    /// isolated temporary directories without affecting the real filesystem.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible to match the setup call sites.
    pub fn new_with_paths(server: &str, paths: PostcraftPaths) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);

        let mut app = Self {
            paths,
            client: ApiClient::new(server),
            theme: Theme::default(),
            mode: AppMode::default(),
            step: WizardStep::default(),
            should_quit: false,
            pending: None,
            event_rx,
            event_tx,
            context: ContextState::new(),
            content: ContentState::new(),
            result: ResultState::default(),
            feedback: FeedbackState::new(),
            required_inputs: None,
            settings_panel: None,
            settings: PersistedSettings::default(),
            log: Vec::new(),
            layout: WizardLayout::default(),
            last_request: None,
        };

        // Load persisted settings; a malformed file falls back to defaults
        // rather than blocking startup.
        match app.paths.load_settings() {
            Ok(persisted) => {
                app.settings = persisted;
            }
            Err(e) => {
                app.push_log(LogLine::warning(format!(
                    "Failed to load settings, using defaults: {e}"
                )));
            }
        }

        // A leftover session from an interrupted run restores the context step.
        match session::consume_session(&app.paths) {
            Ok(Some((data, attachment))) => {
                app.restore_context(data, attachment);
                app.push_log(LogLine::info("Restored context from previous session"));
            }
            Ok(None) => {}
            Err(e) => {
                app.push_log(LogLine::warning(format!(
                    "Failed to restore previous session: {e}"
                )));
            }
        }

        Ok(app)
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Requests application shutdown.
    pub(crate) fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Returns true while a backend request is in flight.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Gets the paths configuration for this app instance.
    #[must_use]
    pub fn paths(&self) -> &PostcraftPaths {
        &self.paths
    }

    /// Calculates and caches the layout based on terminal dimensions.
    ///
    /// Should be called once per frame before rendering so event handling
    /// and rendering agree on dimensions.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout = calculate_wizard_layout(terminal_area);
    }

    /// Processes periodic tasks.
    ///
    /// This method should be called regularly (e.g., on each event loop
    /// tick). Currently it expires the transient result notice.
    pub fn tick(&mut self) {
        if self
            .result
            .notice
            .as_ref()
            .is_some_and(Notice::is_expired)
        {
            self.result.notice = None;
        }
    }

    /// Appends to the activity log, trimming the front when over capacity.
    pub(crate) fn push_log(&mut self, line: LogLine) {
        self.log.push(line);
        if self.log.len() > MAX_LOG_LINES {
            let drain_count = self.log.len() - MAX_LOG_LINES;
            self.log.drain(0..drain_count);
        }
    }

    /// Shows a transient notice near the result panel.
    pub(crate) fn show_notice(&mut self, text: impl Into<String>, kind: NoticeKind) {
        self.result.notice = Some(Notice::new(text, kind));
    }

    // =========================================================================
    // Wizard Navigation
    // =========================================================================

    /// Advances from the context step to the content step.
    ///
    /// The context fields are persisted to the session record so an
    /// interrupted run can restore them.
    pub(crate) fn next_step(&mut self) {
        if self.step != WizardStep::Context {
            return;
        }

        let data = self.context_data();
        if let Err(e) = session::save_session(&self.paths, &data, self.context.attachment.as_ref())
        {
            self.push_log(LogLine::warning(format!("Failed to save session: {e}")));
        }
        self.step = self.step.next();
    }

    /// Returns from the content step to the context step.
    ///
    /// Context fields are kept as typed; nothing entered on the content
    /// step is lost either.
    pub(crate) fn back_step(&mut self) {
        self.step = self.step.back();
    }

    /// Snapshot of the context step for the session record.
    fn context_data(&self) -> ContextData {
        ContextData {
            has_attachment: self.context.attachment.is_some(),
            attachment_name: self.context.attachment.as_ref().map(|a| a.name.clone()),
            profile_url: self.context.profile_url.clone(),
            scrape_url: self.context.scrape_url.clone(),
            scrape_prompt: self.context.scrape_prompt.clone(),
        }
    }

    /// Restores the context step from a consumed session record.
    fn restore_context(&mut self, data: ContextData, attachment: Option<Attachment>) {
        if let Some(file) = &attachment {
            self.context.attachment_path = file.name.clone();
        }
        self.context.attachment = attachment;
        self.context.profile_url = data.profile_url;
        self.context.scrape_url = data.scrape_url;
        self.context.scrape_prompt = data.scrape_prompt;
    }

    // =========================================================================
    // Resets
    // =========================================================================

    /// Clears the context step and the persisted session record.
    pub(crate) fn reset_context(&mut self) {
        self.context.reset();
        if let Err(e) = session::clear_session(&self.paths) {
            self.push_log(LogLine::warning(format!("Failed to clear session: {e}")));
        }
        self.push_log(LogLine::info("Context cleared"));
    }

    /// Resets the whole form back to a blank wizard.
    ///
    /// Clears both steps, the result, the feedback flow, any follow-up form
    /// and the persisted session record. Settings are not touched.
    pub(crate) fn reset_form(&mut self) {
        self.context.reset();
        self.content.reset();
        self.result.reset();
        self.feedback.close();
        self.required_inputs = None;
        self.last_request = None;
        if let Err(e) = session::clear_session(&self.paths) {
            self.push_log(LogLine::warning(format!("Failed to clear session: {e}")));
        }
        self.push_log(LogLine::info("Form reset"));
    }

    // =========================================================================
    // Attachment Handling
    // =========================================================================

    /// Loads the file at the typed attachment path into memory.
    ///
    /// Replaces any previously loaded attachment; only one file is tracked
    /// at a time.
    pub(crate) fn load_attachment(&mut self) {
        let path_text = self.context.attachment_path.trim().to_string();
        if path_text.is_empty() {
            return;
        }

        let path = std::path::Path::new(&path_text);
        match std::fs::read(path) {
            Ok(bytes) => {
                let name = path
                    .file_name()
                    .map_or_else(|| path_text.clone(), |n| n.to_string_lossy().into_owned());
                self.push_log(LogLine::success(format!("Attached {name}")));
                self.context.attachment = Some(Attachment { name, bytes });
            }
            Err(e) => {
                self.push_log(LogLine::error(format!(
                    "Failed to read {path_text}: {e}"
                )));
            }
        }
    }

    /// Drops the loaded attachment, keeping the typed path.
    pub(crate) fn clear_attachment(&mut self) {
        if self.context.attachment.take().is_some() {
            self.push_log(LogLine::info("Attachment removed"));
        }
    }

    // =========================================================================
    // Settings Overlay
    // =========================================================================

    /// Opens the settings overlay pre-filled from the persisted values.
    pub(crate) fn open_settings(&mut self) {
        self.settings_panel = Some(SettingsState::from_persisted(&self.settings));
        self.mode = AppMode::Settings;
    }

    /// Closes the settings overlay, applying and persisting its values.
    pub(crate) fn close_settings(&mut self) {
        if let Some(panel) = self.settings_panel.take() {
            self.settings = panel.to_persisted();
            match self.paths.save_settings(&self.settings) {
                Ok(()) => {
                    self.push_log(LogLine::success("Settings saved"));
                }
                Err(e) => {
                    self.push_log(LogLine::warning(format!("Failed to save settings: {e}")));
                }
            }
        }
        self.mode = AppMode::Wizard;
    }

    // =========================================================================
    // Draft Export
    // =========================================================================

    /// Writes the generated content to `.postcraft/draft.txt`.
    pub(crate) fn save_draft(&mut self) {
        let Some(content) = self.result.content.clone() else {
            return;
        };
        match self.paths.save_draft(&content) {
            Ok(()) => {
                self.show_notice("Draft saved to .postcraft/draft.md", NoticeKind::Success);
                self.push_log(LogLine::success("Draft saved"));
            }
            Err(e) => {
                self.show_notice("Failed to save draft", NoticeKind::Error);
                self.push_log(LogLine::error(format!("Failed to save draft: {e}")));
            }
        }
    }

    // =========================================================================
    // Request Assembly
    // =========================================================================

    /// Snapshots the UI state into a generation form.
    pub(crate) fn build_form(&self) -> GenerationForm {
        GenerationForm {
            subject: self.content.subject.trim().to_string(),
            description: self.content.description_text().trim().to_string(),
            platform: self
                .content
                .platform
                .map(|p| p.name().to_string())
                .unwrap_or_default(),
            tone: self
                .content
                .tone
                .map(|t| t.name().to_string())
                .unwrap_or_default(),
            include_hashtags: self.content.include_hashtags,
            max_hashtags: effective_max_hashtags(
                self.content.include_hashtags,
                &self.content.max_hashtags,
            ),
            profile_url: self.context.profile_url.trim().to_string(),
            scrape_url: self.context.scrape_url.trim().to_string(),
            scrape_prompt: if self.context.scrape_url.trim().is_empty() {
                String::new()
            } else {
                effective_scrape_prompt(&self.context.scrape_prompt)
            },
        }
    }

    // =========================================================================
    // Submits
    // =========================================================================

    /// Validates the form and submits a generation request.
    ///
    /// On validation failure the error banner is set and no network call is
    /// made. Ignored while another request is in flight.
    pub(crate) fn submit_generate(&mut self) {
        if self.is_running() {
            return;
        }

        let form = self.build_form();
        if let Err(message) = form.validate() {
            self.result.set_error(message);
            return;
        }

        // The session record was written when the user advanced; consume it
        // so the carried attachment travels with the request.
        let attachment = match session::consume_session(&self.paths) {
            Ok(Some((_, file))) => file,
            Ok(None) => self.context.attachment.clone(),
            Err(e) => {
                self.push_log(LogLine::warning(format!("Failed to read session: {e}")));
                self.context.attachment.clone()
            }
        };

        let request = form.into_request(&self.settings);
        self.last_request = Some(request.clone());
        self.required_inputs = None;
        self.pending = Some(PendingRequest::Generate);
        self.push_log(LogLine::running("Generating content..."));

        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.generate(&request, attachment.as_ref()).await;
            let _ = event_tx.send(ApiEvent::GenerationDone(result)).await;
        });
    }

    /// Validates the follow-up form and re-submits with the extra inputs.
    ///
    /// Empty fields are flagged in place instead of submitting. Ignored
    /// while another request is in flight.
    pub(crate) fn submit_required_inputs(&mut self) {
        if self.is_running() {
            return;
        }
        let Some(form) = self.required_inputs.as_mut() else {
            return;
        };
        if !form.validate() {
            return;
        }
        let Some(original) = self.last_request.clone() else {
            return;
        };

        let additional_inputs: HashMap<String, String> = form.values().into_iter().collect();
        let request = GenerateWithInputsRequest {
            original,
            additional_inputs,
            original_content: self.result.content.clone().unwrap_or_default(),
        };

        self.pending = Some(PendingRequest::RequiredInputs);
        self.push_log(LogLine::running("Generating with additional inputs..."));

        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.generate_with_inputs(&request).await;
            let _ = event_tx.send(ApiEvent::GenerationDone(result)).await;
        });
    }

    /// Dismisses the required-inputs form, keeping the current result.
    pub(crate) fn dismiss_required_inputs(&mut self) {
        if self.required_inputs.take().is_some() {
            self.push_log(LogLine::info("Additional inputs dismissed"));
        }
    }

    /// Opens the feedback editor over the generated content.
    ///
    /// A no-op without content or while a request is in flight.
    pub(crate) fn open_feedback(&mut self) {
        if self.result.content.is_none() || self.is_running() {
            return;
        }
        self.feedback.open();
    }

    /// Submits the typed feedback for the current content.
    ///
    /// Empty feedback closes the editor without a network call.
    pub(crate) fn submit_feedback(&mut self) {
        if self.is_running() || self.feedback.phase != FeedbackPhase::Editing {
            return;
        }

        let text = self.feedback.text();
        if text.is_empty() {
            self.feedback.close();
            return;
        }
        let Some(content) = self.result.content.clone() else {
            self.feedback.close();
            return;
        };

        let request = FeedbackRequest {
            original_content: content,
            feedback: text,
            api_key: self.settings.api_key.clone(),
            model: self.settings.effective_model(),
        };

        self.feedback.phase = FeedbackPhase::Submitting;
        self.pending = Some(PendingRequest::Feedback);
        self.push_log(LogLine::running("Submitting feedback..."));

        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.submit_feedback(&request).await;
            let _ = event_tx.send(ApiEvent::FeedbackDone(result)).await;
        });
    }

    // =========================================================================
    // Response Handling
    // =========================================================================

    /// Drains the event channel, applying completed request results.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                ApiEvent::GenerationDone(result) => self.apply_generation_result(result),
                ApiEvent::FeedbackDone(result) => self.apply_feedback_result(result),
            }
        }
    }

    /// Applies the outcome of a generate or follow-up request.
    ///
    /// An in-band `error` field wins over everything else; a non-empty
    /// `required_inputs` list opens the follow-up form over the draft.
    pub(crate) fn apply_generation_result(
        &mut self,
        result: Result<GenerateResponse, crate::api::ApiError>,
    ) {
        self.pending = None;
        match result {
            Ok(response) => {
                if let Some(error) = response.error {
                    self.push_log(LogLine::error(format!("Server error: {error}")));
                    self.result.set_error(error);
                    // A pending follow-up form would hide the error panel.
                    self.required_inputs = None;
                    return;
                }
                if let Some(content) = response.content {
                    self.result.set_content(content);
                    self.push_log(LogLine::success("Content generated"));
                } else {
                    self.result.set_error(GENERIC_FAILURE_MESSAGE);
                    self.push_log(LogLine::error("Response carried no content"));
                    self.required_inputs = None;
                    return;
                }
                if response.required_inputs.is_empty() {
                    self.required_inputs = None;
                } else {
                    self.push_log(LogLine::info(format!(
                        "Server needs {} more input(s)",
                        response.required_inputs.len()
                    )));
                    self.required_inputs =
                        Some(RequiredInputsState::new(response.required_inputs));
                }
            }
            Err(e) => {
                self.push_log(LogLine::error(format!("Request failed: {e}")));
                self.result.set_error(GENERIC_FAILURE_MESSAGE);
                self.required_inputs = None;
            }
        }
    }

    /// Applies the outcome of a feedback submission.
    ///
    /// A response without improved content is surfaced as a warning, not a
    /// success: the feedback went through but nothing changed.
    pub(crate) fn apply_feedback_result(
        &mut self,
        result: Result<FeedbackResponse, crate::api::ApiError>,
    ) {
        self.pending = None;
        self.feedback.close();
        match result {
            Ok(response) => match response.improved_content {
                Some(improved) => {
                    self.result.set_content(improved);
                    self.show_notice("Content updated with your feedback", NoticeKind::Success);
                    self.push_log(LogLine::success("Content improved from feedback"));
                }
                None => {
                    self.show_notice(
                        "Feedback submitted, but no improved content was returned",
                        NoticeKind::Warning,
                    );
                    self.push_log(LogLine::warning("No improved content in response"));
                }
            },
            Err(e) => {
                self.show_notice("Failed to submit feedback", NoticeKind::Error);
                self.push_log(LogLine::error(format!("Feedback failed: {e}")));
            }
        }
    }
}
