//! Application state structures.
//!
//! This module contains the state definitions for different parts of the application:
//!
//! - **`ContextState`**: First wizard step (attachment, profile and scrape inputs)
//! - **`ContentState`**: Second wizard step (subject, description, options)
//! - **`ResultState`**: Generated content display with transient notices
//! - **`FeedbackState`**: Feedback editor over generated content
//! - **`RequiredInputsState`**: Follow-up form when the server asks for more inputs
//! - **`SettingsState`**: Provider credential configuration
//!
//! ## Settings Panel
//!
//! The settings panel uses `SettingsState` to track the three editable
//! credential fields and which one is selected. It converts to and from
//! [`PersistedSettings`] on open and close.

use std::time::{Duration, Instant};

use tui_textarea::TextArea;

use crate::api::{ApiError, Attachment, FeedbackResponse, GenerateResponse};
use crate::core::{Platform, Tone};
use crate::fs::PersistedSettings;

/// The two wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// Context step: optional attachment, profile URL, scrape inputs.
    #[default]
    Context,
    /// Content step: subject, description, platform, tone, hashtags.
    Content,
}

impl WizardStep {
    /// Returns the step after this one, or `self` at the end.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Context | Self::Content => Self::Content,
        }
    }

    /// Returns the step before this one, or `self` at the start.
    #[must_use]
    pub const fn back(&self) -> Self {
        match self {
            Self::Context | Self::Content => Self::Context,
        }
    }

    /// Returns the display title for this step.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Context => "Step 1 of 2: Context",
            Self::Content => "Step 2 of 2: Content",
        }
    }
}

/// Fields on the context step, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextField {
    /// Path of a local file to attach.
    #[default]
    AttachmentPath,
    /// Social profile URL for voice matching.
    ProfileUrl,
    /// Web page URL to scrape for context.
    ScrapeUrl,
    /// Instruction for the scraper.
    ScrapePrompt,
}

impl ContextField {
    /// Returns all context fields in display order.
    #[must_use]
    pub fn all() -> &'static [ContextField] {
        &[
            ContextField::AttachmentPath,
            ContextField::ProfileUrl,
            ContextField::ScrapeUrl,
            ContextField::ScrapePrompt,
        ]
    }

    /// Returns the display label for this field.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AttachmentPath => "Context File",
            Self::ProfileUrl => "Profile URL",
            Self::ScrapeUrl => "Scrape URL",
            Self::ScrapePrompt => "Scrape Prompt",
        }
    }

    /// Returns a description for this field.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AttachmentPath => "Path to a file with background material (Enter to load)",
            Self::ProfileUrl => "Profile whose tone the post should match",
            Self::ScrapeUrl => "Page to scrape for additional context",
            Self::ScrapePrompt => "What the scraper should extract from the page",
        }
    }
}

/// Fields on the content step, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentField {
    /// Post subject (required).
    #[default]
    Subject,
    /// Free-form description (multi-line).
    Description,
    /// Target platform (required).
    Platform,
    /// Desired tone (required).
    Tone,
    /// Whether to include hashtags.
    IncludeHashtags,
    /// Maximum number of hashtags.
    MaxHashtags,
}

impl ContentField {
    /// Returns all content fields in display order.
    #[must_use]
    pub fn all() -> &'static [ContentField] {
        &[
            ContentField::Subject,
            ContentField::Description,
            ContentField::Platform,
            ContentField::Tone,
            ContentField::IncludeHashtags,
            ContentField::MaxHashtags,
        ]
    }

    /// Returns the display label for this field.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Subject => "Subject",
            Self::Description => "Description",
            Self::Platform => "Platform",
            Self::Tone => "Tone",
            Self::IncludeHashtags => "Include Hashtags",
            Self::MaxHashtags => "Max Hashtags",
        }
    }
}

/// State for the context wizard step.
pub struct ContextState {
    /// Path typed into the attachment field.
    pub attachment_path: String,
    /// File loaded from `attachment_path`, if any.
    pub attachment: Option<Attachment>,
    /// Social profile URL.
    pub profile_url: String,
    /// URL to scrape.
    pub scrape_url: String,
    /// Scrape instruction. Empty means the server-side default applies.
    pub scrape_prompt: String,
    /// Currently selected field.
    pub selected: ContextField,
}

impl ContextState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attachment_path: String::new(),
            attachment: None,
            profile_url: String::new(),
            scrape_url: String::new(),
            scrape_prompt: String::new(),
            selected: ContextField::default(),
        }
    }

    /// Clears all fields and drops the loaded attachment.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Moves the selection to the next field, wrapping.
    pub fn select_next(&mut self) {
        self.selected = cycle_forward(ContextField::all(), self.selected);
    }

    /// Moves the selection to the previous field, wrapping.
    pub fn select_prev(&mut self) {
        self.selected = cycle_backward(ContextField::all(), self.selected);
    }

    /// Returns a mutable reference to the text of the selected field.
    pub fn selected_text_mut(&mut self) -> &mut String {
        match self.selected {
            ContextField::AttachmentPath => &mut self.attachment_path,
            ContextField::ProfileUrl => &mut self.profile_url,
            ContextField::ScrapeUrl => &mut self.scrape_url,
            ContextField::ScrapePrompt => &mut self.scrape_prompt,
        }
    }
}

impl Default for ContextState {
    fn default() -> Self {
        Self::new()
    }
}

/// State for the content wizard step.
pub struct ContentState {
    /// Post subject.
    pub subject: String,
    /// Free-form description, multi-line.
    pub description: TextArea<'static>,
    /// Selected platform. `None` until the user picks one.
    pub platform: Option<Platform>,
    /// Selected tone. `None` until the user picks one.
    pub tone: Option<Tone>,
    /// Whether hashtags should be included.
    pub include_hashtags: bool,
    /// Raw max-hashtags input. Parsed on submit, defaulting when invalid.
    pub max_hashtags: String,
    /// Currently selected field.
    pub selected: ContentField,
}

impl ContentState {
    #[must_use]
    pub fn new() -> Self {
        let mut description = TextArea::default();
        description.set_placeholder_text("Describe the post you want...");
        Self {
            subject: String::new(),
            description,
            platform: None,
            tone: None,
            include_hashtags: true,
            max_hashtags: String::new(),
            selected: ContentField::default(),
        }
    }

    /// Clears all fields back to their initial values.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Moves the selection to the next field, wrapping.
    ///
    /// Skips the max-hashtags field while hashtags are disabled.
    pub fn select_next(&mut self) {
        self.selected = cycle_forward(ContentField::all(), self.selected);
        if self.selected == ContentField::MaxHashtags && !self.include_hashtags {
            self.selected = cycle_forward(ContentField::all(), self.selected);
        }
    }

    /// Moves the selection to the previous field, wrapping.
    pub fn select_prev(&mut self) {
        self.selected = cycle_backward(ContentField::all(), self.selected);
        if self.selected == ContentField::MaxHashtags && !self.include_hashtags {
            self.selected = cycle_backward(ContentField::all(), self.selected);
        }
    }

    /// Returns the description as a single string with newlines.
    #[must_use]
    pub fn description_text(&self) -> String {
        self.description.lines().join("\n")
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self::new()
    }
}

/// How long a transient notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Kind of transient notice, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A transient notice shown near the result panel.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub shown_at: Instant,
}

impl Notice {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    /// Returns true once the notice has outlived its display window.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= NOTICE_TTL
    }
}

/// State for the generated result display.
#[derive(Default)]
pub struct ResultState {
    /// The generated content, if any.
    pub content: Option<String>,
    /// Error message to display instead of content.
    pub error: Option<String>,
    /// Scroll offset into the content.
    pub scroll: usize,
    /// Transient notice, cleared by [`Notice::is_expired`] on tick.
    pub notice: Option<Notice>,
}

impl ResultState {
    /// Clears content, error, scroll and notice.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replaces any previous outcome with an error message.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.content = None;
        self.scroll = 0;
    }

    /// Replaces any previous outcome with generated content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
        self.error = None;
        self.scroll = 0;
    }
}

/// Phase of the feedback flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackPhase {
    /// No feedback UI visible.
    #[default]
    Idle,
    /// The feedback editor is open.
    Editing,
    /// Feedback has been sent and a response is awaited.
    Submitting,
}

/// State for the feedback editor.
pub struct FeedbackState {
    pub phase: FeedbackPhase,
    pub editor: TextArea<'static>,
}

impl FeedbackState {
    #[must_use]
    pub fn new() -> Self {
        let mut editor = TextArea::default();
        editor.set_placeholder_text("What should change about this post?");
        Self {
            phase: FeedbackPhase::Idle,
            editor,
        }
    }

    /// Opens the editor with empty content.
    pub fn open(&mut self) {
        self.editor = TextArea::default();
        self.editor
            .set_placeholder_text("What should change about this post?");
        self.phase = FeedbackPhase::Editing;
    }

    /// Closes the editor and discards its content.
    pub fn close(&mut self) {
        *self = Self::new();
    }

    /// Returns the feedback text with surrounding whitespace trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        self.editor.lines().join("\n").trim().to_string()
    }
}

impl Default for FeedbackState {
    fn default() -> Self {
        Self::new()
    }
}

/// One field of the required-inputs follow-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredInput {
    /// Field name as sent by the server.
    pub name: String,
    /// Value typed by the user.
    pub value: String,
    /// Set when a submit attempt found this field empty.
    pub flagged: bool,
}

/// State for the required-inputs follow-up form.
///
/// Present only while the server has asked for additional inputs; the
/// form replaces the result panel until submitted or dismissed.
pub struct RequiredInputsState {
    pub fields: Vec<RequiredInput>,
    pub selected: usize,
}

impl RequiredInputsState {
    /// Builds the form from the server's field name list.
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let fields = names
            .into_iter()
            .map(|name| RequiredInput {
                name,
                value: String::new(),
                flagged: false,
            })
            .collect();
        Self {
            fields,
            selected: 0,
        }
    }

    /// Moves the selection down, wrapping.
    pub fn select_next(&mut self) {
        if !self.fields.is_empty() {
            self.selected = (self.selected + 1) % self.fields.len();
        }
    }

    /// Moves the selection up, wrapping.
    pub fn select_prev(&mut self) {
        if !self.fields.is_empty() {
            self.selected = (self.selected + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Returns a mutable reference to the selected field, if any.
    pub fn selected_field_mut(&mut self) -> Option<&mut RequiredInput> {
        self.fields.get_mut(self.selected)
    }

    /// Flags empty fields, returning true when every field is filled.
    ///
    /// Flags are recomputed on every call so a field loses its mark once
    /// the user fills it in.
    pub fn validate(&mut self) -> bool {
        let mut all_filled = true;
        for field in &mut self.fields {
            field.flagged = field.value.trim().is_empty();
            if field.flagged {
                all_filled = false;
            }
        }
        all_filled
    }

    /// Returns the collected name/value pairs.
    #[must_use]
    pub fn values(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}

/// Identifiers for settings items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsItem {
    /// OpenAI API key.
    #[default]
    ApiKey,
    /// OpenAI model name.
    Model,
    /// ScrapeGraph API key.
    ScrapegraphApiKey,
}

impl SettingsItem {
    /// Returns all settings items in display order.
    #[must_use]
    pub fn all() -> &'static [SettingsItem] {
        &[
            SettingsItem::ApiKey,
            SettingsItem::Model,
            SettingsItem::ScrapegraphApiKey,
        ]
    }

    /// Returns the display label for this item.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ApiKey => "OpenAI API Key",
            Self::Model => "OpenAI Model",
            Self::ScrapegraphApiKey => "ScrapeGraph API Key",
        }
    }

    /// Returns a description for this item.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ApiKey => "Key sent to the backend for generation requests",
            Self::Model => "Model name the backend should use (empty for default)",
            Self::ScrapegraphApiKey => "Key for the web scraping service",
        }
    }
}

/// State for the settings overlay.
pub struct SettingsState {
    pub api_key: String,
    pub model: String,
    pub scrapegraph_api_key: String,
    /// Currently selected item.
    pub selected: SettingsItem,
}

impl SettingsState {
    /// Builds editable state from persisted settings.
    #[must_use]
    pub fn from_persisted(settings: &PersistedSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            scrapegraph_api_key: settings.scrapegraph_api_key.clone(),
            selected: SettingsItem::default(),
        }
    }

    /// Converts the editable state back to the persisted form.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedSettings {
        PersistedSettings {
            api_key: self.api_key.trim().to_string(),
            model: self.model.trim().to_string(),
            scrapegraph_api_key: self.scrapegraph_api_key.trim().to_string(),
        }
    }

    /// Moves the selection to the next item, wrapping.
    pub fn select_next(&mut self) {
        self.selected = cycle_forward(SettingsItem::all(), self.selected);
    }

    /// Moves the selection to the previous item, wrapping.
    pub fn select_prev(&mut self) {
        self.selected = cycle_backward(SettingsItem::all(), self.selected);
    }

    /// Returns a mutable reference to the text of the selected item.
    pub fn selected_text_mut(&mut self) -> &mut String {
        match self.selected {
            SettingsItem::ApiKey => &mut self.api_key,
            SettingsItem::Model => &mut self.model,
            SettingsItem::ScrapegraphApiKey => &mut self.scrapegraph_api_key,
        }
    }
}

/// Application mode.
///
/// - **Wizard**: the main two-step form interface.
/// - **Settings**: modal overlay for provider credentials (Ctrl+S).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Two-step wizard interface.
    #[default]
    Wizard,
    /// Settings panel overlay.
    Settings,
}

/// The kind of request currently in flight.
///
/// At most one request runs at a time; further submits are ignored
/// until the pending one resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    /// Initial generation request.
    Generate,
    /// Follow-up with collected required inputs.
    RequiredInputs,
    /// Feedback submission.
    Feedback,
}

impl PendingRequest {
    /// Returns the status line text for this request.
    #[must_use]
    pub const fn status_text(&self) -> &'static str {
        match self {
            Self::Generate => "Generating content...",
            Self::RequiredInputs => "Generating with additional inputs...",
            Self::Feedback => "Improving content...",
        }
    }
}

/// Events sent from background request tasks to the UI.
#[derive(Debug)]
pub enum ApiEvent {
    /// A `/generate` or follow-up request finished.
    GenerationDone(Result<GenerateResponse, ApiError>),
    /// A feedback submission finished.
    FeedbackDone(Result<FeedbackResponse, ApiError>),
}

fn cycle_forward<T: Copy + PartialEq>(items: &[T], current: T) -> T {
    let idx = items.iter().position(|i| *i == current).unwrap_or(0);
    items[(idx + 1) % items.len()]
}

fn cycle_backward<T: Copy + PartialEq>(items: &[T], current: T) -> T {
    let idx = items.iter().position(|i| *i == current).unwrap_or(0);
    items[(idx + items.len() - 1) % items.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    mod wizard_step {
        use super::*;

        #[test]
        fn next_from_context_is_content() {
            assert_eq!(WizardStep::Context.next(), WizardStep::Content);
        }

        #[test]
        fn next_from_content_stays_content() {
            assert_eq!(WizardStep::Content.next(), WizardStep::Content);
        }

        #[test]
        fn back_from_content_is_context() {
            assert_eq!(WizardStep::Content.back(), WizardStep::Context);
        }

        #[test]
        fn back_from_context_stays_context() {
            assert_eq!(WizardStep::Context.back(), WizardStep::Context);
        }
    }

    mod context_state {
        use super::*;

        #[test]
        fn selection_wraps_forward() {
            let mut state = ContextState::new();
            for _ in 0..ContextField::all().len() {
                state.select_next();
            }
            assert_eq!(state.selected, ContextField::AttachmentPath);
        }

        #[test]
        fn selection_wraps_backward() {
            let mut state = ContextState::new();
            state.select_prev();
            assert_eq!(state.selected, ContextField::ScrapePrompt);
        }

        #[test]
        fn reset_clears_fields_and_attachment() {
            let mut state = ContextState::new();
            state.profile_url = "https://example.com".to_string();
            state.attachment = Some(Attachment {
                name: "a.txt".to_string(),
                bytes: vec![1, 2, 3],
            });

            state.reset();

            assert!(state.profile_url.is_empty());
            assert!(state.attachment.is_none());
        }

        #[test]
        fn selected_text_tracks_selection() {
            let mut state = ContextState::new();
            state.selected = ContextField::ScrapeUrl;
            state.selected_text_mut().push_str("https://example.com");
            assert_eq!(state.scrape_url, "https://example.com");
        }
    }

    mod content_state {
        use super::*;

        #[test]
        fn hashtags_enabled_by_default() {
            assert!(ContentState::new().include_hashtags);
        }

        #[test]
        fn max_hashtags_skipped_when_disabled() {
            let mut state = ContentState::new();
            state.include_hashtags = false;
            state.selected = ContentField::IncludeHashtags;

            state.select_next();
            assert_eq!(state.selected, ContentField::Subject);

            state.select_prev();
            assert_eq!(state.selected, ContentField::IncludeHashtags);
        }

        #[test]
        fn description_text_joins_lines() {
            let mut state = ContentState::new();
            state.description.insert_str("line one");
            state.description.insert_newline();
            state.description.insert_str("line two");

            assert_eq!(state.description_text(), "line one\nline two");
        }
    }

    mod result_state {
        use super::*;

        #[test]
        fn set_error_clears_content() {
            let mut state = ResultState::default();
            state.set_content("a post");
            state.set_error("it broke");

            assert!(state.content.is_none());
            assert_eq!(state.error.as_deref(), Some("it broke"));
        }

        #[test]
        fn set_content_clears_error_and_scroll() {
            let mut state = ResultState::default();
            state.set_error("it broke");
            state.scroll = 4;
            state.set_content("a post");

            assert!(state.error.is_none());
            assert_eq!(state.content.as_deref(), Some("a post"));
            assert_eq!(state.scroll, 0);
        }
    }

    mod notice {
        use super::*;

        #[test]
        fn fresh_notice_is_not_expired() {
            let notice = Notice::new("saved", NoticeKind::Success);
            assert!(!notice.is_expired());
        }

        #[test]
        fn backdated_notice_is_expired() {
            let mut notice = Notice::new("saved", NoticeKind::Success);
            notice.shown_at = Instant::now() - NOTICE_TTL - Duration::from_millis(1);
            assert!(notice.is_expired());
        }
    }

    mod feedback_state {
        use super::*;

        #[test]
        fn open_enters_editing_with_empty_text() {
            let mut state = FeedbackState::new();
            state.editor.insert_str("leftover");

            state.open();

            assert_eq!(state.phase, FeedbackPhase::Editing);
            assert!(state.text().is_empty());
        }

        #[test]
        fn close_returns_to_idle() {
            let mut state = FeedbackState::new();
            state.open();
            state.close();
            assert_eq!(state.phase, FeedbackPhase::Idle);
        }

        #[test]
        fn text_is_trimmed() {
            let mut state = FeedbackState::new();
            state.open();
            state.editor.insert_str("  more emojis  ");
            assert_eq!(state.text(), "more emojis");
        }
    }

    mod required_inputs {
        use super::*;

        fn form() -> RequiredInputsState {
            RequiredInputsState::new(vec!["audience".to_string(), "cta".to_string()])
        }

        #[test]
        fn validate_flags_empty_fields() {
            let mut state = form();
            state.fields[0].value = "developers".to_string();

            assert!(!state.validate());
            assert!(!state.fields[0].flagged);
            assert!(state.fields[1].flagged);
        }

        #[test]
        fn validate_passes_when_all_filled() {
            let mut state = form();
            state.fields[0].value = "developers".to_string();
            state.fields[1].value = "sign up".to_string();

            assert!(state.validate());
            assert!(state.fields.iter().all(|f| !f.flagged));
        }

        #[test]
        fn flag_clears_after_fill() {
            let mut state = form();
            state.validate();
            assert!(state.fields[0].flagged);

            state.fields[0].value = "developers".to_string();
            state.fields[1].value = "sign up".to_string();
            state.validate();
            assert!(!state.fields[0].flagged);
        }

        #[test]
        fn whitespace_only_value_counts_as_empty() {
            let mut state = form();
            state.fields[0].value = "   ".to_string();
            state.fields[1].value = "x".to_string();

            assert!(!state.validate());
            assert!(state.fields[0].flagged);
        }

        #[test]
        fn selection_wraps_both_directions() {
            let mut state = form();
            state.select_next();
            assert_eq!(state.selected, 1);
            state.select_next();
            assert_eq!(state.selected, 0);
            state.select_prev();
            assert_eq!(state.selected, 1);
        }
    }

    mod settings_state {
        use super::*;

        #[test]
        fn roundtrips_persisted_settings() {
            let persisted = PersistedSettings {
                api_key: "k1".to_string(),
                model: "gpt-4".to_string(),
                scrapegraph_api_key: "sg".to_string(),
            };

            let state = SettingsState::from_persisted(&persisted);
            assert_eq!(state.to_persisted(), persisted);
        }

        #[test]
        fn to_persisted_trims_whitespace() {
            let mut state = SettingsState::from_persisted(&PersistedSettings::default());
            state.api_key = "  k1  ".to_string();

            assert_eq!(state.to_persisted().api_key, "k1");
        }

        #[test]
        fn selection_cycles_through_all_items() {
            let mut state = SettingsState::from_persisted(&PersistedSettings::default());
            assert_eq!(state.selected, SettingsItem::ApiKey);
            state.select_next();
            assert_eq!(state.selected, SettingsItem::Model);
            state.select_next();
            assert_eq!(state.selected, SettingsItem::ScrapegraphApiKey);
            state.select_next();
            assert_eq!(state.selected, SettingsItem::ApiKey);
        }
    }
}
