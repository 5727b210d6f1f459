//! HTTP client for the content generation backend.

pub mod client;
pub mod types;

pub use client::{ApiClient, ApiError};
pub use types::{
    Attachment, FeedbackRequest, FeedbackResponse, GenerateRequest, GenerateResponse,
    GenerateWithInputsRequest,
};
