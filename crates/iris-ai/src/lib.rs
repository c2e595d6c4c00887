//! Conversation engine for Iris.
//!
//! Provides:
//! - the transcript data model (roles, message parts, append-only history)
//! - the content adapter that turns a prompt and optional image into a
//!   single backend call and normalizes its failure
//! - a Gemini backend over the Generative Language API
//! - the single-flight conversation session

pub mod adapter;
pub mod gemini;
pub mod media;
pub mod session;
pub mod transcript;

use async_trait::async_trait;

pub use adapter::{ContentAdapter, ContentGenerator, ProviderError};
pub use gemini::{GeminiClient, GeminiConfig};
pub use media::{ImageData, MediaStore, PreviewHandle};
pub use session::{IgnoreReason, Session, SubmissionState, SubmitOutcome, SUGGESTIONS};
pub use transcript::{Message, MessagePart, Role, Transcript};

/// A provider capable of turning request parts into generated text.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    async fn generate_content(&self, parts: &[ContentPart]) -> Result<String, AiError>;
}

/// One part of an outgoing request, already in transfer-safe form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    /// Base64 (standard alphabet) payload with its declared media type.
    InlineData { mime_type: String, data: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("{0}")]
    NotConfigured(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Response blocked: {0}")]
    Blocked(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_error_display() {
        assert_eq!(AiError::RateLimited.to_string(), "Rate limited");
        assert_eq!(
            AiError::NetworkError("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            AiError::Blocked("SAFETY".into()).to_string(),
            "Response blocked: SAFETY"
        );
        assert_eq!(
            AiError::NotConfigured("no key".into()).to_string(),
            "no key"
        );
    }
}
