//! Content adapter: the single boundary between the session and a provider.
//!
//! Encodes a prompt plus optional image into request parts, makes exactly
//! one backend call, and turns every provider failure into a plain
//! [`ProviderError`]. Nothing above this module sees `AiError`.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use tracing::{debug, warn};

use crate::gemini::{GeminiClient, GeminiConfig};
use crate::media::ImageData;
use crate::{AiError, ContentBackend, ContentPart};

/// Descriptive failure detail, safe to show to a user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ProviderError(String);

impl ProviderError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }

    pub fn detail(&self) -> &str {
        &self.0
    }
}

impl From<AiError> for ProviderError {
    fn from(err: AiError) -> Self {
        Self(err.to_string())
    }
}

/// What the session calls to get a reply.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Resolves with generated text or a descriptive failure; never panics.
    async fn generate(&self, prompt: &str, image: Option<&ImageData>)
        -> Result<String, ProviderError>;
}

enum Backend {
    Ready(Arc<dyn ContentBackend>),
    /// Startup found no usable credential; every call fails with this.
    Unconfigured(String),
}

/// Stateless adapter over a [`ContentBackend`].
pub struct ContentAdapter {
    backend: Backend,
}

impl ContentAdapter {
    pub fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self {
            backend: Backend::Ready(backend),
        }
    }

    /// An adapter whose every call fails with `reason`.
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unconfigured(reason.into()),
        }
    }

    /// Build a Gemini-backed adapter, or an unconfigured one if the
    /// credential or HTTP client cannot be set up.
    pub fn gemini(config: Result<GeminiConfig, AiError>) -> Self {
        match config.and_then(GeminiClient::new) {
            Ok(client) => Self::new(Arc::new(client)),
            Err(e) => {
                warn!("content adapter unavailable: {e}");
                Self::unconfigured(e.to_string())
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    /// Image first (to bias the model toward inspecting it), then the
    /// prompt text, which is sent even when empty.
    pub fn build_parts(prompt: &str, image: Option<&ImageData>) -> Vec<ContentPart> {
        let mut parts = Vec::with_capacity(2);
        if let Some(image) = image {
            parts.push(ContentPart::InlineData {
                mime_type: image.mime_type().to_string(),
                data: BASE64_STANDARD.encode(image.bytes()),
            });
        }
        parts.push(ContentPart::Text(prompt.to_string()));
        parts
    }
}

#[async_trait]
impl ContentGenerator for ContentAdapter {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageData>,
    ) -> Result<String, ProviderError> {
        let backend = match &self.backend {
            Backend::Ready(backend) => backend,
            Backend::Unconfigured(reason) => return Err(ProviderError::new(reason.clone())),
        };

        let parts = Self::build_parts(prompt, image);
        debug!(
            prompt_len = prompt.len(),
            image_bytes = image.map(ImageData::len),
            "generating content"
        );

        backend.generate_content(&parts).await.map_err(|e| {
            warn!("content generation failed: {e}");
            ProviderError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every request and answers from a fixed result.
    struct RecordingBackend {
        calls: Mutex<Vec<Vec<ContentPart>>>,
        reply: fn() -> Result<String, AiError>,
    }

    impl RecordingBackend {
        fn new(reply: fn() -> Result<String, AiError>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn calls(&self) -> Vec<Vec<ContentPart>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentBackend for RecordingBackend {
        async fn generate_content(&self, parts: &[ContentPart]) -> Result<String, AiError> {
            self.calls.lock().unwrap().push(parts.to_vec());
            (self.reply)()
        }
    }

    fn cat_photo() -> ImageData {
        ImageData::new(b"meow".to_vec(), "image/jpeg")
    }

    #[tokio::test]
    async fn text_only_request_has_single_text_part() {
        let backend = RecordingBackend::new(|| Ok("Hi there".into()));
        let adapter = ContentAdapter::new(backend.clone());

        let reply = adapter.generate("Hello", None).await.unwrap();

        assert_eq!(reply, "Hi there");
        assert_eq!(backend.calls(), vec![vec![ContentPart::Text("Hello".into())]]);
    }

    #[tokio::test]
    async fn image_is_encoded_and_placed_first() {
        let backend = RecordingBackend::new(|| Ok("A photo of a cat.".into()));
        let adapter = ContentAdapter::new(backend.clone());

        adapter.generate("", Some(&cat_photo())).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec![
                ContentPart::InlineData {
                    mime_type: "image/jpeg".into(),
                    data: "bWVvdw==".into(),
                },
                ContentPart::Text(String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn reply_is_returned_verbatim() {
        let backend = RecordingBackend::new(|| Ok("  spaced\n\nout  ".into()));
        let adapter = ContentAdapter::new(backend);

        let reply = adapter.generate("x", None).await.unwrap();
        assert_eq!(reply, "  spaced\n\nout  ");
    }

    #[tokio::test]
    async fn backend_failure_becomes_descriptive_string() {
        let backend = RecordingBackend::new(|| Err(AiError::NetworkError("dns failure".into())));
        let adapter = ContentAdapter::new(backend.clone());

        let err = adapter.generate("Translate", None).await.unwrap_err();

        assert_eq!(err.detail(), "Network error: dns failure");
        assert_eq!(backend.calls().len(), 1, "no retry on failure");
    }

    #[tokio::test]
    async fn unconfigured_adapter_fails_every_call() {
        let adapter = ContentAdapter::unconfigured("no key");
        assert!(!adapter.is_configured());

        for _ in 0..2 {
            let err = adapter.generate("Hello", None).await.unwrap_err();
            assert_eq!(err, ProviderError::new("no key"));
        }
    }

    #[tokio::test]
    async fn gemini_without_credential_is_unconfigured() {
        let vars = vec!["GEMINI_API_KEY".to_string(), "API_KEY".to_string()];
        let adapter = ContentAdapter::gemini(GeminiConfig::from_lookup(&vars, |_| None));
        assert!(!adapter.is_configured());

        let err = adapter.generate("Hello", None).await.unwrap_err();
        assert_eq!(
            err.detail(),
            "Gemini API not configured. Set GEMINI_API_KEY or API_KEY in the environment."
        );
    }

    #[test]
    fn gemini_with_key_is_configured() {
        let adapter = ContentAdapter::gemini(Ok(GeminiConfig::new("test-key")));
        assert!(adapter.is_configured());
    }
}
