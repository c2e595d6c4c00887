//! ContentBackend trait implementation for GeminiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiError, ContentBackend, ContentPart};

use super::client::{describe_error_body, GeminiClient, GenerateContentResponse};

#[async_trait]
impl ContentBackend for GeminiClient {
    async fn generate_content(&self, parts: &[ContentPart]) -> Result<String, AiError> {
        let body = self.build_request_body(parts);
        let url = self.api_url();

        debug!(model = %self.config.model, parts = parts.len(), "Gemini API request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!(
                "HTTP {status}: {}",
                describe_error_body(&text)
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(parsed)
    }
}
