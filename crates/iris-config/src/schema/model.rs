//! Generative model selection and generation limits.

use serde::{Deserialize, Serialize};

pub use iris_common::defaults::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Which model to call and how.
///
/// `max_output_tokens` and `temperature` are only sent when set; otherwise
/// the backend's own defaults apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_output_tokens: None,
            temperature: None,
        }
    }
}
