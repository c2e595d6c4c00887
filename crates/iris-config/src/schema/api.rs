//! Credential lookup.

use serde::{Deserialize, Serialize};

/// Where the API key comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Environment variables checked in order; the first non-empty one wins.
    pub key_env: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key_env: vec!["GEMINI_API_KEY".to_string(), "API_KEY".to_string()],
        }
    }
}
