//! Configuration schema types for Iris.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults that talk to Gemini directly.

mod api;
mod attachments;
mod model;
mod system;

pub use api::*;
pub use attachments::*;
pub use model::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Iris.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct IrisConfig {
    pub model: ModelConfig,
    pub api: ApiConfig,
    pub attachments: AttachmentsConfig,
    pub logging: LoggingConfig,
}
