//! Iris configuration system.
//!
//! TOML-based configuration with full validation. All sections use
//! defaults so partial configs work out of the box. Validation problems are
//! logged as warnings; the file's values are kept.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use iris_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::IrisConfig;

use iris_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default path when `None`.
///
/// An explicit path must exist; the default path is created from the
/// commented template on first run. Only a missing explicit file, an
/// unreadable file, or malformed TOML is an error.
pub fn load_config(path: Option<&Path>) -> Result<IrisConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &IrisConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
