//! Full configuration validation.
//!
//! Each check pushes a message instead of returning early, so a single
//! `ConfigError` reports every problem in the file at once.

mod helpers;


use crate::schema::{IrisConfig, MAX_INLINE_IMAGE_BYTES};
use iris_common::ConfigError;

use helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &IrisConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_model(&mut errors, config);
    validate_api(&mut errors, config);
    validate_range(
        &mut errors,
        "attachments.max_image_bytes",
        config.attachments.max_image_bytes,
        1,
        MAX_INLINE_IMAGE_BYTES,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_model(errors: &mut Vec<String>, config: &IrisConfig) {
    validate_non_empty(errors, "model.name", &config.model.name);
    validate_non_empty(errors, "model.base_url", &config.model.base_url);

    if let Some(tokens) = config.model.max_output_tokens {
        validate_range(errors, "model.max_output_tokens", tokens, 1, 65536);
    }
    if let Some(temperature) = config.model.temperature {
        validate_range_f64(errors, "model.temperature", temperature, 0.0, 2.0);
    }
}

fn validate_api(errors: &mut Vec<String>, config: &IrisConfig) {
    if config.api.key_env.is_empty() {
        errors.push("api.key_env must list at least one variable".to_string());
    }
    for name in &config.api.key_env {
        validate_non_empty(errors, "api.key_env entry", name);
    }
}
