//! Image attachment limits.

use serde::{Deserialize, Serialize};

/// Largest request Gemini accepts with inline data.
pub const MAX_INLINE_IMAGE_BYTES: u32 = 20 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentsConfig {
    /// Files above this size are refused at attach time (valid range: 1-20 MiB).
    pub max_image_bytes: u32,
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: MAX_INLINE_IMAGE_BYTES,
        }
    }
}
