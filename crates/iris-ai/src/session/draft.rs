//! The not-yet-submitted user input.

use crate::media::{ImageData, PreviewHandle};

/// Starter prompts offered on an empty conversation.
pub const SUGGESTIONS: [&str; 3] = [
    "Describe this image",
    "Translate 'Hello, world!' to French",
    "Write a short poem about the ocean",
];

/// An image waiting in the composer together with its preview entry.
#[derive(Debug)]
pub(super) struct AttachedImage {
    pub(super) data: ImageData,
    pub(super) preview: PreviewHandle,
}

#[derive(Debug, Default)]
pub(super) struct ComposeDraft {
    pub(super) text: String,
    pub(super) attached: Option<AttachedImage>,
}

impl ComposeDraft {
    /// Non-blank text or an attached image.
    pub(super) fn is_submittable(&self) -> bool {
        !self.text.trim().is_empty() || self.attached.is_some()
    }

    /// Resets both fields; any preview is released here.
    pub(super) fn clear(&mut self) {
        self.text.clear();
        self.attached = None;
    }
}
