//! Image bytes and the references that point at them.
//!
//! Two kinds of reference live in a [`MediaStore`]:
//! - `preview://<id>` entries back the composer's attachment preview and
//!   are owned by a [`PreviewHandle`]; dropping the handle unregisters them.
//! - `image://<id>` entries back transcript image parts and stay
//!   registered for as long as the store lives.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

const PREVIEW_SCHEME: &str = "preview://";
const IMAGE_SCHEME: &str = "image://";

/// Raw image bytes plus their declared media type. Cloning is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    bytes: Arc<[u8]>,
    mime_type: String,
}

impl ImageData {
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Shared registry resolving opaque image references to bytes.
#[derive(Clone, Default)]
pub struct MediaStore {
    entries: Arc<Mutex<HashMap<String, ImageData>>>,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a preview for the composer. The entry lives exactly as long
    /// as the returned handle.
    pub(crate) fn acquire_preview(&self, image: ImageData) -> PreviewHandle {
        let reference = format!("{PREVIEW_SCHEME}{}", iris_common::new_id());
        self.entries().insert(reference.clone(), image);
        debug!(%reference, "preview acquired");
        PreviewHandle {
            reference,
            store: self.clone(),
        }
    }

    /// Register an image for the transcript and return its permanent reference.
    pub(crate) fn persist(&self, image: ImageData) -> String {
        let reference = format!("{IMAGE_SCHEME}{}", iris_common::new_id());
        self.entries().insert(reference.clone(), image);
        reference
    }

    /// Look up the bytes behind a preview or transcript reference.
    pub fn resolve(&self, reference: &str) -> Option<ImageData> {
        self.entries().get(reference).cloned()
    }

    /// Number of live preview entries (at most one while a session is healthy).
    pub fn preview_count(&self) -> usize {
        self.entries()
            .keys()
            .filter(|k| k.starts_with(PREVIEW_SCHEME))
            .count()
    }

    /// Number of registered entries of either kind.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn release(&self, reference: &str) {
        if self.entries().remove(reference).is_some() {
            debug!(%reference, "preview released");
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, ImageData>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for MediaStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaStore")
            .field("entries", &self.len())
            .finish()
    }
}

/// Scoped ownership of one preview entry.
#[derive(Debug)]
pub struct PreviewHandle {
    reference: String,
    store: MediaStore,
}

impl PreviewHandle {
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.store.release(&self.reference);
    }
}
