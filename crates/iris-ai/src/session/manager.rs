//! Session struct, read access, and draft operations.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use iris_common::SessionId;
use tokio::sync::watch;
use tracing::debug;

use crate::adapter::ContentGenerator;
use crate::media::{ImageData, MediaStore};
use crate::transcript::{Message, Transcript};

use super::draft::{AttachedImage, ComposeDraft, SUGGESTIONS};
use super::types::SubmissionState;

/// Everything mutable, behind one lock that is never held across an await.
#[derive(Debug, Default)]
pub(super) struct SessionState {
    pub(super) transcript: Transcript,
    pub(super) draft: ComposeDraft,
    pub(super) submission: SubmissionState,
    /// Transient failure detail, separate from the permanent SYSTEM entry.
    pub(super) banner: Option<String>,
}

/// A single conversation with at most one request in flight.
pub struct Session {
    pub(super) id: SessionId,
    pub(super) generator: Arc<dyn ContentGenerator>,
    pub(super) media: MediaStore,
    state: Mutex<SessionState>,
    /// Bumped after every observable mutation.
    revision: watch::Sender<u64>,
}

impl Session {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        let id = SessionId::new();
        let (revision, _) = watch::channel(0);
        debug!(session = %id.short(), "session started");
        Self {
            id,
            generator,
            media: MediaStore::new(),
            state: Mutex::new(SessionState::default()),
            revision,
        }
    }

    pub(super) fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn touch(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    /// Change notifications for presentation layers. The value is a
    /// revision counter; re-read the session whenever it moves.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    // -- Draft operations --------------------------------------------------

    /// Replace the draft text.
    pub fn update_draft_text(&self, text: impl Into<String>) {
        self.state().draft.text = text.into();
        self.touch();
    }

    /// Replace the draft text with one of [`SUGGESTIONS`]. Returns `false`
    /// for an out-of-range index.
    pub fn apply_suggestion(&self, index: usize) -> bool {
        match SUGGESTIONS.get(index) {
            Some(suggestion) => {
                self.update_draft_text(*suggestion);
                true
            }
            None => false,
        }
    }

    /// Attach an image, replacing and releasing any previous one, and clear
    /// the banner. Refused (returns `false`) while a submission is in flight.
    pub fn attach_image(&self, bytes: impl Into<Arc<[u8]>>, mime_type: impl Into<String>) -> bool {
        let mut state = self.state();
        if state.submission == SubmissionState::InFlight {
            debug!(session = %self.id.short(), "attach refused while in flight");
            return false;
        }

        let data = ImageData::new(bytes, mime_type);
        let preview = self.media.acquire_preview(data.clone());
        debug!(
            session = %self.id.short(),
            mime = data.mime_type(),
            bytes = data.len(),
            "image attached"
        );
        state.draft.attached = Some(AttachedImage { data, preview });
        state.banner = None;
        drop(state);
        self.touch();
        true
    }

    /// Drop the attached image, if any. Safe to call repeatedly.
    pub fn remove_attached_image(&self) {
        let removed = self.state().draft.attached.take();
        if removed.is_some() {
            drop(removed);
            debug!(session = %self.id.short(), "image removed");
            self.touch();
        }
    }

    pub fn clear_banner(&self) {
        if self.state().banner.take().is_some() {
            self.touch();
        }
    }

    // -- Read access -------------------------------------------------------

    /// Snapshot of the full transcript.
    pub fn transcript(&self) -> Vec<Message> {
        self.state().transcript.as_slice().to_vec()
    }

    /// Messages appended at or after `index`, for incremental rendering.
    pub fn messages_since(&self, index: usize) -> Vec<Message> {
        let state = self.state();
        state
            .transcript
            .as_slice()
            .get(index..)
            .map(<[Message]>::to_vec)
            .unwrap_or_default()
    }

    pub fn message_count(&self) -> usize {
        self.state().transcript.len()
    }

    pub fn draft_text(&self) -> String {
        self.state().draft.text.clone()
    }

    pub fn attached_image(&self) -> Option<ImageData> {
        self.state().draft.attached.as_ref().map(|a| a.data.clone())
    }

    pub fn has_attachment(&self) -> bool {
        self.state().draft.attached.is_some()
    }

    /// Reference to the composer preview of the attached image.
    pub fn preview_ref(&self) -> Option<String> {
        self.state()
            .draft
            .attached
            .as_ref()
            .map(|a| a.preview.reference().to_string())
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.state().submission
    }

    /// Whether a reply is pending; drives a "thinking" indicator.
    pub fn is_thinking(&self) -> bool {
        self.submission_state() == SubmissionState::InFlight
    }

    pub fn banner(&self) -> Option<String> {
        self.state().banner.clone()
    }

    /// Resolve a transcript image reference or the current preview reference.
    pub fn resolve_image(&self, reference: &str) -> Option<ImageData> {
        self.media.resolve(reference)
    }

    pub fn media(&self) -> &MediaStore {
        &self.media
    }
}
