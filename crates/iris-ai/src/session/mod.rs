//! Conversation session.
//!
//! A `Session` owns the transcript, the compose draft, and the
//! single-flight submission lifecycle. It is the only writer of the
//! transcript; the presentation layer reads snapshots and calls the
//! draft/submit operations.

mod draft;
mod manager;
mod submit;
mod types;


pub use draft::SUGGESTIONS;
pub use manager::Session;
pub use types::{IgnoreReason, SubmissionState, SubmitOutcome};
