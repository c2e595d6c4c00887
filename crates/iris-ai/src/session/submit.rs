//! The submission lifecycle: `Idle -> InFlight -> Idle`.

use tracing::{debug, info};

use crate::media::ImageData;
use crate::transcript::{Message, MessagePart, Role};

use super::manager::Session;
use super::types::{IgnoreReason, InFlightGuard, SubmissionState, SubmitOutcome};

impl Session {
    /// Send the current draft.
    ///
    /// A no-op while another submission is in flight or when the draft has
    /// neither non-blank text nor an image. Otherwise the USER entry is
    /// appended before the adapter is called, and exactly one MODEL or
    /// SYSTEM entry follows once it resolves. The draft is then cleared and
    /// the session is `Idle` again. Never fails; outcome is observable
    /// through the transcript and banner.
    pub async fn submit(&self) -> SubmitOutcome {
        let (prompt, image) = {
            let mut state = self.state();
            if state.submission == SubmissionState::InFlight {
                debug!(session = %self.id.short(), "submit ignored: request in flight");
                return SubmitOutcome::Ignored(IgnoreReason::InFlight);
            }
            if !state.draft.is_submittable() {
                debug!(session = %self.id.short(), "submit ignored: empty draft");
                return SubmitOutcome::Ignored(IgnoreReason::EmptyDraft);
            }

            state.submission = SubmissionState::InFlight;
            state.banner = None;

            let prompt = state.draft.text.trim().to_string();
            let image: Option<ImageData> = state.draft.attached.as_ref().map(|a| a.data.clone());

            let mut parts = Vec::with_capacity(2);
            if let Some(image) = &image {
                parts.push(MessagePart::Image {
                    image_ref: self.media.persist(image.clone()),
                });
            }
            if !prompt.is_empty() {
                parts.push(MessagePart::Text {
                    text: prompt.clone(),
                });
            }
            state.transcript.push(Message::new(Role::User, parts));

            (prompt, image)
        };
        let mut guard = InFlightGuard::new(self);
        self.touch();

        debug!(session = %self.id.short(), "submission in flight");
        let result = self.generator.generate(&prompt, image.as_ref()).await;

        let mut state = self.state();
        let outcome = match result {
            Ok(text) => {
                state.transcript.push(Message::text(Role::Model, text));
                info!(session = %self.id.short(), "reply received");
                SubmitOutcome::Completed
            }
            Err(err) => {
                let detail = err.detail().to_string();
                state
                    .transcript
                    .push(Message::text(Role::System, format!("Error: {detail}")));
                state.banner = Some(detail.clone());
                info!(session = %self.id.short(), "submission failed: {detail}");
                SubmitOutcome::Failed(detail)
            }
        };
        guard.settle();
        drop(state);
        outcome
    }
}
