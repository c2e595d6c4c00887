//! Session state types and the in-flight guard.

use tracing::{debug, info};

use crate::transcript::{Message, Role};

use super::manager::Session;

/// Detail recorded when a submission ends without an adapter outcome.
pub(super) const CANCELLED_DETAIL: &str = "submission cancelled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
}

/// Why `submit()` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    InFlight,
    EmptyDraft,
}

/// Informational result of `submit()`. The transcript and banner are the
/// source of truth; callers may drop this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    Completed,
    Failed(String),
}

/// Held for the duration of one accepted submission. Dropping it clears
/// the draft and returns the session to `Idle`, whether the submission
/// finished, panicked, or its future was dropped. If no MODEL or SYSTEM
/// entry was appended by then, a cancellation SYSTEM entry is, so every
/// USER entry keeps its pair.
pub(super) struct InFlightGuard<'a> {
    session: &'a Session,
    settled: bool,
}

impl<'a> InFlightGuard<'a> {
    /// Caller must already have moved the state to `InFlight`.
    pub(super) fn new(session: &'a Session) -> Self {
        Self {
            session,
            settled: false,
        }
    }

    /// The submission's outcome entry has been appended.
    pub(super) fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.session.state();
            if !self.settled {
                state
                    .transcript
                    .push(Message::text(Role::System, format!("Error: {CANCELLED_DETAIL}")));
                state.banner = Some(CANCELLED_DETAIL.to_string());
                info!(session = %self.session.id().short(), "submission cancelled");
            }
            state.draft.clear();
            state.submission = SubmissionState::Idle;
        }
        debug!(session = %self.session.id().short(), "submission settled");
        self.session.touch();
    }
}
