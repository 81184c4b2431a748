use doctype_api_client::ApiClient;
use doctype_core::{BackendStatus, Transcript, Turn};
use tracing::warn;

use crate::status::StatusSignal;

/// Fixed assistant-side message recorded when an answer request fails.
pub const ANSWER_UNAVAILABLE: &str = "Error: Backend unavailable.";

/// Why a submission was rejected before any turn was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("question is empty")]
    EmptyInput,

    #[error("a question is already in flight")]
    AlreadyInFlight,

    #[error("the session is not ready for questions")]
    NotReady,
}

/// Sole owner of the conversation transcript and turn submission.
///
/// At most one question may be in flight at a time, so the transcript is
/// always a strict User/Assistant alternation.
pub struct ConversationManager {
    client: ApiClient,
    status: StatusSignal,
    transcript: Transcript,
    in_flight: bool,
}

impl ConversationManager {
    pub fn new(client: ApiClient, status: StatusSignal) -> Self {
        Self {
            client,
            status,
            transcript: Transcript::new(),
            in_flight: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Drop the transcript when a new document restarts the workflow.
    pub fn reset(&mut self) {
        self.transcript.reset();
        self.in_flight = false;
    }

    /// Submit one question and record exactly one answering turn.
    ///
    /// The `User` turn is appended before the network round trip. The
    /// `Assistant` turn carries either the backend's answer or
    /// [`ANSWER_UNAVAILABLE`]; a failed pair stays in the transcript, and
    /// resubmitting the same text starts a fresh pair.
    pub async fn submit(&mut self, question: &str) -> Result<&Turn, SubmitError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.in_flight {
            return Err(SubmitError::AlreadyInFlight);
        }

        self.transcript.push_user(question);
        self.in_flight = true;

        let content = match self.client.ask(question).await {
            Ok(resp) => {
                self.status.set(BackendStatus::Online);
                resp.answer
            }
            Err(e) => {
                warn!("answer request failed: {e}");
                self.status.set(BackendStatus::Offline);
                ANSWER_UNAVAILABLE.to_string()
            }
        };

        // Both arms converge here, so the flag clears no matter how the
        // request ended.
        self.in_flight = false;
        Ok(self.transcript.push_assistant(content))
    }
}
