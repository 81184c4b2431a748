use std::time::Duration;

use doctype_api_client::{ApiClient, ApiError};
use doctype_core::{BackendStatus, DocumentHandle, Phase, Session, Transcript, Turn};
use tracing::{debug, info};

use crate::conversation::{ConversationManager, SubmitError};
use crate::status::StatusSignal;

/// Why an upload was rejected locally or failed at the backend.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("only .pdf documents are supported")]
    UnsupportedType,

    #[error("document is {size} bytes; the limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("ingestion failed: {0}")]
    Ingest(#[from] ApiError),
}

/// Drives the document workflow.
///
/// Phase advances to `Processing` the moment an upload is accepted, before
/// any network result. A confirmed ingest enters `Conversation` once the
/// settle delay has elapsed; a failed ingest rolls back to `Upload` and the
/// error is surfaced exactly once, with no automatic retry.
pub struct SessionController {
    client: ApiClient,
    status: StatusSignal,
    session: Session,
    conversation: ConversationManager,
    settle_delay: Duration,
    max_upload_bytes: u64,
}

impl SessionController {
    pub fn new(
        client: ApiClient,
        status: StatusSignal,
        settle_delay: Duration,
        max_upload_bytes: u64,
    ) -> Self {
        let conversation = ConversationManager::new(client.clone(), status.clone());
        Self {
            client,
            status,
            session: Session::new(),
            conversation,
            settle_delay,
            max_upload_bytes,
        }
    }

    // ── Read-only snapshot ────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn document(&self) -> Option<&DocumentHandle> {
        self.session.document()
    }

    pub fn transcript(&self) -> &Transcript {
        self.conversation.transcript()
    }

    pub fn backend_status(&self) -> BackendStatus {
        self.status.get()
    }

    // ── Workflow ──────────────────────────────────────────────────────────

    /// Upload a document and drive it through ingestion.
    ///
    /// Local validation failures reject the file without leaving `Upload`.
    /// Otherwise the prior document and transcript are discarded and the
    /// workflow restarts at `Processing`.
    pub async fn upload(&mut self, filename: &str, bytes: Vec<u8>) -> Result<(), UploadError> {
        if !filename.to_ascii_lowercase().ends_with(".pdf") {
            return Err(UploadError::UnsupportedType);
        }
        let size = bytes.len() as u64;
        if size > self.max_upload_bytes {
            return Err(UploadError::TooLarge {
                size,
                limit: self.max_upload_bytes,
            });
        }

        let generation = self.session.begin_upload();
        self.conversation.reset();
        info!("ingesting {filename} ({size} bytes)");

        match self.client.ingest(filename, bytes).await {
            Ok(resp) => {
                self.status.set(BackendStatus::Online);
                // The backend indexes asynchronously after acknowledging the
                // upload; hold in `Processing` until it has settled.
                tokio::time::sleep(self.settle_delay).await;
                let handle = DocumentHandle {
                    filename: resp.filename,
                    chunks: resp.chunks_processed,
                };
                if !self.session.complete_ingest(generation, handle) {
                    debug!("ingest completed for a superseded upload; dropped");
                }
                Ok(())
            }
            Err(e) => {
                self.status.set(BackendStatus::Offline);
                self.session.fail_ingest(generation);
                Err(UploadError::Ingest(e))
            }
        }
    }

    /// Ask a question about the ingested document.
    ///
    /// Rejected until the session has reached `Conversation`, so a question
    /// can never race the settle delay.
    pub async fn ask(&mut self, question: &str) -> Result<&Turn, SubmitError> {
        if self.session.phase() != Phase::Conversation {
            return Err(SubmitError::NotReady);
        }
        self.conversation.submit(question).await
    }
}
