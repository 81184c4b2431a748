use serde::{Deserialize, Serialize};

/// Stage of the document workflow.
///
/// Exactly one phase is active at a time. The phase only advances forward on
/// success and only returns to [`Phase::Upload`] when ingestion fails or a
/// new upload restarts the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Upload,
    Processing,
    Conversation,
}

/// Opaque reference to a successfully ingested document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHandle {
    /// Filename as acknowledged by the backend.
    pub filename: String,
    /// Number of chunks the backend reported embedding.
    pub chunks: u32,
}

/// Token identifying one upload attempt.
///
/// Async resumptions (ingest completion, settle-delay expiry) hand it back
/// so that an attempt superseded by a newer upload cannot write into the
/// fresh session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadGeneration(u64);

/// Sole owner of the workflow phase and the document handle.
#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    document: Option<DocumentHandle>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn document(&self) -> Option<&DocumentHandle> {
        self.document.as_ref()
    }

    /// Start a new upload attempt: enter `Processing` immediately, before any
    /// network result is known, and drop state from any prior document.
    pub fn begin_upload(&mut self) -> UploadGeneration {
        self.generation += 1;
        self.phase = Phase::Processing;
        self.document = None;
        UploadGeneration(self.generation)
    }

    fn is_current(&self, generation: UploadGeneration) -> bool {
        generation.0 == self.generation
    }

    /// Commit a confirmed ingestion and enter `Conversation`.
    ///
    /// Returns false and leaves the session untouched when the attempt has
    /// been superseded by a newer upload.
    pub fn complete_ingest(&mut self, generation: UploadGeneration, handle: DocumentHandle) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.phase = Phase::Conversation;
        self.document = Some(handle);
        true
    }

    /// Roll a failed ingestion back to `Upload` with the handle cleared.
    ///
    /// Returns false when the attempt has been superseded.
    pub fn fail_ingest(&mut self, generation: UploadGeneration) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.phase = Phase::Upload;
        self.document = None;
        true
    }
}
