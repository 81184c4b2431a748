//! Shared API types for the Doctype backend.
//!
//! This crate is the single source of truth for every request/response shape
//! the client exchanges with the service.

use serde::{Deserialize, Serialize};

// ─── Liveness ────────────────────────────────────────────────────────────────

/// `GET /` response body.
///
/// Any 2xx counts as alive; the body text is informational only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}

// ─── Documents ───────────────────────────────────────────────────────────────

/// `POST /ingest` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub filename: String,
    pub chunks_processed: u32,
    pub status: String,
}

// ─── Chat ────────────────────────────────────────────────────────────────────

/// `POST /chat` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// `POST /chat` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    /// Source snippets backing the answer. Optional on the wire.
    #[serde(default)]
    pub sources: Vec<String>,
}
