use reqwest::StatusCode;

/// Why credential acquisition failed before a request could be sent.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("no API key configured")]
    Missing,

    #[error("credential source failed: {0}")]
    Source(String),
}

/// Errors surfaced by the request pipeline.
///
/// The pipeline classifies and rethrows; recovery (phase rollback, error
/// turns) is the caller's job. Nothing here is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Could not obtain a bearer token. No request was sent.
    #[error("authentication failed: {0}")]
    Auth(#[from] CredentialError),

    /// Network failure or timeout while talking to the backend.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
