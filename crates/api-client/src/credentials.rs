use async_trait::async_trait;

use crate::error::CredentialError;

/// Source of short-lived bearer tokens.
///
/// The pipeline fetches a token immediately before every authenticated
/// request and never caches one across requests; tokens may expire at any
/// time and a refetch is cheaper than a spurious auth failure mid-session.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn bearer_token(&self) -> Result<String, CredentialError>;
}

/// Provider backed by a fixed API key from configuration.
pub struct StaticKey {
    key: String,
}

impl StaticKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[async_trait]
impl CredentialProvider for StaticKey {
    async fn bearer_token(&self) -> Result<String, CredentialError> {
        let key = self.key.trim();
        if key.is_empty() {
            return Err(CredentialError::Missing);
        }
        Ok(key.to_string())
    }
}
