use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart;
use serde::de::DeserializeOwned;
use tracing::debug;

use doctype_api_types::{ChatResponse, HealthResponse, IngestResponse};

use crate::credentials::CredentialProvider;
use crate::error::{ApiError, Result};

/// Outbound request body.
///
/// The wire encoding is chosen by payload shape alone: binary payloads
/// travel as a multipart form, everything else as a JSON body.
enum Payload {
    File {
        field: &'static str,
        filename: String,
        bytes: Vec<u8>,
    },
    Json(serde_json::Value),
}

/// Typed HTTP client for the Doctype API.
///
/// Every authenticated method fetches a fresh bearer token, sends exactly
/// one request, and normalizes the outcome into [`ApiError`]. The client
/// never retries and never touches session or transcript state; callers
/// decide what a failure means.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Create a new client with the given base URL and request timeout.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── Liveness ──────────────────────────────────────────────────────────

    /// Unauthenticated, side-effect-free probe of the backend root.
    pub async fn probe(&self) -> Result<HealthResponse> {
        let resp = self.client.get(self.url("/")).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        // Any 2xx counts as alive regardless of body shape.
        Ok(resp.json().await.unwrap_or_default())
    }

    // ── Documents ─────────────────────────────────────────────────────────

    /// Submit a document for ingestion.
    pub async fn ingest(&self, filename: &str, bytes: Vec<u8>) -> Result<IngestResponse> {
        let resp = self
            .post_authenticated(
                "/ingest",
                Payload::File {
                    field: "file",
                    filename: filename.to_string(),
                    bytes,
                },
            )
            .await?;
        parse_response(resp).await
    }

    // ── Chat ──────────────────────────────────────────────────────────────

    /// Ask a question about the ingested document.
    pub async fn ask(&self, question: &str) -> Result<ChatResponse> {
        let resp = self
            .post_authenticated("/chat", Payload::Json(serde_json::json!({ "question": question })))
            .await?;
        parse_response(resp).await
    }

    /// Produce exactly one outbound POST with a freshly fetched credential.
    async fn post_authenticated(&self, path: &str, payload: Payload) -> Result<reqwest::Response> {
        let token = self.credentials.bearer_token().await?;
        debug!("POST {path}");

        let req = self.client.post(self.url(path)).bearer_auth(token);
        let req = match payload {
            Payload::File {
                field,
                filename,
                bytes,
            } => {
                let part = multipart::Part::bytes(bytes).file_name(filename);
                req.multipart(multipart::Form::new().part(field, part))
            }
            Payload::Json(body) => req.json(&body),
        };

        Ok(req.send().await?)
    }
}

/// Parse an HTTP response: the deserialized body on 2xx, or an error carrying
/// the status and body text.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }
    Ok(resp.json().await?)
}
