//! HTTP contract tests for the request pipeline, run against a mock backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use doctype_api_client::{ApiClient, ApiError, CredentialError, CredentialProvider, StaticKey};
use doctype_api_types::ChatRequest;

fn client_with(server: &MockServer, credentials: Arc<dyn CredentialProvider>) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5), credentials)
        .expect("client construction")
}

fn client(server: &MockServer, key: &str) -> ApiClient {
    client_with(server, Arc::new(StaticKey::new(key)))
}

/// Matches a multipart form body containing the given byte sequence.
struct MultipartContaining(&'static [u8]);

impl Match for MultipartContaining {
    fn matches(&self, request: &Request) -> bool {
        let content_type = request
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        content_type.starts_with("multipart/form-data")
            && request
                .body
                .windows(self.0.len())
                .any(|window| window == self.0)
    }
}

/// Matches requests that carry no Authorization header at all.
struct NoAuthHeader;

impl Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

struct CountingProvider {
    calls: AtomicU64,
}

#[async_trait]
impl CredentialProvider for CountingProvider {
    async fn bearer_token(&self) -> Result<String, CredentialError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("token-{n}"))
    }
}

struct FailingProvider;

#[async_trait]
impl CredentialProvider for FailingProvider {
    async fn bearer_token(&self) -> Result<String, CredentialError> {
        Err(CredentialError::Source("token endpoint unreachable".into()))
    }
}

// ── Chat ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ask_sends_bearer_token_and_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_json(ChatRequest {
            question: "What is the total?".into(),
        }))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "answer": "$42",
            "sources": ["page 3"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server, "sk-test")
        .ask("What is the total?")
        .await
        .expect("answer");
    assert_eq!(resp.answer, "$42");
    assert_eq!(resp.sources, vec!["page 3".to_string()]);
}

#[tokio::test]
async fn each_request_fetches_a_fresh_token() {
    let server = MockServer::start().await;

    for token in ["token-1", "token-2"] {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("authorization", format!("Bearer {token}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "answer": "ok" })),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let api = client_with(
        &server,
        Arc::new(CountingProvider {
            calls: AtomicU64::new(0),
        }),
    );
    api.ask("first").await.expect("first answer");
    api.ask("second").await.expect("second answer");
}

#[tokio::test]
async fn non_success_status_is_classified_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client(&server, "sk-test")
        .ask("anything")
        .await
        .expect_err("must fail");
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn credential_failure_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "answer": "unused" })),
        )
        .expect(0)
        .mount(&server)
        .await;

    let err = client_with(&server, Arc::new(FailingProvider))
        .ask("anything")
        .await
        .expect_err("must fail");
    assert!(err.is_auth());
}

// ── Ingest ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ingest_sends_a_multipart_file_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .and(header("authorization", "Bearer sk-test"))
        .and(MultipartContaining(b"%PDF-1.4 fake body"))
        .and(MultipartContaining(b"filename=\"report.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "filename": "report.pdf",
            "chunks_processed": 18,
            "status": "Successfully embedded"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server, "sk-test")
        .ingest("report.pdf", b"%PDF-1.4 fake body".to_vec())
        .await
        .expect("ingest");
    assert_eq!(resp.filename, "report.pdf");
    assert_eq!(resp.chunks_processed, 18);
}

// ── Liveness ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn probe_is_unauthenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "Doctype.io is running"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server, "sk-test").probe().await.expect("probe");
    assert_eq!(resp.status, "Doctype.io is running");
}

#[tokio::test]
async fn probe_accepts_any_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let resp = client(&server, "sk-test").probe().await.expect("probe");
    assert!(resp.status.is_empty());
}

#[tokio::test]
async fn probe_reports_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server, "sk-test").probe().await.expect_err("down");
    assert!(matches!(err, ApiError::Status { .. }));
}
