//! Client configuration types.
//!
//! The CLI reads/writes `doctype.toml` using these types; the session
//! orchestrator consumes the resolved values. The only environment-driven
//! behaviour is the server URL override.

use serde::{Deserialize, Serialize};

/// Canonical config file name.
pub const CONFIG_FILE_NAME: &str = "doctype.toml";

/// Environment variable overriding `[server] url`.
pub const SERVER_URL_ENV: &str = "DOCTYPE_SERVER_URL";

/// Top-level client configuration (persisted as `doctype.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Hold in `Processing` this long after a confirmed ingest, giving the
    /// backend's asynchronous indexing time to settle.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_health_interval_secs")]
    pub health_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            health_interval_secs: default_health_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ClientConfig {
    /// Resolved server URL: environment override, then config, then default.
    pub fn resolved_server_url(&self) -> String {
        resolve_server_url(
            std::env::var(SERVER_URL_ENV).ok().as_deref(),
            &self.server.url,
        )
    }
}

/// Pure resolution step, split out so it can be tested without touching the
/// process environment.
pub fn resolve_server_url(env_value: Option<&str>, configured: &str) -> String {
    if let Some(url) = env_value {
        if !url.trim().is_empty() {
            return url.trim().to_string();
        }
    }
    if configured.trim().is_empty() {
        default_server_url()
    } else {
        configured.to_string()
    }
}

// ── Serde default functions ─────────────────────────────────────────────

fn default_server_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_settle_delay_ms() -> u64 {
    2_500
}
fn default_health_interval_secs() -> u64 {
    30
}
fn default_request_timeout_secs() -> u64 {
    60
}
fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.server.url, "http://127.0.0.1:8000");
        assert!(cfg.server.api_key.is_empty());
        assert_eq!(cfg.session.settle_delay_ms, 2_500);
        assert_eq!(cfg.session.health_interval_secs, 30);
        assert_eq!(cfg.session.request_timeout_secs, 60);
        assert_eq!(cfg.session.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: ClientConfig = toml::from_str(
            r#"
[server]
api_key = "sk-abc"
"#,
        )
        .expect("parse config");

        assert_eq!(cfg.server.url, "http://127.0.0.1:8000");
        assert_eq!(cfg.server.api_key, "sk-abc");
        assert_eq!(cfg.session.health_interval_secs, 30);
    }

    #[test]
    fn session_settings_deserialize_from_toml() {
        let cfg: ClientConfig = toml::from_str(
            r#"
[session]
settle_delay_ms = 100
health_interval_secs = 5
"#,
        )
        .expect("parse config");

        assert_eq!(cfg.session.settle_delay_ms, 100);
        assert_eq!(cfg.session.health_interval_secs, 5);
        assert_eq!(cfg.session.request_timeout_secs, 60);
    }

    #[test]
    fn env_override_wins_over_configured_url() {
        let resolved = resolve_server_url(Some("http://env:9000"), "http://cfg:8000");
        assert_eq!(resolved, "http://env:9000");
    }

    #[test]
    fn blank_env_and_config_fall_back_to_default() {
        assert_eq!(
            resolve_server_url(Some("  "), ""),
            "http://127.0.0.1:8000"
        );
        assert_eq!(resolve_server_url(None, "http://cfg:8000"), "http://cfg:8000");
    }

    #[test]
    fn config_serializes_round_trip() {
        let cfg = ClientConfig::default();
        let encoded = toml::to_string(&cfg).expect("serialize config");
        let decoded: ClientConfig = toml::from_str(&encoded).expect("reparse config");
        assert_eq!(decoded.server.url, cfg.server.url);
        assert_eq!(decoded.session.settle_delay_ms, cfg.session.settle_delay_ms);
    }
}
