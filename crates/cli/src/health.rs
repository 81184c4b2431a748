use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use doctype_api_client::{ApiClient, StaticKey};

use crate::config::load_config;

/// One-shot liveness probe against the configured backend.
pub async fn run_health() -> Result<()> {
    let config = load_config()?;
    let url = config.resolved_server_url();

    let client = ApiClient::new(
        &url,
        Duration::from_secs(10),
        Arc::new(StaticKey::new(config.server.api_key.clone())),
    )?;

    match client.probe().await {
        Ok(resp) => {
            if resp.status.is_empty() {
                println!("{url}: Online");
            } else {
                println!("{url}: Online ({})", resp.status);
            }
        }
        Err(e) => {
            println!("{url}: Offline ({e})");
            std::process::exit(1);
        }
    }
    Ok(())
}
