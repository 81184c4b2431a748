use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::Input;

use doctype_api_client::{ApiClient, StaticKey};
use doctype_session::{HealthMonitor, SessionController, StatusSignal, SubmitError};

use crate::config::load_config;

/// Upload a document and run the interactive question loop.
pub async fn run_chat(file: &Path) -> Result<()> {
    let config = load_config()?;
    let url = config.resolved_server_url();

    let credentials = Arc::new(StaticKey::new(config.server.api_key.clone()));
    let client = ApiClient::new(
        &url,
        Duration::from_secs(config.session.request_timeout_secs),
        credentials,
    )?;

    let status = StatusSignal::new();
    let monitor = HealthMonitor::spawn(
        client.clone(),
        status.clone(),
        Duration::from_secs(config.session.health_interval_secs),
    );
    let mut controller = SessionController::new(
        client,
        status,
        Duration::from_millis(config.session.settle_delay_ms),
        config.session.max_upload_bytes,
    );

    let filename = file
        .file_name()
        .and_then(|name| name.to_str())
        .context("Invalid file name")?;
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    println!("Uploading {filename} to {url}...");
    controller.upload(filename, bytes).await?;

    let doc = controller.document().context("document handle missing")?;
    println!(
        "Processed {} into {} chunks. Ask away (type 'exit' to quit).",
        doc.filename, doc.chunks
    );

    loop {
        let prompt = format!("[{}] you", controller.backend_status());
        let line: String = match Input::new().with_prompt(prompt).interact_text() {
            Ok(line) => line,
            // EOF (ctrl-d) ends the session like an explicit exit.
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }

        match controller.ask(&line).await {
            Ok(turn) => println!("assistant: {}", turn.content),
            Err(SubmitError::EmptyInput) => continue,
            Err(e) => eprintln!("{e}"),
        }
    }

    monitor.shutdown().await;
    Ok(())
}
