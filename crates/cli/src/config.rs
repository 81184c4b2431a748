use anyhow::{Context, Result};
use doctype_runtime_config::{CONFIG_FILE_NAME, ClientConfig};
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/doctype/)
pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("doctype"))
}

/// Canonical config file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

fn load_config_from(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config at {}", path.display()))
}

fn save_config_to(path: &Path, config: &ClientConfig) -> Result<()> {
    let dir = path.parent().context("config path has no parent")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create config dir at {}", dir.display()))?;
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config at {}", path.display()))?;
    Ok(())
}

/// Load config from disk, returning defaults if not found.
pub fn load_config() -> Result<ClientConfig> {
    load_config_from(&config_path()?)
}

/// Save config to disk (in `doctype.toml`).
pub fn save_config(config: &ClientConfig) -> Result<()> {
    save_config_to(&config_path()?, config)
}

/// Print current config.
pub fn show_config() -> Result<()> {
    let config = load_config()?;
    let path = config_path()?;
    println!("Config file: {}", path.display());
    println!();
    println!("[server]");
    println!("  url     = {}", config.resolved_server_url());
    println!(
        "  api_key = {}",
        if config.server.api_key.is_empty() {
            "(not set)".to_string()
        } else {
            format!(
                "{}...",
                &config.server.api_key[..8.min(config.server.api_key.len())]
            )
        }
    );
    println!();
    println!("[session]");
    println!("  settle_delay_ms      = {}", config.session.settle_delay_ms);
    println!("  health_interval_secs = {}", config.session.health_interval_secs);
    Ok(())
}

/// Update config with provided values.
pub fn set_config(server_url: Option<String>, api_key: Option<String>) -> Result<()> {
    let mut config = load_config()?;

    if let Some(url) = server_url {
        config.server.url = url;
    }
    if let Some(key) = api_key {
        config.server.api_key = key;
    }

    save_config(&config)?;
    println!("Configuration updated.");
    show_config()?;
    Ok(())
}
