mod chat;
mod config;
mod health;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doctype", about = "doctype.io CLI - chat with your documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a PDF and start a question-and-answer session about it
    Chat {
        /// Path to the PDF document
        file: PathBuf,
    },

    /// Probe the backend and report whether it is reachable
    Health,

    /// Show or set configuration
    Config {
        /// Set the server URL
        #[arg(long)]
        server: Option<String>,

        /// Set the API key
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chat { file } => chat::run_chat(&file).await,
        Commands::Health => health::run_health().await,
        Commands::Config { server, api_key } => {
            if server.is_none() && api_key.is_none() {
                config::show_config()
            } else {
                config::set_config(server, api_key)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
