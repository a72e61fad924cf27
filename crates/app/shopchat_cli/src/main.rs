// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::time::Duration;

use clap::Parser;
use cli::{Cli, Commands, EndpointArgs};
use log::warn;
use shopchat_core::render::{RenderOptions, render_message};
use shopchat_core::{ChatConfig, MessageLog, SessionError, WebhookClient, normalize};

mod cli;
mod logging;
mod repl;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Chat {
            endpoint,
            delay_ms,
            strip_emoji,
        } => {
            let mut config = load_config(&endpoint)?;
            if let Some(ms) = delay_ms {
                config = config.with_thinking_delay(Duration::from_millis(ms));
            }
            repl::run(config, RenderOptions { strip_emoji }).await?;
        }
        Commands::Send {
            message,
            endpoint,
            json,
        } => {
            send_once(&load_config(&endpoint)?, &message, json).await?;
        }
    }

    Ok(())
}

/// Environment first, then command-line overrides.
fn load_config(endpoint: &EndpointArgs) -> Result<ChatConfig> {
    let config = ChatConfig::from_env()?;
    match &endpoint.endpoint {
        Some(url) => Ok(config.with_endpoint(url)?),
        None => Ok(config),
    }
}

async fn send_once(config: &ChatConfig, message: &str, json: bool) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        return Err(SessionError::EmptyMessage.into());
    }

    let client = WebhookClient::new(config);
    let reply = normalize(client.send(message).await);

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    if let Some(notice) = reply.error() {
        warn!("Connection Issue: {notice}");
    }
    let mut log = MessageLog::new();
    let entry = log.push_bot(&reply);
    println!("{}", render_message(entry, RenderOptions::default()));
    Ok(())
}
