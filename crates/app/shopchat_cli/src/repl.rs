//! Line-oriented chat loop.
//!
//! Input lines are submitted as soon as they are read; replies are printed
//! whenever they resolve, so a slow answer never blocks typing.

use std::io::Write;

use log::{info, warn};
use shopchat_core::render::{RenderOptions, render_message};
use shopchat_core::{ChatConfig, ChatMessage, ChatSession, Resolution, SessionError};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::Result;

const QUIT_COMMAND: &str = "/quit";

pub async fn run(config: ChatConfig, options: RenderOptions) -> Result<()> {
    let mut session = ChatSession::new(&config);
    info!("chatting with {}", config.endpoint_url);

    for message in session.log().iter() {
        print_message(message, options)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let waiting = session.pending() > 0;
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line == QUIT_COMMAND {
                    session.shutdown();
                    return Ok(());
                }
                match session.submit(line) {
                    Ok(_) => {
                        if let Some(entry) = session.log().last() {
                            print_message(entry, options)?;
                        }
                        info!("Bot is typing...");
                    }
                    Err(SessionError::EmptyMessage) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            Some(resolution) = session.next_reply(), if waiting => {
                print_resolution(&resolution, options)?;
            }
        }
    }

    // stdin closed: let outstanding replies land before leaving.
    while let Some(resolution) = session.next_reply().await {
        print_resolution(&resolution, options)?;
    }

    Ok(())
}

fn print_resolution(resolution: &Resolution, options: RenderOptions) -> Result<()> {
    if let Some(notice) = resolution.notice() {
        warn!("Connection Issue: {notice}");
    }
    print_message(&resolution.message, options)
}

fn print_message(message: &ChatMessage, options: RenderOptions) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", render_message(message, options))?;
    stdout.flush()?;
    Ok(())
}
