use anyhow::{Context, bail};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::{error, info, warn};

use spacewars_client::console::{Command, poll_timer};
use spacewars_client::{ClientConfig, GameClient};

/// Entry point: joins the game, polls for messages and reads commands from stdin
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let level = std::env::var("SPACEWARS_LOG_LEVEL")
        .ok()
        .and_then(|raw| raw.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::DEBUG);
    tracing_subscriber::fmt().with_max_level(level).init();

    let name = std::env::args()
        .nth(1)
        .context("usage: spacewars-client <player name>")?;
    let config = ClientConfig::from_env()?;
    info!("Using game server at {}", config.base_url);

    let client = Arc::new(GameClient::new(config).context("Failed to build HTTP client")?);

    if client.join(&name).await?.is_none() {
        bail!("Could not join the game as {}", name);
    }

    // Drain messages in the background
    let poller = tokio::spawn(poll_messages(Arc::clone(&client)));

    let mut reader = tokio::io::BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                info!("stdin closed");
                break;
            }
            Ok(_) => match Command::parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => handle_command(&client, command).await,
                Ok(None) => {}
                Err(e) => error!("Failed to parse action: {}", e),
            },
            Err(e) => {
                error!("stdin read error: {}", e);
                break;
            }
        }
    }

    poller.abort();
    Ok(())
}

async fn handle_command(client: &GameClient, command: Command) {
    match command {
        Command::Join(name) => match client.join(&name).await {
            Ok(Some(_)) => {}
            Ok(None) => warn!("Server unavailable, still using the previous session"),
            Err(e) => error!("Join failed: {}", e),
        },
        Command::Queue(actions) => client.queue_action_best_effort(&actions).await,
        Command::Clear => client.clear_action_best_effort().await,
        Command::Messages => {
            if let Some(messages) = client.read_and_empty_messages_or_none().await {
                print_messages(&messages);
            }
        }
        Command::Quit => {}
    }
}

async fn poll_messages(client: Arc<GameClient>) {
    let mut interval = poll_timer(client.config().poll_interval);
    loop {
        interval.tick().await;
        if let Some(messages) = client.read_and_empty_messages_or_none().await {
            print_messages(&messages);
        }
    }
}

fn print_messages(messages: &[spacewars_client::GameMessage]) {
    for message in messages {
        match (message.kind(), message.text()) {
            (Some(kind), Some(text)) => info!("[{}] {}", kind, text),
            _ => info!("{}", message.to_json()),
        }
    }
}
