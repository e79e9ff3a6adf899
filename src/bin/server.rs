//! Chat server - Entry Point
//!
//! Starts one TCP listener per requested port and the ChatServer actor.
//! All listeners share the single room.

use std::env;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use linechat::{accept_loop, ChatServer};

/// Default listening port
const DEFAULT_PORT: &str = "8080";

/// Channel buffer size for server commands
const CHANNEL_BUFFER_SIZE: usize = 256;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=linechat=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linechat=info")),
        )
        .init();

    // Listening ports from the command line, default 8080
    let mut ports: Vec<String> = env::args().skip(1).collect();
    if ports.is_empty() {
        ports.push(DEFAULT_PORT.to_string());
    }

    // Create ChatServer actor channel and start
    let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    let server = ChatServer::new(cmd_rx);
    tokio::spawn(server.run());

    info!("ChatServer actor started");

    // One accept loop per port, all bound to the same room
    let mut loops = Vec::new();
    for port in &ports {
        let addr = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&addr).await?;
        info!("Chat server listening on {}", addr);
        loops.push(tokio::spawn(accept_loop(listener, cmd_tx.clone())));
    }
    drop(cmd_tx);

    for handle in loops {
        handle.await?;
    }

    Ok(())
}
