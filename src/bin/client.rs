//! Chat client - Entry Point
//!
//! Connects to the server, reads console lines on a dedicated blocking
//! thread, and prints every broadcast message. The stdin read is the only
//! blocking call in the system, kept off the async runtime.

use std::env;
use std::io::BufRead;

use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use linechat::{run_client, Frame, MAX_BODY_LEN};

/// Default server host
const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
const DEFAULT_PORT: &str = "8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linechat=info")),
        )
        .init();

    let host = env::args().nth(1).unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = env::args().nth(2).unwrap_or_else(|| DEFAULT_PORT.to_string());

    let addr = format!("{}:{}", host, port);
    let stream = TcpStream::connect(&addr).await?;
    info!("Connected to {}", addr);

    // Console lines cross from this thread into the runtime through the
    // outbound channel; the channel send is the wake-up.
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let body = line.into_bytes();
            if body.len() > MAX_BODY_LEN {
                warn!("Line too long ({} bytes), not sent", body.len());
                continue;
            }
            let Ok(frame) = Frame::new(body) else { continue };
            if input_tx.send(frame).is_err() {
                break;
            }
        }
        // Dropping the sender closes the outbound queue and ends the
        // connection once pending frames are flushed.
    });

    run_client(stream, input_rx).await?;

    info!("Disconnected");
    Ok(())
}
