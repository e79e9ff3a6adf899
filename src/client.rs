//! Client connection
//!
//! The client-side mirror of a server session, without a room: one read
//! loop printing incoming message bodies, one writer task draining the
//! console input queue to the socket.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::AppError;
use crate::frame::{decode_header, Frame, HEADER_LEN};
use crate::outbound::run_outbound;

/// Run the client connection until either side is done
///
/// `input` carries frames built from console lines; its sender lives on a
/// blocking stdin thread, and the channel send doubles as the thread-safe
/// hand-off into the async runtime. Returns when the server closes the
/// connection, a frame is malformed, or the input channel is exhausted
/// (stdin reached EOF).
pub async fn run_client(
    stream: TcpStream,
    input: mpsc::UnboundedReceiver<Frame>,
) -> Result<(), AppError> {
    let (read_half, write_half) = stream.into_split();

    let write_task = tokio::spawn(async move {
        if let Err(e) = run_outbound(write_half, input).await {
            debug!("Client write loop ended: {}", e);
        }
    });

    let read_task = tokio::spawn(async move {
        if let Err(e) = print_incoming(read_half).await {
            debug!("Client read loop ended: {}", e);
        }
    });

    tokio::select! {
        _ = read_task => {
            debug!("Server connection closed");
        }
        _ = write_task => {
            debug!("Console input finished");
        }
    }

    Ok(())
}

/// Read loop: header, body, print, repeat
///
/// Same two-phase state machine as the server session; the completed body
/// goes to stdout instead of a room. Any read error or bad header ends
/// the connection.
async fn print_incoming(mut reader: OwnedReadHalf) -> Result<(), AppError> {
    let mut stdout = tokio::io::stdout();
    let mut header = [0u8; HEADER_LEN];
    loop {
        reader.read_exact(&mut header).await?;
        let body_len = decode_header(&header)?;

        let mut body = vec![0u8; body_len];
        reader.read_exact(&mut body).await?;

        stdout.write_all(&body).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }
}
