//! Server session handler
//!
//! Runs one accepted connection: joins the room, reads framed messages
//! from the socket, and drains the session's outbound queue back to it.
//!
//! The read side is a two-phase state machine, header then body, repeated
//! until the first malformed header or IO error — either one is fatal to
//! the session, never to the room.

use tokio::io::AsyncReadExt;
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::frame::{decode_header, Frame, HEADER_LEN};
use crate::outbound::run_outbound;
use crate::server::ServerCommand;
use crate::types::SessionId;

/// Handle one accepted connection for its whole lifetime
///
/// Joins the room before the first read, so the session's outbound queue
/// receives the history replay ahead of anything broadcast later. Leaves
/// the room on the way out; that drops the room's sender handle, which in
/// turn ends the writer task and closes the socket.
pub async fn handle_connection(
    stream: TcpStream,
    cmd_tx: mpsc::Sender<ServerCommand>,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let session_id = SessionId::new();
    info!("Session {} started for {}", session_id, peer_addr);

    let (read_half, write_half) = stream.into_split();

    // Outbound queue: room -> writer task -> socket
    let (frame_tx, frame_rx) = mpsc::unbounded_channel::<Frame>();

    // Join before the first read so the history replay is never missed
    if cmd_tx
        .send(ServerCommand::Join {
            session_id,
            sender: frame_tx,
        })
        .await
        .is_err()
    {
        warn!("Failed to join session {} - server closed", session_id);
        return Err(AppError::ChannelSend);
    }

    let cmd_tx_read = cmd_tx.clone();
    let read_task = tokio::spawn(async move {
        if let Err(e) = read_frames(read_half, session_id, cmd_tx_read).await {
            debug!("Session {} read loop ended: {}", session_id, e);
        }
    });

    let write_task = tokio::spawn(async move {
        if let Err(e) = run_outbound(write_half, frame_rx).await {
            debug!("Session write loop ended: {}", e);
        }
    });

    // Either side failing makes the connection unusable
    tokio::select! {
        _ = read_task => {
            debug!("Read task completed for {}", session_id);
        }
        _ = write_task => {
            debug!("Write task completed for {}", session_id);
        }
    }

    let _ = cmd_tx.send(ServerCommand::Leave { session_id }).await;

    info!("Session {} closed", session_id);

    Ok(())
}

/// Read loop: header, body, deliver, repeat
///
/// Returns on the first short read, IO error, or malformed header. There
/// is no recovery path — a failed or desynced read means the rest of the
/// stream cannot be framed.
async fn read_frames(
    mut reader: OwnedReadHalf,
    session_id: SessionId,
    cmd_tx: mpsc::Sender<ServerCommand>,
) -> Result<(), AppError> {
    let mut header = [0u8; HEADER_LEN];
    loop {
        reader.read_exact(&mut header).await?;
        let body_len = decode_header(&header)?;

        let mut body = vec![0u8; body_len];
        reader.read_exact(&mut body).await?;

        // Length already validated by the header decode
        let frame = Frame::new(body)?;
        if cmd_tx
            .send(ServerCommand::Deliver {
                from: session_id,
                frame,
            })
            .await
            .is_err()
        {
            debug!("Server closed, ending read loop for {}", session_id);
            return Err(AppError::ChannelSend);
        }
    }
}
