//! Outbound frame queue
//!
//! Each connection owns one unbounded frame channel plus one writer task
//! running [`run_outbound`]. Enqueueing is a plain channel send, safe from
//! any task or thread; the writer drains the queue one frame at a time, so
//! a connection never has two writes in flight and frames reach the wire
//! whole and in enqueue order.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::frame::Frame;

/// Drain the outbound queue into the socket
///
/// Writes each frame fully before taking the next. Returns `Ok` when the
/// queue's last sender is dropped (orderly teardown), `Err` on the first
/// write failure — at which point the remaining queue is abandoned and the
/// owning connection must be torn down, since a partially written frame
/// leaves the byte stream unusable.
pub async fn run_outbound<W>(
    mut writer: W,
    mut queue: mpsc::UnboundedReceiver<Frame>,
) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = queue.recv().await {
        writer.write_all(&frame.encode()).await?;
        writer.flush().await?;
    }
    Ok(())
}
