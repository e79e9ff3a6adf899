//! Participant struct definition
//!
//! The room-side handle to one connected session: its identity plus the
//! sender half of that session's outbound frame queue.

use tokio::sync::mpsc;

use crate::error::SendError;
use crate::frame::Frame;
use crate::types::SessionId;

/// Connected participant information
///
/// Delivering a frame here enqueues it on the session's outbound queue;
/// the session's writer task drains the queue in FIFO order.
#[derive(Debug)]
pub struct Participant {
    /// Unique identifier for this session
    pub id: SessionId,
    /// Sender half of the session's outbound frame queue
    pub sender: mpsc::UnboundedSender<Frame>,
}

impl Participant {
    /// Create a new participant with the given ID and outbound sender
    pub fn new(id: SessionId, sender: mpsc::UnboundedSender<Frame>) -> Self {
        Self { id, sender }
    }

    /// Enqueue a frame for this participant
    ///
    /// Returns an error if the session's writer is gone (disconnected).
    /// Never blocks: the outbound queue is unbounded, mirroring the
    /// per-session pending-write deque of the wire protocol design.
    pub fn send(&self, frame: Frame) -> Result<(), SendError> {
        self.sender.send(frame).map_err(|_| SendError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_send() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let participant = Participant::new(SessionId::new(), tx);

        let frame = Frame::new(b"hi".to_vec()).unwrap();
        participant.send(frame.clone()).unwrap();

        assert_eq!(rx.try_recv().unwrap(), frame);
    }

    #[test]
    fn test_participant_send_disconnected() {
        let (tx, rx) = mpsc::unbounded_channel();
        let participant = Participant::new(SessionId::new(), tx);
        drop(rx);

        let frame = Frame::new(b"hi".to_vec()).unwrap();
        assert!(participant.send(frame).is_err());
    }
}
