//! Error types for the chat system
//!
//! Defines frame-level, application-level, and message send errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Frame decoding/construction errors
///
/// Any frame error is fatal to the connection that produced it: once a
/// byte stream desyncs mid-frame it cannot be resynchronized.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Header bytes did not parse as a non-negative decimal integer
    #[error("invalid frame header")]
    InvalidHeader,

    /// Body length exceeds the protocol maximum
    #[error("frame body too large: {length} bytes")]
    BodyTooLarge { length: usize },
}

/// Application-level errors
///
/// All variants are fatal to the connection they occur on; none propagate
/// to the room or the accept loop.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error (connection reset, broken pipe, read/write failure)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed frame received from the peer
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    /// Channel send error (internal channel broken)
    #[error("Channel send error")]
    ChannelSend,
}

/// Message send errors
///
/// Occurs when delivering to a participant whose connection is gone.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,
}
