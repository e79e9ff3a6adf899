//! Length-Prefixed TCP Chat Library
//!
//! A chat server and client speaking a minimal framed protocol over raw
//! TCP: each message is a 4-byte ASCII decimal length header followed by
//! the body. The server broadcasts every message to all connected
//! participants (the sender included) and replays the last 100 messages
//! to newcomers.
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `ChatServer` is the central actor owning the single shared `Room`
//! - Each connection has a handler task communicating with the actor
//! - Each connection owns an outbound frame queue drained by one writer
//!   task, so frames hit the wire whole and in order
//! - No locks needed - all room state access goes through message passing
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use linechat::{accept_loop, ChatServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
//!     let (cmd_tx, cmd_rx) = mpsc::channel(256);
//!
//!     tokio::spawn(ChatServer::new(cmd_rx).run());
//!     accept_loop(listener, cmd_tx).await;
//! }
//! ```

pub mod client;
pub mod error;
pub mod frame;
pub mod handler;
pub mod outbound;
pub mod participant;
pub mod room;
pub mod server;
pub mod types;

// Re-export main types for convenience
pub use client::run_client;
pub use error::{AppError, FrameError, SendError};
pub use frame::{decode_header, encode_header, Frame, HEADER_LEN, MAX_BODY_LEN};
pub use handler::handle_connection;
pub use outbound::run_outbound;
pub use participant::Participant;
pub use room::{Room, MAX_RECENT_MSGS};
pub use server::{accept_loop, ChatServer, ServerCommand};
pub use types::SessionId;
