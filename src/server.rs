//! ChatServer Actor implementation
//!
//! The central actor that owns the shared Room. Uses the Actor pattern
//! with mpsc channels for message passing: session handlers send commands,
//! the actor applies them one at a time, so Room state needs no locks.
//!
//! Also home to the accept loop, which binds each incoming connection to
//! the actor's command channel.

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::frame::Frame;
use crate::handler::handle_connection;
use crate::participant::Participant;
use crate::room::Room;
use crate::types::SessionId;

/// Commands sent from session handlers to the ChatServer actor
#[derive(Debug)]
pub enum ServerCommand {
    /// New session connected; `sender` feeds its outbound queue
    Join {
        session_id: SessionId,
        sender: mpsc::UnboundedSender<Frame>,
    },
    /// Session disconnected
    Leave { session_id: SessionId },
    /// Session received a complete frame from its peer
    Deliver { from: SessionId, frame: Frame },
}

/// The main ChatServer actor
///
/// Owns the single Room and processes commands from session handlers.
pub struct ChatServer {
    room: Room,
    receiver: mpsc::Receiver<ServerCommand>,
}

impl ChatServer {
    /// Create a new ChatServer with the given command receiver
    pub fn new(receiver: mpsc::Receiver<ServerCommand>) -> Self {
        Self {
            room: Room::new(),
            receiver,
        }
    }

    /// Run the ChatServer event loop
    ///
    /// Continuously receives and processes commands until all senders are
    /// dropped.
    pub async fn run(mut self) {
        info!("ChatServer started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd);
        }

        info!("ChatServer shutting down");
    }

    /// Process a single command
    fn handle_command(&mut self, cmd: ServerCommand) {
        match cmd {
            ServerCommand::Join { session_id, sender } => {
                self.room.join(Participant::new(session_id, sender));
            }
            ServerCommand::Leave { session_id } => {
                self.room.leave(session_id);
            }
            ServerCommand::Deliver { from, frame } => {
                self.room.deliver(from, frame);
            }
        }
    }
}

/// Accept connections forever, one session handler per connection
///
/// A failed accept is logged and accepting continues; it never stops the
/// server. Several listeners may run this loop concurrently with clones of
/// the same `cmd_tx`, all feeding the one shared room.
pub async fn accept_loop(listener: TcpListener, cmd_tx: mpsc::Sender<ServerCommand>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("New connection from {}", addr);
                let cmd_tx = cmd_tx.clone();

                // Spawn handler task for each connection
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, cmd_tx).await {
                        error!("Connection handler error: {}", e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
