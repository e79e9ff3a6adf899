//! Room struct definition
//!
//! The single broadcast domain of the server: the set of joined
//! participants plus a bounded ring of recently delivered messages that is
//! replayed to newcomers.
//!
//! The Room itself is plain state with no interior locking. All mutation
//! happens on the `ChatServer` actor task, which serializes join, leave,
//! and deliver.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, info};

use crate::frame::Frame;
use crate::participant::Participant;
use crate::types::SessionId;

/// Number of recent messages replayed to a joining participant.
pub const MAX_RECENT_MSGS: usize = 100;

/// The shared chat room
///
/// One instance lives for the lifetime of the server process; every
/// accepted connection joins it.
#[derive(Debug, Default)]
pub struct Room {
    /// Currently joined participants: SessionId -> Participant
    participants: HashMap<SessionId, Participant>,
    /// The last `MAX_RECENT_MSGS` delivered messages, oldest first
    recent_msgs: VecDeque<Frame>,
}

impl Room {
    /// Create an empty room
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently joined participants
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Add a participant and replay the recent history to it
    ///
    /// The replay is enqueued here, synchronously, so the newcomer's
    /// outbound queue holds the full history in chronological order before
    /// any later deliver can append to it.
    pub fn join(&mut self, participant: Participant) {
        info!("Session {} joined the room", participant.id);

        for msg in &self.recent_msgs {
            // A participant that dies during replay is cleaned up by the
            // next deliver; ignore the send result here.
            let _ = participant.send(msg.clone());
        }

        self.participants.insert(participant.id, participant);
        debug!("Participants: {}", self.participants.len());
    }

    /// Remove a participant; no-op if it already left
    pub fn leave(&mut self, session_id: SessionId) {
        if self.participants.remove(&session_id).is_some() {
            info!("Session {} left the room", session_id);
            debug!("Participants: {}", self.participants.len());
        }
    }

    /// Record a message and broadcast it to every joined participant
    ///
    /// The sender is not excluded: it receives its own message back, which
    /// doubles as a delivery confirmation on the client console. A
    /// participant whose outbound queue is gone is dropped from the room;
    /// it never blocks or aborts delivery to the rest.
    pub fn deliver(&mut self, from: SessionId, frame: Frame) {
        info!(
            "Broadcast from {}: [{}]",
            from,
            String::from_utf8_lossy(frame.body())
        );

        self.recent_msgs.push_back(frame.clone());
        while self.recent_msgs.len() > MAX_RECENT_MSGS {
            self.recent_msgs.pop_front();
        }

        let mut dead = Vec::new();
        for participant in self.participants.values() {
            if participant.send(frame.clone()).is_err() {
                dead.push(participant.id);
            }
        }

        for session_id in dead {
            debug!("Dropping dead session {}", session_id);
            self.participants.remove(&session_id);
        }
    }
}
