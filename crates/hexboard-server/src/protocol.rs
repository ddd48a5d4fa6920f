//! WebSocket protocol messages for the board service.

use hexboard_core::{BoardJson, SessionCommand, SessionError, SessionEvent};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Apply a command to this connection's board session
    Command { command: SessionCommand },

    /// Request a fresh board snapshot
    GetBoard,

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Sent once on connect with the session's first board
    Welcome { session_id: Uuid, board: BoardJson },

    /// What a command changed
    Events { events: Vec<SessionEvent> },

    /// Current board state
    Board { board: BoardJson },

    /// A command was refused; the session is unchanged
    CommandRejected { error: SessionError },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}
