//! WebSocket server and connection handling.
//!
//! Every connection owns one `BoardSession`. Commands for a session are applied
//! while holding its map entry, so they run one at a time.

use crate::protocol::{ClientMessage, ServerMessage};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use hexboard_core::{BoardSession, BoardShape, SessionCommand, SessionEvent};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    /// Board session per connection
    pub sessions: DashMap<Uuid, BoardSession>,
    /// Mapping from connection ID to its message sender
    pub senders: DashMap<Uuid, mpsc::UnboundedSender<ServerMessage>>,
    /// Shape of the first board of each new session
    pub default_shape: BoardShape,
}

impl ServerState {
    pub fn new(default_shape: BoardShape) -> Self {
        Self {
            sessions: DashMap::new(),
            senders: DashMap::new(),
            default_shape,
        }
    }

    /// Send a message to a specific connection.
    pub fn send_to(&self, session_id: Uuid, msg: ServerMessage) {
        if let Some(sender) = self.senders.get(&session_id) {
            let _ = sender.send(msg);
        }
    }

    /// Create the session for a new connection and return its welcome message.
    pub fn open_session(&self, session_id: Uuid) -> ServerMessage {
        let session = BoardSession::new(self.default_shape, None);
        let board = session.board().to_json_friendly();
        self.sessions.insert(session_id, session);
        ServerMessage::Welcome { session_id, board }
    }

    pub fn close_session(&self, session_id: Uuid) {
        self.sessions.remove(&session_id);
        self.senders.remove(&session_id);
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(BoardShape::standard())
    }
}

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Hexboard server listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let session_id = Uuid::new_v4();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.senders.insert(session_id, tx);

    let welcome = state.open_session(session_id);
    let msg_text = serde_json::to_string(&welcome)?;
    ws_sender.send(Message::Text(msg_text)).await?;

    // Spawn task to forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(text) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
        }
    });

    // Handle incoming messages
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => handle_message(session_id, client_msg, &state),
                Err(e) => {
                    warn!("Invalid message from {}: {}", session_id, text);
                    state.send_to(
                        session_id,
                        ServerMessage::Error {
                            message: format!("Invalid message: {}", e),
                        },
                    );
                }
            },
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", session_id);
                break;
            }
            Ok(Message::Ping(_)) => {
                state.send_to(session_id, ServerMessage::Pong);
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", session_id, e);
                break;
            }
            _ => {}
        }
    }

    // Clean up on disconnect
    state.close_session(session_id);
    send_task.abort();

    info!("Connection closed for {}", session_id);
    Ok(())
}

/// Handle a client message.
fn handle_message(session_id: Uuid, msg: ClientMessage, state: &ServerState) {
    match msg {
        ClientMessage::Command { command } => apply_command(session_id, command, state),

        ClientMessage::GetBoard => {
            let board = state
                .sessions
                .get(&session_id)
                .map(|session| session.board().to_json_friendly());
            match board {
                Some(board) => state.send_to(session_id, ServerMessage::Board { board }),
                None => state.send_to(session_id, missing_session()),
            }
        }

        ClientMessage::Ping => {
            state.send_to(session_id, ServerMessage::Pong);
        }
    }
}

fn apply_command(session_id: Uuid, command: SessionCommand, state: &ServerState) {
    let Some(mut session) = state.sessions.get_mut(&session_id) else {
        state.send_to(session_id, missing_session());
        return;
    };

    match session.apply(command) {
        Ok(events) => {
            let snapshot = events
                .iter()
                .any(SessionEvent::changes_board)
                .then(|| session.board().to_json_friendly());

            // Release lock before sending
            drop(session);

            debug!("Session {} produced {} events", session_id, events.len());
            state.send_to(session_id, ServerMessage::Events { events });
            if let Some(board) = snapshot {
                state.send_to(session_id, ServerMessage::Board { board });
            }
        }
        Err(error) => {
            drop(session);
            debug!("Session {} rejected command: {}", session_id, error);
            state.send_to(session_id, ServerMessage::CommandRejected { error });
        }
    }
}

fn missing_session() -> ServerMessage {
    ServerMessage::Error {
        message: "Session not found".to_string(),
    }
}
