//! Transport session: the one live connection to the current room.
//!
//! ARCHITECTURE
//! ============
//! `TransportSession` owns at most one [`Session`] and its connection handle.
//! Opening a room always closes the previous connection first, so no two
//! connections are ever live at once. Socket activity arrives as
//! [`TransportSignal`]s through [`TransportSession::handle`], the single
//! dispatch entry point:
//!
//! ```text
//!   Closed ──open──▶ Connecting ──opened──▶ Open
//!      ▲                 │                    │
//!      │               error                error
//!      │                 ▼                    ▼
//!      └────closed──── Erroring ◀─────────────┘
//! ```
//!
//! `close()` returns to Closed from any state. A `closed` signal from the
//! active connection returns to Closed as well.
//!
//! TRADE-OFFS
//! ==========
//! Errors are terminal for the session: no retry, no backoff. Sends while not
//! Open are dropped rather than queued; the viewer re-triggers the room to
//! reconnect.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::{debug, info, warn};

use super::transport::{Connection, ConnectionId, Transport, TransportEvent, TransportSignal};
use super::types::{OutgoingMessage, RoomId, ServerEvent};
use crate::config::Endpoint;
use crate::view::ConversationView;

/// Lifecycle of the session's connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Closed,
    Connecting,
    Open,
    Erroring,
}

/// The room currently bound to the panel.
pub struct Session {
    pub room_id: RoomId,
    pub partner: String,
    pub connection: ConnectionId,
    handle: Option<Box<dyn Connection>>,
}

impl Session {
    /// Whether the connection handle is still held.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.close();
        }
    }
}

pub struct TransportSession<T> {
    transport: T,
    endpoint: Endpoint,
    active: Option<Session>,
    state: ConnectionState,
    next_connection: ConnectionId,
}

impl<T: Transport> TransportSession<T> {
    #[must_use]
    pub fn new(transport: T, endpoint: Endpoint) -> Self {
        Self { transport, endpoint, active: None, state: ConnectionState::Closed, next_connection: 1 }
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    /// Open `room_id`, closing any existing connection first.
    pub fn open(&mut self, room_id: RoomId, partner: String) -> ConnectionId {
        self.close();

        let connection = self.next_connection;
        self.next_connection += 1;
        self.state = ConnectionState::Connecting;

        let url = self.endpoint.room_socket_url(&room_id);
        info!(%room_id, connection, %url, "opening room connection");
        let handle = self.transport.connect(connection, &url);

        self.active = Some(Session { room_id, partner, connection, handle: Some(handle) });
        connection
    }

    /// Send `text` if the connection is open and the trimmed text is non-empty.
    ///
    /// Returns whether a frame was handed to the transport.
    pub fn send(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        if self.state != ConnectionState::Open {
            debug!(state = ?self.state, "dropping message; connection not open");
            return false;
        }
        let Some(handle) = self.active.as_ref().and_then(|s| s.handle.as_ref()) else {
            return false;
        };

        match serde_json::to_string(&OutgoingMessage { message: text }) {
            Ok(json) => handle.send(json),
            Err(error) => {
                warn!(%error, "failed to encode outgoing message");
                false
            }
        }
    }

    /// Close the session. Safe to call when already closed.
    pub fn close(&mut self) {
        if let Some(mut session) = self.active.take() {
            info!(room_id = %session.room_id, connection = session.connection, "closing room connection");
            session.release();
        }
        self.state = ConnectionState::Closed;
    }

    /// Apply one transport signal. Signals from any connection other than
    /// the active one are ignored.
    pub fn handle(&mut self, signal: TransportSignal, view: &mut dyn ConversationView) {
        let Some(session) = self.active.as_mut() else {
            debug!(connection = signal.connection, "ignoring signal with no active session");
            return;
        };
        if session.connection != signal.connection {
            debug!(
                connection = signal.connection,
                active = session.connection,
                "ignoring signal from stale connection"
            );
            return;
        }

        match signal.event {
            TransportEvent::Opened => self.on_open(),
            TransportEvent::Frame(text) => self.on_frame(&text, view),
            TransportEvent::Closed => self.on_close(),
            TransportEvent::Error(error) => {
                warn!(%error, connection = signal.connection, "room connection failed");
                self.on_error(view);
            }
        }
    }

    fn on_open(&mut self) {
        if self.state != ConnectionState::Connecting {
            debug!(state = ?self.state, "open signal outside connecting state");
            return;
        }
        info!("room connection established");
        self.state = ConnectionState::Open;
    }

    fn on_frame(&mut self, text: &str, view: &mut dyn ConversationView) {
        match ServerEvent::parse(text) {
            Ok(ServerEvent::ChatHistory { messages }) => {
                debug!(count = messages.len(), "received chat history");
                view.render_history(&messages);
            }
            Ok(ServerEvent::ChatMessage { message }) => view.append_message(&message),
            Err(error) => warn!(%error, "ignoring undecodable frame"),
        }
    }

    fn on_close(&mut self) {
        info!("room connection closed");
        if let Some(session) = self.active.as_mut() {
            session.release();
        }
        self.state = ConnectionState::Closed;
    }

    fn on_error(&mut self, view: &mut dyn ConversationView) {
        self.state = ConnectionState::Erroring;
        if let Some(session) = self.active.as_mut() {
            session.release();
        }
        view.show_error_state();
    }
}
