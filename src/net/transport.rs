//! Transport seam between the session state machine and a live socket.
//!
//! DESIGN
//! ======
//! `Transport::connect` is non-blocking: it hands back a [`Connection`] at
//! once and reports progress later as [`TransportSignal`]s on the widget's
//! event loop. Every signal names the connection it came from so the session
//! can drop signals from sockets it has already torn down.

use crate::error::TransportError;

/// Identifier of one connection attempt; never reused within a process.
pub type ConnectionId = u64;

/// What happened on a connection.
#[derive(Debug)]
pub enum TransportEvent {
    Opened,
    /// A text frame from the server, undecoded.
    Frame(String),
    Closed,
    Error(TransportError),
}

/// A [`TransportEvent`] tagged with its connection.
#[derive(Debug)]
pub struct TransportSignal {
    pub connection: ConnectionId,
    pub event: TransportEvent,
}

impl TransportSignal {
    #[must_use]
    pub fn new(connection: ConnectionId, event: TransportEvent) -> Self {
        Self { connection, event }
    }
}

/// Handle to a single live (or pending) connection.
pub trait Connection: Send {
    /// Queue a text frame. Returns `false` if the connection is gone.
    fn send(&self, text: String) -> bool;

    /// Start closing. Must be safe to call more than once.
    fn close(&mut self);
}

/// Factory for room connections.
pub trait Transport: Send {
    /// Begin connecting to `url`, reporting events as `connection`.
    fn connect(&mut self, connection: ConnectionId, url: &str) -> Box<dyn Connection>;
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Shared log of what a [`FakeTransport`] was asked to do.
    #[derive(Debug, Default)]
    pub struct TransportLog {
        /// `(connection, url)` per connect call, in order.
        pub connects: Vec<(ConnectionId, String)>,
        /// Connection ids in the order they were closed.
        pub closes: Vec<ConnectionId>,
        /// `(connection, frame)` per successful send.
        pub sent: Vec<(ConnectionId, String)>,
        /// Highest number of simultaneously live connections observed.
        pub max_live: usize,
        live: usize,
    }

    impl TransportLog {
        #[must_use]
        pub fn live(&self) -> usize {
            self.live
        }
    }

    /// In-memory transport that records calls instead of opening sockets.
    #[derive(Clone, Default)]
    pub struct FakeTransport {
        pub log: Arc<Mutex<TransportLog>>,
    }

    impl FakeTransport {
        pub fn snapshot<R>(&self, f: impl FnOnce(&TransportLog) -> R) -> R {
            f(&self.log.lock().expect("transport log should lock"))
        }
    }

    impl Transport for FakeTransport {
        fn connect(&mut self, connection: ConnectionId, url: &str) -> Box<dyn Connection> {
            let mut log = self.log.lock().expect("transport log should lock");
            log.connects.push((connection, url.to_owned()));
            log.live += 1;
            log.max_live = log.max_live.max(log.live);
            Box::new(FakeConnection { id: connection, log: self.log.clone(), closed: false })
        }
    }

    struct FakeConnection {
        id: ConnectionId,
        log: Arc<Mutex<TransportLog>>,
        closed: bool,
    }

    impl Connection for FakeConnection {
        fn send(&self, text: String) -> bool {
            if self.closed {
                return false;
            }
            self.log.lock().expect("transport log should lock").sent.push((self.id, text));
            true
        }

        fn close(&mut self) {
            if self.closed {
                return;
            }
            self.closed = true;
            let mut log = self.log.lock().expect("transport log should lock");
            log.closes.push(self.id);
            log.live -= 1;
        }
    }
}
