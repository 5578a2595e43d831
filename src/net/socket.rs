//! WebSocket transport built on `tokio-tungstenite`.
//!
//! Each connection runs as its own task that forwards outgoing text from a
//! channel and reports socket activity back as [`TransportSignal`]s. Closing
//! the [`Connection`] drops the outgoing channel; the task notices, sends a
//! close frame if the socket is open, and exits. Signals emitted after that
//! carry a connection id the session no longer tracks and are ignored there.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::COOKIE;
use tracing::debug;

use super::transport::{Connection, ConnectionId, Transport, TransportEvent, TransportSignal};
use crate::error::TransportError;

/// [`Transport`] that opens real WebSocket connections on the tokio runtime.
pub struct WsTransport {
    signals: mpsc::UnboundedSender<TransportSignal>,
    cookie: Option<String>,
}

impl WsTransport {
    /// `cookie` is a full `Cookie` header value sent with every handshake.
    #[must_use]
    pub fn new(signals: mpsc::UnboundedSender<TransportSignal>, cookie: Option<String>) -> Self {
        Self { signals, cookie }
    }
}

impl Transport for WsTransport {
    fn connect(&mut self, connection: ConnectionId, url: &str) -> Box<dyn Connection> {
        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel::<String>();
        let link = SignalLink { connection, signals: self.signals.clone() };
        tokio::spawn(run_connection(link, url.to_owned(), self.cookie.clone(), outgoing_rx));
        Box::new(WsConnection { outgoing: Some(outgoing_tx) })
    }
}

struct WsConnection {
    outgoing: Option<mpsc::UnboundedSender<String>>,
}

impl Connection for WsConnection {
    fn send(&self, text: String) -> bool {
        self.outgoing.as_ref().is_some_and(|tx| tx.send(text).is_ok())
    }

    fn close(&mut self) {
        self.outgoing = None;
    }
}

struct SignalLink {
    connection: ConnectionId,
    signals: mpsc::UnboundedSender<TransportSignal>,
}

impl SignalLink {
    fn emit(&self, event: TransportEvent) {
        // The widget loop may already be gone during shutdown.
        let _ = self.signals.send(TransportSignal::new(self.connection, event));
    }

    fn fail(&self, error: TransportError) {
        self.emit(TransportEvent::Error(error));
        self.emit(TransportEvent::Closed);
    }
}

async fn run_connection(
    link: SignalLink,
    url: String,
    cookie: Option<String>,
    mut outgoing: mpsc::UnboundedReceiver<String>,
) {
    let mut request = match url.as_str().into_client_request() {
        Ok(request) => request,
        Err(error) => return link.fail(TransportError::Connect(Box::new(error))),
    };
    if let Some(cookie) = cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                request.headers_mut().insert(COOKIE, value);
            }
            Err(error) => {
                let error = tokio_tungstenite::tungstenite::Error::HttpFormat(error.into());
                return link.fail(TransportError::Connect(Box::new(error)));
            }
        }
    }

    let stream = tokio::select! {
        result = connect_async(request) => match result {
            Ok((stream, _)) => stream,
            Err(error) => return link.fail(TransportError::Connect(Box::new(error))),
        },
        // Nothing is sent before the socket opens, so this only fires on close.
        _ = outgoing.recv() => {
            debug!(connection = link.connection, "connection closed before handshake finished");
            return;
        }
    };

    link.emit(TransportEvent::Opened);
    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            outbound = outgoing.recv() => {
                let Some(text) = outbound else {
                    let _ = write.send(Message::Close(None)).await;
                    break;
                };
                if let Err(error) = write.send(Message::Text(text.into())).await {
                    link.emit(TransportEvent::Error(TransportError::Io(Box::new(error))));
                    break;
                }
            }
            inbound = read.next() => match inbound {
                Some(Ok(Message::Text(text))) => link.emit(TransportEvent::Frame(text.as_str().to_owned())),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    link.emit(TransportEvent::Error(TransportError::Io(Box::new(error))));
                    break;
                }
            },
        }
    }

    debug!(connection = link.connection, "connection task finished");
    link.emit(TransportEvent::Closed);
}
