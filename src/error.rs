//! Error types for configuration, room resolution, and the live transport.
//!
//! ERROR HANDLING
//! ==============
//! None of these escape the widget event loop. Resolution and transport
//! failures are logged with their source and then turned into the error
//! placeholder in the conversation view. An empty "latest room" result is not
//! an error at all and is modelled as `Ok(None)` by the resolver.

/// Invalid widget configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The base URL is not an `http://` or `https://` URL with a host.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Failure to obtain a room from the room service.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The room service answered with a non-success status.
    #[error("room service returned HTTP {0}")]
    UnexpectedStatus(u16),

    /// The response body was not the expected room JSON.
    #[error("invalid room response: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The configured session cookie cannot be sent as a header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Connection-level failure on the live room socket.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The handshake request could not be built or the connect failed.
    #[error("websocket connect failed: {0}")]
    Connect(Box<tokio_tungstenite::tungstenite::Error>),

    /// Reading from or writing to an open socket failed.
    #[error("websocket io failed: {0}")]
    Io(Box<tokio_tungstenite::tungstenite::Error>),
}
