//! Widget configuration: where the room service lives and who is viewing.
//!
//! DESIGN
//! ======
//! The page the widget is embedded in decides the socket scheme: an `https`
//! base URL yields `wss` room sockets, `http` yields `ws`. `Endpoint` keeps
//! both forms so the resolver and the transport never re-derive them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;
use crate::net::types::{RoomId, UserId};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Path template for the room socket; `{room_id}` is substituted.
pub const ROOM_SOCKET_PATH: &str = "/ws/chat/{room_id}/";

/// Validated base address of the chat service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    secure: bool,
    authority: String,
}

impl Endpoint {
    /// Parse a base URL such as `https://example.com` or `http://127.0.0.1:8000/`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for any other scheme, an empty
    /// host, or a base URL carrying a path, query, or fragment.
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let (secure, rest) = if let Some(rest) = trimmed.strip_prefix("https://") {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix("http://") {
            (false, rest)
        } else {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_owned()));
        };

        if rest.is_empty() || rest.contains(['/', '?', '#']) {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_owned()));
        }

        Ok(Self { secure, authority: rest.to_owned() })
    }

    /// Whether the page was loaded over TLS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Absolute HTTP URL for a service path beginning with `/`.
    #[must_use]
    pub fn http_url(&self, path: &str) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}{path}", self.authority)
    }

    /// Streaming endpoint for one room.
    #[must_use]
    pub fn room_socket_url(&self, room_id: &RoomId) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        let path = ROOM_SOCKET_PATH.replace("{room_id}", &urlencoding::encode(room_id.as_str()));
        format!("{scheme}://{}{path}", self.authority)
    }
}

/// Everything the widget needs at startup.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub endpoint: Endpoint,
    /// Identity of the viewer. `None` leaves the widget inert.
    pub current_user: Option<UserId>,
    /// Value of the service's `sessionid` cookie, forwarded on HTTP and WS requests.
    pub session_cookie: Option<String>,
}

impl WidgetConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `base_url` is not a valid service address.
    pub fn new(base_url: &str, current_user: Option<&str>) -> Result<Self, ConfigError> {
        let current_user = current_user
            .map(str::trim)
            .filter(|user| !user.is_empty())
            .map(UserId::from);
        Ok(Self { endpoint: Endpoint::parse(base_url)?, current_user, session_cookie: None })
    }

    #[must_use]
    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie.filter(|value| !value.trim().is_empty());
        self
    }

    /// `Cookie` header value for authenticated requests, if configured.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        self.session_cookie.as_ref().map(|value| format!("sessionid={value}"))
    }
}
