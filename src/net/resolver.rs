//! Room resolution against the chat service's HTTP API.
//!
//! - `GET /chat/with/{user_id}/` → `{ room_id, partner }` (finds or creates
//!   the one-to-one room; must be flagged as a programmatic request or the
//!   service redirects to its room page)
//! - `GET /chat/latest/` → `{ room_id, partner }`, or 204 when the viewer has
//!   never chatted
//!
//! No retries and no timeouts: a failed lookup is reported once and the
//! viewer triggers again.

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use tracing::debug;

use super::types::{RoomTarget, UserId};
use crate::config::{Endpoint, WidgetConfig};
use crate::error::ResolveError;

/// Header marking a request as programmatic rather than a page navigation.
pub const REQUESTED_WITH: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Source of room ids.
#[async_trait]
pub trait RoomResolver: Send + Sync {
    /// Room shared with `user_id`.
    ///
    /// # Errors
    ///
    /// Any network, status, or body failure.
    async fn resolve_with_user(&self, user_id: &UserId) -> Result<RoomTarget, ResolveError>;

    /// Most recently active room, or `None` if the viewer has no conversations.
    ///
    /// # Errors
    ///
    /// Any network, status, or body failure. "No content" is not a failure.
    async fn resolve_latest(&self) -> Result<Option<RoomTarget>, ResolveError>;
}

/// [`RoomResolver`] backed by `reqwest`.
pub struct HttpRoomResolver {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpRoomResolver {
    /// Build a resolver that forwards the configured session cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(config: &WidgetConfig) -> Result<Self, ResolveError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.cookie_header() {
            headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);
        }
        let client = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { client, endpoint: config.endpoint.clone() })
    }
}

#[async_trait]
impl RoomResolver for HttpRoomResolver {
    async fn resolve_with_user(&self, user_id: &UserId) -> Result<RoomTarget, ResolveError> {
        let url = self.endpoint.http_url(&with_user_path(user_id));
        debug!(%url, "resolving room with user");
        let response = self
            .client
            .get(&url)
            .header(REQUESTED_WITH, REQUESTED_WITH_VALUE)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        decode_room(status, &body)?.ok_or(ResolveError::UnexpectedStatus(status.as_u16()))
    }

    async fn resolve_latest(&self) -> Result<Option<RoomTarget>, ResolveError> {
        let url = self.endpoint.http_url(LATEST_PATH);
        debug!(%url, "resolving latest room");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        decode_room(status, &body)
    }
}

pub const LATEST_PATH: &str = "/chat/latest/";

/// The id is one path segment; `/`, `?` and `#` are escaped.
fn with_user_path(user_id: &UserId) -> String {
    format!("/chat/with/{}/", urlencoding::encode(user_id.as_str()))
}

/// Interpret a room lookup response. 204 is the empty result.
fn decode_room(status: StatusCode, body: &[u8]) -> Result<Option<RoomTarget>, ResolveError> {
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(ResolveError::UnexpectedStatus(status.as_u16()));
    }
    Ok(Some(serde_json::from_slice(body)?))
}
