//! Wire types shared by the room resolver, the socket, and the views.
//!
//! The room service speaks plain JSON: room lookups return
//! `{ "room_id": .., "partner": .. }` and the room socket pushes frames tagged
//! by a `type` field. Payloads stay small and typed; fields the widget does
//! not use (message ids, for instance) are ignored on decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// A user identifier as the room service prints it (the username).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-assigned identifier of a two-party room.
///
/// The service emits integer primary keys; strings are accepted too so the
/// widget does not care how rooms are keyed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RoomId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self(n.to_string()),
            Raw::Str(s) => Self(s),
        })
    }
}

// =============================================================================
// ROOM LOOKUP
// =============================================================================

/// Fallback header label when neither the trigger nor the service names the partner.
pub const DEFAULT_PARTNER_LABEL: &str = "Chat";

/// A resolved room: `{ room_id, partner }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomTarget {
    pub room_id: RoomId,
    #[serde(default)]
    pub partner: Option<String>,
}

impl RoomTarget {
    /// Display name for the panel header, preferring the trigger's own label.
    #[must_use]
    pub fn partner_label(&self, hint: Option<&str>) -> String {
        hint.filter(|h| !h.trim().is_empty())
            .or(self.partner.as_deref())
            .unwrap_or(DEFAULT_PARTNER_LABEL)
            .to_owned()
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

/// One chat line. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: UserId,
    pub text: String,
    /// Absolute timestamp exactly as sent (ISO 8601 / RFC 3339).
    pub sent_at: String,
}

impl Message {
    /// Parse `sent_at`. Offset-less timestamps are read in `fallback_offset`.
    #[must_use]
    pub fn sent_at_time(&self, fallback_offset: UtcOffset) -> Option<OffsetDateTime> {
        let raw = self.sent_at.trim();
        if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
            return Some(at);
        }
        PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT)
            .ok()
            .map(|at| at.assume_offset(fallback_offset))
    }
}

/// Frames pushed by the room socket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Recent messages in receipt order, sent once after connect.
    ChatHistory { messages: Vec<Message> },
    /// A single live message.
    ChatMessage {
        #[serde(flatten)]
        message: Message,
    },
}

impl ServerEvent {
    /// Decode a text frame.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or an unknown `type`.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Client → server frame: `{ "message": "<text>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage<'a> {
    pub message: &'a str,
}
