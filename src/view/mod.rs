//! Conversation view: the presentational half of the widget.
//!
//! DESIGN
//! ======
//! The session and controller only ever talk to [`ConversationView`]. The
//! panel model (`panel`) backs headless use and tests; the terminal renderer
//! (`terminal`) backs the binary. Both share [`render_message`] so "sent"
//! versus "received" attribution and time formatting are decided once.


pub mod panel;
pub mod terminal;

use time::macros::format_description;
use time::UtcOffset;

use crate::net::types::{Message, UserId};

/// Placeholder shown when a room's history is empty.
pub const EMPTY_HISTORY_TEXT: &str = "No messages yet. Send the first one!";

/// Guidance shown when there is no previous conversation to reopen.
pub const EMPTY_STATE_TEXT: &str = "Pick someone to chat with first.\n\
     Use the chat button on a user's profile to start a conversation.";

/// Shown after a failed room lookup or a transport error.
pub const ERROR_STATE_TEXT: &str = "Something went wrong while loading the chat.\nPlease try again.";

/// Shown between opening a room and receiving its history.
pub const LOADING_TEXT: &str = "Loading messages...";

pub const EMPTY_STATE_TITLE: &str = "Chat";
pub const ERROR_STATE_TITLE: &str = "Error";

/// Rendering surface for one conversation panel.
pub trait ConversationView: Send {
    /// A room was opened: show its partner, a loading line, and the input.
    fn show_connecting(&mut self, partner: &str);

    /// Replace the content with `messages` (or the empty placeholder) and scroll to the newest.
    fn render_history(&mut self, messages: &[Message]);

    /// Append one live message and scroll to it.
    fn append_message(&mut self, message: &Message);

    /// Guidance for a viewer with no conversations; hides the input.
    fn show_empty_state(&mut self);

    /// Retry guidance after a failure.
    fn show_error_state(&mut self);
}

/// Which side of the conversation a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

/// A message ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub direction: Direction,
    /// Sender label; only present on received messages.
    pub sender: Option<String>,
    pub text: String,
    /// Local `HH:MM`.
    pub time: String,
}

/// Attribute and format `message` for `viewer` in the viewer's `offset`.
#[must_use]
pub fn render_message(message: &Message, viewer: &UserId, offset: UtcOffset) -> RenderedMessage {
    let sent = &message.sender == viewer;
    RenderedMessage {
        direction: if sent { Direction::Sent } else { Direction::Received },
        sender: (!sent).then(|| message.sender.to_string()),
        text: message.text.clone(),
        time: format_time(message, offset),
    }
}

/// Hour and minute of `sent_at` in `offset`, or `--:--` when unparseable.
#[must_use]
pub fn format_time(message: &Message, offset: UtcOffset) -> String {
    message
        .sent_at_time(offset)
        .map(|at| at.to_offset(offset))
        .and_then(|at| at.format(format_description!("[hour]:[minute]")).ok())
        .unwrap_or_else(|| "--:--".to_owned())
}

/// The viewer's local UTC offset, falling back to UTC when the platform
/// cannot report it safely.
#[must_use]
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}
