//! Line-oriented renderer used by the `chat-widget` binary.
//!
//! Each view update is written as plain lines; "clearing" the panel prints a
//! header rule instead. Write failures are logged and otherwise ignored so a
//! closed stdout never takes the event loop down.

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::io::Write;

use time::UtcOffset;

use super::{
    ConversationView, Direction, EMPTY_HISTORY_TEXT, EMPTY_STATE_TEXT, EMPTY_STATE_TITLE, ERROR_STATE_TEXT,
    ERROR_STATE_TITLE, LOADING_TEXT, RenderedMessage, render_message,
};
use crate::net::types::{Message, UserId};

pub struct TerminalView<W> {
    out: W,
    viewer: UserId,
    offset: UtcOffset,
}

impl<W: Write + Send> TerminalView<W> {
    #[must_use]
    pub fn new(out: W, viewer: UserId, offset: UtcOffset) -> Self {
        Self { out, viewer, offset }
    }

    /// Consume the view, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn header(&mut self, title: &str) {
        self.write(&format!("── {title} ──"));
    }

    fn notice(&mut self, text: &str) {
        for line in text.lines() {
            self.write(&format!("   {line}"));
        }
    }

    fn message(&mut self, rendered: &RenderedMessage) {
        let line = match (rendered.direction, &rendered.sender) {
            (Direction::Received, Some(sender)) => format!("[{}] {sender}: {}", rendered.time, rendered.text),
            _ => format!("[{}] > {}", rendered.time, rendered.text),
        };
        self.write(&line);
    }

    fn write(&mut self, line: &str) {
        let result = writeln!(self.out, "{line}").and_then(|()| self.out.flush());
        if let Err(error) = result {
            tracing::warn!(%error, "terminal view write failed");
        }
    }
}

impl<W: Write + Send> ConversationView for TerminalView<W> {
    fn show_connecting(&mut self, partner: &str) {
        self.header(partner);
        self.notice(LOADING_TEXT);
    }

    fn render_history(&mut self, messages: &[Message]) {
        if messages.is_empty() {
            self.notice(EMPTY_HISTORY_TEXT);
            return;
        }
        for message in messages {
            let rendered = render_message(message, &self.viewer, self.offset);
            self.message(&rendered);
        }
    }

    fn append_message(&mut self, message: &Message) {
        let rendered = render_message(message, &self.viewer, self.offset);
        self.message(&rendered);
    }

    fn show_empty_state(&mut self) {
        self.header(EMPTY_STATE_TITLE);
        self.notice(EMPTY_STATE_TEXT);
    }

    fn show_error_state(&mut self) {
        self.header(ERROR_STATE_TITLE);
        self.notice(ERROR_STATE_TEXT);
    }
}
