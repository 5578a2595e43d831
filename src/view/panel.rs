//! Headless panel model.
//!
//! Holds what a floating chat panel would show: header, body, input
//! visibility, and which row is scrolled into view. Hosts that draw their own
//! UI can read it after every event; tests assert against it directly.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use time::UtcOffset;

use super::{
    ConversationView, EMPTY_HISTORY_TEXT, EMPTY_STATE_TEXT, EMPTY_STATE_TITLE, ERROR_STATE_TEXT, ERROR_STATE_TITLE,
    RenderedMessage, render_message,
};
use crate::net::types::{Message, UserId};

/// Current panel body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    /// Nothing rendered yet.
    Blank,
    Loading,
    /// A canned line of text (empty history, empty state, error).
    Notice(&'static str),
    Messages(Vec<RenderedMessage>),
}

#[derive(Debug, Clone)]
pub struct PanelView {
    viewer: UserId,
    offset: UtcOffset,
    pub title: String,
    pub body: PanelBody,
    pub input_visible: bool,
    /// Index of the message scrolled into view, if any.
    pub scrolled_to: Option<usize>,
    /// Set by [`ConversationView::show_error_state`], cleared when a room opens.
    pub errored: bool,
}

impl PanelView {
    #[must_use]
    pub fn new(viewer: UserId, offset: UtcOffset) -> Self {
        Self {
            viewer,
            offset,
            title: EMPTY_STATE_TITLE.to_owned(),
            body: PanelBody::Blank,
            input_visible: true,
            scrolled_to: None,
            errored: false,
        }
    }

    /// Rendered messages, empty unless the body is a message list.
    #[must_use]
    pub fn messages(&self) -> &[RenderedMessage] {
        match &self.body {
            PanelBody::Messages(list) => list,
            _ => &[],
        }
    }

    fn scroll_to_newest(&mut self) {
        self.scrolled_to = self.messages().len().checked_sub(1);
    }
}

impl ConversationView for PanelView {
    fn show_connecting(&mut self, partner: &str) {
        partner.clone_into(&mut self.title);
        self.body = PanelBody::Loading;
        self.input_visible = true;
        self.scrolled_to = None;
        self.errored = false;
    }

    fn render_history(&mut self, messages: &[Message]) {
        if messages.is_empty() {
            self.body = PanelBody::Notice(EMPTY_HISTORY_TEXT);
            self.scrolled_to = None;
            return;
        }
        let rendered = messages
            .iter()
            .map(|m| render_message(m, &self.viewer, self.offset))
            .collect();
        self.body = PanelBody::Messages(rendered);
        self.scroll_to_newest();
    }

    fn append_message(&mut self, message: &Message) {
        let rendered = render_message(message, &self.viewer, self.offset);
        match &mut self.body {
            PanelBody::Messages(list) => list.push(rendered),
            // First live message replaces the loading line or placeholder.
            _ => self.body = PanelBody::Messages(vec![rendered]),
        }
        self.scroll_to_newest();
    }

    fn show_empty_state(&mut self) {
        EMPTY_STATE_TITLE.clone_into(&mut self.title);
        self.body = PanelBody::Notice(EMPTY_STATE_TEXT);
        self.input_visible = false;
        self.scrolled_to = None;
    }

    fn show_error_state(&mut self) {
        ERROR_STATE_TITLE.clone_into(&mut self.title);
        self.body = PanelBody::Notice(ERROR_STATE_TEXT);
        self.scrolled_to = None;
        self.errored = true;
    }
}

#[cfg(test)]
impl PanelView {
    /// Panel for viewer `bob` in UTC.
    pub fn for_bob() -> Self {
        Self::new(UserId::from("bob"), UtcOffset::UTC)
    }

    pub fn is_loading(&self) -> bool {
        self.body == PanelBody::Loading
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self.body {
            PanelBody::Notice(text) => Some(text),
            _ => None,
        }
    }
}
