//! Panel controller: panel visibility × transport session.
//!
//! ARCHITECTURE
//! ============
//! The controller owns the [`TransportSession`] and the view and is driven by
//! four kinds of input, all on one event loop:
//!
//! - UI triggers (`toggle`, `chat_with`, `open_chat_room`, `click`, `send`)
//! - room lookups finishing (`on_resolved`)
//! - transport signals (`on_signal`)
//! - `shutdown`
//!
//! Triggers that need a room lookup do not perform it. They return a
//! [`ResolveRequest`] for the caller to run, and the answer comes back
//! through `on_resolved`. This keeps every state change synchronous and
//! testable without a network.
//!
//! OVERLAPPING LOOKUPS
//! ===================
//! Each request carries a generation number. Starting a new lookup, toggling
//! the panel closed, or dismissing it invalidates every older generation, and
//! answers for invalidated generations are dropped. The most recent *request*
//! wins even if an older response arrives last.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use tracing::{debug, info, warn};

use crate::error::ResolveError;
use crate::net::session::{ConnectionState, Session, TransportSession};
use crate::net::transport::{Transport, TransportSignal};
use crate::net::types::{RoomTarget, UserId};
use crate::state::ui::{ClickTarget, PanelVisibility};
use crate::view::ConversationView;

/// Which room lookup to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveKind {
    Latest,
    WithUser(UserId),
}

/// A room lookup the caller must perform and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub generation: u64,
    pub kind: ResolveKind,
}

/// The answer to a [`ResolveRequest`].
#[derive(Debug)]
pub struct Resolved {
    pub generation: u64,
    pub outcome: Result<Option<RoomTarget>, ResolveError>,
}

pub struct PanelController<T, V> {
    session: TransportSession<T>,
    view: V,
    visibility: PanelVisibility,
    generation: u64,
    partner_hint: Option<String>,
}

impl<T: Transport, V: ConversationView> PanelController<T, V> {
    #[must_use]
    pub fn new(session: TransportSession<T>, view: V) -> Self {
        Self { session, view, visibility: PanelVisibility::Hidden, generation: 0, partner_hint: None }
    }

    #[must_use]
    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.session.state()
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.session()
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    // =========================================================================
    // UI TRIGGERS
    // =========================================================================

    /// Toggle button. Opening asks for the latest room; closing tears the session down.
    pub fn toggle(&mut self) -> Option<ResolveRequest> {
        match self.visibility {
            PanelVisibility::Hidden => {
                self.visibility = PanelVisibility::Shown;
                Some(self.next_request(ResolveKind::Latest, None))
            }
            PanelVisibility::Shown => {
                self.hide();
                None
            }
        }
    }

    /// "Chat with user" trigger. Works whether or not the panel is shown.
    ///
    /// `partner_hint` is the trigger's own label for the user and wins over
    /// the name the room service returns.
    pub fn chat_with(&mut self, user_id: UserId, partner_hint: Option<String>) -> ResolveRequest {
        self.visibility = PanelVisibility::Shown;
        self.next_request(ResolveKind::WithUser(user_id), partner_hint)
    }

    /// Programmatic entry point for other page scripts; same flow as [`Self::chat_with`].
    pub fn open_chat_room(&mut self, id: &str) -> ResolveRequest {
        self.chat_with(UserId::from(id), None)
    }

    /// Document-level click. Only clicks outside the widget dismiss it.
    pub fn click(&mut self, target: ClickTarget) {
        if !self.visibility.is_shown() || !target.dismisses_panel() {
            return;
        }
        debug!("outside click dismissed chat panel");
        self.hide();
    }

    /// Send button / Enter key. Dropped unless the connection is open.
    pub fn send(&mut self, text: &str) -> bool {
        self.session.send(text)
    }

    // =========================================================================
    // ASYNC COMPLETIONS
    // =========================================================================

    pub fn on_resolved(&mut self, resolved: Resolved) {
        if resolved.generation != self.generation {
            debug!(
                generation = resolved.generation,
                current = self.generation,
                "discarding stale room lookup"
            );
            return;
        }
        let hint = self.partner_hint.take();

        match resolved.outcome {
            Ok(Some(target)) => {
                let partner = target.partner_label(hint.as_deref());
                info!(room_id = %target.room_id, %partner, "room resolved");
                self.view.show_connecting(&partner);
                self.session.open(target.room_id, partner);
            }
            Ok(None) => {
                info!("no previous conversation");
                self.session.close();
                self.view.show_empty_state();
            }
            Err(error) => {
                warn!(%error, "room lookup failed");
                self.session.close();
                self.view.show_error_state();
            }
        }
    }

    pub fn on_signal(&mut self, signal: TransportSignal) {
        self.session.handle(signal, &mut self.view);
    }

    /// Close everything; used when the host tears the widget down.
    pub fn shutdown(&mut self) {
        info!("chat widget shutting down");
        self.hide();
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn hide(&mut self) {
        self.invalidate();
        self.session.close();
        self.visibility = PanelVisibility::Hidden;
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.partner_hint = None;
    }

    fn next_request(&mut self, kind: ResolveKind, partner_hint: Option<String>) -> ResolveRequest {
        self.invalidate();
        self.partner_hint = partner_hint;
        debug!(generation = self.generation, ?kind, "requesting room lookup");
        ResolveRequest { generation: self.generation, kind }
    }
}
