use super::*;
use crate::view::Direction;

fn message(sender: &str, text: &str) -> Message {
    Message {
        sender: UserId::from(sender),
        text: text.to_owned(),
        sent_at: "2024-05-01T09:30:00+00:00".to_owned(),
    }
}

// =============================================================
// render_history
// =============================================================

#[test]
fn empty_history_shows_placeholder_and_keeps_input_hidden() {
    let mut view = PanelView::for_bob();
    view.show_empty_state();
    assert!(!view.input_visible);

    view.render_history(&[]);
    assert_eq!(view.notice(), Some(EMPTY_HISTORY_TEXT));
    assert!(!view.input_visible);
    assert_eq!(view.scrolled_to, None);
}

#[test]
fn history_renders_in_order_and_scrolls_to_newest() {
    let mut view = PanelView::for_bob();
    view.show_connecting("alice");
    view.render_history(&[message("alice", "hi"), message("bob", "hey"), message("alice", "ok")]);

    let texts: Vec<_> = view.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["hi", "hey", "ok"]);
    assert_eq!(view.scrolled_to, Some(2));
}

#[test]
fn history_replaces_previous_content() {
    let mut view = PanelView::for_bob();
    view.render_history(&[message("alice", "old")]);
    view.render_history(&[message("alice", "new")]);
    assert_eq!(view.messages().len(), 1);
    assert_eq!(view.messages()[0].text, "new");
}

// =============================================================
// append_message
// =============================================================

#[test]
fn partner_message_is_received_with_sender_label() {
    let mut view = PanelView::for_bob();
    view.render_history(&[]);
    view.append_message(&message("alice", "hi"));

    let rendered = &view.messages()[0];
    assert_eq!(rendered.direction, Direction::Received);
    assert_eq!(rendered.sender.as_deref(), Some("alice"));
    assert_eq!(rendered.time, "09:30");
    assert_eq!(view.scrolled_to, Some(0));
}

#[test]
fn own_message_is_sent_without_label_and_scrolls() {
    let mut view = PanelView::for_bob();
    view.render_history(&[message("alice", "hi")]);
    view.append_message(&message("bob", "hello"));

    let rendered = &view.messages()[1];
    assert_eq!(rendered.direction, Direction::Sent);
    assert_eq!(rendered.sender, None);
    assert_eq!(view.scrolled_to, Some(1));
}

// =============================================================
// Canned states
// =============================================================

#[test]
fn connecting_shows_partner_loading_and_input() {
    let mut view = PanelView::for_bob();
    view.show_empty_state();
    view.show_connecting("alice");
    assert_eq!(view.title, "alice");
    assert!(view.is_loading());
    assert!(view.input_visible);
    assert!(!view.errored);
}

#[test]
fn error_state_replaces_content() {
    let mut view = PanelView::for_bob();
    view.render_history(&[message("alice", "hi")]);
    view.show_error_state();
    assert_eq!(view.title, ERROR_STATE_TITLE);
    assert_eq!(view.notice(), Some(ERROR_STATE_TEXT));
    assert!(view.messages().is_empty());
    assert!(view.errored);
}

#[test]
fn empty_state_hides_input() {
    let mut view = PanelView::for_bob();
    view.show_empty_state();
    assert_eq!(view.title, EMPTY_STATE_TITLE);
    assert_eq!(view.notice(), Some(EMPTY_STATE_TEXT));
    assert!(!view.input_visible);
}
