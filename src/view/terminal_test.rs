use super::*;

fn view() -> TerminalView<Vec<u8>> {
    TerminalView::new(Vec::new(), UserId::from("bob"), UtcOffset::UTC)
}

fn output(view: TerminalView<Vec<u8>>) -> String {
    String::from_utf8(view.into_inner()).expect("utf8 output")
}

fn message(sender: &str, text: &str) -> Message {
    Message {
        sender: UserId::from(sender),
        text: text.to_owned(),
        sent_at: "2024-05-01T09:30:00Z".to_owned(),
    }
}

#[test]
fn received_lines_carry_sender_and_sent_lines_do_not() {
    let mut v = view();
    v.render_history(&[message("alice", "hi"), message("bob", "hello")]);
    let out = output(v);
    assert_eq!(out, "[09:30] alice: hi\n[09:30] > hello\n");
}

#[test]
fn connecting_prints_partner_header_and_loading() {
    let mut v = view();
    v.show_connecting("alice");
    let out = output(v);
    assert!(out.starts_with("── alice ──\n"));
    assert!(out.contains(LOADING_TEXT));
}

#[test]
fn empty_history_prints_placeholder() {
    let mut v = view();
    v.render_history(&[]);
    assert!(output(v).contains(EMPTY_HISTORY_TEXT));
}

#[test]
fn error_and_empty_states_print_guidance() {
    let mut v = view();
    v.show_error_state();
    v.show_empty_state();
    let out = output(v);
    assert!(out.contains("── Error ──"));
    assert!(out.contains("Please try again."));
    assert!(out.contains("Pick someone to chat with first."));
}
