use super::*;

// =============================================================
// PanelVisibility
// =============================================================

#[test]
fn panel_starts_hidden() {
    assert_eq!(PanelVisibility::default(), PanelVisibility::Hidden);
    assert!(!PanelVisibility::default().is_shown());
}

// =============================================================
// ClickTarget
// =============================================================

#[test]
fn only_outside_clicks_dismiss() {
    assert!(ClickTarget::Outside.dismisses_panel());
    assert!(!ClickTarget::Panel.dismisses_panel());
    assert!(!ClickTarget::Toggle.dismisses_panel());
    assert!(!ClickTarget::ChatWithTrigger.dismisses_panel());
}
