use inspector::panels::*;

#[test]
fn full_label_contains_both_icon_and_title() {
    let p = MarkingsPanel::default();
    let label = p.title_and_icon();
    assert!(label.contains(p.title()));
    assert!(label.contains(p.state().icon));
}

#[test]
fn panel_titles() {
    assert_eq!(ItemsPanel::default().title(), "Items");
    assert_eq!(MarkingsPanel::default().title(), "Markings");
    assert_eq!(PluginsPanel::default().title(), "Plugins");
}

#[test]
fn plugins_panel_is_a_floating_window() {
    let p = PluginsPanel::default();
    assert!(p.state().detached);
    assert!(!p.state().visible);
    assert!(!ItemsPanel::default().state().detached);
}

#[test]
fn panels_start_hidden_until_configured() {
    let mut p = ItemsPanel::default();
    assert!(!p.state().visible);
    p.state_mut().visible = true;
    assert!(p.state().visible);
}
