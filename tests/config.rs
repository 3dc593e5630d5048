use inspector::config::{InspectorConfig, Theme};
use inspector::InspectorError;

#[test]
fn defaults() {
    let cfg = InspectorConfig::default();
    assert_eq!(cfg.title, "Inspector");
    assert_eq!(cfg.appearance.theme, Theme::Light);
    assert_eq!(cfg.view.outline_resample_threshold, 8000);
    assert_eq!(cfg.view.outline_points, 2000);
    assert_eq!(cfg.view.default_gap_limit, 20.0);
    assert!(cfg.view.show_items_panel);
    assert!(cfg.native_options.is_none());
}

#[test]
fn partial_yaml_keeps_other_defaults() {
    let cfg = InspectorConfig::from_yaml_str(
        "title: Plant data\nappearance:\n  theme: dark\nview:\n  outline_points: 500\n",
    )
    .unwrap();
    assert_eq!(cfg.title, "Plant data");
    assert_eq!(cfg.appearance.theme, Theme::Dark);
    assert_eq!(cfg.appearance.line_width, 1.1);
    assert_eq!(cfg.view.outline_points, 500);
    assert_eq!(cfg.view.outline_resample_threshold, 8000);
}

#[test]
fn malformed_yaml_is_a_config_error() {
    let err = InspectorConfig::from_yaml_str("appearance: [1, 2").unwrap_err();
    assert!(matches!(err, InspectorError::Config(_)));
    let err = InspectorConfig::from_yaml_str("appearance:\n  theme: sepia\n").unwrap_err();
    assert!(matches!(err, InspectorError::Config(_)));
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut cfg = InspectorConfig::default();
    cfg.window_size = [800.0, 600.0];
    cfg.appearance.show_legend = false;
    cfg.view.default_gap_limit = 300.0;
    cfg.save_to_path(&path).unwrap();

    let back = InspectorConfig::load_from_path(&path).unwrap();
    assert_eq!(back.window_size, [800.0, 600.0]);
    assert_eq!(back.appearance, cfg.appearance);
    assert_eq!(back.view, cfg.view);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = InspectorConfig::load_from_path(dir.path().join("none.yaml")).unwrap_err();
    assert!(matches!(err, InspectorError::File { .. }));
}
