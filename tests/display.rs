use std::cell::Cell;
use std::rc::Rc;

use inspector::display::{DisplaySession, Inspector, Viewer};
use inspector::{InspectorConfig, InspectorError, Series};

/// Counts how often a window would have been opened.
#[derive(Clone, Default)]
struct CountingViewer {
    calls: Rc<Cell<usize>>,
    items: Rc<Cell<usize>>,
}

impl Viewer for CountingViewer {
    fn show(&mut self, session: DisplaySession) -> inspector::Result<()> {
        self.calls.set(self.calls.get() + 1);
        self.items.set(session.model.len());
        Ok(())
    }
}

struct FailingViewer;

impl Viewer for FailingViewer {
    fn show(&mut self, _: DisplaySession) -> inspector::Result<()> {
        Err(InspectorError::Display("no display".into()))
    }
}

fn inspector(viewer: &CountingViewer) -> Inspector<CountingViewer> {
    Inspector::with_viewer(viewer.clone()).with_config(InspectorConfig::default())
}

#[test]
fn finite_values_are_shown() {
    let viewer = CountingViewer::default();
    let mut ins = inspector(&viewer);
    ins.load_values([1.0, -2.0, 1e300], Some("finite")).unwrap();
    assert_eq!(ins.model().items()[0].name, "finite");
    ins.show().unwrap();
    assert_eq!(viewer.calls.get(), 1);
    assert_eq!(viewer.items.get(), 1);
}

#[test]
fn non_finite_values_fail_before_any_window() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let viewer = CountingViewer::default();
        let mut ins = inspector(&viewer);
        let err = ins.load_values([1.0, bad], None).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(ins.model().is_empty());
        assert_eq!(viewer.calls.get(), 0);
    }
}

#[test]
fn empty_sequence_shows_an_empty_plot() {
    let viewer = CountingViewer::default();
    let mut ins = inspector(&viewer);
    ins.load_values(std::iter::empty(), None).unwrap();
    ins.show().unwrap();
    assert_eq!(viewer.calls.get(), 1);
}

#[test]
fn nothing_loaded_still_shows() {
    let viewer = CountingViewer::default();
    inspector(&viewer).show().unwrap();
    assert_eq!(viewer.calls.get(), 1);
    assert_eq!(viewer.items.get(), 0);
}

#[test]
fn viewer_errors_are_returned() {
    let mut ins = Inspector::with_viewer(FailingViewer);
    ins.load_series(Series::from_values([1.0]), None).unwrap();
    assert!(matches!(ins.show(), Err(InspectorError::Display(_))));
}

#[test]
fn json_text_is_loaded() {
    let viewer = CountingViewer::default();
    let mut ins = inspector(&viewer);
    let ids = ins.load_json(r#"{"a": [1, 2], "b": [3]}"#).unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ins.load_json(r#"[1, null]"#).unwrap_err().is_invalid_input());
    assert_eq!(ins.model().len(), 2);
}

#[test]
fn files_name_unnamed_series_after_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels.json");
    std::fs::write(&path, r#"[[1, 2, 3], {"series": [4], "name": "kept"}]"#).unwrap();

    let viewer = CountingViewer::default();
    let mut ins = inspector(&viewer);
    ins.load_file(&path).unwrap();
    let names: Vec<&str> = ins.model().items().iter().map(|it| it.name.as_str()).collect();
    assert_eq!(names, vec!["levels.json_0", "kept"]);
}

#[test]
fn missing_file_is_a_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let viewer = CountingViewer::default();
    let err = inspector(&viewer)
        .load_file(dir.path().join("missing.json"))
        .unwrap_err();
    assert!(matches!(err, InspectorError::File { .. }));
}

#[test]
fn time_and_number_series_cannot_be_mixed() {
    let viewer = CountingViewer::default();
    let mut ins = inspector(&viewer);
    ins.load_series(Series::from_time_points(vec![[0.0, 1.0]]), None).unwrap();
    let err = ins.load_values([1.0], None).unwrap_err();
    assert!(err.is_invalid_input());
}
