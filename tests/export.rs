use inspector::data::export::*;
use inspector::data::markings::{Label, Marking};
use inspector::data::model::Model;
use inspector::data::series::{Metadata, Series};
use serde_json::json;

fn csv_of(model: &Model) -> String {
    let mut buf = Vec::new();
    write_visible_csv(&mut buf, model).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn writes_visible_items_as_long_csv() {
    let mut m = Model::new();
    m.add_series(Series::from_values([1.0, 2.5]).with_name("sine"), None).unwrap();
    m.add_series(Series::from_values([9.0]).with_name("hidden"), None).unwrap();
    m.items_mut()[1].visible = false;

    let s = csv_of(&m);
    let lines: Vec<&str> = s.trim().split('\n').collect();
    assert_eq!(lines, vec!["series,x,value", "sine,0,1", "sine,1,2.5"]);
}

#[test]
fn time_axis_is_written_as_timestamps() {
    let mut m = Model::new();
    m.add_series(Series::from_time_points(vec![[60.0, 1.0]]).with_name("t"), None).unwrap();
    let s = csv_of(&m);
    assert!(s.starts_with("series,time,value\n"));
    assert!(s.contains("t,1970-01-01 00:01:00.000,1"));
}

#[test]
fn names_with_commas_are_quoted() {
    let mut m = Model::new();
    m.add_series(Series::from_values([1.0]).with_name("a, \"b\""), None).unwrap();
    assert!(csv_of(&m).contains("\"a, \"\"b\"\"\",0,1"));
}

#[test]
fn save_csv_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut m = Model::new();
    m.add_series(Series::from_values([4.0]).with_name("x"), None).unwrap();
    save_visible_csv(&path, &m).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "series,x,value\nx,0,4\n");
}

fn sensor(name: &str) -> Metadata {
    let mut meta = Metadata::new();
    meta.insert("sensor".into(), json!(name));
    meta
}

#[test]
fn collect_reports_kept_and_deleted_markings() {
    let mut m = Model::new();
    let id = m
        .add_series(Series::from_values([0.0; 5]).with_name("a").with_metadata(sensor("s1")), None)
        .unwrap();
    m.add_marking(id, Marking::new(0.0, 1.0, Label::Good));
    m.add_marking(id, Marking::new(2.0, 3.0, Label::Zero));
    m.remove_marking(id, 1);

    let records = collect_markings(&m, true);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "a");
    assert_eq!(records[0].metadata, sensor("s1"));
    assert_eq!(records[0].markings.len(), 1);
    assert_eq!(records[0].deleted[0].label, Label::Zero);

    m.items_mut()[0].visible = false;
    assert!(collect_markings(&m, true).is_empty());
    assert_eq!(collect_markings(&m, false).len(), 1);
}

#[test]
fn markings_file_round_trip_matches_on_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("markings.json");

    let mut src = Model::new();
    let id = src
        .add_series(Series::from_values([0.0; 5]).with_metadata(sensor("s1")), None)
        .unwrap();
    src.add_marking(id, Marking::new(1.0, 2.0, Label::Discard).with_note("spike"));
    save_markings_json(&path, &src, true).unwrap();

    let mut dst = Model::new();
    dst.add_series(Series::from_values([1.0; 5]).with_metadata(sensor("s2")), None).unwrap();
    dst.add_series(Series::from_values([2.0; 5]).with_metadata(sensor("s1")), None).unwrap();
    assert_eq!(load_markings_json(&path, &mut dst).unwrap(), 1);
    assert!(dst.items()[0].markings.is_empty());
    let mk = &dst.items()[1].markings[0];
    assert_eq!(mk.label, Label::Discard);
    assert_eq!(mk.note.as_deref(), Some("spike"));
}

#[test]
fn records_without_metadata_match_on_name() {
    let mut m = Model::new();
    m.add_series(Series::from_values([0.0; 3]).with_name("plain"), None).unwrap();
    let records = vec![ItemMarkings {
        name: "plain".into(),
        metadata: Metadata::new(),
        markings: vec![Marking::new(0.0, 1.0, Label::Ffill)],
        deleted: vec![],
    }];
    assert_eq!(apply_markings(&mut m, &records), 1);
    assert_eq!(m.items()[0].markings[0].label, Label::Ffill);
}

#[test]
fn malformed_markings_file_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{not json").unwrap();
    let err = load_markings_json(&path, &mut Model::new()).unwrap_err();
    assert!(err.is_invalid_input());
}
