use inspector::data::markings::{Label, Marking};
use inspector::data::model::{palette_color, Model};
use inspector::data::series::{IndexKind, Metadata, Series};
use serde_json::json;

fn model_with(values: &[&[f64]]) -> Model {
    let mut m = Model::new();
    for v in values {
        m.add_series(Series::from_values(v.iter().copied()), None).unwrap();
    }
    m
}

#[test]
fn ids_and_colours_follow_insertion_order() {
    let m = model_with(&[&[1.0, 2.0, 3.0], &[4.0]]);
    let items = m.items();
    assert_eq!(items[0].id, 1);
    assert_eq!(items[1].id, 2);
    assert_eq!(items[0].color_name, palette_color(0).0);
    assert_eq!(items[1].color, palette_color(1).1);
}

#[test]
fn unnamed_series_are_named_after_colour_and_length() {
    let m = model_with(&[&[1.0, 2.0, 3.0]]);
    assert_eq!(m.items()[0].name, format!("{} - 3", palette_color(0).0));
}

#[test]
fn explicit_name_overrides_series_name() {
    let mut m = Model::new();
    let id = m
        .add_series(Series::from_values([1.0]).with_name("inner"), Some("outer".into()))
        .unwrap();
    assert_eq!(m.get(id).unwrap().name, "outer");
    let id = m.add_series(Series::from_values([1.0]).with_name("inner"), None).unwrap();
    assert_eq!(m.get(id).unwrap().name, "inner");
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut m = model_with(&[&[1.0], &[2.0]]);
    assert!(m.remove_item(2).is_some());
    let id = m.add_series(Series::from_values([3.0]), None).unwrap();
    assert_eq!(id, 3);
    assert_eq!(m.remove_items(&[1, 3, 99]), 2);
    assert!(m.is_empty());
}

#[test]
fn first_series_fixes_the_x_axis_unit() {
    let mut m = Model::new();
    assert_eq!(m.xaxis_unit(), None);
    m.add_series(Series::from_time_points(vec![[0.0, 1.0]]), None).unwrap();
    assert!(m.xaxis_is_time());

    let err = m.add_series(Series::from_values([1.0]), None).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("numeric-indexed series to a time x-axis"));
    assert_eq!(m.len(), 1);
}

#[test]
fn invalid_series_leaves_model_untouched() {
    let mut m = Model::new();
    let err = m.add_series(Series::from_values([1.0, f64::NAN]), None).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(m.is_empty());
    assert_eq!(m.xaxis_unit(), None);
    m.add_series(Series::from_time_points(vec![[0.0, 1.0]]), None).unwrap();
    assert_eq!(m.xaxis_unit(), Some(IndexKind::Time));
}

#[test]
fn failing_batch_adds_nothing() {
    let mut m = Model::new();
    let err = m
        .add_all(vec![
            Series::from_values([1.0, 2.0]),
            Series::from_time_points(vec![[0.0, 1.0]]),
        ])
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert!(m.is_empty());
    assert_eq!(m.xaxis_unit(), None);

    m.add_series(Series::from_values([5.0]), None).unwrap();
    let err = m
        .add_all(vec![
            Series::from_values([1.0, 2.0]),
            Series::from_values([3.0, f64::INFINITY]),
        ])
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(m.len(), 1);

    let ids = m
        .add_all(vec![Series::from_values([1.0]), Series::from_values([2.0])])
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(m.len(), 3);
}

#[test]
fn visibility_controls() {
    let mut m = model_with(&[&[1.0], &[2.0], &[3.0]]);
    m.items_mut()[1].visible = false;
    m.invert_visibility();
    let visible: Vec<_> = m.visible_items().map(|it| it.id).collect();
    assert_eq!(visible, vec![2]);

    m.set_all_visible(false);
    assert_eq!(m.visible_items().count(), 0);
    // limits fall back to every item when nothing is visible
    assert_eq!(m.items_for_limits().len(), 3);
    m.set_all_visible(true);
    assert_eq!(m.visible_items().count(), 3);
}

#[test]
fn data_limits_cover_visible_items() {
    let mut m = Model::new();
    m.add_series(Series::from_points(vec![[0.0, 5.0], [10.0, 7.0]]), None).unwrap();
    m.add_series(Series::from_points(vec![[-5.0, 1.0], [2.0, 2.0]]), None).unwrap();
    assert_eq!(m.data_limits(), Some(((-5.0, 10.0), (1.0, 7.0))));
    m.items_mut()[1].visible = false;
    assert_eq!(m.data_limits(), Some(((0.0, 10.0), (5.0, 7.0))));
    assert_eq!(Model::new().data_limits(), None);
}

#[test]
fn new_marking_needs_a_label_and_marks_visible_items() {
    let mut m = model_with(&[&[1.0, 2.0], &[3.0, 4.0]]);
    assert_eq!(m.new_marking(0.0, 1.0), 0);

    m.items_mut()[1].visible = false;
    m.set_current_label(Some(Label::Discard));
    assert_eq!(m.new_marking(1.0, 0.2), 1);
    let mk = &m.items()[0].markings[0];
    assert_eq!((mk.start, mk.end, mk.label), (0.2, 1.0, Label::Discard));
    assert!(m.items()[1].markings.is_empty());
}

#[test]
fn removed_markings_are_kept_as_deleted() {
    let mut m = model_with(&[&[1.0, 2.0]]);
    m.add_marking(1, Marking::new(0.0, 1.0, Label::Good));
    let removed = m.remove_marking(1, 0).unwrap();
    assert_eq!(removed.label, Label::Good);
    let it = m.get(1).unwrap();
    assert!(it.markings.is_empty());
    assert_eq!(it.deleted_markings, vec![removed]);
    assert!(m.remove_marking(1, 0).is_none());
}

#[test]
fn relabel_uses_the_current_label() {
    let mut m = model_with(&[&[1.0, 2.0]]);
    m.add_marking(1, Marking::new(0.0, 1.0, Label::Good));
    assert!(!m.relabel_marking(1, 0));
    m.set_current_label(Some(Label::Zero));
    assert!(m.relabel_marking(1, 0));
    assert_eq!(m.get(1).unwrap().markings[0].label, Label::Zero);
    assert!(!m.relabel_marking(1, 5));
}

#[test]
fn delete_in_interval_only_removes_markings_strictly_inside() {
    let mut m = model_with(&[&[0.0; 10]]);
    m.add_marking(1, Marking::new(2.0, 3.0, Label::Good));
    m.add_marking(1, Marking::new(0.0, 3.0, Label::Good));
    m.add_marking(1, Marking::new(4.0, 9.0, Label::Good));
    assert_eq!(m.delete_markings_in_interval(0.0, 5.0, true), 1);
    let left: Vec<_> = m.get(1).unwrap().markings.iter().map(|mk| mk.start).collect();
    assert_eq!(left, vec![0.0, 4.0]);
    assert_eq!(m.delete_all_markings_for_visible(), 2);
    assert_eq!(m.get(1).unwrap().deleted_markings.len(), 3);
}

#[test]
fn hidden_items_keep_markings_unless_asked() {
    let mut m = model_with(&[&[0.0; 10]]);
    m.add_marking(1, Marking::new(2.0, 3.0, Label::Good));
    m.items_mut()[0].visible = false;
    assert_eq!(m.delete_markings_in_interval(0.0, 5.0, true), 0);
    assert_eq!(m.delete_markings_in_interval(0.0, 5.0, false), 1);
}

#[test]
fn auto_mark_gaps_on_visible_items() {
    let mut m = Model::new();
    m.add_series(
        Series::from_points(vec![[0.0, 1.0], [1.0, 1.0], [30.0, 1.0], [31.0, 1.0]]),
        None,
    )
    .unwrap();
    assert_eq!(m.auto_mark_gaps_on_visible(20.0, Label::LinearFill), 1);
    let mk = &m.items()[0].markings[0];
    assert_eq!((mk.start, mk.end), (1.0, 30.0));
}

#[test]
fn markings_attach_by_metadata() {
    let mut meta = Metadata::new();
    meta.insert("sensor".into(), json!("t1"));
    let mut m = Model::new();
    m.add_series(Series::from_values([1.0]).with_metadata(meta.clone()), None).unwrap();
    m.add_series(Series::from_values([2.0]), None).unwrap();

    let marks = [Marking::new(0.0, 1.0, Label::Comment).with_note("check")];
    assert_eq!(m.add_markings_matching(&meta, &marks), 1);
    assert_eq!(m.items()[0].markings.len(), 1);
    assert!(m.items()[1].markings.is_empty());
    assert_eq!(m.add_markings_matching(&Metadata::new(), &marks), 0);
}
