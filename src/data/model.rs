//! Model: the loaded data items, their colours, visibility and markings.
//!
//! The first item ever added fixes the X axis unit (time or number); items of
//! the other kind are rejected afterwards so both plots share one axis.

use egui::Color32;

use crate::data::markings::{auto_mark_gaps, Label, Marking};
use crate::data::series::{IndexKind, Metadata, Series};
use crate::error::{InspectorError, Result};

/// Stable identifier of a [`DataItem`] within one [`Model`].
pub type ItemId = u64;

/// Named colours allocated to items in insertion order.
const PALETTE: [(&str, Color32); 19] = [
    ("blue", Color32::from_rgb(0, 0, 255)),
    ("red", Color32::from_rgb(255, 0, 0)),
    ("forestgreen", Color32::from_rgb(34, 139, 34)),
    ("magenta", Color32::from_rgb(255, 0, 255)),
    ("darkorange", Color32::from_rgb(255, 140, 0)),
    ("teal", Color32::from_rgb(0, 128, 128)),
    ("deeppink", Color32::from_rgb(255, 20, 147)),
    ("navy", Color32::from_rgb(0, 0, 128)),
    ("dodgerblue", Color32::from_rgb(30, 144, 255)),
    ("turquoise", Color32::from_rgb(64, 224, 208)),
    ("darkviolet", Color32::from_rgb(148, 0, 211)),
    ("darkred", Color32::from_rgb(139, 0, 0)),
    ("lime", Color32::from_rgb(0, 255, 0)),
    ("gold", Color32::from_rgb(255, 215, 0)),
    ("steelblue", Color32::from_rgb(70, 130, 180)),
    ("cyan", Color32::from_rgb(0, 255, 255)),
    ("darkgreen", Color32::from_rgb(0, 100, 0)),
    ("olive", Color32::from_rgb(128, 128, 0)),
    ("black", Color32::from_rgb(0, 0, 0)),
];

/// Colour name and value for the item at `index`.
pub fn palette_color(index: usize) -> (&'static str, Color32) {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone)]
pub struct DataItem {
    pub id: ItemId,
    pub name: String,
    pub series: Series,
    pub visible: bool,
    pub color: Color32,
    pub color_name: &'static str,
    pub markings: Vec<Marking>,
    /// Markings removed by the user, kept so an export can report deletions.
    pub deleted_markings: Vec<Marking>,
}

impl DataItem {
    pub fn metadata(&self) -> &Metadata {
        &self.series.metadata
    }

    /// `true` if every key/value pair of `query` is present in this item's metadata.
    pub fn metadata_matches(&self, query: &Metadata) -> bool {
        !query.is_empty()
            && query
                .iter()
                .all(|(k, v)| self.series.metadata.get(k) == Some(v))
    }

    pub fn remove_marking(&mut self, index: usize) -> Option<Marking> {
        if index >= self.markings.len() {
            return None;
        }
        let marking = self.markings.remove(index);
        self.deleted_markings.push(marking.clone());
        Some(marking)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Model {
    items: Vec<DataItem>,
    xaxis_unit: Option<IndexKind>,
    total_items_ever_added: u64,
    current_label: Option<Label>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[DataItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [DataItem] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&DataItem> {
        self.items.iter().find(|it| it.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut DataItem> {
        self.items.iter_mut().find(|it| it.id == id)
    }

    pub fn xaxis_unit(&self) -> Option<IndexKind> {
        self.xaxis_unit
    }

    pub fn xaxis_is_time(&self) -> bool {
        self.xaxis_unit == Some(IndexKind::Time)
    }

    pub fn current_label(&self) -> Option<Label> {
        self.current_label
    }

    pub fn set_current_label(&mut self, label: Option<Label>) {
        self.current_label = label;
    }

    /// Add a validated series. `name` overrides the series' own name.
    pub fn add_series(&mut self, series: Series, name: Option<String>) -> Result<ItemId> {
        series.validate()?;
        let unit = *self.xaxis_unit.get_or_insert(series.index);
        check_unit(unit, series.index)?;

        let (color_name, color) = palette_color(self.items.len());
        let name = match name.or_else(|| series.name.clone()) {
            Some(n) => n,
            None => {
                let n = format!("{} - {}", color_name, series.len());
                tracing::warn!(
                    "Found no name for series, using color and number of values: \"{}\"",
                    n
                );
                n
            }
        };
        if series.is_empty() {
            tracing::warn!("Series '{}' is empty, it will not be drawn", name);
        }

        self.total_items_ever_added += 1;
        let id = self.total_items_ever_added;
        tracing::debug!("Adding item #{} '{}' ({} values)", id, name, series.len());
        self.items.push(DataItem {
            id,
            name,
            series,
            visible: true,
            color,
            color_name,
            markings: Vec::new(),
            deleted_markings: Vec::new(),
        });
        Ok(id)
    }

    /// Add several series. Either all of them are added or, if any is
    /// invalid or does not fit the x-axis, none is.
    pub fn add_all<I>(&mut self, seria: I) -> Result<Vec<ItemId>>
    where
        I: IntoIterator<Item = Series>,
    {
        let seria: Vec<Series> = seria.into_iter().collect();
        let mut unit = self.xaxis_unit;
        for s in seria.iter() {
            s.validate()?;
            check_unit(*unit.get_or_insert(s.index), s.index)?;
        }
        seria
            .into_iter()
            .map(|s| self.add_series(s, None))
            .collect()
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<DataItem> {
        let pos = self.items.iter().position(|it| it.id == id)?;
        let item = self.items.remove(pos);
        tracing::info!("Removed item '{}'", item.name);
        Some(item)
    }

    pub fn remove_items(&mut self, ids: &[ItemId]) -> usize {
        ids.iter()
            .filter_map(|id| self.remove_item(*id))
            .count()
    }

    // ── Visibility ───────────────────────────────────────────────────────────

    pub fn set_all_visible(&mut self, visible: bool) {
        for it in self.items.iter_mut() {
            it.visible = visible;
        }
    }

    pub fn invert_visibility(&mut self) {
        for it in self.items.iter_mut() {
            it.visible = !it.visible;
        }
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &DataItem> {
        self.items.iter().filter(|it| it.visible)
    }

    /// Visible items, or all items if none is visible.
    pub fn items_for_limits(&self) -> Vec<&DataItem> {
        let visible: Vec<&DataItem> = self.visible_items().collect();
        if visible.is_empty() {
            self.items.iter().collect()
        } else {
            visible
        }
    }

    /// `((x_min, x_max), (y_min, y_max))` over [`Self::items_for_limits`].
    pub fn data_limits(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut limits: Option<((f64, f64), (f64, f64))> = None;
        for it in self.items_for_limits() {
            let (Some(x0), Some(x1), Some((y0, y1))) =
                (it.series.first_x(), it.series.last_x(), it.series.y_range())
            else {
                continue;
            };
            limits = Some(match limits {
                None => ((x0, x1), (y0, y1)),
                Some(((ax0, ax1), (ay0, ay1))) => {
                    ((ax0.min(x0), ax1.max(x1)), (ay0.min(y0), ay1.max(y1)))
                }
            });
        }
        limits
    }

    // ── Markings ─────────────────────────────────────────────────────────────

    /// Mark `[start, end]` on every visible item with the current label.
    ///
    /// Returns the number of markings created (zero if no label is selected).
    pub fn new_marking(&mut self, start: f64, end: f64) -> usize {
        let Some(label) = self.current_label else {
            tracing::info!("No label mode selected. Select one and try again");
            return 0;
        };
        let mut n = 0;
        for it in self.items.iter_mut().filter(|it| it.visible) {
            it.markings.push(Marking::new(start, end, label));
            n += 1;
        }
        if n > 0 {
            tracing::info!("Marked {} <==> {} ({}) as {}", start, end, end - start, label);
        }
        n
    }

    pub fn add_marking(&mut self, id: ItemId, marking: Marking) -> bool {
        match self.get_mut(id) {
            Some(it) => {
                it.markings.push(marking);
                true
            }
            None => false,
        }
    }

    /// Add markings to every item whose metadata matches `query`.
    pub fn add_markings_matching(&mut self, query: &Metadata, markings: &[Marking]) -> usize {
        if query.is_empty() {
            tracing::error!(
                "Won't add markings without item metadata to match against ({} markings)",
                markings.len()
            );
            return 0;
        }
        let mut n = 0;
        for it in self.items.iter_mut().filter(|it| it.metadata_matches(query)) {
            it.markings.extend(markings.iter().cloned());
            n += markings.len();
        }
        n
    }

    /// Relabel a marking with the current label.
    pub fn relabel_marking(&mut self, id: ItemId, index: usize) -> bool {
        let Some(label) = self.current_label else {
            tracing::error!("Current label not set");
            return false;
        };
        match self.get_mut(id).and_then(|it| it.markings.get_mut(index)) {
            Some(m) => {
                m.label = label;
                true
            }
            None => false,
        }
    }

    pub fn remove_marking(&mut self, id: ItemId, index: usize) -> Option<Marking> {
        let item = self.get_mut(id)?;
        let removed = item.remove_marking(index)?;
        tracing::info!(
            "Removed '{}' {} <==> {} ({}) {}",
            item.name,
            removed.start,
            removed.end,
            removed.width(),
            removed.label
        );
        Some(removed)
    }

    /// Remove markings lying strictly inside `(x0, x1)`.
    pub fn delete_markings_in_interval(&mut self, x0: f64, x1: f64, only_visible: bool) -> usize {
        let mut n = 0;
        for it in self
            .items
            .iter_mut()
            .filter(|it| it.visible || !only_visible)
        {
            let mut i = 0;
            while i < it.markings.len() {
                if it.markings[i].is_strictly_inside(x0, x1) {
                    it.remove_marking(i);
                    n += 1;
                } else {
                    i += 1;
                }
            }
        }
        n
    }

    pub fn delete_all_markings_for_visible(&mut self) -> usize {
        let mut n = 0;
        for it in self.items.iter_mut().filter(|it| it.visible) {
            while !it.markings.is_empty() {
                it.remove_marking(0);
                n += 1;
            }
        }
        n
    }

    /// Run gap detection on every visible item and attach the resulting markings.
    pub fn auto_mark_gaps_on_visible(&mut self, gap_limit: f64, label: Label) -> usize {
        let mut n = 0;
        for it in self.items.iter_mut().filter(|it| it.visible) {
            let found = auto_mark_gaps(&it.series.points, gap_limit, label);
            n += found.len();
            it.markings.extend(found);
        }
        tracing::info!("Auto-marked {} gaps wider than {}", n, gap_limit);
        n
    }
}

fn index_word(kind: IndexKind) -> &'static str {
    match kind {
        IndexKind::Number => "numeric",
        IndexKind::Time => "time",
    }
}

fn check_unit(unit: IndexKind, kind: IndexKind) -> Result<()> {
    if unit == kind {
        return Ok(());
    }
    Err(InspectorError::invalid_input(format!(
        "cannot add a {}-indexed series to a {} x-axis",
        index_word(kind),
        index_word(unit)
    )))
}
