//! Export of loaded data and markings.
//!
//! Data is written as long-format CSV (`series,x,value`). Markings are written
//! as JSON, one record per item, carrying the item's metadata so they can be
//! matched back onto the same data when imported again.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::markings::Marking;
use crate::data::model::Model;
use crate::data::series::Metadata;
use crate::data::x_formatter::format_time_full;
use crate::error::{InspectorError, Result};

/// Write the visible items as CSV to `w`.
pub fn write_visible_csv<W: Write>(w: &mut W, model: &Model) -> std::io::Result<()> {
    let is_time = model.xaxis_is_time();
    writeln!(w, "series,{},value", if is_time { "time" } else { "x" })?;
    for it in model.visible_items() {
        let name = csv_field(&it.name);
        for p in it.series.points.iter() {
            if is_time {
                writeln!(w, "{},{},{}", name, format_time_full(p[0]), p[1])?;
            } else {
                writeln!(w, "{},{},{}", name, p[0], p[1])?;
            }
        }
    }
    Ok(())
}

pub fn save_visible_csv<P: AsRef<Path>>(path: P, model: &Model) -> Result<()> {
    let path = path.as_ref();
    let mut f = std::fs::File::create(path).map_err(|e| InspectorError::file(path, e))?;
    write_visible_csv(&mut f, model).map_err(|e| InspectorError::file(path, e))?;
    tracing::info!("Saved visible data to {:?}", path);
    Ok(())
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Markings of one item, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMarkings {
    pub name: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub markings: Vec<Marking>,
    #[serde(default)]
    pub deleted: Vec<Marking>,
}

/// Collect markings of visible items (or all items).
pub fn collect_markings(model: &Model, only_visible: bool) -> Vec<ItemMarkings> {
    model
        .items()
        .iter()
        .filter(|it| it.visible || !only_visible)
        .map(|it| ItemMarkings {
            name: it.name.clone(),
            metadata: it.metadata().clone(),
            markings: it.markings.clone(),
            deleted: it.deleted_markings.clone(),
        })
        .collect()
}

pub fn save_markings_json<P: AsRef<Path>>(path: P, model: &Model, only_visible: bool) -> Result<()> {
    let path = path.as_ref();
    let records = collect_markings(model, only_visible);
    let s = serde_json::to_string_pretty(&records)
        .map_err(|e| InspectorError::Config(format!("Serialization error: {e}")))?;
    std::fs::write(path, s).map_err(|e| InspectorError::file(path, e))?;
    tracing::info!(
        "Saved markings of {} items to {:?}",
        records.len(),
        path
    );
    Ok(())
}

/// Load markings and attach them to matching items.
///
/// Records with metadata are matched on metadata; records without metadata
/// are matched on item name. Returns the number of markings attached.
pub fn load_markings_json<P: AsRef<Path>>(path: P, model: &mut Model) -> Result<usize> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path).map_err(|e| InspectorError::file(path, e))?;
    let records: Vec<ItemMarkings> = serde_json::from_str(&s)
        .map_err(|e| InspectorError::invalid_input(format!("malformed markings file: {e}")))?;
    Ok(apply_markings(model, &records))
}

pub fn apply_markings(model: &mut Model, records: &[ItemMarkings]) -> usize {
    let mut n = 0;
    for rec in records {
        if rec.metadata.is_empty() {
            let ids: Vec<_> = model
                .items()
                .iter()
                .filter(|it| it.name == rec.name)
                .map(|it| it.id)
                .collect();
            for id in ids {
                for m in rec.markings.iter() {
                    if model.add_marking(id, m.clone()) {
                        n += 1;
                    }
                }
            }
        } else {
            n += model.add_markings_matching(&rec.metadata, &rec.markings);
        }
    }
    n
}
