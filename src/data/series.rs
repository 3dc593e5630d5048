//! Series: a named, finite, ordered sequence of numeric samples.
//!
//! X values are either a plain numeric index or seconds since the UNIX epoch
//! (UTC). Construction never validates; [`Series::validate`] does, and every
//! path into the model or the display calls it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{InspectorError, Result};

/// How the X values of a series are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Plain numbers (positions, sample indices, ...).
    #[default]
    Number,
    /// Seconds since the UNIX epoch, UTC.
    Time,
}

/// Free-form key/value information travelling with a series.
pub type Metadata = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    pub name: Option<String>,
    pub index: IndexKind,
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Series {
    /// Build a series plotted against its position (0, 1, 2, ...).
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, y)| [i as f64, y])
            .collect();
        Self {
            points,
            ..Default::default()
        }
    }

    /// Build a numerically indexed series from explicit `[x, y]` pairs.
    pub fn from_points(points: Vec<[f64; 2]>) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }

    /// Build a time indexed series; X values are seconds since the UNIX epoch.
    pub fn from_time_points(points: Vec<[f64; 2]>) -> Self {
        Self {
            index: IndexKind::Time,
            points,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_time_indexed(&self) -> bool {
        self.index == IndexKind::Time
    }

    pub fn first_x(&self) -> Option<f64> {
        self.points.first().map(|p| p[0])
    }

    pub fn last_x(&self) -> Option<f64> {
        self.points.last().map(|p| p[0])
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p[1])
    }

    /// Check that all samples are finite and that X never decreases.
    pub fn validate(&self) -> Result<()> {
        let label = self.name.as_deref().unwrap_or("<unnamed>");
        let mut prev_x = f64::NEG_INFINITY;
        for (i, &[x, y]) in self.points.iter().enumerate() {
            if !x.is_finite() {
                return Err(InspectorError::invalid_input(format!(
                    "series '{label}': index at position {i} is not finite ({x})"
                )));
            }
            if !y.is_finite() {
                return Err(InspectorError::invalid_input(format!(
                    "series '{label}': value at position {i} is not finite ({y})"
                )));
            }
            if x < prev_x {
                return Err(InspectorError::invalid_input(format!(
                    "series '{label}': index decreases at position {i} ({prev_x} -> {x})"
                )));
            }
            prev_x = x;
        }
        Ok(())
    }

    /// Min/max of the Y values, `None` for an empty series.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.values().fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }

    /// Index of the sample whose X is closest to `x`.
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        if self.points.is_empty() {
            return None;
        }
        let i = self.points.partition_point(|p| p[0] < x);
        if i == 0 {
            return Some(0);
        }
        if i >= self.points.len() {
            return Some(self.points.len() - 1);
        }
        let before = x - self.points[i - 1][0];
        let after = self.points[i][0] - x;
        Some(if before <= after { i - 1 } else { i })
    }

    /// Samples with `x0 <= x <= x1`, as a borrowed slice.
    pub fn slice_x(&self, x0: f64, x1: f64) -> &[[f64; 2]] {
        let start = self.points.partition_point(|p| p[0] < x0);
        let end = self.points.partition_point(|p| p[0] <= x1);
        if start >= end {
            &[]
        } else {
            &self.points[start..end]
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON loading
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a JSON document into series.
///
/// Accepted shapes:
/// - `[1, 2, 3]`: values against their position
/// - `[[x, y], ...]`: explicit pairs
/// - `{"series": <array>, "name": "...", "metadata": {...}, "time": true}`
/// - `{"name_a": <any of the above>, ...}`: named series
/// - an array of any of the above
pub fn load_json(text: &str) -> Result<Vec<Series>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| InspectorError::invalid_input(format!("malformed JSON data: {e}")))?;
    let mut out = Vec::new();
    collect_series(&value, None, &mut out)?;
    Ok(out)
}

/// Read a JSON data file (see [`load_json`]). Unnamed series are named
/// `<file name>_<position>`.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<Series>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| InspectorError::file(path, e))?;
    let mut seria = load_json(&text)?;
    let prefix = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    for (idx, s) in seria.iter_mut().enumerate() {
        if s.name.is_none() {
            s.name = Some(format!("{prefix}_{idx}"));
        }
    }
    Ok(seria)
}

fn collect_series(value: &Value, name: Option<&str>, out: &mut Vec<Series>) -> Result<()> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                out.push(named(Series::default(), name));
                return Ok(());
            }
            match &items[0] {
                Value::Number(_) => {
                    let series = Series::from_values(numbers(items)?);
                    series.validate()?;
                    out.push(named(series, name));
                }
                Value::Array(pair) if pair.len() == 2 && pair[0].is_number() => {
                    let series = Series::from_points(pairs(items)?);
                    series.validate()?;
                    out.push(named(series, name));
                }
                _ => {
                    for item in items {
                        collect_series(item, None, out)?;
                    }
                }
            }
        }
        Value::Object(map) => {
            if let Some(data) = map.get("series") {
                let mut inner = Vec::new();
                collect_series(data, None, &mut inner)?;
                if inner.len() != 1 {
                    return Err(InspectorError::invalid_input(
                        "'series' entry must hold exactly one series",
                    ));
                }
                let mut series = inner.remove(0);
                series.name = map
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .or_else(|| name.map(str::to_string));
                if map.get("time").and_then(Value::as_bool).unwrap_or(false) {
                    series.index = IndexKind::Time;
                }
                if let Some(Value::Object(meta)) = map.get("metadata") {
                    series.metadata = meta.clone().into_iter().collect();
                }
                out.push(series);
            } else {
                for (key, sub) in map {
                    collect_series(sub, Some(key), out)?;
                }
            }
        }
        other => {
            return Err(InspectorError::invalid_input(format!(
                "cannot load object as series: {}",
                truncate(&other.to_string(), 100)
            )));
        }
    }
    Ok(())
}

fn named(series: Series, name: Option<&str>) -> Series {
    match name {
        Some(n) => series.with_name(n),
        None => series,
    }
}

fn numbers(items: &[Value]) -> Result<Vec<f64>> {
    items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64().ok_or_else(|| {
                InspectorError::invalid_input(format!(
                    "non-numeric value at position {i}: {}",
                    truncate(&v.to_string(), 40)
                ))
            })
        })
        .collect()
}

fn pairs(items: &[Value]) -> Result<Vec<[f64; 2]>> {
    items
        .iter()
        .enumerate()
        .map(|(i, v)| match v.as_array().map(|p| p.as_slice()) {
            Some([x, y]) => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => Ok([x, y]),
                _ => Err(InspectorError::invalid_input(format!(
                    "non-numeric pair at position {i}"
                ))),
            },
            _ => Err(InspectorError::invalid_input(format!(
                "expected [x, y] pair at position {i}"
            ))),
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    }
}
