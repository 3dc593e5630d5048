//! The X interval shown in the detail plot, and outline decimation.

use crate::data::model::Model;

/// Share of the first series shown when data is first loaded (1/6).
pub const FRACTION_PRESHOWN: usize = 6;
/// Upper bound on the index of the initial interval end.
pub const MAX_PRESHOWN_INDEX: usize = 50_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewInterval {
    pub x0: f64,
    pub x1: f64,
}

impl ViewInterval {
    /// Build an interval; returns `None` for empty or non-finite spans.
    pub fn new(x0: f64, x1: f64) -> Option<Self> {
        let (x0, x1) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
        if !x0.is_finite() || !x1.is_finite() || x0 == x1 {
            return None;
        }
        Some(Self { x0, x1 })
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn contains(&self, x: f64) -> bool {
        self.x0 <= x && x <= self.x1
    }

    /// The interval of equal width immediately to the left.
    pub fn moved_left(&self) -> Self {
        let w = self.width();
        Self {
            x0: self.x0 - w,
            x1: self.x0,
        }
    }

    /// The interval of equal width immediately to the right.
    pub fn moved_right(&self) -> Self {
        let w = self.width();
        Self {
            x0: self.x1,
            x1: self.x1 + w,
        }
    }

    /// Initial interval for a freshly loaded model: the first 1/6 of the first
    /// item with at least two samples, capped at [`MAX_PRESHOWN_INDEX`] samples.
    /// Without such an item this is [`ViewInterval::maximal`]; an empty model
    /// has no initial interval.
    pub fn preshown(model: &Model) -> Option<Self> {
        if model.is_empty() {
            return None;
        }
        let Some(item) = model.items().iter().find(|it| it.series.len() >= 2) else {
            return Self::maximal(model);
        };
        let pts = &item.series.points;
        let end_idx = (pts.len() / FRACTION_PRESHOWN)
            .min(MAX_PRESHOWN_INDEX)
            .min(pts.len() - 1)
            .max(1);
        Self::new(pts[0][0], pts[end_idx][0]).or_else(|| Self::maximal(model))
    }

    /// Smallest interval covering all visible items (all items if none is visible).
    ///
    /// An empty model yields `[0, 1]`.
    pub fn maximal(model: &Model) -> Option<Self> {
        if model.is_empty() {
            return Self::new(0.0, 1.0);
        }
        let mut first = f64::INFINITY;
        let mut last = f64::NEG_INFINITY;
        for it in model.items_for_limits() {
            if let (Some(a), Some(b)) = (it.series.first_x(), it.series.last_x()) {
                first = first.min(a);
                last = last.max(b);
            }
        }
        Self::new(first, last).or_else(|| {
            // a single sample (or only empty series): centre a unit span on it
            first.is_finite().then(|| Self {
                x0: first - 0.5,
                x1: first + 0.5,
            })
        })
    }
}

/// Points to draw in the outline plot.
///
/// Series below `threshold` samples are drawn as-is; larger ones are decimated
/// to roughly `target` samples by taking every n-th sample (the last sample is
/// always kept so the outline spans the full range).
pub fn decimate(points: &[[f64; 2]], threshold: usize, target: usize) -> Vec<[f64; 2]> {
    if points.len() < threshold || target == 0 {
        return points.to_vec();
    }
    let every = (points.len() / target).max(1);
    let mut out: Vec<[f64; 2]> = points.iter().step_by(every).copied().collect();
    if let (Some(last_out), Some(last)) = (out.last(), points.last()) {
        if last_out[0] != last[0] {
            out.push(*last);
        }
    }
    tracing::debug!("Resampled outline view from {} to {}", points.len(), out.len());
    out
}
