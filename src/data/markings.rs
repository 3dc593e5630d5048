//! Labelled intervals ("markings") on a series, and automatic gap detection.

use std::fmt;
use std::str::FromStr;

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Default gap limit for [`auto_mark_gaps`] (seconds on a time axis).
pub const DEFAULT_GAP_LIMIT: f64 = 20.0;

/// What a marked interval means for later cleaning of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Label {
    Bfill,
    Ffill,
    Discard,
    Zero,
    Good,
    Comment,
    LinearFill,
}

impl Label {
    pub const ALL: [Label; 7] = [
        Label::Bfill,
        Label::Ffill,
        Label::Discard,
        Label::Zero,
        Label::Good,
        Label::Comment,
        Label::LinearFill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Bfill => "bfill",
            Label::Ffill => "ffill",
            Label::Discard => "discard",
            Label::Zero => "zero",
            Label::Good => "good",
            Label::Comment => "comment",
            Label::LinearFill => "linear-fill",
        }
    }

    /// Span colour used when drawing markings with this label.
    pub fn color(&self) -> Color32 {
        match self {
            Label::Bfill => Color32::from_rgb(148, 0, 211),
            Label::Ffill => Color32::from_rgb(250, 128, 114),
            Label::Discard => Color32::from_rgb(255, 165, 0),
            Label::Zero => Color32::from_rgb(70, 130, 180),
            Label::Good => Color32::from_rgb(0, 128, 0),
            Label::LinearFill => Color32::from_rgb(255, 105, 180),
            Label::Comment => Color32::from_rgb(143, 188, 143),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Label::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown label '{}'", s))
    }
}

/// A labelled X interval on one data item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marking {
    pub start: f64,
    pub end: f64,
    pub label: Label,
    pub note: Option<String>,
}

impl Marking {
    /// Create a marking; `start` and `end` are swapped if given in reverse.
    pub fn new(start: f64, end: f64, label: Label) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        Self {
            start,
            end,
            label,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Both ends lie strictly inside `(x0, x1)`.
    pub fn is_strictly_inside(&self, x0: f64, x1: f64) -> bool {
        x0 < self.start && self.start < x1 && x0 < self.end && self.end < x1
    }
}

/// Mark every gap between consecutive samples that is wider than `gap_limit`.
///
/// Each returned marking spans from the sample before the gap to the sample after it.
pub fn auto_mark_gaps(points: &[[f64; 2]], gap_limit: f64, label: Label) -> Vec<Marking> {
    points
        .windows(2)
        .filter(|w| w[1][0] - w[0][0] > gap_limit)
        .map(|w| Marking::new(w[0][0], w[1][0], label))
        .collect()
}
