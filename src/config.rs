//! Configuration for the inspector window.
//!
//! Every field has a default, so a YAML file only needs the keys it changes.
//! The default location is `~/.inspector/config.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InspectorError, Result};

/// Visual theme of the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// White plot background.
    #[default]
    Light,
    Dark,
}

// ─────────────────────────────────────────────────────────────────────────────
// Appearance
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub theme: Theme,
    /// Line width of data traces.
    pub line_width: f32,
    /// Opacity of data traces (0..=1).
    pub data_alpha: f32,
    /// Opacity of marking spans and the outline selection (0..=1).
    pub span_alpha: f32,
    pub show_legend: bool,
    pub show_grid: bool,
    /// Draw a marker on every sample in the detail plot.
    pub show_markers: bool,
    /// Draw detail traces as steps: each value holds back to the previous sample.
    pub step_lines: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            line_width: 1.1,
            data_alpha: 0.8,
            span_alpha: 0.3,
            show_legend: true,
            show_grid: true,
            show_markers: false,
            step_lines: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Outline / detail views
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Series with at least this many samples are decimated in the outline plot.
    pub outline_resample_threshold: usize,
    /// Approximate number of samples drawn per decimated outline series.
    pub outline_points: usize,
    /// Share of the plot area given to the outline plot.
    pub outline_height_fraction: f32,
    /// Default gap limit offered by the auto-mark-gaps form.
    pub default_gap_limit: f64,
    /// Show the item list on start.
    pub show_items_panel: bool,
    /// Show the markings panel on start.
    pub show_markings_panel: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            outline_resample_threshold: 8000,
            outline_points: 2000,
            outline_height_fraction: 0.3,
            default_gap_limit: crate::data::markings::DEFAULT_GAP_LIMIT,
            show_items_panel: true,
            show_markings_panel: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InspectorConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field            | Purpose |
/// |------------------|---------|
/// | `title`          | Native window title |
/// | `window_size`    | Initial inner size in points |
/// | `appearance`     | Theme, line and span styling |
/// | `view`           | Outline decimation and panel defaults |
/// | `native_options` | Optional eframe options (not persisted) |
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    pub title: String,
    pub window_size: [f32; 2],
    pub appearance: AppearanceConfig,
    pub view: ViewConfig,
    #[serde(skip)]
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            title: "Inspector".to_string(),
            window_size: [1224.0, 720.0],
            appearance: AppearanceConfig::default(),
            view: ViewConfig::default(),
            native_options: None,
        }
    }
}

impl std::fmt::Debug for InspectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InspectorConfig")
            .field("title", &self.title)
            .field("window_size", &self.window_size)
            .field("appearance", &self.appearance)
            .field("view", &self.view)
            .field("native_options", &self.native_options.is_some())
            .finish()
    }
}

impl InspectorConfig {
    /// `~/.inspector/config.yaml`, if `HOME` is set.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(PathBuf::from(home).join(".inspector").join("config.yaml"))
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).map_err(|e| InspectorError::Config(format!("Deserialization error: {e}")))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| InspectorError::Config(format!("Serialization error: {e}")))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|e| InspectorError::file(path, e))?;
        Self::from_yaml_str(&s)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| InspectorError::file(dir, e))?;
            }
        }
        fs::write(path, self.to_yaml_string()?).map_err(|e| InspectorError::file(path, e))
    }

    /// Load the default config file, falling back to defaults if it is missing.
    ///
    /// A file that exists but does not parse is reported and ignored.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_path(&path) {
            Ok(cfg) => {
                tracing::debug!("Loaded configuration from {:?}", path);
                cfg
            }
            Err(e) => {
                tracing::warn!("Ignoring configuration file {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
