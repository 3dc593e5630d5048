//! The inspector window.
//!
//! | Sub-module  | Responsibility |
//! | ----------- | -------------- |
//! | [`update`]  | Per-frame hotkeys, top bar, side panels and status bar |
//! | [`plots`]   | Outline and detail plots with interval and marking interaction |
//! | [`run`]     | [`NativeViewer`] and the eframe entry point |

mod plots;
mod run;
mod update;

pub use run::{run_inspector, NativeViewer};

use std::path::PathBuf;

use crate::config::InspectorConfig;
use crate::data::interval::ViewInterval;
use crate::data::markings::Label;
use crate::data::model::{ItemId, Model};
use crate::data::series;
use crate::display::DisplaySession;
use crate::panels::{ItemsPanel, MarkingsPanel, Panel, PluginsPanel};
use crate::plugins::PluginRegistry;

/// `Ctrl+<key>` selects a label.
pub(crate) const LABEL_KEYS: [(egui::Key, Label); 7] = [
    (egui::Key::B, Label::Bfill),
    (egui::Key::N, Label::Ffill),
    (egui::Key::D, Label::Discard),
    (egui::Key::Z, Label::Zero),
    (egui::Key::J, Label::Good),
    (egui::Key::C, Label::Comment),
    (egui::Key::W, Label::LinearFill),
];

pub(crate) fn label_for_key(key: egui::Key) -> Option<Label> {
    LABEL_KEYS.iter().find(|(k, _)| *k == key).map(|(_, l)| *l)
}

pub(crate) fn key_for_label(label: Label) -> Option<egui::Key> {
    LABEL_KEYS.iter().find(|(_, l)| *l == label).map(|(k, _)| *k)
}

/// Decimated copy of the visible items, rebuilt when the model changes.
#[derive(Default)]
pub(crate) struct OutlineCache {
    key: Vec<(ItemId, usize, bool)>,
    lines: Vec<(ItemId, Vec<[f64; 2]>)>,
}

pub struct InspectorApp {
    pub(crate) model: Model,
    pub(crate) plugins: PluginRegistry,
    pub(crate) config: InspectorConfig,

    /// X range shown by the detail plot.
    pub(crate) interval: Option<ViewInterval>,
    /// Push `interval` into the detail plot bounds on the next frame.
    pub(crate) interval_dirty: bool,
    pub(crate) status: Option<String>,

    pub(crate) left_panels: Vec<Box<dyn Panel>>,
    pub(crate) right_panels: Vec<Box<dyn Panel>>,
    pub(crate) detached_panels: Vec<Box<dyn Panel>>,

    /// X where a drag in the outline plot started.
    pub(crate) outline_drag: Option<f64>,
    /// X where a marking drag in the detail plot started.
    pub(crate) marking_drag: Option<f64>,
    pub(crate) outline: OutlineCache,
    pub(crate) hover: Option<String>,
    theme_applied: bool,
}

impl InspectorApp {
    pub fn new(session: DisplaySession) -> Self {
        let DisplaySession {
            model,
            plugins,
            config,
        } = session;
        let mut items = ItemsPanel::default();
        items.state.visible = config.view.show_items_panel;
        let mut markings = MarkingsPanel::default();
        markings.state.visible = config.view.show_markings_panel;
        let interval = ViewInterval::preshown(&model);
        Self {
            model,
            plugins,
            config,
            interval,
            interval_dirty: true,
            status: None,
            left_panels: vec![Box::new(items)],
            right_panels: vec![Box::new(markings)],
            detached_panels: vec![Box::new(PluginsPanel::default())],
            outline_drag: None,
            marking_drag: None,
            outline: OutlineCache::default(),
            hover: None,
            theme_applied: false,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn interval(&self) -> Option<ViewInterval> {
        self.interval
    }

    pub(crate) fn set_interval(&mut self, iv: Option<ViewInterval>) {
        if iv.is_some() {
            self.interval = iv;
            self.interval_dirty = true;
        }
    }

    pub(crate) fn move_left(&mut self) {
        self.set_interval(self.interval.map(|iv| iv.moved_left()));
    }

    pub(crate) fn move_right(&mut self) {
        self.set_interval(self.interval.map(|iv| iv.moved_right()));
    }

    pub(crate) fn show_maximal(&mut self) {
        self.set_interval(ViewInterval::maximal(&self.model));
    }

    /// Load JSON data files, e.g. dropped onto the window. Each file is loaded
    /// completely or not at all.
    pub(crate) fn load_files(&mut self, paths: &[PathBuf]) {
        let mut loaded = 0;
        let mut failed = Vec::new();
        for path in paths {
            match series::load_file(path).and_then(|seria| self.model.add_all(seria)) {
                Ok(ids) => {
                    tracing::info!("Loaded {} series from {}", ids.len(), path.display());
                    loaded += ids.len();
                }
                Err(e) => {
                    tracing::error!("Could not load {}: {}", path.display(), e);
                    failed.push(e.to_string());
                }
            }
        }
        if self.interval.is_none() {
            self.set_interval(ViewInterval::preshown(&self.model));
        }
        self.status = Some(match failed.first() {
            None => format!("Loaded {loaded} series"),
            Some(e) => format!("Loaded {loaded} series, {} files failed: {e}", failed.len()),
        });
    }

    /// Remove markings inside the displayed interval on visible items.
    pub(crate) fn delete_markings_in_view(&mut self) {
        if let Some(iv) = self.interval {
            let n = self.model.delete_markings_in_interval(iv.x0, iv.x1, true);
            self.status = Some(format!("Removed {n} markings"));
        }
    }
}
