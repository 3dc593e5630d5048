//! Side panels of the inspector window.
//!
//! Each panel implements [`Panel`] and renders against a [`PanelContext`] that
//! borrows the mutable parts of the application state for one frame.

pub mod items_ui;
pub mod markings_ui;
pub mod plugins_ui;

use crate::config::InspectorConfig;
use crate::data::interval::ViewInterval;
use crate::data::model::Model;
use crate::plugins::PluginRegistry;

pub use items_ui::ItemsPanel;
pub use markings_ui::MarkingsPanel;
pub use plugins_ui::PluginsPanel;

#[derive(Debug, Clone)]
pub struct PanelState {
    pub title: &'static str,
    pub icon: &'static str,
    pub visible: bool,
    /// Rendered in a floating window instead of a side panel.
    pub detached: bool,
}

impl PanelState {
    pub fn new(title: &'static str, icon: &'static str) -> Self {
        Self {
            title,
            icon,
            visible: false,
            detached: false,
        }
    }
}

/// Per-frame view of the application state handed to panels.
pub struct PanelContext<'a> {
    pub model: &'a mut Model,
    pub plugins: &'a PluginRegistry,
    pub config: &'a InspectorConfig,
    pub interval: &'a mut Option<ViewInterval>,
    /// Last status message shown in the bottom bar.
    pub status: &'a mut Option<String>,
}

impl PanelContext<'_> {
    /// Report a result in the status bar and the log.
    pub fn report<E: std::fmt::Display>(&mut self, what: &str, result: Result<String, E>) {
        match result {
            Ok(msg) => {
                tracing::info!("{what}: {msg}");
                *self.status = Some(msg);
            }
            Err(e) => {
                tracing::error!("{what} failed: {e}");
                *self.status = Some(format!("{what} failed: {e}"));
            }
        }
    }
}

pub trait Panel {
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn title(&self) -> &'static str {
        self.state().title
    }

    fn title_and_icon(&self) -> String {
        format!("{} {}", self.state().icon, self.state().title)
    }

    /// Toggle button shown in the top bar.
    fn render_menu(&mut self, ui: &mut egui::Ui, _ctx: &mut PanelContext<'_>) {
        let label = self.title_and_icon();
        let visible = self.state().visible;
        if ui.selectable_label(visible, label).clicked() {
            self.state_mut().visible = !visible;
        }
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext<'_>);
}
