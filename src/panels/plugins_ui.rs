use std::collections::HashMap;

use egui_phosphor::regular as icons;

use super::{Panel, PanelContext, PanelState};
use crate::data::interval::ViewInterval;

/// Floating window with one configuration editor per registered generator.
pub struct PluginsPanel {
    pub state: PanelState,
    editors: HashMap<&'static str, String>,
    commands: HashMap<&'static str, &'static str>,
}

impl Default for PluginsPanel {
    fn default() -> Self {
        let mut state = PanelState::new("Plugins", icons::PLUG);
        state.detached = true;
        Self {
            state,
            editors: HashMap::new(),
            commands: HashMap::new(),
        }
    }
}

impl Panel for PluginsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext<'_>) {
        if ctx.plugins.is_empty() {
            ui.weak("No plugins registered");
            return;
        }
        let mut run: Option<(&'static str, &'static str, String)> = None;
        for plugin in ctx.plugins.iter() {
            let name = plugin.name();
            egui::CollapsingHeader::new(name)
                .default_open(ctx.plugins.len() == 1)
                .show(ui, |ui| {
                    if !plugin.description().is_empty() {
                        ui.label(plugin.description());
                    }
                    let text = self.editors.entry(name).or_insert_with(|| {
                        serde_json::to_string_pretty(&plugin.example_config())
                            .unwrap_or_else(|_| "{}".to_string())
                    });
                    ui.add(
                        egui::TextEdit::multiline(&mut *text)
                            .code_editor()
                            .desired_rows(4)
                            .desired_width(f32::INFINITY),
                    );
                    let cmds = plugin.commands();
                    let command = self
                        .commands
                        .entry(name)
                        .or_insert_with(|| cmds.first().copied().unwrap_or(crate::plugins::GENERATE));
                    ui.horizontal(|ui| {
                        if cmds.len() > 1 {
                            egui::ComboBox::from_id_salt(("plugin_cmd", name))
                                .selected_text(*command)
                                .show_ui(ui, |ui| {
                                    for c in cmds {
                                        ui.selectable_value(&mut *command, *c, *c);
                                    }
                                });
                        }
                        if ui.button(format!("{} Run", icons::PLAY)).clicked() {
                            run = Some((name, *command, text.clone()));
                        }
                    });
                });
        }

        if let Some((name, command, text)) = run {
            let res = ctx
                .plugins
                .invoke(name, command, Some(&text))
                .and_then(|seria| ctx.model.add_all(seria))
                .map(|ids| format!("{name} added {} items", ids.len()));
            let ok = res.is_ok();
            ctx.report(name, res);
            if ok && ctx.interval.is_none() {
                *ctx.interval = ViewInterval::preshown(ctx.model);
            }
        }
    }
}
