use egui_phosphor::regular as icons;

use super::{Panel, PanelContext, PanelState};
use crate::data::model::ItemId;
use crate::data::x_formatter::format_x_full;

pub struct ItemsPanel {
    pub state: PanelState,
    filter: String,
}

impl Default for ItemsPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Items", icons::LIST),
            filter: String::new(),
        }
    }
}

impl ItemsPanel {
    fn matches(&self, name: &str) -> bool {
        self.filter.is_empty() || name.to_lowercase().contains(&self.filter.to_lowercase())
    }
}

impl Panel for ItemsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext<'_>) {
        ui.horizontal(|ui| {
            if ui.button("Show all").clicked() {
                ctx.model.set_all_visible(true);
            }
            if ui.button("Hide all").clicked() {
                ctx.model.set_all_visible(false);
            }
            if ui.button("Invert").clicked() {
                ctx.model.invert_visibility();
            }
        });
        ui.horizontal(|ui| {
            ui.label(icons::MAGNIFYING_GLASS);
            ui.text_edit_singleline(&mut self.filter);
        });
        ui.separator();

        if ctx.model.is_empty() {
            ui.weak("No data loaded. Drop JSON files on the window to load them.");
            return;
        }

        let is_time = ctx.model.xaxis_is_time();
        let mut remove: Option<ItemId> = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for item in ctx.model.items_mut() {
                if !self.matches(&item.name) {
                    continue;
                }
                ui.horizontal(|ui| {
                    ui.checkbox(&mut item.visible, "");
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, item.color);
                    let resp = ui.label(item.name.as_str());
                    let range = match (item.series.first_x(), item.series.last_x()) {
                        (Some(a), Some(b)) => format!(
                            "{} .. {}",
                            format_x_full(a, is_time),
                            format_x_full(b, is_time)
                        ),
                        _ => "empty".to_string(),
                    };
                    resp.on_hover_text(format!(
                        "{} ({})\n{}\n{} markings",
                        item.name,
                        item.color_name,
                        range,
                        item.markings.len()
                    ));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(icons::TRASH).on_hover_text("Remove").clicked() {
                            remove = Some(item.id);
                        }
                        ui.weak(item.series.len().to_string());
                    });
                });
            }
        });

        if let Some(id) = remove {
            if let Some(it) = ctx.model.remove_item(id) {
                tracing::info!("Removed \"{}\"", it.name);
            }
            if ctx.model.is_empty() {
                *ctx.interval = None;
            }
        }
    }
}
