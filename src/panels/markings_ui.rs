use egui_phosphor::regular as icons;

use super::{Panel, PanelContext, PanelState};
use crate::app::key_for_label;
use crate::data::export;
use crate::data::markings::Label;
use crate::data::model::ItemId;
use crate::data::x_formatter::format_x_full;

pub struct MarkingsPanel {
    pub state: PanelState,
    gap_limit: Option<f64>,
    gap_label: Label,
    only_visible: bool,
}

impl Default for MarkingsPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Markings", icons::TAG),
            gap_limit: None,
            gap_label: Label::Discard,
            only_visible: true,
        }
    }
}

impl MarkingsPanel {
    fn label_selector(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext<'_>) {
        ui.label("Label mode");
        ui.horizontal_wrapped(|ui| {
            let current = ctx.model.current_label();
            if ui
                .selectable_label(current.is_none(), "none")
                .on_hover_text("Escape")
                .clicked()
            {
                ctx.model.set_current_label(None);
            }
            for label in Label::ALL {
                let text = egui::RichText::new(label.as_str()).color(label.color());
                let mut resp = ui.selectable_label(current == Some(label), text);
                if let Some(key) = key_for_label(label) {
                    resp = resp.on_hover_text(format!("Ctrl+{}", key.name()));
                }
                if resp.clicked() {
                    ctx.model.set_current_label(Some(label));
                }
            }
        });
    }

    fn gap_form(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext<'_>) {
        let limit = self
            .gap_limit
            .get_or_insert(ctx.config.view.default_gap_limit);
        ui.label("Auto-mark gaps");
        ui.horizontal(|ui| {
            ui.label("wider than");
            ui.add(egui::DragValue::new(&mut *limit).speed(1.0).range(0.0..=f64::MAX));
            egui::ComboBox::from_id_salt("gap_label")
                .selected_text(self.gap_label.as_str())
                .show_ui(ui, |ui| {
                    for label in Label::ALL {
                        ui.selectable_value(&mut self.gap_label, label, label.as_str());
                    }
                });
        });
        if ui.button("Mark gaps on visible").clicked() {
            let n = ctx.model.auto_mark_gaps_on_visible(*limit, self.gap_label);
            *ctx.status = Some(format!("Marked {n} gaps"));
        }
    }

    fn file_actions(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext<'_>) {
        ui.checkbox(&mut self.only_visible, "Only visible items");
        ui.horizontal_wrapped(|ui| {
            if ui.button(format!("{} Save markings", icons::FLOPPY_DISK)).clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name("markings.json")
                    .add_filter("JSON", &["json"])
                    .save_file()
                {
                    let res = export::save_markings_json(&path, ctx.model, self.only_visible)
                        .map(|_| format!("Saved markings to {}", path.display()));
                    ctx.report("Saving markings", res);
                }
            }
            if ui.button(format!("{} Load markings", icons::FOLDER_OPEN)).clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .pick_file()
                {
                    let res = export::load_markings_json(&path, ctx.model)
                        .map(|n| format!("Loaded {n} markings from {}", path.display()));
                    ctx.report("Loading markings", res);
                }
            }
            if ui.button(format!("{} Export CSV", icons::EXPORT)).clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name("inspector_export.csv")
                    .add_filter("CSV", &["csv"])
                    .save_file()
                {
                    let res = export::save_visible_csv(&path, ctx.model)
                        .map(|_| format!("Exported visible data to {}", path.display()));
                    ctx.report("Export", res);
                }
            }
        });
    }
}

enum MarkingAction {
    Remove(ItemId, usize),
    Relabel(ItemId, usize),
    Focus(f64, f64),
}

impl Panel for MarkingsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext<'_>) {
        self.label_selector(ui, ctx);
        ui.separator();
        self.gap_form(ui, ctx);
        ui.separator();
        self.file_actions(ui, ctx);
        ui.separator();

        ui.horizontal(|ui| {
            if ui
                .button(format!("{} Clear in view", icons::BROOM))
                .on_hover_text("Remove markings inside the displayed interval")
                .clicked()
            {
                if let Some(iv) = *ctx.interval {
                    let n = ctx.model.delete_markings_in_interval(iv.x0, iv.x1, true);
                    *ctx.status = Some(format!("Removed {n} markings"));
                }
            }
            if ui.button(format!("{} Clear all", icons::TRASH)).clicked() {
                let n = ctx.model.delete_all_markings_for_visible();
                *ctx.status = Some(format!("Removed {n} markings"));
            }
        });

        let is_time = ctx.model.xaxis_is_time();
        let can_relabel = ctx.model.current_label().is_some();
        let mut action = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for it in ctx.model.visible_items() {
                if it.markings.is_empty() {
                    continue;
                }
                egui::CollapsingHeader::new(format!("{} ({})", it.name, it.markings.len()))
                    .id_salt(("markings", it.id))
                    .show(ui, |ui| {
                        for (idx, m) in it.markings.iter().enumerate() {
                            ui.horizontal(|ui| {
                                ui.colored_label(m.label.color(), m.label.as_str());
                                let span = format!(
                                    "{} .. {}",
                                    format_x_full(m.start, is_time),
                                    format_x_full(m.end, is_time)
                                );
                                let resp = ui.link(span);
                                let resp = match &m.note {
                                    Some(note) => resp.on_hover_text(note.as_str()),
                                    None => resp,
                                };
                                if resp.clicked() {
                                    action = Some(MarkingAction::Focus(m.start, m.end));
                                }
                                if ui.small_button(icons::TRASH).clicked() {
                                    action = Some(MarkingAction::Remove(it.id, idx));
                                }
                                if ui
                                    .add_enabled(can_relabel, egui::Button::new(icons::TAG).small())
                                    .on_hover_text("Relabel with the current label")
                                    .clicked()
                                {
                                    action = Some(MarkingAction::Relabel(it.id, idx));
                                }
                            });
                        }
                    });
            }
        });

        match action {
            Some(MarkingAction::Remove(id, idx)) => {
                ctx.model.remove_marking(id, idx);
            }
            Some(MarkingAction::Relabel(id, idx)) => {
                ctx.model.relabel_marking(id, idx);
            }
            Some(MarkingAction::Focus(start, end)) => {
                let pad = (end - start).abs().max(1.0) * 0.5;
                if let Some(iv) = crate::data::interval::ViewInterval::new(start - pad, end + pad) {
                    *ctx.interval = Some(iv);
                }
            }
            None => {}
        }
    }
}
