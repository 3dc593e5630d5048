//! Per-frame update: hotkeys, top bar, side panels and the plot area.

use std::path::PathBuf;

use eframe::egui;
use egui_phosphor::regular as icons;

use super::{label_for_key, InspectorApp, LABEL_KEYS};
use crate::config::Theme;
use crate::data::interval::ViewInterval;
use crate::panels::{Panel, PanelContext};

impl InspectorApp {
    fn apply_theme(&mut self, ctx: &egui::Context) {
        if self.theme_applied {
            return;
        }
        let visuals = match self.config.appearance.theme {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        };
        ctx.set_visuals(visuals);
        self.theme_applied = true;
    }

    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        // leave keys to text fields while one has focus
        if ctx.wants_keyboard_input() {
            return;
        }
        let (left, right, home, escape, delete) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Home),
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Delete)
                    || (i.modifiers.command && i.key_pressed(egui::Key::R)),
            )
        });
        let label = ctx.input(|i| {
            if !i.modifiers.command {
                return None;
            }
            // Ctrl+C reaches us as a copy event, not as a key press
            if i.events.iter().any(|e| matches!(e, egui::Event::Copy)) {
                return label_for_key(egui::Key::C);
            }
            LABEL_KEYS
                .iter()
                .map(|(k, _)| *k)
                .find(|k| i.key_pressed(*k))
                .and_then(label_for_key)
        });
        let (invert, hide, markers, steps) = ctx.input(|i| {
            let plain = |k: egui::Key| i.modifiers.is_none() && i.key_pressed(k);
            (
                plain(egui::Key::I),
                plain(egui::Key::H),
                plain(egui::Key::M),
                plain(egui::Key::S),
            )
        });
        if left {
            self.move_left();
        }
        if right {
            self.move_right();
        }
        if home {
            self.show_maximal();
        }
        if escape {
            self.model.set_current_label(None);
            self.marking_drag = None;
        }
        if delete {
            self.delete_markings_in_view();
        }
        if let Some(label) = label {
            self.model.set_current_label(Some(label));
        }
        if invert {
            self.model.invert_visibility();
        }
        if hide {
            self.model.set_all_visible(false);
        }
        let look = &mut self.config.appearance;
        if markers {
            look.show_markers = !look.show_markers;
        }
        if steps {
            look.step_lines = !look.step_lines;
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let paths: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !paths.is_empty() {
            self.load_files(&paths);
        }
    }

    /// Render a list of panels, giving each a [`PanelContext`].
    fn render_panel_list(&mut self, ui: &mut egui::Ui, list: &mut [Box<dyn Panel>]) {
        let before = self.interval;
        let mut pctx = PanelContext {
            model: &mut self.model,
            plugins: &self.plugins,
            config: &self.config,
            interval: &mut self.interval,
            status: &mut self.status,
        };
        for p in list.iter_mut().filter(|p| p.state().visible) {
            if !p.state().detached {
                ui.heading(p.title_and_icon());
            }
            p.render_panel(ui, &mut pctx);
            ui.add_space(8.0);
        }
        if self.interval != before {
            self.interval_dirty = true;
        }
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        let mut lists = [
            std::mem::take(&mut self.left_panels),
            std::mem::take(&mut self.right_panels),
            std::mem::take(&mut self.detached_panels),
        ];
        egui::MenuBar::new().ui(ui, |ui| {
            {
                let mut pctx = PanelContext {
                    model: &mut self.model,
                    plugins: &self.plugins,
                    config: &self.config,
                    interval: &mut self.interval,
                    status: &mut self.status,
                };
                for p in lists.iter_mut().flat_map(|l| l.iter_mut()) {
                    p.render_menu(ui, &mut pctx);
                }
            }
            ui.separator();
            if ui
                .button(icons::ARROW_LEFT)
                .on_hover_text("Previous interval (Left)")
                .clicked()
            {
                self.move_left();
            }
            if ui
                .button(icons::ARROW_RIGHT)
                .on_hover_text("Next interval (Right)")
                .clicked()
            {
                self.move_right();
            }
            if ui
                .button(icons::CORNERS_OUT)
                .on_hover_text("Show everything (Home)")
                .clicked()
            {
                self.show_maximal();
            }
            if ui
                .button(icons::ARROWS_IN_LINE_HORIZONTAL)
                .on_hover_text("Back to the initial interval")
                .clicked()
            {
                self.set_interval(ViewInterval::preshown(&self.model));
            }
            if ui
                .button("Fit")
                .on_hover_text("Fit the y axis to the current interval")
                .clicked()
            {
                self.interval_dirty = true;
            }
            let look = &mut self.config.appearance;
            ui.toggle_value(&mut look.show_markers, "Markers")
                .on_hover_text("Mark every sample in the detail plot (M)");
            ui.toggle_value(&mut look.step_lines, "Steps")
                .on_hover_text("Draw the detail plot as steps (S)");
            ui.separator();
            match self.model.current_label() {
                Some(label) => {
                    ui.colored_label(label.color(), format!("{} {}", icons::TAG, label));
                }
                None => {
                    ui.weak("no label");
                }
            }
        });
        let [left, right, detached] = lists;
        self.left_panels = left;
        self.right_panels = right;
        self.detached_panels = detached;
    }
}

impl eframe::App for InspectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);
        self.handle_hotkeys(ctx);
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("inspector_top_bar").show(ctx, |ui| {
            self.top_bar(ui);
        });

        egui::TopBottomPanel::bottom("inspector_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(iv) = self.interval {
                    let is_time = self.model.xaxis_is_time();
                    ui.label(format!(
                        "{} .. {}",
                        crate::data::x_formatter::format_x_full(iv.x0, is_time),
                        crate::data::x_formatter::format_x_full(iv.x1, is_time)
                    ));
                    ui.separator();
                }
                if let Some(h) = &self.hover {
                    ui.monospace(h.as_str());
                    ui.separator();
                }
                if let Some(s) = &self.status {
                    ui.weak(s.as_str());
                }
            });
        });

        let mut left = std::mem::take(&mut self.left_panels);
        if left.iter().any(|p| p.state().visible) {
            egui::SidePanel::left("inspector_left")
                .resizable(true)
                .default_width(260.0)
                .show(ctx, |ui| {
                    self.render_panel_list(ui, &mut left);
                });
        }
        self.left_panels = left;

        let mut right = std::mem::take(&mut self.right_panels);
        if right.iter().any(|p| p.state().visible) {
            egui::SidePanel::right("inspector_right")
                .resizable(true)
                .default_width(300.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        self.render_panel_list(ui, &mut right);
                    });
                });
        }
        self.right_panels = right;

        let mut detached = std::mem::take(&mut self.detached_panels);
        for p in detached.iter_mut() {
            if !p.state().visible {
                continue;
            }
            let mut open = true;
            let title = p.title_and_icon();
            egui::Window::new(title)
                .open(&mut open)
                .show(ctx, |ui| {
                    self.render_panel_list(ui, std::slice::from_mut(p));
                });
            if !open {
                p.state_mut().visible = false;
            }
        }
        self.detached_panels = detached;

        if self.interval.is_none() && !self.model.is_empty() {
            self.set_interval(ViewInterval::preshown(&self.model));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.plot_area(ui);
        });
    }
}
