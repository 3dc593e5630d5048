//! Outline and detail plots.
//!
//! The outline shows every visible item (decimated when large) with the
//! current interval highlighted; dragging across it selects a new interval and
//! a click recentres the current one. The detail plot shows the interval at full
//! resolution with marking spans. While a label is active a primary drag there
//! creates a marking instead of panning.

use egui::{Color32, PointerButton, Stroke};
use egui_plot::{Legend, Line, Plot, PlotResponse, Points, Polygon};

use super::InspectorApp;
use crate::data::interval::{decimate, ViewInterval};
use crate::data::model::Model;
use crate::data::x_formatter::{format_x, format_x_full};

const OUTLINE_SELECTION: Color32 = Color32::from_rgb(100, 150, 250);
const HOVER_ITEMS: usize = 4;
const MARKER_RADIUS: f32 = 2.0;

fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

/// Corners of the rectangle `[x0, x1] x [y0, y1]`.
fn span(x0: f64, x1: f64, y0: f64, y1: f64) -> Vec<[f64; 2]> {
    vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
}

/// Step outline of `pts`: each value holds back to the previous sample.
pub(super) fn step_points(pts: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(pts.len().saturating_mul(2));
    out.extend(pts.first().copied());
    for w in pts.windows(2) {
        out.push([w[0][0], w[1][1]]);
        out.push(w[1]);
    }
    out
}

/// Pointer X in plot coordinates, if the pointer is known.
fn pointer_x<R>(resp: &PlotResponse<R>) -> Option<f64> {
    resp.response
        .ctx
        .pointer_latest_pos()
        .map(|p| resp.transform.value_from_position(p).x)
}

/// Y extent of the visible items within `[x0, x1]`.
fn y_extent(model: &Model, x0: f64, x1: f64) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for it in model.visible_items() {
        for p in it.series.slice_x(x0, x1) {
            lo = lo.min(p[1]);
            hi = hi.max(p[1]);
        }
    }
    if !lo.is_finite() {
        return None;
    }
    if lo == hi {
        return Some((lo - 0.5, hi + 0.5));
    }
    Some((lo, hi))
}

impl InspectorApp {
    pub(super) fn plot_area(&mut self, ui: &mut egui::Ui) {
        let total = ui.available_height();
        let frac = self.config.view.outline_height_fraction.clamp(0.1, 0.9);
        let outline_h = (total * frac).max(60.0);
        self.outline_plot(ui, outline_h);
        ui.separator();
        self.detail_plot(ui);
    }

    fn refresh_outline(&mut self) {
        let key: Vec<_> = self
            .model
            .items()
            .iter()
            .map(|it| (it.id, it.series.len(), it.visible))
            .collect();
        if key == self.outline.key {
            return;
        }
        let view = &self.config.view;
        self.outline.lines = self
            .model
            .visible_items()
            .map(|it| {
                (
                    it.id,
                    decimate(&it.series.points, view.outline_resample_threshold, view.outline_points),
                )
            })
            .collect();
        self.outline.key = key;
    }

    fn outline_plot(&mut self, ui: &mut egui::Ui, height: f32) {
        self.refresh_outline();
        let is_time = self.model.xaxis_is_time();
        let look = &self.config.appearance;
        let (alpha, width) = (look.data_alpha, look.line_width);
        let selection = with_alpha(OUTLINE_SELECTION, look.span_alpha);
        let interval = self.interval;
        let drag_start = self.outline_drag;
        let y_span = match self.model.data_limits() {
            Some((_, (y0, y1))) if y0 < y1 => (y0, y1),
            Some((_, (y, _))) => (y - 0.5, y + 0.5),
            None => (0.0, 1.0),
        };
        let model = &self.model;
        let lines = &self.outline.lines;

        let plot = Plot::new("inspector_outline")
            .height(height)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_grid(look.show_grid)
            .x_axis_formatter(move |mark, range| {
                let span = range.end() - range.start();
                format_x(mark.value, is_time, if is_time { span } else { mark.step_size })
            });

        let resp = plot.show(ui, |plot_ui| {
            for (id, pts) in lines {
                if let Some(it) = model.get(*id) {
                    plot_ui.line(
                        Line::new(it.name.as_str(), pts.clone())
                            .color(with_alpha(it.color, alpha))
                            .width(width),
                    );
                }
            }
            let (y0, y1) = y_span;
            if let Some(iv) = interval {
                plot_ui.polygon(
                    Polygon::new("interval", span(iv.x0, iv.x1, y0, y1))
                        .fill_color(selection)
                        .stroke(Stroke::new(0.5, selection)),
                );
            }
            if let (Some(start), Some(p)) = (drag_start, plot_ui.pointer_coordinate()) {
                plot_ui.polygon(
                    Polygon::new("selection", span(start, p.x, y0, y1))
                        .fill_color(selection)
                        .stroke(Stroke::new(0.5, selection)),
                );
            }
        });

        let r = &resp.response;
        if r.drag_started_by(PointerButton::Primary) {
            self.outline_drag = pointer_x(&resp);
        } else if r.drag_stopped_by(PointerButton::Primary) {
            if let (Some(start), Some(end)) = (self.outline_drag.take(), pointer_x(&resp)) {
                self.set_interval(ViewInterval::new(start, end));
            }
        } else if r.clicked() {
            if let (Some(iv), Some(x)) = (self.interval, pointer_x(&resp)) {
                let half = iv.width() / 2.0;
                self.set_interval(ViewInterval::new(x - half, x + half));
            }
        }
    }

    fn detail_plot(&mut self, ui: &mut egui::Ui) {
        let is_time = self.model.xaxis_is_time();
        let look = self.config.appearance.clone();
        let labeling = self.model.current_label();
        let push_bounds = if self.interval_dirty {
            self.interval.map(|iv| {
                let (y0, y1) = y_extent(&self.model, iv.x0, iv.x1).unwrap_or((0.0, 1.0));
                let pad = (y1 - y0) * 0.05;
                (iv, y0 - pad, y1 + pad)
            })
        } else {
            None
        };
        self.interval_dirty = false;

        // draw one interval width on either side so panning does not show gaps
        let draw_range = self
            .interval
            .map(|iv| (iv.x0 - iv.width(), iv.x1 + iv.width()));
        let marking_drag = self.marking_drag;
        let model = &self.model;

        let mut plot = Plot::new("inspector_detail")
            .allow_drag(labeling.is_none())
            .allow_double_click_reset(false)
            .show_grid(look.show_grid)
            .x_axis_formatter(move |mark, range| {
                let span = range.end() - range.start();
                format_x(mark.value, is_time, if is_time { span } else { mark.step_size })
            });
        if look.show_legend {
            plot = plot.legend(Legend::default());
        }

        let resp = plot.show(ui, |plot_ui| {
            if let Some((iv, y0, y1)) = push_bounds {
                plot_ui.set_plot_bounds_x(iv.x0..=iv.x1);
                plot_ui.set_plot_bounds_y(y0..=y1);
            }
            for it in model.visible_items() {
                let pts = match draw_range {
                    Some((x0, x1)) => it.series.slice_x(x0, x1).to_vec(),
                    None => it.series.points.clone(),
                };
                let color = with_alpha(it.color, look.data_alpha);
                if look.show_markers {
                    plot_ui.points(
                        Points::new(it.name.as_str(), pts.clone())
                            .radius(MARKER_RADIUS)
                            .color(color),
                    );
                }
                let pts = if look.step_lines { step_points(&pts) } else { pts };
                plot_ui.line(
                    Line::new(it.name.as_str(), pts)
                        .color(color)
                        .width(look.line_width),
                );
            }

            let b = plot_ui.plot_bounds();
            let (y0, y1) = (b.min()[1], b.max()[1]);
            let (vx0, vx1) = (b.min()[0], b.max()[0]);
            for it in model.visible_items() {
                for m in it.markings.iter().filter(|m| m.end >= vx0 && m.start <= vx1) {
                    let fill = with_alpha(m.label.color(), look.span_alpha);
                    plot_ui.polygon(
                        Polygon::new("", span(m.start, m.end, y0, y1))
                            .fill_color(fill)
                            .stroke(Stroke::new(0.5, fill)),
                    );
                }
            }
            if let (Some(label), Some(start), Some(p)) =
                (labeling, marking_drag, plot_ui.pointer_coordinate())
            {
                let fill = with_alpha(label.color(), look.span_alpha);
                plot_ui.polygon(
                    Polygon::new("", span(start, p.x, y0, y1))
                        .fill_color(fill)
                        .stroke(Stroke::new(0.5, fill)),
                );
            }
            plot_ui.pointer_coordinate()
        });

        self.hover = resp.inner.map(|p| self.hover_text(p.x));

        let r = &resp.response;
        if labeling.is_some() {
            if r.drag_started_by(PointerButton::Primary) {
                self.marking_drag = pointer_x(&resp);
            } else if r.drag_stopped_by(PointerButton::Primary) {
                if let (Some(start), Some(end)) = (self.marking_drag.take(), pointer_x(&resp)) {
                    if start != end {
                        let n = self.model.new_marking(start, end);
                        self.status = Some(format!(
                            "Marked {} .. {} on {n} items",
                            format_x_full(start.min(end), is_time),
                            format_x_full(start.max(end), is_time)
                        ));
                    }
                }
            }
        } else {
            self.marking_drag = None;
        }

        // follow pan and zoom so moving left/right continues from what is shown
        if push_bounds.is_none() && !self.model.is_empty() {
            let rx = resp.transform.bounds().range_x();
            if let Some(iv) = ViewInterval::new(*rx.start(), *rx.end()) {
                self.interval = Some(iv);
            }
        }
    }

    /// Values of the visible items nearest to `x`.
    fn hover_text(&self, x: f64) -> String {
        let is_time = self.model.xaxis_is_time();
        let mut parts = vec![format!("x = {}", format_x_full(x, is_time))];
        for it in self.model.visible_items().take(HOVER_ITEMS) {
            if let Some(i) = it.series.nearest_index(x) {
                parts.push(format!("{}: {:.4}", it.name, it.series.points[i][1]));
            }
        }
        parts.join("  |  ")
    }
}
