//! Chart painting
//!
//! Each chart allocates its configured container, forwards the pointer to
//! the dashboard in container pixels, then paints the view's marks.

use eframe::egui;

use super::DashboardApp;
use crate::core::config::Frame;
use crate::theme::{colors, to_color32};
use crate::views::{Axis, Label, Pos, Tooltip};

const TICK_LEN: f32 = 5.0;
const TICK_FONT: f32 = 10.0;

#[inline]
fn to_screen(origin: egui::Pos2, p: Pos) -> egui::Pos2 {
    egui::pos2(origin.x + p[0] as f32, origin.y + p[1] as f32)
}

#[inline]
fn to_local(origin: egui::Pos2, p: egui::Pos2) -> Pos {
    [(p.x - origin.x) as f64, (p.y - origin.y) as f64]
}

/// Container rect on a light card
fn allocate_chart(ui: &mut egui::Ui, frame: &Frame) -> (egui::Response, egui::Painter) {
    let size = egui::vec2(frame.width as f32, frame.height as f32);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
    painter.rect_filled(response.rect, 4.0, colors::CHART_BG);
    (response, painter)
}

fn pointer(response: &egui::Response) -> Option<Pos> {
    response.hover_pos().map(|p| to_local(response.rect.min, p))
}

fn click(response: &egui::Response) -> Option<Pos> {
    if !response.clicked() {
        return None;
    }
    response
        .interact_pointer_pos()
        .map(|p| to_local(response.rect.min, p))
}

fn ink_text(painter: &egui::Painter, pos: egui::Pos2, anchor: egui::Align2, text: &str, size: f32) {
    painter.text(pos, anchor, text, egui::FontId::proportional(size), colors::CHART_INK);
}

/// Horizontal axis along `y`, ticks at their pixel offsets
fn draw_x_axis(painter: &egui::Painter, origin: egui::Pos2, axis: &Axis, y: f64, span: (f64, f64)) {
    let stroke = egui::Stroke::new(1.0, colors::CHART_GRID);
    painter.line_segment([to_screen(origin, [span.0, y]), to_screen(origin, [span.1, y])], stroke);
    for tick in &axis.ticks {
        let at = to_screen(origin, [tick.offset, y]);
        painter.line_segment([at, at + egui::vec2(0.0, TICK_LEN)], stroke);
        ink_text(painter, at + egui::vec2(0.0, TICK_LEN + 1.0), egui::Align2::CENTER_TOP, &tick.label, TICK_FONT);
    }
    if let Some(title) = &axis.title {
        let at = to_screen(origin, [(span.0 + span.1) / 2.0, y]) + egui::vec2(0.0, TICK_LEN + 14.0);
        ink_text(painter, at, egui::Align2::CENTER_TOP, title, 11.0);
    }
}

/// Vertical axis along `x`; the title sits above the axis
fn draw_y_axis(painter: &egui::Painter, origin: egui::Pos2, axis: &Axis, x: f64, span: (f64, f64)) {
    let stroke = egui::Stroke::new(1.0, colors::CHART_GRID);
    painter.line_segment([to_screen(origin, [x, span.0]), to_screen(origin, [x, span.1])], stroke);
    for tick in &axis.ticks {
        let at = to_screen(origin, [x, tick.offset]);
        painter.line_segment([at, at - egui::vec2(TICK_LEN, 0.0)], stroke);
        ink_text(painter, at - egui::vec2(TICK_LEN + 2.0, 0.0), egui::Align2::RIGHT_CENTER, &tick.label, TICK_FONT);
    }
    if let Some(title) = &axis.title {
        let at = to_screen(origin, [x, span.0]) - egui::vec2(0.0, 4.0);
        ink_text(painter, at, egui::Align2::LEFT_BOTTOM, title, 11.0);
    }
}

fn draw_title(painter: &egui::Painter, origin: egui::Pos2, label: &Label) {
    ink_text(painter, to_screen(origin, label.pos), egui::Align2::CENTER_CENTER, &label.text, 14.0);
}

/// Tooltips go on their own layer so they are not clipped to the chart
fn draw_tooltip(ctx: &egui::Context, origin: egui::Pos2, tip: &Tooltip) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Tooltip,
        egui::Id::new("chart_tooltip"),
    ));
    let mut text = tip.title.clone();
    for line in &tip.lines {
        text.push('\n');
        text.push_str(line);
    }
    let galley = painter.layout_no_wrap(text, egui::FontId::proportional(12.0), colors::TEXT_PRIMARY);
    let pad = egui::vec2(6.0, 4.0);
    let rect = egui::Rect::from_min_size(to_screen(origin, tip.pos), galley.size() + pad * 2.0);
    painter.rect_filled(rect, 3.0, colors::BG_ELEVATED);
    painter.galley(rect.min + pad, galley, colors::TEXT_PRIMARY);
}

impl DashboardApp {
    pub(crate) fn render_scatter(&mut self, ui: &mut egui::Ui) {
        let frame = self.dashboard.scatter().config().frame;
        let (response, painter) = allocate_chart(ui, &frame);
        let origin = response.rect.min;
        self.dashboard.scatter_pointer(pointer(&response));

        let view = self.dashboard.scatter();
        for mark in view.marks() {
            painter.circle_filled(
                to_screen(origin, mark.center),
                mark.radius as f32,
                to_color32(mark.fill),
            );
        }

        let m = frame.margin;
        let bottom = m.top + frame.inner_height();
        draw_x_axis(&painter, origin, view.x_axis(), bottom, (m.left, m.left + frame.inner_width()));
        draw_y_axis(&painter, origin, view.y_axis(), m.left, (m.top, bottom));
        if let Some(title) = view.title() {
            draw_title(&painter, origin, &title);
        }
        if let Some(tip) = view.tooltip() {
            draw_tooltip(ui.ctx(), origin, tip);
        }
    }

    pub(crate) fn render_histogram(&mut self, ui: &mut egui::Ui) {
        let frame = self.dashboard.histogram().config().frame;
        let (response, painter) = allocate_chart(ui, &frame);
        let origin = response.rect.min;
        if let Some(pos) = click(&response) {
            self.dashboard.histogram_click(pos);
        }
        self.dashboard.histogram_pointer(pointer(&response));

        let view = self.dashboard.histogram();
        let outline = egui::Stroke::new(2.0, to_color32(view.config().selected_stroke));
        for bar in view.marks() {
            let rect = egui::Rect::from_min_size(
                to_screen(origin, [bar.x, bar.y]),
                egui::vec2(bar.width as f32, bar.height as f32),
            );
            painter.rect_filled(rect, 0.0, to_color32(bar.fill));
            if bar.selected {
                let corners = vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
                painter.add(egui::Shape::closed_line(corners, outline));
            }
        }

        let m = frame.margin;
        let bottom = m.top + frame.inner_height();
        draw_x_axis(&painter, origin, view.x_axis(), bottom, (m.left, m.left + frame.inner_width()));
        draw_y_axis(&painter, origin, view.y_axis(), m.left, (m.top, bottom));
        if let Some(title) = view.title() {
            draw_title(&painter, origin, &title);
        }
        if let Some(tip) = view.tooltip() {
            draw_tooltip(ui.ctx(), origin, tip);
        }
    }

    pub(crate) fn render_map(&mut self, ui: &mut egui::Ui) {
        let frame = self.dashboard.config().choropleth.frame;
        let (response, painter) = allocate_chart(ui, &frame);
        let origin = response.rect.min;
        if let Some(pos) = click(&response) {
            self.dashboard.map_click(pos);
        }
        self.dashboard.map_pointer(pointer(&response));

        let Some(view) = self.dashboard.choropleth() else {
            ink_text(
                &painter,
                response.rect.center(),
                egui::Align2::CENTER_CENTER,
                "Map loading...",
                12.0,
            );
            return;
        };

        // One mesh for every county fill
        let mut mesh = egui::Mesh::default();
        for (shape, fill) in view.shapes().iter().zip(view.fills()) {
            let color = to_color32(*fill);
            for triangle in &shape.triangles {
                let base = mesh.vertices.len() as u32;
                for &p in triangle {
                    mesh.colored_vertex(to_screen(origin, p), color);
                }
                mesh.add_triangle(base, base + 1, base + 2);
            }
        }
        painter.add(egui::Shape::mesh(mesh));

        let border = egui::Stroke::new(0.75, colors::BORDER_LINE);
        for line in view.borders() {
            let points = line.iter().map(|&p| to_screen(origin, p)).collect();
            painter.add(egui::Shape::line(points, border));
        }

        if let Some(legend) = view.legend() {
            let mut ramp = egui::Mesh::default();
            let (x0, x1) = (legend.x as f32, (legend.x + legend.width) as f32);
            for stop in &legend.stops {
                // Low values at the bottom
                let y = (legend.y + legend.height * (1.0 - stop.offset)) as f32;
                let color = to_color32(stop.color);
                ramp.colored_vertex(origin + egui::vec2(x0, y), color);
                ramp.colored_vertex(origin + egui::vec2(x1, y), color);
            }
            for i in 0..legend.stops.len().saturating_sub(1) as u32 {
                let b = i * 2;
                ramp.add_triangle(b, b + 1, b + 2);
                ramp.add_triangle(b + 1, b + 3, b + 2);
            }
            painter.add(egui::Shape::mesh(ramp));

            let stroke = egui::Stroke::new(1.0, colors::CHART_GRID);
            for tick in &legend.axis.ticks {
                let at = to_screen(origin, [legend.axis_x, tick.offset]);
                painter.line_segment([at, at + egui::vec2(TICK_LEN, 0.0)], stroke);
                ink_text(&painter, at + egui::vec2(TICK_LEN + 2.0, 0.0), egui::Align2::LEFT_CENTER, &tick.label, TICK_FONT);
            }
        }

        if let Some(title) = view.title() {
            draw_title(&painter, origin, &title);
        }
        if let Some(tip) = view.tooltip() {
            draw_tooltip(ui.ctx(), origin, tip);
        }
    }
}
