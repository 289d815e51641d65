//! Black dashboard theme with a neon accent

use egui::Color32;

use crate::core::color::{self, Rgb};

/// Dark palette; chart colors come from the view configs
pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(14, 14, 14);
    pub const BG_HOVER: Color32 = Color32::from_rgb(28, 28, 28);

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(170, 170, 170);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(90, 90, 90);

    // === Lines & borders ===
    pub const BORDER: Color32 = Color32::from_rgb(40, 40, 40);

    // === Chart cards ===
    // The map ramp ends in black, so charts sit on a light card
    pub const CHART_BG: Color32 = Color32::from_rgb(250, 250, 250);
    pub const CHART_INK: Color32 = Color32::from_rgb(30, 30, 30);
    pub const CHART_GRID: Color32 = Color32::from_rgb(120, 120, 120);
    pub const BORDER_LINE: Color32 = Color32::from_rgb(255, 255, 255);

    // === Status ===
    pub const OK: Color32 = Color32::from_rgb(100, 200, 100);
    pub const PENDING: Color32 = Color32::from_rgb(200, 200, 100);
    pub const FAILED: Color32 = Color32::from_rgb(200, 100, 100);
}

/// Accent used for the active attribute button and selected bars
pub fn accent() -> Color32 {
    to_color32(color::ACCENT)
}

#[inline]
pub fn to_color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

/// Create the dashboard's egui Visuals
pub fn dashboard_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_ELEVATED;
    visuals.extreme_bg_color = BG_PRIMARY;
    visuals.faint_bg_color = BG_ELEVATED;
    visuals.override_text_color = Some(TEXT_PRIMARY);

    visuals.widgets.noninteractive.bg_fill = BG_PRIMARY;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_MUTED);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.inactive.bg_fill = BG_PRIMARY;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    visuals.widgets.inactive.weak_bg_fill = BG_PRIMARY;

    visuals.widgets.hovered.bg_fill = BG_ELEVATED;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, accent());
    visuals.widgets.hovered.weak_bg_fill = BG_ELEVATED;

    visuals.widgets.active.bg_fill = BG_HOVER;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, accent());
    visuals.widgets.active.weak_bg_fill = BG_HOVER;

    // Selected attribute buttons: black text on the accent
    visuals.selection.bg_fill = accent();
    visuals.selection.stroke = egui::Stroke::new(1.0, BG_PRIMARY);

    visuals.hyperlink_color = accent();
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
