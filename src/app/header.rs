//! Header: attribute pickers and load status

use eframe::egui;

use super::DashboardApp;
use crate::core::{Attribute, AttributeKind};
use crate::load_state::LoadState;
use crate::theme::{accent, colors};

impl DashboardApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        let selection = self.dashboard.selection();

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("County Health & Wealth").color(colors::TEXT_PRIMARY).size(16.0));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let color = match &self.load_state {
                    LoadState::Ready => colors::OK,
                    LoadState::Loading { .. } => colors::PENDING,
                    LoadState::Failed(_) => colors::FAILED,
                };
                ui.colored_label(color, egui::RichText::new(self.load_state.label()).size(11.0));

                if self.dashboard.is_dataset_ready() {
                    ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                    ui.label(
                        egui::RichText::new(format!("{} counties", self.dashboard.dataset().len()))
                            .color(colors::TEXT_MUTED)
                            .monospace(),
                    );
                }
            });
        });

        ui.add_space(4.0);

        let picked = self.attribute_row(
            ui,
            "Health",
            Attribute::HEALTH,
            selection.health,
            selection.active == AttributeKind::Health,
        );
        if let Some(attr) = picked {
            self.dashboard.select_health(attr);
        }

        let picked = self.attribute_row(
            ui,
            "Wealth",
            Attribute::WEALTH,
            selection.wealth,
            selection.active == AttributeKind::Wealth,
        );
        if let Some(attr) = picked {
            self.dashboard.select_wealth(attr);
        }
    }

    /// One row of attribute buttons; returns the attribute clicked, if any
    fn attribute_row(
        &self,
        ui: &mut egui::Ui,
        title: &str,
        attrs: &[Attribute],
        current: Attribute,
        row_active: bool,
    ) -> Option<Attribute> {
        let mut picked = None;
        ui.horizontal(|ui| {
            let title_color = if row_active { accent() } else { colors::TEXT_SECONDARY };
            ui.add_sized(
                [60.0, 18.0],
                egui::Label::new(egui::RichText::new(title).color(title_color)),
            );

            for &attr in attrs {
                let selected = attr == current;
                // The active attribute gets black text on the accent fill
                let text_color = match (selected, row_active) {
                    (true, true) => colors::BG_PRIMARY,
                    (true, false) => colors::TEXT_PRIMARY,
                    _ => colors::TEXT_SECONDARY,
                };
                let response = ui.selectable_label(
                    selected && row_active,
                    egui::RichText::new(attr.label()).color(text_color),
                );
                if response.clicked() && !(selected && row_active) {
                    picked = Some(attr);
                }
            }
        });
        picked
    }
}
