//! WASM dashboard app
//!
//! Owns the `Dashboard` and feeds it fetch results and pointer input. All
//! chart state lives in the views; this layer only paints their marks.

mod charts;
mod header;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use eframe::egui;
use tracing::{error, info, warn};

use crate::core::config::{DEFAULT_CSV_PATH, DEFAULT_TOPOLOGY_PATH};
use crate::core::{parse_dataset, DashboardConfig, Dataset, Topology};
use crate::fetch_wasm::{spawn_load, LoadBuffer, LoadMessage};
use crate::load_state::LoadState;
use crate::theme::{colors, dashboard_visuals};
use crate::Dashboard;

/// Read a string set on `window` by the hosting page
fn window_string(expr: &str) -> Option<String> {
    js_sys::eval(expr).ok().and_then(|v| v.as_string())
}

fn page_config() -> DashboardConfig {
    let Some(text) = window_string("window.__county_vis_config") else {
        return DashboardConfig::default();
    };
    match DashboardConfig::from_json_str(&text) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Bad page config, using defaults");
            DashboardConfig::default()
        }
    }
}

pub struct DashboardApp {
    pub(crate) dashboard: Dashboard,
    pub(crate) load_state: LoadState,
    /// Fetch results, drained in update()
    load_buffer: LoadBuffer,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(dashboard_visuals());

        let config = page_config();
        let csv_url =
            window_string("window.__county_vis_csv").unwrap_or_else(|| DEFAULT_CSV_PATH.to_string());
        let topology_url = window_string("window.__county_vis_topology")
            .unwrap_or_else(|| DEFAULT_TOPOLOGY_PATH.to_string());
        info!(csv = %csv_url, topology = %topology_url, "Data URLs resolved");

        let load_buffer: LoadBuffer = Rc::new(RefCell::new(VecDeque::new()));
        spawn_load(
            csv_url,
            topology_url,
            Rc::downgrade(&load_buffer),
            cc.egui_ctx.clone(),
        );

        Self {
            dashboard: Dashboard::new(config),
            load_state: LoadState::default(),
            load_buffer,
        }
    }

    /// Hand finished fetches to the dashboard
    fn process_loads(&mut self) {
        let messages: Vec<LoadMessage> = self.load_buffer.borrow_mut().drain(..).collect();
        for msg in messages {
            match msg {
                LoadMessage::Dataset(Ok(text)) => {
                    match parse_dataset(&text, &self.dashboard.config().loader) {
                        Ok(dataset) => {
                            self.dashboard.set_dataset(dataset);
                            self.load_state.dataset_loaded();
                        }
                        Err(e) => {
                            error!(error = %e, "Dataset unusable, views stay empty");
                            self.dashboard.set_dataset(Dataset::default());
                            self.load_state.fail(e.to_string());
                        }
                    }
                }
                LoadMessage::Dataset(Err(e)) => {
                    self.dashboard.set_dataset(Dataset::default());
                    self.load_state.fail(e.to_string());
                }
                LoadMessage::Topology(Ok(text)) => {
                    let built = Topology::from_json_str(&text)
                        .and_then(|topology| self.dashboard.set_topology(&topology));
                    match built {
                        Ok(()) => self.load_state.topology_loaded(),
                        Err(e) => {
                            error!(error = %e, "Topology unusable, map not drawn");
                            self.load_state.fail(e.to_string());
                        }
                    }
                }
                LoadMessage::Topology(Err(e)) => self.load_state.fail(e.to_string()),
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_loads();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(8.0))
            .show(ctx, |ui| {
                self.render_header(ui);
                ui.add_space(8.0);

                egui::ScrollArea::both().show(ui, |ui| {
                    ui.horizontal_top(|ui| {
                        self.render_scatter(ui);
                        ui.add_space(10.0);
                        self.render_histogram(ui);
                    });
                    ui.add_space(10.0);
                    self.render_map(ui);
                });
            });
    }
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        self.dashboard.teardown();
    }
}
