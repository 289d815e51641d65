//! County health & wealth dashboard
//!
//! Three linked views over one county dataset:
//! - Scatterplot: a wealth attribute against a health attribute
//! - Histogram: distribution of the active attribute
//! - Choropleth: the active attribute per county on a US map
//!
//! `core`, `views` and the coordinator are platform-agnostic and shared with
//! the CLI. The egui shell is only built for WASM.

pub mod coordinator;
pub mod core;
pub mod load_state;
pub mod views;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod app;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod fetch_wasm;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod theme;

pub use coordinator::Dashboard;
pub use load_state::LoadState;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("canvas"))
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok());
        let Some(canvas) = canvas else {
            tracing::error!("No canvas element found");
            return;
        };

        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(app::DashboardApp::new(cc)))),
            )
            .await;
        if let Err(e) = started {
            tracing::error!(?e, "Failed to start eframe");
        }
    });
}
