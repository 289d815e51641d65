//! Browser fetch of the dataset and topology

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use eframe::egui;
use futures_util::future::join;
use tracing::{debug, error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::core::LoadError;

/// A finished fetch, drained by the app in update()
pub enum LoadMessage {
    Dataset(Result<String, LoadError>),
    Topology(Result<String, LoadError>),
}

/// Shared result buffer: fetch tasks push, the app drains
pub type LoadBuffer = Rc<RefCell<VecDeque<LoadMessage>>>;

/// GET `url` and return the body as text
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".into()))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_error)?;
    let resp: Response = resp.dyn_into().map_err(js_error)?;
    if !resp.ok() {
        return Err(LoadError::Fetch(format!("{} returned {}", url, resp.status())));
    }
    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| LoadError::Fetch(format!("{} body is not text", url)))
}

fn js_error(e: JsValue) -> LoadError {
    LoadError::Fetch(format!("{:?}", e))
}

/// Fetch both files concurrently. Each result is delivered as soon as it
/// arrives; if the app is gone by then it is dropped.
pub fn spawn_load(
    csv_url: String,
    topology_url: String,
    buffer: Weak<RefCell<VecDeque<LoadMessage>>>,
    ctx: egui::Context,
) {
    wasm_bindgen_futures::spawn_local(async move {
        info!(csv = %csv_url, topology = %topology_url, "Fetching data");
        let csv = async {
            let result = fetch_text(&csv_url).await;
            if let Err(e) = &result {
                error!(error = %e, url = %csv_url, "Dataset fetch failed");
            }
            deliver(&buffer, LoadMessage::Dataset(result), &ctx);
        };
        let topology = async {
            let result = fetch_text(&topology_url).await;
            if let Err(e) = &result {
                error!(error = %e, url = %topology_url, "Topology fetch failed");
            }
            deliver(&buffer, LoadMessage::Topology(result), &ctx);
        };
        join(csv, topology).await;
    });
}

fn deliver(buffer: &Weak<RefCell<VecDeque<LoadMessage>>>, msg: LoadMessage, ctx: &egui::Context) {
    let Some(buffer) = buffer.upgrade() else {
        debug!("App gone, dropping fetch result");
        return;
    };
    buffer.borrow_mut().push_back(msg);
    ctx.request_repaint();
}
