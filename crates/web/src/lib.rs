//! Portfolio page client.
//!
//! Wires the page's interactive pieces once the DOM is ready: the typing
//! headline, skill reveals, resume upload, contact form and the upload
//! panel toggle. Each piece runs on its own; none share state.

pub mod config;
pub mod contact;
pub mod dom;
pub mod error;
pub mod flash;
pub mod http;
pub mod logging;
pub mod reveal;
pub mod timer;
pub mod toggle;
pub mod typing;
pub mod upload;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub use config::PortfolioConfig;
pub use error::{FlowError, PortfolioError, Result};

#[wasm_bindgen(start)]
pub fn main() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;

    if document.ready_state() != "loading" {
        return init(&window).map_err(report);
    }

    let closure = Closure::once(move || {
        if let Err(err) = init(&window) {
            wasm_bindgen::throw_val(report(err));
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn report(err: PortfolioError) -> JsValue {
    logging::error(&format!("portfolio init failed: {err}"));
    err.into()
}

/// Start every component against the current document.
///
/// The typing headline and the reveals are required; a broken form or toggle
/// is logged and skipped so the rest of the page keeps working.
pub fn init(window: &Window) -> Result<()> {
    let config = PortfolioConfig::from_window(window)?;
    let document = window
        .document()
        .ok_or_else(|| PortfolioError::Js("No document".to_string()))?;
    let scheduler = timer::WindowScheduler::new(window.clone());

    typing::mount(
        &document,
        &config.selectors.typing_display,
        &config.typing,
        scheduler.clone(),
    )?;

    let revealed = reveal::run(&document, &config.selectors, &config.reveal, &scheduler)?;

    if let Err(err) = upload::mount(window, &document, &config, scheduler) {
        logging::warn(&format!("resume upload disabled: {err}"));
    }
    if let Err(err) = contact::mount(window, &document, &config) {
        logging::warn(&format!("contact form disabled: {err}"));
    }
    if let Err(err) = toggle::mount(window, &document, &config.selectors) {
        logging::warn(&format!("upload toggle disabled: {err}"));
    }

    logging::info(&format!(
        "Portfolio initialized ({} progress bars, {} circles)",
        revealed.progress_bars, revealed.circles
    ));
    Ok(())
}
