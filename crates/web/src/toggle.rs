//! Upload panel show/hide.
//!
//! Visibility is not tracked separately: every click reads the panel's
//! computed `display` and flips it.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::config::Selectors;
use crate::dom;
use crate::error::{js_err, PortfolioError, Result};
use crate::logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

impl Visibility {
    pub fn from_display(display: &str) -> Self {
        if display.trim() == "none" {
            Visibility::Hidden
        } else {
            Visibility::Shown
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Visibility::Hidden => Visibility::Shown,
            Visibility::Shown => Visibility::Hidden,
        }
    }

    /// Inline `display` value that produces this visibility.
    pub fn display(self) -> &'static str {
        match self {
            Visibility::Hidden => "none",
            Visibility::Shown => "block",
        }
    }
}

pub fn visibility(window: &Window, panel: &HtmlElement) -> Result<Visibility> {
    let display = match window
        .get_computed_style(panel)
        .map_err(|err| PortfolioError::Js(js_err(err)))?
    {
        Some(style) => style
            .get_property_value("display")
            .map_err(|err| PortfolioError::Js(js_err(err)))?,
        None => panel
            .style()
            .get_property_value("display")
            .map_err(|err| PortfolioError::Js(js_err(err)))?,
    };
    Ok(Visibility::from_display(&display))
}

/// Flip the panel and return its new visibility.
pub fn toggle(window: &Window, panel: &HtmlElement) -> Result<Visibility> {
    let next = visibility(window, panel)?.toggled();
    panel
        .style()
        .set_property("display", next.display())
        .map_err(|err| PortfolioError::Js(js_err(err)))?;
    Ok(next)
}

pub fn mount(window: &Window, document: &Document, selectors: &Selectors) -> Result<()> {
    let button: HtmlElement = dom::query_as(document, &selectors.toggle_button, "html element")?;
    let panel: HtmlElement = dom::query_as(document, &selectors.upload_panel, "html element")?;

    let window = window.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        if let Err(err) = toggle(&window, &panel) {
            logging::error(&format!("upload panel toggle failed: {err}"));
        }
    });
    button
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .map_err(|err| PortfolioError::Js(js_err(err)))?;
    closure.forget();

    Ok(())
}
