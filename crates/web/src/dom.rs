//! Element lookup helpers. Lookups fail loudly: a missing element means the
//! page and the client disagree about the DOM contract.

use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element};

use crate::error::{js_err, PortfolioError, Result};

pub fn query(document: &Document, selector: &str) -> Result<Element> {
    document
        .query_selector(selector)
        .map_err(|err| PortfolioError::Js(js_err(err)))?
        .ok_or_else(|| PortfolioError::MissingElement(selector.to_string()))
}

/// Look up an element and cast it to a concrete interface.
pub fn query_as<T: JsCast>(
    document: &Document,
    selector: &str,
    expected: &'static str,
) -> Result<T> {
    query(document, selector)?
        .dyn_into::<T>()
        .map_err(|_| PortfolioError::WrongElementType {
            selector: selector.to_string(),
            expected,
        })
}

/// Every matching element, HTML or SVG. An empty match is fine.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|err| PortfolioError::Js(js_err(err)))?;

    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Inline style of any element that has one (`HTMLElement` and `SVGElement`
/// both do).
pub fn inline_style(element: &Element) -> Result<CssStyleDeclaration> {
    js_sys::Reflect::get(element, &"style".into())
        .map_err(|err| PortfolioError::Js(js_err(err)))?
        .dyn_into::<CssStyleDeclaration>()
        .map_err(|_| PortfolioError::WrongElementType {
            selector: element.tag_name().to_lowercase(),
            expected: "styleable element",
        })
}

pub fn alert(window: &web_sys::Window, message: &str) {
    if let Err(err) = window.alert_with_message(message) {
        crate::logging::error_with("alert failed", &err);
    }
}
