//! Browser console logging.

use wasm_bindgen::JsValue;

pub fn info(message: &str) {
    web_sys::console::log_1(&message.into());
}

pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

pub fn error(message: &str) {
    web_sys::console::error_1(&message.into());
}

/// Log a message together with the raw JS error object so devtools can
/// show its stack.
pub fn error_with(message: &str, err: &JsValue) {
    web_sys::console::error_2(&message.into(), err);
}
