//! `fetch` wrappers for the two form endpoints.

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, RequestInit, Response};

use crate::error::{js_err, FlowError};
use crate::logging;

/// 2xx is accepted; anything else is a rejection.
pub fn classify(status: u16) -> Result<(), FlowError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FlowError::Rejected { status })
    }
}

/// POST a JSON body with `Content-Type: application/json`.
pub async fn post_json<T: Serialize>(url: &str, payload: &T) -> Result<(), FlowError> {
    let body = serde_json::to_string(payload)?;

    let headers = Headers::new().map_err(|err| FlowError::Dom(js_err(err)))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|err| FlowError::Dom(js_err(err)))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_headers(headers.as_ref());
    opts.set_body(&JsValue::from_str(&body));

    send(url, &opts).await
}

/// POST multipart form data. The browser picks the boundary.
pub async fn post_form(url: &str, form: &FormData) -> Result<(), FlowError> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(form.as_ref());

    send(url, &opts).await
}

async fn send(url: &str, opts: &RequestInit) -> Result<(), FlowError> {
    let window = web_sys::window().ok_or_else(|| FlowError::Dom("no window".to_string()))?;

    let resp = match JsFuture::from(window.fetch_with_str_and_init(url, opts)).await {
        Ok(resp) => resp,
        Err(err) => {
            logging::error_with(&format!("POST {url} failed"), &err);
            return Err(FlowError::Transport(js_err(err)));
        }
    };

    classify(into_response(url, resp)?.status())
}

/// Cast what `fetch` resolved to. Anything but a `Response` is a transport
/// failure and gets logged like a rejected fetch.
pub fn into_response(url: &str, value: JsValue) -> Result<Response, FlowError> {
    value.dyn_into::<Response>().map_err(|value| {
        logging::error_with(&format!("POST {url} resolved to a non-Response"), &value);
        FlowError::Transport(js_err(value))
    })
}
