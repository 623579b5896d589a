//! Contact form submission.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, Window};

use crate::config::{Messages, PortfolioConfig};
use crate::dom;
use crate::error::{js_err, FlowError, PortfolioError, Result};
use crate::http;

/// JSON body posted to the messaging endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: String,
}

/// The four text fields, read at submit time.
pub trait ContactFields {
    fn read(&self) -> ContactMessage;
    fn clear(&self);
}

/// Apply a finished submission to the form and pick the message to show.
///
/// Fields are only emptied once the server accepted the message.
pub fn settle<'a, F: ContactFields>(
    fields: &F,
    messages: &'a Messages,
    outcome: &std::result::Result<(), FlowError>,
) -> &'a str {
    match outcome {
        Ok(()) => {
            fields.clear();
            &messages.message_sent
        }
        Err(_) => &messages.message_failed,
    }
}

/// A text input or a textarea.
enum TextField {
    Input(HtmlInputElement),
    Area(HtmlTextAreaElement),
}

impl TextField {
    fn lookup(document: &Document, selector: &str) -> Result<Self> {
        let element: Element = dom::query(document, selector)?;
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Ok(TextField::Input(input)),
            Err(element) => element,
        };
        element
            .dyn_into::<HtmlTextAreaElement>()
            .map(TextField::Area)
            .map_err(|_| PortfolioError::WrongElementType {
                selector: selector.to_string(),
                expected: "input or textarea",
            })
    }

    fn value(&self) -> String {
        match self {
            TextField::Input(input) => input.value(),
            TextField::Area(area) => area.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            TextField::Input(input) => input.set_value(value),
            TextField::Area(area) => area.set_value(value),
        }
    }
}

struct ContactForm {
    name: TextField,
    email: TextField,
    subject: TextField,
    message: TextField,
}

impl ContactFields for ContactForm {
    fn read(&self) -> ContactMessage {
        ContactMessage {
            name: self.name.value(),
            email: self.email.value(),
            message: self.message.value(),
            subject: self.subject.value(),
        }
    }

    fn clear(&self) {
        for field in [&self.name, &self.email, &self.subject, &self.message] {
            field.set_value("");
        }
    }
}

pub fn mount(window: &Window, document: &Document, config: &PortfolioConfig) -> Result<()> {
    let selectors = &config.selectors;
    let form: HtmlFormElement = dom::query_as(document, &selectors.contact_form, "form")?;
    let fields = Rc::new(ContactForm {
        name: TextField::lookup(document, &selectors.contact_name)?,
        email: TextField::lookup(document, &selectors.contact_email)?,
        subject: TextField::lookup(document, &selectors.contact_subject)?,
        message: TextField::lookup(document, &selectors.contact_message)?,
    });

    let window = window.clone();
    let endpoint = config.endpoints.send_email.clone();
    let messages = Rc::new(config.messages.clone());

    let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
        event.prevent_default();

        let payload = fields.read();
        let fields = fields.clone();
        let window = window.clone();
        let endpoint = endpoint.clone();
        let messages = messages.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = http::post_json(&endpoint, &payload).await;
            if let Err(err) = &outcome {
                crate::logging::warn(&format!("contact submission failed: {err}"));
            }
            let notice = settle(&*fields, &messages, &outcome);
            dom::alert(&window, notice);
        });
    });
    form
        .add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
        .map_err(|err| PortfolioError::Js(js_err(err)))?;
    closure.forget();

    Ok(())
}
