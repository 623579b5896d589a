//! Resume upload.
//!
//! A visible button opens the hidden file input. Choosing a file checks its
//! media type on the spot; a PDF is posted with the rest of the enclosing
//! form as multipart data and a confirmation banner is flashed on success.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, File, FormData, HtmlElement, HtmlFormElement, HtmlInputElement, Window};

use crate::config::{Messages, PortfolioConfig};
use crate::dom;
use crate::error::{js_err, FlowError, PortfolioError, Result};
use crate::flash::{display_toggle, Flash};
use crate::http;
use crate::timer::Scheduler;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Field name used when the file input has no `name` of its own.
const DEFAULT_FIELD: &str = "resume";

/// Only a present file of type `application/pdf` may be uploaded.
pub fn validate_media_type(media_type: Option<&str>) -> std::result::Result<(), FlowError> {
    match media_type {
        Some(PDF_MEDIA_TYPE) => Ok(()),
        other => Err(FlowError::InvalidFile {
            media_type: other.filter(|t| !t.is_empty()).map(str::to_string),
        }),
    }
}

/// Message to alert for a failed upload.
pub fn failure_message<'a>(messages: &'a Messages, err: &FlowError) -> &'a str {
    match err {
        FlowError::InvalidFile { .. } => &messages.invalid_file,
        _ => &messages.upload_failed,
    }
}

/// What the upload flow shows the user.
pub trait UploadUi {
    /// Flash the confirmation banner.
    fn confirm(&self);
    /// Tell the user the upload did not go through.
    fn reject(&self, err: &FlowError, message: &str);
}

/// Check the picked file and hand it to `send`, or reject it on the spot.
///
/// `send` only runs for a PDF, so nothing leaves the page otherwise.
pub fn begin<U: UploadUi>(
    ui: &U,
    messages: &Messages,
    media_type: Option<&str>,
    send: impl FnOnce() -> std::result::Result<(), FlowError>,
) {
    if let Err(err) = validate_media_type(media_type).and_then(|()| send()) {
        ui.reject(&err, failure_message(messages, &err));
    }
}

/// Apply the server's answer.
pub fn settle<U: UploadUi>(
    ui: &U,
    messages: &Messages,
    outcome: &std::result::Result<(), FlowError>,
) {
    match outcome {
        Ok(()) => ui.confirm(),
        Err(err) => ui.reject(err, failure_message(messages, err)),
    }
}

struct UploadFlow<S> {
    window: Window,
    form: HtmlFormElement,
    input: HtmlInputElement,
    endpoint: String,
    messages: Messages,
    confirmation: Flash<S>,
}

impl<S: Scheduler> UploadUi for UploadFlow<S> {
    fn confirm(&self) {
        self.confirmation.show();
    }

    fn reject(&self, err: &FlowError, message: &str) {
        crate::logging::warn(&format!("resume upload failed: {err}"));
        dom::alert(&self.window, message);
    }
}

impl<S: Scheduler + 'static> UploadFlow<S> {
    fn payload(&self, file: &File) -> std::result::Result<FormData, FlowError> {
        let data =
            FormData::new_with_form(&self.form).map_err(|err| FlowError::Dom(js_err(err)))?;

        // The input normally sits inside the form; attach it if it does not.
        let name = match self.input.name() {
            name if name.is_empty() => DEFAULT_FIELD.to_string(),
            name => name,
        };
        if !data.has(&name) {
            data.append_with_blob(&name, file)
                .map_err(|err| FlowError::Dom(js_err(err)))?;
        }
        Ok(data)
    }

    /// Runs on the input's `change` event.
    fn on_change(self: &Rc<Self>) {
        let file = self.input.files().and_then(|files| files.get(0));
        let media_type = file.as_ref().map(|f| f.type_());

        begin(&**self, &self.messages, media_type.as_deref(), || {
            let file = file.ok_or(FlowError::InvalidFile { media_type: None })?;
            let data = self.payload(&file)?;

            let flow = Rc::clone(self);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = http::post_form(&flow.endpoint, &data).await;
                settle(&*flow, &flow.messages, &outcome);
            });
            Ok(())
        });
    }
}

pub fn mount<S: Scheduler + 'static>(
    window: &Window,
    document: &Document,
    config: &PortfolioConfig,
    scheduler: S,
) -> Result<()> {
    let selectors = &config.selectors;
    let form: HtmlFormElement = dom::query_as(document, &selectors.resume_form, "form")?;
    let input: HtmlInputElement = dom::query_as(document, &selectors.resume_input, "input")?;
    let button: HtmlElement = dom::query_as(document, &selectors.upload_button, "html element")?;
    let message: HtmlElement = dom::query_as(document, &selectors.upload_message, "html element")?;

    let flow = Rc::new(UploadFlow {
        window: window.clone(),
        form,
        input: input.clone(),
        endpoint: config.endpoints.upload_resume.clone(),
        messages: config.messages.clone(),
        confirmation: Flash::new(
            scheduler,
            config.confirmation_duration(),
            display_toggle(message),
        ),
    });

    {
        let input = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            input.click();
        });
        button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|err| PortfolioError::Js(js_err(err)))?;
        closure.forget();
    }

    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            flow.on_change();
        });
        input
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .map_err(|err| PortfolioError::Js(js_err(err)))?;
        closure.forget();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    use super::*;
    use crate::timer::manual::ManualScheduler;

    /// Records what the user would see; confirmations go through a real `Flash`.
    struct RecordingUi {
        alerts: RefCell<Vec<String>>,
        banner: Rc<RefCell<Vec<(Duration, bool)>>>,
        confirmation: Flash<Rc<ManualScheduler>>,
    }

    impl RecordingUi {
        fn new(scheduler: &Rc<ManualScheduler>) -> Self {
            let banner = Rc::new(RefCell::new(Vec::new()));
            let sink = banner.clone();
            let clock = scheduler.clone();
            let confirmation = Flash::new(
                scheduler.clone(),
                Duration::from_millis(3000),
                move |visible| sink.borrow_mut().push((clock.now(), visible)),
            );
            Self {
                alerts: RefCell::new(Vec::new()),
                banner,
                confirmation,
            }
        }
    }

    impl UploadUi for RecordingUi {
        fn confirm(&self) {
            self.confirmation.show();
        }

        fn reject(&self, _err: &FlowError, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn test_non_pdf_is_rejected_without_sending() {
        let scheduler = Rc::new(ManualScheduler::default());
        let messages = Messages::default();

        for media_type in [Some("image/png"), Some(""), None] {
            let ui = RecordingUi::new(&scheduler);
            let sent = Cell::new(false);
            begin(&ui, &messages, media_type, || {
                sent.set(true);
                Ok(())
            });

            assert!(!sent.get(), "request sent for {media_type:?}");
            assert_eq!(*ui.alerts.borrow(), vec![messages.invalid_file.clone()]);
            assert!(ui.banner.borrow().is_empty());
        }
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_pdf_is_sent() {
        let scheduler = Rc::new(ManualScheduler::default());
        let messages = Messages::default();
        let ui = RecordingUi::new(&scheduler);
        let sent = Cell::new(false);

        begin(&ui, &messages, Some("application/pdf"), || {
            sent.set(true);
            Ok(())
        });

        assert!(sent.get());
        assert!(ui.alerts.borrow().is_empty());
    }

    #[test]
    fn test_payload_failure_is_reported() {
        let scheduler = Rc::new(ManualScheduler::default());
        let messages = Messages::default();
        let ui = RecordingUi::new(&scheduler);

        begin(&ui, &messages, Some("application/pdf"), || {
            Err(FlowError::Dom("FormData unavailable".into()))
        });

        assert_eq!(*ui.alerts.borrow(), vec![messages.upload_failed.clone()]);
    }

    #[test]
    fn test_accepted_upload_flashes_confirmation_for_3000ms() {
        let scheduler = Rc::new(ManualScheduler::default());
        let messages = Messages::default();
        let ui = RecordingUi::new(&scheduler);

        settle(&ui, &messages, &Ok(()));
        assert_eq!(*ui.banner.borrow(), vec![(Duration::ZERO, true)]);
        assert_eq!(scheduler.next_delay(), Some(Duration::from_millis(3000)));

        scheduler.run_next();
        assert_eq!(
            *ui.banner.borrow(),
            vec![(Duration::ZERO, true), (Duration::from_millis(3000), false)]
        );
        assert!(ui.alerts.borrow().is_empty());
    }

    #[test]
    fn test_rejected_or_failed_upload_alerts() {
        let scheduler = Rc::new(ManualScheduler::default());
        let messages = Messages::default();

        let failures = [
            FlowError::Rejected { status: 500 },
            FlowError::Transport("offline".into()),
        ];
        for err in failures {
            let ui = RecordingUi::new(&scheduler);
            settle(&ui, &messages, &Err(err));
            assert_eq!(*ui.alerts.borrow(), vec![messages.upload_failed.clone()]);
            assert!(ui.banner.borrow().is_empty());
        }
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_pdf_accepted() {
        assert!(validate_media_type(Some("application/pdf")).is_ok());
    }

    #[test]
    fn test_other_types_rejected() {
        for media_type in ["image/png", "application/msword", "text/plain", "application/PDF"] {
            match validate_media_type(Some(media_type)) {
                Err(FlowError::InvalidFile { media_type: Some(t) }) => assert_eq!(t, media_type),
                other => panic!("expected rejection for {media_type}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_or_untyped_file_rejected() {
        assert!(matches!(
            validate_media_type(None),
            Err(FlowError::InvalidFile { media_type: None })
        ));
        assert!(matches!(
            validate_media_type(Some("")),
            Err(FlowError::InvalidFile { media_type: None })
        ));
    }

    #[test]
    fn test_failure_message() {
        let messages = Messages::default();
        let invalid = FlowError::InvalidFile { media_type: None };
        assert_eq!(failure_message(&messages, &invalid), messages.invalid_file);

        let rejected = FlowError::Rejected { status: 500 };
        assert_eq!(failure_message(&messages, &rejected), messages.upload_failed);

        let transport = FlowError::Transport("offline".into());
        assert_eq!(failure_message(&messages, &transport), messages.upload_failed);
    }
}
