//! One-shot reveal of skill indicators after page load.
//!
//! Progress bars get their target width and full opacity after a short
//! delay; the stylesheet's transition does the animating. Circles get their
//! percentage copied into a CSS custom property immediately. Values are
//! passed through as written in the markup.

use web_sys::{CssStyleDeclaration, Document};

use crate::config::{RevealConfig, Selectors};
use crate::dom;
use crate::error::Result;
use crate::logging;
use crate::timer::Scheduler;

/// CSS length for a percentage attribute value.
pub fn percent(value: &str) -> String {
    format!("{value}%")
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RevealSummary {
    pub progress_bars: usize,
    pub circles: usize,
}

pub fn run<S: Scheduler>(
    document: &Document,
    selectors: &Selectors,
    config: &RevealConfig,
    scheduler: &S,
) -> Result<RevealSummary> {
    let mut summary = RevealSummary::default();

    for bar in dom::query_all(document, &selectors.progress_bars)? {
        let Some(done) = bar.get_attribute(&config.progress_attribute) else {
            logging::warn(&format!(
                "progress bar without {} attribute skipped",
                config.progress_attribute
            ));
            continue;
        };

        let style = match dom::inline_style(&bar) {
            Ok(style) => style,
            Err(err) => {
                logging::warn(&format!("progress bar skipped: {err}"));
                continue;
            }
        };

        let width = percent(&done);
        scheduler.schedule(
            config.progress_delay(),
            Box::new(move || fill_bar(&style, &width)),
        );
        summary.progress_bars += 1;
    }

    for circle in dom::query_all(document, &selectors.circles)? {
        let Some(value) = circle.get_attribute(&config.circle_attribute) else {
            logging::warn(&format!(
                "circle without {} attribute skipped",
                config.circle_attribute
            ));
            continue;
        };

        let style = match dom::inline_style(&circle) {
            Ok(style) => style,
            Err(err) => {
                logging::warn(&format!("circle skipped: {err}"));
                continue;
            }
        };

        if let Err(err) = style.set_property(&config.circle_property, &percent(&value)) {
            logging::error_with("failed to set circle percentage", &err);
            continue;
        }
        summary.circles += 1;
    }

    Ok(summary)
}

fn fill_bar(style: &CssStyleDeclaration, width: &str) {
    if let Err(err) = style
        .set_property("width", width)
        .and_then(|_| style.set_property("opacity", "1"))
    {
        logging::error_with("failed to fill progress bar", &err);
    }
}
