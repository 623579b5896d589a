//! Timed confirmation banner.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use web_sys::HtmlElement;

use crate::logging;
use crate::timer::Scheduler;

/// Shows an element, then hides it once `duration` has passed.
///
/// Each `show` starts a fresh window: a timer armed by an earlier `show`
/// never hides a later one.
pub struct Flash<S> {
    scheduler: S,
    duration: Duration,
    shown: Rc<Cell<u64>>,
    set_visible: Rc<dyn Fn(bool)>,
}

impl<S: Scheduler> Flash<S> {
    pub fn new(scheduler: S, duration: Duration, set_visible: impl Fn(bool) + 'static) -> Self {
        Self {
            scheduler,
            duration,
            shown: Rc::new(Cell::new(0)),
            set_visible: Rc::new(set_visible),
        }
    }

    pub fn show(&self) {
        let ticket = self.shown.get().wrapping_add(1);
        self.shown.set(ticket);
        (self.set_visible)(true);

        let shown = self.shown.clone();
        let set_visible = self.set_visible.clone();
        self.scheduler.schedule(
            self.duration,
            Box::new(move || {
                if shown.get() == ticket {
                    set_visible(false);
                }
            }),
        );
    }
}

/// Visibility callback that flips an element's inline `display`.
pub fn display_toggle(element: HtmlElement) -> impl Fn(bool) + 'static {
    move |visible| {
        let display = if visible { "block" } else { "none" };
        if let Err(err) = element.style().set_property("display", display) {
            logging::error_with("failed to set display", &err);
        }
    }
}
