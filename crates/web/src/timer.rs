//! Single-shot deferred callbacks.

use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::logging;

/// Runs a task once after a delay.
///
/// Everything on the page runs on the browser's one event loop, so tasks
/// never overlap and need not be `Send`.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        (**self).schedule(delay, task)
    }
}

/// `setTimeout` on the page's window.
#[derive(Clone)]
pub struct WindowScheduler {
    window: web_sys::Window,
}

impl WindowScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Scheduler for WindowScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let closure = Closure::once(move || task());

        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis,
            )
        {
            logging::error_with("setTimeout failed", &err);
        }

        // The browser owns the callback from here on.
        closure.forget();
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    use super::Scheduler;

    struct Pending {
        due: Duration,
        seq: u64,
        task: Box<dyn FnOnce()>,
    }

    /// Test clock: tasks run in due order only when the test advances it.
    #[derive(Default)]
    pub(crate) struct ManualScheduler {
        queue: RefCell<Vec<Pending>>,
        now: Cell<Duration>,
        seq: Cell<u64>,
    }

    impl ManualScheduler {
        pub(crate) fn pending(&self) -> usize {
            self.queue.borrow().len()
        }

        pub(crate) fn now(&self) -> Duration {
            self.now.get()
        }

        /// Time until the next task is due.
        pub(crate) fn next_delay(&self) -> Option<Duration> {
            let now = self.now.get();
            self.queue
                .borrow()
                .iter()
                .min_by_key(|p| (p.due, p.seq))
                .map(|p| p.due - now)
        }

        /// Advance the clock to the next due task and run it.
        /// Returns how far the clock moved.
        pub(crate) fn run_next(&self) -> Option<Duration> {
            let pending = {
                let mut queue = self.queue.borrow_mut();
                let idx = queue
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(idx, _)| idx)?;
                queue.remove(idx)
            };
            let moved = pending.due - self.now.get();
            self.now.set(pending.due);
            (pending.task)();
            Some(moved)
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
            let seq = self.seq.get();
            self.seq.set(seq + 1);
            self.queue.borrow_mut().push(Pending {
                due: self.now.get() + delay,
                seq,
                task,
            });
        }
    }
}
