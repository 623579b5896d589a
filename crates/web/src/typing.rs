//! Typing animation.
//!
//! `TypingAnimator` is the whole cycle as a two-phase state machine with a
//! single [`TypingAnimator::tick`] entry point. `TypingLoop` drives it from a
//! [`Scheduler`] and pushes each frame to a render callback, which on the page
//! writes the text content of the display element.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::TypingConfig;
use crate::error::{PortfolioError, Result};
use crate::timer::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Erasing,
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Text to put on screen, if this step changed it.
    pub render: Option<String>,
    /// Delay before the next step.
    pub next: Duration,
}

/// Type/erase state over a fixed, cyclic phrase list.
///
/// `cursor` counts characters of the current phrase and always stays within
/// `0..=phrase.chars().count()`; `text` is always the first `cursor`
/// characters of the current phrase.
#[derive(Debug, Clone)]
pub struct TypingAnimator {
    phrases: Vec<String>,
    index: usize,
    cursor: usize,
    text: String,
    phase: Phase,
    typing_speed: Duration,
    erasing_speed: Duration,
    display_pause: Duration,
    next_phrase_delay: Duration,
}

impl TypingAnimator {
    pub fn new(config: &TypingConfig) -> Result<Self> {
        if config.phrases.is_empty() {
            return Err(PortfolioError::NoPhrases);
        }

        Ok(Self {
            phrases: config.phrases.clone(),
            index: 0,
            cursor: 0,
            text: String::new(),
            phase: Phase::Typing,
            typing_speed: config.typing_speed(),
            erasing_speed: config.erasing_speed(),
            display_pause: config.display_pause(),
            next_phrase_delay: config.next_phrase_delay(),
        })
    }

    /// Advance by one step.
    pub fn tick(&mut self) -> Tick {
        match self.phase {
            Phase::Typing => match self.phrases[self.index].chars().nth(self.cursor) {
                Some(ch) => {
                    self.text.push(ch);
                    self.cursor += 1;
                    Tick {
                        render: Some(self.text.clone()),
                        next: self.typing_speed,
                    }
                }
                None => {
                    // Phrase complete; hold it on screen.
                    self.phase = Phase::Erasing;
                    Tick {
                        render: None,
                        next: self.display_pause,
                    }
                }
            },
            Phase::Erasing => {
                if self.cursor > 0 {
                    self.text.pop();
                    self.cursor -= 1;
                    Tick {
                        render: Some(self.text.clone()),
                        next: self.erasing_speed,
                    }
                } else {
                    self.index = (self.index + 1) % self.phrases.len();
                    self.phase = Phase::Typing;
                    Tick {
                        render: None,
                        next: self.next_phrase_delay,
                    }
                }
            }
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.index]
    }
}

/// Owns the animator for the page's lifetime and re-arms itself after every
/// step. There is no way to stop it.
pub struct TypingLoop<S> {
    animator: RefCell<TypingAnimator>,
    scheduler: S,
    render: Box<dyn Fn(&str)>,
}

impl<S: Scheduler + 'static> TypingLoop<S> {
    pub fn new(
        animator: TypingAnimator,
        scheduler: S,
        render: impl Fn(&str) + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            animator: RefCell::new(animator),
            scheduler,
            render: Box::new(render),
        })
    }

    /// Run the first step now; every later step is scheduled by the one before.
    pub fn start(self: &Rc<Self>) {
        self.step();
    }

    fn step(self: &Rc<Self>) {
        let tick = self.animator.borrow_mut().tick();
        if let Some(text) = &tick.render {
            (self.render)(text);
        }

        let this = Rc::clone(self);
        self.scheduler.schedule(tick.next, Box::new(move || this.step()));
    }

    pub fn phase(&self) -> Phase {
        self.animator.borrow().phase()
    }

    pub fn text(&self) -> String {
        self.animator.borrow().text().to_string()
    }
}

/// Start the animation on the page's display element.
pub fn mount<S: Scheduler + 'static>(
    document: &web_sys::Document,
    selector: &str,
    config: &TypingConfig,
    scheduler: S,
) -> Result<Rc<TypingLoop<S>>> {
    let display = crate::dom::query(document, selector)?;
    let animator = TypingAnimator::new(config)?;

    let typing = TypingLoop::new(animator, scheduler, move |text| {
        display.set_text_content(Some(text));
    });
    typing.start();
    Ok(typing)
}
