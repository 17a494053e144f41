//! Typewriter: types and deletes a rotating set of phrases, forever.
//!
//! [`Typewriter`] is the pure state machine; [`TypewriterCycler`] drives it
//! with the deferred [`Timer`], never with the frame scheduler.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::TypewriterConfig;
use crate::error::MotionError;
use crate::ids::ElementId;
use crate::scheduler::Timer;
use crate::surface::Surface;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypewriterPhase {
    Typing,
    PausedAfterTyping,
    Deleting,
    PausedAfterDeleting,
}

/// Result of one step: what to render and when to step again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypewriterStep {
    pub text: String,
    pub delay_ms: u32,
    pub phase: TypewriterPhase,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase_index: usize,
    /// Counted in chars, always within `[0, len(current phrase)]`.
    char_index: usize,
    phase: TypewriterPhase,
    cfg: TypewriterConfig,
}

impl Typewriter {
    pub fn new(cfg: TypewriterConfig) -> Result<Self, MotionError> {
        if cfg.phrases.is_empty() {
            return Err(MotionError::EmptyPhrases);
        }
        Ok(Self {
            phrases: cfg.phrases.clone(),
            phrase_index: 0,
            char_index: 0,
            phase: TypewriterPhase::Typing,
            cfg,
        })
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    pub fn is_deleting(&self) -> bool {
        matches!(
            self.phase,
            TypewriterPhase::Deleting | TypewriterPhase::PausedAfterTyping
        )
    }

    pub fn start_delay_ms(&self) -> u32 {
        self.cfg.start_delay_ms
    }

    fn current(&self) -> &str {
        &self.phrases[self.phrase_index]
    }

    fn visible_text(&self) -> String {
        self.current().chars().take(self.char_index).collect()
    }

    /// Advance one character in the current direction.
    pub fn step(&mut self) -> TypewriterStep {
        let len = self.current().chars().count();
        let delay_ms = if self.is_deleting() {
            self.char_index = self.char_index.saturating_sub(1);
            if self.char_index == 0 {
                self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                self.phase = TypewriterPhase::PausedAfterDeleting;
                self.cfg.pause_after_deleting_ms
            } else {
                self.phase = TypewriterPhase::Deleting;
                self.cfg.delete_ms
            }
        } else {
            self.char_index = (self.char_index + 1).min(len);
            if self.char_index >= len {
                self.phase = TypewriterPhase::PausedAfterTyping;
                self.cfg.pause_after_typing_ms
            } else {
                self.phase = TypewriterPhase::Typing;
                self.cfg.type_ms
            }
        };

        // After a completed deletion the index already points at the next
        // phrase; char_index is 0 so the rendered text is empty either way.
        let text = self.visible_text();
        trace!("typewriter {:?} '{}'", self.phase, text);
        TypewriterStep {
            text,
            delay_ms,
            phase: self.phase,
        }
    }
}

/// Runs a [`Typewriter`] against a display element, forever.
pub struct TypewriterCycler {
    state: Rc<RefCell<Typewriter>>,
}

impl TypewriterCycler {
    /// Schedule the first step after the configured start delay.
    ///
    /// Returns `Ok(None)` without scheduling anything when the display
    /// element is absent.
    pub fn start(
        target: Option<ElementId>,
        cfg: TypewriterConfig,
        surface: Rc<dyn Surface>,
        timer: Rc<dyn Timer>,
    ) -> Result<Option<Self>, MotionError> {
        let Some(target) = target else {
            return Ok(None);
        };
        let machine = Typewriter::new(cfg)?;
        let delay = machine.start_delay_ms();
        let state = Rc::new(RefCell::new(machine));
        debug!("typewriter on {target:?}, first step in {delay}ms");

        let tick_state = Rc::clone(&state);
        let tick_timer = Rc::clone(&timer);
        timer.set_timeout(
            delay,
            Box::new(move || tick(tick_state, target, surface, tick_timer)),
        );
        Ok(Some(Self { state }))
    }

    pub fn phrase_index(&self) -> usize {
        self.state.borrow().phrase_index()
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.state.borrow().phase()
    }
}

fn tick(state: Rc<RefCell<Typewriter>>, target: ElementId, surface: Rc<dyn Surface>, timer: Rc<dyn Timer>) {
    let step = state.borrow_mut().step();
    surface.set_text(target, &step.text);
    let next_timer = Rc::clone(&timer);
    timer.set_timeout(
        step.delay_ms,
        Box::new(move || tick(state, target, surface, next_timer)),
    );
}
