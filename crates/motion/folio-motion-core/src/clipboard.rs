//! Feedback around the copy-email button. The copy itself happens in the
//! adapter; this only reports the outcome and clears it later.

use std::rc::Rc;

use crate::element::Marker;
use crate::ids::ElementId;
use crate::scheduler::Timer;
use crate::surface::Surface;

pub const COPIED_TEXT: &str = "Copied!";
pub const FAILED_TEXT: &str = "Failed";

#[derive(Clone)]
pub struct CopyFeedback {
    surface: Rc<dyn Surface>,
    timer: Rc<dyn Timer>,
    button: ElementId,
    feedback: Option<ElementId>,
    reset_ms: u32,
}

impl CopyFeedback {
    pub fn new(
        surface: Rc<dyn Surface>,
        timer: Rc<dyn Timer>,
        button: ElementId,
        feedback: Option<ElementId>,
        reset_ms: u32,
    ) -> Self {
        Self {
            surface,
            timer,
            button,
            feedback,
            reset_ms,
        }
    }

    pub fn button(&self) -> ElementId {
        self.button
    }

    /// Show the result of a copy attempt and schedule its removal.
    pub fn report(&self, success: bool) {
        if let Some(feedback) = self.feedback {
            self.surface
                .set_text(feedback, if success { COPIED_TEXT } else { FAILED_TEXT });
            self.surface.set_marker(feedback, Marker::FeedbackSuccess, success);
            self.surface.set_marker(feedback, Marker::FeedbackError, !success);
        }
        self.surface.set_marker(self.button, Marker::Copied, true);

        let this = self.clone();
        self.timer
            .set_timeout(self.reset_ms, Box::new(move || this.reset()));
    }

    fn reset(&self) {
        self.surface.set_marker(self.button, Marker::Copied, false);
        if let Some(feedback) = self.feedback {
            self.surface.set_text(feedback, "");
            self.surface.set_marker(feedback, Marker::FeedbackSuccess, false);
            self.surface.set_marker(feedback, Marker::FeedbackError, false);
        }
    }
}
