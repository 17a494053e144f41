//! Visibility observation and capability selection.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

/// What an intersection callback wants done with its subscription.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observation {
    /// Keep notifying on later upward crossings.
    Keep,
    /// Unobserve once the callback returns.
    Done,
}

/// How a triggered element should reach its final state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pace {
    /// Interpolate over frames.
    Animated,
    /// Jump to the final state synchronously, no frames.
    Instant,
}

/// Handle returned by [`VisibilityObserver::observe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u32,
    pub element: ElementId,
}

/// Called with the intersecting element each time its visible fraction
/// crosses the threshold going upward.
pub type IntersectFn = Box<dyn FnMut(ElementId) -> Observation>;

/// Platform visibility primitive.
///
/// Observers never unsubscribe on their own. A callback returning
/// [`Observation::Done`] asks the observer to unobserve after the callback
/// has returned, so callbacks never re-enter the observer.
pub trait VisibilityObserver {
    fn observe(&self, element: ElementId, threshold: f64, on_intersect: IntersectFn) -> Subscription;
    fn unobserve(&self, subscription: Subscription);
}

/// Visibility capability, chosen once when the page boots.
#[derive(Clone)]
pub enum Visibility {
    /// A real observer is available.
    Observed(Rc<dyn VisibilityObserver>),
    /// No observation primitive: every watched element triggers immediately,
    /// at [`Pace::Instant`].
    Immediate,
}

impl Visibility {
    pub fn observed(observer: Rc<dyn VisibilityObserver>) -> Self {
        Visibility::Observed(observer)
    }

    pub fn is_immediate(&self) -> bool {
        matches!(self, Visibility::Immediate)
    }

    pub fn observer(&self) -> Option<&Rc<dyn VisibilityObserver>> {
        match self {
            Visibility::Observed(observer) => Some(observer),
            Visibility::Immediate => None,
        }
    }

    /// Watch `element`, calling `on_trigger` with the pace the element should
    /// use. Immediate mode calls it synchronously, once, and returns `None`.
    pub fn watch<F>(&self, element: ElementId, threshold: f64, mut on_trigger: F) -> Option<Subscription>
    where
        F: FnMut(ElementId, Pace) -> Observation + 'static,
    {
        match self {
            Visibility::Observed(observer) => Some(observer.observe(
                element,
                threshold,
                Box::new(move |el| on_trigger(el, Pace::Animated)),
            )),
            Visibility::Immediate => {
                on_trigger(element, Pace::Instant);
                None
            }
        }
    }
}

impl std::fmt::Debug for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Observed(_) => f.write_str("Visibility::Observed"),
            Visibility::Immediate => f.write_str("Visibility::Immediate"),
        }
    }
}
