//! Reveal coordinator: wires tagged elements to visibility and dispatches to
//! the counter and radial meter animators on first sight.

use std::rc::Rc;

use log::debug;

use crate::counter::CounterAnimator;
use crate::element::{AnimatableElement, ElementKind, Marker};
use crate::ids::ElementId;
use crate::radial::RadialMeterAnimator;
use crate::surface::Surface;
use crate::visibility::{Observation, Pace, Visibility};

#[derive(Clone)]
pub struct RevealCoordinator {
    surface: Rc<dyn Surface>,
    visibility: Visibility,
    counters: CounterAnimator,
    meters: RadialMeterAnimator,
    reveal_threshold: f64,
    counter_threshold: f64,
}

impl RevealCoordinator {
    pub fn new(
        surface: Rc<dyn Surface>,
        visibility: Visibility,
        counters: CounterAnimator,
        meters: RadialMeterAnimator,
        reveal_threshold: f64,
        counter_threshold: f64,
    ) -> Self {
        Self {
            surface,
            visibility,
            counters,
            meters,
            reveal_threshold,
            counter_threshold,
        }
    }

    /// Observe every reveal element; on first intersection mark it visible,
    /// start its meter if it is one, and stop observing it.
    pub fn wire_reveals(&self, elements: Vec<Rc<AnimatableElement>>) {
        if elements.is_empty() {
            return;
        }
        debug!(
            "wiring {} reveal elements ({:?})",
            elements.len(),
            self.visibility
        );
        for element in elements {
            let surface = Rc::clone(&self.surface);
            let meters = self.meters.clone();
            let id = element.id;
            self.visibility
                .watch(id, self.reveal_threshold, move |_, pace| {
                    surface.set_marker(element.id, Marker::Visible, true);
                    if element.kind == ElementKind::RadialMeter {
                        match pace {
                            Pace::Animated => meters.animate(&element),
                            Pace::Instant => meters.complete(&element),
                        };
                    }
                    Observation::Done
                });
        }
    }

    /// One observer on the container; its first intersection fans out to
    /// every counter inside, then the container is unobserved.
    pub fn wire_counters(&self, container: Option<ElementId>, counters: Vec<Rc<AnimatableElement>>) {
        let Some(container) = container else {
            return;
        };
        if counters.is_empty() {
            return;
        }
        debug!("wiring {} counters under {container:?}", counters.len());
        let animator = self.counters.clone();
        self.visibility
            .watch(container, self.counter_threshold, move |_, pace| {
                for counter in &counters {
                    match pace {
                        Pace::Animated => animator.animate(counter),
                        Pace::Instant => animator.complete(counter),
                    };
                }
                Observation::Done
            });
    }
}
