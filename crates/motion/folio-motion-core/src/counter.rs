//! Counter animator: counts an integer display up from 0 to its target.

use std::rc::Rc;

use log::debug;

use crate::element::{AnimatableElement, ElementKind};
use crate::runner::AnimationRunner;
use crate::surface::Surface;

/// Largest magnitude an `f64` holds exactly.
const F64_EXACT_INT: i64 = 1 << 53;

/// Fractional bits used when scaling targets beyond `F64_EXACT_INT`.
const PROGRESS_BITS: u32 = 52;

/// Text shown at `progress`: `floor(target * progress)` followed by the suffix.
/// Progress `1.0` always shows `target` exactly.
pub fn counter_text(target: i64, suffix: &str, progress: f64) -> String {
    let shown = if progress >= 1.0 {
        target
    } else if target.unsigned_abs() <= F64_EXACT_INT.unsigned_abs() {
        (target as f64 * progress).floor() as i64
    } else {
        // Fixed-point in i128 so large targets keep every digit.
        let scale = 1i128 << PROGRESS_BITS;
        let ticks = (progress.max(0.0) * scale as f64).floor() as i128;
        (i128::from(target) * ticks).div_euclid(scale) as i64
    };
    format!("{shown}{suffix}")
}

#[derive(Clone)]
pub struct CounterAnimator {
    surface: Rc<dyn Surface>,
    runner: AnimationRunner,
    duration_ms: u32,
}

impl CounterAnimator {
    pub fn new(surface: Rc<dyn Surface>, runner: AnimationRunner, duration_ms: u32) -> Self {
        Self {
            surface,
            runner,
            duration_ms,
        }
    }

    /// Start the count-up. Returns `false` (and does nothing) when the element
    /// is not a counter or has already been animated.
    pub fn animate(&self, element: &AnimatableElement) -> bool {
        if element.kind != ElementKind::Counter || !element.claim(self.surface.as_ref()) {
            return false;
        }
        debug!("counter {:?} -> {}{}", element.id, element.target_value, element.suffix);
        let surface = Rc::clone(&self.surface);
        let (id, target, suffix) = (element.id, element.target_value, element.suffix.clone());
        self.runner.run(self.duration_ms, move |progress| {
            surface.set_text(id, &counter_text(target, &suffix, progress));
        });
        true
    }

    /// Show the final value at once, with the same guard as [`Self::animate`].
    pub fn complete(&self, element: &AnimatableElement) -> bool {
        if element.kind != ElementKind::Counter || !element.claim(self.surface.as_ref()) {
            return false;
        }
        self.surface
            .set_text(element.id, &counter_text(element.target_value, &element.suffix, 1.0));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_floors_and_appends_suffix() {
        assert_eq!(counter_text(250, "+", 0.0), "0+");
        assert_eq!(counter_text(250, "+", 0.5), "125+");
        assert_eq!(counter_text(250, "+", 0.999), "249+");
        assert_eq!(counter_text(250, "+", 1.0), "250+");
        assert_eq!(counter_text(7, "", 0.5), "3");
        assert_eq!(counter_text(0, "%", 1.0), "0%");
    }

    #[test]
    fn large_targets_keep_every_digit() {
        let big = (1i64 << 53) + 1;
        assert_eq!(counter_text(big, "", 1.0), big.to_string());
        assert_eq!(counter_text(big, "", 0.5), (big / 2).to_string());
        assert_eq!(counter_text(big, "", 0.0), "0");
        assert_eq!(counter_text(i64::MAX, "", 1.0), i64::MAX.to_string());
        assert_eq!(counter_text(-big, "", 1.0), (-big).to_string());
    }
}
