//! Radial meter animator: sweeps a dial from 0 to `percent / 100 * 360`
//! degrees while a label counts the percentage.

use std::rc::Rc;

use log::debug;

use crate::element::{AnimatableElement, ElementKind, MeterParts};
use crate::runner::AnimationRunner;
use crate::surface::Surface;

/// Both outputs of a meter at one progress value.
#[derive(Clone, Debug, PartialEq)]
pub struct MeterFrame {
    pub label: String,
    pub sweep_deg: f64,
}

pub fn meter_frame(percent: i64, progress: f64) -> MeterFrame {
    let target_deg = percent as f64 / 100.0 * 360.0;
    let shown = (percent as f64 * progress).round() as i64;
    MeterFrame {
        label: format!("{shown}%"),
        sweep_deg: target_deg * progress,
    }
}

fn render(surface: &dyn Surface, parts: MeterParts, frame: &MeterFrame) {
    surface.set_sweep(parts.dial, frame.sweep_deg);
    surface.set_text(parts.label, &frame.label);
}

#[derive(Clone)]
pub struct RadialMeterAnimator {
    surface: Rc<dyn Surface>,
    runner: AnimationRunner,
    duration_ms: u32,
}

impl RadialMeterAnimator {
    pub fn new(surface: Rc<dyn Surface>, runner: AnimationRunner, duration_ms: u32) -> Self {
        Self {
            surface,
            runner,
            duration_ms,
        }
    }

    /// Start the sweep. The element is claimed even when its label or dial is
    /// missing; in that case nothing is rendered.
    pub fn animate(&self, element: &AnimatableElement) -> bool {
        if element.kind != ElementKind::RadialMeter || !element.claim(self.surface.as_ref()) {
            return false;
        }
        let Some(parts) = element.meter else {
            return true;
        };
        debug!("radial meter {:?} -> {}%", element.id, element.target_value);

        // Start from empty even if the first frame lands late.
        render(self.surface.as_ref(), parts, &meter_frame(element.target_value, 0.0));

        let surface = Rc::clone(&self.surface);
        let percent = element.target_value;
        self.runner.run(self.duration_ms, move |progress| {
            render(surface.as_ref(), parts, &meter_frame(percent, progress));
        });
        true
    }

    pub fn complete(&self, element: &AnimatableElement) -> bool {
        if element.kind != ElementKind::RadialMeter || !element.claim(self.surface.as_ref()) {
            return false;
        }
        if let Some(parts) = element.meter {
            render(self.surface.as_ref(), parts, &meter_frame(element.target_value, 1.0));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_endpoints() {
        assert_eq!(
            meter_frame(80, 0.0),
            MeterFrame {
                label: "0%".into(),
                sweep_deg: 0.0
            }
        );
        let end = meter_frame(80, 1.0);
        assert_eq!(end.label, "80%");
        assert!((end.sweep_deg - 288.0).abs() < 1e-9);
    }

    #[test]
    fn label_rounds_to_nearest() {
        assert_eq!(meter_frame(75, 0.5).label, "38%");
        assert_eq!(meter_frame(90, 0.333).label, "30%");
        assert!((meter_frame(50, 0.5).sweep_deg - 90.0).abs() < 1e-9);
    }
}
