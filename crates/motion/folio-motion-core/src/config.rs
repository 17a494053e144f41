//! Core configuration for folio-motion-core.

use serde::{Deserialize, Serialize};

use crate::error::MotionError;

/// Timing, threshold and content knobs for every page behaviour.
/// All fields default, so adapters may pass a partial JSON object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub thresholds: Thresholds,
    /// Duration of one counter run, in milliseconds.
    pub counter_duration_ms: u32,
    /// Duration of one radial meter sweep, in milliseconds.
    pub meter_duration_ms: u32,
    pub typewriter: TypewriterConfig,
    pub scroll: ScrollConfig,
    /// How long copy feedback stays on screen before it is cleared.
    pub copy_feedback_ms: u32,
}

/// Visible-fraction thresholds for each observer policy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub reveal: f64,
    pub counters: f64,
    pub sections: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    pub type_ms: u32,
    pub delete_ms: u32,
    pub pause_after_typing_ms: u32,
    pub pause_after_deleting_ms: u32,
    pub start_delay_ms: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Navbar gets its "scrolled" marker past this many pixels.
    pub navbar_scrolled_px: f64,
    /// Back-to-top button shows past this many pixels.
    pub back_to_top_px: f64,
    /// Gap kept between the navbar and an anchored section.
    pub anchor_gap_px: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            counter_duration_ms: 1200,
            meter_duration_ms: 1200,
            typewriter: TypewriterConfig::default(),
            scroll: ScrollConfig::default(),
            copy_feedback_ms: 1500,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            reveal: 0.18,
            counters: 0.35,
            sections: 0.35,
        }
    }
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Python & Django Backend Developer".to_string(),
                "REST API & Automation Specialist".to_string(),
                "Building Reliable Backend Systems".to_string(),
            ],
            type_ms: 80,
            delete_ms: 45,
            pause_after_typing_ms: 1400,
            pause_after_deleting_ms: 400,
            start_delay_ms: 400,
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            navbar_scrolled_px: 8.0,
            back_to_top_px: 400.0,
            anchor_gap_px: 12.0,
        }
    }
}

impl MotionConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        let cfg: MotionConfig =
            serde_json::from_str(json).map_err(|e| MotionError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configs the engine cannot honour.
    pub fn validate(&self) -> Result<(), MotionError> {
        let t = &self.thresholds;
        for (name, value) in [
            ("thresholds.reveal", t.reveal),
            ("thresholds.counters", t.counters),
            ("thresholds.sections", t.sections),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MotionError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.typewriter.phrases.is_empty() {
            return Err(MotionError::EmptyPhrases);
        }
        Ok(())
    }
}
