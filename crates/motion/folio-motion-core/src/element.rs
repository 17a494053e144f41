//! Animatable element records and the marker vocabulary the core toggles.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;
use crate::surface::Surface;

/// What an element does once it is revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Generic,
    Counter,
    RadialMeter,
}

/// Visual signals written through [`Surface::set_marker`].
///
/// `class_name` is the contract with the stylesheet; adapters decide how a
/// marker lands on the node (class list, data attribute).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    Visible,
    Animated,
    Active,
    NavOpen,
    Scrolled,
    BackToTopVisible,
    FilteredOut,
    Flipped,
    Copied,
    FeedbackSuccess,
    FeedbackError,
}

impl Marker {
    pub fn class_name(self) -> &'static str {
        match self {
            Marker::Visible => "is-visible",
            Marker::Animated => "animated",
            Marker::Active => "active",
            Marker::NavOpen => "nav-open",
            Marker::Scrolled => "navbar--scrolled",
            Marker::BackToTopVisible => "visible",
            Marker::FilteredOut => "is-filtered-out",
            Marker::Flipped => "is-flipped",
            Marker::Copied => "copied",
            Marker::FeedbackSuccess => "success",
            Marker::FeedbackError => "error",
        }
    }
}

/// Child elements a radial meter renders into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterParts {
    /// Text label showing the percentage.
    pub label: ElementId,
    /// Node carrying the angular sweep parameter.
    pub dial: ElementId,
}

/// State record for one animatable element.
///
/// `animated` is the idempotence flag: set once, before the animation starts,
/// and never reset.
#[derive(Debug)]
pub struct AnimatableElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub target_value: i64,
    pub suffix: String,
    pub meter: Option<MeterParts>,
    animated: Cell<bool>,
}

impl AnimatableElement {
    pub fn generic(id: ElementId) -> Self {
        Self {
            id,
            kind: ElementKind::Generic,
            target_value: 0,
            suffix: String::new(),
            meter: None,
            animated: Cell::new(false),
        }
    }

    pub fn counter(id: ElementId, target_value: i64, suffix: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Counter,
            target_value,
            suffix: suffix.into(),
            ..Self::generic(id)
        }
    }

    pub fn radial_meter(id: ElementId, percent: i64, meter: Option<MeterParts>) -> Self {
        Self {
            kind: ElementKind::RadialMeter,
            target_value: percent,
            meter,
            ..Self::generic(id)
        }
    }

    /// Build a counter from its `data-target` / `data-suffix` attribute values.
    pub fn counter_from_attributes(id: ElementId, target: Option<&str>, suffix: Option<&str>) -> Self {
        Self::counter(id, parse_leading_int(target), suffix.unwrap_or_default())
    }

    /// Build a radial meter from its `data-percent` attribute value.
    pub fn meter_from_attributes(id: ElementId, percent: Option<&str>, meter: Option<MeterParts>) -> Self {
        Self::radial_meter(id, parse_leading_int(percent), meter)
    }

    /// Restore the flag from a persisted marker (e.g. a server-rendered `data-animated`).
    pub fn with_animated(self, animated: bool) -> Self {
        self.animated.set(animated);
        self
    }

    pub fn is_animated(&self) -> bool {
        self.animated.get()
    }

    /// Check-and-set the idempotence flag. Returns `true` only for the first
    /// caller; that caller also publishes the `Animated` marker.
    pub fn claim(&self, surface: &dyn Surface) -> bool {
        if self.animated.replace(true) {
            return false;
        }
        surface.set_marker(self.id, Marker::Animated, true);
        true
    }
}

/// Integer parsing with leading-integer semantics: optional leading
/// whitespace, optional sign, then decimal digits; trailing garbage is
/// ignored. Anything without a leading digit (or absent) yields 0.
pub fn parse_leading_int(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    if negative {
        -value
    } else {
        value
    }
}
