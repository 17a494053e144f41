//! Folio Motion Core (platform-agnostic)
//!
//! Client-side behaviour of the portfolio page expressed against a handful of
//! platform seams: a frame scheduler, a visibility observer, a deferred timer,
//! a key-value store and a rendering surface. Adapters (wasm/DOM, tests) supply
//! the seams; this crate owns every state machine:
//!
//! - one-shot reveal, counter and radial-meter animations gated on visibility,
//! - the looping typewriter,
//! - theme persistence, navigation state, scroll chrome, project filtering and
//!   copy feedback.

pub mod clipboard;
pub mod config;
pub mod counter;
pub mod element;
pub mod error;
pub mod filter;
pub mod ids;
pub mod nav;
pub mod page;
pub mod radial;
pub mod reveal;
pub mod runner;
pub mod scheduler;
pub mod surface;
pub mod theme;
pub mod typewriter;
pub mod visibility;

// Re-exports for consumers (adapters)
pub use clipboard::CopyFeedback;
pub use config::{MotionConfig, ScrollConfig, Thresholds, TypewriterConfig};
pub use counter::{counter_text, CounterAnimator};
pub use element::{parse_leading_int, AnimatableElement, ElementKind, Marker, MeterParts};
pub use error::{MotionError, StoreError};
pub use filter::{FilterButton, ProjectCard, ProjectFilter};
pub use ids::{ElementId, IdAllocator};
pub use nav::{
    anchor_offset, parse_section_target, NavButton, NavMenu, ScrollChrome, ScrollMetrics,
    ScrollState, SectionTracker,
};
pub use page::{CopyTarget, Page, PageLayout, Platform, FORM_SENDING_MESSAGE};
pub use radial::{meter_frame, MeterFrame, RadialMeterAnimator};
pub use reveal::RevealCoordinator;
pub use runner::{AnimationJob, AnimationRunner};
pub use scheduler::{FrameCallback, FrameScheduler, Timer, TimerCallback};
pub use surface::Surface;
pub use theme::{KeyValueStore, Theme, ThemeController, THEME_KEY};
pub use typewriter::{Typewriter, TypewriterCycler, TypewriterPhase, TypewriterStep};
pub use visibility::{IntersectFn, Observation, Pace, Subscription, Visibility, VisibilityObserver};
