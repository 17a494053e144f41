//! The two scheduling primitives. They are deliberately separate traits:
//! frame callbacks follow the display refresh, timer callbacks follow wall
//! clock delays, and no component uses both.

/// Callback invoked with a millisecond timestamp (arbitrary epoch).
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Callback invoked once a delay has elapsed.
pub type TimerCallback = Box<dyn FnOnce()>;

/// "Run this before the next paint."
///
/// Each callback runs at most once, on the next refresh, and timestamps
/// passed to successive frames never decrease.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback);
}

/// Deferred one-shot callback, independent of the display refresh.
pub trait Timer {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback);
}
