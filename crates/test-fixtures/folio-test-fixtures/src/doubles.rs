//! Deterministic stand-ins for the platform seams.
//!
//! Every double is single-threaded and driven explicitly by the test: frames
//! run on `tick`, timers fire on `advance`, intersections happen on
//! `intersect`. Callbacks are always taken out of the double's storage before
//! they run, so they may schedule more work re-entrantly.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use folio_motion_core::{
    ElementId, FrameCallback, FrameScheduler, IdAllocator, IntersectFn, KeyValueStore, Marker,
    Observation, StoreError, Subscription, Surface, Timer, TimerCallback, VisibilityObserver,
};

/// Manual frame clock. Callbacks requested during a tick run on the next tick.
#[derive(Default)]
pub struct ManualFrames {
    pending: RefCell<Vec<FrameCallback>>,
    now: Cell<f64>,
    frames_run: Cell<usize>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: f64) -> Self {
        let frames = Self::default();
        frames.now.set(now);
        frames
    }

    pub fn now(&self) -> f64 {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Total frame callbacks executed so far.
    pub fn frames_run(&self) -> usize {
        self.frames_run.get()
    }

    /// Advance the clock by `dt_ms` and run the callbacks queued before the tick.
    pub fn tick(&self, dt_ms: f64) -> usize {
        self.now.set(self.now.get() + dt_ms);
        let due: Vec<FrameCallback> = self.pending.borrow_mut().drain(..).collect();
        let count = due.len();
        for callback in due {
            callback(self.now.get());
        }
        self.frames_run.set(self.frames_run.get() + count);
        count
    }

    /// Tick at `dt_ms` until nothing is pending; returns the number of ticks.
    /// Panics after `max_ticks` to catch runaway schedules.
    pub fn run_until_idle(&self, dt_ms: f64, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while self.pending() > 0 {
            assert!(ticks < max_ticks, "frames still pending after {max_ticks} ticks");
            self.tick(dt_ms);
            ticks += 1;
        }
        ticks
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push(callback);
    }
}

struct Scheduled {
    due: u64,
    seq: u64,
    delay_ms: u32,
    callback: TimerCallback,
}

/// Virtual wall clock for [`Timer`]. Callbacks fire in due order, ties in
/// scheduling order.
#[derive(Default)]
pub struct ManualTimer {
    queue: RefCell<Vec<Scheduled>>,
    now: Cell<u64>,
    seq: Cell<u64>,
    delays: RefCell<Vec<u32>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Delay of every callback that has fired, in firing order.
    pub fn fired_delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }

    /// Delay until the next callback is due, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.queue
            .borrow()
            .iter()
            .map(|s| s.due)
            .min()
            .map(|due| due - self.now.get())
    }

    /// Move the clock forward, firing everything that comes due on the way.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now.get() + ms;
        let mut fired = 0;
        while let Some(next) = self.pop_due(target) {
            self.now.set(next.due);
            self.delays.borrow_mut().push(next.delay_ms);
            (next.callback)();
            fired += 1;
        }
        self.now.set(target);
        fired
    }

    /// Jump straight to the next due callback and fire it (and anything due
    /// at the same instant). Returns `false` when nothing is scheduled.
    pub fn fire_next(&self) -> bool {
        match self.next_due_in() {
            Some(wait) => {
                self.advance(wait);
                true
            }
            None => false,
        }
    }

    fn pop_due(&self, target: u64) -> Option<Scheduled> {
        let mut queue = self.queue.borrow_mut();
        let idx = queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= target)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(i, _)| i)?;
        Some(queue.swap_remove(idx))
    }
}

impl Timer for ManualTimer {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue.borrow_mut().push(Scheduled {
            due: self.now.get() + u64::from(delay_ms),
            seq,
            delay_ms,
            callback,
        });
    }
}

struct Watch {
    subscription: Subscription,
    threshold: f64,
    callback: Option<IntersectFn>,
}

/// Visibility observer driven by [`ManualObserver::intersect`].
#[derive(Default)]
pub struct ManualObserver {
    ids: RefCell<IdAllocator>,
    watches: RefCell<Vec<Watch>>,
}

impl ManualObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_observed(&self, element: ElementId) -> bool {
        self.watches
            .borrow()
            .iter()
            .any(|w| w.subscription.element == element)
    }

    pub fn observed_count(&self) -> usize {
        self.watches.borrow().len()
    }

    /// Thresholds of the live subscriptions on `element`.
    pub fn thresholds(&self, element: ElementId) -> Vec<f64> {
        self.watches
            .borrow()
            .iter()
            .filter(|w| w.subscription.element == element)
            .map(|w| w.threshold)
            .collect()
    }

    /// Simulate `element` crossing its thresholds upward. Returns how many
    /// callbacks ran.
    pub fn intersect(&self, element: ElementId) -> usize {
        let subs: Vec<Subscription> = self
            .watches
            .borrow()
            .iter()
            .filter(|w| w.subscription.element == element)
            .map(|w| w.subscription)
            .collect();
        let mut ran = 0;
        for sub in subs {
            let Some(mut callback) = self.take_callback(sub) else {
                continue;
            };
            let outcome = callback(element);
            ran += 1;
            match outcome {
                Observation::Done => self.unobserve(sub),
                Observation::Keep => self.restore_callback(sub, callback),
            }
        }
        ran
    }

    fn take_callback(&self, sub: Subscription) -> Option<IntersectFn> {
        self.watches
            .borrow_mut()
            .iter_mut()
            .find(|w| w.subscription == sub)
            .and_then(|w| w.callback.take())
    }

    fn restore_callback(&self, sub: Subscription, callback: IntersectFn) {
        if let Some(w) = self
            .watches
            .borrow_mut()
            .iter_mut()
            .find(|w| w.subscription == sub)
        {
            w.callback = Some(callback);
        }
    }
}

impl VisibilityObserver for ManualObserver {
    fn observe(&self, element: ElementId, threshold: f64, on_intersect: IntersectFn) -> Subscription {
        let subscription = Subscription {
            id: self.ids.borrow_mut().alloc_subscription(),
            element,
        };
        self.watches.borrow_mut().push(Watch {
            subscription,
            threshold,
            callback: Some(on_intersect),
        });
        subscription
    }

    fn unobserve(&self, subscription: Subscription) {
        self.watches
            .borrow_mut()
            .retain(|w| w.subscription != subscription);
    }
}

/// Records every write the core makes.
#[derive(Default)]
pub struct RecordingSurface {
    texts: RefCell<HashMap<ElementId, Vec<String>>>,
    markers: RefCell<HashSet<(ElementId, Marker)>>,
    sweeps: RefCell<HashMap<ElementId, Vec<f64>>>,
    styles: RefCell<HashMap<(ElementId, String), String>>,
    attributes: RefCell<HashMap<(ElementId, String), String>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest text written to `element`.
    pub fn text(&self, element: ElementId) -> Option<String> {
        self.texts
            .borrow()
            .get(&element)
            .and_then(|h| h.last().cloned())
    }

    pub fn text_history(&self, element: ElementId) -> Vec<String> {
        self.texts
            .borrow()
            .get(&element)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_marker(&self, element: ElementId, marker: Marker) -> bool {
        self.markers.borrow().contains(&(element, marker))
    }

    pub fn sweep(&self, element: ElementId) -> Option<f64> {
        self.sweeps
            .borrow()
            .get(&element)
            .and_then(|h| h.last().copied())
    }

    pub fn sweep_history(&self, element: ElementId) -> Vec<f64> {
        self.sweeps
            .borrow()
            .get(&element)
            .cloned()
            .unwrap_or_default()
    }

    pub fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.styles
            .borrow()
            .get(&(element, property.to_string()))
            .cloned()
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.attributes
            .borrow()
            .get(&(element, name.to_string()))
            .cloned()
    }
}

impl Surface for RecordingSurface {
    fn set_text(&self, element: ElementId, text: &str) {
        self.texts
            .borrow_mut()
            .entry(element)
            .or_default()
            .push(text.to_string());
    }

    fn set_marker(&self, element: ElementId, marker: Marker, on: bool) {
        let mut markers = self.markers.borrow_mut();
        if on {
            markers.insert((element, marker));
        } else {
            markers.remove(&(element, marker));
        }
    }

    fn set_sweep(&self, element: ElementId, degrees: f64) {
        self.sweeps
            .borrow_mut()
            .entry(element)
            .or_default()
            .push(degrees);
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert((element, property.to_string()), value.to_string());
    }

    fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert((element, name.to_string()), value.to_string());
    }
}

/// In-memory key-value store; `failing()` rejects every operation.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable);
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Backend("quota exceeded".into()));
        }
        self.writes.set(self.writes.get() + 1);
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
