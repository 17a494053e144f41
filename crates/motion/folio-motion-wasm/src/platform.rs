//! Browser implementations of the core's scheduling, visibility and storage seams.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Array, Reflect};
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Storage, Window};

use folio_motion_core::{
    ElementId, FrameCallback, FrameScheduler, IdAllocator, IntersectFn, KeyValueStore,
    Observation, StoreError, Subscription, Timer, TimerCallback, VisibilityObserver,
};

use crate::dom::DomRegistry;

/// Whether `window[name]` exists.
pub fn has_global(window: &Window, name: &str) -> bool {
    Reflect::has(window, &JsValue::from_str(name)).unwrap_or(false)
}

/// `requestAnimationFrame`.
pub struct RafScheduler {
    window: Window,
}

impl RafScheduler {
    /// `None` when the browser has no `requestAnimationFrame`.
    pub fn detect(window: &Window) -> Option<Self> {
        has_global(window, "requestAnimationFrame").then(|| Self {
            window: window.clone(),
        })
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) {
        let f = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        if let Err(e) = self.window.request_animation_frame(f.unchecked_ref()) {
            warn!("requestAnimationFrame failed: {e:?}");
        }
    }
}

/// `setTimeout`.
pub struct TimeoutTimer {
    window: Window,
}

impl TimeoutTimer {
    pub fn new(window: &Window) -> Self {
        Self {
            window: window.clone(),
        }
    }
}

impl Timer for TimeoutTimer {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) {
        let f = Closure::once_into_js(move || callback());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(f.unchecked_ref(), delay)
        {
            warn!("setTimeout failed: {e:?}");
        }
    }
}

type LiveObservers = Rc<RefCell<HashMap<u32, IntersectionObserver>>>;

/// One `IntersectionObserver` per subscription, so each can carry its own
/// threshold and callback. Finished subscriptions are disconnected and
/// dropped from `live`.
pub struct DomObserver {
    registry: Rc<DomRegistry>,
    ids: RefCell<IdAllocator>,
    live: LiveObservers,
}

impl DomObserver {
    /// `None` when the browser has no `IntersectionObserver`.
    pub fn detect(window: &Window, registry: Rc<DomRegistry>) -> Option<Self> {
        has_global(window, "IntersectionObserver").then(|| Self {
            registry,
            ids: RefCell::new(IdAllocator::new()),
            live: Rc::new(RefCell::new(HashMap::new())),
        })
    }

    /// Subscriptions still connected.
    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }
}

fn release(live: &LiveObservers, id: u32) {
    // Bind first so the map borrow ends before `disconnect` runs.
    let removed = live.borrow_mut().remove(&id);
    if let Some(observer) = removed {
        observer.disconnect();
    }
}

impl VisibilityObserver for DomObserver {
    fn observe(&self, element: ElementId, threshold: f64, mut on_intersect: IntersectFn) -> Subscription {
        let subscription = Subscription {
            id: self.ids.borrow_mut().alloc_subscription(),
            element,
        };
        let Some(node) = self.registry.get(element) else {
            return subscription;
        };

        let live = Rc::clone(&self.live);
        let id = subscription.id;
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    if on_intersect(element) == Observation::Done {
                        observer.unobserve(&entry.target());
                        release(&live, id);
                        break;
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(&node);
                self.live.borrow_mut().insert(subscription.id, observer);
                // Lives as long as the page; the observer may call it at any time.
                callback.forget();
            }
            Err(e) => warn!("IntersectionObserver for {element:?} failed: {e:?}"),
        }
        subscription
    }

    fn unobserve(&self, subscription: Subscription) {
        release(&self.live, subscription.id);
    }
}

/// `localStorage`; absent storage (privacy modes, sandboxed frames) is
/// reported as [`StoreError::Unavailable`].
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}
