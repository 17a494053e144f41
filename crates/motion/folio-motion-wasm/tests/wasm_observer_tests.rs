#![cfg(target_arch = "wasm32")]
use std::cell::Cell;
use std::rc::Rc;

use folio_motion_core::{Observation, VisibilityObserver};
use folio_motion_wasm::{DomObserver, DomRegistry};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

/// A small box pinned inside the viewport so it always intersects.
fn pinned_box() -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document.create_element("div").unwrap();
    el.set_attribute(
        "style",
        "position: fixed; top: 0; left: 0; width: 20px; height: 20px;",
    )
    .unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn observer(registry: &Rc<DomRegistry>) -> DomObserver {
    DomObserver::detect(&web_sys::window().unwrap(), Rc::clone(registry)).expect("IntersectionObserver")
}

/// it should disconnect and forget a subscription once its callback is done
#[wasm_bindgen_test]
async fn done_callbacks_release_their_observer() {
    let registry = DomRegistry::new();
    let observer = observer(&registry);
    let node = pinned_box();
    let id = registry.register(node.clone());

    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    observer.observe(
        id,
        0.0,
        Box::new(move |_| {
            seen.set(seen.get() + 1);
            Observation::Done
        }),
    );
    assert_eq!(observer.live_count(), 1);

    sleep(200).await;
    assert_eq!(calls.get(), 1);
    assert_eq!(observer.live_count(), 0);
    node.remove();
}

/// it should keep a subscription whose callback wants more notifications
#[wasm_bindgen_test]
async fn keep_callbacks_stay_connected() {
    let registry = DomRegistry::new();
    let observer = observer(&registry);
    let node = pinned_box();
    let id = registry.register(node.clone());

    let sub = observer.observe(id, 0.0, Box::new(|_| Observation::Keep));
    sleep(200).await;
    assert_eq!(observer.live_count(), 1);

    observer.unobserve(sub);
    assert_eq!(observer.live_count(), 0);
    node.remove();
}
