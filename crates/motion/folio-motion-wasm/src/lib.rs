//! Browser front end for folio-motion-core: discovers the portfolio page's
//! elements, supplies DOM-backed platform seams and forwards events.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use log::{debug, error, warn};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlFormElement, Window};

use folio_motion_core::{
    anchor_offset, MotionConfig, MotionError, Page, ScrollConfig, FORM_SENDING_MESSAGE,
};

pub mod boot;
mod clipboard;
pub mod dom;
pub mod platform;

pub use dom::{DomRegistry, DomSurface};
pub use platform::{DomObserver, LocalStore, RafScheduler, TimeoutTimer};

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
    static ANCHOR_GAP: Cell<f64> = Cell::new(ScrollConfig::default().anchor_gap_px);
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn browser() -> Result<(Window, Document), JsError> {
    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("no document"))?;
    Ok((window, document))
}

/// The running page, once `start` has booted it.
pub fn running_page() -> Option<Rc<Page>> {
    PAGE.with(|p| p.borrow().clone())
}

fn boot_once(window: &Window, document: &Document, cfg: MotionConfig) -> Result<(), MotionError> {
    if running_page().is_some() {
        warn!("page already started");
        return Ok(());
    }
    let page = boot::boot(window, document, cfg)?;
    PAGE.with(|p| *p.borrow_mut() = Some(page));
    Ok(())
}

/// Expose the inline-handler entry points on `window`.
fn install_globals(window: &Window) {
    let scroll = Closure::<dyn Fn(String)>::new(|id: String| scroll_to_section(&id));
    let submit = Closure::<dyn Fn(Event)>::new(form_submit);
    for (name, f) in [
        ("scrollToSection", scroll.into_js_value()),
        ("formSubmit", submit.into_js_value()),
    ] {
        if let Err(e) = Reflect::set(window, &JsValue::from_str(name), &f) {
            warn!("could not install window.{name}: {e:?}");
        }
    }
}

/// Boot every page behaviour. Pass a config object or undefined/null for
/// defaults. Runs on `DOMContentLoaded` when the document is still loading.
/// Example:
///   start({ counter_duration_ms: 900, typewriter: { phrases: ["Rust"] } })
#[wasm_bindgen]
pub fn start(config: JsValue) -> Result<(), JsError> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let cfg: MotionConfig = if jsvalue_is_undefined_or_null(&config) {
        MotionConfig::default()
    } else {
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
    };
    cfg.validate()
        .map_err(|e| JsError::new(&format!("config error: {e}")))?;

    let (window, document) = browser()?;
    ANCHOR_GAP.with(|g| g.set(cfg.scroll.anchor_gap_px));
    install_globals(&window);

    if document.ready_state() == "loading" {
        debug!("deferring start until DOMContentLoaded");
        let (win, doc) = (window, document.clone());
        let on_ready = Closure::once_into_js(move |_: Event| {
            if let Err(e) = boot_once(&win, &doc, cfg) {
                error!("start failed: {e}");
            }
        });
        return document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(|e| JsError::new(&format!("start: {e:?}")));
    }

    boot_once(&window, &document, cfg).map_err(|e| JsError::new(&format!("start failed: {e}")))
}

/// Smooth-scroll so the section's top sits just below the fixed navbar.
#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section(section_id: &str) {
    let Ok((window, document)) = browser() else {
        return;
    };
    let Some(target) = document.get_element_by_id(section_id) else {
        return;
    };
    let rect_top = target.get_bounding_client_rect().top();
    let scroll_top = boot::read_scroll(&window, &document).scroll_y;
    let top = anchor_offset(
        rect_top,
        scroll_top,
        boot::navbar_height(&document),
        ANCHOR_GAP.with(Cell::get),
    );
    boot::smooth_scroll_to(&window, top);
}

/// Show the "sending" message for a valid contact form. The native submit
/// is never prevented.
#[wasm_bindgen(js_name = formSubmit)]
pub fn form_submit(event: Event) {
    let Some(form) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
    else {
        return;
    };
    if !form.check_validity() {
        return;
    }
    let Ok((_, document)) = browser() else {
        return;
    };
    if let Some(message) = document.get_element_by_id("form-message") {
        message.set_text_content(Some(FORM_SENDING_MESSAGE));
        message.set_class_name("form-message");
    }
}

#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
