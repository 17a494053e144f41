#![cfg(target_arch = "wasm32")]
use folio_motion_core::{ElementId, KeyValueStore, Marker, Surface, FORM_SENDING_MESSAGE};
use folio_motion_wasm::dom::sweep_value;
use folio_motion_wasm::{abi_version, form_submit, DomRegistry, DomSurface, LocalStore};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn attach(tag: &str, html: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document.create_element(tag).unwrap();
    el.set_inner_html(html);
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

/// it should format whole and fractional sweeps as CSS angles
#[wasm_bindgen_test]
fn sweep_values() {
    assert_eq!(sweep_value(288.0), "288deg");
    assert_eq!(sweep_value(0.0), "0deg");
    assert_eq!(sweep_value(143.5), "143.5deg");
}

/// it should map markers to classes and the animated flag to the dataset
#[wasm_bindgen_test]
fn surface_writes_markers() {
    let registry = DomRegistry::new();
    let node = attach("div", "");
    let id = registry.register(node.clone());
    let surface = DomSurface::new(registry.clone());

    surface.set_marker(id, Marker::Visible, true);
    assert!(node.class_list().contains("is-visible"));
    surface.set_marker(id, Marker::Visible, false);
    assert!(!node.class_list().contains("is-visible"));

    surface.set_marker(id, Marker::Animated, true);
    assert_eq!(node.get_attribute("data-animated").as_deref(), Some("true"));
    assert!(!node.class_list().contains("animated"));

    surface.set_text(id, "42+");
    assert_eq!(node.text_content().as_deref(), Some("42+"));

    surface.set_attribute(id, "aria-expanded", "true");
    assert_eq!(node.get_attribute("aria-expanded").as_deref(), Some("true"));
    node.remove();
}

/// it should write the sweep as the --progress custom property
#[wasm_bindgen_test]
fn surface_writes_sweep() {
    let registry = DomRegistry::new();
    let node = attach("div", "");
    let id = registry.register(node.clone());
    let surface = DomSurface::new(registry.clone());

    surface.set_sweep(id, 234.0);
    let style = node.dyn_ref::<HtmlElement>().unwrap().style();
    assert_eq!(style.get_property_value("--progress").unwrap().trim(), "234deg");
    node.remove();
}

/// it should ignore ids that were never registered
#[wasm_bindgen_test]
fn unknown_ids_are_ignored() {
    let registry = DomRegistry::new();
    let surface = DomSurface::new(registry.clone());
    surface.set_text(ElementId(99), "nothing");
    surface.set_marker(ElementId(99), Marker::Active, true);
    assert!(registry.is_empty());
}

/// it should round-trip values through localStorage
#[wasm_bindgen_test]
fn local_store_round_trip() {
    let store = LocalStore::new(&web_sys::window().unwrap());
    store.set("folio-motion-test", "light").unwrap();
    assert_eq!(store.get("folio-motion-test").unwrap().as_deref(), Some("light"));
    assert_eq!(store.get("folio-motion-missing").unwrap(), None);
}

/// it should only show the sending message for a valid form
#[wasm_bindgen_test]
fn form_submit_feedback() {
    let message = attach("p", "");
    message.set_id("form-message");

    let invalid = attach("form", r#"<input name="name" required>"#);
    let event = Event::new("submit").unwrap();
    invalid.dispatch_event(&event).unwrap();
    form_submit(event);
    assert_eq!(message.text_content().as_deref(), Some(""));

    let valid = attach("form", r#"<input name="name" required value="Ada">"#);
    let event = Event::new("submit").unwrap();
    valid.dispatch_event(&event).unwrap();
    form_submit(event);
    assert_eq!(message.text_content().as_deref(), Some(FORM_SENDING_MESSAGE));
    assert_eq!(message.class_name(), "form-message");

    for node in [message, invalid, valid] {
        node.remove();
    }
}
