//! Writing text to the system clipboard.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement, Window};

/// Copy `text`, preferring the async Clipboard API and falling back to a
/// hidden textarea plus `execCommand("copy")`.
pub async fn copy_text(window: Window, text: String) -> bool {
    let navigator = window.navigator();
    if has_clipboard(&navigator) && window.is_secure_context() {
        return JsFuture::from(navigator.clipboard().write_text(&text))
            .await
            .is_ok();
    }
    legacy_copy(&window, &text)
}

fn has_clipboard(navigator: &web_sys::Navigator) -> bool {
    js_sys::Reflect::has(navigator, &"clipboard".into()).unwrap_or(false)
}

fn legacy_copy(window: &Window, text: &str) -> bool {
    let Some(document) = window.document() else {
        return false;
    };
    let Some(body) = document.body() else {
        return false;
    };
    let Some(area) = document
        .create_element("textarea")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
    else {
        return false;
    };

    area.set_value(text);
    let style = area.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("left", "-9999px");
    if body.append_child(&area).is_err() {
        return false;
    }
    area.select();
    let copied = document
        .dyn_ref::<HtmlDocument>()
        .and_then(|doc| doc.exec_command("copy").ok())
        .unwrap_or(false);
    let _ = body.remove_child(&area);
    copied
}
