//! DOM discovery and event wiring for a [`Page`].

use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, NodeList,
    ScrollBehavior, ScrollToOptions, Window,
};

use folio_motion_core::{
    AnimatableElement, CopyTarget, FilterButton, FrameScheduler, MeterParts, MotionConfig,
    MotionError, NavButton, Page, PageLayout, Platform, ProjectCard, ScrollMetrics, Visibility,
};

use crate::clipboard::copy_text;
use crate::dom::{DomRegistry, DomSurface};
use crate::platform::{DomObserver, LocalStore, RafScheduler, TimeoutTimer};

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn on<F>(target: &EventTarget, kind: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        warn!("addEventListener({kind}) failed: {e:?}");
    }
    closure.forget();
}

/// Current scroll position and document extent.
pub fn read_scroll(window: &Window, document: &Document) -> ScrollMetrics {
    let root = document.document_element();
    let scroll_y = window
        .scroll_y()
        .ok()
        .filter(|y| *y > 0.0)
        .or_else(|| root.as_ref().map(|r| f64::from(r.scroll_top())))
        .unwrap_or(0.0);
    ScrollMetrics {
        scroll_y,
        scroll_height: root.as_ref().map_or(0.0, |r| f64::from(r.scroll_height())),
        viewport_height: window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0),
    }
}

pub fn navbar_height(document: &Document) -> f64 {
    query(document, ".navbar")
        .and_then(|n| n.dyn_into::<HtmlElement>().ok())
        .map_or(0.0, |n| f64::from(n.offset_height()))
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn discover_reveal(registry: &DomRegistry, node: Element) -> Rc<AnimatableElement> {
    let animated = node.get_attribute("data-animated").as_deref() == Some("true");
    if !node.class_list().contains("skill-meter") {
        return Rc::new(AnimatableElement::generic(registry.register(node)).with_animated(animated));
    }
    let percent = node.get_attribute("data-percent");
    let parts = match (query_in(&node, ".radial-label"), query_in(&node, ".radial-progress")) {
        (Some(label), Some(dial)) => Some((label, dial)),
        _ => None,
    };
    let id = registry.register(node);
    let parts = parts.map(|(label, dial)| MeterParts {
        label: registry.register(label),
        dial: registry.register(dial),
    });
    Rc::new(AnimatableElement::meter_from_attributes(id, percent.as_deref(), parts).with_animated(animated))
}

/// Register every node the page behaviours touch.
pub fn discover(document: &Document, registry: &DomRegistry) -> PageLayout {
    let body = registry.register_opt(document.body().map(Element::from));
    let navbar = registry.register_opt(query(document, ".navbar"));
    let nav_toggle = registry.register_opt(query(document, ".nav-toggle"));
    let nav_buttons = query(document, ".nav-links")
        .map(|links| elements(links.query_selector_all("button")))
        .unwrap_or_default()
        .into_iter()
        .map(|btn| {
            let onclick = btn.get_attribute("onclick");
            NavButton::from_onclick(registry.register(btn), onclick.as_deref())
        })
        .collect();
    let sections = elements(document.query_selector_all("section[id]"))
        .into_iter()
        .map(|s| {
            let id = s.id();
            (registry.register(s), id)
        })
        .collect();

    let progress_bar = registry.register_opt(query(document, ".scroll-progress-bar"));
    let back_to_top = registry.register_opt(query(document, ".back-to-top"));
    let typed_text = registry.register_opt(document.get_element_by_id("typed-text"));

    let reveals = elements(document.query_selector_all(".animate-on-scroll"))
        .into_iter()
        .map(|node| discover_reveal(registry, node))
        .collect();

    let counter_container = registry.register_opt(query(document, ".about-stats"));
    let counters = elements(document.query_selector_all(".stat-number[data-target]"))
        .into_iter()
        .map(|node| {
            let target = node.get_attribute("data-target");
            let suffix = node.get_attribute("data-suffix");
            let animated = node.get_attribute("data-animated").as_deref() == Some("true");
            let id = registry.register(node);
            Rc::new(
                AnimatableElement::counter_from_attributes(id, target.as_deref(), suffix.as_deref())
                    .with_animated(animated),
            )
        })
        .collect();

    let filter_buttons = elements(document.query_selector_all(".filter-button"))
        .into_iter()
        .map(|btn| {
            let filter = btn.get_attribute("data-filter");
            FilterButton::new(registry.register(btn), filter.as_deref())
        })
        .collect();
    let project_cards = elements(document.query_selector_all(".proj-card"))
        .into_iter()
        .map(|card| {
            let category = card.get_attribute("data-category");
            ProjectCard::new(registry.register(card), category.as_deref())
        })
        .collect();

    let copy = query(document, ".copy-email-button").map(|button| {
        let feedback = button.next_element_sibling();
        CopyTarget {
            button: registry.register(button),
            feedback: registry.register_opt(feedback),
        }
    });

    PageLayout {
        body,
        navbar,
        nav_toggle,
        nav_buttons,
        sections,
        progress_bar,
        back_to_top,
        typed_text,
        reveals,
        counter_container,
        counters,
        filter_buttons,
        project_cards,
        copy,
    }
}

/// Pick the platform seams this browser supports.
pub fn platform(window: &Window, registry: &Rc<DomRegistry>) -> Platform {
    let visibility = match DomObserver::detect(window, Rc::clone(registry)) {
        Some(observer) => Visibility::observed(Rc::new(observer)),
        None => {
            debug!("IntersectionObserver unavailable, revealing immediately");
            Visibility::Immediate
        }
    };
    Platform {
        surface: Rc::new(DomSurface::new(Rc::clone(registry))),
        visibility,
        frames: RafScheduler::detect(window).map(|r| Rc::new(r) as Rc<dyn FrameScheduler>),
        timer: Rc::new(TimeoutTimer::new(window)),
        store: Rc::new(LocalStore::new(window)),
    }
}

/// Discover, start and wire the page. Listeners hold the returned page.
pub fn boot(window: &Window, document: &Document, cfg: MotionConfig) -> Result<Rc<Page>, MotionError> {
    let registry = DomRegistry::new();
    let layout = discover(document, &registry);
    let platform = platform(window, &registry);
    let surface = Rc::clone(&platform.surface);

    // Keep `data-target-section` on the buttons in step with the parsed handler.
    for button in &layout.nav_buttons {
        if let Some(target) = &button.target {
            surface.set_attribute(button.id, "data-target-section", target);
        }
    }

    let page = Rc::new(Page::start(platform, layout, cfg, read_scroll(window, document))?);
    wire_events(window, document, &registry, &page);
    debug!("page booted with {} registered elements", registry.len());
    Ok(page)
}

fn wire_events(window: &Window, document: &Document, registry: &Rc<DomRegistry>, page: &Rc<Page>) {
    if let Some(toggle) = query(document, ".theme-toggle") {
        let page = Rc::clone(page);
        on(&toggle, "click", move |_| {
            page.theme.toggle();
        });
    }

    if let Some(toggle) = page.nav.toggle_button().and_then(|id| registry.get(id)) {
        let page = Rc::clone(page);
        on(&toggle, "click", move |_| page.nav.toggle());
    }

    for button in page.sections.buttons() {
        if let Some(node) = registry.get(button.id) {
            let page = Rc::clone(page);
            on(&node, "click", move |_| page.nav.on_link_click());
        }
    }

    {
        let page = Rc::clone(page);
        let win = window.clone();
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            page.chrome.update(read_scroll(&win, &doc));
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        if let Err(e) = window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            closure.as_ref().unchecked_ref(),
            &options,
        ) {
            warn!("scroll listener failed: {e:?}");
        }
        closure.forget();
    }

    if let Some(back) = page.chrome.back_to_top().and_then(|id| registry.get(id)) {
        let win = window.clone();
        on(&back, "click", move |_| smooth_scroll_to(&win, 0.0));
    }

    for button in page.filter.buttons() {
        if let Some(node) = registry.get(button.id) {
            let page = Rc::clone(page);
            let id = button.id;
            on(&node, "click", move |_| {
                page.filter.select(id);
            });
        }
    }

    if let Some(feedback) = &page.copy {
        if let Some(button) = registry.get(feedback.button()) {
            let email = button.get_attribute("data-email");
            let feedback = feedback.clone();
            let win = window.clone();
            on(&button, "click", move |_| {
                let Some(email) = email.clone() else {
                    return;
                };
                let feedback = feedback.clone();
                let win = win.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let copied = copy_text(win, email).await;
                    feedback.report(copied);
                });
            });
        }
    }
}
