//! Navigation: menu open state, active-section highlighting, scroll-derived
//! chrome and anchored scroll offsets.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::config::ScrollConfig;
use crate::element::Marker;
use crate::ids::ElementId;
use crate::surface::Surface;
use crate::visibility::{Observation, Visibility};

/// Extract `<id>` from an inline handler of the form `scrollToSection('<id>')`.
pub fn parse_section_target(onclick: &str) -> Option<&str> {
    const OPEN: &str = "scrollToSection('";
    let start = onclick.find(OPEN)? + OPEN.len();
    let rest = &onclick[start..];
    let end = rest.find('\'')?;
    let id = &rest[..end];
    if id.is_empty() || !rest[end + 1..].starts_with(')') {
        return None;
    }
    Some(id)
}

/// Document offset to scroll to so a section lands just below the navbar.
pub fn anchor_offset(rect_top: f64, scroll_top: f64, navbar_height: f64, gap: f64) -> f64 {
    let offset = rect_top + scroll_top - (navbar_height + gap);
    offset.max(0.0)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavButton {
    pub id: ElementId,
    /// Section this button scrolls to, when its handler names one.
    pub target: Option<String>,
}

impl NavButton {
    pub fn from_onclick(id: ElementId, onclick: Option<&str>) -> Self {
        Self {
            id,
            target: onclick.and_then(parse_section_target).map(str::to_string),
        }
    }
}

/// Mobile menu state, mirrored as `nav-open` on the body and
/// `aria-expanded` on the toggle.
pub struct NavMenu {
    surface: Rc<dyn Surface>,
    body: Option<ElementId>,
    toggle_button: Option<ElementId>,
    open: Cell<bool>,
}

impl NavMenu {
    pub fn new(surface: Rc<dyn Surface>, body: Option<ElementId>, toggle_button: Option<ElementId>) -> Self {
        Self {
            surface,
            body,
            toggle_button,
            open: Cell::new(false),
        }
    }

    pub fn toggle_button(&self) -> Option<ElementId> {
        self.toggle_button
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    /// A nav link was followed: an open menu closes.
    pub fn on_link_click(&self) {
        if self.is_open() {
            self.close();
        }
    }

    fn set_open(&self, open: bool) {
        self.open.set(open);
        if let Some(body) = self.body {
            self.surface.set_marker(body, Marker::NavOpen, open);
        }
        if let Some(toggle) = self.toggle_button {
            self.surface
                .set_attribute(toggle, "aria-expanded", if open { "true" } else { "false" });
        }
    }
}

/// Highlights the nav buttons whose target section is on screen.
#[derive(Clone)]
pub struct SectionTracker {
    surface: Rc<dyn Surface>,
    buttons: Rc<Vec<NavButton>>,
}

impl SectionTracker {
    pub fn new(surface: Rc<dyn Surface>, buttons: Vec<NavButton>) -> Self {
        Self {
            surface,
            buttons: Rc::new(buttons),
        }
    }

    pub fn buttons(&self) -> &[NavButton] {
        &self.buttons
    }

    /// Mark exactly the buttons targeting `section` as active.
    pub fn set_active(&self, section: &str) {
        if section.is_empty() {
            return;
        }
        for button in self.buttons.iter() {
            let on = button.target.as_deref() == Some(section);
            self.surface.set_marker(button.id, Marker::Active, on);
        }
    }

    /// Observe each `(element, section id)` pair for the page's lifetime.
    /// Without an observer this does nothing.
    pub fn wire(&self, visibility: &Visibility, sections: Vec<(ElementId, String)>, threshold: f64) {
        let Some(observer) = visibility.observer() else {
            return;
        };
        if sections.is_empty() {
            return;
        }
        debug!("tracking {} sections", sections.len());
        for (element, section) in sections {
            let tracker = self.clone();
            observer.observe(
                element,
                threshold,
                Box::new(move |_| {
                    tracker.set_active(&section);
                    Observation::Keep
                }),
            );
        }
    }
}

/// Viewport measurements taken on each scroll event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollState {
    /// CSS width of the progress bar, e.g. `"42.50%"`.
    pub progress_width: String,
    pub navbar_scrolled: bool,
    pub back_to_top_visible: bool,
}

impl ScrollState {
    pub fn from_metrics(metrics: ScrollMetrics, cfg: &ScrollConfig) -> Self {
        let doc_height = metrics.scroll_height - metrics.viewport_height;
        let progress = if doc_height > 0.0 {
            metrics.scroll_y / doc_height
        } else {
            0.0
        };
        Self {
            progress_width: format!("{:.2}%", progress * 100.0),
            navbar_scrolled: metrics.scroll_y > cfg.navbar_scrolled_px,
            back_to_top_visible: metrics.scroll_y > cfg.back_to_top_px,
        }
    }
}

/// Progress bar, navbar shadow and back-to-top button, all driven by scroll.
pub struct ScrollChrome {
    surface: Rc<dyn Surface>,
    cfg: ScrollConfig,
    progress_bar: Option<ElementId>,
    navbar: Option<ElementId>,
    back_to_top: Option<ElementId>,
}

impl ScrollChrome {
    pub fn new(
        surface: Rc<dyn Surface>,
        cfg: ScrollConfig,
        progress_bar: Option<ElementId>,
        navbar: Option<ElementId>,
        back_to_top: Option<ElementId>,
    ) -> Self {
        Self {
            surface,
            cfg,
            progress_bar,
            navbar,
            back_to_top,
        }
    }

    pub fn back_to_top(&self) -> Option<ElementId> {
        self.back_to_top
    }

    pub fn update(&self, metrics: ScrollMetrics) -> ScrollState {
        let state = ScrollState::from_metrics(metrics, &self.cfg);
        if let Some(bar) = self.progress_bar {
            self.surface.set_style(bar, "width", &state.progress_width);
        }
        if let Some(navbar) = self.navbar {
            self.surface
                .set_marker(navbar, Marker::Scrolled, state.navbar_scrolled);
        }
        if let Some(button) = self.back_to_top {
            self.surface
                .set_marker(button, Marker::BackToTopVisible, state.back_to_top_visible);
        }
        state
    }
}
