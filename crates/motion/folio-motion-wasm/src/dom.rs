//! Element registry and the DOM-backed [`Surface`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use folio_motion_core::{ElementId, IdAllocator, Marker, Surface};

/// Custom property the stylesheet reads for a radial meter's sweep.
pub const SWEEP_PROPERTY: &str = "--progress";

/// Maps core [`ElementId`]s to live DOM nodes. Ids are dense indices.
#[derive(Default)]
pub struct DomRegistry {
    ids: RefCell<IdAllocator>,
    nodes: RefCell<Vec<Element>>,
}

impl DomRegistry {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn register(&self, node: Element) -> ElementId {
        let id = self.ids.borrow_mut().alloc_element();
        self.nodes.borrow_mut().push(node);
        id
    }

    pub fn register_opt(&self, node: Option<Element>) -> Option<ElementId> {
        node.map(|n| self.register(n))
    }

    pub fn get(&self, id: ElementId) -> Option<Element> {
        self.nodes.borrow().get(id.0 as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// CSS value for a sweep, e.g. `288deg` or `143.5deg`.
pub fn sweep_value(degrees: f64) -> String {
    format!("{degrees}deg")
}

pub struct DomSurface {
    registry: Rc<DomRegistry>,
}

impl DomSurface {
    pub fn new(registry: Rc<DomRegistry>) -> Self {
        Self { registry }
    }

    fn style(&self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.registry.get(element) {
            if let Some(html) = node.dyn_ref::<HtmlElement>() {
                let _ = html.style().set_property(property, value);
            }
        }
    }
}

impl Surface for DomSurface {
    fn set_text(&self, element: ElementId, text: &str) {
        if let Some(node) = self.registry.get(element) {
            node.set_text_content(Some(text));
        }
    }

    fn set_marker(&self, element: ElementId, marker: Marker, on: bool) {
        let Some(node) = self.registry.get(element) else {
            return;
        };
        match marker {
            // Idempotence marker lives in the dataset, not the class list.
            Marker::Animated => {
                let _ = if on {
                    node.set_attribute("data-animated", "true")
                } else {
                    node.remove_attribute("data-animated")
                };
            }
            _ => {
                let classes = node.class_list();
                let _ = if on {
                    classes.add_1(marker.class_name())
                } else {
                    classes.remove_1(marker.class_name())
                };
            }
        }
    }

    fn set_sweep(&self, element: ElementId, degrees: f64) {
        self.style(element, SWEEP_PROPERTY, &sweep_value(degrees));
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        self.style(element, property, value);
    }

    fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.registry.get(element) {
            let _ = node.set_attribute(name, value);
        }
    }
}
