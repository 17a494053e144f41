//! Identifiers and a simple allocator for page elements and subscriptions.

use serde::{Deserialize, Serialize};

/// Opaque handle to a page element. Adapters keep the id -> node mapping;
/// the core never allocates or frees the element itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// Monotonic allocator for ElementId and subscription ids.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_element: u32,
    next_subscription: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_element(&mut self) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element = self.next_element.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_subscription(&mut self) -> u32 {
        let id = self.next_subscription;
        self.next_subscription = self.next_subscription.wrapping_add(1);
        id
    }
}
