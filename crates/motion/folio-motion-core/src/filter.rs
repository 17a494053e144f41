//! Client-side project filter.

use std::rc::Rc;

use crate::element::Marker;
use crate::ids::ElementId;
use crate::surface::Surface;

/// Filter value that matches every card.
pub const FILTER_ALL: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterButton {
    pub id: ElementId,
    pub filter: String,
}

impl FilterButton {
    /// A button without `data-filter` behaves as "all".
    pub fn new(id: ElementId, filter: Option<&str>) -> Self {
        Self {
            id,
            filter: filter.unwrap_or(FILTER_ALL).to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectCard {
    pub id: ElementId,
    pub category: String,
}

impl ProjectCard {
    pub fn new(id: ElementId, category: Option<&str>) -> Self {
        Self {
            id,
            category: category.unwrap_or_default().to_string(),
        }
    }
}

pub fn matches(filter: &str, category: &str) -> bool {
    filter == FILTER_ALL || category == filter
}

pub struct ProjectFilter {
    surface: Rc<dyn Surface>,
    buttons: Vec<FilterButton>,
    cards: Vec<ProjectCard>,
}

impl ProjectFilter {
    pub fn new(surface: Rc<dyn Surface>, buttons: Vec<FilterButton>, cards: Vec<ProjectCard>) -> Self {
        Self {
            surface,
            buttons,
            cards,
        }
    }

    /// Whether there is anything to filter at all.
    pub fn is_active(&self) -> bool {
        !self.buttons.is_empty() && !self.cards.is_empty()
    }

    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    /// Apply the filter of the clicked button. Returns the number of visible
    /// cards, or `None` if the button is unknown or the filter inactive.
    pub fn select(&self, clicked: ElementId) -> Option<usize> {
        if !self.is_active() {
            return None;
        }
        let filter = self.buttons.iter().find(|b| b.id == clicked)?.filter.clone();
        for button in &self.buttons {
            self.surface
                .set_marker(button.id, Marker::Active, button.id == clicked);
        }
        let mut shown = 0;
        for card in &self.cards {
            let visible = matches(&filter, &card.category);
            self.surface.set_marker(card.id, Marker::FilteredOut, !visible);
            self.surface.set_marker(card.id, Marker::Flipped, false);
            shown += usize::from(visible);
        }
        Some(shown)
    }
}
