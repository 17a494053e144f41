//! JSON page descriptions and their conversion into a [`PageLayout`].
//!
//! Elements are referred to by name; [`BuiltPage::id`] maps a name back to
//! the id the layout was built with.

use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use folio_motion_core::{
    AnimatableElement, CopyTarget, ElementId, FilterButton, IdAllocator, MeterParts, NavButton,
    PageLayout, ProjectCard,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageFixture {
    pub body: Option<String>,
    pub navbar: Option<String>,
    pub nav_toggle: Option<String>,
    pub nav_buttons: Vec<NavButtonFixture>,
    pub sections: Vec<SectionFixture>,
    pub progress_bar: Option<String>,
    pub back_to_top: Option<String>,
    pub typed_text: Option<String>,
    pub reveals: Vec<RevealFixture>,
    pub counter_container: Option<String>,
    pub counters: Vec<CounterFixture>,
    pub filter_buttons: Vec<FilterFixture>,
    pub project_cards: Vec<CardFixture>,
    pub copy: Option<CopyFixture>,
}

#[derive(Debug, Deserialize)]
pub struct NavButtonFixture {
    pub name: String,
    #[serde(default)]
    pub onclick: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SectionFixture {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RevealKind {
    Generic,
    RadialMeter,
}

#[derive(Debug, Deserialize)]
pub struct RevealFixture {
    pub name: String,
    pub kind: RevealKind,
    #[serde(default)]
    pub percent: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub dial: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CounterFixture {
    pub name: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterFixture {
    pub name: String,
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CardFixture {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CopyFixture {
    pub button: String,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// A layout plus the name -> id table it was built from.
pub struct BuiltPage {
    pub layout: PageLayout,
    pub reveals: Vec<Rc<AnimatableElement>>,
    pub counters: Vec<Rc<AnimatableElement>>,
    ids: HashMap<String, ElementId>,
}

impl BuiltPage {
    pub fn id(&self, name: &str) -> Result<ElementId> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("no element named '{name}' in fixture"))
    }

    pub fn element_count(&self) -> usize {
        self.ids.len()
    }
}

#[derive(Default)]
struct Namer {
    alloc: IdAllocator,
    ids: HashMap<String, ElementId>,
}

impl Namer {
    fn id(&mut self, name: &str) -> ElementId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = self.alloc.alloc_element();
        self.ids.insert(name.to_string(), id);
        id
    }

    fn opt(&mut self, name: &Option<String>) -> Option<ElementId> {
        name.as_deref().map(|n| self.id(n))
    }
}

impl PageFixture {
    /// Allocate ids for every named element and build the layout. The
    /// returned page keeps extra handles on the reveal and counter records so
    /// tests can inspect their idempotence flags.
    pub fn build(&self) -> BuiltPage {
        let mut namer = Namer::default();

        let reveals: Vec<Rc<AnimatableElement>> = self
            .reveals
            .iter()
            .map(|r| {
                let id = namer.id(&r.name);
                Rc::new(match r.kind {
                    RevealKind::Generic => AnimatableElement::generic(id),
                    RevealKind::RadialMeter => {
                        let parts = match (&r.label, &r.dial) {
                            (Some(label), Some(dial)) => Some(MeterParts {
                                label: namer.id(label),
                                dial: namer.id(dial),
                            }),
                            _ => None,
                        };
                        AnimatableElement::meter_from_attributes(id, r.percent.as_deref(), parts)
                    }
                })
            })
            .collect();

        let counters: Vec<Rc<AnimatableElement>> = self
            .counters
            .iter()
            .map(|c| {
                Rc::new(AnimatableElement::counter_from_attributes(
                    namer.id(&c.name),
                    c.target.as_deref(),
                    c.suffix.as_deref(),
                ))
            })
            .collect();

        let nav_buttons: Vec<NavButton> = self
            .nav_buttons
            .iter()
            .map(|b| NavButton::from_onclick(namer.id(&b.name), b.onclick.as_deref()))
            .collect();
        let sections: Vec<(ElementId, String)> = self
            .sections
            .iter()
            .map(|s| (namer.id(&s.name), s.id.clone()))
            .collect();
        let filter_buttons: Vec<FilterButton> = self
            .filter_buttons
            .iter()
            .map(|b| FilterButton::new(namer.id(&b.name), b.filter.as_deref()))
            .collect();
        let project_cards: Vec<ProjectCard> = self
            .project_cards
            .iter()
            .map(|c| ProjectCard::new(namer.id(&c.name), c.category.as_deref()))
            .collect();
        let copy = self.copy.as_ref().map(|c| CopyTarget {
            button: namer.id(&c.button),
            feedback: namer.opt(&c.feedback),
        });

        let layout = PageLayout {
            body: namer.opt(&self.body),
            navbar: namer.opt(&self.navbar),
            nav_toggle: namer.opt(&self.nav_toggle),
            nav_buttons,
            sections,
            progress_bar: namer.opt(&self.progress_bar),
            back_to_top: namer.opt(&self.back_to_top),
            typed_text: namer.opt(&self.typed_text),
            reveals: reveals.clone(),
            counter_container: namer.opt(&self.counter_container),
            counters: counters.clone(),
            filter_buttons,
            project_cards,
            copy,
        };

        BuiltPage {
            layout,
            reveals,
            counters,
            ids: namer.ids,
        }
    }
}
