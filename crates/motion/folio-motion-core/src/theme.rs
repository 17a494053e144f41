//! Theme preference: read once at boot, flipped and persisted on toggle.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{MotionError, StoreError};
use crate::ids::ElementId;
use crate::surface::Surface;

/// Storage key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

/// Persistent string key-value store (browser `localStorage` on the web).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Process-wide theme state, applied as `data-theme` on the body.
pub struct ThemeController {
    store: Rc<dyn KeyValueStore>,
    surface: Rc<dyn Surface>,
    body: Option<ElementId>,
    current: Cell<Theme>,
}

impl ThemeController {
    /// Respect a stored choice; otherwise fall back to dark and persist it.
    pub fn init(store: Rc<dyn KeyValueStore>, surface: Rc<dyn Surface>, body: Option<ElementId>) -> Self {
        let stored = match store.get(THEME_KEY) {
            Ok(value) => value.as_deref().and_then(Theme::parse),
            Err(e) => {
                warn!("theme: could not read preference: {e}");
                None
            }
        };
        let controller = Self {
            store,
            surface,
            body,
            current: Cell::new(stored.unwrap_or_default()),
        };
        controller.apply();
        if stored.is_none() {
            controller.persist_or_warn();
        }
        debug!("theme: {}", controller.current().as_str());
        controller
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    /// Flip the theme, apply it and persist it. Returns the new theme.
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.current.set(next);
        self.apply();
        self.persist_or_warn();
        next
    }

    /// Write the current theme to the store.
    pub fn persist(&self) -> Result<(), MotionError> {
        self.store.set(THEME_KEY, self.current().as_str())?;
        Ok(())
    }

    fn persist_or_warn(&self) {
        if let Err(e) = self.persist() {
            warn!("theme: could not persist preference: {e}");
        }
    }

    fn apply(&self) {
        if let Some(body) = self.body {
            self.surface.set_attribute(body, "data-theme", self.current().as_str());
        }
    }
}
