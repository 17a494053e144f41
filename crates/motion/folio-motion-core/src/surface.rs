//! Rendering surface: the only way the core writes to the page.

use crate::element::Marker;
use crate::ids::ElementId;

/// Write-only view of the page. Implementations silently ignore ids they do
/// not know; a missing element is never an error.
pub trait Surface {
    /// Replace the element's text content.
    fn set_text(&self, element: ElementId, text: &str);
    /// Add (`on == true`) or remove a marker.
    fn set_marker(&self, element: ElementId, marker: Marker, on: bool);
    /// Angular sweep of a radial meter dial, in degrees.
    fn set_sweep(&self, element: ElementId, degrees: f64);
    /// Inline style property (e.g. the scroll progress bar width).
    fn set_style(&self, element: ElementId, property: &str, value: &str);
    /// Plain attribute write (`aria-expanded`, `data-theme`, ...).
    fn set_attribute(&self, element: ElementId, name: &str, value: &str);
}
