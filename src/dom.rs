//! DOM capability trait consumed by the binding strategies.
//!
//! The engine never touches a concrete DOM. Everything it needs, from
//! selector queries to class and attribute edits, text and markup, form values
//! and inline styles, goes through [`Dom`].
//!
//! # Design Principles
//!
//! - Uses [`ElementId`] as the handle type; implementations convert their
//!   native node ids at the boundary.
//! - Object-safe, so custom binding functions receive `&mut dyn Dom`.
//! - Selector strings are passed through verbatim. An implementation that
//!   cannot parse one reports zero matches.

use crate::id::ElementId;

/// How `toggle` and `switch` bindings hide elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleMode {
    /// `display: none` when hidden.
    #[default]
    Display,
    /// `visibility: hidden` when hidden.
    Visibility,
}

impl ToggleMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "display" => Some(ToggleMode::Display),
            "visibility" => Some(ToggleMode::Visibility),
            _ => None,
        }
    }

    pub fn property(self) -> &'static str {
        match self {
            ToggleMode::Display => "display",
            ToggleMode::Visibility => "visibility",
        }
    }

    pub fn hidden_value(self) -> &'static str {
        match self {
            ToggleMode::Display => "none",
            ToggleMode::Visibility => "hidden",
        }
    }
}

pub trait Dom {
    /// Identity of this DOM instance. [`ElementId`]s from different instances
    /// may collide, so state kept per element is also keyed by this.
    fn dom_id(&self) -> u64;

    // =========================================================================
    // Selection
    // =========================================================================

    /// Descendants of `root` (excluding `root`) matching `selector`, in
    /// document order. Comma groups are unions.
    fn query_selector_all(&self, root: ElementId, selector: &str) -> Vec<ElementId>;

    /// Whether `element` itself matches `selector`.
    fn matches(&self, element: ElementId, selector: &str) -> bool;

    // =========================================================================
    // Classes
    // =========================================================================

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    // =========================================================================
    // Attributes
    // =========================================================================

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn remove_attribute(&mut self, element: ElementId, name: &str);

    fn has_attribute(&self, element: ElementId, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    // =========================================================================
    // Content
    // =========================================================================

    fn set_text(&mut self, element: ElementId, text: &str);

    fn set_inner_html(&mut self, element: ElementId, markup: &str);

    // =========================================================================
    // Form controls
    // =========================================================================

    fn value(&self, element: ElementId) -> String;

    fn set_value(&mut self, element: ElementId, value: &str);

    fn is_focused(&self, element: ElementId) -> bool;

    // =========================================================================
    // Style
    // =========================================================================

    /// Set one inline style property. An empty value clears it.
    fn set_style_property(&mut self, element: ElementId, property: &str, value: &str);

    fn show(&mut self, element: ElementId, mode: ToggleMode) {
        self.set_style_property(element, mode.property(), "");
    }

    fn hide(&mut self, element: ElementId, mode: ToggleMode) {
        self.set_style_property(element, mode.property(), mode.hidden_value());
    }
}
