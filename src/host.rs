//! [`Dom`] implementation for the in-memory [`html::Document`].

use crate::dom::Dom;
use crate::id::ElementId;
use css::SelectorList;
use html::{Document, NodeId};

impl From<NodeId> for ElementId {
    #[inline]
    fn from(id: NodeId) -> Self {
        ElementId::from_raw(u64::from(id.0))
    }
}

// Ids that do not fit a `NodeId` map to one past any real node, which every
// `Document` accessor treats as unknown.
#[inline]
fn node(id: ElementId) -> NodeId {
    NodeId(u32::try_from(id.as_raw()).unwrap_or(u32::MAX))
}

fn parse(selector: &str) -> Option<SelectorList> {
    match css::parse_selector_list(selector) {
        Ok(list) => Some(list),
        Err(err) => {
            log::warn!(target: "bindings.resolve", "ignoring selector {selector:?}: {err}");
            None
        }
    }
}

impl Dom for Document {
    fn dom_id(&self) -> u64 {
        self.id()
    }

    fn query_selector_all(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        let Some(list) = parse(selector) else {
            return Vec::new();
        };
        css::query_all(self, node(root), &list)
            .into_iter()
            .map(ElementId::from)
            .collect()
    }

    fn matches(&self, element: ElementId, selector: &str) -> bool {
        css::parse_selector_list(selector)
            .map(|list| list.matches(self, node(element)))
            .unwrap_or(false)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        Document::add_class(self, node(element), class);
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        Document::remove_class(self, node(element), class);
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        Document::has_class(self, node(element), class)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        Document::attribute(self, node(element), name).map(str::to_string)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        Document::set_attribute(self, node(element), name, value);
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        Document::remove_attribute(self, node(element), name);
    }

    fn has_attribute(&self, element: ElementId, name: &str) -> bool {
        Document::has_attribute(self, node(element), name)
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        self.set_text_content(node(element), text);
    }

    fn set_inner_html(&mut self, element: ElementId, markup: &str) {
        Document::set_inner_html(self, node(element), markup);
    }

    fn value(&self, element: ElementId) -> String {
        Document::value(self, node(element))
    }

    fn set_value(&mut self, element: ElementId, value: &str) {
        Document::set_value(self, node(element), value);
    }

    fn is_focused(&self, element: ElementId) -> bool {
        Document::is_focused(self, node(element))
    }

    fn set_style_property(&mut self, element: ElementId, property: &str, value: &str) {
        css::set_style_property(self, node(element), property, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_convert_at_the_boundary() {
        let id = ElementId::from(NodeId(5));
        assert_eq!(id.as_raw(), 5);
        assert_eq!(node(id), NodeId(5));
        assert_eq!(node(ElementId::from_raw(u64::MAX)), NodeId(u32::MAX));
    }

    #[test]
    fn bad_selector_matches_nothing() {
        let (doc, root) = Document::parse_fragment("<p class=\"a\"></p>");
        let root = ElementId::from(root);
        assert!(doc.query_selector_all(root, "p[").is_empty());
        assert!(!Dom::matches(&doc, root, "))"));
        assert_eq!(doc.query_selector_all(root, ".a").len(), 1);
    }

    #[test]
    fn hide_and_show_edit_inline_style() {
        let (mut doc, root) = Document::parse_fragment("<p style=\"color: red\"></p>");
        let p = doc.first_child(root).unwrap();
        let el = ElementId::from(p);
        doc.hide(el, crate::ToggleMode::Display);
        assert_eq!(css::style_property(&doc, p, "display").as_deref(), Some("none"));
        doc.show(el, crate::ToggleMode::Display);
        assert_eq!(css::style_property(&doc, p, "display"), None);
        assert_eq!(css::style_property(&doc, p, "color").as_deref(), Some("red"));
    }
}
