use crate::syntax::{Declaration, parse_declarations, serialize_declarations};
use html::{Document, NodeId};

// If the element has an inline style attribute, return its value
pub fn get_inline_style(doc: &Document, element: NodeId) -> Option<&str> {
    doc.attribute(element, "style")
}

/// Value of one inline style property, like `el.style.display`.
pub fn style_property(doc: &Document, element: NodeId, property: &str) -> Option<String> {
    let inline = get_inline_style(doc, element)?;
    parse_declarations(inline)
        .into_iter()
        .rev()
        .find(|d| d.name.eq_ignore_ascii_case(property))
        .map(|d| d.value)
}

/// Assign one inline style property, like `el.style.display = value`.
///
/// An empty value removes the property; the `style` attribute itself goes away
/// once no declarations remain.
pub fn set_style_property(doc: &mut Document, element: NodeId, property: &str, value: &str) {
    if !doc.is_element(element) {
        return;
    }
    let property = property.trim().to_ascii_lowercase();
    let mut declarations = get_inline_style(doc, element)
        .map(parse_declarations)
        .unwrap_or_default();
    declarations.retain(|d| d.name != property);
    let value = value.trim();
    if !value.is_empty() {
        declarations.push(Declaration {
            name: property,
            value: value.to_string(),
        });
    }
    if declarations.is_empty() {
        doc.remove_attribute(element, "style");
    } else {
        let serialized = serialize_declarations(&declarations);
        doc.set_attribute(element, "style", &serialized);
    }
}
