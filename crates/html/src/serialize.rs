use crate::document::{Document, NodeKind};
use crate::entities::{escape_attribute, escape_text};
use crate::tokenizer::{is_rawtext_element, is_void_element};
use crate::types::NodeId;

/// Serialize `id` and its subtree the way `outerHTML` does.
///
/// Attribute order is preserved. Valueless attributes are written as `name=""`.
pub(crate) fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.kind(id) {
        Some(NodeKind::Document) => {
            for child in doc.children(id) {
                write_node(doc, *child, out);
            }
        }
        Some(NodeKind::Element { name, attributes }) => {
            out.push('<');
            out.push_str(name);
            for (k, v) in attributes {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                escape_attribute(v.as_deref().unwrap_or(""), out);
                out.push('"');
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            let raw = is_rawtext_element(name);
            for child in doc.children(id) {
                match doc.kind(*child) {
                    Some(NodeKind::Text { text }) if raw => out.push_str(text),
                    _ => write_node(doc, *child, out),
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Some(NodeKind::Text { text }) => escape_text(text, out),
        Some(NodeKind::Comment { text }) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        None => {}
    }
}
