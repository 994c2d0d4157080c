use crate::syntax::{AttributeOp, Combinator, ComplexSelector, Compound, Selector, SelectorList};
use html::{Document, NodeId};

// Check if an element matches a single simple selector
fn matches_simple(doc: &Document, element: NodeId, selector: &Selector) -> bool {
    match selector {
        Selector::Universal => true,
        Selector::Type(t) => doc.tag_name(element).is_some_and(|n| n.eq_ignore_ascii_case(t)),
        Selector::Id(want) => doc.attribute(element, "id") == Some(want.as_str()),
        Selector::Class(want) => doc.has_class(element, want),
        Selector::Attribute { name, matcher } => {
            let Some(actual) = doc.attribute(element, name) else {
                return false;
            };
            match matcher {
                None => true,
                Some((op, want)) => matches_attribute(actual, *op, want),
            }
        }
    }
}

fn matches_attribute(actual: &str, op: AttributeOp, want: &str) -> bool {
    match op {
        AttributeOp::Equals => actual == want,
        // Token-set semantics: `hello other` includes `other`, `otherthing` does not.
        AttributeOp::Includes => {
            !want.is_empty()
                && !want.contains(|c: char| c.is_ascii_whitespace())
                && actual.split_ascii_whitespace().any(|t| t == want)
        }
        AttributeOp::DashMatch => {
            actual == want
                || actual
                    .strip_prefix(want)
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        AttributeOp::Prefix => !want.is_empty() && actual.starts_with(want),
        AttributeOp::Suffix => !want.is_empty() && actual.ends_with(want),
        AttributeOp::Substring => !want.is_empty() && actual.contains(want),
    }
}

fn matches_compound(doc: &Document, element: NodeId, compound: &Compound) -> bool {
    doc.is_element(element) && compound.0.iter().all(|s| matches_simple(doc, element, s))
}

fn parent_element(doc: &Document, id: NodeId) -> Option<NodeId> {
    doc.parent(id).filter(|p| doc.is_element(*p))
}

// Right-to-left: `index` is the compound that must match `element`.
fn matches_from(doc: &Document, element: NodeId, complex: &ComplexSelector, index: usize) -> bool {
    if !matches_compound(doc, element, &complex.compounds[index]) {
        return false;
    }
    if index == 0 {
        return true;
    }
    match complex.combinators[index - 1] {
        Combinator::Child => {
            parent_element(doc, element).is_some_and(|p| matches_from(doc, p, complex, index - 1))
        }
        Combinator::Descendant => {
            let mut ancestor = parent_element(doc, element);
            while let Some(a) = ancestor {
                if matches_from(doc, a, complex, index - 1) {
                    return true;
                }
                ancestor = parent_element(doc, a);
            }
            false
        }
    }
}

impl ComplexSelector {
    pub fn matches(&self, doc: &Document, element: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => matches_from(doc, element, self, n - 1),
        }
    }
}

impl SelectorList {
    pub fn matches(&self, doc: &Document, element: NodeId) -> bool {
        self.0.iter().any(|c| c.matches(doc, element))
    }
}

/// Descendants of `root` (root excluded) matching `selectors`, in document order.
///
/// Like `querySelectorAll`, ancestors above `root` still take part in
/// combinator matching.
pub fn query_all(doc: &Document, root: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
    doc.descendant_elements(root)
        .into_iter()
        .filter(|e| selectors.matches(doc, *e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_selector_list;

    fn select(doc: &Document, root: NodeId, selector: &str) -> Vec<NodeId> {
        let list = parse_selector_list(selector).expect("valid selector");
        query_all(doc, root, &list)
    }

    fn ids(doc: &Document, nodes: &[NodeId]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| doc.attribute(*n, "id").unwrap_or("?").to_string())
            .collect()
    }

    #[test]
    fn comma_group_is_union_in_document_order() {
        let (doc, root) = Document::parse_fragment(
            r#"<span id="1" class="b"></span><span id="2" class="a"></span><i id="3"></i>"#,
        );
        let found = select(&doc, root, ".a, .b");
        assert_eq!(ids(&doc, &found), vec!["1", "2"]);
    }

    #[test]
    fn hook_token_matching() {
        let (doc, root) = Document::parse_fragment(
            r#"<span id="1" data-hook="hello other"></span><span id="2" data-hook="otherthing"></span>"#,
        );
        let found = select(&doc, root, r#"[data-hook~="other"]"#);
        assert_eq!(ids(&doc, &found), vec!["1"]);
    }

    #[test]
    fn root_is_not_part_of_query_all() {
        let (doc, root) = Document::parse_fragment("<div id=\"1\"></div>");
        let list = parse_selector_list("div").expect("valid selector");
        assert!(list.matches(&doc, root));
        assert_eq!(ids(&doc, &query_all(&doc, root, &list)), vec!["1"]);
    }

    #[test]
    fn combinators() {
        let (doc, root) = Document::parse_fragment(
            r#"<ul id="u"><li id="a"><p id="p"><b id="b1"></b></p></li></ul><b id="b2"></b>"#,
        );
        assert_eq!(ids(&doc, &select(&doc, root, "ul b")), vec!["b1"]);
        assert_eq!(ids(&doc, &select(&doc, root, "li > p > b")), vec!["b1"]);
        assert!(select(&doc, root, "ul > b").is_empty());
        assert_eq!(ids(&doc, &select(&doc, root, "div > b")), vec!["b2"]);
    }

    #[test]
    fn attribute_operators() {
        let (doc, root) = Document::parse_fragment(
            r#"<a id="1" href="/docs/intro" lang="en-US"></a><a id="2" href="https://x.test"></a>"#,
        );
        assert_eq!(ids(&doc, &select(&doc, root, "[href^='/']")), vec!["1"]);
        assert_eq!(ids(&doc, &select(&doc, root, "[href$=test]")), vec!["2"]);
        assert_eq!(ids(&doc, &select(&doc, root, "[href*=docs]")), vec!["1"]);
        assert_eq!(ids(&doc, &select(&doc, root, "[lang|=en]")), vec!["1"]);
        assert_eq!(ids(&doc, &select(&doc, root, "[id='2']")), vec!["2"]);
        assert!(select(&doc, root, "[href^='']").is_empty());
    }

    #[test]
    fn type_and_universal() {
        let (doc, root) = Document::parse_fragment(r#"<p id="1"></p>text<span id="2"></span>"#);
        assert_eq!(ids(&doc, &select(&doc, root, "*")), vec!["1", "2"]);
        assert_eq!(ids(&doc, &select(&doc, root, "SPAN")), vec!["2"]);
    }
}
