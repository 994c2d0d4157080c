//! Element resolution for a binding's selector.

use crate::dom::Dom;
use crate::id::ElementId;

/// Selector matching every element whose `data-hook` token list contains any
/// of the whitespace-separated names in `hook`.
pub fn hook_selector(hook: &str) -> String {
    hook.split_ascii_whitespace()
        .map(|name| format!("[data-hook~=\"{name}\"]"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Elements a binding acts on under `root`.
///
/// An empty selector targets `root` alone. Otherwise `root` is included first
/// when it matches itself, followed by matching descendants in document order.
pub fn resolve_targets(dom: &dyn Dom, root: ElementId, selector: &str) -> Vec<ElementId> {
    if selector.trim().is_empty() {
        return vec![root];
    }
    let mut targets = Vec::new();
    if dom.matches(root, selector) {
        targets.push(root);
    }
    targets.extend(
        dom.query_selector_all(root, selector)
            .into_iter()
            .filter(|&el| el != root),
    );
    log::trace!(
        target: "bindings.resolve",
        "{selector:?} resolved to {} element(s)",
        targets.len()
    );
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_selector_single() {
        assert_eq!(hook_selector("user"), "[data-hook~=\"user\"]");
    }

    #[test]
    fn hook_selector_splits_on_whitespace() {
        assert_eq!(
            hook_selector(" a  b "),
            "[data-hook~=\"a\"], [data-hook~=\"b\"]"
        );
        assert_eq!(hook_selector("   "), "");
    }
}
