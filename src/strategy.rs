//! Update strategies: how a new value is written to resolved elements.

use crate::config::CustomFn;
use crate::dom::{Dom, ToggleMode};
use crate::id::ElementId;
use crate::resolve::resolve_targets;
use crate::value::Value;
use std::collections::HashMap;

/// `booleanClass` / `booleanAttribute` targets.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Switches {
    /// Present when truthy, absent otherwise. `None` falls back to the run hint.
    Names {
        names: Option<Vec<String>>,
        invert: bool,
    },
    /// `yes` when truthy, `no` otherwise.
    YesNo {
        yes: Vec<String>,
        no: Vec<String>,
        invert: bool,
    },
}

/// Explicit `toggle` branches, already joined into selector groups.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ToggleBranches {
    pub yes: Option<String>,
    pub no: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum AttributeCase {
    /// Written to the binding's `name` attribute(s).
    Value(String),
    Attributes(Vec<(String, String)>),
}

pub(crate) enum Strategy<C> {
    Text,
    Class,
    Attribute {
        names: Vec<String>,
    },
    Value,
    BooleanClass(Switches),
    BooleanAttribute(Switches),
    Toggle {
        mode: ToggleMode,
        invert: bool,
        branches: Option<ToggleBranches>,
    },
    Switch {
        mode: ToggleMode,
        cases: Vec<(String, String)>,
    },
    SwitchClass {
        names: Option<Vec<String>>,
        cases: Vec<(String, String)>,
    },
    SwitchAttribute {
        names: Option<Vec<String>>,
        cases: Vec<(String, AttributeCase)>,
    },
    InnerHtml,
    Custom(CustomFn<C>),
}

/// State kept across runs, keyed by descriptor slot.
#[derive(Debug, Default)]
pub(crate) struct BindingState {
    /// Class tokens last added by a `class` binding, per (slot, dom, element).
    applied_classes: HashMap<(usize, u64, ElementId), Vec<String>>,
    /// Last value passed to a custom binding.
    last_values: HashMap<usize, Value>,
}

impl BindingState {
    /// Number of elements a `class` binding currently tracks.
    #[cfg(test)]
    pub fn tracked_classes(&self, slot: usize) -> usize {
        self.applied_classes
            .keys()
            .filter(|(s, _, _)| *s == slot)
            .count()
    }
}

/// One invocation of a binding.
pub(crate) struct Update<'a> {
    pub root: ElementId,
    pub selector: &'a str,
    pub value: &'a Value,
    pub previous: &'a Value,
    pub hint: Option<&'a str>,
}

impl<C> Strategy<C> {
    pub fn apply(
        &self,
        context: &C,
        dom: &mut dyn Dom,
        slot: usize,
        update: &Update<'_>,
        state: &mut BindingState,
    ) {
        let value = update.value;
        match self {
            Strategy::Text => {
                let text = value.to_content_string();
                for el in targets(dom, update) {
                    dom.set_text(el, &text);
                }
            }
            Strategy::Class => {
                let next: Vec<String> = value
                    .to_content_string()
                    .split_ascii_whitespace()
                    .map(str::to_string)
                    .collect();
                let dom_id = dom.dom_id();
                let found = targets(dom, update);
                for &el in &found {
                    let prev = state
                        .applied_classes
                        .remove(&(slot, dom_id, el))
                        .unwrap_or_default();
                    for class in prev.iter().filter(|c| !next.contains(c)) {
                        dom.remove_class(el, class);
                    }
                    for class in &next {
                        dom.add_class(el, class);
                    }
                    if !next.is_empty() {
                        state.applied_classes.insert((slot, dom_id, el), next.clone());
                    }
                }
                // Elements this binding no longer reaches are forgotten.
                state.applied_classes.retain(|&(s, d, el), _| {
                    s != slot || d != dom_id || found.contains(&el)
                });
            }
            Strategy::Attribute { names } => {
                let text = value.to_content_string();
                for el in targets(dom, update) {
                    for name in names {
                        dom.set_attribute(el, name, &text);
                    }
                }
            }
            Strategy::Value => {
                let text = match value {
                    Value::Number(n) if n.is_nan() => String::new(),
                    other => other.to_content_string(),
                };
                for el in targets(dom, update) {
                    if dom.is_focused(el) {
                        continue;
                    }
                    dom.set_value(el, &text);
                }
            }
            Strategy::BooleanClass(switches) => {
                let Some((add, remove)) = switches.split(value, update.hint) else {
                    return;
                };
                for el in targets(dom, update) {
                    for name in &remove {
                        dom.remove_class(el, name);
                    }
                    for name in &add {
                        dom.add_class(el, name);
                    }
                }
            }
            Strategy::BooleanAttribute(switches) => {
                let Some((add, remove)) = switches.split(value, update.hint) else {
                    return;
                };
                for el in targets(dom, update) {
                    for name in &remove {
                        dom.remove_attribute(el, name);
                    }
                    for name in &add {
                        dom.set_attribute(el, name, "");
                    }
                }
            }
            Strategy::Toggle {
                mode,
                invert,
                branches,
            } => {
                let visible = value.is_truthy() != *invert;
                match branches {
                    None => {
                        for el in targets(dom, update) {
                            if visible {
                                dom.show(el, *mode);
                            } else {
                                dom.hide(el, *mode);
                            }
                        }
                    }
                    Some(ToggleBranches { yes, no }) => {
                        let yes = select(dom, update.root, yes.as_deref());
                        let no = select(dom, update.root, no.as_deref());
                        let (shown, hidden) = if visible { (yes, no) } else { (no, yes) };
                        reveal(dom, *mode, &shown, &hidden);
                    }
                }
            }
            Strategy::Switch { mode, cases } => {
                let key = value.to_key_string();
                let mut shown = Vec::new();
                let mut hidden = Vec::new();
                for (case, selector) in cases {
                    let found = resolve_targets(dom, update.root, selector);
                    if *case == key {
                        shown.extend(found);
                    } else {
                        hidden.extend(found);
                    }
                }
                reveal(dom, *mode, &shown, &hidden);
            }
            Strategy::SwitchClass { names, cases } => {
                let Some(names) = names_or_hint(names.as_deref(), update.hint) else {
                    log::debug!(target: "bindings.run", "switchClass has no class name");
                    return;
                };
                let key = value.to_key_string();
                let mut on = Vec::new();
                let mut off = Vec::new();
                for (case, selector) in cases {
                    let found = resolve_targets(dom, update.root, selector);
                    if *case == key {
                        on.extend(found);
                    } else {
                        off.extend(found);
                    }
                }
                for &el in off.iter().filter(|el| !on.contains(el)) {
                    for name in &names {
                        dom.remove_class(el, name);
                    }
                }
                for &el in &on {
                    for name in &names {
                        dom.add_class(el, name);
                    }
                }
            }
            Strategy::SwitchAttribute { names, cases } => {
                let names = names_or_hint(names.as_deref(), update.hint).unwrap_or_default();
                let key = value.to_key_string();
                let mut declared: Vec<String> = Vec::new();
                let mut assigned: Vec<(String, String)> = Vec::new();
                for (case, target) in cases {
                    let pairs: Vec<(String, String)> = match target {
                        AttributeCase::Value(v) => {
                            names.iter().map(|n| (n.clone(), v.clone())).collect()
                        }
                        AttributeCase::Attributes(pairs) => pairs.clone(),
                    };
                    for (name, _) in &pairs {
                        if !declared.contains(name) {
                            declared.push(name.clone());
                        }
                    }
                    if *case == key {
                        assigned = pairs;
                    }
                }
                for el in targets(dom, update) {
                    for name in &declared {
                        if !assigned.iter().any(|(n, _)| n == name) {
                            dom.remove_attribute(el, name);
                        }
                    }
                    for (name, v) in &assigned {
                        dom.set_attribute(el, name, v);
                    }
                }
            }
            Strategy::InnerHtml => {
                let markup = value.to_content_string();
                for el in targets(dom, update) {
                    dom.set_inner_html(el, &markup);
                }
            }
            Strategy::Custom(f) => {
                let previous = state
                    .last_values
                    .get(&slot)
                    .cloned()
                    .unwrap_or_else(|| update.previous.clone());
                for el in targets(dom, update) {
                    f(context, &mut *dom, el, value, &previous);
                }
                state.last_values.insert(slot, value.clone());
            }
        }
    }
}

impl Switches {
    /// Names to add and names to remove for `value`, or `None` when there is
    /// nothing to switch.
    fn split(&self, value: &Value, hint: Option<&str>) -> Option<(Vec<String>, Vec<String>)> {
        match self {
            Switches::Names { names, invert } => {
                let Some(names) = names_or_hint(names.as_deref(), hint) else {
                    log::debug!(target: "bindings.run", "boolean binding has no name");
                    return None;
                };
                if value.is_truthy() != *invert {
                    Some((names, Vec::new()))
                } else {
                    Some((Vec::new(), names))
                }
            }
            Switches::YesNo { yes, no, invert } => {
                let on = value.is_truthy() != *invert;
                let (add, remove) = if on { (yes, no) } else { (no, yes) };
                Some((add.clone(), remove.clone()))
            }
        }
    }
}

fn targets(dom: &dyn Dom, update: &Update<'_>) -> Vec<ElementId> {
    resolve_targets(dom, update.root, update.selector)
}

fn select(dom: &dyn Dom, root: ElementId, selector: Option<&str>) -> Vec<ElementId> {
    selector
        .map(|s| resolve_targets(dom, root, s))
        .unwrap_or_default()
}

fn names_or_hint(names: Option<&[String]>, hint: Option<&str>) -> Option<Vec<String>> {
    match (names, hint) {
        (Some(names), _) => Some(names.to_vec()),
        (None, Some(hint)) if !hint.is_empty() => Some(vec![hint.to_string()]),
        _ => None,
    }
}

// Elements in both sets stay visible.
fn reveal(dom: &mut dyn Dom, mode: ToggleMode, shown: &[ElementId], hidden: &[ElementId]) {
    for &el in hidden.iter().filter(|el| !shown.contains(el)) {
        dom.hide(el, mode);
    }
    for &el in shown {
        dom.show(el, mode);
    }
}
