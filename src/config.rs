//! Binding declarations and their normalization into descriptors.
//!
//! A configuration maps model keys to one or more [`Binding`]s. Declarations
//! come from the builder API or from JSON:
//!
//! ```json
//! {
//!     "model.name": ".name",
//!     "model.active": { "type": "booleanClass", "hook": "card", "name": "active" },
//!     "model.state": [
//!         { "type": "switch", "cases": { "on": ".on", "off": ".off" } },
//!         { "type": "attribute", "selector": "input", "name": "data-state" }
//!     ]
//! }
//! ```
//!
//! A bare string is shorthand for a `text` binding on that selector.

use crate::dom::{Dom, ToggleMode};
use crate::error::ConfigError;
use crate::id::ElementId;
use crate::kind::BindingKind;
use crate::resolve::hook_selector;
use crate::strategy::{AttributeCase, Strategy, Switches, ToggleBranches};
use crate::value::Value;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Caller-supplied update function: `(context, dom, element, value, previous)`.
pub type CustomFn<C> = Arc<dyn Fn(&C, &mut dyn Dom, ElementId, &Value, &Value) + Send + Sync>;

/// Declared `type` of a binding, before validation.
pub enum BindingType<C> {
    Name(String),
    /// A non-string `type` from a JSON document. Never valid; kept so the
    /// error can show what was written.
    Json(serde_json::Value),
    Custom(CustomFn<C>),
}

impl<C> Clone for BindingType<C> {
    fn clone(&self) -> Self {
        match self {
            BindingType::Name(name) => BindingType::Name(name.clone()),
            BindingType::Json(value) => BindingType::Json(value.clone()),
            BindingType::Custom(f) => BindingType::Custom(Arc::clone(f)),
        }
    }
}

impl<C> std::fmt::Debug for BindingType<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingType::Name(name) => f.debug_tuple("Name").field(name).finish(),
            BindingType::Json(value) => f.debug_tuple("Json").field(value).finish(),
            BindingType::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One name or an ordered list of names.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Names {
    One(String),
    Many(Vec<String>),
}

impl Names {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Names::One(name) => vec![name],
            Names::Many(names) => names,
        }
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Names::One(name.to_string())
    }
}

impl From<String> for Names {
    fn from(name: String) -> Self {
        Names::One(name)
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Names::Many(names)
    }
}

impl From<Vec<&str>> for Names {
    fn from(names: Vec<&str>) -> Self {
        Names::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Names {
    fn from(names: [&str; N]) -> Self {
        Names::Many(names.into_iter().map(str::to_string).collect())
    }
}

/// Target of one `cases` entry: a selector, or for `switchAttribute` either a
/// single attribute value or a map of attribute name to value.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CaseValue {
    Selector(String),
    Attributes(BTreeMap<String, String>),
}

impl From<&str> for CaseValue {
    fn from(s: &str) -> Self {
        CaseValue::Selector(s.to_string())
    }
}

impl From<String> for CaseValue {
    fn from(s: String) -> Self {
        CaseValue::Selector(s)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for CaseValue {
    fn from(pairs: [(&str, &str); N]) -> Self {
        CaseValue::Attributes(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// A single binding declaration.
pub struct Binding<C = ()> {
    kind: Option<BindingType<C>>,
    selector: Option<String>,
    hook: Option<String>,
    name: Option<Names>,
    yes: Option<Names>,
    no: Option<Names>,
    invert: bool,
    mode: Option<String>,
    cases: Option<BTreeMap<String, CaseValue>>,
}

impl<C> Clone for Binding<C> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            selector: self.selector.clone(),
            hook: self.hook.clone(),
            name: self.name.clone(),
            yes: self.yes.clone(),
            no: self.no.clone(),
            invert: self.invert,
            mode: self.mode.clone(),
            cases: self.cases.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Binding<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("kind", &self.kind)
            .field("selector", &self.selector)
            .field("hook", &self.hook)
            .field("name", &self.name)
            .field("yes", &self.yes)
            .field("no", &self.no)
            .field("invert", &self.invert)
            .field("mode", &self.mode)
            .field("cases", &self.cases)
            .finish()
    }
}

impl<C> Default for Binding<C> {
    fn default() -> Self {
        Self {
            kind: None,
            selector: None,
            hook: None,
            name: None,
            yes: None,
            no: None,
            invert: false,
            mode: None,
            cases: None,
        }
    }
}

impl<C> Binding<C> {
    pub fn new(kind: BindingKind) -> Self {
        Self::named(kind.as_str())
    }

    /// Binding whose type is given by name; unknown names fail at build time.
    pub fn named(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(BindingType::Name(kind.into())),
            ..Self::default()
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&C, &mut dyn Dom, ElementId, &Value, &Value) + Send + Sync + 'static,
    {
        Self {
            kind: Some(BindingType::Custom(Arc::new(f))),
            ..Self::default()
        }
    }

    /// The bare-string form: a `text` binding on `selector`.
    pub fn shorthand(selector: impl Into<String>) -> Self {
        Self::default().selector(selector)
    }

    pub fn text() -> Self {
        Self::new(BindingKind::Text)
    }

    pub fn class() -> Self {
        Self::new(BindingKind::Class)
    }

    pub fn attribute() -> Self {
        Self::new(BindingKind::Attribute)
    }

    pub fn value() -> Self {
        Self::new(BindingKind::Value)
    }

    pub fn boolean_class() -> Self {
        Self::new(BindingKind::BooleanClass)
    }

    pub fn boolean_attribute() -> Self {
        Self::new(BindingKind::BooleanAttribute)
    }

    pub fn toggle() -> Self {
        Self::new(BindingKind::Toggle)
    }

    pub fn switch() -> Self {
        Self::new(BindingKind::Switch)
    }

    pub fn switch_class() -> Self {
        Self::new(BindingKind::SwitchClass)
    }

    pub fn switch_attribute() -> Self {
        Self::new(BindingKind::SwitchAttribute)
    }

    pub fn inner_html() -> Self {
        Self::new(BindingKind::InnerHtml)
    }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn hook(mut self, hook: impl Into<String>) -> Self {
        self.hook = Some(hook.into());
        self
    }

    pub fn name(mut self, name: impl Into<Names>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn yes(mut self, yes: impl Into<Names>) -> Self {
        self.yes = Some(yes.into());
        self
    }

    pub fn no(mut self, no: impl Into<Names>) -> Self {
        self.no = Some(no.into());
        self
    }

    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn case(mut self, key: impl Into<String>, target: impl Into<CaseValue>) -> Self {
        self.cases
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), target.into());
        self
    }
}

/// Ordered key -> bindings table handed to [`Bindings`](crate::Bindings).
pub struct BindingsConfig<C = ()> {
    entries: Vec<(String, Binding<C>)>,
}

impl<C> Default for BindingsConfig<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C> BindingsConfig<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding under `key`. Repeated keys accumulate.
    pub fn bind(mut self, key: impl Into<String>, binding: Binding<C>) -> Self {
        self.entries.push((key.into(), binding));
        self
    }

    pub fn bind_all(
        mut self,
        key: impl Into<String>,
        bindings: impl IntoIterator<Item = Binding<C>>,
    ) -> Self {
        let key = key.into();
        self.entries
            .extend(bindings.into_iter().map(|b| (key.clone(), b)));
        self
    }

    pub fn shorthand(self, key: impl Into<String>, selector: impl Into<String>) -> Self {
        self.bind(key, Binding::shorthand(selector))
    }

    /// Parse a JSON object of key -> shorthand | descriptor | [descriptor].
    ///
    /// Keys are registered in lexical order.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, RawEntry> = serde_json::from_str(json)?;
        let mut config = Self::new();
        for (key, entry) in raw {
            config = match entry {
                RawEntry::Shorthand(selector) => config.shorthand(key, selector),
                RawEntry::One(binding) => config.bind(key, binding.into()),
                RawEntry::Many(bindings) => {
                    config.bind_all(key, bindings.into_iter().map(Binding::from))
                }
            };
        }
        Ok(config)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn normalize(self) -> Result<Vec<Descriptor<C>>, ConfigError> {
        self.entries
            .into_iter()
            .map(|(key, binding)| normalize_one(key, binding))
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Shorthand(String),
    Many(Vec<RawBinding>),
    One(RawBinding),
}

#[derive(Deserialize)]
struct RawBinding {
    #[serde(rename = "type")]
    kind: Option<serde_json::Value>,
    selector: Option<String>,
    hook: Option<String>,
    name: Option<Names>,
    yes: Option<Names>,
    no: Option<Names>,
    #[serde(default)]
    invert: bool,
    mode: Option<String>,
    cases: Option<BTreeMap<String, CaseValue>>,
}

impl<C> From<RawBinding> for Binding<C> {
    fn from(raw: RawBinding) -> Self {
        let kind = raw.kind.map(|kind| match kind {
            serde_json::Value::String(name) => BindingType::Name(name),
            other => BindingType::Json(other),
        });
        Self {
            kind,
            selector: raw.selector,
            hook: raw.hook,
            name: raw.name,
            yes: raw.yes,
            no: raw.no,
            invert: raw.invert,
            mode: raw.mode,
            cases: raw.cases,
        }
    }
}

/// Canonical, validated form of one binding.
pub(crate) struct Descriptor<C> {
    pub key: String,
    /// Resolution selector; empty means the root element alone.
    pub selector: String,
    pub strategy: Strategy<C>,
}

enum ResolvedType<C> {
    Builtin(BindingKind),
    Custom(CustomFn<C>),
}

fn resolve_type<C>(kind: Option<BindingType<C>>) -> Result<ResolvedType<C>, ConfigError> {
    match kind {
        None => Ok(ResolvedType::Builtin(BindingKind::DEFAULT)),
        Some(BindingType::Custom(f)) => Ok(ResolvedType::Custom(f)),
        Some(BindingType::Name(name)) => name
            .parse()
            .map(ResolvedType::Builtin)
            .map_err(|_| ConfigError::UnknownType(name)),
        Some(BindingType::Json(value)) => Err(ConfigError::UnknownType(value.to_string())),
    }
}

fn normalize_one<C>(key: String, binding: Binding<C>) -> Result<Descriptor<C>, ConfigError> {
    let kind = match resolve_type(binding.kind)? {
        ResolvedType::Custom(f) => {
            let selector = target_selector(binding.selector, binding.hook);
            return Ok(Descriptor {
                key,
                selector,
                strategy: Strategy::Custom(f),
            });
        }
        ResolvedType::Builtin(kind) => kind,
    };

    let names = binding.name.map(Names::into_vec);
    let has_yes_no = binding.yes.is_some() || binding.no.is_some();
    let yes = binding.yes.map(Names::into_vec).unwrap_or_default();
    let no = binding.no.map(Names::into_vec).unwrap_or_default();
    let invert = binding.invert;

    let strategy = match kind {
        BindingKind::Text => Strategy::Text,
        BindingKind::Class => Strategy::Class,
        BindingKind::Value => Strategy::Value,
        BindingKind::InnerHtml => Strategy::InnerHtml,
        BindingKind::Attribute => match names {
            Some(names) => Strategy::Attribute { names },
            None => return Err(ConfigError::MissingName { key, kind }),
        },
        BindingKind::BooleanClass | BindingKind::BooleanAttribute => {
            let switches = if has_yes_no {
                Switches::YesNo { yes, no, invert }
            } else {
                Switches::Names { names, invert }
            };
            if kind == BindingKind::BooleanClass {
                Strategy::BooleanClass(switches)
            } else {
                Strategy::BooleanAttribute(switches)
            }
        }
        BindingKind::Toggle => {
            let mode = toggle_mode(&key, binding.mode)?;
            let branches = has_yes_no.then(|| ToggleBranches {
                yes: selector_group(yes),
                no: selector_group(no),
            });
            Strategy::Toggle {
                mode,
                invert,
                branches,
            }
        }
        BindingKind::Switch | BindingKind::SwitchClass => {
            let Some(cases) = binding.cases else {
                return Err(ConfigError::MissingCases { key, kind });
            };
            let cases = cases
                .into_iter()
                .map(|(case, target)| match target {
                    CaseValue::Selector(selector) => Ok((case, selector)),
                    CaseValue::Attributes(_) => Err(ConfigError::InvalidCase {
                        key: key.clone(),
                        case,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if kind == BindingKind::Switch {
                Strategy::Switch {
                    mode: toggle_mode(&key, binding.mode)?,
                    cases,
                }
            } else {
                Strategy::SwitchClass { names, cases }
            }
        }
        BindingKind::SwitchAttribute => {
            let Some(cases) = binding.cases else {
                return Err(ConfigError::MissingCases { key, kind });
            };
            let cases = cases
                .into_iter()
                .map(|(case, target)| {
                    let target = match target {
                        CaseValue::Selector(value) => AttributeCase::Value(value),
                        CaseValue::Attributes(map) => {
                            AttributeCase::Attributes(map.into_iter().collect())
                        }
                    };
                    (case, target)
                })
                .collect();
            Strategy::SwitchAttribute { names, cases }
        }
    };

    Ok(Descriptor {
        selector: target_selector(binding.selector, binding.hook),
        key,
        strategy,
    })
}

fn toggle_mode(key: &str, mode: Option<String>) -> Result<ToggleMode, ConfigError> {
    match mode {
        None => Ok(ToggleMode::default()),
        Some(mode) => ToggleMode::from_name(&mode).ok_or_else(|| ConfigError::InvalidMode {
            key: key.to_string(),
            mode,
        }),
    }
}

// A string selector (even an empty one) wins over a hook.
fn target_selector(selector: Option<String>, hook: Option<String>) -> String {
    match (selector, hook) {
        (Some(selector), _) => selector,
        (None, Some(hook)) => hook_selector(&hook),
        (None, None) => String::new(),
    }
}

fn selector_group(selectors: Vec<String>) -> Option<String> {
    let selectors: Vec<String> = selectors
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    (!selectors.is_empty()).then(|| selectors.join(", "))
}

#[cfg(test)]
mod tests;
