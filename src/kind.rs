use std::fmt;
use std::str::FromStr;

/// Built-in binding types, addressed by their configuration names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Text,
    Class,
    Attribute,
    Value,
    BooleanClass,
    BooleanAttribute,
    Toggle,
    Switch,
    SwitchClass,
    SwitchAttribute,
    InnerHtml,
}

impl BindingKind {
    pub const ALL: [BindingKind; 11] = [
        BindingKind::Text,
        BindingKind::Class,
        BindingKind::Attribute,
        BindingKind::Value,
        BindingKind::BooleanClass,
        BindingKind::BooleanAttribute,
        BindingKind::Toggle,
        BindingKind::Switch,
        BindingKind::SwitchClass,
        BindingKind::SwitchAttribute,
        BindingKind::InnerHtml,
    ];

    /// Type used when a descriptor names none, and for shorthand strings.
    pub const DEFAULT: BindingKind = BindingKind::Text;

    pub fn as_str(self) -> &'static str {
        match self {
            BindingKind::Text => "text",
            BindingKind::Class => "class",
            BindingKind::Attribute => "attribute",
            BindingKind::Value => "value",
            BindingKind::BooleanClass => "booleanClass",
            BindingKind::BooleanAttribute => "booleanAttribute",
            BindingKind::Toggle => "toggle",
            BindingKind::Switch => "switch",
            BindingKind::SwitchClass => "switchClass",
            BindingKind::SwitchAttribute => "switchAttribute",
            BindingKind::InnerHtml => "innerHTML",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized binding type name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl FromStr for BindingKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BindingKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
