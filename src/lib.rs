//! Declarative bindings from model keys to DOM updates.
//!
//! A [`BindingsConfig`] maps keys such as `model.href` to one or more binding
//! descriptors. [`Bindings`] normalizes them once and, on every
//! [`run`](Bindings::run), resolves target elements under a root and applies
//! the descriptor's update strategy through the [`Dom`] trait.
//!
//! ```
//! use dom_bindings::{Binding, Bindings, BindingsConfig, ElementId, Value};
//!
//! let (mut doc, root) = html::Document::parse_fragment("<a data-hook=\"link\"></a>");
//! let config = BindingsConfig::new()
//!     .bind("model.href", Binding::attribute().hook("link").name("href"));
//! let mut bindings = Bindings::new(config).unwrap();
//!
//! let url = Value::from("http://example.com/");
//! bindings.run("model", &Value::Undefined, &mut doc, ElementId::from(root), &url, None);
//! assert_eq!(doc.inner_html(root), "<a data-hook=\"link\" href=\"http://example.com/\"></a>");
//! ```

mod bindings;
mod config;
mod dom;
mod error;
mod host;
mod id;
mod kind;
mod resolve;
mod strategy;
mod value;

pub use crate::bindings::Bindings;
pub use crate::config::{Binding, BindingType, BindingsConfig, CaseValue, CustomFn, Names};
pub use crate::dom::{Dom, ToggleMode};
pub use crate::error::ConfigError;
pub use crate::id::ElementId;
pub use crate::kind::{BindingKind, UnknownKind};
pub use crate::resolve::{hook_selector, resolve_targets};
pub use crate::value::Value;
