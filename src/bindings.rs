use crate::config::{BindingsConfig, Descriptor};
use crate::dom::Dom;
use crate::error::ConfigError;
use crate::id::ElementId;
use crate::strategy::{BindingState, Update};
use crate::value::Value;

/// Normalized binding table plus the per-binding state carried between runs.
///
/// Built once from a [`BindingsConfig`]; the descriptor table never changes
/// afterwards. `C` is the context handed to custom binding functions.
pub struct Bindings<C = ()> {
    descriptors: Vec<Descriptor<C>>,
    context: C,
    state: BindingState,
}

impl Bindings<()> {
    pub fn new(config: BindingsConfig<()>) -> Result<Self, ConfigError> {
        Self::with_context(config, ())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::new(BindingsConfig::from_json_str(json)?)
    }
}

impl<C> Bindings<C> {
    pub fn with_context(config: BindingsConfig<C>, context: C) -> Result<Self, ConfigError> {
        let descriptors = config.normalize()?;
        log::debug!(
            target: "bindings.config",
            "normalized {} binding(s)",
            descriptors.len()
        );
        Ok(Self {
            descriptors,
            context,
            state: BindingState::default(),
        })
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Number of normalized descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Distinct registered keys in registration order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for descriptor in &self.descriptors {
            if !keys.contains(&descriptor.key.as_str()) {
                keys.push(&descriptor.key);
            }
        }
        keys
    }

    /// Apply `value` to every binding at `key` or below it.
    ///
    /// `previous` is the host's notion of the prior value; `hint` is the
    /// changed attribute's name, used where a binding declares no `name`.
    /// Unknown keys and selectors with no matches do nothing.
    pub fn run(
        &mut self,
        key: &str,
        previous: &Value,
        dom: &mut dyn Dom,
        root: ElementId,
        value: &Value,
        hint: Option<&str>,
    ) {
        let mut ran = 0usize;
        for (slot, descriptor) in self.descriptors.iter().enumerate() {
            if !key_selects(key, &descriptor.key) {
                continue;
            }
            let update = Update {
                root,
                selector: &descriptor.selector,
                value,
                previous,
                hint,
            };
            descriptor
                .strategy
                .apply(&self.context, &mut *dom, slot, &update, &mut self.state);
            ran += 1;
        }
        log::trace!(target: "bindings.run", "run {key:?}: {ran} binding(s)");
    }
}

impl<C> std::fmt::Debug for Bindings<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bindings")
            .field("keys", &self.keys())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Whether running `requested` reaches a binding registered at `registered`.
fn key_selects(requested: &str, registered: &str) -> bool {
    if requested.is_empty() {
        return true;
    }
    match registered.strip_prefix(requested) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
