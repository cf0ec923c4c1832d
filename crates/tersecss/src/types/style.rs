use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::types::value::Value;

/// Resolved property name to value, in insertion order.
pub type PropertyMap = IndexMap<String, Value>;

/// One `screen(...)` or `container(...)` line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaRule {
    /// Parenthesized feature expression, e.g. `(min-width:600px)`.
    pub query: String,
    pub props: PropertyMap,
}

/// A nested `@query <selector> { ... }` block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryBlock {
    pub selector: String,
    pub style: StyleDefinition,
}

/// The intermediate representation of one class, fragment, query block or
/// define group.
///
/// Keys of `base`, `states` and `pseudos` are always resolved property
/// names. Runtime and local references inside values stay tagged until the
/// variable passes in [`crate::transform`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleDefinition {
    pub base: PropertyMap,
    /// State name (`hover`) to its declarations.
    pub states: IndexMap<String, PropertyMap>,
    /// Pseudo-element name (`before`) to its declarations.
    pub pseudos: IndexMap<String, PropertyMap>,
    pub screens: Vec<MediaRule>,
    pub containers: Vec<MediaRule>,
    pub queries: Vec<QueryBlock>,

    /// Local short name to its declared value.
    pub local_vars: IndexMap<String, Value>,
    /// Local names referenced anywhere in this definition.
    pub used_local_vars: BTreeSet<String>,

    /// Runtime variable name to default value, from base lines.
    pub var_base: IndexMap<String, Value>,
    /// State name to runtime variable name to default value.
    pub var_states: IndexMap<String, IndexMap<String, Value>>,
    /// Pseudo-element name to runtime variable name to default value.
    pub var_pseudos: IndexMap<String, IndexMap<String, Value>>,

    /// Namespaced runtime custom properties (`--bg-card_box`) and defaults.
    pub root_vars: PropertyMap,
    /// Namespaced local custom properties (`--pad-card_box`) and values.
    pub scoped_vars: PropertyMap,

    pub has_runtime_var: bool,
}

impl StyleDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the local references of `value` in `used_local_vars`.
    pub fn note_local_usage(&mut self, value: &Value) {
        for name in value.local_vars() {
            self.used_local_vars.insert(name.to_string());
        }
    }

    /// True when only plain `base` declarations are present.
    pub fn is_flat(&self) -> bool {
        self.states.is_empty()
            && self.pseudos.is_empty()
            && self.screens.is_empty()
            && self.containers.is_empty()
            && self.queries.is_empty()
    }
}
