//! Merging of partial style definitions.
//!
//! Used when a class pulls in `@const` fragments with `@use`, and when a
//! line resolves to a define-table group. Values already in the target are
//! overwritten; facets the source does not mention are left untouched.

use indexmap::IndexMap;

use crate::types::{PropertyMap, StyleDefinition, Value};

pub fn merge(target: &mut StyleDefinition, source: &StyleDefinition) {
    extend(&mut target.base, &source.base);
    merge_nested(&mut target.states, &source.states);
    merge_nested(&mut target.pseudos, &source.pseudos);

    target.screens.extend(source.screens.iter().cloned());
    target.containers.extend(source.containers.iter().cloned());

    extend(&mut target.var_base, &source.var_base);
    merge_nested(&mut target.var_states, &source.var_states);
    merge_nested(&mut target.var_pseudos, &source.var_pseudos);
    extend(&mut target.root_vars, &source.root_vars);

    target.used_local_vars.extend(source.used_local_vars.iter().cloned());
    target.has_runtime_var |= source.has_runtime_var;
}

fn extend(target: &mut PropertyMap, source: &PropertyMap) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

fn merge_nested(
    target: &mut IndexMap<String, IndexMap<String, Value>>,
    source: &IndexMap<String, IndexMap<String, Value>>,
) {
    for (name, props) in source {
        extend(target.entry(name.clone()).or_default(), props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaRule;

    fn props(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::literal(*v)))
            .collect()
    }

    #[test]
    fn base_values_are_overwritten_in_place() {
        let mut target = StyleDefinition {
            base: props(&[("color", "red"), ("padding", "4px")]),
            ..Default::default()
        };
        let source = StyleDefinition {
            base: props(&[("color", "blue"), ("margin", "0")]),
            ..Default::default()
        };
        merge(&mut target, &source);

        let keys: Vec<_> = target.base.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["color", "padding", "margin"]);
        assert_eq!(target.base["color"].to_string(), "blue");
    }

    #[test]
    fn states_merge_per_key() {
        let mut target = StyleDefinition::default();
        target
            .states
            .insert("hover".into(), props(&[("color", "red"), ("opacity", "1")]));
        target.states.insert("focus".into(), props(&[("outline", "none")]));

        let mut source = StyleDefinition::default();
        source.states.insert("hover".into(), props(&[("color", "blue")]));
        merge(&mut target, &source);

        assert_eq!(target.states["hover"]["color"].to_string(), "blue");
        assert_eq!(target.states["hover"]["opacity"].to_string(), "1");
        assert!(target.states.contains_key("focus"));
    }

    #[test]
    fn screens_are_appended_without_dedupe() {
        let rule = MediaRule {
            query: "(min-width:600px)".into(),
            props: props(&[("display", "flex")]),
        };
        let mut target = StyleDefinition {
            screens: vec![rule.clone()],
            ..Default::default()
        };
        let source = StyleDefinition {
            screens: vec![rule],
            ..Default::default()
        };
        merge(&mut target, &source);
        assert_eq!(target.screens.len(), 2);
    }
}
