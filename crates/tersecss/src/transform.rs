//! Variable namespacing passes.
//!
//! Both passes turn tagged references into [`ValuePart::Var`] references
//! named after the owning class's generated selector, so the same short name
//! in two classes never collides:
//!
//! ```text
//! .box in scope `s`:  $bg[red]      ->  --bg-s_box        (root default `red`)
//!                     hover($c[x])  ->  --c-hover-s_box
//!                     --&pad[8px]   ->  --pad-s_box
//! ```
//!
//! The runtime pass must run before the local pass: runtime defaults may
//! reference locals and are rewritten by the latter.

use std::collections::HashMap;

use crate::types::{PropertyMap, StyleDefinition, ValuePart};

/// Runs both passes in order.
pub fn apply_variables(style: &mut StyleDefinition, selector_name: &str) {
    if style.has_runtime_var {
        apply_runtime_vars(style, selector_name);
    }
    apply_local_vars(style, selector_name);
}

/// Namespaces runtime-bound variables and records their defaults in
/// `root_vars`.
pub fn apply_runtime_vars(style: &mut StyleDefinition, selector_name: &str) {
    let mut base_names = HashMap::new();
    for (name, default) in &style.var_base {
        let namespaced = format!("{name}-{selector_name}");
        style.root_vars.insert(format!("--{namespaced}"), default.clone());
        base_names.insert(name.clone(), namespaced);
    }
    rewrite_runtime(&mut style.base, &base_names);

    for (state, vars) in &style.var_states {
        let names = facet_names(vars.keys(), state, selector_name);
        for (name, default) in vars {
            style
                .root_vars
                .insert(format!("--{}", names[&format!("{name}-{state}")]), default.clone());
        }
        if let Some(props) = style.states.get_mut(state) {
            rewrite_runtime(props, &names);
        }
    }

    for (pseudo, vars) in &style.var_pseudos {
        let names = facet_names(vars.keys(), pseudo, selector_name);
        for (name, default) in vars {
            style
                .root_vars
                .insert(format!("--{}", names[&format!("{name}-{pseudo}")]), default.clone());
        }
        if let Some(props) = style.pseudos.get_mut(pseudo) {
            rewrite_runtime(props, &names);
        }
    }
}

/// Namespaces local variables, rewriting every usage in the class and its
/// query blocks and collecting the declarations in `scoped_vars`.
pub fn apply_local_vars(style: &mut StyleDefinition, selector_name: &str) {
    let names: HashMap<String, String> = style
        .local_vars
        .keys()
        .map(|name| (name.clone(), format!("{name}-{selector_name}")))
        .collect();

    style.scoped_vars.clear();
    for (name, value) in &style.local_vars {
        style
            .scoped_vars
            .insert(format!("--{}", names[name]), value.clone());
    }

    rewrite_locals(style, &names);
}

/// Maps `<var>-<facet>` references to `<var>-<facet>-<selector>`.
fn facet_names<'k>(
    vars: impl Iterator<Item = &'k String>,
    facet: &str,
    selector_name: &str,
) -> HashMap<String, String> {
    vars.map(|name| {
        let reference = format!("{name}-{facet}");
        let namespaced = format!("{reference}-{selector_name}");
        (reference, namespaced)
    })
    .collect()
}

fn rewrite_runtime(props: &mut PropertyMap, names: &HashMap<String, String>) {
    for value in props.values_mut() {
        value.rewrite(|part| match part {
            ValuePart::RuntimeVar(name) => names.get(name).cloned().map(ValuePart::Var),
            _ => None,
        });
    }
}

fn rewrite_locals(style: &mut StyleDefinition, names: &HashMap<String, String>) {
    let rewrite = |props: &mut PropertyMap| {
        for value in props.values_mut() {
            value.rewrite(|part| match part {
                ValuePart::LocalVar(name) => names.get(name).cloned().map(ValuePart::Var),
                _ => None,
            });
        }
    };

    rewrite(&mut style.base);
    style.states.values_mut().for_each(rewrite);
    style.pseudos.values_mut().for_each(rewrite);
    for rule in style.screens.iter_mut().chain(style.containers.iter_mut()) {
        rewrite(&mut rule.props);
    }
    rewrite(&mut style.root_vars);
    rewrite(&mut style.scoped_vars);

    for query in &mut style.queries {
        rewrite_locals(&mut query.style, names);
    }
}
