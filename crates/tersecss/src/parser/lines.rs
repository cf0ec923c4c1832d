//! Base, state and pseudo-element line parsers.

use crate::error::{Facet, Owner, Result, TerseError};
use crate::merge::merge;
use crate::parser::dispatch::LineContext;
use crate::parser::resolve::{Resolved, resolve_token};
use crate::parser::token::split_tokens;
use crate::types::{PropertyMap, StyleDefinition, Value};

/// Parses a plain line of one or more `abbr[value]` tokens.
pub fn parse_base_line(ctx: &LineContext<'_>, style: &mut StyleDefinition, line: &str) -> Result<()> {
    for raw in split_tokens(line) {
        match resolve_token(ctx, &style.local_vars, &Facet::Base, raw)? {
            Resolved::Declaration { property, value } => {
                style.note_local_usage(&value);
                style.base.insert(property, value);
            }
            Resolved::LocalDeclaration { name, value } => {
                if style.local_vars.contains_key(&name) {
                    return Err(TerseError::DuplicateLocalVar {
                        name,
                        owner: ctx.owner.clone(),
                    });
                }
                style.note_local_usage(&value);
                style.local_vars.insert(name, value);
            }
            Resolved::RuntimeVar {
                name,
                property,
                default,
                important,
            } => {
                style.has_runtime_var = true;
                style.note_local_usage(&default);
                style.base.insert(property, Value::runtime(name.clone()).with_important(important));
                style.var_base.insert(name, default);
            }
            Resolved::Group(group) => merge(style, group),
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacetKind {
    State,
    Pseudo,
}

/// Parses `<state>(<list>)` or `<pseudo>(<list>)`; `inner` is the list.
pub fn parse_facet_line(
    ctx: &LineContext<'_>,
    style: &mut StyleDefinition,
    kind: FacetKind,
    name: &str,
    inner: &str,
) -> Result<()> {
    let facet = match kind {
        FacetKind::State => Facet::State(name.to_string()),
        FacetKind::Pseudo => Facet::Pseudo(name.to_string()),
    };

    let tokens = split_tokens(inner);
    if tokens.is_empty() {
        return Err(TerseError::InvalidSyntax(format!(
            "{facet} in {} has no declarations",
            ctx.owner
        )));
    }

    for raw in tokens {
        let resolved = resolve_token(ctx, &style.local_vars, &facet, raw)?;
        match resolved {
            Resolved::Declaration { property, value } => {
                style.note_local_usage(&value);
                facet_map(style, kind, name).insert(property, value);
            }
            // Rejected by `resolve_token` outside base lines.
            Resolved::LocalDeclaration { .. } => {
                return Err(TerseError::not_allowed(
                    format!("local variable declarations inside {facet} are"),
                    ctx.owner,
                ));
            }
            Resolved::RuntimeVar {
                name: var,
                property,
                default,
                important,
            } => {
                style.has_runtime_var = true;
                style.note_local_usage(&default);
                let reference = Value::runtime(format!("{var}-{name}")).with_important(important);
                facet_map(style, kind, name).insert(property, reference);
                let bindings = match kind {
                    FacetKind::State => &mut style.var_states,
                    FacetKind::Pseudo => &mut style.var_pseudos,
                };
                bindings.entry(name.to_string()).or_default().insert(var, default);
            }
            Resolved::Group(group) => {
                extend_with_group(facet_map(style, kind, name), group, &facet, ctx.owner)?;
            }
        }
    }
    Ok(())
}

fn facet_map<'s>(style: &'s mut StyleDefinition, kind: FacetKind, name: &str) -> &'s mut PropertyMap {
    let facets = match kind {
        FacetKind::State => &mut style.states,
        FacetKind::Pseudo => &mut style.pseudos,
    };
    facets.entry(name.to_string()).or_default()
}

/// Copies a define group's base declarations into a facet's map.
pub fn extend_with_group(
    props: &mut PropertyMap,
    group: &StyleDefinition,
    facet: &Facet,
    owner: &Owner,
) -> Result<()> {
    if !group.is_flat() {
        return Err(TerseError::not_allowed(
            format!("define groups with nested blocks inside {facet} are"),
            owner,
        ));
    }
    for (property, value) in &group.base {
        props.insert(property.clone(), value.clone());
    }
    Ok(())
}
