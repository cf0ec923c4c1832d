//! Parsing of class, fragment, query and define-group bodies.

use indexmap::IndexMap;

use crate::error::{Owner, Result, TerseError};
use crate::merge::merge;
use crate::parser::directives::matching_brace;
use crate::parser::dispatch::{LineContext, LineFlags, Tables, check_variable_names, dispatch_line};
use crate::types::{QueryBlock, StyleDefinition, Value};

/// One item of a block body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyItem {
    /// A style line, trimmed.
    Line(String),
    /// `@use a b`.
    Use(Vec<String>),
    /// `@query <selector> { ... }`.
    Query { selector: String, body: String },
}

/// Splits a body into lines, `@use` directives and `@query` blocks.
pub fn split_body(body: &str, owner: &Owner) -> Result<Vec<BodyItem>> {
    let mut items = Vec::new();
    let mut pos = 0;

    while pos < body.len() {
        let line_end = body[pos..].find('\n').map_or(body.len(), |i| pos + i);
        let line = body[pos..line_end].trim();

        if let Some(rest) = line.strip_prefix("@query") {
            let line_start = pos + (body[pos..line_end].len() - body[pos..line_end].trim_start().len());
            let open = body[line_start..]
                .find('{')
                .map(|i| line_start + i)
                .ok_or_else(|| {
                    TerseError::InvalidSyntax(format!(
                        "`{line}` in {owner} is missing its `{{ ... }}` body"
                    ))
                })?;
            let selector = body[line_start + "@query".len()..open].trim();
            if selector.contains('\n') {
                return Err(TerseError::InvalidSyntax(format!(
                    "`{line}` in {owner} is missing its `{{ ... }}` body"
                )));
            }
            if selector.is_empty() || !rest.starts_with(char::is_whitespace) {
                return Err(TerseError::InvalidSyntax(format!(
                    "`@query` in {owner} needs a selector"
                )));
            }
            let close = matching_brace(body, open)?;
            items.push(BodyItem::Query {
                selector: selector.to_string(),
                body: body[open + 1..close].to_string(),
            });
            pos = close + 1;
            continue;
        }

        if line.starts_with("@const") {
            return Err(TerseError::not_allowed("`@const` blocks are", owner));
        }
        if let Some(rest) = line.strip_prefix("@use") {
            let names: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
            if names.is_empty() || !rest.starts_with(char::is_whitespace) {
                return Err(TerseError::InvalidSyntax(format!(
                    "`@use` in {owner} needs at least one fragment name"
                )));
            }
            items.push(BodyItem::Use(names));
        } else if line.contains(['{', '}']) {
            return Err(TerseError::InvalidSyntax(format!(
                "unexpected brace in `{line}` in {owner}"
            )));
        } else if !line.is_empty() {
            items.push(BodyItem::Line(line.to_string()));
        }
        pos = line_end + 1;
    }

    Ok(items)
}

/// Parses a class body: `@use` fragments first, then the class's own lines,
/// then its query blocks.
pub fn parse_class(
    tables: Tables<'_>,
    fragments: &IndexMap<String, StyleDefinition>,
    class: &str,
    body: &str,
) -> Result<StyleDefinition> {
    let owner = Owner::Class(class.to_string());
    let items = split_body(body, &owner)?;

    let mut uses = items.iter().filter_map(|item| match item {
        BodyItem::Use(names) => Some(names),
        _ => None,
    });
    let used = uses.next();
    if uses.next().is_some() {
        return Err(TerseError::not_allowed("more than one `@use` line is", &owner));
    }

    let mut style = StyleDefinition::new();
    for name in used.into_iter().flatten() {
        let fragment = fragments.get(name).ok_or_else(|| TerseError::UnknownConst {
            name: name.clone(),
            owner: owner.clone(),
        })?;
        merge(&mut style, fragment);
    }

    let ctx = LineContext {
        owner: &owner,
        flags: LineFlags::empty(),
        tables,
    };
    for item in &items {
        if let BodyItem::Line(line) = item {
            dispatch_line(&ctx, &mut style, line)?;
        }
    }

    for item in &items {
        if let BodyItem::Query { selector, body } = item {
            let query = parse_query(tables, class, selector, body, &style.local_vars)?;
            style.used_local_vars.extend(query.used_local_vars.iter().cloned());
            style.queries.push(QueryBlock {
                selector: selector.clone(),
                style: query,
            });
        }
    }

    check_variable_names(&style, &owner)?;
    for name in style.local_vars.keys() {
        if !style.used_local_vars.contains(name) {
            log::warn!("local variable `--&{name}` of {owner} is declared but never used");
        }
    }
    log::trace!(
        "parsed class `.{class}`: {} base, {} states, {} pseudos, {} screens, {} containers, {} queries",
        style.base.len(),
        style.states.len(),
        style.pseudos.len(),
        style.screens.len(),
        style.containers.len(),
        style.queries.len()
    );
    Ok(style)
}

/// Parses an `@query` block; it sees the parent's local variables but may
/// not declare its own.
fn parse_query(
    tables: Tables<'_>,
    class: &str,
    selector: &str,
    body: &str,
    parent_locals: &IndexMap<String, Value>,
) -> Result<StyleDefinition> {
    let owner = Owner::Query {
        class: class.to_string(),
        selector: selector.to_string(),
    };
    let mut style = StyleDefinition {
        local_vars: parent_locals.clone(),
        ..StyleDefinition::default()
    };
    let ctx = LineContext {
        owner: &owner,
        flags: LineFlags::QUERY,
        tables,
    };

    for item in split_body(body, &owner)? {
        match item {
            BodyItem::Line(line) => dispatch_line(&ctx, &mut style, &line)?,
            BodyItem::Use(_) => return Err(TerseError::not_allowed("`@use` is", &owner)),
            BodyItem::Query { .. } => {
                return Err(TerseError::not_allowed("nested `@query` blocks are", &owner));
            }
        }
    }
    Ok(style)
}

/// Parses an `@const` fragment body.
pub fn parse_fragment(tables: Tables<'_>, name: &str, body: &str) -> Result<StyleDefinition> {
    let owner = Owner::Fragment(name.to_string());
    let ctx = LineContext {
        owner: &owner,
        flags: LineFlags::FRAGMENT,
        tables,
    };
    parse_restricted(&ctx, body)
}

/// Parses the body of a define-table group.
pub fn parse_define_group(tables: Tables<'_>, group: &str, key: &str, body: &str) -> Result<StyleDefinition> {
    let owner = Owner::Define {
        group: group.to_string(),
        key: key.to_string(),
    };
    let ctx = LineContext {
        owner: &owner,
        flags: LineFlags::DEFINE,
        tables,
    };
    parse_restricted(&ctx, body)
}

fn parse_restricted(ctx: &LineContext<'_>, body: &str) -> Result<StyleDefinition> {
    let mut style = StyleDefinition::new();
    for item in split_body(body, ctx.owner)? {
        match item {
            BodyItem::Line(line) => dispatch_line(ctx, &mut style, &line)?,
            BodyItem::Use(_) => return Err(TerseError::not_allowed("`@use` is", ctx.owner)),
            BodyItem::Query { .. } => {
                return Err(TerseError::not_allowed("`@query` blocks are", ctx.owner));
            }
        }
    }
    Ok(style)
}
