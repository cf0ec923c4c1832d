//! `screen(...)` and `container(...)` line parsers.
//!
//! Both take a breakpoint followed by a property list:
//!
//! ```text
//! screen(min-w[600px], d[flex] gap[8px])
//!        ^^^^^^^^^^^^  ^^^^^^^^^^^^^^^^^
//!        feature       props
//! ```
//!
//! The feature becomes `(min-width:600px)`; the props are resolved exactly
//! like base declarations into the rule's own map.

use crate::error::{Facet, Result, TerseError};
use crate::parser::dispatch::LineContext;
use crate::parser::lines::extend_with_group;
use crate::parser::resolve::{Resolved, require_value, resolve_token};
use crate::parser::token::{parse_token, split_first_comma, split_tokens};
use crate::types::{MediaRule, PropertyMap, StyleDefinition};

/// Properties that can form a breakpoint feature.
const BREAKPOINT_PROPERTIES: &[&str] = &["min-width", "max-width"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Screen,
    Container,
}

impl MediaKind {
    fn verb(self) -> &'static str {
        match self {
            MediaKind::Screen => "screen",
            MediaKind::Container => "container",
        }
    }

    fn facet(self) -> Facet {
        match self {
            MediaKind::Screen => Facet::Screen,
            MediaKind::Container => Facet::Container,
        }
    }
}

pub fn parse_media_line(
    ctx: &LineContext<'_>,
    style: &mut StyleDefinition,
    kind: MediaKind,
    inner: &str,
) -> Result<()> {
    let owner = ctx.owner;
    let verb = kind.verb();
    let facet = kind.facet();

    let (feature, list) = split_first_comma(inner).ok_or_else(|| {
        TerseError::InvalidSyntax(format!(
            "`{verb}({inner})` in {owner} expects `{verb}(<breakpoint>[value], <properties>)`"
        ))
    })?;

    let feature = parse_token(feature, owner)?;
    require_value(feature.value, feature.abbr, owner)?;
    let property = ctx
        .tables
        .abbreviations
        .resolve(feature.abbr)
        .filter(|property| BREAKPOINT_PROPERTIES.contains(property))
        .ok_or_else(|| {
            TerseError::InvalidSyntax(format!(
                "`{verb}(...)` in {owner} needs a min-width or max-width breakpoint, found `{}`",
                feature.abbr
            ))
        })?;
    let query = format!("({property}:{})", feature.value.trim());

    let tokens = split_tokens(list);
    if tokens.is_empty() {
        return Err(TerseError::InvalidSyntax(format!(
            "`{verb}({inner})` in {owner} has no declarations"
        )));
    }

    let mut props = PropertyMap::new();
    for raw in tokens {
        match resolve_token(ctx, &style.local_vars, &facet, raw)? {
            Resolved::Declaration { property, value } => {
                style.note_local_usage(&value);
                props.insert(property, value);
            }
            Resolved::LocalDeclaration { .. } => {
                return Err(TerseError::not_allowed(
                    format!("local variable declarations inside {facet} are"),
                    owner,
                ));
            }
            Resolved::RuntimeVar { .. } => {
                return Err(TerseError::not_allowed(
                    format!("runtime variables inside {facet} are"),
                    owner,
                ));
            }
            Resolved::Group(group) => extend_with_group(&mut props, group, &facet, owner)?,
        }
    }

    let rule = MediaRule { query, props };
    match kind {
        MediaKind::Screen => style.screens.push(rule),
        MediaKind::Container => style.containers.push(rule),
    }
    Ok(())
}
