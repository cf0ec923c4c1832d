//! Token resolution shared by every line parser.

use indexmap::IndexMap;

use crate::error::{Facet, Owner, Result, TerseError};
use crate::parser::dispatch::{LineContext, LineFlags};
use crate::parser::token::parse_token;
use crate::types::{StyleDefinition, Value};

/// What a single `abbr[value]` token turned into.
#[derive(Debug)]
pub enum Resolved<'a> {
    /// An ordinary property declaration.
    Declaration { property: String, value: Value },
    /// `--&name[value]`.
    LocalDeclaration { name: String, value: Value },
    /// `$abbr[default]`.
    RuntimeVar {
        name: String,
        property: String,
        default: Value,
        important: bool,
    },
    /// `group[key]` resolved through the define table.
    Group(&'a StyleDefinition),
}

pub fn resolve_token<'a>(
    ctx: &LineContext<'a>,
    locals: &IndexMap<String, Value>,
    facet: &Facet,
    raw: &str,
) -> Result<Resolved<'a>> {
    let owner = ctx.owner;
    let token = parse_token(raw, owner)?;

    if token.important && (ctx.flags.is_restricted() || ctx.flags.contains(LineFlags::QUERY)) {
        return Err(TerseError::not_allowed("`!important` is", owner));
    }

    if let Some(name) = token.abbr.strip_prefix("--&") {
        if name.is_empty() || name.contains(['$', '&']) {
            return Err(TerseError::InvalidSyntax(format!(
                "invalid local variable name in `{raw}` in {owner}"
            )));
        }
        if ctx.flags.is_restricted() {
            return Err(TerseError::not_allowed("local variables are", owner));
        }
        if ctx.flags.contains(LineFlags::QUERY) {
            return Err(TerseError::not_allowed("local variable declarations are", owner));
        }
        if *facet != Facet::Base {
            return Err(TerseError::not_allowed(
                format!("local variable declarations inside {facet} are"),
                owner,
            ));
        }
        if token.important {
            return Err(TerseError::not_allowed(
                "`!important` on a local variable declaration is",
                owner,
            ));
        }
        require_value(token.value, raw, owner)?;
        let value = Value::parse(token.value);
        check_local_usage(ctx, locals, facet, &value)?;
        return Ok(Resolved::LocalDeclaration {
            name: name.to_string(),
            value,
        });
    }

    if let Some(abbr) = token.abbr.strip_prefix('$') {
        if ctx.flags.is_restricted() || ctx.flags.contains(LineFlags::QUERY) {
            return Err(TerseError::not_allowed("runtime variables are", owner));
        }
        let property = ctx.tables.abbreviations.resolve(abbr).ok_or_else(|| {
            TerseError::UnknownAbbreviation {
                abbr: abbr.to_string(),
                owner: owner.clone(),
            }
        })?;
        require_value(token.value, raw, owner)?;
        let default = Value::parse(token.value);
        check_local_usage(ctx, locals, facet, &default)?;
        return Ok(Resolved::RuntimeVar {
            name: abbr.to_string(),
            property: property.to_string(),
            default,
            important: token.important,
        });
    }

    // `ct[...]` inside a pseudo-element is literal `content`, auto-quoted.
    if token.abbr == "ct" && matches!(facet, Facet::Pseudo(_)) {
        return Ok(Resolved::Declaration {
            property: "content".to_string(),
            value: Value::literal(quote_content(token.value)).with_important(token.important),
        });
    }

    let value = Value::parse(token.value);
    check_local_usage(ctx, locals, facet, &value)?;

    let property = ctx.tables.abbreviations.resolve(token.abbr);
    let groups = ctx.tables.defines.group(token.abbr);
    match (property, groups) {
        (Some(_), Some(_)) => Err(TerseError::AmbiguousAbbreviation {
            abbr: token.abbr.to_string(),
            owner: owner.clone(),
        }),
        (Some(property), None) => {
            require_value(token.value, raw, owner)?;
            Ok(Resolved::Declaration {
                property: property.to_string(),
                value: value.with_important(token.important),
            })
        }
        (None, Some(groups)) => {
            if token.important {
                return Err(TerseError::not_allowed(
                    "`!important` on a define group is",
                    owner,
                ));
            }
            let mut keys = token.value.split_whitespace();
            let key = match (keys.next(), keys.next()) {
                (Some(key), None) => key,
                (None, _) => {
                    return Err(TerseError::MissingDefineKey {
                        abbr: token.abbr.to_string(),
                        owner: owner.clone(),
                    });
                }
                (Some(_), Some(_)) => {
                    return Err(TerseError::MultipleDefineKeys {
                        abbr: token.abbr.to_string(),
                        owner: owner.clone(),
                    });
                }
            };
            groups
                .get(key)
                .map(Resolved::Group)
                .ok_or_else(|| TerseError::UnknownDefineKey {
                    abbr: token.abbr.to_string(),
                    key: key.to_string(),
                    owner: owner.clone(),
                })
        }
        (None, None) => Err(TerseError::UnknownAbbreviation {
            abbr: token.abbr.to_string(),
            owner: owner.clone(),
        }),
    }
}

/// `c[]` would emit `color:;`.
pub(crate) fn require_value(value: &str, raw: &str, owner: &Owner) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TerseError::InvalidSyntax(format!(
            "`{}` in {owner} has an empty value",
            raw.trim()
        )));
    }
    Ok(())
}

fn check_local_usage(
    ctx: &LineContext<'_>,
    locals: &IndexMap<String, Value>,
    facet: &Facet,
    value: &Value,
) -> Result<()> {
    let mut names = value.local_vars().peekable();
    if names.peek().is_some() && ctx.flags.is_restricted() {
        return Err(TerseError::not_allowed("local variables are", ctx.owner));
    }
    for name in names {
        if !locals.contains_key(name) {
            return Err(TerseError::UndeclaredLocalVar {
                name: name.to_string(),
                facet: facet.clone(),
                owner: ctx.owner.clone(),
            });
        }
    }
    Ok(())
}

fn quote_content(value: &str) -> String {
    let trimmed = value.trim();
    let quoted = trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')));
    if quoted {
        trimmed.to_string()
    } else {
        format!("\"{}\"", trimmed.replace('"', "\\\""))
    }
}
