//! Line classification.
//!
//! Every non-empty body line is checked against the rules of the block it
//! lives in, then routed to the base, state, pseudo-element, screen or
//! container parser.

use std::collections::HashSet;

use bitflags::bitflags;

use crate::abbreviations::{AbbreviationTable, is_pseudo_element, is_state};
use crate::compiler::DefineTable;
use crate::error::{Owner, Result, TerseError};
use crate::parser::lines::{FacetKind, parse_base_line, parse_facet_line};
use crate::parser::media::{MediaKind, parse_media_line};
use crate::parser::token::has_token_prefix;
use crate::types::StyleDefinition;

bitflags! {
    /// The kind of block a line is parsed in.
    ///
    /// An empty set means an ordinary class body.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LineFlags: u8 {
        /// Inside an `@const` fragment
        const FRAGMENT = 0b0000_0001;
        /// Inside an `@query` block
        const QUERY    = 0b0000_0010;
        /// Inside a define-table group
        const DEFINE   = 0b0000_0100;
    }
}

impl LineFlags {
    /// Fragments and define groups share the strictest rules: no variables,
    /// no `!important`.
    pub fn is_restricted(self) -> bool {
        self.intersects(LineFlags::FRAGMENT | LineFlags::DEFINE)
    }
}

/// The lookup tables every line parser reads.
#[derive(Clone, Copy)]
pub struct Tables<'a> {
    pub abbreviations: &'a AbbreviationTable,
    pub defines: &'a DefineTable,
}

/// Everything a line parser needs besides the definition it writes to.
pub struct LineContext<'a> {
    pub owner: &'a Owner,
    pub flags: LineFlags,
    pub tables: Tables<'a>,
}

pub fn dispatch_line(ctx: &LineContext<'_>, style: &mut StyleDefinition, line: &str) -> Result<()> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(());
    }

    let runtime = has_token_prefix(line, "$");
    if runtime && ctx.flags.intersects(LineFlags::DEFINE | LineFlags::FRAGMENT) {
        return Err(TerseError::not_allowed("runtime variables are", ctx.owner));
    }

    if line.starts_with("@query") {
        if ctx.flags.intersects(LineFlags::FRAGMENT | LineFlags::QUERY | LineFlags::DEFINE) {
            return Err(TerseError::not_allowed("`@query` blocks are", ctx.owner));
        }
        return Err(TerseError::InvalidSyntax(format!(
            "`{line}` in {} is missing its `{{ ... }}` body",
            ctx.owner
        )));
    }
    if let Some(directive) = line.strip_prefix('@') {
        let word = directive.split_whitespace().next().unwrap_or_default();
        if matches!(word, "use" | "scope" | "bind" | "const") {
            return Err(TerseError::not_allowed(format!("`@{word}` is"), ctx.owner));
        }
        return Err(TerseError::UnknownDirective(word.to_string()));
    }

    if ctx.flags.contains(LineFlags::QUERY) {
        if has_token_prefix(line, "--&") {
            return Err(TerseError::not_allowed(
                "local variable declarations are",
                ctx.owner,
            ));
        }
        if runtime {
            return Err(TerseError::not_allowed("runtime variables are", ctx.owner));
        }
    }

    if runtime && !style.has_runtime_var {
        style.has_runtime_var = true;
    }

    if let Some(open) = line.find('(') {
        let prefix = line[..open].trim();
        if is_state(prefix) {
            let inner = arguments(ctx, line, open)?;
            return parse_facet_line(ctx, style, FacetKind::State, prefix, inner);
        }
        if is_pseudo_element(prefix) {
            let inner = arguments(ctx, line, open)?;
            return parse_facet_line(ctx, style, FacetKind::Pseudo, prefix, inner);
        }
        match prefix {
            "screen" => {
                let inner = arguments(ctx, line, open)?;
                return parse_media_line(ctx, style, MediaKind::Screen, inner);
            }
            "container" => {
                let inner = arguments(ctx, line, open)?;
                return parse_media_line(ctx, style, MediaKind::Container, inner);
            }
            // A value containing parentheses, e.g. `tf[rotate(10deg)]`.
            _ => {}
        }
    }

    parse_base_line(ctx, style, line)
}

/// The text between `verb(` and the closing `)` ending the line.
fn arguments<'l>(ctx: &LineContext<'_>, line: &'l str, open: usize) -> Result<&'l str> {
    line[open + 1..].strip_suffix(')').ok_or_else(|| {
        TerseError::InvalidSyntax(format!(
            "`{line}` in {} is missing its closing `)`",
            ctx.owner
        ))
    })
}

/// Fails when two custom properties of one class would get the same
/// generated name: a local `--&p` and a runtime `$p` both become `--p-<sel>`,
/// and `$c` in `hover(...)` becomes `--c-hover-<sel>`.
pub fn check_variable_names(style: &StyleDefinition, owner: &Owner) -> Result<()> {
    let runtime = style.var_base.keys().cloned().chain(
        style
            .var_states
            .iter()
            .chain(&style.var_pseudos)
            .flat_map(|(facet, vars)| vars.keys().map(move |name| format!("{name}-{facet}"))),
    );

    let mut seen: HashSet<String> = style.local_vars.keys().cloned().collect();
    for name in runtime {
        if !seen.insert(name.clone()) {
            return Err(TerseError::VariableNameClash {
                name,
                owner: owner.clone(),
            });
        }
    }
    Ok(())
}
