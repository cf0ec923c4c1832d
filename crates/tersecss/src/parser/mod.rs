//! Parsing of tersecss source units into [`StyleDefinition`]s.
//!
//! ## Submodules
//!
//! - [`directives`]: top-level splitting (`@scope`, `@bind`, `@const`, classes)
//! - [`body`]: class / fragment / query / define-group bodies
//! - [`dispatch`]: per-line classification and context rules
//! - [`lines`]: base, state and pseudo-element lines
//! - [`media`]: `screen(...)` and `container(...)` lines
//! - [`resolve`]: shared `abbr[value]` resolution
//! - [`token`]: token scanning helpers
//!
//! ## Example
//!
//! ```rust
//! use tersecss::parser::{parse_unit, Tables};
//! use tersecss::{AbbreviationTable, DefineTable};
//!
//! let abbreviations = AbbreviationTable::new();
//! let defines = DefineTable::new();
//! let tables = Tables { abbreviations: &abbreviations, defines: &defines };
//!
//! let unit = parse_unit("@scope card\n.box {\n bg[red]\n}", tables).unwrap();
//! assert_eq!(unit.classes["box"].base["background-color"].to_string(), "red");
//! ```

pub mod body;
pub mod directives;
pub mod dispatch;
pub mod lines;
pub mod media;
pub mod resolve;
pub mod token;

pub use crate::parser::body::{parse_class, parse_define_group, parse_fragment};
pub use crate::parser::directives::{split_unit, strip_comments};
pub use crate::parser::dispatch::{LineContext, LineFlags, Tables, dispatch_line};

use indexmap::IndexMap;

use crate::error::{Result, TerseError};
use crate::parser::directives::is_identifier;
use crate::types::{Bind, Scope, StyleDefinition};

/// A fully parsed unit, before variable namespacing and CSS generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedUnit {
    pub scope: Scope,
    pub fragments: IndexMap<String, StyleDefinition>,
    pub classes: IndexMap<String, StyleDefinition>,
    pub binds: Vec<Bind>,
}

/// Parses one source unit.
pub fn parse_unit(source: &str, tables: Tables<'_>) -> Result<ParsedUnit> {
    let split = split_unit(source)?;
    let scope = split
        .scope
        .as_deref()
        .map(Scope::parse)
        .ok_or(TerseError::MissingScope)?;

    let mut fragments = IndexMap::new();
    for block in &split.consts {
        if fragments.contains_key(&block.name) {
            return Err(TerseError::DuplicateConst(block.name.clone()));
        }
        let fragment = parse_fragment(tables, &block.name, &block.body)?;
        log::trace!("parsed fragment `@const {}`", block.name);
        fragments.insert(block.name.clone(), fragment);
    }

    let mut classes = IndexMap::new();
    for block in &split.classes {
        if classes.contains_key(&block.name) {
            return Err(TerseError::DuplicateClass(block.name.clone()));
        }
        let style = parse_class(tables, &fragments, &block.name, &block.body)?;
        classes.insert(block.name.clone(), style);
    }

    let mut binds: Vec<Bind> = Vec::new();
    for raw in &split.binds {
        let bind = parse_bind(raw, &classes)?;
        if binds.iter().any(|b| b.key == bind.key) {
            return Err(TerseError::InvalidBind(format!(
                "key `{}` is bound more than once",
                bind.key
            )));
        }
        binds.push(bind);
    }

    Ok(ParsedUnit {
        scope,
        fragments,
        classes,
        binds,
    })
}

/// Parses the text after `@bind`: a key followed by one or more `.class`
/// references to classes of the same unit.
pub fn parse_bind(raw: &str, classes: &IndexMap<String, StyleDefinition>) -> Result<Bind> {
    let mut tokens = raw.split_whitespace();
    let key = tokens
        .next()
        .ok_or_else(|| TerseError::InvalidBind("expected `@bind <key> <.class> ...`".to_string()))?;
    if !is_identifier(key) {
        return Err(TerseError::InvalidBind(format!("invalid key `{key}`")));
    }
    if classes.contains_key(key) {
        return Err(TerseError::InvalidBind(format!(
            "key `{key}` collides with class `.{key}`"
        )));
    }

    let mut class_names = Vec::new();
    for reference in tokens {
        let name = reference.strip_prefix('.').ok_or_else(|| {
            TerseError::InvalidBind(format!(
                "`{reference}` in `@bind {key}` must be a class reference like `.{reference}`"
            ))
        })?;
        if !classes.contains_key(name) {
            return Err(TerseError::InvalidBind(format!(
                "`@bind {key}` references undefined class `.{name}`"
            )));
        }
        class_names.push(name.to_string());
    }
    if class_names.is_empty() {
        return Err(TerseError::InvalidBind(format!(
            "`@bind {key}` needs at least one class"
        )));
    }

    Ok(Bind {
        key: key.to_string(),
        class_names,
    })
}
