//! Error types for tersecss compilation.
//!
//! Every error is fatal to the compile that raised it. Messages name the
//! block the problem was found in (a class, an `@const` fragment, an
//! `@query` block or a define group) so the surrounding tooling can surface
//! them as diagnostics without extra bookkeeping.

use std::fmt;

use thiserror::Error;

/// The block a line belongs to, used to locate errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Owner {
    /// A `.name { ... }` class block.
    Class(String),
    /// An `@const name { ... }` reusable fragment.
    Fragment(String),
    /// An `@query selector { ... }` block nested in a class.
    Query { class: String, selector: String },
    /// A group registered in the define table.
    Define { group: String, key: String },
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Class(name) => write!(f, "class `.{name}`"),
            Owner::Fragment(name) => write!(f, "`@const {name}`"),
            Owner::Query { class, selector } => {
                write!(f, "`@query {selector}` of class `.{class}`")
            }
            Owner::Define { group, key } => write!(f, "define group `{group}[{key}]`"),
        }
    }
}

/// Which part of a block a declaration was written in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Facet {
    Base,
    State(String),
    Pseudo(String),
    Screen,
    Container,
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::Base => f.write_str("base declarations"),
            Facet::State(name) => write!(f, "state `{name}(...)`"),
            Facet::Pseudo(name) => write!(f, "pseudo-element `{name}(...)`"),
            Facet::Screen => f.write_str("`screen(...)`"),
            Facet::Container => f.write_str("`container(...)`"),
        }
    }
}

/// Errors that can occur while compiling a tersecss source unit.
///
/// # Examples
///
/// ```rust
/// use tersecss::{Compiler, TerseError};
///
/// let mut compiler = Compiler::new();
/// let err = compiler.compile("card.tcss", ".box {\n bg[red]\n}").unwrap_err();
/// assert!(matches!(err, TerseError::MissingScope));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerseError {
    /// The unit has no `@scope` directive.
    #[error("a scope name is mandatory: add `@scope <name>` to the source")]
    MissingScope,

    /// Another unit already claimed this scope.
    #[error("scope `{scope}` is already used by `{unit}`")]
    DuplicateScope { scope: String, unit: String },

    /// The same class name appears twice in one unit.
    #[error("class `.{0}` is defined more than once")]
    DuplicateClass(String),

    /// The same fragment name appears twice in one unit.
    #[error("`@const {0}` is defined more than once")]
    DuplicateConst(String),

    /// `@use` names a fragment that was never declared.
    #[error("{owner} uses unknown fragment `{name}`")]
    UnknownConst { name: String, owner: Owner },

    /// A top-level `@word` other than `@scope`, `@bind` or `@const`.
    #[error("unknown directive `@{0}`")]
    UnknownDirective(String),

    /// Malformed `@bind` directive.
    #[error("invalid `@bind`: {0}")]
    InvalidBind(String),

    /// The abbreviation is neither in the abbreviation table nor the define table.
    #[error("unknown abbreviation `{abbr}` in {owner}")]
    UnknownAbbreviation { abbr: String, owner: Owner },

    /// The abbreviation is in both the abbreviation table and the define table.
    #[error("abbreviation `{abbr}` in {owner} is ambiguous: it is both a property and a define group")]
    AmbiguousAbbreviation { abbr: String, owner: Owner },

    /// A define group was referenced without a key.
    #[error("define group `{abbr}` in {owner} needs a key, e.g. `{abbr}[name]`")]
    MissingDefineKey { abbr: String, owner: Owner },

    /// A define group was referenced with several keys.
    #[error("define group `{abbr}` in {owner} takes exactly one key")]
    MultipleDefineKeys { abbr: String, owner: Owner },

    /// A define group was referenced with a key it does not have.
    #[error("define group `{abbr}` has no key `{key}` (used in {owner})")]
    UnknownDefineKey { abbr: String, key: String, owner: Owner },

    /// A local variable was used before being declared in the class.
    #[error("local variable `{name}` used in {facet} of {owner} is not declared")]
    UndeclaredLocalVar { name: String, facet: Facet, owner: Owner },

    /// A local variable was declared twice in the same class.
    #[error("local variable `{name}` is declared more than once in {owner}")]
    DuplicateLocalVar { name: String, owner: Owner },

    /// A local and a runtime variable (or two runtime variables) of one
    /// class would be emitted under the same custom property name.
    #[error("variable `{name}` in {owner} clashes with another variable of the same generated name")]
    VariableNameClash { name: String, owner: Owner },

    /// A construct appeared somewhere it is forbidden.
    #[error("{what} not allowed in {owner}")]
    NotAllowed { what: String, owner: Owner },

    /// Invalid syntax was encountered.
    ///
    /// The string contains details about what was unexpected and where.
    #[error("syntax error: {0}")]
    InvalidSyntax(String),
}

impl TerseError {
    pub(crate) fn not_allowed(what: impl Into<String>, owner: &Owner) -> Self {
        TerseError::NotAllowed {
            what: what.into(),
            owner: owner.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TerseError>;
