//! # tersecss - abbreviation stylesheet compiler
//!
//! Compiles a compact styling DSL, written inside source files, into plain
//! CSS. Class blocks are written with short property abbreviations and
//! expanded into namespaced rule blocks.
//!
//! ## Quick Start
//!
//! ```rust
//! use tersecss::compile_str;
//!
//! let source = r#"
//!     @scope card
//!
//!     .box {
//!         --&pad[8px]
//!         p[--&pad]
//!         bg[white]
//!         hover(bg[#eee])
//!         screen(min-w[600px], d[flex])
//!     }
//! "#;
//!
//! let unit = compile_str(source).expect("valid source");
//! assert!(unit.css.contains(".card_box{padding:var(--pad-card_box);background-color:white;}"));
//! assert!(unit.css.contains("@media only screen and (min-width:600px){.card_box{display:flex;}}"));
//! ```
//!
//! ## Syntax
//!
//! ### Directives
//! - `@scope <name>`: mandatory namespace; `none` keeps class names bare
//! - `@bind <key> .a .b`: names a set of classes for the host application
//! - `@const <name> { ... }`: reusable fragment, pulled in with `@use`
//!
//! ### Body lines
//! - `bg[red]`, `w[100px]!` (important)
//! - `hover(c[blue])`, `before(ct[*] c[red])`
//! - `screen(min-w[600px], d[flex])`, `container(max-w[400px], gap[4px])`
//! - `--&pad[8px]` declares a class-local variable, `p[--&pad]` uses it
//! - `$bg[white]` binds a runtime variable with a default
//! - `@use card`, `@query > span { ... }`
//! - `--theme-color` inside a value becomes `var(--theme-color)`
//!
//! ## Modules
//!
//! - [`parser`]: source splitting and line parsing
//! - [`merge`]: fragment merging
//! - [`transform`]: variable namespacing
//! - [`builder`]: CSS generation
//! - [`compiler`]: the compilation context tying them together

pub mod abbreviations;
pub mod builder;
pub mod compiler;
pub mod error;
pub mod merge;
pub mod parser;
pub mod transform;
pub mod types;

pub use abbreviations::AbbreviationTable;
pub use compiler::{CompiledUnit, Compiler, DefineTable, ScopeRegistry, compile_str};
pub use error::{Facet, Owner, Result, TerseError};
pub use types::{Scope, StyleDefinition, Value};
