//! The compilation context.
//!
//! [`Compiler`] owns the state shared between source units: the abbreviation
//! table, the define table contributed by theme processing, and the registry
//! that keeps scope names unique across the workspace. Everything else is
//! created per [`Compiler::compile`] call and dropped when it returns.
//!
//! The context is not synchronized. Callers compiling units from several
//! threads should put it behind a lock or compile sequentially.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::abbreviations::AbbreviationTable;
use crate::builder::build;
use crate::error::{Result, TerseError};
use crate::parser::{Tables, parse_define_group, parse_unit};
use crate::transform::apply_variables;
use crate::types::{Bind, Scope, StyleDefinition};

/// Reusable groups contributed from outside a unit, addressed as
/// `group[key]` in style lines.
#[derive(Clone, Debug, Default)]
pub struct DefineTable {
    groups: HashMap<String, IndexMap<String, StyleDefinition>>,
}

impl DefineTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: impl Into<String>, key: impl Into<String>, style: StyleDefinition) {
        self.groups
            .entry(group.into())
            .or_default()
            .insert(key.into(), style);
    }

    pub fn group(&self, group: &str) -> Option<&IndexMap<String, StyleDefinition>> {
        self.groups.get(group)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

/// Scope name to the unit that declared it.
#[derive(Clone, Debug, Default)]
pub struct ScopeRegistry {
    owners: HashMap<String, String>,
}

impl ScopeRegistry {
    /// Fails if `scope` belongs to a unit other than `unit`.
    pub fn check(&self, scope: &Scope, unit: &str) -> Result<()> {
        let Scope::Named(name) = scope else {
            return Ok(());
        };
        match self.owners.get(name) {
            Some(owner) if owner != unit => Err(TerseError::DuplicateScope {
                scope: name.clone(),
                unit: owner.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Registers `scope` for `unit`, releasing any scope the unit held
    /// before. `@scope none` is never registered.
    pub fn claim(&mut self, scope: &Scope, unit: &str) -> Result<()> {
        self.check(scope, unit)?;
        self.owners.retain(|_, owner| owner != unit);
        if let Scope::Named(name) = scope {
            self.owners.insert(name.clone(), unit.to_string());
        }
        Ok(())
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.owners.contains_key(scope)
    }

    pub fn clear(&mut self) {
        self.owners.clear();
    }
}

/// The output of compiling one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledUnit {
    pub scope: Scope,
    /// The generated stylesheet text.
    pub css: String,
    /// Source class name to generated class name.
    pub classes: IndexMap<String, String>,
    pub binds: Vec<Bind>,
}

impl CompiledUnit {
    /// The generated class name for a source class.
    pub fn class_name(&self, class: &str) -> Option<&str> {
        self.classes.get(class).map(String::as_str)
    }

    /// The space-separated generated class names bound to `key`.
    pub fn bound_classes(&self, key: &str) -> Option<String> {
        let bind = self.binds.iter().find(|bind| bind.key == key)?;
        let names: Vec<&str> = bind
            .class_names
            .iter()
            .filter_map(|class| self.class_name(class))
            .collect();
        Some(names.join(" "))
    }
}

/// Compiles tersecss source units into CSS.
///
/// ```rust
/// use tersecss::Compiler;
///
/// let mut compiler = Compiler::new();
/// let unit = compiler
///     .compile("card.tcss", "@scope card\n.box {\n bg[red]\n hover(c[blue])\n}")
///     .unwrap();
///
/// assert_eq!(
///     unit.css,
///     ".card_box{background-color:red;}\n.card_box:hover{color:blue;}"
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    abbreviations: AbbreviationTable,
    defines: DefineTable,
    scopes: ScopeRegistry,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_abbreviations(abbreviations: AbbreviationTable) -> Self {
        Self {
            abbreviations,
            ..Self::default()
        }
    }

    pub fn defines(&self) -> &DefineTable {
        &self.defines
    }

    pub fn scopes(&self) -> &ScopeRegistry {
        &self.scopes
    }

    fn tables(&self) -> Tables<'_> {
        Tables {
            abbreviations: &self.abbreviations,
            defines: &self.defines,
        }
    }

    /// Registers `group[key]` from a body of style lines.
    ///
    /// Groups follow fragment rules: no runtime or local variables, no
    /// `!important`, no `@query`.
    pub fn define(&mut self, group: &str, key: &str, body: &str) -> Result<()> {
        let style = parse_define_group(self.tables(), group, key, body)?;
        log::trace!("registered define group `{group}[{key}]`");
        self.defines.insert(group, key, style);
        Ok(())
    }

    /// Compiles one unit. `unit` identifies the source (typically its path)
    /// for scope ownership; recompiling the same unit is always allowed.
    pub fn compile(&mut self, unit: &str, source: &str) -> Result<CompiledUnit> {
        let parsed = parse_unit(source, self.tables())?;
        self.scopes.check(&parsed.scope, unit)?;

        let mut blocks = Vec::new();
        let mut classes = IndexMap::new();
        for (class, mut style) in parsed.classes {
            let name = parsed.scope.selector_name(&class);
            apply_variables(&mut style, &name);
            let css = build(&format!(".{name}"), &style);
            if !css.is_empty() {
                blocks.push(css);
            }
            classes.insert(class, name);
        }

        self.scopes.claim(&parsed.scope, unit)?;
        log::debug!(
            "compiled `{unit}`: scope `{}`, {} classes, {} fragments, {} binds",
            parsed.scope,
            classes.len(),
            parsed.fragments.len(),
            parsed.binds.len()
        );

        Ok(CompiledUnit {
            scope: parsed.scope,
            css: blocks.join("\n"),
            classes,
            binds: parsed.binds,
        })
    }

    /// Forgets every registered scope and define group.
    pub fn reset(&mut self) {
        self.scopes.clear();
        self.defines.clear();
    }
}

/// Compiles a single unit with a fresh context.
pub fn compile_str(source: &str) -> Result<CompiledUnit> {
    Compiler::new().compile("<input>", source)
}
