use std::fmt;

/// The namespace declared by `@scope <name>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// `@scope none`: class names are emitted bare.
    None,
    Named(String),
}

impl Scope {
    pub const NONE_KEYWORD: &'static str = "none";

    pub fn parse(name: &str) -> Self {
        if name == Self::NONE_KEYWORD {
            Scope::None
        } else {
            Scope::Named(name.to_string())
        }
    }

    /// The generated class name for `class` (`card_box`, or `box` unscoped).
    pub fn selector_name(&self, class: &str) -> String {
        match self {
            Scope::None => class.to_string(),
            Scope::Named(scope) => format!("{scope}_{class}"),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::None => f.write_str(Self::NONE_KEYWORD),
            Scope::Named(name) => f.write_str(name),
        }
    }
}

/// A validated `@bind <key> .a .b` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bind {
    pub key: String,
    /// Source class names, without the leading dot.
    pub class_names: Vec<String>,
}
