//! Tagged declaration values.
//!
//! A value is kept as a list of parts until the variable passes have run, so
//! local and runtime variable references are rewritten structurally instead
//! of by searching serialized CSS text.
//!
//! ```text
//! 8px                    -> [Literal("8px")]
//! --primary              -> [ThemeVar("primary")]        renders var(--primary)
//! calc(--&gap * 2)       -> [Literal("calc("), LocalVar("gap"), Literal(" * 2)")]
//! ```

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValuePart {
    /// Text emitted verbatim.
    Literal(String),
    /// A `--name` reference to a theme custom property.
    ThemeVar(String),
    /// A `--&name` reference to a class-local variable, not yet namespaced.
    LocalVar(String),
    /// A runtime-bound variable reference (`bg` or `bg-hover`), not yet namespaced.
    RuntimeVar(String),
    /// A fully namespaced custom property reference.
    Var(String),
}

/// A declaration value with its `!important` flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Value {
    pub parts: Vec<ValuePart>,
    pub important: bool,
}

impl Value {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            parts: vec![ValuePart::Literal(text.into())],
            important: false,
        }
    }

    pub fn runtime(name: impl Into<String>) -> Self {
        Self {
            parts: vec![ValuePart::RuntimeVar(name.into())],
            important: false,
        }
    }

    /// Splits raw value text into parts, recognizing `--&local` and
    /// `--theme` references. References already wrapped in `var(...)` are
    /// kept literal.
    pub fn parse(raw: &str) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = raw.trim();

        while let Some(c) = rest.chars().next() {
            if let Some(after) = rest.strip_prefix("--&") {
                let len = ident_len(after);
                if len > 0 {
                    flush_literal(&mut literal, &mut parts);
                    parts.push(ValuePart::LocalVar(after[..len].to_string()));
                    rest = &after[len..];
                    continue;
                }
            } else if let Some(after) = rest.strip_prefix("--") {
                let len = ident_len(after);
                if len > 0 && starts_reference(&literal) {
                    flush_literal(&mut literal, &mut parts);
                    parts.push(ValuePart::ThemeVar(after[..len].to_string()));
                    rest = &after[len..];
                    continue;
                }
            }
            literal.push(c);
            rest = &rest[c.len_utf8()..];
        }
        flush_literal(&mut literal, &mut parts);

        Self {
            parts,
            important: false,
        }
    }

    pub fn with_important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    /// Names of the local variables referenced by this value.
    pub fn local_vars(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            ValuePart::LocalVar(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Replaces each part for which `f` returns a substitute.
    pub fn rewrite(&mut self, mut f: impl FnMut(&ValuePart) -> Option<ValuePart>) {
        for part in &mut self.parts {
            if let Some(replacement) = f(part) {
                *part = replacement;
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                ValuePart::Literal(text) => f.write_str(text)?,
                ValuePart::ThemeVar(name)
                | ValuePart::LocalVar(name)
                | ValuePart::RuntimeVar(name)
                | ValuePart::Var(name) => write!(f, "var(--{name})")?,
            }
        }
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn ident_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(s.len(), |(i, _)| i)
}

// `--` only starts a reference at a token boundary and outside an explicit var().
fn starts_reference(literal: &str) -> bool {
    if literal.ends_with("var(") {
        return false;
    }
    !matches!(literal.chars().last(), Some(c) if is_ident_char(c))
}

fn flush_literal(literal: &mut String, parts: &mut Vec<ValuePart>) {
    if !literal.is_empty() {
        parts.push(ValuePart::Literal(std::mem::take(literal)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_single_literal() {
        let value = Value::parse("1px solid red");
        assert_eq!(value.parts, vec![ValuePart::Literal("1px solid red".into())]);
        assert_eq!(value.to_string(), "1px solid red");
    }

    #[test]
    fn theme_references_render_as_var() {
        let value = Value::parse("0 0 4px --shadow-color");
        assert_eq!(value.to_string(), "0 0 4px var(--shadow-color)");
    }

    #[test]
    fn explicit_var_is_left_alone() {
        let value = Value::parse("var(--primary)");
        assert_eq!(value.parts, vec![ValuePart::Literal("var(--primary)".into())]);
    }

    #[test]
    fn local_references_are_tagged() {
        let value = Value::parse("calc(--&gap * 2)");
        assert_eq!(
            value.parts,
            vec![
                ValuePart::Literal("calc(".into()),
                ValuePart::LocalVar("gap".into()),
                ValuePart::Literal(" * 2)".into()),
            ]
        );
        assert_eq!(value.local_vars().collect::<Vec<_>>(), vec!["gap"]);
    }

    #[test]
    fn important_suffix() {
        let value = Value::literal("100px").with_important(true);
        assert_eq!(value.to_string(), "100px !important");
    }
}
