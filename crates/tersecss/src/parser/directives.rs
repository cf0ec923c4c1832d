//! Top-level splitting of a source unit.
//!
//! A unit is split in three passes over a working buffer:
//!
//! 1. `@const <name> { ... }` fragments are cut out.
//! 2. One-line directives (`@scope`, `@bind`) are collected and blanked.
//! 3. What remains must be a sequence of `.<class> { ... }` blocks.
//!
//! Block bodies are delimited by counting brace depth, since class bodies
//! may contain nested `@query { ... }` blocks.

use crate::error::{Result, TerseError};

/// A named block with its raw, unparsed body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawBlock {
    pub name: String,
    pub body: String,
}

/// The result of splitting one unit, before any line is parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitUnit {
    pub scope: Option<String>,
    /// The text following each `@bind`.
    pub binds: Vec<String>,
    pub consts: Vec<RawBlock>,
    pub classes: Vec<RawBlock>,
}

pub fn split_unit(source: &str) -> Result<SplitUnit> {
    let mut buffer = strip_comments(source);
    let mut unit = SplitUnit {
        consts: extract_consts(&mut buffer)?,
        ..SplitUnit::default()
    };
    extract_directives(&mut buffer, &mut unit)?;
    unit.classes = extract_classes(&buffer)?;
    Ok(unit)
}

/// Removes `/* ... */` comments and `//` comment lines, keeping line breaks.
/// `/*` inside `[...]` is part of a value, e.g. `bgi[url(a/*b.png)]`.
pub fn strip_comments(source: &str) -> String {
    let mut clean = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut brackets = 0usize;
    while let Some(c) = chars.next() {
        match c {
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            '\n' => brackets = 0,
            _ => {}
        }
        if c == '/' && brackets == 0 && chars.peek() == Some(&'*') {
            chars.next();
            while let Some(inner) = chars.next() {
                if inner == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    break;
                }
                if inner == '\n' {
                    clean.push('\n');
                }
            }
            continue;
        }
        clean.push(c);
    }

    clean
        .lines()
        .map(|line| if line.trim_start().starts_with("//") { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the index of the `}` matching the `{` at `open`.
pub fn matching_brace(text: &str, open: usize) -> Result<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + i);
                }
            }
            _ => {}
        }
    }
    Err(TerseError::InvalidSyntax(format!(
        "unbalanced braces: `{{` on line {} is never closed",
        line_of(text, open)
    )))
}

/// 1-based line number of a byte offset.
pub fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

/// Net brace depth change of one line.
fn depth_change(line: &str) -> isize {
    line.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

/// Byte offset of the first top-level line (outside any block) whose
/// trimmed text starts with `directive` followed by whitespace.
fn find_directive_line(buffer: &str, directive: &str) -> Option<usize> {
    let mut offset = 0;
    let mut depth = 0isize;
    for line in buffer.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if depth <= 0 {
            if let Some(rest) = trimmed.strip_prefix(directive) {
                if rest.starts_with(char::is_whitespace) {
                    return Some(offset + (line.len() - trimmed.len()));
                }
            }
        }
        depth += depth_change(line);
        offset += line.len();
    }
    None
}

fn extract_consts(buffer: &mut String) -> Result<Vec<RawBlock>> {
    let mut consts = Vec::new();
    while let Some(start) = find_directive_line(buffer, "@const") {
        let header_end = buffer[start..].find('\n').map_or(buffer.len(), |i| start + i);
        let open = match buffer[start..header_end].find('{') {
            Some(i) => start + i,
            None => {
                let header = buffer[start..header_end].trim();
                return Err(TerseError::InvalidSyntax(format!(
                    "`{header}` on line {} is missing its `{{ ... }}` body",
                    line_of(buffer, start)
                )));
            }
        };

        let name = buffer[start + "@const".len()..open].trim();
        if !is_identifier(name) {
            return Err(TerseError::InvalidSyntax(format!(
                "invalid fragment name `{name}` on line {}",
                line_of(buffer, start)
            )));
        }

        let close = matching_brace(buffer, open)?;
        consts.push(RawBlock {
            name: name.to_string(),
            body: buffer[open + 1..close].to_string(),
        });
        buffer.replace_range(start..=close, "");
    }
    Ok(consts)
}

fn extract_directives(buffer: &mut String, unit: &mut SplitUnit) -> Result<()> {
    let mut kept = Vec::new();
    let mut depth = 0isize;
    for line in buffer.lines() {
        let trimmed = line.trim();
        let top_level = depth <= 0;
        depth += depth_change(line);
        // Directives inside class bodies are checked with their class.
        let Some(directive) = trimmed.strip_prefix('@').filter(|_| top_level) else {
            kept.push(line);
            continue;
        };

        let word_len = directive
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(directive.len());
        let (word, rest) = directive.split_at(word_len);
        match word {
            // Class-body directives, parsed with their class.
            "use" | "query" => kept.push(line),
            "scope" => {
                if unit.scope.is_some() {
                    return Err(TerseError::InvalidSyntax(
                        "`@scope` may only appear once per unit".to_string(),
                    ));
                }
                let name = rest.trim();
                if !is_identifier(name) {
                    return Err(TerseError::InvalidSyntax(format!(
                        "invalid scope name `{name}`"
                    )));
                }
                unit.scope = Some(name.to_string());
                kept.push("");
            }
            "bind" => {
                unit.binds.push(rest.trim().to_string());
                kept.push("");
            }
            "const" => {
                return Err(TerseError::InvalidSyntax(format!(
                    "`{trimmed}` is missing its `{{ ... }}` body"
                )));
            }
            other => return Err(TerseError::UnknownDirective(other.to_string())),
        }
    }
    *buffer = kept.join("\n");
    Ok(())
}

fn extract_classes(buffer: &str) -> Result<Vec<RawBlock>> {
    let mut classes = Vec::new();
    let mut pos = 0;

    loop {
        let rest = &buffer[pos..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        let start = pos + (rest.len() - trimmed.len());

        let Some(after_dot) = trimmed.strip_prefix('.') else {
            let snippet = trimmed.lines().next().unwrap_or_default();
            return Err(TerseError::InvalidSyntax(format!(
                "unexpected `{snippet}` on line {} outside of a class block",
                line_of(buffer, start)
            )));
        };

        let name_len = after_dot
            .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(after_dot.len());
        let name = &after_dot[..name_len];
        if name.is_empty() {
            return Err(TerseError::InvalidSyntax(format!(
                "missing class name after `.` on line {}",
                line_of(buffer, start)
            )));
        }

        let after_name = &after_dot[name_len..];
        if !after_name.trim_start().starts_with('{') {
            return Err(TerseError::InvalidSyntax(format!(
                "expected `{{` after `.{name}` on line {}",
                line_of(buffer, start)
            )));
        }
        let open = start + 1 + name_len + (after_name.len() - after_name.trim_start().len());
        let close = matching_brace(buffer, open)?;

        classes.push(RawBlock {
            name: name.to_string(),
            body: buffer[open + 1..close].to_string(),
        });
        pos = close + 1;
    }

    Ok(classes)
}

pub fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_scope_binds_and_classes() {
        let unit = split_unit(
            "@scope card\n@bind theme .box .title\n.box {\n bg[red]\n}\n.title {\n c[blue]\n}",
        )
        .unwrap();
        assert_eq!(unit.scope.as_deref(), Some("card"));
        assert_eq!(unit.binds, vec!["theme .box .title".to_string()]);
        assert_eq!(unit.classes.len(), 2);
        assert_eq!(unit.classes[0].name, "box");
        assert_eq!(unit.classes[0].body.trim(), "bg[red]");
        assert_eq!(unit.classes[1].name, "title");
    }

    #[test]
    fn class_body_keeps_nested_query_braces() {
        let unit = split_unit("@scope s\n.box {\n c[red]\n @query a {\n  c[blue]\n }\n}").unwrap();
        assert_eq!(unit.classes.len(), 1);
        assert!(unit.classes[0].body.contains("@query a {"));
        assert!(unit.classes[0].body.trim_end().ends_with('}'));
    }

    #[test]
    fn const_blocks_are_cut_out() {
        let unit = split_unit("@scope s\n@const card {\n p[4px]\n}\n.box {\n @use card\n}").unwrap();
        assert_eq!(unit.consts.len(), 1);
        assert_eq!(unit.consts[0].name, "card");
        assert_eq!(unit.consts[0].body.trim(), "p[4px]");
        assert_eq!(unit.classes.len(), 1);
    }

    #[test]
    fn comments_are_ignored() {
        let unit = split_unit(
            "/* header\n comment */\n@scope s\n// line comment\n.box {\n bg[red] /* inline */\n}",
        )
        .unwrap();
        assert_eq!(unit.classes.len(), 1);
        assert_eq!(unit.classes[0].body.trim(), "bg[red]");
    }

    #[test]
    fn comment_marker_inside_value_is_kept() {
        assert_eq!(
            strip_comments(".box {\n bgi[url(a/*b.png)] /* note */\n}"),
            ".box {\n bgi[url(a/*b.png)] \n}"
        );
    }

    #[test]
    fn const_inside_class_stays_in_body() {
        let unit = split_unit("@scope s\n.box {\n c[red]\n @const x {\n  c[blue]\n }\n}").unwrap();
        assert!(unit.consts.is_empty());
        assert_eq!(unit.classes.len(), 1);
        assert!(unit.classes[0].body.contains("@const x {"));
    }

    #[test]
    fn unbalanced_braces_are_rejected() {
        let err = split_unit("@scope s\n.box {\n bg[red]\n").unwrap_err();
        assert!(err.to_string().contains("never closed"));
    }

    #[test]
    fn stray_text_is_rejected() {
        assert!(split_unit("@scope s\nbox {\n}").is_err());
    }

    #[test]
    fn unknown_directive_is_rejected() {
        assert_eq!(
            split_unit("@scope s\n@import foo").unwrap_err(),
            TerseError::UnknownDirective("import".into())
        );
    }

    #[test]
    fn second_scope_is_rejected() {
        assert!(split_unit("@scope a\n@scope b").is_err());
    }
}
