//! Scanning of `abbr[value]` tokens and bracket-aware list splitting.

use nom::{
    IResult,
    bytes::complete::take_while1,
    character::complete::char,
    sequence::terminated,
};

use crate::error::{Owner, Result, TerseError};

/// One decoded `abbr[value]` token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub abbr: &'a str,
    pub value: &'a str,
    /// The token ended in `]!`.
    pub important: bool,
}

/// Parses an abbreviation, allowing the `-`, `$` and `&` prefixes used by
/// variables.
fn parse_abbreviation(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '-' | '_' | '$' | '&'))(input)
}

/// Parses a full token; `owner` is only used for error messages.
pub fn parse_token<'a>(input: &'a str, owner: &Owner) -> Result<Token<'a>> {
    let input = input.trim();
    let (body, important) = match input.strip_suffix('!') {
        Some(rest) if rest.ends_with(']') => (rest, true),
        _ => (input, false),
    };

    let malformed = || {
        TerseError::InvalidSyntax(format!(
            "expected `abbr[value]` but found `{input}` in {owner}"
        ))
    };

    let (rest, abbr) =
        terminated(parse_abbreviation, char('['))(body).map_err(|_: nom::Err<nom::error::Error<&str>>| malformed())?;
    let value = rest.strip_suffix(']').ok_or_else(malformed)?;

    Ok(Token {
        abbr,
        value,
        important,
    })
}

/// Splits a space-separated token list, never splitting inside `[...]` or
/// `(...)`.
pub fn split_tokens(list: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, c) in list.char_indices() {
        match c {
            '[' | '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ']' | ')' => {
                depth = depth.saturating_sub(1);
                start.get_or_insert(i);
            }
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&list[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&list[s..]);
    }
    tokens
}

/// Splits at the first comma outside brackets and parentheses.
pub fn split_first_comma(input: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some((&input[..i], &input[i + 1..])),
            _ => {}
        }
    }
    None
}

/// True when some top-level token of `line` starts with `prefix`.
///
/// Positions inside `[...]` are ignored, so `p[--&pad]` does not count as a
/// `--&` token while `--&pad[8px]` and `hover($c[red])` do count.
pub fn has_token_prefix(line: &str, prefix: &str) -> bool {
    let mut depth = 0usize;
    let mut boundary = true;
    for (i, c) in line.char_indices() {
        if depth == 0 && boundary && line[i..].starts_with(prefix) {
            return true;
        }
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        boundary = c.is_whitespace() || c == '(' || c == ',';
    }
    false
}
