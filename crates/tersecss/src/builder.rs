//! CSS text generation.
//!
//! A single structural fold over a transformed [`StyleDefinition`]. Each
//! rule block is written on its own line, declarations in insertion order:
//!
//! ```text
//! :root{--pad-s_box:8px;}
//! .s_box{padding:var(--pad-s_box);}
//! .s_box:hover{color:blue;}
//! @media only screen and (min-width:600px){.s_box{display:flex;}}
//! @container (min-width:400px){.s_box{gap:8px;}}
//! .s_box::before{content:"*";}
//! .s_box > span{color:red;}
//! ```

use crate::types::{StyleDefinition, Value};

/// Builds the stylesheet text for one class; `selector` is the full class
/// selector, e.g. `.s_box`.
pub fn build(selector: &str, style: &StyleDefinition) -> String {
    let mut blocks = Vec::new();

    let root: Vec<(&String, &Value)> = style.root_vars.iter().chain(style.scoped_vars.iter()).collect();
    if !root.is_empty() {
        blocks.push(rule(":root", root));
    }

    if !style.base.is_empty() || !style.scoped_vars.is_empty() {
        blocks.push(rule(selector, &style.base));
    }
    push_facets(&mut blocks, selector, style);

    for query in &style.queries {
        let nested = query_selector(selector, &query.selector);
        if !query.style.base.is_empty() {
            blocks.push(rule(&nested, &query.style.base));
        }
        push_facets(&mut blocks, &nested, &query.style);
    }

    blocks.join("\n")
}

/// States, screens, containers and pseudo-elements, in that order.
fn push_facets(blocks: &mut Vec<String>, selector: &str, style: &StyleDefinition) {
    for (state, props) in &style.states {
        blocks.push(rule(&format!("{selector}:{state}"), props));
    }
    for screen in &style.screens {
        blocks.push(format!(
            "@media only screen and {}{{{}}}",
            screen.query,
            rule(selector, &screen.props)
        ));
    }
    for container in &style.containers {
        blocks.push(format!(
            "@container {}{{{}}}",
            container.query,
            rule(selector, &container.props)
        ));
    }
    for (pseudo, props) in &style.pseudos {
        blocks.push(rule(&format!("{selector}::{pseudo}"), props));
    }
}

/// `&` in a query selector stands for the class itself; otherwise the
/// query selector is a descendant.
fn query_selector(selector: &str, query: &str) -> String {
    match query.strip_prefix('&') {
        Some(rest) => format!("{selector}{rest}"),
        None => format!("{selector} {query}"),
    }
}

fn rule<'p>(selector: &str, props: impl IntoIterator<Item = (&'p String, &'p Value)>) -> String {
    let mut out = format!("{selector}{{");
    for (property, value) in props {
        out.push_str(property);
        out.push(':');
        out.push_str(&value.to_string());
        out.push(';');
    }
    out.push('}');
    out
}
