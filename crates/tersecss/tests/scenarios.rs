//! End-to-end compilation scenarios.

use tersecss::{Compiler, TerseError, compile_str};

// ============================================================================
// Basic declarations
// ============================================================================

#[test]
fn test_scoped_base_declaration() {
    let unit = compile_str("@scope card\n.box {\n bg[red]\n}").unwrap();
    assert!(unit.css.contains(".card_box{background-color:red;}"));
    assert_eq!(unit.class_name("box"), Some("card_box"));
}

#[test]
fn test_unscoped_important_declaration() {
    let unit = compile_str("@scope none\n.box {\n w[100px]!\n}").unwrap();
    assert!(unit.css.contains(".box{width:100px !important;}"));
}

#[test]
fn test_state_line() {
    let unit = compile_str("@scope s\n.box {\n hover(c[blue])\n}").unwrap();
    assert!(unit.css.contains(".s_box:hover{color:blue;}"));
}

#[test]
fn test_screen_line() {
    let unit = compile_str("@scope s\n.box {\n screen(min-w[600px], d[flex])\n}").unwrap();
    assert!(unit
        .css
        .contains("@media only screen and (min-width:600px){.s_box{display:flex;}}"));
}

#[test]
fn test_container_line() {
    let unit = compile_str("@scope s\n.box {\n container(max-w[400px], fd[column] gap[4px])\n}").unwrap();
    assert_eq!(
        unit.css,
        "@container (max-width:400px){.s_box{flex-direction:column;gap:4px;}}"
    );
}

#[test]
fn test_pseudo_element_with_content() {
    let unit = compile_str("@scope s\n.box {\n before(ct[*] c[red])\n}").unwrap();
    assert_eq!(unit.css, ".s_box::before{content:\"*\";color:red;}");
}

#[test]
fn test_pseudo_element_keeps_quoted_content() {
    let unit = compile_str("@scope s\n.box {\n after(ct['→'])\n}").unwrap();
    assert_eq!(unit.css, ".s_box::after{content:'→';}");
}

#[test]
fn test_value_with_parentheses_is_a_base_line() {
    let unit = compile_str("@scope s\n.box {\n transform[rotate(10deg)]\n}").unwrap();
    assert_eq!(unit.css, ".s_box{transform:rotate(10deg);}");
}

#[test]
fn test_multiple_tokens_on_one_line() {
    let unit = compile_str("@scope s\n.box {\n d[flex] jc[center] ai[center]\n}").unwrap();
    assert_eq!(
        unit.css,
        ".s_box{display:flex;justify-content:center;align-items:center;}"
    );
}

#[test]
fn test_theme_variable_reference() {
    let unit = compile_str("@scope s\n.box {\n c[--primary]\n bd[1px solid --border]\n}").unwrap();
    assert_eq!(
        unit.css,
        ".s_box{color:var(--primary);border:1px solid var(--border);}"
    );
}

#[test]
fn test_later_line_overrides_earlier() {
    let unit = compile_str("@scope s\n.box {\n c[red]\n c[blue]\n}").unwrap();
    assert_eq!(unit.css, ".s_box{color:blue;}");
}

#[test]
fn test_multiple_classes_in_source_order() {
    let unit = compile_str("@scope s\n.a {\n c[red]\n}\n.b {\n c[blue]\n}").unwrap();
    assert_eq!(unit.css, ".s_a{color:red;}\n.s_b{color:blue;}");
}

#[test]
fn test_empty_class_emits_nothing() {
    let unit = compile_str("@scope s\n.empty {\n}").unwrap();
    assert_eq!(unit.css, "");
    assert_eq!(unit.class_name("empty"), Some("s_empty"));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_compilation_is_deterministic() {
    let source = "@scope s\n.box {\n --&g[4px]\n $bg[red]\n gap[--&g]\n hover(c[blue] $o[1])\n after(ct[x])\n screen(max-w[300px], d[none])\n}";
    let first = Compiler::new().compile("a", source).unwrap();
    let second = Compiler::new().compile("a", source).unwrap();
    assert_eq!(first.css, second.css);
}

#[test]
fn test_each_base_line_yields_one_declaration() {
    let unit = compile_str("@scope s\n.box {\n mt[4px]\n mb[8px]\n c[red]\n}").unwrap();
    assert_eq!(unit.css.matches("margin-top:4px;").count(), 1);
    assert_eq!(unit.css.matches("margin-bottom:8px;").count(), 1);
    assert_eq!(unit.css.matches("color:red;").count(), 1);
}

#[test]
fn test_unknown_abbreviation_fails() {
    let err = compile_str("@scope s\n.box {\n zz[1]\n}").unwrap_err();
    assert!(matches!(err, TerseError::UnknownAbbreviation { ref abbr, .. } if abbr == "zz"));
}

#[test]
fn test_malformed_token_fails() {
    let err = compile_str("@scope s\n.box {\n bg red\n}").unwrap_err();
    assert!(matches!(err, TerseError::InvalidSyntax(_)));
}

#[test]
fn test_unclosed_state_fails() {
    let err = compile_str("@scope s\n.box {\n hover(c[red]\n}").unwrap_err();
    assert!(err.to_string().contains("closing `)`"));
}

#[test]
fn test_screen_without_comma_fails() {
    let err = compile_str("@scope s\n.box {\n screen(min-w[600px] d[flex])\n}").unwrap_err();
    assert!(matches!(err, TerseError::InvalidSyntax(_)));
}

#[test]
fn test_screen_without_brackets_fails() {
    let err = compile_str("@scope s\n.box {\n screen(min-w 600px, d[flex])\n}").unwrap_err();
    assert!(matches!(err, TerseError::InvalidSyntax(_)));
}

#[test]
fn test_screen_needs_width_breakpoint() {
    let err = compile_str("@scope s\n.box {\n screen(c[red], d[flex])\n}").unwrap_err();
    assert!(err.to_string().contains("min-width or max-width"));
}

#[test]
fn test_empty_declaration_value_fails() {
    for source in [
        "@scope s\n.box {\n c[]\n}",
        "@scope s\n.box {\n --&x[ ]\n c[--&x]\n}",
        "@scope s\n.box {\n $c[]\n}",
        "@scope s\n.box {\n hover(c[])\n}",
        "@scope s\n.box {\n screen(min-w[], d[flex])\n}",
    ] {
        let err = compile_str(source).unwrap_err();
        assert!(
            matches!(err, TerseError::InvalidSyntax(ref msg) if msg.contains("empty value")),
            "{source}: {err}"
        );
    }
}

#[test]
fn test_empty_content_in_pseudo_is_quoted() {
    let unit = compile_str("@scope s\n.box {\n before(ct[])\n}").unwrap();
    assert_eq!(unit.css, ".s_box::before{content:\"\";}");
}
