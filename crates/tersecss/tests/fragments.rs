//! `@const` fragments, `@use`, and define-table groups.

use tersecss::{Compiler, TerseError, compile_str};

// ============================================================================
// @const / @use
// ============================================================================

#[test]
fn test_fragment_is_merged_into_class() {
    let source = "@scope s\n@const card {\n bg[white]\n hover(c[blue])\n}\n.box {\n @use card\n}";
    let unit = compile_str(source).unwrap();
    assert_eq!(
        unit.css,
        ".s_box{background-color:white;}\n.s_box:hover{color:blue;}"
    );
}

#[test]
fn test_own_line_overrides_fragment() {
    let source = "@scope s\n@const card {\n bg[white]\n p[4px]\n}\n.box {\n @use card\n bg[red]\n}";
    let unit = compile_str(source).unwrap();
    assert_eq!(unit.css, ".s_box{background-color:red;padding:4px;}");
}

#[test]
fn test_later_fragment_overrides_earlier() {
    let source = "@scope s\n@const a {\n c[red]\n}\n@const b {\n c[blue]\n}\n.box {\n @use a b\n}";
    let unit = compile_str(source).unwrap();
    assert_eq!(unit.css, ".s_box{color:blue;}");
}

#[test]
fn test_fragment_screens_are_kept() {
    let source = "@scope s\n@const wide {\n screen(min-w[900px], max-w[none])\n}\n.box {\n @use wide\n}";
    let unit = compile_str(source).unwrap();
    assert_eq!(
        unit.css,
        "@media only screen and (min-width:900px){.s_box{max-width:none;}}"
    );
}

#[test]
fn test_fragment_errors_name_the_fragment() {
    let err = compile_str("@scope s\n@const wide {\n mw[none]\n}").unwrap_err();
    assert!(err.to_string().contains("`@const wide`"));
}

#[test]
fn test_unknown_fragment_fails() {
    let err = compile_str("@scope s\n.box {\n @use ghost\n}").unwrap_err();
    assert!(matches!(err, TerseError::UnknownConst { ref name, .. } if name == "ghost"));
}

#[test]
fn test_duplicate_fragment_fails() {
    let source = "@scope s\n@const a {\n c[red]\n}\n@const a {\n c[blue]\n}";
    assert_eq!(
        compile_str(source).unwrap_err(),
        TerseError::DuplicateConst("a".to_string())
    );
}

#[test]
fn test_fragment_without_body_fails() {
    let err = compile_str("@scope s\n@const a\n.box {\n c[red]\n}").unwrap_err();
    assert!(matches!(err, TerseError::InvalidSyntax(_)));
}

#[test]
fn test_important_in_fragment_fails() {
    let err = compile_str("@scope s\n@const a {\n c[red]!\n}").unwrap_err();
    assert!(matches!(err, TerseError::NotAllowed { .. }));
}

#[test]
fn test_local_variable_in_fragment_fails() {
    let err = compile_str("@scope s\n@const a {\n --&x[1px]\n}").unwrap_err();
    assert!(matches!(err, TerseError::NotAllowed { .. }));
    let err = compile_str("@scope s\n@const a {\n p[--&x]\n}").unwrap_err();
    assert!(matches!(err, TerseError::NotAllowed { .. }));
}

#[test]
fn test_runtime_variable_in_fragment_fails() {
    let err = compile_str("@scope s\n@const a {\n $c[red]\n}").unwrap_err();
    assert!(matches!(err, TerseError::NotAllowed { .. }));
}

#[test]
fn test_query_in_fragment_fails() {
    let err = compile_str("@scope s\n@const a {\n @query span {\n c[red]\n }\n}").unwrap_err();
    assert!(matches!(err, TerseError::NotAllowed { .. }));
}

#[test]
fn test_second_use_line_fails() {
    let source = "@scope s\n@const a {\n c[red]\n}\n.box {\n @use a\n @use a\n}";
    let err = compile_str(source).unwrap_err();
    assert!(err.to_string().contains("more than one `@use`"));
}

// ============================================================================
// Define groups
// ============================================================================

fn compiler_with_typography() -> Compiler {
    let mut compiler = Compiler::new();
    compiler
        .define("typo", "heading", "fs[2rem]\nfw[700]")
        .unwrap();
    compiler
        .define("typo", "body", "fs[1rem]\nlh[1.5]")
        .unwrap();
    compiler
}

#[test]
fn test_define_group_merges_into_base() {
    let mut compiler = compiler_with_typography();
    let unit = compiler
        .compile("a", "@scope s\n.title {\n typo[heading]\n c[red]\n}")
        .unwrap();
    assert_eq!(unit.css, ".s_title{font-size:2rem;font-weight:700;color:red;}");
}

#[test]
fn test_define_group_inside_state() {
    let mut compiler = compiler_with_typography();
    let unit = compiler
        .compile("a", "@scope s\n.title {\n hover(typo[body])\n}")
        .unwrap();
    assert_eq!(unit.css, ".s_title:hover{font-size:1rem;line-height:1.5;}");
}

#[test]
fn test_define_group_with_nested_blocks_rejected_in_facets() {
    let mut compiler = Compiler::new();
    compiler.define("fx", "glow", "hover(o[1])").unwrap();
    let err = compiler
        .compile("a", "@scope s\n.box {\n focus(fx[glow])\n}")
        .unwrap_err();
    assert!(matches!(err, TerseError::NotAllowed { .. }));

    let unit = compiler.compile("a", "@scope s\n.box {\n fx[glow]\n}").unwrap();
    assert_eq!(unit.css, ".s_box:hover{opacity:1;}");
}

#[test]
fn test_ambiguous_define_group_fails() {
    let mut compiler = Compiler::new();
    compiler.define("c", "brand", "fw[700]").unwrap();
    let err = compiler
        .compile("a", "@scope s\n.box {\n c[brand]\n}")
        .unwrap_err();
    assert!(matches!(err, TerseError::AmbiguousAbbreviation { ref abbr, .. } if abbr == "c"));
}

#[test]
fn test_define_group_key_errors() {
    let mut compiler = compiler_with_typography();

    let err = compiler.compile("a", "@scope s\n.t {\n typo[]\n}").unwrap_err();
    assert!(matches!(err, TerseError::MissingDefineKey { .. }));

    let err = compiler
        .compile("a", "@scope s\n.t {\n typo[heading body]\n}")
        .unwrap_err();
    assert!(matches!(err, TerseError::MultipleDefineKeys { .. }));

    let err = compiler
        .compile("a", "@scope s\n.t {\n typo[caption]\n}")
        .unwrap_err();
    assert!(matches!(err, TerseError::UnknownDefineKey { ref key, .. } if key == "caption"));
}

#[test]
fn test_important_define_group_fails() {
    let mut compiler = compiler_with_typography();
    let err = compiler
        .compile("a", "@scope s\n.t {\n typo[heading]!\n}")
        .unwrap_err();
    assert!(matches!(err, TerseError::NotAllowed { .. }));
}

#[test]
fn test_define_group_rejects_variables() {
    let mut compiler = Compiler::new();
    assert!(compiler.define("g", "k", "$c[red]").is_err());
    assert!(compiler.define("g", "k", "--&x[1px]").is_err());
    assert!(compiler.define("g", "k", "c[red]!").is_err());
    assert!(compiler.defines().is_empty());
}

#[test]
fn test_reset_forgets_define_groups() {
    let mut compiler = compiler_with_typography();
    compiler.reset();
    let err = compiler
        .compile("a", "@scope s\n.t {\n typo[heading]\n}")
        .unwrap_err();
    assert!(matches!(err, TerseError::UnknownAbbreviation { ref abbr, .. } if abbr == "typo"));
}
