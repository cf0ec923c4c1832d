//! Whole-stylesheet snapshots.

use insta::assert_snapshot;
use tersecss::{Compiler, compile_str};

// ============================================================================
// Full unit
// ============================================================================

const PANEL: &str = r#"
@scope card
@bind header .panel .title

/* shared corner treatment */
@const rounded {
    br[8px]
    ov[hidden]
}

.panel {
    @use rounded
    --&pad[12px]
    $bg[white]
    p[--&pad]
    bd[1px solid --border]
    hover($bg[#f5f5f5])
    focus-within(ol[2px solid --accent])
    screen(max-w[600px], p[4px] d[block])
    container(min-w[400px], d[grid] gtc[1fr 1fr])
    before(ct[] d[block])
    @query &.selected {
        bdc[--accent]
    }
}

.title {
    fs[1.25rem] fw[600]!
}
"#;

#[test]
fn test_panel_stylesheet() {
    let unit = compile_str(PANEL).unwrap();
    assert_snapshot!(unit.css, @r#"
    :root{--bg-card_panel:white;--bg-hover-card_panel:#f5f5f5;--pad-card_panel:12px;}
    .card_panel{border-radius:8px;overflow:hidden;background-color:var(--bg-card_panel);padding:var(--pad-card_panel);border:1px solid var(--border);}
    .card_panel:hover{background-color:var(--bg-hover-card_panel);}
    .card_panel:focus-within{outline:2px solid var(--accent);}
    @media only screen and (max-width:600px){.card_panel{padding:4px;display:block;}}
    @container (min-width:400px){.card_panel{display:grid;grid-template-columns:1fr 1fr;}}
    .card_panel::before{content:"";display:block;}
    .card_panel.selected{border-color:var(--accent);}
    .card_title{font-size:1.25rem;font-weight:600 !important;}
    "#);
    assert_eq!(unit.bound_classes("header").as_deref(), Some("card_panel card_title"));
}

#[test]
fn test_unscoped_stylesheet() {
    let source = "@scope none\n.btn {\n px[1rem] py[.5rem]\n active(tf[scale(.98)])\n}\n.link {\n td[none]\n hover(td[underline])\n}";
    let unit = compile_str(source).unwrap();
    assert_snapshot!(unit.css, @r"
    .btn{padding-inline:1rem;padding-block:.5rem;}
    .btn:active{transform:scale(.98);}
    .link{text-decoration:none;}
    .link:hover{text-decoration:underline;}
    ");
}

#[test]
fn test_define_group_stylesheet() {
    let mut compiler = Compiler::new();
    compiler
        .define("typo", "heading", "fs[2rem]\nfw[700]\nhover(c[--accent])")
        .unwrap();
    let unit = compiler
        .compile("heading.tcss", "@scope doc\n.h1 {\n typo[heading]\n m[0]\n}")
        .unwrap();
    assert_snapshot!(unit.css, @r"
    .doc_h1{font-size:2rem;font-weight:700;margin:0;}
    .doc_h1:hover{color:var(--accent);}
    ");
}
