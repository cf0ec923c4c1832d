//! Abbreviation table and recognized state / pseudo-element names.
//!
//! The built-in table is a static `phf` map; [`AbbreviationTable`] layers
//! caller-supplied entries (typically from a project configuration file) on
//! top of it. Full property names used as-is (`transform[...]`) are listed
//! as identity entries so they resolve like any other abbreviation.

use std::collections::HashMap;

use phf::{phf_map, phf_set};

/// Built-in abbreviation to property name mapping.
pub static DEFAULT_ABBREVIATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    // Color & background
    "c" => "color",
    "bg" => "background-color",
    "bgi" => "background-image",
    "bgs" => "background-size",
    "bgp" => "background-position",
    "bgr" => "background-repeat",
    "bga" => "background-attachment",
    "bgc" => "background-clip",
    "bgb" => "background-blend-mode",
    "acc" => "accent-color",
    "cc" => "caret-color",
    "o" => "opacity",

    // Sizing
    "w" => "width",
    "h" => "height",
    "min-w" => "min-width",
    "max-w" => "max-width",
    "min-h" => "min-height",
    "max-h" => "max-height",
    "ar" => "aspect-ratio",

    // Spacing
    "p" => "padding",
    "pt" => "padding-top",
    "pr" => "padding-right",
    "pb" => "padding-bottom",
    "pl" => "padding-left",
    "px" => "padding-inline",
    "py" => "padding-block",
    "m" => "margin",
    "mt" => "margin-top",
    "mr" => "margin-right",
    "mb" => "margin-bottom",
    "ml" => "margin-left",
    "mx" => "margin-inline",
    "my" => "margin-block",
    "rg" => "row-gap",
    "cg" => "column-gap",

    // Display & flexbox
    "d" => "display",
    "fd" => "flex-direction",
    "fxw" => "flex-wrap",
    "fx" => "flex",
    "fg" => "flex-grow",
    "fsh" => "flex-shrink",
    "fb" => "flex-basis",
    "ord" => "order",
    "jc" => "justify-content",
    "ji" => "justify-items",
    "js" => "justify-self",
    "ai" => "align-items",
    "ac" => "align-content",
    "as" => "align-self",
    "pc" => "place-content",
    "pi" => "place-items",
    "ps" => "place-self",

    // Grid
    "gtc" => "grid-template-columns",
    "gtr" => "grid-template-rows",
    "gta" => "grid-template-areas",
    "ga" => "grid-area",
    "gc" => "grid-column",
    "gr" => "grid-row",
    "gaf" => "grid-auto-flow",

    // Positioning
    "pos" => "position",
    "t" => "top",
    "r" => "right",
    "b" => "bottom",
    "l" => "left",
    "ins" => "inset",
    "z" => "z-index",

    // Typography
    "fs" => "font-size",
    "fw" => "font-weight",
    "ff" => "font-family",
    "fst" => "font-style",
    "lh" => "line-height",
    "ls" => "letter-spacing",
    "ta" => "text-align",
    "td" => "text-decoration",
    "tt" => "text-transform",
    "to" => "text-overflow",
    "ts" => "text-shadow",
    "ti" => "text-indent",
    "ws" => "white-space",
    "wb" => "word-break",
    "va" => "vertical-align",

    // Borders & outline
    "bd" => "border",
    "bdt" => "border-top",
    "bdr" => "border-right",
    "bdb" => "border-bottom",
    "bdl" => "border-left",
    "bdc" => "border-color",
    "bdw" => "border-width",
    "bds" => "border-style",
    "br" => "border-radius",
    "brtl" => "border-top-left-radius",
    "brtr" => "border-top-right-radius",
    "brbl" => "border-bottom-left-radius",
    "brbr" => "border-bottom-right-radius",
    "ol" => "outline",
    "olo" => "outline-offset",

    // Effects & behavior
    "bs" => "box-shadow",
    "bx" => "box-sizing",
    "ov" => "overflow",
    "ovx" => "overflow-x",
    "ovy" => "overflow-y",
    "cur" => "cursor",
    "pe" => "pointer-events",
    "us" => "user-select",
    "vis" => "visibility",
    "tf" => "transform",
    "tfo" => "transform-origin",
    "tn" => "transition",
    "anim" => "animation",
    "fil" => "filter",
    "bf" => "backdrop-filter",
    "of" => "object-fit",
    "obp" => "object-position",
    "lst" => "list-style",
    "ctt" => "container-type",
    "ctn" => "container-name",
    "wc" => "will-change",
    "app" => "appearance",
    "rs" => "resize",
    "mix" => "mix-blend-mode",

    // Full names accepted as-is
    "color" => "color",
    "width" => "width",
    "height" => "height",
    "margin" => "margin",
    "padding" => "padding",
    "border" => "border",
    "display" => "display",
    "position" => "position",
    "overflow" => "overflow",
    "opacity" => "opacity",
    "gap" => "gap",
    "inset" => "inset",
    "flex" => "flex",
    "order" => "order",
    "cursor" => "cursor",
    "filter" => "filter",
    "transform" => "transform",
    "transition" => "transition",
    "animation" => "animation",
};

/// Names accepted as `<state>(...)` lines, emitted as `:state`.
pub static STATES: phf::Set<&'static str> = phf_set! {
    "hover",
    "focus",
    "focus-within",
    "focus-visible",
    "active",
    "visited",
    "target",
    "disabled",
    "enabled",
    "checked",
    "indeterminate",
    "required",
    "optional",
    "valid",
    "invalid",
    "read-only",
    "placeholder-shown",
    "empty",
    "first-child",
    "last-child",
    "only-child",
    "first-of-type",
    "last-of-type",
};

/// Names accepted as `<pseudo>(...)` lines, emitted as `::pseudo`.
pub static PSEUDO_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "before",
    "after",
    "placeholder",
    "selection",
    "marker",
    "first-line",
    "first-letter",
    "backdrop",
    "file-selector-button",
};

/// The abbreviation lookup handed to every line parser.
///
/// Entries added with [`insert`](Self::insert) take precedence over the
/// built-in table.
///
/// ```rust
/// use tersecss::AbbreviationTable;
///
/// let mut table = AbbreviationTable::new();
/// assert_eq!(table.resolve("bg"), Some("background-color"));
///
/// table.insert("scb", "scrollbar-color");
/// assert_eq!(table.resolve("scb"), Some("scrollbar-color"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbbreviationTable {
    extra: HashMap<String, String>,
}

impl AbbreviationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, abbreviation: impl Into<String>, property: impl Into<String>) {
        self.extra.insert(abbreviation.into(), property.into());
    }

    pub fn resolve(&self, abbreviation: &str) -> Option<&str> {
        self.extra
            .get(abbreviation)
            .map(String::as_str)
            .or_else(|| DEFAULT_ABBREVIATIONS.get(abbreviation).copied())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AbbreviationTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (abbreviation, property) in iter {
            table.insert(abbreviation, property);
        }
        table
    }
}

pub fn is_state(name: &str) -> bool {
    STATES.contains(name)
}

pub fn is_pseudo_element(name: &str) -> bool {
    PSEUDO_ELEMENTS.contains(name)
}
