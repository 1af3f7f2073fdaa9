//! Placeholder Module
//!
//! Symbolic names for markup tags and the numbering rule that keeps repeated
//! markers of one kind distinguishable inside a single native encoding.

use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

pub const INTERPOLATION_NAME: &str = "INTERPOLATION";
pub const ICU_NAME: &str = "ICU";
const START_PREFIX: &str = "START_";
const CLOSE_PREFIX: &str = "CLOSE_";
const UNKNOWN_TAG_PREFIX: &str = "TAG_";

lazy_static! {
    static ref TAG_TO_PLACEHOLDER_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("a", "LINK");
        m.insert("b", "BOLD_TEXT");
        m.insert("br", "LINE_BREAK");
        m.insert("em", "EMPHASISED_TEXT");
        m.insert("h1", "HEADING_LEVEL1");
        m.insert("h2", "HEADING_LEVEL2");
        m.insert("h3", "HEADING_LEVEL3");
        m.insert("h4", "HEADING_LEVEL4");
        m.insert("h5", "HEADING_LEVEL5");
        m.insert("h6", "HEADING_LEVEL6");
        m.insert("hr", "HORIZONTAL_RULE");
        m.insert("i", "ITALIC_TEXT");
        m.insert("li", "LIST_ITEM");
        m.insert("link", "MEDIA_LINK");
        m.insert("ol", "ORDERED_LIST");
        m.insert("p", "PARAGRAPH");
        m.insert("q", "QUOTATION");
        m.insert("s", "STRIKETHROUGH_TEXT");
        m.insert("small", "SMALL_TEXT");
        m.insert("sub", "SUBSTRIPT");
        m.insert("sup", "SUPERSCRIPT");
        m.insert("tbody", "TABLE_BODY");
        m.insert("td", "TABLE_CELL");
        m.insert("tfoot", "TABLE_FOOTER");
        m.insert("th", "TABLE_HEADER_CELL");
        m.insert("thead", "TABLE_HEADER");
        m.insert("tr", "TABLE_ROW");
        m.insert("tt", "MONOSPACED_TEXT");
        m.insert("u", "UNDERLINED_TEXT");
        m.insert("ul", "UNORDERED_LIST");
        m
    };
    static ref PLACEHOLDER_NAMES_TO_TAG: HashMap<&'static str, &'static str> =
        TAG_TO_PLACEHOLDER_NAMES.iter().map(|(k, v)| (*v, *k)).collect();
}

/// Tags that never have content and render without a close tag.
const EMPTY_TAGS: &[&str] = &[
    "br", "hr", "img", "area", "input", "wbr", "link", "meta", "col", "embed", "source",
    "track", "param", "base",
];

static ORDINAL_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(\d+)$").unwrap());

/// `b` -> `BOLD_TEXT`, unknown `strange` -> `TAG_STRANGE`
pub fn symbolic_name_for(tag: &str) -> String {
    let lower = tag.to_lowercase();
    TAG_TO_PLACEHOLDER_NAMES
        .get(lower.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{}{}", UNKNOWN_TAG_PREFIX, to_public_name(&lower)))
}

/// Inverse of `symbolic_name_for`. Accepts marker names with their
/// `START_`/`CLOSE_` prefix and ordinal suffix, e.g. `CLOSE_BOLD_TEXT_1` -> `b`.
pub fn tag_for_symbolic_name(name: &str) -> Option<String> {
    let (base, _) = split_ordinal(name);
    let base = base
        .strip_prefix(START_PREFIX)
        .or_else(|| base.strip_prefix(CLOSE_PREFIX))
        .unwrap_or(base);
    if let Some(tag) = PLACEHOLDER_NAMES_TO_TAG.get(base) {
        return Some(tag.to_string());
    }
    base.strip_prefix(UNKNOWN_TAG_PREFIX)
        .filter(|rest| !rest.is_empty())
        .map(|rest| rest.to_lowercase().replace('_', "-"))
}

/// Last resort tag name of a marker: its own name lowercased, or the name of
/// the marker element when the marker is unnamed.
pub fn fallback_tag(name: &str, element: &str) -> String {
    if name.is_empty() {
        element.to_string()
    } else {
        name.to_lowercase()
    }
}

/// Tag name from an escaped markup example such as `<b>`, `</b>` or `<br/>`.
pub fn tag_from_example(example: &str) -> Option<String> {
    let name: String = example
        .trim()
        .trim_start_matches('<')
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

pub fn is_empty_tag(tag: &str) -> bool {
    EMPTY_TAGS.contains(&tag.to_lowercase().as_str())
}

pub fn is_start_marker(name: &str) -> bool {
    name.starts_with(START_PREFIX)
}

pub fn is_close_marker(name: &str) -> bool {
    name.starts_with(CLOSE_PREFIX)
}

/// Whether `name` is `base` or `base` with an ordinal suffix.
pub fn has_base_name(name: &str, base: &str) -> bool {
    split_ordinal(name).0 == base
}

/// `INTERPOLATION_2` -> (`INTERPOLATION`, 2), `ICU` -> (`ICU`, 0)
pub fn split_ordinal(name: &str) -> (&str, usize) {
    if let Some(captures) = ORDINAL_SUFFIX.captures(name) {
        if let (Some(whole), Ok(ordinal)) = (captures.get(0), captures[1].parse::<usize>()) {
            return (&name[..whole.start()], ordinal);
        }
    }
    (name, 0)
}

/// Marker names may only contain A-Z, 0-9 and _
pub fn to_public_name(internal_name: &str) -> String {
    internal_name
        .to_uppercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Interpolation marker for message index `index`: `INTERPOLATION`, `INTERPOLATION_1`, ...
///
/// The index is part of the name so a reordered translation keeps pointing at
/// the right source value.
pub fn interpolation_name(index: usize) -> String {
    indexed_name(INTERPOLATION_NAME, index)
}

/// ICU reference marker for message index `index`: `ICU`, `ICU_1`, ...
pub fn icu_name(index: usize) -> String {
    indexed_name(ICU_NAME, index)
}

fn indexed_name(base: &str, index: usize) -> String {
    match index {
        0 => base.to_string(),
        n => format!("{}_{}", base, n),
    }
}

/// Hands out tag marker names following the numbering rule: the first occurrence
/// of a base name gets it bare, later ones get `_1`, `_2`, ...
#[derive(Debug, Clone, Default)]
pub struct PlaceholderRegistry {
    // Count the occurrence of the base name to generate a unique name
    place_holder_name_counts: HashMap<String, usize>,
}

impl PlaceholderRegistry {
    pub fn new() -> Self {
        PlaceholderRegistry::default()
    }

    pub fn start_tag_name(&mut self, tag: &str) -> String {
        let base = format!("{}{}", START_PREFIX, symbolic_name_for(tag));
        self.generate_unique_name(&base)
    }

    pub fn close_tag_name(&mut self, tag: &str) -> String {
        let base = format!("{}{}", CLOSE_PREFIX, symbolic_name_for(tag));
        self.generate_unique_name(&base)
    }

    pub fn empty_tag_name(&mut self, tag: &str) -> String {
        self.generate_unique_name(&symbolic_name_for(tag))
    }

    fn generate_unique_name(&mut self, base: &str) -> String {
        match self.place_holder_name_counts.get_mut(base) {
            None => {
                self.place_holder_name_counts.insert(base.to_string(), 1);
                base.to_string()
            }
            Some(count) => {
                let id = *count;
                *count += 1;
                format!("{}_{}", base, id)
            }
        }
    }
}
