//! Normalized Message Module
//!
//! Dialect-independent form of a message: an ordered sequence of parts with a
//! stable textual (display) rendering.
//!
//! Display grammar:
//!
//! ```text
//! message    := (text | placeholder | tag | empty-tag | icu-ref)*
//! placeholder:= '{{' digits '}}'
//! tag        := '<' name '>' message '</' name '>'
//! empty-tag  := '<' name '>'
//! icu-ref    := '<ICU-Message-Ref_' digits '/>'
//! ```

use crate::error::MarkupError;
use crate::i18n::icu;
use crate::i18n::parsers::{message_parser, DialectKind};
use crate::i18n::placeholder::is_empty_tag;
use crate::i18n::validation::ValidationReport;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

static DISPLAY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\{\{(?P<ph>\d+)\}\}|<ICU-Message-Ref_(?P<icu>\d+)/>|</(?P<close>[A-Za-z][\w.:-]*)\s*>|<(?P<open>[A-Za-z][\w.:-]*)\s*(?P<slash>/?)>",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Part {
    /// Literal translatable text
    Text(String),
    /// Interpolation slot, numbered by occurrence
    Placeholder(usize),
    TagStart(String),
    TagEnd(String),
    /// Self-closing markup such as a line break
    TagEmpty(String),
    /// Opaque reference to an ICU sub-message
    IcuRef(usize),
}

impl Part {
    fn write_display(&self, out: &mut String) {
        match self {
            Part::Text(text) => out.push_str(text),
            Part::Placeholder(index) => out.push_str(&format!("{{{{{}}}}}", index)),
            Part::TagStart(name) | Part::TagEmpty(name) => out.push_str(&format!("<{}>", name)),
            Part::TagEnd(name) => out.push_str(&format!("</{}>", name)),
            Part::IcuRef(index) => out.push_str(&icu::format_icu_ref(*index)),
        }
    }
}

/// Immutable once built. Edits go through re-parsing a display or native string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedMessage {
    parts: Vec<Part>,
}

impl NormalizedMessage {
    /// Wraps hand-built parts. Nesting is not checked here; `to_native_string`
    /// and `check_nesting` report it.
    pub fn new(parts: Vec<Part>) -> Self {
        NormalizedMessage { parts }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn display_string(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            part.write_display(&mut out);
        }
        out
    }

    /// Parses a display string back into parts.
    pub fn parse_display(display: &str) -> Result<Self, MarkupError> {
        let mut parts: Vec<Part> = Vec::new();
        let mut open: SmallVec<[String; 8]> = SmallVec::new();
        let mut last_end = 0;

        for captures in DISPLAY_TOKEN.captures_iter(display) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            push_text(&mut parts, &display[last_end..whole.start()]);
            last_end = whole.end();

            if let Some(index) = captures.name("ph") {
                parts.push(Part::Placeholder(parse_index(index.as_str(), whole.start())?));
            } else if let Some(index) = captures.name("icu") {
                parts.push(Part::IcuRef(parse_index(index.as_str(), whole.start())?));
            } else if let Some(name) = captures.name("close") {
                let name = name.as_str();
                match open.pop() {
                    Some(expected) if expected == name => {}
                    _ => return Err(MarkupError::unexpected_close(name, whole.start())),
                }
                parts.push(Part::TagEnd(name.to_string()));
            } else if let Some(name) = captures.name("open") {
                let name = name.as_str().to_string();
                let self_closing = captures.name("slash").is_some_and(|s| !s.as_str().is_empty());
                if self_closing || is_empty_tag(&name) {
                    parts.push(Part::TagEmpty(name));
                } else {
                    open.push(name.clone());
                    parts.push(Part::TagStart(name));
                }
            }
        }
        push_text(&mut parts, &display[last_end..]);

        if let Some(name) = open.last() {
            return Err(MarkupError::unterminated(name, display.len()));
        }
        Ok(NormalizedMessage { parts })
    }

    /// Native markup of this message in the given dialect.
    pub fn to_native_string(&self, dialect: DialectKind) -> Result<String, MarkupError> {
        message_parser::to_native_string(dialect.rules(), self)
    }

    /// Verifies that start and end tags form a properly nested sequence.
    pub fn check_nesting(&self) -> Result<(), MarkupError> {
        let mut open: SmallVec<[&str; 8]> = SmallVec::new();
        for (position, part) in self.parts.iter().enumerate() {
            match part {
                Part::TagStart(name) => open.push(name.as_str()),
                Part::TagEnd(name) => match open.pop() {
                    Some(expected) if expected == name.as_str() => {}
                    _ => return Err(MarkupError::unexpected_close(name, position)),
                },
                _ => {}
            }
        }
        match open.last() {
            Some(name) => Err(MarkupError::unterminated(name, self.parts.len())),
            None => Ok(()),
        }
    }

    /// Whether the message is a raw ICU plural/select expression.
    pub fn is_icu_message(&self) -> bool {
        match self.parts.as_slice() {
            [Part::Text(text)] => icu::is_icu_message_start(text),
            _ => false,
        }
    }

    pub fn placeholder_indices(&self) -> Vec<usize> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Placeholder(index) => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn icu_ref_indices(&self) -> Vec<usize> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::IcuRef(index) => Some(*index),
                _ => None,
            })
            .collect()
    }

    /// Compares this message (a translation) against its source.
    pub fn validate(&self, source: &NormalizedMessage) -> ValidationReport {
        ValidationReport::compare(source, self)
    }
}

impl fmt::Display for NormalizedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

fn push_text(parts: &mut Vec<Part>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Part::Text(previous)) = parts.last_mut() {
        previous.push_str(text);
    } else {
        parts.push(Part::Text(text.to_string()));
    }
}

fn parse_index(digits: &str, position: usize) -> Result<usize, MarkupError> {
    digits
        .parse()
        .map_err(|_| MarkupError::new(format!("index out of range: {}", digits), position))
}
