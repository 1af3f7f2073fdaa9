//! Translation consistency checks between a source message and its translation.

use crate::i18n::normalized_message::{NormalizedMessage, Part};
use std::collections::BTreeMap;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Placeholders or ICU references removed from or added to the source
    pub errors: Vec<String>,

    /// Markup tags that appear in only one of the two messages
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        ValidationReport::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    pub(crate) fn compare(source: &NormalizedMessage, translation: &NormalizedMessage) -> Self {
        let mut report = ValidationReport::new();

        let source_placeholders = count(source, |p| match p {
            Part::Placeholder(index) => Some(format!("{{{{{}}}}}", index)),
            _ => None,
        });
        let target_placeholders = count(translation, |p| match p {
            Part::Placeholder(index) => Some(format!("{{{{{}}}}}", index)),
            _ => None,
        });
        diff(
            &source_placeholders,
            &target_placeholders,
            "placeholder",
            &mut report.errors,
        );

        let source_icu = count(source, icu_key);
        let target_icu = count(translation, icu_key);
        diff(&source_icu, &target_icu, "ICU message reference", &mut report.errors);

        let source_tags = count(source, tag_key);
        let target_tags = count(translation, tag_key);
        diff(&source_tags, &target_tags, "tag", &mut report.warnings);

        report
    }
}

fn icu_key(part: &Part) -> Option<String> {
    match part {
        Part::IcuRef(index) => Some(crate::i18n::icu::format_icu_ref(*index)),
        _ => None,
    }
}

fn tag_key(part: &Part) -> Option<String> {
    match part {
        Part::TagStart(name) | Part::TagEmpty(name) => Some(format!("<{}>", name)),
        _ => None,
    }
}

fn count<F>(message: &NormalizedMessage, key: F) -> BTreeMap<String, usize>
where
    F: Fn(&Part) -> Option<String>,
{
    let mut counts = BTreeMap::new();
    for name in message.parts().iter().filter_map(key) {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}

fn diff(
    source: &BTreeMap<String, usize>,
    target: &BTreeMap<String, usize>,
    what: &str,
    out: &mut Vec<String>,
) {
    for (name, expected) in source {
        let found = target.get(name).copied().unwrap_or(0);
        if found < *expected {
            out.push(format!("removed {} {} from source", what, name));
        }
    }
    for (name, found) in target {
        let expected = source.get(name).copied().unwrap_or(0);
        if *found > expected {
            out.push(format!("added {} {}, which is not in source", what, name));
        }
    }
}
