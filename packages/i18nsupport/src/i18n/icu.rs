//! ICU Message References
//!
//! ICU plural/select expressions are owned elsewhere. This module only recognizes
//! them and formats the opaque references that stand in for them.

use once_cell::sync::Lazy;
use regex::Regex;

const ICU_REF_PREFIX: &str = "<ICU-Message-Ref_";
const ICU_REF_SUFFIX: &str = "/>";

static ICU_MESSAGE_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\{\s*[^{},]+?\s*,\s*(plural|select|selectordinal)\s*,").unwrap()
});

/// Whether `text` opens an ICU plural/select expression, e.g.
/// `{VAR_PLURAL, plural, =0 {none} other {many}}`.
pub fn is_icu_message_start(text: &str) -> bool {
    ICU_MESSAGE_START.is_match(text)
}

/// Display form of a reference: `<ICU-Message-Ref_0/>`
pub fn format_icu_ref(index: usize) -> String {
    format!("{}{}{}", ICU_REF_PREFIX, index, ICU_REF_SUFFIX)
}
