//! XLIFF Message Parser
//!
//! XLIFF 1.2 marker vocabulary: every marker is a flat `<x/>` element whose
//! `id` carries the marker name.
//! See https://docs.oasis-open.org/xliff/v1.2/os/xliff-core.html

use super::message_parser::{
    DialectRules, Marker, MarkerRequest, MarkerRole, MarkerTemplate, TagMarkerKind,
};
use super::DialectKind;
use crate::i18n::placeholder::{
    fallback_tag, has_base_name, is_close_marker, is_start_marker, tag_for_symbolic_name,
    tag_from_example, ICU_NAME, INTERPOLATION_NAME,
};
use crate::xml::{NodeId, XmlDocument};

const PLACEHOLDER_TAG: &str = "x";
const ID_ATTR: &str = "id";
const CTYPE_ATTR: &str = "ctype";
const EQUIV_TEXT_ATTR: &str = "equiv-text";
const CTYPE_PREFIX: &str = "x-";

#[derive(Debug, Clone, Copy, Default)]
pub struct XliffMessageParser;

impl XliffMessageParser {
    /// `ctype` first, then `equiv-text`, then the marker name itself.
    fn recover_tag(doc: &XmlDocument, node: NodeId, name: &str) -> String {
        doc.attr(node, CTYPE_ATTR)
            .and_then(|ctype| ctype.strip_prefix(CTYPE_PREFIX))
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .or_else(|| doc.attr(node, EQUIV_TEXT_ATTR).and_then(tag_from_example))
            .or_else(|| tag_for_symbolic_name(name))
            .unwrap_or_else(|| fallback_tag(name, PLACEHOLDER_TAG))
    }
}

impl DialectRules for XliffMessageParser {
    fn kind(&self) -> DialectKind {
        DialectKind::Xliff
    }

    fn recognize_marker(&self, doc: &XmlDocument, node: NodeId) -> Option<Marker> {
        if !doc.is_named(node, PLACEHOLDER_TAG) {
            return None;
        }
        let name = doc.attr(node, ID_ATTR)?;
        let marker = if has_base_name(name, INTERPOLATION_NAME) {
            Marker::Interpolation { name: name.to_string() }
        } else if has_base_name(name, ICU_NAME) {
            Marker::IcuRef { name: name.to_string() }
        } else {
            let kind = if is_start_marker(name) {
                TagMarkerKind::Start
            } else if is_close_marker(name) {
                TagMarkerKind::End
            } else {
                TagMarkerKind::Empty
            };
            Marker::Tag {
                kind,
                tag: Self::recover_tag(doc, node, name),
            }
        };
        Some(marker)
    }

    fn emit_marker(&self, request: &MarkerRequest<'_>) -> MarkerTemplate {
        let template = MarkerTemplate::new(PLACEHOLDER_TAG).attr(ID_ATTR, request.logical_name);
        let tag = request.tag.unwrap_or_default();
        match request.role {
            MarkerRole::Interpolation => template.attr(
                EQUIV_TEXT_ATTR,
                format!("{{{{{}}}}}", request.index.unwrap_or_default()),
            ),
            MarkerRole::Icu => template,
            MarkerRole::TagStart => template
                .attr(CTYPE_ATTR, format!("{}{}", CTYPE_PREFIX, tag))
                .attr(EQUIV_TEXT_ATTR, format!("<{}>", tag)),
            MarkerRole::TagEnd => template
                .attr(CTYPE_ATTR, format!("{}{}", CTYPE_PREFIX, tag))
                .attr(EQUIV_TEXT_ATTR, format!("</{}>", tag)),
            MarkerRole::TagEmpty => template
                .attr(CTYPE_ATTR, format!("{}{}", CTYPE_PREFIX, tag))
                .attr(EQUIV_TEXT_ATTR, format!("<{}/>", tag)),
        }
    }
}
