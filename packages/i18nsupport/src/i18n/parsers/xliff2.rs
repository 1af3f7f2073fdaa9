//! XLIFF 2.0 Message Parser
//!
//! Standalone markers are `<ph/>` elements, tag pairs are spanning `<pc>`
//! elements wrapping their content.
//! See https://docs.oasis-open.org/xliff/xliff-core/v2.0/os/xliff-core-v2.0-os.html

use super::message_parser::{
    DialectRules, Marker, MarkerRequest, MarkerRole, MarkerTemplate, TagEncoding, TagMarkerKind,
};
use super::DialectKind;
use crate::i18n::icu::format_icu_ref;
use crate::i18n::placeholder::{
    fallback_tag, has_base_name, is_close_marker, is_start_marker, tag_for_symbolic_name,
    tag_from_example, ICU_NAME, INTERPOLATION_NAME,
};
use crate::xml::{NodeId, XmlDocument};

const PLACEHOLDER_TAG: &str = "ph";
const PLACEHOLDER_SPANNING_TAG: &str = "pc";
const ID_ATTR: &str = "id";
const EQUIV_ATTR: &str = "equiv";
const DISP_ATTR: &str = "disp";
const EQUIV_START_ATTR: &str = "equivStart";
const EQUIV_END_ATTR: &str = "equivEnd";
const DISP_START_ATTR: &str = "dispStart";
const DISP_END_ATTR: &str = "dispEnd";
const TYPE_ATTR: &str = "type";
const FORMATTING_TYPE: &str = "fmt";

#[derive(Debug, Clone, Copy, Default)]
pub struct Xliff2MessageParser;

fn recover_tag(display: Option<&str>, name: &str, element: &str) -> String {
    display
        .and_then(tag_from_example)
        .or_else(|| tag_for_symbolic_name(name))
        .unwrap_or_else(|| fallback_tag(name, element))
}

impl DialectRules for Xliff2MessageParser {
    fn kind(&self) -> DialectKind {
        DialectKind::Xliff2
    }

    fn tag_encoding(&self) -> TagEncoding {
        TagEncoding::Span
    }

    fn recognize_marker(&self, doc: &XmlDocument, node: NodeId) -> Option<Marker> {
        if doc.is_named(node, PLACEHOLDER_SPANNING_TAG) {
            let name = doc.attr(node, EQUIV_START_ATTR).unwrap_or_default();
            return Some(Marker::Span {
                tag: recover_tag(doc.attr(node, DISP_START_ATTR), name, PLACEHOLDER_SPANNING_TAG),
            });
        }
        if !doc.is_named(node, PLACEHOLDER_TAG) {
            return None;
        }

        let name = doc.attr(node, EQUIV_ATTR)?;
        let marker = if has_base_name(name, INTERPOLATION_NAME) {
            Marker::Interpolation { name: name.to_string() }
        } else if has_base_name(name, ICU_NAME) {
            Marker::IcuRef { name: name.to_string() }
        } else {
            // Some tools write unpaired tags as standalone start/close placeholders
            let kind = if is_start_marker(name) {
                TagMarkerKind::Start
            } else if is_close_marker(name) {
                TagMarkerKind::End
            } else {
                TagMarkerKind::Empty
            };
            Marker::Tag {
                kind,
                tag: recover_tag(doc.attr(node, DISP_ATTR), name, PLACEHOLDER_TAG),
            }
        };
        Some(marker)
    }

    fn emit_marker(&self, request: &MarkerRequest<'_>) -> MarkerTemplate {
        let id = request.ordinal.to_string();
        let tag = request.tag.unwrap_or_default();
        let index = request.index.unwrap_or_default();
        match request.role {
            MarkerRole::Interpolation => MarkerTemplate::new(PLACEHOLDER_TAG)
                .attr(ID_ATTR, id)
                .attr(EQUIV_ATTR, request.logical_name)
                .attr(DISP_ATTR, format!("{{{{{}}}}}", index)),
            MarkerRole::Icu => MarkerTemplate::new(PLACEHOLDER_TAG)
                .attr(ID_ATTR, id)
                .attr(EQUIV_ATTR, request.logical_name)
                .attr(DISP_ATTR, format_icu_ref(index)),
            MarkerRole::TagEmpty => MarkerTemplate::new(PLACEHOLDER_TAG)
                .attr(ID_ATTR, id)
                .attr(EQUIV_ATTR, request.logical_name)
                .attr(TYPE_ATTR, FORMATTING_TYPE)
                .attr(DISP_ATTR, format!("<{}/>", tag)),
            MarkerRole::TagStart => MarkerTemplate::new(PLACEHOLDER_SPANNING_TAG)
                .attr(ID_ATTR, id)
                .attr(EQUIV_START_ATTR, request.logical_name)
                .attr(TYPE_ATTR, FORMATTING_TYPE)
                .attr(DISP_START_ATTR, format!("<{}>", tag)),
            MarkerRole::TagEnd => MarkerTemplate::new(PLACEHOLDER_SPANNING_TAG)
                .attr(EQUIV_END_ATTR, request.logical_name)
                .attr(DISP_END_ATTR, format!("</{}>", tag)),
        }
    }
}
