//! XMB Message Parser
//!
//! Markers of XMB masters and XTB bundles: `<ph name="…"><ex>…</ex></ph>`.
//! The `<ex>` payload holds a readable example, for tags the original markup.

use super::message_parser::{
    DialectRules, Marker, MarkerRequest, MarkerRole, MarkerTemplate, TagMarkerKind,
};
use super::DialectKind;
use crate::i18n::placeholder::{
    fallback_tag, has_base_name, is_close_marker, is_start_marker, tag_for_symbolic_name,
    tag_from_example, ICU_NAME, INTERPOLATION_NAME,
};
use crate::xml::{NodeId, XmlDocument};

const PLACEHOLDER_TAG: &str = "ph";
const EXAMPLE_TAG: &str = "ex";
const NAME_ATTR: &str = "name";

#[derive(Debug, Clone, Copy, Default)]
pub struct XmbMessageParser;

impl XmbMessageParser {
    fn recover_tag(doc: &XmlDocument, node: NodeId, name: &str) -> String {
        doc.first_child_named(node, EXAMPLE_TAG)
            .and_then(|example| tag_from_example(&doc.text_content(example)))
            .or_else(|| tag_for_symbolic_name(name))
            .unwrap_or_else(|| fallback_tag(name, PLACEHOLDER_TAG))
    }
}

impl DialectRules for XmbMessageParser {
    fn kind(&self) -> DialectKind {
        DialectKind::Xmb
    }

    fn recognize_marker(&self, doc: &XmlDocument, node: NodeId) -> Option<Marker> {
        if !doc.is_named(node, PLACEHOLDER_TAG) {
            return None;
        }
        let name = doc.attr(node, NAME_ATTR)?;
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
        let template = MarkerTemplate::new(PLACEHOLDER_TAG).attr(NAME_ATTR, request.logical_name);
        let tag = request.tag.unwrap_or_default();
        let example = match request.role {
            MarkerRole::Interpolation => INTERPOLATION_NAME.to_string(),
            MarkerRole::Icu => ICU_NAME.to_string(),
            MarkerRole::TagStart | MarkerRole::TagEmpty => format!("<{}>", tag),
            MarkerRole::TagEnd => format!("</{}>", tag),
        };
        template.example(EXAMPLE_TAG, example)
    }
}
