//! Message Parser Module
//!
//! Dialect-independent conversion between native marker markup and
//! `NormalizedMessage`. Each dialect only supplies its marker vocabulary through
//! `DialectRules`.
//!
//! Tag markers follow the numbering rule of `PlaceholderRegistry`: the first
//! marker of a kind gets the bare name, repeats get `_1`, `_2`, ...
//! Interpolation and ICU markers carry their message index in the name, which
//! is the same thing for messages whose indices appear in order.

use super::DialectKind;
use crate::error::{MarkupError, Result};
use crate::i18n::icu;
use crate::i18n::normalized_message::{NormalizedMessage, Part};
use crate::i18n::placeholder::{self, PlaceholderRegistry};
use crate::xml::{inner_xml, outer_xml, parse_fragment, NodeId, NodeKind, XmlDocument};
use smallvec::{smallvec, SmallVec};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

const SCRATCH_ROOT: &str = "message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMarkerKind {
    Start,
    End,
    Empty,
}

/// What a native element stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Interpolation { name: String },
    IcuRef { name: String },
    /// A flat marker for one tag boundary, `tag` being the original tag name
    Tag { kind: TagMarkerKind, tag: String },
    /// An element wrapping the tagged content itself
    Span { tag: String },
}

/// How a dialect encodes a start/end tag pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEncoding {
    /// Two sibling markers around the content
    Flat,
    /// One element whose children are the content
    Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    Interpolation,
    Icu,
    TagStart,
    TagEnd,
    TagEmpty,
}

#[derive(Debug, Clone, Copy)]
pub struct MarkerRequest<'a> {
    pub role: MarkerRole,
    /// Disambiguated marker name, e.g. `START_BOLD_TEXT_1`
    pub logical_name: &'a str,
    /// Original tag name for tag markers
    pub tag: Option<&'a str>,
    /// Message index of an interpolation or ICU reference
    pub index: Option<usize>,
    /// Position of the marker among all markers of the message
    pub ordinal: usize,
}

/// Native element to emit for one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerTemplate {
    pub element: String,
    pub attrs: Vec<(String, String)>,
    /// Child element holding a human readable example, e.g. `<ex>&lt;b&gt;</ex>`
    pub example: Option<(String, String)>,
}

impl MarkerTemplate {
    pub fn new(element: &str) -> Self {
        MarkerTemplate {
            element: element.to_string(),
            attrs: Vec::new(),
            example: None,
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn example(mut self, element: &str, text: impl Into<String>) -> Self {
        self.example = Some((element.to_string(), text.into()));
        self
    }

    fn build(&self, doc: &mut XmlDocument) -> NodeId {
        let node = doc.create_element(&self.element);
        self.apply_attrs(doc, node);
        if let Some((element, text)) = &self.example {
            let example = doc.append_element(node, element);
            doc.append_text(example, text);
        }
        node
    }

    fn apply_attrs(&self, doc: &mut XmlDocument, node: NodeId) {
        for (name, value) in &self.attrs {
            doc.set_attr(node, name, value);
        }
    }
}

/// Marker vocabulary of one dialect.
pub trait DialectRules {
    fn kind(&self) -> DialectKind;

    /// Classifies an element found inside message content. `None` means the
    /// element is not a marker; its children are read as ordinary content.
    fn recognize_marker(&self, doc: &XmlDocument, node: NodeId) -> Option<Marker>;

    fn tag_encoding(&self) -> TagEncoding {
        TagEncoding::Flat
    }

    fn symbolic_name_for(&self, tag: &str) -> String {
        placeholder::symbolic_name_for(tag)
    }

    /// For `TagEncoding::Span` dialects the template of a `TagEnd` only
    /// contributes attributes to the span opened by the matching `TagStart`.
    fn emit_marker(&self, request: &MarkerRequest<'_>) -> MarkerTemplate;
}

/// Reads the children of `element` into a normalized message.
///
/// Content opening with an ICU expression comes back as a single `Text` part
/// holding its markup verbatim; markers inside it are not read.
///
/// When `source` is given, interpolation and ICU indices are taken from the
/// source marker with the same native name; markers unknown to the source get
/// the smallest index neither used so far nor claimed by the source.
pub fn parse_element(
    rules: &dyn DialectRules,
    doc: &XmlDocument,
    element: NodeId,
    source: Option<&NormalizedMessage>,
) -> Result<NormalizedMessage, MarkupError> {
    if let Some(icu_message) = raw_icu_message(doc, element) {
        return Ok(NormalizedMessage::new(vec![Part::Text(icu_message)]));
    }
    let mut walker = MessageWalker::new(rules, source);
    walker.walk_children(doc, element)?;
    walker.finish()
}

fn raw_icu_message(doc: &XmlDocument, element: NodeId) -> Option<String> {
    let children = doc.children(element);
    let leading = doc.text(*children.first()?)?;
    if !icu::is_icu_message_start(leading) {
        return None;
    }
    Some(
        children
            .iter()
            .map(|child| match doc.kind(*child) {
                NodeKind::Text(text) => text.clone(),
                _ => outer_xml(doc, *child),
            })
            .collect(),
    )
}

/// Parses native markup (mixed content, no wrapping element) into a normalized message.
pub fn parse_native_string(
    rules: &dyn DialectRules,
    native: &str,
    source: Option<&NormalizedMessage>,
) -> Result<NormalizedMessage> {
    let mut doc = XmlDocument::with_root(SCRATCH_ROOT);
    let root = scratch_root(&doc)?;
    for node in parse_fragment(&mut doc, native)? {
        doc.append_child(root, node);
    }
    Ok(parse_element(rules, &doc, root, source)?)
}

/// Appends the native encoding of `message` to `parent`.
///
/// Nesting is verified before anything is written.
pub fn append_message(
    rules: &dyn DialectRules,
    doc: &mut XmlDocument,
    parent: NodeId,
    message: &NormalizedMessage,
) -> Result<(), MarkupError> {
    message.check_nesting()?;

    // ICU content read by `parse_element` keeps its markers as markup
    if let [Part::Text(text)] = message.parts() {
        if icu::is_icu_message_start(text) {
            if let Ok(nodes) = parse_fragment(doc, text) {
                for node in nodes {
                    doc.append_child(parent, node);
                }
                return Ok(());
            }
        }
    }

    let mut registry = PlaceholderRegistry::new();
    let mut containers: SmallVec<[NodeId; 8]> = smallvec![parent];
    let mut ordinal = 0;
    let encoding = rules.tag_encoding();

    for part in message.parts() {
        let current = containers.last().copied().unwrap_or(parent);
        let (role, name, tag, index) = match part {
            Part::Text(text) => {
                doc.append_text(current, text);
                continue;
            }
            Part::Placeholder(index) => (
                MarkerRole::Interpolation,
                placeholder::interpolation_name(*index),
                None,
                Some(*index),
            ),
            Part::IcuRef(index) => (MarkerRole::Icu, placeholder::icu_name(*index), None, Some(*index)),
            Part::TagEmpty(tag) => (MarkerRole::TagEmpty, registry.empty_tag_name(tag), Some(tag), None),
            Part::TagStart(tag) => (MarkerRole::TagStart, registry.start_tag_name(tag), Some(tag), None),
            Part::TagEnd(tag) => (MarkerRole::TagEnd, registry.close_tag_name(tag), Some(tag), None),
        };
        let request = MarkerRequest {
            role,
            logical_name: &name,
            tag: tag.map(String::as_str),
            index,
            ordinal,
        };
        let template = rules.emit_marker(&request);

        match (role, encoding) {
            (MarkerRole::TagEnd, TagEncoding::Span) => {
                if containers.len() > 1 {
                    if let Some(span) = containers.pop() {
                        template.apply_attrs(doc, span);
                    }
                }
            }
            (MarkerRole::TagStart, TagEncoding::Span) => {
                let span = template.build(doc);
                doc.append_child(current, span);
                containers.push(span);
                ordinal += 1;
            }
            _ => {
                let marker = template.build(doc);
                doc.append_child(current, marker);
                ordinal += 1;
            }
        }
    }
    Ok(())
}

/// Native markup of `message` without a wrapping element.
pub fn to_native_string(
    rules: &dyn DialectRules,
    message: &NormalizedMessage,
) -> Result<String, MarkupError> {
    let mut doc = XmlDocument::with_root(SCRATCH_ROOT);
    let Some(root) = doc.root_element() else {
        return Err(MarkupError::new("scratch document has no root", 0));
    };
    append_message(rules, &mut doc, root, message)?;
    Ok(inner_xml(&doc, root))
}

fn scratch_root(doc: &XmlDocument) -> Result<NodeId, MarkupError> {
    doc.root_element()
        .ok_or_else(|| MarkupError::new("scratch document has no root", 0))
}

/// Hands out interpolation or ICU indices while parsing.
struct IndexAllocator {
    aligned: HashMap<String, usize>,
    used: BTreeSet<usize>,
}

impl IndexAllocator {
    fn new(aligned: HashMap<String, usize>) -> Self {
        IndexAllocator {
            aligned,
            used: BTreeSet::new(),
        }
    }

    fn index_for(&mut self, name: &str) -> usize {
        let index = match self.aligned.get(name) {
            Some(index) => *index,
            None => self.next_unused(),
        };
        self.used.insert(index);
        index
    }

    fn next_unused(&self) -> usize {
        let claimed: BTreeSet<usize> = self.aligned.values().copied().collect();
        (0..)
            .find(|index| !self.used.contains(index) && !claimed.contains(index))
            .unwrap_or_default()
    }
}

/// Native names the source message is written with, mapped to its indices.
fn source_names(source: Option<&NormalizedMessage>) -> (HashMap<String, usize>, HashMap<String, usize>) {
    let mut interpolations = HashMap::new();
    let mut icu_refs = HashMap::new();
    for part in source.map(NormalizedMessage::parts).unwrap_or_default() {
        match part {
            Part::Placeholder(index) => {
                interpolations.insert(placeholder::interpolation_name(*index), *index);
            }
            Part::IcuRef(index) => {
                icu_refs.insert(placeholder::icu_name(*index), *index);
            }
            _ => {}
        }
    }
    (interpolations, icu_refs)
}

struct MessageWalker<'a> {
    rules: &'a dyn DialectRules,
    parts: Vec<Part>,
    open: SmallVec<[String; 8]>,
    position: usize,
    interpolations: IndexAllocator,
    icu_refs: IndexAllocator,
}

impl<'a> MessageWalker<'a> {
    fn new(rules: &'a dyn DialectRules, source: Option<&NormalizedMessage>) -> Self {
        let (interpolations, icu_refs) = source_names(source);
        MessageWalker {
            rules,
            parts: Vec::new(),
            open: SmallVec::new(),
            position: 0,
            interpolations: IndexAllocator::new(interpolations),
            icu_refs: IndexAllocator::new(icu_refs),
        }
    }

    fn walk_children(&mut self, doc: &XmlDocument, parent: NodeId) -> Result<(), MarkupError> {
        for &child in doc.children(parent) {
            self.position += 1;
            match doc.kind(child) {
                NodeKind::Text(text) => self.push_text(text),
                NodeKind::Element(element) => match self.rules.recognize_marker(doc, child) {
                    Some(marker) => self.accept(doc, child, marker)?,
                    None => {
                        debug!(
                            element = %element.name,
                            dialect = ?self.rules.kind(),
                            "reading unrecognized element as plain content"
                        );
                        self.walk_children(doc, child)?;
                    }
                },
                _ => {}
            }
        }
        Ok(())
    }

    fn accept(&mut self, doc: &XmlDocument, node: NodeId, marker: Marker) -> Result<(), MarkupError> {
        match marker {
            Marker::Interpolation { name } => {
                let index = self.interpolations.index_for(&name);
                self.parts.push(Part::Placeholder(index));
            }
            Marker::IcuRef { name } => {
                let index = self.icu_refs.index_for(&name);
                self.parts.push(Part::IcuRef(index));
            }
            Marker::Tag { kind: TagMarkerKind::Start, tag } => self.start_tag(tag),
            Marker::Tag { kind: TagMarkerKind::End, tag } => self.end_tag(tag)?,
            Marker::Tag { kind: TagMarkerKind::Empty, tag } => self.parts.push(Part::TagEmpty(tag)),
            Marker::Span { tag } => {
                self.start_tag(tag.clone());
                self.walk_children(doc, node)?;
                self.end_tag(tag)?;
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: String) {
        self.open.push(tag.clone());
        self.parts.push(Part::TagStart(tag));
    }

    fn end_tag(&mut self, tag: String) -> Result<(), MarkupError> {
        match self.open.pop() {
            Some(expected) if expected == tag => {
                self.parts.push(Part::TagEnd(tag));
                Ok(())
            }
            _ => Err(MarkupError::unexpected_close(&tag, self.position)),
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Part::Text(previous)) = self.parts.last_mut() {
            previous.push_str(text);
        } else {
            self.parts.push(Part::Text(text.to_string()));
        }
    }

    fn finish(self) -> Result<NormalizedMessage, MarkupError> {
        if let Some(tag) = self.open.last() {
            return Err(MarkupError::unterminated(tag, self.position));
        }
        Ok(NormalizedMessage::new(self.parts))
    }
}
