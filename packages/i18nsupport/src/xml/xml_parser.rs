//! XML Parser
//!
//! Builds arena nodes from `quick-xml` events. Whitespace is preserved as-is,
//! since it is part of translatable content.

use super::dom::{Element, NodeId, NodeKind, XmlDocument};
use crate::error::XmlError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

/// Parses a complete document.
pub fn parse_document(source: &str) -> Result<XmlDocument, XmlError> {
    let mut doc = XmlDocument::new();
    for id in read_nodes(&mut doc, source)? {
        doc.push_top_level(id);
    }
    Ok(doc)
}

/// Parses mixed content (text and elements, no single root required) into
/// detached nodes owned by `doc`.
pub fn parse_fragment(doc: &mut XmlDocument, source: &str) -> Result<Vec<NodeId>, XmlError> {
    read_nodes(doc, source)
}

fn read_nodes(doc: &mut XmlDocument, source: &str) -> Result<Vec<NodeId>, XmlError> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(false);
    reader.check_end_names(true);

    let mut open: Vec<NodeId> = Vec::new();
    let mut top: Vec<NodeId> = Vec::new();

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|err| XmlError::new(err.to_string(), reader.buffer_position()))?;
        match event {
            Event::Start(start) => {
                let id = element_node(doc, &start, position)?;
                attach(doc, &open, &mut top, id);
                open.push(id);
            }
            Event::Empty(start) => {
                let id = element_node(doc, &start, position)?;
                attach(doc, &open, &mut top, id);
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|err| XmlError::new(err.to_string(), position))?;
                append_text(doc, &open, &mut top, &value);
            }
            Event::CData(cdata) => {
                let raw = cdata.into_inner();
                append_text(doc, &open, &mut top, &String::from_utf8_lossy(&raw));
            }
            Event::Comment(comment) => {
                let id = doc.create_node(NodeKind::Comment(lossy(&comment)));
                attach(doc, &open, &mut top, id);
            }
            Event::Decl(decl) => {
                let id = doc.create_node(NodeKind::Declaration(lossy(&decl)));
                attach(doc, &open, &mut top, id);
            }
            Event::PI(pi) => {
                let id = doc.create_node(NodeKind::ProcessingInstruction(lossy(&pi)));
                attach(doc, &open, &mut top, id);
            }
            Event::DocType(doctype) => {
                let id = doc.create_node(NodeKind::Doctype(lossy(&doctype).trim().to_string()));
                attach(doc, &open, &mut top, id);
            }
            Event::Eof => break,
        }
    }

    if let Some(unclosed) = open.last() {
        let name = doc.name(*unclosed).unwrap_or_default().to_string();
        return Err(XmlError::new(
            format!("element <{}> is never closed", name),
            source.len(),
        ));
    }
    Ok(top)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn element_node(
    doc: &mut XmlDocument,
    start: &BytesStart<'_>,
    position: usize,
) -> Result<NodeId, XmlError> {
    let mut element = Element::new(lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|err| XmlError::new(err.to_string(), position))?;
        let value: Cow<'_, str> = attr
            .unescape_value()
            .map_err(|err| XmlError::new(err.to_string(), position))?;
        element
            .attrs
            .insert(lossy(attr.key.as_ref()), value.into_owned());
    }
    Ok(doc.create_node(NodeKind::Element(element)))
}

fn attach(doc: &mut XmlDocument, open: &[NodeId], top: &mut Vec<NodeId>, id: NodeId) {
    match open.last() {
        Some(parent) => doc.append_child(*parent, id),
        None => top.push(id),
    }
}

// Adjacent character data (text next to CDATA) collapses into one node.
fn append_text(doc: &mut XmlDocument, open: &[NodeId], top: &mut Vec<NodeId>, value: &str) {
    if value.is_empty() {
        return;
    }
    let previous = match open.last() {
        Some(parent) => doc.children(*parent).last().copied(),
        None => top.last().copied(),
    };
    if let Some(previous) = previous {
        if let Some(existing) = doc.text(previous) {
            let merged = format!("{}{}", existing, value);
            doc.set_text(previous, &merged);
            return;
        }
    }
    let id = doc.create_text(value);
    attach(doc, open, top, id);
}
