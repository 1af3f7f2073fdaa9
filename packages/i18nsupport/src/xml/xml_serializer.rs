//! XML Serializer
//!
//! Writes arena nodes back to markup.

use super::dom::{NodeId, NodeKind, XmlDocument};

/// Visitor over arena nodes producing markup
pub trait IVisitor {
    fn visit_tag(&mut self, doc: &XmlDocument, id: NodeId) -> String;
    fn visit_text(&mut self, text: &str) -> String;
    fn visit_declaration(&mut self, decl: &str) -> String;
    fn visit_doctype(&mut self, doctype: &str) -> String;
}

struct Visitor;

impl IVisitor for Visitor {
    fn visit_tag(&mut self, doc: &XmlDocument, id: NodeId) -> String {
        let Some(element) = doc.element(id) else {
            return String::new();
        };
        let str_attrs: String = element
            .attrs
            .iter()
            .map(|(name, value)| format!(" {}=\"{}\"", name, escape_xml(value)))
            .collect();

        let children = doc.children(id);
        if children.is_empty() {
            return format!("<{}{}/>", element.name, str_attrs);
        }

        let str_children: String = children
            .iter()
            .map(|child| self.visit_node(doc, *child))
            .collect();

        format!(
            "<{}{}>{}</{}>",
            element.name, str_attrs, str_children, element.name
        )
    }

    fn visit_text(&mut self, text: &str) -> String {
        escape_text(text)
    }

    fn visit_declaration(&mut self, decl: &str) -> String {
        format!("<?{}?>", decl)
    }

    fn visit_doctype(&mut self, doctype: &str) -> String {
        format!("<!DOCTYPE {}>", doctype)
    }
}

impl Visitor {
    fn visit_node(&mut self, doc: &XmlDocument, id: NodeId) -> String {
        match doc.kind(id) {
            NodeKind::Element(_) => self.visit_tag(doc, id),
            NodeKind::Text(text) => self.visit_text(text),
            NodeKind::Comment(comment) => format!("<!--{}-->", comment),
            NodeKind::Declaration(decl) => self.visit_declaration(decl),
            NodeKind::Doctype(doctype) => self.visit_doctype(doctype),
            NodeKind::ProcessingInstruction(pi) => format!("<?{}?>", pi),
        }
    }
}

/// Markup of the node itself, including its own tag.
pub fn outer_xml(doc: &XmlDocument, id: NodeId) -> String {
    Visitor.visit_node(doc, id)
}

/// Markup of the node's children only.
pub fn inner_xml(doc: &XmlDocument, id: NodeId) -> String {
    let mut visitor = Visitor;
    doc.children(id)
        .iter()
        .map(|child| visitor.visit_node(doc, *child))
        .collect()
}

/// Markup of the whole document, prolog included.
pub fn serialize_document(doc: &XmlDocument) -> String {
    let mut visitor = Visitor;
    doc.top_level()
        .iter()
        .map(|id| visitor.visit_node(doc, *id))
        .collect()
}

/// Escape special XML characters for attribute values
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape special XML characters for character data
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
