//! XML Module
//!
//! In-memory XML tree the trans-units operate on.

pub mod dom;
pub mod xml_parser;
pub mod xml_serializer;

pub use dom::{DocumentRef, Element, NodeId, NodeKind, OwnedNode, XmlDocument};
pub use xml_parser::{parse_document, parse_fragment};
pub use xml_serializer::{escape_text, escape_xml, inner_xml, outer_xml, serialize_document};
