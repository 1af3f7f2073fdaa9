#![deny(clippy::all)]

/**
 * i18nsupport - translation unit tooling
 *
 * Reads, edits and rewrites the trans-units of XLIFF 1.2, XLIFF 2.0 and
 * XMB/XTB files through one dialect-independent message model.
 */

pub mod config;
pub mod error;
pub mod i18n;
pub mod xml;

// Re-exports
pub use config::TranslationConfig;
pub use error::{I18nError, MarkupError, Result, XmlError};
pub use i18n::parsers::DialectKind;
pub use i18n::units::{
    AnyTransUnit, FileHandle, Note, SourceReference, TransUnit, TranslationInput,
    TranslationState, Xliff2TransUnit, XliffTransUnit, XmbTransUnit,
};
pub use i18n::{NormalizedMessage, Part, ValidationReport};
pub use xml::{parse_document, serialize_document, DocumentRef, NodeId, XmlDocument};
