//! Trans-Units
//!
//! A trans-unit is one translatable record inside a document it does not own.
//! It holds a shared handle onto the document plus the id of its element, and
//! re-reads the live tree on every call.

pub mod state;
pub mod xliff;
pub mod xliff2;
pub mod xmb;

pub use state::TranslationState;
pub use xliff::XliffTransUnit;
pub use xliff2::Xliff2TransUnit;
pub use xmb::XmbTransUnit;

use crate::config::TranslationConfig;
use crate::error::{I18nError, Result};
use crate::i18n::icu::is_icu_message_start;
use crate::i18n::normalized_message::NormalizedMessage;
use crate::i18n::parsers::message_parser::parse_native_string;
use crate::i18n::parsers::DialectKind;
use crate::xml::{escape_text, parse_fragment, DocumentRef, NodeId, XmlDocument};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

pub const DESCRIPTION_ORIGIN: &str = "description";
pub const MEANING_ORIGIN: &str = "meaning";

/// A free-form annotation of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub from: String,
    pub text: String,
}

impl Note {
    pub fn new(from: impl Into<String>, text: impl Into<String>) -> Self {
        Note {
            from: from.into(),
            text: text.into(),
        }
    }
}

/// Location of the template a unit was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    pub source_file: String,
    pub line_number: usize,
}

impl SourceReference {
    pub fn new(source_file: impl Into<String>, line_number: usize) -> Self {
        SourceReference {
            source_file: source_file.into(),
            line_number,
        }
    }

    /// Reads `file:line`. A line range `file:start,end` reads as its start line.
    pub fn parse(text: &str) -> Option<Self> {
        let (file, lines) = text.trim().rsplit_once(':')?;
        let start = lines.split(',').next()?.trim();
        let line_number = start.parse().ok()?;
        Some(SourceReference::new(file, line_number))
    }
}

impl fmt::Display for SourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_file, self.line_number)
    }
}

/// Content handed to `translate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationInput {
    /// Native markup of the unit's dialect
    Native(String),
    Normalized(NormalizedMessage),
}

impl From<&str> for TranslationInput {
    fn from(native: &str) -> Self {
        TranslationInput::Native(native.to_string())
    }
}

impl From<String> for TranslationInput {
    fn from(native: String) -> Self {
        TranslationInput::Native(native)
    }
}

impl From<NormalizedMessage> for TranslationInput {
    fn from(message: NormalizedMessage) -> Self {
        TranslationInput::Normalized(message)
    }
}

/// What a translation file shares with its units: the document and its configuration.
#[derive(Debug, Clone)]
pub struct FileHandle {
    pub document: DocumentRef,
    pub config: Rc<TranslationConfig>,
}

impl FileHandle {
    pub fn new(document: DocumentRef, config: TranslationConfig) -> Self {
        FileHandle {
            document,
            config: Rc::new(config),
        }
    }
}

#[enum_dispatch]
pub trait TransUnit {
    fn id(&self) -> &str;

    fn dialect(&self) -> DialectKind;

    fn config(&self) -> &TranslationConfig;

    /// Document holding the unit element.
    fn document(&self) -> &DocumentRef;

    /// Root element of the unit.
    fn element(&self) -> NodeId;

    /// Native markup of the source, `None` without a source element.
    fn source_content(&self) -> Option<String>;

    fn set_source_content(&mut self, native: &str) -> Result<()>;

    /// Native markup of the target, `None` without a target element.
    fn target_content(&self) -> Option<String>;

    /// Replaces the target content, creating the target element if needed.
    /// The state is left untouched.
    fn set_target_content(&mut self, native: &str) -> Result<()>;

    fn state(&self) -> TranslationState;

    /// The raw state token as stored in the document.
    fn native_state(&self) -> Option<String>;

    fn set_state(&mut self, state: TranslationState);

    fn description(&self) -> Option<String>;

    /// `None` or an empty string removes the description.
    fn set_description(&mut self, description: Option<&str>);

    fn meaning(&self) -> Option<String>;

    /// `None` or an empty string removes the meaning.
    fn set_meaning(&mut self, meaning: Option<&str>);

    fn supports_set_notes(&self) -> bool;

    /// Free notes, without the reserved description/meaning entries.
    fn notes(&self) -> Vec<Note>;

    /// Replaces all free notes. Fails without writing anything when a note
    /// uses a reserved origin.
    fn set_notes(&mut self, notes: &[Note]) -> Result<()>;

    fn source_references(&self) -> Vec<SourceReference>;

    fn set_source_references(&mut self, references: &[SourceReference]);

    /// Copies the unit into `target_owner` and synthesizes its target from the
    /// source. The receiver is not modified. XLIFF copies come back detached;
    /// the caller inserts them where they belong.
    fn clone_with_source_as_target(
        &self,
        is_default_language: bool,
        copy_content: bool,
        target_owner: &FileHandle,
    ) -> Result<AnyTransUnit>;

    fn source_content_normalized(&self) -> Result<Option<NormalizedMessage>> {
        let Some(native) = self.source_content() else {
            return Ok(None);
        };
        parse_native_string(self.dialect().rules(), &native, None)
            .map(Some)
            .map_err(|err| err.in_unit(self.id()))
    }

    /// Target as a normalized message whose placeholder numbering follows the source.
    fn target_content_normalized(&self) -> Result<Option<NormalizedMessage>> {
        let Some(native) = self.target_content() else {
            return Ok(None);
        };
        let source = self.source_content_normalized()?;
        parse_native_string(self.dialect().rules(), &native, source.as_ref())
            .map(Some)
            .map_err(|err| err.in_unit(self.id()))
    }

    /// Writes the target and marks the unit translated.
    fn translate(&mut self, translation: TranslationInput) -> Result<()> {
        let native = match translation {
            TranslationInput::Native(native) => native,
            TranslationInput::Normalized(message) => message
                .to_native_string(self.dialect())
                .map_err(|err| I18nError::from(err).in_unit(self.id()))?,
        };
        self.set_target_content(&native)?;
        self.set_state(TranslationState::Translated);
        Ok(())
    }

    /// Synthesizes the target from the source.
    ///
    /// ICU sources are copied verbatim. Otherwise the source is copied between
    /// the configured prefix and suffix when `is_default_language` or
    /// `copy_content` is set, and the target is left empty if neither is.
    fn use_source_as_target(&mut self, is_default_language: bool, copy_content: bool) -> Result<()> {
        let source = self.source_content().unwrap_or_default();
        let target = if is_icu_message_start(&source) {
            source
        } else if is_default_language || copy_content {
            let config = self.config();
            format!(
                "{}{}{}",
                escape_text(&config.target_prefix),
                source,
                escape_text(&config.target_suffix)
            )
        } else {
            String::new()
        };
        debug!(
            unit = self.id(),
            is_default_language, copy_content, "using source as target"
        );
        self.set_target_content(&target)?;
        self.set_state(if is_default_language {
            TranslationState::Final
        } else {
            TranslationState::New
        });
        Ok(())
    }
}

#[enum_dispatch(TransUnit)]
#[derive(Debug, Clone)]
pub enum AnyTransUnit {
    Xliff(XliffTransUnit),
    Xliff2(Xliff2TransUnit),
    Xmb(XmbTransUnit),
}

/// Rejects notes whose origin is one of `reserved`.
pub(crate) fn check_note_origins(notes: &[Note], reserved: &[&str]) -> Result<()> {
    match notes.iter().find(|note| reserved.contains(&note.from.as_str())) {
        Some(note) => Err(I18nError::Validation {
            origin: note.from.clone(),
        }),
        None => Ok(()),
    }
}

/// Replaces the children of `element` with parsed native markup.
/// Malformed markup leaves the element untouched.
pub(crate) fn replace_content(doc: &mut XmlDocument, element: NodeId, native: &str) -> Result<()> {
    let nodes = parse_fragment(doc, native)?;
    doc.replace_children(element, nodes);
    Ok(())
}

/// `Some` only for non-empty text.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
