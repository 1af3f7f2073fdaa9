//! XLIFF 1.2 Trans-Unit
//!
//! ```xml
//! <trans-unit id="greeting" datatype="html">
//!   <source>Hello</source>
//!   <target state="new">Hallo</target>
//!   <context-group purpose="location">
//!     <context context-type="sourcefile">src/app/app.component.html</context>
//!     <context context-type="linenumber">3</context>
//!   </context-group>
//!   <note priority="1" from="description">Greeting on the start page</note>
//! </trans-unit>
//! ```

use super::{
    check_note_origins, non_empty, replace_content, AnyTransUnit, FileHandle, Note,
    SourceReference, TransUnit, TranslationState, DESCRIPTION_ORIGIN, MEANING_ORIGIN,
};
use crate::config::TranslationConfig;
use crate::error::Result;
use crate::i18n::parsers::DialectKind;
use crate::xml::{inner_xml, DocumentRef, NodeId, XmlDocument};
use std::rc::Rc;
use tracing::debug;

const SOURCE_TAG: &str = "source";
const TARGET_TAG: &str = "target";
const NOTE_TAG: &str = "note";
const CONTEXT_GROUP_TAG: &str = "context-group";
const CONTEXT_TAG: &str = "context";
const STATE_ATTR: &str = "state";
const FROM_ATTR: &str = "from";
const PRIORITY_ATTR: &str = "priority";
const PURPOSE_ATTR: &str = "purpose";
const CONTEXT_TYPE_ATTR: &str = "context-type";
const LOCATION_PURPOSE: &str = "location";
const SOURCE_FILE_TYPE: &str = "sourcefile";
const LINE_NUMBER_TYPE: &str = "linenumber";
const RESERVED_ORIGINS: &[&str] = &[DESCRIPTION_ORIGIN, MEANING_ORIGIN];

#[derive(Debug, Clone)]
pub struct XliffTransUnit {
    document: DocumentRef,
    element: NodeId,
    id: String,
    config: Rc<TranslationConfig>,
}

impl XliffTransUnit {
    /// Wraps an existing `<trans-unit>` element of `file`.
    pub fn new(file: &FileHandle, element: NodeId) -> Self {
        let id = file
            .document
            .borrow()
            .attr(element, "id")
            .unwrap_or_default()
            .to_string();
        XliffTransUnit {
            document: file.document.clone(),
            element,
            id,
            config: file.config.clone(),
        }
    }

    fn source(&self, doc: &XmlDocument) -> Option<NodeId> {
        doc.first_child_named(self.element, SOURCE_TAG)
    }

    fn target(&self, doc: &XmlDocument) -> Option<NodeId> {
        doc.first_child_named(self.element, TARGET_TAG)
    }

    /// Existing `<target>`, or a new one placed right after `<source>`.
    fn ensure_target(&self, doc: &mut XmlDocument) -> NodeId {
        if let Some(target) = self.target(doc) {
            return target;
        }
        let target = doc.create_element(TARGET_TAG);
        match self.source(doc) {
            Some(source) => doc.insert_after(source, target),
            None => doc.append_child(self.element, target),
        }
        target
    }

    fn notes_from<'a>(&self, doc: &'a XmlDocument, from: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        let element = self.element;
        doc.children_named(element, NOTE_TAG)
            .filter(move |note| doc.attr(*note, FROM_ATTR) == Some(from))
    }

    fn reserved_note(&self, from: &str) -> Option<String> {
        let doc = self.document.borrow();
        let note = self.notes_from(&doc, from).next();
        note.map(|note| doc.text_content(note))
    }

    fn set_reserved_note(&mut self, from: &str, text: Option<&str>) {
        let mut doc = self.document.borrow_mut();
        let existing = self.notes_from(&doc, from).next();
        match (existing, non_empty(text)) {
            (Some(note), Some(text)) => doc.set_text_content(note, text),
            (Some(note), None) => doc.detach(note),
            (None, Some(text)) => {
                let note = doc.append_element(self.element, NOTE_TAG);
                doc.set_attr(note, PRIORITY_ATTR, "1");
                doc.set_attr(note, FROM_ATTR, from);
                doc.set_text_content(note, text);
            }
            (None, None) => {}
        }
    }

    fn location_groups(&self, doc: &XmlDocument) -> Vec<NodeId> {
        doc.children_named(self.element, CONTEXT_GROUP_TAG)
            .filter(|group| doc.attr(*group, PURPOSE_ATTR) == Some(LOCATION_PURPOSE))
            .collect()
    }

    fn context_value(doc: &XmlDocument, group: NodeId, context_type: &str) -> Option<String> {
        doc.children_named(group, CONTEXT_TAG)
            .find(|context| doc.attr(*context, CONTEXT_TYPE_ATTR) == Some(context_type))
            .map(|context| doc.text_content(context))
    }
}

impl TransUnit for XliffTransUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn dialect(&self) -> DialectKind {
        DialectKind::Xliff
    }

    fn config(&self) -> &TranslationConfig {
        &self.config
    }

    fn document(&self) -> &DocumentRef {
        &self.document
    }

    fn element(&self) -> NodeId {
        self.element
    }

    fn source_content(&self) -> Option<String> {
        let doc = self.document.borrow();
        self.source(&doc).map(|source| inner_xml(&doc, source))
    }

    fn set_source_content(&mut self, native: &str) -> Result<()> {
        let mut doc = self.document.borrow_mut();
        let source = match self.source(&doc) {
            Some(source) => source,
            None => {
                let source = doc.create_element(SOURCE_TAG);
                doc.insert_child(self.element, 0, source);
                source
            }
        };
        replace_content(&mut doc, source, native)
    }

    fn target_content(&self) -> Option<String> {
        let doc = self.document.borrow();
        self.target(&doc).map(|target| inner_xml(&doc, target))
    }

    fn set_target_content(&mut self, native: &str) -> Result<()> {
        let mut doc = self.document.borrow_mut();
        let target = self.ensure_target(&mut doc);
        replace_content(&mut doc, target, native)
    }

    fn state(&self) -> TranslationState {
        TranslationState::from_native(self.native_state().as_deref(), DialectKind::Xliff)
    }

    fn native_state(&self) -> Option<String> {
        let doc = self.document.borrow();
        self.target(&doc)
            .and_then(|target| doc.attr(target, STATE_ATTR))
            .map(str::to_string)
    }

    fn set_state(&mut self, state: TranslationState) {
        let mut doc = self.document.borrow_mut();
        let target = self.ensure_target(&mut doc);
        if let Some(token) = state.to_native(DialectKind::Xliff) {
            doc.set_attr(target, STATE_ATTR, token);
        }
    }

    fn description(&self) -> Option<String> {
        self.reserved_note(DESCRIPTION_ORIGIN)
    }

    fn set_description(&mut self, description: Option<&str>) {
        self.set_reserved_note(DESCRIPTION_ORIGIN, description);
    }

    fn meaning(&self) -> Option<String> {
        self.reserved_note(MEANING_ORIGIN)
    }

    fn set_meaning(&mut self, meaning: Option<&str>) {
        self.set_reserved_note(MEANING_ORIGIN, meaning);
    }

    fn supports_set_notes(&self) -> bool {
        true
    }

    fn notes(&self) -> Vec<Note> {
        let doc = self.document.borrow();
        doc.children_named(self.element, NOTE_TAG)
            .filter_map(|note| {
                let from = doc.attr(note, FROM_ATTR).unwrap_or_default();
                if RESERVED_ORIGINS.contains(&from) {
                    return None;
                }
                Some(Note::new(from, doc.text_content(note)))
            })
            .collect()
    }

    fn set_notes(&mut self, notes: &[Note]) -> Result<()> {
        check_note_origins(notes, RESERVED_ORIGINS)?;

        let mut doc = self.document.borrow_mut();
        let free: Vec<NodeId> = doc
            .children_named(self.element, NOTE_TAG)
            .filter(|note| !RESERVED_ORIGINS.contains(&doc.attr(*note, FROM_ATTR).unwrap_or_default()))
            .collect();
        for note in free {
            doc.detach(note);
        }
        for note in notes {
            let element = doc.append_element(self.element, NOTE_TAG);
            if !note.from.is_empty() {
                doc.set_attr(element, FROM_ATTR, &note.from);
            }
            doc.set_text_content(element, &note.text);
        }
        Ok(())
    }

    fn source_references(&self) -> Vec<SourceReference> {
        let doc = self.document.borrow();
        self.location_groups(&doc)
            .into_iter()
            .filter_map(|group| {
                let file = Self::context_value(&doc, group, SOURCE_FILE_TYPE)?;
                let line = Self::context_value(&doc, group, LINE_NUMBER_TYPE)
                    .and_then(|line| line.trim().parse().ok())
                    .unwrap_or(0);
                Some(SourceReference::new(file, line))
            })
            .collect()
    }

    fn set_source_references(&mut self, references: &[SourceReference]) {
        let mut doc = self.document.borrow_mut();
        for group in self.location_groups(&doc) {
            doc.detach(group);
        }
        // Location groups go before the notes, after source and target
        let anchor = doc.first_child_named(self.element, NOTE_TAG);
        for reference in references {
            let group = doc.create_element(CONTEXT_GROUP_TAG);
            doc.set_attr(group, PURPOSE_ATTR, LOCATION_PURPOSE);
            let file = doc.append_element(group, CONTEXT_TAG);
            doc.set_attr(file, CONTEXT_TYPE_ATTR, SOURCE_FILE_TYPE);
            doc.set_text_content(file, &reference.source_file);
            let line = doc.append_element(group, CONTEXT_TAG);
            doc.set_attr(line, CONTEXT_TYPE_ATTR, LINE_NUMBER_TYPE);
            doc.set_text_content(line, &reference.line_number.to_string());
            match anchor {
                Some(note) => doc.insert_before(note, group),
                None => doc.append_child(self.element, group),
            }
        }
    }

    fn clone_with_source_as_target(
        &self,
        is_default_language: bool,
        copy_content: bool,
        target_owner: &FileHandle,
    ) -> Result<AnyTransUnit> {
        let copy = self.document.borrow().to_owned_node(self.element);
        let element = target_owner.document.borrow_mut().build(&copy);
        debug!(unit = %self.id, "cloned xliff trans-unit");

        let mut unit = XliffTransUnit {
            document: target_owner.document.clone(),
            element,
            id: self.id.clone(),
            config: target_owner.config.clone(),
        };
        unit.use_source_as_target(is_default_language, copy_content)?;
        Ok(unit.into())
    }
}
