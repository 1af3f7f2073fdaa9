//! XLIFF 2.0 Trans-Unit
//!
//! ```xml
//! <unit id="greeting">
//!   <notes>
//!     <note category="description">Greeting on the start page</note>
//!     <note category="location">src/app/app.component.html:3</note>
//!   </notes>
//!   <segment state="translated">
//!     <source>Hello</source>
//!     <target>Hallo</target>
//!   </segment>
//! </unit>
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

const NOTES_TAG: &str = "notes";
const NOTE_TAG: &str = "note";
const SEGMENT_TAG: &str = "segment";
const SOURCE_TAG: &str = "source";
const TARGET_TAG: &str = "target";
const STATE_ATTR: &str = "state";
const CATEGORY_ATTR: &str = "category";
const LOCATION_CATEGORY: &str = "location";
const RESERVED_CATEGORIES: &[&str] = &[DESCRIPTION_ORIGIN, MEANING_ORIGIN, LOCATION_CATEGORY];

#[derive(Debug, Clone)]
pub struct Xliff2TransUnit {
    document: DocumentRef,
    element: NodeId,
    id: String,
    config: Rc<TranslationConfig>,
}

impl Xliff2TransUnit {
    /// Wraps an existing `<unit>` element of `file`.
    pub fn new(file: &FileHandle, element: NodeId) -> Self {
        let id = file
            .document
            .borrow()
            .attr(element, "id")
            .unwrap_or_default()
            .to_string();
        Xliff2TransUnit {
            document: file.document.clone(),
            element,
            id,
            config: file.config.clone(),
        }
    }

    fn segment(&self, doc: &XmlDocument) -> Option<NodeId> {
        doc.first_child_named(self.element, SEGMENT_TAG)
    }

    fn ensure_segment(&self, doc: &mut XmlDocument) -> NodeId {
        match self.segment(doc) {
            Some(segment) => segment,
            None => doc.append_element(self.element, SEGMENT_TAG),
        }
    }

    fn segment_child(&self, doc: &XmlDocument, name: &str) -> Option<NodeId> {
        self.segment(doc)
            .and_then(|segment| doc.first_child_named(segment, name))
    }

    fn notes_container(&self, doc: &XmlDocument) -> Option<NodeId> {
        doc.first_child_named(self.element, NOTES_TAG)
    }

    /// `<notes>` is the first child of the unit.
    fn ensure_notes_container(&self, doc: &mut XmlDocument) -> NodeId {
        if let Some(notes) = self.notes_container(doc) {
            return notes;
        }
        let notes = doc.create_element(NOTES_TAG);
        doc.insert_child(self.element, 0, notes);
        notes
    }

    fn notes_where<F>(&self, doc: &XmlDocument, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&str) -> bool,
    {
        let Some(container) = self.notes_container(doc) else {
            return Vec::new();
        };
        doc.children_named(container, NOTE_TAG)
            .filter(|note| predicate(doc.attr(*note, CATEGORY_ATTR).unwrap_or_default()))
            .collect()
    }

    fn append_note(&self, doc: &mut XmlDocument, category: &str, text: &str) {
        let container = self.ensure_notes_container(doc);
        let note = doc.append_element(container, NOTE_TAG);
        if !category.is_empty() {
            doc.set_attr(note, CATEGORY_ATTR, category);
        }
        doc.set_text_content(note, text);
    }

    fn drop_notes_container_if_empty(&self, doc: &mut XmlDocument) {
        if let Some(container) = self.notes_container(doc) {
            if doc.child_elements(container).next().is_none() {
                doc.detach(container);
            }
        }
    }

    fn reserved_note(&self, category: &str) -> Option<String> {
        let doc = self.document.borrow();
        self.notes_where(&doc, |c| c == category)
            .first()
            .map(|note| doc.text_content(*note))
    }

    fn set_reserved_note(&mut self, category: &str, text: Option<&str>) {
        let mut doc = self.document.borrow_mut();
        let existing = self.notes_where(&doc, |c| c == category).first().copied();
        match (existing, non_empty(text)) {
            (Some(note), Some(text)) => doc.set_text_content(note, text),
            (Some(note), None) => doc.detach(note),
            (None, Some(text)) => self.append_note(&mut doc, category, text),
            (None, None) => {}
        }
        self.drop_notes_container_if_empty(&mut doc);
    }
}

impl TransUnit for Xliff2TransUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn dialect(&self) -> DialectKind {
        DialectKind::Xliff2
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
        self.segment_child(&doc, SOURCE_TAG)
            .map(|source| inner_xml(&doc, source))
    }

    fn set_source_content(&mut self, native: &str) -> Result<()> {
        let mut doc = self.document.borrow_mut();
        let source = match self.segment_child(&doc, SOURCE_TAG) {
            Some(source) => source,
            None => {
                let segment = self.ensure_segment(&mut doc);
                let source = doc.create_element(SOURCE_TAG);
                doc.insert_child(segment, 0, source);
                source
            }
        };
        replace_content(&mut doc, source, native)
    }

    fn target_content(&self) -> Option<String> {
        let doc = self.document.borrow();
        self.segment_child(&doc, TARGET_TAG)
            .map(|target| inner_xml(&doc, target))
    }

    fn set_target_content(&mut self, native: &str) -> Result<()> {
        let mut doc = self.document.borrow_mut();
        let target = match self.segment_child(&doc, TARGET_TAG) {
            Some(target) => target,
            None => {
                let target = doc.create_element(TARGET_TAG);
                match self.segment_child(&doc, SOURCE_TAG) {
                    Some(source) => doc.insert_after(source, target),
                    None => {
                        let segment = self.ensure_segment(&mut doc);
                        doc.append_child(segment, target);
                    }
                }
                target
            }
        };
        replace_content(&mut doc, target, native)
    }

    fn state(&self) -> TranslationState {
        TranslationState::from_native(self.native_state().as_deref(), DialectKind::Xliff2)
    }

    fn native_state(&self) -> Option<String> {
        let doc = self.document.borrow();
        self.segment(&doc)
            .and_then(|segment| doc.attr(segment, STATE_ATTR))
            .map(str::to_string)
    }

    fn set_state(&mut self, state: TranslationState) {
        let mut doc = self.document.borrow_mut();
        let segment = self.ensure_segment(&mut doc);
        if let Some(token) = state.to_native(DialectKind::Xliff2) {
            doc.set_attr(segment, STATE_ATTR, token);
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
        self.notes_where(&doc, |c| !RESERVED_CATEGORIES.contains(&c))
            .into_iter()
            .map(|note| {
                Note::new(
                    doc.attr(note, CATEGORY_ATTR).unwrap_or_default(),
                    doc.text_content(note),
                )
            })
            .collect()
    }

    fn set_notes(&mut self, notes: &[Note]) -> Result<()> {
        check_note_origins(notes, RESERVED_CATEGORIES)?;

        let mut doc = self.document.borrow_mut();
        for note in self.notes_where(&doc, |c| !RESERVED_CATEGORIES.contains(&c)) {
            doc.detach(note);
        }
        for note in notes {
            self.append_note(&mut doc, &note.from, &note.text);
        }
        self.drop_notes_container_if_empty(&mut doc);
        Ok(())
    }

    fn source_references(&self) -> Vec<SourceReference> {
        let doc = self.document.borrow();
        self.notes_where(&doc, |c| c == LOCATION_CATEGORY)
            .into_iter()
            .filter_map(|note| SourceReference::parse(&doc.text_content(note)))
            .collect()
    }

    fn set_source_references(&mut self, references: &[SourceReference]) {
        let mut doc = self.document.borrow_mut();
        for note in self.notes_where(&doc, |c| c == LOCATION_CATEGORY) {
            doc.detach(note);
        }
        for reference in references {
            self.append_note(&mut doc, LOCATION_CATEGORY, &reference.to_string());
        }
        self.drop_notes_container_if_empty(&mut doc);
    }

    fn clone_with_source_as_target(
        &self,
        is_default_language: bool,
        copy_content: bool,
        target_owner: &FileHandle,
    ) -> Result<AnyTransUnit> {
        let copy = self.document.borrow().to_owned_node(self.element);
        let element = target_owner.document.borrow_mut().build(&copy);
        debug!(unit = %self.id, "cloned xliff 2.0 unit");

        let mut unit = Xliff2TransUnit {
            document: target_owner.document.clone(),
            element,
            id: self.id.clone(),
            config: target_owner.config.clone(),
        };
        unit.use_source_as_target(is_default_language, copy_content)?;
        Ok(unit.into())
    }
}
