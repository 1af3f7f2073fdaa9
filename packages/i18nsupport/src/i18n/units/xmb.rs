//! XMB Trans-Unit
//!
//! The source lives in the XMB master, the target in a companion XTB bundle:
//!
//! ```xml
//! <msg id="greeting" desc="Greeting on the start page"><source>app.html:3</source>Hello</msg>
//!
//! <translationbundle>
//!   <translation id="greeting">Hallo</translation>
//! </translationbundle>
//! ```
//!
//! XMB has no state token and no free notes.

use super::{
    non_empty, replace_content, AnyTransUnit, FileHandle, Note, SourceReference, TransUnit,
    TranslationState,
};
use crate::config::TranslationConfig;
use crate::error::{I18nError, Result};
use crate::i18n::parsers::DialectKind;
use crate::xml::{inner_xml, outer_xml, parse_fragment, DocumentRef, NodeId, NodeKind, XmlDocument};
use std::rc::Rc;
use tracing::debug;

const SOURCE_TAG: &str = "source";
const TRANSLATIONS_TAG: &str = "translationbundle";
const TRANSLATION_TAG: &str = "translation";
const ID_ATTR: &str = "id";
const DESC_ATTR: &str = "desc";
const MEANING_ATTR: &str = "meaning";

#[derive(Debug, Clone)]
pub struct XmbTransUnit {
    master: DocumentRef,
    element: NodeId,
    id: String,
    bundle: Option<DocumentRef>,
    config: Rc<TranslationConfig>,
}

impl XmbTransUnit {
    /// Wraps an existing `<msg>` element of `master`. Without a `bundle` the
    /// unit has no target.
    pub fn new(master: &FileHandle, element: NodeId, bundle: Option<DocumentRef>) -> Self {
        let id = master
            .document
            .borrow()
            .attr(element, ID_ATTR)
            .unwrap_or_default()
            .to_string();
        XmbTransUnit {
            master: master.document.clone(),
            element,
            id,
            bundle,
            config: master.config.clone(),
        }
    }

    pub fn bundle(&self) -> Option<&DocumentRef> {
        self.bundle.as_ref()
    }

    /// Children of `<msg>` that make up the message, without source references
    /// and the whitespace before the first content node.
    fn content_nodes(&self, doc: &XmlDocument) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        for &child in doc.children(self.element) {
            if doc.is_named(child, SOURCE_TAG) {
                continue;
            }
            let leading_whitespace = nodes.is_empty()
                && matches!(doc.kind(child), NodeKind::Text(text) if text.trim().is_empty());
            if !leading_whitespace {
                nodes.push(child);
            }
        }
        nodes
    }

    fn translation(&self, bundle: &XmlDocument) -> Option<NodeId> {
        let root = bundle.root_element()?;
        bundle
            .children_named(root, TRANSLATION_TAG)
            .find(|translation| bundle.attr(*translation, ID_ATTR) == Some(self.id.as_str()))
    }

    fn ensure_translation(&self, bundle: &mut XmlDocument) -> NodeId {
        if let Some(translation) = self.translation(bundle) {
            return translation;
        }
        let root = match bundle.root_element() {
            Some(root) => root,
            None => {
                let root = bundle.create_element(TRANSLATIONS_TAG);
                bundle.push_top_level(root);
                root
            }
        };
        let translation = bundle.append_element(root, TRANSLATION_TAG);
        bundle.set_attr(translation, ID_ATTR, &self.id);
        translation
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.master
            .borrow()
            .attr(self.element, name)
            .map(str::to_string)
    }

    fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        let mut doc = self.master.borrow_mut();
        match non_empty(value) {
            Some(value) => doc.set_attr(self.element, name, value),
            None => {
                doc.remove_attr(self.element, name);
            }
        }
    }
}

impl TransUnit for XmbTransUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn dialect(&self) -> DialectKind {
        DialectKind::Xmb
    }

    fn config(&self) -> &TranslationConfig {
        &self.config
    }

    fn document(&self) -> &DocumentRef {
        &self.master
    }

    fn element(&self) -> NodeId {
        self.element
    }

    fn source_content(&self) -> Option<String> {
        let doc = self.master.borrow();
        Some(
            self.content_nodes(&doc)
                .into_iter()
                .map(|node| outer_xml(&doc, node))
                .collect(),
        )
    }

    fn set_source_content(&mut self, native: &str) -> Result<()> {
        let mut doc = self.master.borrow_mut();
        let nodes = parse_fragment(&mut doc, native)?;
        for node in self.content_nodes(&doc) {
            doc.detach(node);
        }
        for node in nodes {
            doc.append_child(self.element, node);
        }
        Ok(())
    }

    fn target_content(&self) -> Option<String> {
        let bundle = self.bundle.as_ref()?.borrow();
        self.translation(&bundle)
            .map(|translation| inner_xml(&bundle, translation))
    }

    fn set_target_content(&mut self, native: &str) -> Result<()> {
        let Some(bundle) = &self.bundle else {
            return Err(I18nError::Unsupported(format!(
                "trans-unit \"{}\" has no translation bundle to write a target to",
                self.id
            )));
        };
        let mut bundle = bundle.borrow_mut();
        let translation = self.ensure_translation(&mut bundle);
        replace_content(&mut bundle, translation, native)
    }

    fn state(&self) -> TranslationState {
        TranslationState::New
    }

    fn native_state(&self) -> Option<String> {
        None
    }

    fn set_state(&mut self, state: TranslationState) {
        debug!(unit = %self.id, %state, "xmb has no translation state, ignoring");
    }

    fn description(&self) -> Option<String> {
        self.attribute(DESC_ATTR)
    }

    fn set_description(&mut self, description: Option<&str>) {
        self.set_attribute(DESC_ATTR, description);
    }

    fn meaning(&self) -> Option<String> {
        self.attribute(MEANING_ATTR)
    }

    fn set_meaning(&mut self, meaning: Option<&str>) {
        self.set_attribute(MEANING_ATTR, meaning);
    }

    fn supports_set_notes(&self) -> bool {
        false
    }

    fn notes(&self) -> Vec<Note> {
        Vec::new()
    }

    fn set_notes(&mut self, _notes: &[Note]) -> Result<()> {
        Err(I18nError::Unsupported("xmb does not support notes".to_string()))
    }

    fn source_references(&self) -> Vec<SourceReference> {
        let doc = self.master.borrow();
        doc.children_named(self.element, SOURCE_TAG)
            .filter_map(|source| SourceReference::parse(&doc.text_content(source)))
            .collect()
    }

    fn set_source_references(&mut self, references: &[SourceReference]) {
        let mut doc = self.master.borrow_mut();
        let existing: Vec<NodeId> = doc.children_named(self.element, SOURCE_TAG).collect();
        for source in existing {
            doc.detach(source);
        }
        for (index, reference) in references.iter().enumerate() {
            let source = doc.create_element(SOURCE_TAG);
            doc.set_text_content(source, &reference.to_string());
            doc.insert_child(self.element, index, source);
        }
    }

    /// The new unit shares the master record and writes its target into the
    /// bundle of `target_owner`.
    fn clone_with_source_as_target(
        &self,
        is_default_language: bool,
        copy_content: bool,
        target_owner: &FileHandle,
    ) -> Result<AnyTransUnit> {
        debug!(unit = %self.id, "creating xtb translation from xmb message");
        let mut unit = XmbTransUnit {
            master: self.master.clone(),
            element: self.element,
            id: self.id.clone(),
            bundle: Some(target_owner.document.clone()),
            config: target_owner.config.clone(),
        };
        unit.use_source_as_target(is_default_language, copy_content)?;
        Ok(unit.into())
    }
}
