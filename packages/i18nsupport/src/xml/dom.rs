//! XML Document Arena
//!
//! Nodes live in a flat arena and are addressed by `NodeId`. Detached nodes keep
//! their slot, so ids stay valid for the lifetime of the document.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle onto a document. Trans-units borrow it mutably for the
/// duration of a single call.
pub type DocumentRef = Rc<RefCell<XmlDocument>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: IndexMap<String, String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attrs: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    /// Unescaped character data
    Text(String),
    Comment(String),
    /// Raw content of `<?xml ...?>`
    Declaration(String),
    /// Raw content of `<!DOCTYPE ...>`
    Doctype(String),
    ProcessingInstruction(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A detached, owned copy of a subtree. Used to move content between documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedNode {
    pub kind: NodeKind,
    pub children: Vec<OwnedNode>,
}

/// Arena-backed XML document.
///
/// Nodes are never freed: replacing content detaches the old nodes but keeps
/// their slots, because trans-units and detached clones hold plain `NodeId`s
/// into the arena. Memory therefore grows with every edit until the document
/// is dropped. Re-parse a serialized document to start from a compact arena.
#[derive(Debug, Clone, Default)]
pub struct XmlDocument {
    nodes: Vec<NodeData>,
    /// Top-level nodes: prolog, root element, trailing comments.
    top_level: Vec<NodeId>,
}

impl XmlDocument {
    pub fn new() -> Self {
        XmlDocument::default()
    }

    /// Creates a document containing a single empty root element.
    pub fn with_root(name: &str) -> Self {
        let mut doc = XmlDocument::new();
        let root = doc.create_element(name);
        doc.top_level.push(root);
        doc
    }

    pub fn into_shared(self) -> DocumentRef {
        Rc::new(RefCell::new(self))
    }

    pub fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    pub(crate) fn push_top_level(&mut self, id: NodeId) {
        self.detach(id);
        self.top_level.push(id);
    }

    pub fn root_element(&self) -> Option<NodeId> {
        self.top_level.iter().copied().find(|id| self.is_element(*id))
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.alloc(NodeKind::Element(Element::new(name)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        self.alloc(kind)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    pub fn is_named(&self, id: NodeId, name: &str) -> bool {
        self.name(id) == Some(name)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Replaces the character data of a text node. No-op for other kinds.
    pub fn set_text(&mut self, id: NodeId, value: &str) {
        if let NodeKind::Text(text) = &mut self.nodes[id.0].kind {
            *text = value.to_string();
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.is_element(*child))
    }

    pub fn children_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.is_named(*child, name))
    }

    pub fn first_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children_named(id, name).next()
    }

    /// All descendant elements with the given name, in document order.
    pub fn descendants_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = pending.pop() {
            if self.is_named(current, name) {
                found.push(current);
            }
            pending.extend(self.children(current).iter().rev().copied());
        }
        found
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id)
            .and_then(|e| e.attrs.shift_remove(name))
    }

    /// Concatenated character data of the node and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) => {
                for child in self.children(id) {
                    self.collect_text(*child, out);
                }
            }
            _ => {}
        }
    }

    /// Removes the node from its parent (or the top level). The subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        match self.nodes[id.0].parent.take() {
            Some(parent) => self.nodes[parent.0].children.retain(|c| *c != id),
            None => self.top_level.retain(|c| *c != id),
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
    }

    /// Inserts `child` right after `reference`, which must have a parent.
    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) {
        if let Some(parent) = self.parent(reference) {
            let position = self.position_in_parent(reference).unwrap_or(0);
            self.insert_child(parent, position + 1, child);
        }
    }

    /// Inserts `child` right before `reference`, which must have a parent.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) {
        if let Some(parent) = self.parent(reference) {
            let position = self.position_in_parent(reference).unwrap_or(0);
            self.insert_child(parent, position, child);
        }
    }

    fn position_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    pub fn append_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        let element = self.create_element(name);
        self.append_child(parent, element);
        element
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    /// Detaches every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    pub fn replace_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        self.clear_children(id);
        for child in children {
            self.append_child(id, child);
        }
    }

    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if !text.is_empty() {
            self.append_text(id, text);
        }
    }

    pub fn to_owned_node(&self, id: NodeId) -> OwnedNode {
        OwnedNode {
            kind: self.kind(id).clone(),
            children: self
                .children(id)
                .iter()
                .map(|child| self.to_owned_node(*child))
                .collect(),
        }
    }

    /// Materializes a detached copy of `node` inside this document.
    pub fn build(&mut self, node: &OwnedNode) -> NodeId {
        let id = self.alloc(node.kind.clone());
        for child in &node.children {
            let child_id = self.build(child);
            self.append_child(id, child_id);
        }
        id
    }

    /// Deep-copies a subtree of `source` into this document. The copy is detached.
    pub fn import_node(&mut self, source: &XmlDocument, id: NodeId) -> NodeId {
        let owned = source.to_owned_node(id);
        self.build(&owned)
    }
}
