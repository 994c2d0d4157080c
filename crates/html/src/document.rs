use crate::serialize;
use crate::tokenizer::tokenize;
use crate::types::{NodeId, Token};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    UnknownNode(NodeId),
    InvalidParent(NodeId),
    CycleDetected { parent: NodeId, child: NodeId },
}

impl std::fmt::Display for DomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomError::UnknownNode(id) => write!(f, "unknown node: {id:?}"),
            DomError::InvalidParent(id) => write!(f, "node cannot have children: {id:?}"),
            DomError::CycleDetected { parent, child } => {
                write!(f, "appending {child:?} to {parent:?} would create a cycle")
            }
        }
    }
}

impl std::error::Error for DomError {}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Document,
    Element {
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    // Form-control value once it diverges from the markup default.
    dirty_value: Option<String>,
}

impl NodeRecord {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            dirty_value: None,
        }
    }

    fn allows_children(&self) -> bool {
        matches!(self.kind, NodeKind::Document | NodeKind::Element { .. })
    }
}

/// Mutable in-memory DOM.
///
/// Nodes live in an arena addressed by [`NodeId`]. Detached nodes stay in the
/// arena, so ids held by callers never alias a different node.
#[derive(Debug)]
pub struct Document {
    id: u64,
    nodes: Vec<NodeRecord>,
    focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            id: NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed),
            nodes: vec![NodeRecord::new(NodeKind::Document)],
            focused: None,
        }
    }

    /// Parse `markup` into a fresh `<div>` attached to a new document.
    ///
    /// Mirrors the browser idiom of creating a detached wrapper element and
    /// assigning its `innerHTML`.
    pub fn parse_fragment(markup: &str) -> (Self, NodeId) {
        let mut doc = Self::new();
        let root = doc.create_element("div");
        doc.attach(NodeId::DOCUMENT, root);
        doc.append_markup(root, markup);
        (doc, root)
    }

    /// Process-unique identity of this document. [`NodeId`]s only mean
    /// something together with it.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn document(&self) -> NodeId {
        NodeId::DOCUMENT
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeKind::Element {
            name: Arc::from(name.to_ascii_lowercase()),
            attributes: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text {
            text: text.to_string(),
        })
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Comment {
            text: text.to_string(),
        })
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeRecord::new(kind));
        id
    }

    fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(id.index())
    }

    fn record_mut(&mut self, id: NodeId) -> Option<&mut NodeRecord> {
        self.nodes.get_mut(id.index())
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.record(id).map(|r| &r.kind)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Element { .. }))
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.record(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.record(id) {
            Some(record) => &record.children,
            None => &[],
        }
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .collect()
    }

    /// Element descendants of `root` in document order, `root` excluded.
    pub fn descendant_elements(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.is_element(current) {
                out.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_record = self.record(parent).ok_or(DomError::UnknownNode(parent))?;
        if !parent_record.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        if !self.contains(child) {
            return Err(DomError::UnknownNode(child));
        }
        if child == NodeId::DOCUMENT || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        self.detach(child);
        self.attach(parent, child);
        Ok(())
    }

    // Callers guarantee both ids are valid and `child` is detached.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
    }

    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.record_mut(id).and_then(|r| r.parent.take()) else {
            return;
        };
        if let Some(parent_record) = self.record_mut(parent) {
            parent_record.children.retain(|c| *c != id);
        }
        if self.focused.is_some_and(|f| f == id || self.is_inclusive_ancestor(id, f)) {
            self.focused = None;
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn remove_children(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        for child in children {
            self.detach(child);
        }
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn attributes(&self, id: NodeId) -> &[(Arc<str>, Option<String>)] {
        match self.kind(id) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    /// Attribute value; valueless attributes read as `""`.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    fn attributes_mut(&mut self, id: NodeId) -> Option<&mut Vec<(Arc<str>, Option<String>)>> {
        match &mut self.record_mut(id)?.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Returns `false` when `id` is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(attributes) = self.attributes_mut(id) else {
            return false;
        };
        match attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = Some(value.to_string()),
            None => attributes.push((Arc::from(name.to_ascii_lowercase()), Some(value.to_string()))),
        }
        true
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(attributes) = self.attributes_mut(id) {
            attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub fn class_list(&self, id: NodeId) -> Vec<&str> {
        self.attribute(id, "class")
            .map(|c| c.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).contains(&class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if class.is_empty() || !self.is_element(id) || self.has_class(id, class) {
            return;
        }
        let mut classes: Vec<String> = self.class_list(id).into_iter().map(str::to_string).collect();
        classes.push(class.to_string());
        self.set_attribute(id, "class", &classes.join(" "));
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let classes: Vec<&str> = self
            .class_list(id)
            .into_iter()
            .filter(|c| *c != class)
            .collect();
        let joined = classes.join(" ");
        self.set_attribute(id, "class", &joined);
    }

    // =========================================================================
    // Content
    // =========================================================================

    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            Some(NodeKind::Text { text }) => out.push_str(text),
            Some(NodeKind::Element { .. }) | Some(NodeKind::Document) => {
                for child in self.children(id) {
                    self.collect_text(*child, out);
                }
            }
            _ => {}
        }
    }

    /// Replace all children with a single text node (none for an empty string).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if let Some(NodeKind::Text { text: existing } | NodeKind::Comment { text: existing }) =
            self.record_mut(id).map(|r| &mut r.kind)
        {
            existing.clear();
            existing.push_str(text);
            return;
        }
        self.remove_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.attach(id, node);
        }
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            serialize::write_node(self, *child, &mut out);
        }
        out
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        serialize::write_node(self, id, &mut out);
        out
    }

    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) {
        if !self.record(id).is_some_and(NodeRecord::allows_children) {
            return;
        }
        self.remove_children(id);
        self.append_markup(id, markup);
    }

    /// Parse `markup` and append the resulting nodes to `parent`.
    pub fn append_markup(&mut self, parent: NodeId, markup: &str) {
        let mut open_elements: Vec<NodeId> = Vec::new();
        for token in tokenize(markup) {
            let current = open_elements.last().copied().unwrap_or(parent);
            match token {
                // Doctypes are meaningless inside a fragment.
                Token::Doctype(_) => {}
                Token::Comment(text) => {
                    let node = self.create_comment(&text);
                    self.attach(current, node);
                }
                Token::Text(text) => {
                    let node = self.create_text(&text);
                    self.attach(current, node);
                }
                Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                } => {
                    let node = self.push(NodeKind::Element {
                        name: Arc::from(name),
                        attributes: attributes
                            .into_iter()
                            .map(|(k, v)| (Arc::from(k), v))
                            .collect(),
                    });
                    self.attach(current, node);
                    if !self_closing {
                        open_elements.push(node);
                    }
                }
                Token::EndTag(name) => {
                    if let Some(pos) = open_elements
                        .iter()
                        .rposition(|open| self.tag_name(*open) == Some(name.as_str()))
                    {
                        open_elements.truncate(pos);
                    } else {
                        log::trace!(target: "html.fragment", "ignoring unmatched </{name}>");
                    }
                }
            }
        }
    }

    // =========================================================================
    // Form controls
    // =========================================================================

    /// Current value of a form control.
    ///
    /// `input` falls back to its `value` attribute, `textarea` to its text
    /// content and `select` to its selected (or first) option.
    pub fn value(&self, id: NodeId) -> String {
        if let Some(value) = self.record(id).and_then(|r| r.dirty_value.as_ref()) {
            return value.clone();
        }
        match self.tag_name(id) {
            Some("textarea") => self.text_content(id),
            Some("select") => {
                let options = self.options(id);
                options
                    .iter()
                    .find(|o| self.has_attribute(**o, "selected"))
                    .or(options.first())
                    .map(|o| self.option_value(*o))
                    .unwrap_or_default()
            }
            _ => self.attribute(id, "value").unwrap_or("").to_string(),
        }
    }

    /// Set a form control's value. A `select` only takes values one of its
    /// options carries; anything else clears the selection.
    pub fn set_value(&mut self, id: NodeId, value: &str) {
        let resolved = if self.tag_name(id) == Some("select") {
            let known = self
                .options(id)
                .iter()
                .any(|o| self.option_value(*o) == value);
            if known { value } else { "" }
        } else {
            value
        };
        let resolved = resolved.to_string();
        if let Some(record) = self.record_mut(id) {
            record.dirty_value = Some(resolved);
        }
    }

    fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.descendant_elements(select)
            .into_iter()
            .filter(|e| self.tag_name(*e) == Some("option"))
            .collect()
    }

    fn option_value(&self, option: NodeId) -> String {
        match self.attribute(option, "value") {
            Some(v) => v.to_string(),
            None => self.text_content(option).trim().to_string(),
        }
    }

    pub fn focus(&mut self, id: NodeId) {
        if self.is_element(id) {
            self.focused = Some(id);
        }
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn is_focused(&self, id: NodeId) -> bool {
        self.focused == Some(id)
    }
}
