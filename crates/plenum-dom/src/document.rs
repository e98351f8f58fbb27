//! Arena-backed document with id lookup and measurement bookkeeping.

use std::collections::HashMap;

use thiserror::Error;

use crate::node::{Element, Metrics, NodeId, NodeKind};
use crate::style::{Length, Overflow};

/// Errors raised by document mutation.
#[derive(Debug, Error)]
pub enum DomError {
    /// An element with this id already exists in the document.
    #[error("duplicate element id: {0}")]
    DuplicateId(String),
    /// The referenced node cannot contain children.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// A retained document: node arena plus an element-id index.
///
/// Style mutators reflow before returning, so metric reads always observe
/// settled values.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    by_id: HashMap<String, NodeId>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only the root element.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(Element::new("html")),
        };
        Self {
            nodes: vec![root],
            by_id: HashMap::new(),
            root: NodeId(0),
        }
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, DomError> {
        if self.element(parent).is_none() {
            return Err(DomError::NotAnElement(parent));
        }
        let node = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.0].children.push(node);
        Ok(node)
    }

    /// Append an element under `parent` and re-measure.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> Result<NodeId, DomError> {
        if let Some(id) = element.id() {
            if self.by_id.contains_key(id) {
                return Err(DomError::DuplicateId(id.to_string()));
            }
        }
        let element_id = element.id().map(str::to_string);
        let node = self.push_node(parent, NodeKind::Element(element))?;
        if let Some(id) = element_id {
            self.by_id.insert(id, node);
        }
        self.reflow();
        Ok(node)
    }

    /// Append a text run under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        self.push_node(parent, NodeKind::Text(text.to_string()))
    }

    /// Append a comment under `parent`.
    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        self.push_node(parent, NodeKind::Comment(text.to_string()))
    }

    /// Detach `node` and its subtree. Id lookups for detached elements stop
    /// resolving; detaching the root or an already detached node is a no-op.
    pub fn detach(&mut self, node: NodeId) {
        if node == self.root || node.0 >= self.nodes.len() {
            return;
        }
        let Some(parent) = self.nodes[node.0].parent.take() else {
            return;
        };
        self.nodes[parent.0].children.retain(|&child| child != node);

        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let NodeKind::Element(element) = &self.nodes[current.0].kind {
                if let Some(id) = element.id() {
                    self.by_id.remove(id);
                }
            }
            stack.extend(self.nodes[current.0].children.iter().copied());
        }
        self.reflow();
    }

    /// Parent node, if attached.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Child nodes in document order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node.0).map_or(&[], |n| n.children.as_slice())
    }

    /// Whether `node` is an element (as opposed to text or comment).
    #[must_use]
    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    /// Element data for `node`, if it is an element.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(node.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Look up an attached element by id.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Content-box height of `node`; zero for non-elements.
    #[must_use]
    pub fn client_height(&self, node: NodeId) -> i32 {
        self.element(node).map_or(0, |e| e.metrics.client_height)
    }

    /// Border-box height of `node`; zero for non-elements.
    #[must_use]
    pub fn offset_height(&self, node: NodeId) -> i32 {
        self.element(node).map_or(0, |e| e.metrics.offset_height)
    }

    /// Laid-out content height of `node`, including overflow.
    #[must_use]
    pub fn scroll_height(&self, node: NodeId) -> i32 {
        self.element(node).map_or(0, |e| e.metrics.scroll_height)
    }

    /// Style of `node`, if it is an element.
    #[must_use]
    pub fn style(&self, node: NodeId) -> Option<&crate::style::Style> {
        self.element(node).map(Element::style)
    }

    /// Set an explicit height on `node` and re-measure.
    pub fn set_style_height(&mut self, node: NodeId, height: Length) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        element.style_mut().height = Some(height);
        self.reflow();
    }

    /// Set the overflow behavior on `node`. Overflow does not affect
    /// metrics, so no re-measure happens.
    pub fn set_overflow(&mut self, node: NodeId, overflow: Overflow) {
        if let Some(element) = self.element_mut(node) {
            element.style_mut().overflow = overflow;
        }
    }

    /// Recompute metrics for the whole tree, bottom-up.
    ///
    /// Rendered height is the explicit pixel height when present, else the
    /// seeded intrinsic height (percentages are not resolved here). Scroll
    /// height counts in-flow children's margins even though their offset
    /// heights do not, reproducing the engine behavior that forces layout
    /// code to re-check for overflow after applying a height.
    pub fn reflow(&mut self) {
        self.reflow_node(self.root);
    }

    fn reflow_node(&mut self, node: NodeId) {
        let children = self.nodes[node.0].children.clone();
        for &child in &children {
            if self.is_element(child) {
                self.reflow_node(child);
            }
        }

        let mut content = 0;
        for &child in &children {
            if let Some(element) = self.element(child) {
                if element.style().in_flow() {
                    content += element.metrics.offset_height + element.vertical_margin();
                }
            }
        }

        if let Some(element) = self.element_mut(node) {
            let rendered = match element.style().height {
                Some(Length::Px(px)) => px.max(0),
                _ => element.intrinsic_height(),
            };
            element.metrics = Metrics {
                client_height: rendered,
                offset_height: rendered,
                scroll_height: rendered.max(content),
            };
        }
    }
}
