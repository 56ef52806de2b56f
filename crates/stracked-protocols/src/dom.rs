//! Tree access for selector generation.
//!
//! The selector generator only needs three operations: a node's tag name,
//! its parent, and the parent's children sharing a tag. Rendering backends
//! hand over the element tree of a loaded page as a [`PageTree`].

use serde::{Deserialize, Serialize};

/// Index of a node within one tree.
pub type NodeId = usize;

/// Opaque backend reference to a live element, used to read its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub i64);

/// Minimal read access to an element tree.
pub trait DomTree {
    /// Lowercase tag name of the node.
    fn tag_name(&self, node: NodeId) -> &str;

    /// Parent element, `None` for the root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Direct children of `parent` with tag `tag`, in document order.
    fn children_by_tag(&self, parent: NodeId, tag: &str) -> Vec<NodeId>;
}

#[derive(Debug, Clone)]
struct PageNode {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    handle: ElementHandle,
}

/// Owned element tree of one loaded page.
///
/// Nodes must be pushed in document (pre-)order, so iterating ids from zero
/// walks the document in order.
#[derive(Debug, Clone, Default)]
pub struct PageTree {
    nodes: Vec<PageNode>,
}

impl PageTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parentless node.
    pub fn push_root(&mut self, tag: &str, handle: ElementHandle) -> NodeId {
        self.push(tag, None, handle)
    }

    /// Add a child under `parent`. Returns `None` if `parent` is unknown.
    pub fn push_child(&mut self, parent: NodeId, tag: &str, handle: ElementHandle) -> Option<NodeId> {
        if parent >= self.nodes.len() {
            return None;
        }
        let id = self.push(tag, Some(parent), handle);
        self.nodes[parent].children.push(id);
        Some(id)
    }

    fn push(&mut self, tag: &str, parent: Option<NodeId>, handle: ElementHandle) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(PageNode {
            tag: tag.to_ascii_lowercase(),
            parent,
            children: Vec::new(),
            handle,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Backend handle of a node.
    pub fn handle(&self, node: NodeId) -> Option<ElementHandle> {
        self.nodes.get(node).map(|n| n.handle)
    }

    /// All node ids in document order.
    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        0..self.nodes.len()
    }

    /// All direct children of a node.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }
}

impl DomTree for PageTree {
    fn tag_name(&self, node: NodeId) -> &str {
        self.nodes.get(node).map(|n| n.tag.as_str()).unwrap_or("")
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    fn children_by_tag(&self, parent: NodeId, tag: &str) -> Vec<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|&c| self.nodes[c].tag == tag)
            .collect()
    }
}
