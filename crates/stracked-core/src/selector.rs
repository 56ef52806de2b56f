//! Structural selector generation.
//!
//! Walks from an element up its ancestor chain, prepending one segment per
//! level. A segment is the bare tag when the element is the only child of its
//! tag under its parent, and `tag[n]` (1-based among same-tag siblings)
//! otherwise. Only the ancestor chain and sibling lists are consulted, so the
//! same element in the same tree always yields the same selector.

use stracked_protocols::{DomTree, NodeId, PageTree, Selector};

/// Document root tag; the walk stops once it is reached.
pub const ROOT_TAG: &str = "html";

/// Selector for one node.
pub fn generate<T: DomTree + ?Sized>(tree: &T, node: NodeId) -> Selector {
    let mut segments: Vec<String> = Vec::new();
    let mut current = node;

    loop {
        let tag = tree.tag_name(current);

        let Some(parent) = tree.parent(current) else {
            segments.push(tag.to_string());
            break;
        };

        let same_tag = tree.children_by_tag(parent, tag);
        if same_tag.len() > 1 {
            let position = same_tag
                .iter()
                .position(|&n| n == current)
                .map_or(0, |i| i + 1);
            segments.push(format!("{tag}[{position}]"));
        } else {
            segments.push(tag.to_string());
        }

        current = parent;
        if tree.tag_name(parent) == ROOT_TAG {
            segments.push(ROOT_TAG.to_string());
            break;
        }
    }

    segments.reverse();
    Selector::new(format!("/{}", segments.join("/")))
}

/// Selectors for every node of a page, in document order.
pub fn generate_all(tree: &PageTree) -> Vec<(NodeId, Selector)> {
    tree.node_ids().map(|id| (id, generate(tree, id))).collect()
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
