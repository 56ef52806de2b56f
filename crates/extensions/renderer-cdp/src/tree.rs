//! Conversion of a CDP document into a [`PageTree`].

use stracked_protocols::{ElementHandle, NodeId, PageTree};

use crate::cdp::{DOCUMENT_NODE, DomNode, ELEMENT_NODE};

/// Flatten a `DOM.getDocument` result into an element tree.
///
/// Only element nodes are kept, in document order. The document node is
/// looked through; text, comment and doctype nodes are skipped together
/// with anything under them. Handles are backend node IDs.
pub fn page_tree(document: &DomNode) -> PageTree {
    let mut tree = PageTree::new();
    let mut stack: Vec<(&DomNode, Option<NodeId>)> = vec![(document, None)];

    while let Some((node, parent)) = stack.pop() {
        let next_parent = match node.node_type {
            ELEMENT_NODE => {
                let tag = tag_name(node);
                let handle = ElementHandle(node.backend_node_id);
                match parent {
                    Some(p) => tree.push_child(p, &tag, handle),
                    None => Some(tree.push_root(&tag, handle)),
                }
            }
            DOCUMENT_NODE => parent,
            _ => continue,
        };

        if let Some(children) = &node.children {
            for child in children.iter().rev() {
                stack.push((child, next_parent));
            }
        }
    }

    tree
}

fn tag_name(node: &DomNode) -> String {
    match node.local_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_ascii_lowercase(),
        _ => node.node_name.to_ascii_lowercase(),
    }
}
