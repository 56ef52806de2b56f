use std::collections::HashSet;

use stracked_protocols::ElementHandle;

use super::*;

/// html > (head, body > (div, div > button, div, span))
fn sample_tree() -> (PageTree, Vec<NodeId>) {
    let mut tree = PageTree::new();
    let mut handle = 0;
    let mut next = || {
        handle += 1;
        ElementHandle(handle)
    };

    let html = tree.push_root("html", next());
    let head = tree.push_child(html, "head", next()).unwrap();
    let body = tree.push_child(html, "body", next()).unwrap();
    let div1 = tree.push_child(body, "div", next()).unwrap();
    let div2 = tree.push_child(body, "div", next()).unwrap();
    let button = tree.push_child(div2, "button", next()).unwrap();
    let div3 = tree.push_child(body, "div", next()).unwrap();
    let span = tree.push_child(body, "span", next()).unwrap();

    (tree, vec![html, head, body, div1, div2, button, div3, span])
}

#[test]
fn test_root_yields_own_tag() {
    let (tree, ids) = sample_tree();
    assert_eq!(generate(&tree, ids[0]).as_str(), "/html");
}

#[test]
fn test_direct_children_of_root() {
    let (tree, ids) = sample_tree();
    assert_eq!(generate(&tree, ids[1]).as_str(), "/html/head");
    assert_eq!(generate(&tree, ids[2]).as_str(), "/html/body");
}

#[test]
fn test_sibling_disambiguation() {
    let (tree, ids) = sample_tree();
    assert_eq!(generate(&tree, ids[3]).as_str(), "/html/body/div[1]");
    assert_eq!(generate(&tree, ids[4]).as_str(), "/html/body/div[2]");
    assert_eq!(generate(&tree, ids[6]).as_str(), "/html/body/div[3]");
    assert_eq!(generate(&tree, ids[7]).as_str(), "/html/body/span");
}

#[test]
fn test_nested_under_indexed_parent() {
    let (tree, ids) = sample_tree();
    assert_eq!(generate(&tree, ids[5]).as_str(), "/html/body/div[2]/button");
}

#[test]
fn test_position_ignores_interleaved_tags() {
    let mut tree = PageTree::new();
    let html = tree.push_root("html", ElementHandle(0));
    let body = tree.push_child(html, "body", ElementHandle(1)).unwrap();
    tree.push_child(body, "p", ElementHandle(2)).unwrap();
    tree.push_child(body, "ul", ElementHandle(3)).unwrap();
    tree.push_child(body, "p", ElementHandle(4)).unwrap();
    let ul = tree.push_child(body, "ul", ElementHandle(5)).unwrap();

    assert_eq!(generate(&tree, ul).as_str(), "/html/body/ul[2]");
}

#[test]
fn test_tree_without_html_root() {
    let mut tree = PageTree::new();
    let svg = tree.push_root("svg", ElementHandle(0));
    let g = tree.push_child(svg, "g", ElementHandle(1)).unwrap();
    let path = tree.push_child(g, "path", ElementHandle(2)).unwrap();

    assert_eq!(generate(&tree, path).as_str(), "/svg/g/path");
}

#[test]
fn test_deterministic() {
    let (tree, ids) = sample_tree();
    for &id in &ids {
        assert_eq!(generate(&tree, id), generate(&tree, id));
    }
}

#[test]
fn test_unique_within_tree() {
    let (tree, _) = sample_tree();
    let all = generate_all(&tree);
    let distinct: HashSet<_> = all.iter().map(|(_, s)| s.clone()).collect();
    assert_eq!(distinct.len(), all.len());
}

#[test]
fn test_generate_all_document_order() {
    let (tree, ids) = sample_tree();
    let all = generate_all(&tree);
    let order: Vec<_> = all.iter().map(|(id, _)| *id).collect();
    assert_eq!(order, ids);
    assert_eq!(all[0].1.as_str(), "/html");
}
