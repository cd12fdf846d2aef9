//! Small syntax-tree helpers shared by the loader, the semantic load, and
//! the suggestors.

use tree_sitter::Node;

/// All named children of a node, in order.
pub(crate) fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Named descendants matching one of `kinds`, without descending into a
/// match's own children.
pub(crate) fn descendants_of_kinds<'a>(node: Node<'a>, kinds: &[&str]) -> Vec<Node<'a>> {
    let mut out = Vec::new();
    for child in named_children(node) {
        if kinds.contains(&child.kind()) {
            out.push(child);
        } else {
            out.extend(descendants_of_kinds(child, kinds));
        }
    }
    out
}

/// Whether a node's span contains a byte offset, end-inclusive.
pub(crate) fn span_contains(node: Node, offset: usize) -> bool {
    node.start_byte() <= offset && offset <= node.end_byte()
}

/// The verbatim source text of a node.
pub(crate) fn text_of<'a>(node: Node, src: &'a str) -> &'a str {
    &src[node.start_byte()..node.end_byte()]
}
