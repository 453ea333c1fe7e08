//! Structured-text tree helpers.

pub use cms_pages_types::dast::{
    Document, ListStyle, Mark, MetaEntry, Node, NodeKind, StructuredText,
};

pub fn is_heading(node: &Node) -> bool {
    matches!(node, Node::Heading { .. })
}

pub fn is_paragraph(node: &Node) -> bool {
    matches!(node, Node::Paragraph { .. })
}

pub fn has_children(node: &Node) -> bool {
    !node.children().is_empty()
}

/// Flatten every span below `node` into a single string, in document order.
pub fn plain_text(node: &Node) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Span { value, .. } => out.push_str(value),
        Node::Code { code, .. } => out.push_str(code),
        other => {
            for child in other.children() {
                collect_text(child, out);
            }
        }
    }
}
