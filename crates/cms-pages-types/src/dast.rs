//! Structured-text abstract syntax tree (DAST).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A structured-text field value: the document tree plus the side tables its
/// reference nodes point into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredText {
    pub value: Document,
    /// Payloads for `block` and `inlineBlock` nodes, keyed by their `id` field.
    #[serde(default)]
    pub blocks: Vec<Value>,
    /// Payloads for `inlineItem` and `itemLink` nodes, keyed by their `id` field.
    #[serde(default)]
    pub links: Vec<Value>,
}

impl StructuredText {
    pub fn new(document: Node) -> Self {
        Self {
            value: Document::new(document),
            blocks: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<Value>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn with_links(mut self, links: Vec<Value>) -> Self {
        self.links = links;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub schema: String,
    pub document: Node,
}

impl Document {
    pub fn new(document: Node) -> Self {
        Self {
            schema: "dast".to_string(),
            document,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root {
        #[serde(default)]
        children: Vec<Node>,
    },
    Paragraph {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<String>,
        #[serde(default)]
        children: Vec<Node>,
    },
    Heading {
        level: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<String>,
        #[serde(default)]
        children: Vec<Node>,
    },
    List {
        style: ListStyle,
        #[serde(default)]
        children: Vec<Node>,
    },
    ListItem {
        #[serde(default)]
        children: Vec<Node>,
    },
    Blockquote {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribution: Option<String>,
        #[serde(default)]
        children: Vec<Node>,
    },
    Code {
        code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        highlight: Vec<u32>,
    },
    ThematicBreak,
    Span {
        value: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    Link {
        url: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        meta: Vec<MetaEntry>,
        #[serde(default)]
        children: Vec<Node>,
    },
    ItemLink {
        item: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        meta: Vec<MetaEntry>,
        #[serde(default)]
        children: Vec<Node>,
    },
    InlineItem {
        item: String,
    },
    Block {
        item: String,
    },
    InlineBlock {
        item: String,
    },
    /// Any node type this crate does not know about. Its fields are dropped.
    #[serde(other)]
    Unknown,
}

/// Payload-free discriminant of [`Node`], used to index per-tag tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading,
    List,
    ListItem,
    Blockquote,
    Code,
    ThematicBreak,
    Span,
    Link,
    ItemLink,
    InlineItem,
    Block,
    InlineBlock,
    Unknown,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root { .. } => NodeKind::Root,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::Heading { .. } => NodeKind::Heading,
            Node::List { .. } => NodeKind::List,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::Blockquote { .. } => NodeKind::Blockquote,
            Node::Code { .. } => NodeKind::Code,
            Node::ThematicBreak => NodeKind::ThematicBreak,
            Node::Span { .. } => NodeKind::Span,
            Node::Link { .. } => NodeKind::Link,
            Node::ItemLink { .. } => NodeKind::ItemLink,
            Node::InlineItem { .. } => NodeKind::InlineItem,
            Node::Block { .. } => NodeKind::Block,
            Node::InlineBlock { .. } => NodeKind::InlineBlock,
            Node::Unknown => NodeKind::Unknown,
        }
    }

    /// Ordered child nodes; leaves return an empty slice.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root { children }
            | Node::Paragraph { children, .. }
            | Node::Heading { children, .. }
            | Node::List { children, .. }
            | Node::ListItem { children }
            | Node::Blockquote { children, .. }
            | Node::Link { children, .. }
            | Node::ItemLink { children, .. } => children,
            Node::Code { .. }
            | Node::ThematicBreak
            | Node::Span { .. }
            | Node::InlineItem { .. }
            | Node::Block { .. }
            | Node::InlineBlock { .. }
            | Node::Unknown => &[],
        }
    }

    pub fn span(value: impl Into<String>) -> Self {
        Node::Span {
            value: value.into(),
            marks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListStyle {
    Bulleted,
    Numbered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mark {
    Strong,
    Emphasis,
    Underline,
    Strikethrough,
    Code,
    Highlight,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaEntry {
    pub id: String,
    pub value: String,
}
