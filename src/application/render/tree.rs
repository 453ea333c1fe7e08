//! Depth-first structured-text renderer.
//!
//! Children are rendered before their parent. For each node the first
//! matching override wins; otherwise reference nodes are resolved against the
//! side tables and handed to the configured dispatcher, and everything else
//! falls back to the per-tag default. A tag without a default renders to
//! nothing.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::dast::{ListStyle, Mark, MetaEntry, Node, NodeKind, StructuredText};
use crate::domain::records::RecordTable;

use super::dispatch::Dispatcher;
use super::markup::{Element, MarkupNode};
use super::types::{ReferenceTable, RenderError};

/// Key of the document root; descendants append `-<index>` per level.
pub const ROOT_KEY: &str = "t";

/// What a render function receives for one node.
pub struct NodeContext<'a> {
    pub node: &'a Node,
    /// Stable identity derived from the node's position in the tree.
    pub key: &'a str,
    /// Already-rendered children, in document order. Children that rendered
    /// to nothing are absent.
    pub children: Vec<MarkupNode>,
}

pub type RenderFn = Arc<dyn Fn(NodeContext<'_>) -> Option<MarkupNode> + Send + Sync>;
pub type Predicate = Arc<dyn Fn(&Node) -> bool + Send + Sync>;

/// A (predicate, render) pair consulted before the tag default.
#[derive(Clone)]
pub struct NodeRule {
    predicate: Predicate,
    render: RenderFn,
}

impl NodeRule {
    pub fn new<P, R>(predicate: P, render: R) -> Self
    where
        P: Fn(&Node) -> bool + Send + Sync + 'static,
        R: Fn(NodeContext<'_>) -> Option<MarkupNode> + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            render: Arc::new(render),
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        (self.predicate)(node)
    }
}

/// Rendering configuration for one call site.
#[derive(Clone)]
pub struct RenderRules {
    defaults: HashMap<NodeKind, RenderFn>,
    overrides: Vec<NodeRule>,
    blocks: Option<Arc<Dispatcher>>,
    inline_records: Option<Arc<Dispatcher>>,
    record_links: Option<Arc<Dispatcher>>,
}

impl RenderRules {
    /// Rules with no tag defaults at all; every node renders to nothing
    /// unless an override or dispatcher claims it.
    pub fn empty() -> Self {
        Self {
            defaults: HashMap::new(),
            overrides: Vec::new(),
            blocks: None,
            inline_records: None,
            record_links: None,
        }
    }

    /// Rules with the standard HTML rendering for every known tag.
    pub fn standard() -> Self {
        Self::empty()
            .with_default(NodeKind::Root, render_root)
            .with_default(NodeKind::Paragraph, render_paragraph)
            .with_default(NodeKind::Heading, render_heading)
            .with_default(NodeKind::List, render_list)
            .with_default(NodeKind::ListItem, render_list_item)
            .with_default(NodeKind::Blockquote, render_blockquote)
            .with_default(NodeKind::Code, render_code)
            .with_default(NodeKind::ThematicBreak, render_thematic_break)
            .with_default(NodeKind::Span, render_span)
            .with_default(NodeKind::Link, render_link)
            .with_default(NodeKind::ItemLink, render_item_link)
    }

    pub fn with_default<R>(mut self, kind: NodeKind, render: R) -> Self
    where
        R: Fn(NodeContext<'_>) -> Option<MarkupNode> + Send + Sync + 'static,
    {
        self.defaults.insert(kind, Arc::new(render));
        self
    }

    pub fn without_default(mut self, kind: NodeKind) -> Self {
        self.defaults.remove(&kind);
        self
    }

    /// Appends an override. Overrides are consulted in insertion order.
    pub fn with_override(mut self, rule: NodeRule) -> Self {
        self.overrides.push(rule);
        self
    }

    /// Dispatcher for `block` and `inlineBlock` nodes.
    pub fn with_blocks(mut self, dispatcher: Dispatcher) -> Self {
        self.blocks = Some(Arc::new(dispatcher));
        self
    }

    /// Dispatcher for `inlineItem` nodes.
    pub fn with_inline_records(mut self, dispatcher: Dispatcher) -> Self {
        self.inline_records = Some(Arc::new(dispatcher));
        self
    }

    /// Dispatcher for `itemLink` nodes.
    pub fn with_record_links(mut self, dispatcher: Dispatcher) -> Self {
        self.record_links = Some(Arc::new(dispatcher));
        self
    }
}

impl Default for RenderRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Render a structured-text value with `rules`.
///
/// Fails when a reference node points at an id missing from its side table
/// or when a dispatched payload does not match its schema.
pub fn render(text: &StructuredText, rules: &RenderRules) -> Result<Option<MarkupNode>, RenderError> {
    let walker = Walker {
        rules,
        blocks: RecordTable::new(&text.blocks)?,
        links: RecordTable::new(&text.links)?,
    };
    walker.visit(&text.value.document, ROOT_KEY)
}

struct Walker<'a> {
    rules: &'a RenderRules,
    blocks: RecordTable<'a>,
    links: RecordTable<'a>,
}

impl<'a> Walker<'a> {
    fn visit(&self, node: &Node, key: &str) -> Result<Option<MarkupNode>, RenderError> {
        let mut children = Vec::with_capacity(node.children().len());
        for (index, child) in node.children().iter().enumerate() {
            let child_key = format!("{key}-{index}");
            if let Some(markup) = self.visit(child, &child_key)? {
                children.push(markup);
            }
        }

        if let Some(rule) = self.rules.overrides.iter().find(|rule| rule.matches(node)) {
            return Ok((rule.render)(NodeContext {
                node,
                key,
                children,
            }));
        }

        let reference = match node {
            Node::Block { item } | Node::InlineBlock { item } => {
                Some((ReferenceTable::Blocks, item, self.rules.blocks.as_ref()))
            }
            Node::InlineItem { item } => {
                Some((ReferenceTable::Links, item, self.rules.inline_records.as_ref()))
            }
            Node::ItemLink { item, .. } => {
                Some((ReferenceTable::Links, item, self.rules.record_links.as_ref()))
            }
            _ => None,
        };

        if let Some((table, id, dispatcher)) = reference {
            let raw = self.lookup(table, id)?;
            if let Some(dispatcher) = dispatcher {
                return match node {
                    Node::ItemLink { .. } => dispatcher.dispatch_link(raw, key, children),
                    _ => dispatcher.dispatch(raw, key),
                };
            }
        }

        Ok(self
            .rules
            .defaults
            .get(&node.kind())
            .and_then(|render| {
                render(NodeContext {
                    node,
                    key,
                    children,
                })
            }))
    }

    fn lookup(&self, table: ReferenceTable, id: &str) -> Result<&'a Value, RenderError> {
        let entries = match table {
            ReferenceTable::Blocks => &self.blocks,
            ReferenceTable::Links => &self.links,
        };
        entries
            .get(id)
            .ok_or_else(|| RenderError::unresolved(table, id))
    }
}

fn render_root(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    Some(MarkupNode::fragment(ctx.children))
}

fn render_paragraph(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    Some(Element::new("p").key(ctx.key).children(ctx.children).into())
}

fn render_heading(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    let Node::Heading { level, .. } = ctx.node else {
        return None;
    };
    Some(
        Element::new(heading_tag(*level))
            .key(ctx.key)
            .children(ctx.children)
            .into(),
    )
}

fn render_list(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    let Node::List { style, .. } = ctx.node else {
        return None;
    };
    let tag = match style {
        ListStyle::Bulleted => "ul",
        ListStyle::Numbered => "ol",
    };
    Some(Element::new(tag).key(ctx.key).children(ctx.children).into())
}

fn render_list_item(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    Some(Element::new("li").key(ctx.key).children(ctx.children).into())
}

fn render_blockquote(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    let Node::Blockquote { attribution, .. } = ctx.node else {
        return None;
    };
    let mut quote = Element::new("blockquote").key(ctx.key).children(ctx.children);
    if let Some(attribution) = attribution {
        quote = quote.child(Element::new("footer").child(MarkupNode::text(attribution.as_str())));
    }
    Some(quote.into())
}

fn render_code(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    let Node::Code { code, language, .. } = ctx.node else {
        return None;
    };
    let inner = Element::new("code")
        .attr_opt("class", language.as_ref().map(|lang| format!("language-{lang}")))
        .child(MarkupNode::text(code.as_str()));
    Some(Element::new("pre").key(ctx.key).child(inner).into())
}

fn render_thematic_break(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    Some(Element::new("hr").key(ctx.key).into())
}

fn render_span(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    let Node::Span { value, marks } = ctx.node else {
        return None;
    };

    let mut lines = value.split('\n');
    let mut content = Vec::new();
    if let Some(first) = lines.next() {
        content.push(MarkupNode::text(first));
    }
    for line in lines {
        content.push(Element::new("br").into());
        content.push(MarkupNode::text(line));
    }

    let mut markup = match content.len() {
        1 => content.remove(0),
        _ => MarkupNode::fragment(content),
    };

    // First mark ends up outermost.
    for mark in marks.iter().rev() {
        if let Some(tag) = mark_tag(*mark) {
            markup = Element::new(tag).child(markup).into();
        }
    }

    if let MarkupNode::Element(element) = markup {
        return Some(element.key(ctx.key).into());
    }
    Some(markup)
}

fn render_link(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    let Node::Link { url, meta, .. } = ctx.node else {
        return None;
    };
    let mut anchor = Element::new("a").key(ctx.key).attr("href", url.as_str());
    for name in ["target", "rel", "title"] {
        anchor = anchor.attr_opt(name, meta_value(meta, name));
    }
    Some(anchor.children(ctx.children).into())
}

fn render_item_link(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    Some(MarkupNode::fragment(ctx.children))
}

pub(crate) fn heading_tag(level: u8) -> String {
    format!("h{}", level.clamp(1, 6))
}

fn mark_tag(mark: Mark) -> Option<&'static str> {
    match mark {
        Mark::Strong => Some("strong"),
        Mark::Emphasis => Some("em"),
        Mark::Underline => Some("u"),
        Mark::Strikethrough => Some("s"),
        Mark::Code => Some("code"),
        Mark::Highlight => Some("mark"),
        Mark::Other => None,
    }
}

fn meta_value<'m>(meta: &'m [MetaEntry], id: &str) -> Option<&'m str> {
    meta.iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.value.as_str())
}
