//! Override rules layered on top of the standard tag rendering.

use crate::domain::dast::{Node, has_children, is_heading, is_paragraph, plain_text};
use crate::domain::slug::anchor_slug;

use super::markup::{Element, MarkupNode};
use super::tree::{NodeContext, NodeRule, heading_tag};

/// Class applied to paragraphs rendered as block containers.
pub const FAKE_PARAGRAPH_CLASS: &str = "fake-paragraph";

/// Wraps each heading in a self-link: `<a href="#slug"><hN id="slug">`.
///
/// The slug comes from the heading's flattened text, falling back to the
/// node key when the text slugifies to nothing. Headings with identical text
/// share an id.
pub fn heading_anchor_rule() -> NodeRule {
    NodeRule::new(is_heading, render_anchored_heading)
}

/// Renders non-empty paragraphs as `div.fake-paragraph` so block-level
/// children (tables, figures) never end up inside a `<p>`.
pub fn paragraph_container_rule() -> NodeRule {
    NodeRule::new(is_paragraph, render_paragraph_container)
}

fn render_anchored_heading(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    let Node::Heading { level, .. } = ctx.node else {
        return None;
    };
    let slug = anchor_slug(&plain_text(ctx.node), ctx.key);
    Some(anchored_heading(heading_tag(*level), &slug, ctx.key, ctx.children))
}

pub(crate) fn anchored_heading(
    tag: String,
    slug: &str,
    key: &str,
    children: Vec<MarkupNode>,
) -> MarkupNode {
    let heading = Element::new(tag).attr("id", slug).children(children);
    Element::new("a")
        .key(key)
        .attr("href", format!("#{slug}"))
        .child(heading)
        .into()
}

fn render_paragraph_container(ctx: NodeContext<'_>) -> Option<MarkupNode> {
    let element = if has_children(ctx.node) {
        Element::new("div").attr("class", FAKE_PARAGRAPH_CLASS)
    } else {
        Element::new("p")
    };
    Some(element.key(ctx.key).children(ctx.children).into())
}
