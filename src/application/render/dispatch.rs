//! Type-tag dispatch for block and record payloads.
//!
//! A [`Dispatcher`] is configured per call site with the record kinds it
//! handles and what to do with everything else. Known kinds that are not
//! registered are treated exactly like unknown tags.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::records::{
    ArticleLink, ButtonRecord, FaqRecord, ImageBlock, Record, RecordKind, TableBlock, typename_of,
};
use crate::domain::slug::anchor_slug;

use super::markup::{Element, MarkupNode};
use super::rules::anchored_heading;
use super::tree::{RenderRules, render};
use super::types::RenderError;

/// Path prefix for links to other articles.
pub const ARTICLE_PATH_PREFIX: &str = "/articles/";

/// What to emit for payloads the dispatcher has no handler for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownPolicy {
    /// Render nothing.
    #[default]
    Omit,
    /// Render a visible warning followed by the raw payload.
    Diagnostic,
}

impl UnknownPolicy {
    pub fn from_diagnostics(enabled: bool) -> Self {
        if enabled {
            UnknownPolicy::Diagnostic
        } else {
            UnknownPolicy::Omit
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Replace a leading `✓` / `X` in cells with ✅ / ❌.
    pub checkmarks: bool,
}

#[derive(Clone)]
pub struct FaqOptions {
    /// Wrap the question heading in a self-link like document headings.
    pub anchored: bool,
    /// Rules used to render the answer.
    pub answer: Arc<RenderRules>,
}

#[derive(Clone, Default)]
pub struct Dispatcher {
    unknown: UnknownPolicy,
    table: Option<TableOptions>,
    button: bool,
    media: bool,
    faq: Option<FaqOptions>,
    article: bool,
}

impl Dispatcher {
    pub fn new(unknown: UnknownPolicy) -> Self {
        Self {
            unknown,
            ..Self::default()
        }
    }

    pub fn table(mut self, options: TableOptions) -> Self {
        self.table = Some(options);
        self
    }

    pub fn button(mut self) -> Self {
        self.button = true;
        self
    }

    pub fn media(mut self) -> Self {
        self.media = true;
        self
    }

    pub fn faq(mut self, options: FaqOptions) -> Self {
        self.faq = Some(options);
        self
    }

    pub fn article_link(mut self) -> Self {
        self.article = true;
        self
    }

    pub fn handles(&self, kind: RecordKind) -> bool {
        match kind {
            RecordKind::Table => self.table.is_some(),
            RecordKind::Button => self.button,
            RecordKind::Media => self.media,
            RecordKind::Faq => self.faq.is_some(),
            RecordKind::Article => self.article,
        }
    }

    /// Decode `raw` as one of the registered kinds, or keep it unrecognized.
    pub fn resolve(&self, raw: &Value) -> Result<Record, RenderError> {
        let typename = typename_of(raw)?;
        let record = match RecordKind::from_typename(typename).filter(|kind| self.handles(*kind)) {
            Some(kind) => Record::decode_as(kind, raw)?,
            None => Record::unrecognized(typename, raw),
        };
        Ok(record)
    }

    /// Render a block or inline record payload.
    pub fn dispatch(&self, raw: &Value, key: &str) -> Result<Option<MarkupNode>, RenderError> {
        let markup = match self.resolve(raw)? {
            Record::Table(block) => Some(render_table(
                &block,
                self.table.unwrap_or_default(),
                key,
            )),
            Record::Button(button) => Some(render_button(&button, key)),
            Record::Media(block) => render_media(&block, key),
            Record::Faq(record) => self.render_faq(&record, key)?,
            Record::Article(article) => Some(render_article_link(
                &article,
                key,
                vec![MarkupNode::text(article.title.as_str())],
            )),
            Record::Unrecognized { typename, raw } => self.render_unknown(&typename, &raw, key),
        };
        Ok(markup)
    }

    /// Render the record behind an `itemLink` node, wrapping the link text
    /// in `children`. Only article records are linkable; anything else keeps
    /// its text unlinked.
    pub fn dispatch_link(
        &self,
        raw: &Value,
        key: &str,
        children: Vec<MarkupNode>,
    ) -> Result<Option<MarkupNode>, RenderError> {
        match self.resolve(raw)? {
            Record::Article(article) => Ok(Some(render_article_link(&article, key, children))),
            other => {
                debug!(
                    record = other.kind().map(RecordKind::typename).unwrap_or("unrecognized"),
                    key,
                    "record link target is not linkable"
                );
                Ok(Some(MarkupNode::fragment(children)))
            }
        }
    }

    fn render_faq(&self, record: &FaqRecord, key: &str) -> Result<Option<MarkupNode>, RenderError> {
        let Some(options) = &self.faq else {
            return Ok(None);
        };

        let question = vec![MarkupNode::text(record.faq.question.as_str())];
        let heading = if options.anchored {
            let slug = anchor_slug(&record.faq.question, key);
            anchored_heading("h2".to_string(), &slug, key, question)
        } else {
            Element::new("h2").key(key).children(question).into()
        };

        let mut parts = vec![heading];
        if let Some(answer) = &record.faq.answer
            && let Some(markup) = render(answer, &options.answer)?
        {
            parts.push(markup);
        }
        Ok(Some(MarkupNode::fragment(parts)))
    }

    fn render_unknown(&self, typename: &str, raw: &Value, key: &str) -> Option<MarkupNode> {
        debug!(typename, key, policy = ?self.unknown, "unhandled record type");
        match self.unknown {
            UnknownPolicy::Omit => None,
            UnknownPolicy::Diagnostic => Some(render_diagnostic(typename, raw, key)),
        }
    }
}

/// Replace a leading check or cross marker with its emoji form.
pub fn prettify_checkmarks(cell: &str) -> String {
    let trimmed = cell.trim_start();
    if let Some(rest) = trimmed.strip_prefix('✓') {
        return format!("✅ {}", rest.trim_start());
    }
    if let Some(rest) = trimmed.strip_prefix('X') {
        return format!("❌ {}", rest.trim_start());
    }
    cell.to_string()
}

fn render_table(block: &TableBlock, options: TableOptions, key: &str) -> MarkupNode {
    let columns = &block.table.columns;
    let mut table = Element::new("table").key(key);

    if let Some(caption) = block
        .caption
        .as_deref()
        .filter(|caption| !caption.trim().is_empty())
    {
        table = table.child(Element::new("caption").child(MarkupNode::text(caption)));
    }

    let header = Element::new("tr").children(
        columns
            .iter()
            .map(|column| Element::new("th").child(MarkupNode::text(column.as_str())).into()),
    );

    let rows = block.table.data.iter().map(|row| {
        Element::new("tr")
            .children(columns.iter().map(|column| {
                let value = row.get(column).map(String::as_str).unwrap_or_default();
                let value = if options.checkmarks {
                    prettify_checkmarks(value)
                } else {
                    value.to_string()
                };
                Element::new("td").child(MarkupNode::text(value)).into()
            }))
            .into()
    });

    table
        .child(Element::new("thead").child(header))
        .child(Element::new("tbody").children(rows))
        .into()
}

fn render_button(button: &ButtonRecord, key: &str) -> MarkupNode {
    let variant = if button.primary.unwrap_or(false) {
        "button button-primary"
    } else {
        "button button-secondary"
    };
    Element::new("a")
        .key(key)
        .attr("class", variant)
        .attr("href", button.url.as_str())
        .child(MarkupNode::text(button.label.as_str()))
        .into()
}

fn render_media(block: &ImageBlock, key: &str) -> Option<MarkupNode> {
    let asset = &block.image;

    let visual: MarkupNode = if let Some(video) = &asset.video {
        Element::new("video")
            .attr("controls", "")
            .attr("src", video.streaming_url.as_str())
            .attr_opt("poster", video.thumbnail_url.as_deref())
            .attr_opt("width", video.width.map(|width| width.to_string()))
            .attr_opt("height", video.height.map(|height| height.to_string()))
            .attr_opt("title", video.title.as_deref().or(asset.title.as_deref()))
            .into()
    } else if let Some(image) = &asset.responsive_image {
        Element::new("img")
            .attr("src", image.src.as_str())
            .attr_opt("srcset", image.src_set.as_deref())
            .attr_opt("sizes", image.sizes.as_deref())
            .attr_opt("width", image.width.or(asset.width).map(|width| width.to_string()))
            .attr_opt("height", image.height.or(asset.height).map(|height| height.to_string()))
            .attr("alt", asset.alt.as_deref().unwrap_or_default())
            .attr_opt("title", asset.title.as_deref())
            .attr_opt(
                "style",
                image
                    .bg_color
                    .as_deref()
                    .map(|color| format!("background-color: {color}")),
            )
            .attr("loading", "lazy")
            .into()
    } else if let Some(placeholder) = &asset.blur_up_thumb {
        Element::new("img")
            .attr("src", placeholder.as_str())
            .attr("alt", asset.alt.as_deref().unwrap_or_default())
            .into()
    } else {
        debug!(id = %block.id, key, "media block has nothing to display");
        return None;
    };

    let mut figure = Element::new("figure").key(key).child(visual);
    if let Some(title) = asset.title.as_deref().filter(|title| !title.trim().is_empty()) {
        figure = figure.child(Element::new("figcaption").child(MarkupNode::text(title)));
    }
    Some(figure.into())
}

fn render_article_link(article: &ArticleLink, key: &str, children: Vec<MarkupNode>) -> MarkupNode {
    Element::new("a")
        .key(key)
        .attr("href", format!("{ARTICLE_PATH_PREFIX}{}", article.slug))
        .children(children)
        .into()
}

fn render_diagnostic(typename: &str, raw: &Value, key: &str) -> MarkupNode {
    let payload = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    MarkupNode::fragment(vec![
        Element::new("h4")
            .key(key)
            .attr("style", "color: red")
            .child(MarkupNode::text(format!(
                "Warning: Unhandled block of type '{typename}'"
            )))
            .into(),
        Element::new("pre")
            .child(Element::new("code").child(MarkupNode::text(payload)))
            .into(),
    ])
}
