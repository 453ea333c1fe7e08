//! Fetch-then-render for the article pages.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::content::{Article, ContentSource};
use crate::application::error::AppError;
use crate::application::render::{RenderRules, render};
use crate::presentation::views::{ArticleLinkView, ArticleListView, ArticleView, DumpView};

#[derive(Clone)]
pub struct ArticleService {
    source: Arc<dyn ContentSource>,
    rules: Arc<RenderRules>,
}

impl ArticleService {
    pub fn new(source: Arc<dyn ContentSource>, rules: Arc<RenderRules>) -> Self {
        Self { source, rules }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn listing(&self) -> Result<ArticleListView, AppError> {
        let articles = self.source.all_articles().await?;
        debug!(count = articles.len(), "loaded article list");

        Ok(ArticleListView {
            articles: articles
                .into_iter()
                .map(|summary| ArticleLinkView::new(summary.title, &summary.slug))
                .collect(),
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn article_page(&self, slug: &str) -> Result<ArticleView, AppError> {
        let article = self.source.article(slug).await?.ok_or(AppError::NotFound)?;
        self.render_article(&article)
    }

    /// Render an already-fetched article. Synchronous and side-effect free.
    pub fn render_article(&self, article: &Article) -> Result<ArticleView, AppError> {
        let content_html = match &article.content {
            Some(content) => render(content, &self.rules)?
                .map(|markup| markup.to_html())
                .unwrap_or_default(),
            None => String::new(),
        };

        Ok(ArticleView {
            title: article.title.clone(),
            slug: article.slug.clone(),
            content_html,
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn raw_dump(&self, slug: Option<&str>) -> Result<DumpView, AppError> {
        let data = self.source.article_raw(slug).await?;
        let json = serde_json::to_string_pretty(&data)
            .map_err(|err| AppError::unexpected(format!("failed to format dump: {err}")))?;
        Ok(DumpView { json })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::content::{ArticleSummary, ContentError};
    use crate::application::render::{ProfileOptions, article_rules};
    use crate::domain::dast::{Node, StructuredText};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct FixedSource {
        articles: Vec<Article>,
    }

    #[async_trait]
    impl ContentSource for FixedSource {
        async fn article(&self, slug: &str) -> Result<Option<Article>, ContentError> {
            Ok(self
                .articles
                .iter()
                .find(|article| article.slug == slug)
                .cloned())
        }

        async fn all_articles(&self) -> Result<Vec<ArticleSummary>, ContentError> {
            Ok(self
                .articles
                .iter()
                .map(|article| ArticleSummary {
                    id: article.id.clone(),
                    title: article.title.clone(),
                    slug: article.slug.clone(),
                })
                .collect())
        }

        async fn article_raw(&self, slug: Option<&str>) -> Result<Value, ContentError> {
            let article = match slug {
                Some(slug) => self.articles.iter().find(|article| article.slug == slug),
                None => self.articles.first(),
            };
            Ok(json!({ "article": article }))
        }
    }

    fn service(articles: Vec<Article>) -> ArticleService {
        ArticleService::new(
            Arc::new(FixedSource { articles }),
            Arc::new(article_rules(ProfileOptions::default())),
        )
    }

    fn article(slug: &str, content: Option<StructuredText>) -> Article {
        Article {
            id: format!("id-{slug}"),
            title: format!("Title {slug}"),
            slug: slug.to_string(),
            content,
        }
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let err = service(vec![article("known", None)])
            .article_page("missing")
            .await
            .expect_err("must be not found");

        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn article_page_renders_content() {
        let content = StructuredText::new(Node::Root {
            children: vec![Node::Heading {
                level: 2,
                style: None,
                children: vec![Node::span("Getting Started!")],
            }],
        });
        let view = service(vec![article("intro", Some(content))])
            .article_page("intro")
            .await
            .expect("page");

        assert_eq!(view.title, "Title intro");
        assert_eq!(
            view.content_html,
            r##"<a href="#getting-started"><h2 id="getting-started">Getting Started!</h2></a>"##
        );
    }

    #[tokio::test]
    async fn article_without_content_renders_empty_body() {
        let view = service(vec![article("bare", None)])
            .article_page("bare")
            .await
            .expect("page");

        assert!(view.content_html.is_empty());
    }

    #[tokio::test]
    async fn broken_reference_fails_the_page() {
        let content = StructuredText::new(Node::Root {
            children: vec![Node::Block {
                item: "nowhere".into(),
            }],
        });
        let err = service(vec![article("broken", Some(content))])
            .article_page("broken")
            .await
            .expect_err("must fail");

        assert!(matches!(err, AppError::Render(_)));
    }

    #[tokio::test]
    async fn listing_links_to_article_pages() {
        let view = service(vec![article("a", None), article("b", None)])
            .listing()
            .await
            .expect("listing");

        let hrefs: Vec<_> = view.articles.iter().map(|link| link.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/articles/a", "/articles/b"]);
    }

    #[tokio::test]
    async fn raw_dump_defaults_to_first_article() {
        let dump = service(vec![article("first", None), article("second", None)])
            .raw_dump(None)
            .await
            .expect("dump");

        assert!(dump.json.contains("\"slug\": \"first\""));
    }
}
