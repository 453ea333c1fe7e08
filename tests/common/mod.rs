#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use cms_pages::{
    application::{
        articles::ArticleService,
        content::{Article, ArticleSummary, ContentError, ContentSource},
        render::{ProfileOptions, article_rules},
    },
    infra::http::{HttpState, build_router},
    presentation::views::LayoutChrome,
};
use serde_json::{Value, json};

pub const SITE_TITLE: &str = "DatoCMS DirectBooker Table Demo";

pub fn pricing_response() -> Value {
    serde_json::from_str(include_str!("../fixtures/article_pricing.json"))
        .expect("fixture is valid JSON")
}

pub fn pricing_article() -> Article {
    serde_json::from_value(pricing_response()["data"]["article"].clone())
        .expect("fixture decodes as an article")
}

pub fn bare_article(slug: &str, title: &str) -> Article {
    Article {
        id: format!("id-{slug}"),
        title: title.to_string(),
        slug: slug.to_string(),
        content: None,
    }
}

/// In-memory content source. When `failure` is set every call fails with
/// the error it builds.
#[derive(Default)]
pub struct MemorySource {
    pub articles: Vec<Article>,
    pub failure: Option<fn() -> ContentError>,
}

impl MemorySource {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles,
            failure: None,
        }
    }

    pub fn failing(failure: fn() -> ContentError) -> Self {
        Self {
            articles: Vec::new(),
            failure: Some(failure),
        }
    }

    fn check(&self) -> Result<(), ContentError> {
        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn article(&self, slug: &str) -> Result<Option<Article>, ContentError> {
        self.check()?;
        Ok(self
            .articles
            .iter()
            .find(|article| article.slug == slug)
            .cloned())
    }

    async fn all_articles(&self) -> Result<Vec<ArticleSummary>, ContentError> {
        self.check()?;
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
        self.check()?;
        let article = match slug {
            Some(slug) => self.articles.iter().find(|article| article.slug == slug),
            None => self.articles.first(),
        };
        Ok(json!({ "article": article }))
    }
}

pub fn service(source: MemorySource) -> ArticleService {
    ArticleService::new(
        Arc::new(source),
        Arc::new(article_rules(ProfileOptions::default())),
    )
}

pub fn state(source: MemorySource) -> HttpState {
    HttpState::new(Arc::new(service(source)), LayoutChrome::new(SITE_TITLE))
}

pub fn router(source: MemorySource) -> axum::Router {
    build_router(state(source))
}
