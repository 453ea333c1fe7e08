use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    application::articles::ArticleService,
    presentation::views::{
        ArticleTemplate, ArticlesTemplate, DumpTemplate, LayoutChrome, LayoutContext,
        render_error_response, render_not_found_response, render_template_response,
    },
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub articles: Arc<ArticleService>,
    pub chrome: LayoutChrome,
    /// Whether `/article` exposes the raw upstream payload.
    pub dump_route: bool,
}

impl HttpState {
    pub fn new(articles: Arc<ArticleService>, chrome: LayoutChrome) -> Self {
        Self {
            articles,
            chrome,
            dump_route: true,
        }
    }

    pub fn with_dump_route(mut self, enabled: bool) -> Self {
        self.dump_route = enabled;
        self
    }
}

pub fn build_router(state: HttpState) -> Router {
    let mut router = Router::new()
        .route("/", get(index))
        .route("/articles", get(article_list))
        .route("/articles/{slug}", get(article_detail))
        .route("/_health", get(health));

    if state.dump_route {
        router = router.route("/article", get(article_dump));
    }

    router
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DumpQuery {
    slug: Option<String>,
}

async fn index() -> Redirect {
    Redirect::to("/articles")
}

async fn article_list(State(state): State<HttpState>) -> Response {
    match state.articles.listing().await {
        Ok(content) => {
            let view = LayoutContext::new(state.chrome, content);
            render_template_response(ArticlesTemplate { view }, StatusCode::OK)
        }
        Err(err) => render_error_response(state.chrome, &err),
    }
}

async fn article_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    match state.articles.article_page(&slug).await {
        Ok(content) => {
            let view = LayoutContext::new(state.chrome, content);
            render_template_response(ArticleTemplate { view }, StatusCode::OK)
        }
        Err(err) => render_error_response(state.chrome, &err),
    }
}

async fn article_dump(State(state): State<HttpState>, Query(query): Query<DumpQuery>) -> Response {
    let slug = query
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|slug| !slug.is_empty());

    match state.articles.raw_dump(slug).await {
        Ok(content) => {
            let view = LayoutContext::new(state.chrome, content);
            render_template_response(DumpTemplate { view }, StatusCode::OK)
        }
        Err(err) => render_error_response(state.chrome, &err),
    }
}

async fn health() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

async fn fallback(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.chrome)
}
