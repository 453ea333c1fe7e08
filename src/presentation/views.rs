use crate::application::{
    error::{AppError, ErrorReport, HttpError},
    render::ARTICLE_PATH_PREFIX,
};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

/// Render an application error as a full HTML page, keeping its status and
/// attaching the error chain for the response logger.
pub fn render_error_response(chrome: LayoutChrome, err: &AppError) -> Response {
    if matches!(err, AppError::NotFound) {
        return render_not_found_response(chrome);
    }

    let status = err.status_code();
    let content = ErrorPageView::from_app_error(err);
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, status);
    err.report("presentation::views::render_error_response")
        .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub site_title: String,
    pub lang: &'static str,
}

impl LayoutChrome {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
            lang: "en",
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub site_title: String,
    pub lang: &'static str,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            site_title: chrome.site_title,
            lang: chrome.lang,
            content,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleLinkView {
    pub title: String,
    pub slug: String,
    pub href: String,
}

impl ArticleLinkView {
    pub fn new(title: impl Into<String>, slug: &str) -> Self {
        Self {
            title: title.into(),
            slug: slug.to_string(),
            href: format!("{ARTICLE_PATH_PREFIX}{slug}"),
        }
    }
}

#[derive(Debug)]
pub struct ArticleListView {
    pub articles: Vec<ArticleLinkView>,
}

#[derive(Template)]
#[template(path = "articles.html")]
pub struct ArticlesTemplate {
    pub view: LayoutContext<ArticleListView>,
}

#[derive(Debug)]
pub struct ArticleView {
    pub title: String,
    pub slug: String,
    /// Rendered structured text. Escaping happened during rendering.
    pub content_html: String,
}

#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticleTemplate {
    pub view: LayoutContext<ArticleView>,
}

#[derive(Debug)]
pub struct DumpView {
    pub json: String,
}

#[derive(Template)]
#[template(path = "dump.html")]
pub struct DumpTemplate {
    pub view: LayoutContext<DumpView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist.".to_string(),
            primary_action: Some(ErrorAction::articles()),
        }
    }

    pub fn from_app_error(err: &AppError) -> Self {
        Self {
            title: err.presentation_message().to_string(),
            message: "Something went wrong while loading this page. Please try again later."
                .to_string(),
            primary_action: Some(ErrorAction::articles()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn articles() -> Self {
        Self {
            href: "/articles".to_string(),
            label: "Back to articles".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
