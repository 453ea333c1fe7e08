//! GraphQL content source backed by the CMS content delivery API.

mod queries;

use async_trait::async_trait;
use reqwest::{
    Client, Response,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};
use url::Url;

use cms_pages_types::{AllArticlesData, ArticleQueryData, GraphQlRequest, GraphQlResponse};

use crate::application::content::{Article, ArticleSummary, ContentError, ContentSource};
use crate::config::{CmsSettings, TOKEN_ENV};
use crate::infra::error::InfraError;

pub use queries::{ALL_ARTICLES_QUERY, ARTICLE_QUERY, FIRST_ARTICLE_QUERY};

const EXCLUDE_INVALID_HEADER: &str = "x-exclude-invalid";
const ENVIRONMENT_HEADER: &str = "x-environment";
const INCLUDE_DRAFTS_HEADER: &str = "x-include-drafts";

#[derive(Clone, Debug)]
pub struct GraphQlContentSource {
    client: Client,
    endpoint: Url,
}

impl GraphQlContentSource {
    pub fn new(settings: &CmsSettings) -> Result<Self, InfraError> {
        let token = settings.token.as_deref().ok_or_else(|| {
            InfraError::configuration(format!(
                "cms.token is required (set it in the config file, CMS_PAGES__CMS__TOKEN, or {TOKEN_ENV})"
            ))
        })?;

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .default_headers(default_headers(settings, token)?)
            .timeout(settings.timeout)
            .build()
            .map_err(|err| InfraError::configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("cms-pages/", env!("CARGO_PKG_VERSION"))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Result<T, ContentError> {
        debug!(operation, endpoint = %self.endpoint, "sending content query");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(map_transport_error)?;

        let envelope: GraphQlResponse<T> = Self::handle(response).await?;
        if !envelope.errors.is_empty() {
            return Err(ContentError::GraphQl(
                envelope.errors.into_iter().map(|err| err.message).collect(),
            ));
        }

        envelope.data.ok_or(ContentError::MissingData)
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> Result<T, ContentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&bytes).map_err(ContentError::decode)
    }
}

#[async_trait]
impl ContentSource for GraphQlContentSource {
    #[instrument(level = "debug", skip(self))]
    async fn article(&self, slug: &str) -> Result<Option<Article>, ContentError> {
        let data: ArticleQueryData = self
            .execute("article", ARTICLE_QUERY, json!({ "slug": slug }))
            .await?;
        Ok(data.article)
    }

    #[instrument(level = "debug", skip(self))]
    async fn all_articles(&self) -> Result<Vec<ArticleSummary>, ContentError> {
        let data: AllArticlesData = self
            .execute("all_articles", ALL_ARTICLES_QUERY, Value::Null)
            .await?;
        Ok(data.all_articles)
    }

    #[instrument(level = "debug", skip(self))]
    async fn article_raw(&self, slug: Option<&str>) -> Result<Value, ContentError> {
        match slug {
            Some(slug) => {
                self.execute("article_raw", ARTICLE_QUERY, json!({ "slug": slug }))
                    .await
            }
            None => {
                self.execute("article_raw", FIRST_ARTICLE_QUERY, Value::Null)
                    .await
            }
        }
    }
}

fn default_headers(settings: &CmsSettings, token: &str) -> Result<HeaderMap, InfraError> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|err| InfraError::configuration(format!("invalid cms.token: {err}")))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    if settings.exclude_invalid {
        headers.insert(EXCLUDE_INVALID_HEADER, HeaderValue::from_static("true"));
    }
    if settings.include_drafts {
        headers.insert(INCLUDE_DRAFTS_HEADER, HeaderValue::from_static("true"));
    }
    if let Some(environment) = settings.environment.as_deref() {
        let value = HeaderValue::from_str(environment)
            .map_err(|err| InfraError::configuration(format!("invalid cms.environment: {err}")))?;
        headers.insert(ENVIRONMENT_HEADER, value);
    }

    Ok(headers)
}

fn map_transport_error(err: reqwest::Error) -> ContentError {
    if err.is_timeout() {
        ContentError::Timeout
    } else {
        ContentError::transport(err)
    }
}
