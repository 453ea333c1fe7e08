//! GraphQL request/response envelopes and the article query payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dast::StructuredText;

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub variables: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArticleQueryData {
    pub article: Option<Article>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: Option<StructuredText>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AllArticlesData {
    #[serde(rename = "allArticles")]
    pub all_articles: Vec<ArticleSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_with_errors_and_no_data() {
        let response: GraphQlResponse<ArticleQueryData> = serde_json::from_value(json!({
            "errors": [{ "message": "Invalid token", "path": ["article"] }]
        }))
        .expect("response");

        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "Invalid token");
    }

    #[test]
    fn missing_article_decodes_as_none() {
        let response: GraphQlResponse<ArticleQueryData> =
            serde_json::from_value(json!({ "data": { "article": null } })).expect("response");

        assert_eq!(response.data.expect("data").article, None);
    }

    #[test]
    fn request_omits_null_variables() {
        let request = GraphQlRequest {
            query: "{ allArticles { id } }",
            variables: Value::Null,
        };

        let encoded = serde_json::to_value(&request).expect("encode");
        assert_eq!(encoded, json!({ "query": "{ allArticles { id } }" }));
    }
}
