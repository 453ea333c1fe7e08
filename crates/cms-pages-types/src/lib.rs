//! Shared wire types for the content-delivery API.
//!
//! The shapes here mirror the JSON returned by the CMS: the structured-text
//! syntax tree ([`dast`]), the record payloads embedded in or linked from it
//! ([`records`]), and the GraphQL envelopes wrapping the article queries
//! ([`graphql`]). Nothing in this crate renders or validates content.

pub mod dast;
pub mod graphql;
pub mod records;

pub use dast::{Document, ListStyle, Mark, MetaEntry, Node, NodeKind, StructuredText};
pub use graphql::{
    AllArticlesData, Article, ArticleQueryData, ArticleSummary, GraphQlError, GraphQlRequest,
    GraphQlResponse,
};
pub use records::{
    ArticleLink, ButtonRecord, Faq, FaqRecord, ImageBlock, MediaAsset, ResponsiveImage,
    TableBlock, TableData, VideoAsset,
};
