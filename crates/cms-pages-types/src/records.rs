//! Record and block payloads referenced from structured text.
//!
//! Field names follow the GraphQL fragments used by the article query
//! (`camelCase` on the wire). Each payload also carries `__typename`, which
//! is read by the dispatcher before one of these structs is decoded, so it is
//! not repeated as a field here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dast::StructuredText;

/// `TableBlockRecord`: JSON produced by the table-editor plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub id: String,
    pub table: TableData,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<BTreeMap<String, String>>,
}

/// `ButtonRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonRecord {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub primary: Option<bool>,
    pub url: String,
}

/// `ImageBlockRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub id: String,
    pub image: MediaAsset,
}

/// Upload metadata. Only the fields the markup needs are typed; everything
/// else the query selects is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub blur_up_thumb: Option<String>,
    #[serde(default)]
    pub responsive_image: Option<ResponsiveImage>,
    #[serde(default)]
    pub video: Option<VideoAsset>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveImage {
    pub src: String,
    #[serde(default)]
    pub src_set: Option<String>,
    #[serde(default)]
    pub sizes: Option<String>,
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default)]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAsset {
    pub streaming_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub blur_up_thumb: Option<String>,
}

/// `FaqModelRecord`: a reusable FAQ entry linked inline from an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub id: String,
    pub faq: Faq,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub id: Option<String>,
    pub question: String,
    #[serde(default)]
    pub answer: Option<StructuredText>,
}

/// `ArticleRecord` when linked from another article's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleLink {
    pub id: String,
    pub slug: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn media_asset_keeps_unknown_fields() {
        let asset: MediaAsset = serde_json::from_value(json!({
            "id": "img-1",
            "alt": "A cat",
            "responsiveImage": { "src": "https://cdn/cat.jpg", "width": 640, "height": 480 },
            "thumbhash": "abc",
            "smartTags": ["cat"]
        }))
        .expect("asset");

        assert_eq!(asset.alt.as_deref(), Some("A cat"));
        assert_eq!(
            asset.responsive_image.as_ref().map(|image| image.src.as_str()),
            Some("https://cdn/cat.jpg")
        );
        assert_eq!(asset.extra.get("thumbhash"), Some(&json!("abc")));
        assert_eq!(asset.extra.get("smartTags"), Some(&json!(["cat"])));
    }

    #[test]
    fn table_rows_are_keyed_by_column() {
        let block: TableBlock = serde_json::from_value(json!({
            "id": "t1",
            "table": {
                "columns": ["Feature", "Supported"],
                "data": [{ "Feature": "Dark mode", "Supported": "✓" }]
            }
        }))
        .expect("table");

        assert_eq!(block.caption, None);
        assert_eq!(block.table.data[0]["Supported"], "✓");
    }
}
