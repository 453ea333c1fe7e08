//! Typed view over the block and record payloads referenced from structured
//! text.
//!
//! Payloads arrive as raw JSON objects tagged with `__typename`. Known tags
//! decode into one of the [`Record`] variants; anything else is kept verbatim
//! as [`Record::Unrecognized`] so a caller can decide whether to show it.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use cms_pages_types::records::{
    ArticleLink, ButtonRecord, Faq, FaqRecord, ImageBlock, MediaAsset, ResponsiveImage,
    TableBlock, TableData, VideoAsset,
};

use super::error::RecordError;

const TYPENAME_FIELD: &str = "__typename";

/// Record kinds the front-end knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Table,
    Button,
    Media,
    Faq,
    Article,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Table,
        RecordKind::Button,
        RecordKind::Media,
        RecordKind::Faq,
        RecordKind::Article,
    ];

    pub fn typename(self) -> &'static str {
        match self {
            RecordKind::Table => "TableBlockRecord",
            RecordKind::Button => "ButtonRecord",
            RecordKind::Media => "ImageBlockRecord",
            RecordKind::Faq => "FaqModelRecord",
            RecordKind::Article => "ArticleRecord",
        }
    }

    pub fn from_typename(typename: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.typename() == typename)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.typename())
    }
}

/// A decoded block or record payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Table(TableBlock),
    Button(ButtonRecord),
    Media(ImageBlock),
    Faq(FaqRecord),
    Article(ArticleLink),
    Unrecognized { typename: String, raw: Value },
}

impl Record {
    /// Decode any payload, keeping unknown tags as [`Record::Unrecognized`].
    pub fn decode(raw: &Value) -> Result<Self, RecordError> {
        let typename = typename_of(raw)?;
        match RecordKind::from_typename(typename) {
            Some(kind) => Self::decode_as(kind, raw),
            None => Ok(Self::unrecognized(typename, raw)),
        }
    }

    /// Decode a payload already known to be of `kind`.
    pub fn decode_as(kind: RecordKind, raw: &Value) -> Result<Self, RecordError> {
        let record = match kind {
            RecordKind::Table => Record::Table(decode_payload(kind, raw)?),
            RecordKind::Button => Record::Button(decode_payload(kind, raw)?),
            RecordKind::Media => Record::Media(decode_payload(kind, raw)?),
            RecordKind::Faq => Record::Faq(decode_payload(kind, raw)?),
            RecordKind::Article => Record::Article(decode_payload(kind, raw)?),
        };
        Ok(record)
    }

    pub fn unrecognized(typename: &str, raw: &Value) -> Self {
        Record::Unrecognized {
            typename: typename.to_string(),
            raw: raw.clone(),
        }
    }

    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            Record::Table(_) => Some(RecordKind::Table),
            Record::Button(_) => Some(RecordKind::Button),
            Record::Media(_) => Some(RecordKind::Media),
            Record::Faq(_) => Some(RecordKind::Faq),
            Record::Article(_) => Some(RecordKind::Article),
            Record::Unrecognized { .. } => None,
        }
    }
}

pub fn typename_of(raw: &Value) -> Result<&str, RecordError> {
    raw.get(TYPENAME_FIELD)
        .and_then(Value::as_str)
        .ok_or(RecordError::MissingTypename)
}

fn decode_payload<T: DeserializeOwned>(kind: RecordKind, raw: &Value) -> Result<T, RecordError> {
    T::deserialize(raw).map_err(|err| RecordError::schema(kind.typename(), err))
}

/// Id-indexed side table (`blocks` or `links`) delivered with a tree.
#[derive(Debug, Default)]
pub struct RecordTable<'a> {
    by_id: HashMap<&'a str, &'a Value>,
}

impl<'a> RecordTable<'a> {
    pub fn new(entries: &'a [Value]) -> Result<Self, RecordError> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for entry in entries {
            let id = entry
                .get("id")
                .and_then(Value::as_str)
                .ok_or(RecordError::MissingId)?;
            by_id.insert(id, entry);
        }
        Ok(Self { by_id })
    }

    pub fn get(&self, id: &str) -> Option<&'a Value> {
        self.by_id.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_known_button() {
        let raw = json!({
            "__typename": "ButtonRecord",
            "id": "b1",
            "label": "Book now",
            "primary": true,
            "url": "https://example.com/book"
        });

        match Record::decode(&raw).expect("decode") {
            Record::Button(button) => {
                assert_eq!(button.label, "Book now");
                assert_eq!(button.primary, Some(true));
            }
            other => panic!("unexpected record: {other:?}"),
        }
    }

    #[test]
    fn unknown_typename_is_kept_raw() {
        let raw = json!({ "__typename": "CarouselRecord", "id": "c1", "slides": [] });
        let record = Record::decode(&raw).expect("decode");

        assert_eq!(
            record,
            Record::Unrecognized {
                typename: "CarouselRecord".into(),
                raw: raw.clone()
            }
        );
        assert_eq!(record.kind(), None);
    }

    #[test]
    fn missing_typename_is_an_error() {
        let err = Record::decode(&json!({ "id": "x" })).expect_err("must fail");
        assert!(matches!(err, RecordError::MissingTypename));
    }

    #[test]
    fn schema_violation_names_the_kind() {
        let raw = json!({ "__typename": "TableBlockRecord", "id": "t1", "table": "nope" });
        let err = Record::decode(&raw).expect_err("must fail");

        match err {
            RecordError::Schema { typename, .. } => assert_eq!(typename, "TableBlockRecord"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn typename_round_trip() {
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::from_typename(kind.typename()), Some(kind));
        }
        assert_eq!(RecordKind::from_typename("ArticleRecordX"), None);
    }

    #[test]
    fn table_indexes_by_id() {
        let entries = vec![
            json!({ "__typename": "ButtonRecord", "id": "a" }),
            json!({ "__typename": "TableBlockRecord", "id": "b" }),
        ];
        let table = RecordTable::new(&entries).expect("table");

        assert_eq!(table.get("a"), Some(&entries[0]));
        assert_eq!(table.get("b"), Some(&entries[1]));
        assert_eq!(table.get("c"), None);
    }

    #[test]
    fn table_rejects_entries_without_id() {
        let entries = vec![json!({ "__typename": "ButtonRecord" })];
        assert!(matches!(
            RecordTable::new(&entries),
            Err(RecordError::MissingId)
        ));
    }
}
