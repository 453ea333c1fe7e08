use thiserror::Error;

/// Failures while decoding a block or record payload into its typed form.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record payload has no `__typename`")]
    MissingTypename,
    #[error("record payload has no `id`")]
    MissingId,
    #[error("`{typename}` payload does not match its schema: {message}")]
    Schema {
        typename: &'static str,
        message: String,
    },
}

impl RecordError {
    pub fn schema(typename: &'static str, source: impl std::fmt::Display) -> Self {
        Self::Schema {
            typename,
            message: source.to_string(),
        }
    }
}
