use thiserror::Error;

use crate::domain::error::RecordError;

/// Which side table a reference node points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTable {
    Blocks,
    Links,
}

impl ReferenceTable {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceTable::Blocks => "blocks",
            ReferenceTable::Links => "links",
        }
    }
}

impl std::fmt::Display for ReferenceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors emitted while rendering a structured-text tree.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("reference `{id}` was not found in `{table}`")]
    UnresolvedReference { table: ReferenceTable, id: String },
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl RenderError {
    pub fn unresolved(table: ReferenceTable, id: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            table,
            id: id.into(),
        }
    }
}
