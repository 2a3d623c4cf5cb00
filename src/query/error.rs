use thiserror::Error;

/// Problems found when validating parsed clauses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Empty value for '{key}' at offset {offset}")]
    EmptyValue { key: String, offset: usize },

    #[error("Empty search text at offset {offset}")]
    EmptyBody { offset: usize },
}

impl QueryError {
    /// Byte offset in the source query the error points at
    pub fn offset(&self) -> usize {
        match self {
            QueryError::EmptyValue { offset, .. } | QueryError::EmptyBody { offset } => *offset,
        }
    }
}
