use super::clause::{Clause, ClauseKey};
use super::error::QueryError;

/// Check that every clause carries a value.
pub fn validate_logs_query(clauses: &[Clause]) -> bool {
    clauses.iter().all(|clause| !clause.value.is_empty())
}

/// Collect an error for every clause with an empty value
pub fn validation_errors(clauses: &[Clause]) -> Vec<QueryError> {
    clauses
        .iter()
        .filter(|clause| clause.value.is_empty())
        .map(|clause| match &clause.key {
            ClauseKey::Body => QueryError::EmptyBody {
                offset: clause.offset_start,
            },
            ClauseKey::Field(key) => QueryError::EmptyValue {
                key: key.clone(),
                offset: clause.offset_start,
            },
        })
        .collect()
}
