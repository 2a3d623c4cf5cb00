//! Logs search query parsing and serialization
//!
//! A logs query is a single line mixing `key:value` filters with free text.
//! Parsing turns it into [`Clause`]s that keep their byte offsets so an editor
//! can highlight them; the clauses can be written back either as the user
//! typed them or in the fully double-quoted form the backend expects.
//!
//! # Syntax
//!
//! ```text
//! key:value               Filter on a field
//! key:"two words"         Quoted value, single or double quotes
//! free text               Anything without a key prefix searches the body
//! "quoted: free text"     Quotes keep colons and spaces inside one token
//! ```
//!
//! # Examples
//!
//! ```text
//! level:error timeout                      # errors mentioning timeout
//! service:'api gateway' "connection reset" # quoted value and quoted text
//! project_id:9 user:"Chilly: McWilly"      # colon inside a quoted value
//! ```

pub mod clause;
pub mod error;
pub mod parser;
pub mod quote;
pub mod serialize;
pub mod tokenizer;
pub mod validate;

pub use clause::{BODY_KEY, Clause, ClauseKey, Operator, clause_at_offset, is_valid_key};
pub use error::QueryError;
pub use parser::parse_logs_query;
pub use quote::{QueryValue, quote_query_value, unquote_query_value};
pub use serialize::{build_logs_query_for_server, stringify_logs_query};
pub use validate::{validate_logs_query, validation_errors};

/// A parsed logs query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogsQuery {
    /// Clauses in source order
    pub clauses: Vec<Clause>,
}

impl LogsQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Parse a query string. Never fails.
    pub fn parse(raw: &str) -> Self {
        Self {
            clauses: parse_logs_query(raw),
        }
    }

    /// Check if this query has no clauses
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Text form for editing
    pub fn to_query_string(&self) -> String {
        stringify_logs_query(&self.clauses)
    }

    /// Canonical form for the backend
    pub fn to_server_query(&self) -> String {
        build_logs_query_for_server(&self.clauses)
    }

    pub fn is_valid(&self) -> bool {
        validate_logs_query(&self.clauses)
    }

    pub fn errors(&self) -> Vec<QueryError> {
        validation_errors(&self.clauses)
    }

    /// Clause under the cursor at byte offset `cursor`
    pub fn clause_at(&self, cursor: usize) -> Option<&Clause> {
        clause_at_offset(&self.clauses, cursor)
    }

    /// Values of every filter clause with the given key
    pub fn values_for(&self, key: &str) -> Vec<&str> {
        self.clauses
            .iter()
            .filter(|c| !c.is_body() && c.key_str() == key)
            .map(|c| c.value.as_str())
            .collect()
    }

    /// Free-text clauses
    pub fn body(&self) -> Vec<&str> {
        self.clauses
            .iter()
            .filter(|c| c.is_body())
            .map(|c| c.value.as_str())
            .collect()
    }
}

impl From<Vec<Clause>> for LogsQuery {
    fn from(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_query_accessors() {
        let query = LogsQuery::parse("level:error timeout level:warn");
        assert_eq!(query.values_for("level"), vec!["error", "warn"]);
        assert_eq!(query.body(), vec!["timeout"]);
        assert!(query.is_valid());
        assert_eq!(query.to_query_string(), "level:error timeout level:warn");
        assert_eq!(
            query.to_server_query(),
            r#"level:"error" "timeout" level:"warn""#
        );
    }

    #[test]
    fn test_empty_logs_query() {
        let query = LogsQuery::new();
        assert!(query.is_empty());
        assert!(query.is_valid());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn test_clause_at_cursor() {
        let query = LogsQuery::parse("level:error timeout");
        assert_eq!(query.clause_at(2).map(|c| c.key_str()), Some("level"));
        assert_eq!(query.clause_at(15).map(|c| c.key_str()), Some(BODY_KEY));
    }
}
