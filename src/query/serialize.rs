use super::clause::{Clause, ClauseKey};
use super::quote::{quote_query_value, unquote_query_value};

/// Turn clauses back into query text for editing.
///
/// Values are written exactly as stored, so the user's own quoting survives
/// a parse/stringify cycle.
pub fn stringify_logs_query(clauses: &[Clause]) -> String {
    clauses
        .iter()
        .map(|clause| clause.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the canonical query sent to the backend.
///
/// Every value, body text included, is re-quoted in double quotes regardless
/// of how the user quoted it.
pub fn build_logs_query_for_server(clauses: &[Clause]) -> String {
    let query = clauses
        .iter()
        .map(|clause| {
            let value = quote_query_value(unquote_query_value(&clause.value).into_owned());
            match &clause.key {
                ClauseKey::Body => value,
                ClauseKey::Field(key) => format!("{key}:{value}"),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    tracing::debug!(%query, "built server query");
    query
}
