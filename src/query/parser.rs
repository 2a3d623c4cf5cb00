use super::clause::Clause;
use super::tokenizer::{TokenKind, Tokenizer};
use std::ops::Range;

/// Parse a raw logs query into its clauses.
///
/// Keyed tokens become one clause each with the value kept verbatim, quotes
/// included. Runs of free-text tokens are merged into a single body clause
/// holding the exact source text of the run. When the query ends with
/// whitespace after a keyed clause, an empty body clause is appended at the
/// end of the input so an editor always has somewhere to type.
///
/// Parsing never fails; malformed input degrades to free text.
pub fn parse_logs_query(raw: &str) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let mut body: Option<Range<usize>> = None;
    let mut last_end = 0;

    for token in Tokenizer::new(raw) {
        last_end = token.span.end;
        match token.kind {
            TokenKind::FreeText => {
                body = Some(match body {
                    Some(run) => run.start..token.span.end,
                    None => token.span,
                });
            }
            TokenKind::Keyed { key, value } => {
                if let Some(run) = body.take() {
                    clauses.push(body_clause(raw, run));
                }
                clauses.push(Clause::keyed(&raw[key], &raw[value], token.span.start));
            }
        }
    }

    if let Some(run) = body.take() {
        clauses.push(body_clause(raw, run));
    } else if last_end < raw.len() && clauses.last().is_some_and(|c| !c.is_body()) {
        clauses.push(Clause::body("", raw.len()));
    }

    tracing::debug!(query = raw, clauses = clauses.len(), "parsed logs query");
    clauses
}

fn body_clause(raw: &str, run: Range<usize>) -> Clause {
    let start = run.start;
    Clause::body(&raw[run], start)
}
