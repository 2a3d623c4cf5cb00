use crate::query::{Clause, ClauseKey, QueryError};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::fmt::Write as _;

fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    table
}

/// Format clauses as a table, one row per clause
pub fn format_clauses_text(clauses: &[Clause]) -> String {
    if clauses.is_empty() {
        return "No clauses.\n".to_string();
    }

    let mut table = create_styled_table(&["#", "Key", "Op", "Value", "Offset"]);
    for (idx, clause) in clauses.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(clause.key_str()),
            Cell::new(clause.operator),
            Cell::new(&clause.value),
            Cell::new(clause.offset_start),
        ]);
    }

    format!("{table}\n")
}

/// Format validation results
pub fn format_validation_text(errors: &[QueryError]) -> String {
    let mut out = String::new();
    if errors.is_empty() {
        let _ = writeln!(out, "{}", "Query is valid.".green());
        return out;
    }

    let _ = writeln!(
        out,
        "{}",
        format!(
            "Query is invalid: {} problem{}",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        )
        .red()
        .bold()
    );
    for error in errors {
        let _ = writeln!(out, "  - {error}");
    }
    out
}

/// Render the source query with each clause colored by kind.
///
/// Text between clauses is copied through untouched, so the output lines up
/// with what the user typed.
pub fn highlight_query(raw: &str, clauses: &[Clause]) -> String {
    let mut out = String::new();
    let mut pos = 0;

    for clause in clauses {
        let start = clause.offset_start;
        let end = clause.offset_end();
        let Some(text) = raw.get(start..end) else {
            continue;
        };
        if start < pos {
            continue;
        }
        // Keyed clauses must line up with their own key and colon
        let value = match &clause.key {
            ClauseKey::Body => None,
            ClauseKey::Field(key) => match text.strip_prefix(key.as_str()) {
                Some(rest) if rest.starts_with(':') => Some((key, &rest[1..])),
                _ => continue,
            },
        };
        out.push_str(&raw[pos..start]);

        match value {
            None => {
                let _ = write!(out, "{}", text.white());
            }
            Some((key, "")) => {
                let _ = write!(out, "{}", text.red().underline());
                tracing::debug!(%key, offset = start, "highlighting empty value");
            }
            Some((key, value)) => {
                let _ = write!(
                    out,
                    "{}{}{}",
                    key.cyan().bold(),
                    ":".bright_black(),
                    value.green()
                );
            }
        }
        pos = end;
    }

    out.push_str(&raw[pos..]);
    out
}
