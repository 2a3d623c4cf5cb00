use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Reserved key marking a clause as free text.
///
/// `@` can never appear in a typed key, so this never collides with a filter
/// key. Any future syntax for quoting keys must keep it unreachable.
pub const BODY_KEY: &str = "@body";

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{Alphabetic}\p{N}_]+$").expect("valid key regex"));

/// Whether `key` could be typed as the key of a `key:value` clause.
pub fn is_valid_key(key: &str) -> bool {
    KEY_RE.is_match(key)
}

/// Characters allowed in a clause key
pub(crate) fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Key of a clause: either a filter field or the free-text body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClauseKey {
    /// Free text, serialized as [`BODY_KEY`]
    Body,
    /// A `key:value` filter
    Field(String),
}

impl ClauseKey {
    pub fn as_str(&self) -> &str {
        match self {
            ClauseKey::Body => BODY_KEY,
            ClauseKey::Field(key) => key,
        }
    }
}

impl From<String> for ClauseKey {
    fn from(key: String) -> Self {
        if key == BODY_KEY {
            ClauseKey::Body
        } else {
            ClauseKey::Field(key)
        }
    }
}

impl From<&str> for ClauseKey {
    fn from(key: &str) -> Self {
        ClauseKey::from(key.to_string())
    }
}

impl From<ClauseKey> for String {
    fn from(key: ClauseKey) -> Self {
        match key {
            ClauseKey::Body => BODY_KEY.to_string(),
            ClauseKey::Field(key) => key,
        }
    }
}

impl fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison applied between key and value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "=")]
    Equals,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equals => write!(f, "="),
        }
    }
}

/// One parsed unit of a logs query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    pub key: ClauseKey,
    pub operator: Operator,
    /// Value as typed, including any surrounding quotes
    pub value: String,
    /// Byte offset into the source query where the clause begins
    pub offset_start: usize,
}

impl Clause {
    /// Create a `key:value` clause
    pub fn keyed(key: impl Into<String>, value: impl Into<String>, offset_start: usize) -> Self {
        Self {
            key: ClauseKey::Field(key.into()),
            operator: Operator::Equals,
            value: value.into(),
            offset_start,
        }
    }

    /// Create a free-text clause
    pub fn body(value: impl Into<String>, offset_start: usize) -> Self {
        Self {
            key: ClauseKey::Body,
            operator: Operator::Equals,
            value: value.into(),
            offset_start,
        }
    }

    pub fn is_body(&self) -> bool {
        self.key == ClauseKey::Body
    }

    pub fn key_str(&self) -> &str {
        self.key.as_str()
    }

    /// Byte offset just past the clause's source text.
    ///
    /// Only meaningful for clauses produced by the parser, whose values are
    /// verbatim slices of the source.
    pub fn offset_end(&self) -> usize {
        match &self.key {
            ClauseKey::Body => self.offset_start.saturating_add(self.value.len()),
            ClauseKey::Field(key) => self
                .offset_start
                .saturating_add(key.len() + 1 + self.value.len()),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            ClauseKey::Body => f.write_str(&self.value),
            ClauseKey::Field(key) => write!(f, "{}:{}", key, self.value),
        }
    }
}

/// Find the clause whose source span contains `cursor`.
///
/// Spans are inclusive at both ends so a cursor sitting right after the last
/// character of a clause still selects it.
pub fn clause_at_offset(clauses: &[Clause], cursor: usize) -> Option<&Clause> {
    clauses
        .iter()
        .find(|clause| clause.offset_start <= cursor && cursor <= clause.offset_end())
}
