use super::tokenizer::is_quoted_token;
use std::borrow::Cow;
use std::fmt;

/// A scalar that can be placed in a query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Text(value.clone())
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Integer(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(value.into())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(text) => f.write_str(text),
            QueryValue::Integer(n) => write!(f, "{n}"),
            QueryValue::Float(n) => write!(f, "{n}"),
        }
    }
}

fn is_quoted(value: &str) -> bool {
    is_quoted_token(value, '"') || is_quoted_token(value, '\'')
}

fn escape_double_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unescape_double_quoted(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek().filter(|n| **n == '"' || **n == '\\') {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Make a value safe to drop into a query as a single token.
///
/// Numbers come back bare. A string that is already one quoted token, in
/// single or double quotes, comes back unchanged; anything else is wrapped in
/// double quotes with `\` and `"` escaped. Applying it twice is the same as
/// applying it once.
pub fn quote_query_value(value: impl Into<QueryValue>) -> String {
    match value.into() {
        QueryValue::Text(text) => {
            if is_quoted(&text) {
                text
            } else {
                format!("\"{}\"", escape_double_quoted(&text))
            }
        }
        number => number.to_string(),
    }
}

/// Strip one layer of quotes from a value that is a single quoted token.
///
/// Escapes inside a double-quoted value are undone so the result can be
/// quoted again without doubling them. Values with several quoted parts,
/// like `"a" b "c"`, are returned as they are.
pub fn unquote_query_value(value: &str) -> Cow<'_, str> {
    if is_quoted_token(value, '"') {
        let inner = &value[1..value.len() - 1];
        if inner.contains('\\') {
            Cow::Owned(unescape_double_quoted(inner))
        } else {
            Cow::Borrowed(inner)
        }
    } else if is_quoted_token(value, '\'') {
        Cow::Borrowed(&value[1..value.len() - 1])
    } else {
        Cow::Borrowed(value)
    }
}
