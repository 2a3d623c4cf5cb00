use super::clause::is_key_char;
use std::ops::Range;

/// Shape of a whitespace-delimited token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `key:value`, with the byte ranges of both parts
    Keyed {
        key: Range<usize>,
        value: Range<usize>,
    },
    /// Anything that is not a `key:value` pair
    FreeText,
}

/// A token and its byte span in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub span: Range<usize>,
    pub kind: TokenKind,
    /// A quoted segment was still open at the end of the input
    pub unterminated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Reading identifier characters that may turn out to be a key
    ScanningKey,
    /// Just consumed `key:`; a quote here opens a quoted value
    ScanningValueStart,
    /// Reading up to the next whitespace
    ScanningFreeText,
    /// Inside a quoted segment; only the same quote character closes it.
    /// In double quotes a backslash escapes the next character.
    ScanningQuoted(char),
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Splits a query into tokens. Never fails: an unterminated quote runs to the
/// end of the input.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump(c);
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let start = self.pos;
        let first = self.peek()?;
        let mut key = None;
        let mut value_start = start;

        let mut state = if is_quote(first) {
            self.bump(first);
            State::ScanningQuoted(first)
        } else {
            State::ScanningKey
        };

        while let Some(c) = self.peek() {
            match state {
                State::ScanningKey => {
                    if is_key_char(c) {
                        self.bump(c);
                    } else if c == ':' && self.pos > start {
                        key = Some(start..self.pos);
                        self.bump(c);
                        value_start = self.pos;
                        state = State::ScanningValueStart;
                    } else {
                        state = State::ScanningFreeText;
                    }
                }
                State::ScanningValueStart => {
                    if is_quote(c) {
                        self.bump(c);
                        state = State::ScanningQuoted(c);
                    } else {
                        state = State::ScanningFreeText;
                    }
                }
                State::ScanningFreeText => {
                    if c.is_whitespace() {
                        break;
                    }
                    self.bump(c);
                }
                State::ScanningQuoted(quote) => {
                    self.bump(c);
                    if c == quote {
                        state = State::ScanningFreeText;
                    } else if c == '\\' && quote == '"' {
                        if let Some(escaped) = self.peek() {
                            self.bump(escaped);
                        }
                    }
                }
            }
        }

        let unterminated = matches!(state, State::ScanningQuoted(_));

        let span = start..self.pos;
        let kind = match key {
            Some(key) => TokenKind::Keyed {
                key,
                value: value_start..self.pos,
            },
            None => TokenKind::FreeText,
        };
        tracing::trace!(?span, ?kind, "query token");

        Some(Token {
            span,
            kind,
            unterminated,
        })
    }
}

/// Whether `value` is exactly one token that opens and closes with `quote`.
///
/// `"a b"` and `"say \"hi\""` qualify; `"a" b "c"` is three tokens and
/// `"open\"` never closes, so neither does.
pub fn is_quoted_token(value: &str, quote: char) -> bool {
    if value.len() < 2 || !value.starts_with(quote) || !value.ends_with(quote) {
        return false;
    }

    let mut tokens = Tokenizer::new(value);
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => token.span == (0..value.len()) && !token.unterminated,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(src: &str) -> Vec<&str> {
        Tokenizer::new(src).map(|t| &src[t.span]).collect()
    }

    #[test]
    fn test_splits_on_whitespace() {
        assert_eq!(spans("  a test\tquery "), vec!["a", "test", "query"]);
    }

    #[test]
    fn test_quoted_token_is_atomic() {
        assert_eq!(
            spans(r#""Error: one two" user:'a b'"#),
            vec![r#""Error: one two""#, "user:'a b'"]
        );
    }

    #[test]
    fn test_other_quote_kind_does_not_close() {
        assert_eq!(
            spans(r#"'test: "ing' next"#),
            vec![r#"'test: "ing'"#, "next"]
        );
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(spans(r#"a:"open value  "#), vec![r#"a:"open value  "#]);
    }

    #[test]
    fn test_keyed_ranges() {
        let src = "level:error";
        let token = Tokenizer::new(src).next().unwrap();
        assert_eq!(
            token.kind,
            TokenKind::Keyed {
                key: 0..5,
                value: 6..11
            }
        );
    }

    #[test]
    fn test_colon_without_key_is_free_text() {
        let kinds: Vec<_> = Tokenizer::new(":value a-b:c").map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::FreeText, TokenKind::FreeText]);
    }

    #[test]
    fn test_backslash_escapes_inside_double_quotes() {
        assert_eq!(
            spans(r#"msg:"say \"hi there\"" next"#),
            vec![r#"msg:"say \"hi there\"""#, "next"]
        );
        assert_eq!(spans(r#""a\\" b"#), vec![r#""a\\""#, "b"]);
    }

    #[test]
    fn test_backslash_is_literal_inside_single_quotes() {
        assert_eq!(spans(r#"'a\' b"#), vec![r#"'a\'"#, "b"]);
    }

    #[test]
    fn test_trailing_backslash_leaves_quote_open() {
        let token = Tokenizer::new(r#""open\"#).next().unwrap();
        assert!(token.unterminated);
        assert_eq!(token.span, 0..6);
    }

    #[test]
    fn test_is_quoted_token() {
        assert!(is_quoted_token(r#""a b""#, '"'));
        assert!(is_quoted_token(r#""say \"hi\"""#, '"'));
        assert!(is_quoted_token("'x'", '\''));
        assert!(is_quoted_token(r#""test: "ing""#, '"'));
        assert!(!is_quoted_token(r#""a" b "c""#, '"'));
        assert!(!is_quoted_token(r#""open\""#, '"'));
        assert!(!is_quoted_token("\"", '"'));
        assert!(!is_quoted_token(" \"a\"", '"'));
    }

    #[test]
    fn test_mid_word_quote_is_not_a_quote() {
        assert_eq!(spans("don't stop"), vec!["don't", "stop"]);
    }

    #[test]
    fn test_empty_value() {
        let token = Tokenizer::new("key:").next().unwrap();
        assert_eq!(
            token.kind,
            TokenKind::Keyed {
                key: 0..3,
                value: 4..4
            }
        );
    }
}
