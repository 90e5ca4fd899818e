//! Recursive descent parser for `.proto` files
//!
//! Consumes the token stream from [`super::lexer`] and builds a typed
//! [`ProtoFile`]. Parsing never fails: grammar violations are absorbed by
//! skip-and-resync recovery so the rest of the file is still parsed, and the
//! ranges of everything that did parse stay accurate.

use tracing::trace;

use super::ast::{Comment, ProtoFile};
use super::errors::{ParseError, ParseResult};
use super::lexer::{Token, TokenKind, tokenize};
use crate::base::{LineIndex, Position, Range, TextSize};

/// Parse `.proto` source text into a best-effort AST.
pub fn parse(text: &str, uri: &str) -> ProtoFile {
    let tokens = tokenize(text);
    let mut parser = Parser::new(text, &tokens);
    let mut file = parser.parse_file(uri);
    file.range = Range::new(Position::default(), LineIndex::new(text).end());
    file
}

/// The parser state
pub(crate) struct Parser<'t> {
    text: &'t str,
    tokens: &'t [Token],
    pos: usize,
    /// Index of the last consumed non-comment token.
    last: Option<usize>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(text: &'t str, tokens: &'t [Token]) -> Self {
        Self {
            text,
            tokens,
            pos: 0,
            last: None,
        }
    }

    // =========================================================================
    // Token inspection (comments are invisible to grammar rules)
    // =========================================================================

    fn peek_index(&self) -> Option<usize> {
        (self.pos..self.tokens.len()).find(|&i| !self.tokens[i].is_comment())
    }

    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.peek_index().map(|i| &self.tokens[i])
    }

    /// Look `n` non-comment tokens ahead (0 = `peek`).
    pub(crate) fn nth(&self, n: usize) -> Option<&'t Token> {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.is_comment())
            .nth(n)
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.peek().is_none()
    }

    pub(crate) fn at_punct(&self, punct: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(punct))
    }

    pub(crate) fn at_keyword(&self, keyword: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.is(TokenKind::Identifier, keyword))
    }

    pub(crate) fn nth_is_punct(&self, n: usize, punct: &str) -> bool {
        self.nth(n).is_some_and(|t| t.is_punct(punct))
    }

    pub(crate) fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.nth(n).map(|t| t.kind)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(crate) fn advance(&mut self) -> Option<&'t Token> {
        let index = self.peek_index()?;
        self.pos = index + 1;
        self.last = Some(index);
        Some(&self.tokens[index])
    }

    pub(crate) fn eat_punct(&mut self, punct: &str) -> bool {
        if self.at_punct(punct) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the next token if it has `kind` (and `value`, when given).
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        value: Option<&str>,
    ) -> ParseResult<&'t Token> {
        let expected = || match value {
            Some(v) => format!("'{v}'"),
            None => format!("{kind:?}"),
        };
        match self.peek() {
            Some(token) if token.kind == kind && value.is_none_or(|v| token.text == v) => {
                self.advance();
                Ok(token)
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: expected(),
                found: token.text.to_string(),
                range: token.range,
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: expected(),
            }),
        }
    }

    pub(crate) fn expect_punct(&mut self, punct: &str) -> ParseResult<&'t Token> {
        self.expect(TokenKind::Punctuation, Some(punct))
    }

    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> ParseResult<&'t Token> {
        self.expect(TokenKind::Identifier, Some(keyword))
    }

    pub(crate) fn expect_ident(&mut self) -> ParseResult<&'t Token> {
        self.expect(TokenKind::Identifier, None)
    }

    pub(crate) fn expect_string(&mut self) -> ParseResult<&'t Token> {
        self.expect(TokenKind::String, None)
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.text.to_string(),
                range: token.range,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }

    // =========================================================================
    // Ranges
    // =========================================================================

    /// End of the last consumed token, or `fallback` if nothing was consumed.
    pub(crate) fn last_end(&self, fallback: Position) -> Position {
        self.last
            .map(|i| self.tokens[i].range.end)
            .unwrap_or(fallback)
    }

    pub(crate) fn range_from(&self, start: Position) -> Range {
        Range::new(start, self.last_end(start))
    }

    /// Source text from byte offset `start` through the last consumed token.
    pub(crate) fn source_from(&self, start: TextSize) -> &'t str {
        let end = self.last.map_or(start, |i| self.tokens[i].span.end());
        self.text
            .get(usize::from(start)..usize::from(end))
            .unwrap_or_default()
    }

    // =========================================================================
    // Error recovery
    // =========================================================================

    /// Top-level resync: skip token by token until a `;` or `}` is consumed.
    fn synchronize_top_level(&mut self) {
        while let Some(token) = self.advance() {
            if token.is_punct(";") || token.is_punct("}") {
                break;
            }
        }
    }

    /// Member resync inside a `{ ... }` body. Stops after a `;`, after a
    /// balanced `{ ... }` group, or before the `}` that closes the body.
    pub(crate) fn synchronize_member(&mut self) {
        while let Some(token) = self.peek() {
            if token.is_punct("}") {
                break;
            }
            self.advance();
            if token.is_punct(";") {
                break;
            }
            if token.is_punct("{") {
                self.skip_balanced_braces();
                break;
            }
        }
    }

    /// Skip to just past the `}` matching an already consumed `{`.
    pub(crate) fn skip_balanced_braces(&mut self) {
        let mut depth = 1usize;
        while let Some(token) = self.advance() {
            if token.is_punct("{") {
                depth += 1;
            } else if token.is_punct("}") {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
        }
    }

    /// Run one member rule inside a body; on failure log and resync.
    pub(crate) fn recover_member<F>(&mut self, rule: F)
    where
        F: FnOnce(&mut Self) -> ParseResult<()>,
    {
        let before = self.pos;
        if let Err(err) = rule(self) {
            trace!(error = %err, "recovering inside body");
            self.synchronize_member();
        }
        // A rule that failed on the closing brace consumes nothing; the body
        // loop sees `}` next. Anything else must make progress.
        if self.pos == before && !self.at_punct("}") {
            self.advance();
        }
    }

    // =========================================================================
    // Doc comments
    // =========================================================================

    /// Comments directly above the next token, forming a contiguous block.
    pub(crate) fn leading_doc(&self) -> Option<String> {
        let index = self.peek_index()?;
        let mut expected_line = self.tokens[index].range.start.line;
        let previous_code_line = self.last.map(|i| self.tokens[i].range.end.line);
        let mut parts = Vec::new();

        let mut j = index;
        while j > 0 {
            let candidate = &self.tokens[j - 1];
            if !candidate.is_comment() || candidate.range.end.line + 1 < expected_line {
                break;
            }
            // A comment sharing a line with earlier code trails that code.
            if previous_code_line == Some(candidate.range.start.line) {
                break;
            }
            parts.push(strip_comment_markers(&candidate.text));
            expected_line = candidate.range.start.line;
            j -= 1;
        }

        if parts.is_empty() {
            return None;
        }
        parts.reverse();
        Some(parts.join("\n"))
    }

    /// A comment on the same line right after the last consumed token.
    pub(crate) fn trailing_doc(&self) -> Option<String> {
        let last = &self.tokens[self.last?];
        let next = self.tokens.get(self.pos)?;
        (next.is_comment() && next.range.start.line == last.range.end.line)
            .then(|| strip_comment_markers(&next.text))
    }

    // =========================================================================
    // Grammar entry
    // =========================================================================

    /// ProtoFile = TopLevel*
    pub(crate) fn parse_file(&mut self, uri: &str) -> ProtoFile {
        let mut file = ProtoFile::new(uri);
        file.comments = self
            .tokens
            .iter()
            .filter(|t| t.is_comment())
            .map(|t| Comment {
                text: t.text.to_string(),
                range: t.range,
            })
            .collect();

        while !self.at_eof() {
            if let Err(err) = self.parse_top_level(&mut file) {
                trace!(error = %err, uri, "recovering at top level");
                self.synchronize_top_level();
            }
        }

        file
    }
}

/// Strip `//`, `///`, `/* */` markers and leading `*` gutters.
pub(crate) fn strip_comment_markers(text: &str) -> String {
    if let Some(rest) = text.strip_prefix("//") {
        let rest = rest.trim_start_matches('/');
        return rest.strip_prefix(' ').unwrap_or(rest).trim_end().to_string();
    }
    let inner = text
        .strip_prefix("/*")
        .and_then(|t| t.strip_suffix("*/"))
        .unwrap_or(text);
    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.trim_start_matches('*');
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect();
    let start = lines
        .iter()
        .position(|l| !l.is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}
