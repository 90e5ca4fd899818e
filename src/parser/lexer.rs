//! Logos-based lexer for `.proto` sources
//!
//! Produces a flat token stream with byte spans and line/character ranges.
//! Whitespace is skipped, comments are kept so callers can recover
//! documentation text, and unknown characters are dropped.

use logos::Logos;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::base::{LineIndex, Range};

/// Coarse token classification; keywords are plain identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    String,
    Number,
    Identifier,
    Punctuation,
}

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub span: TextRange,
    pub range: Range,
}

impl Token {
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn is_punct(&self, punct: &str) -> bool {
        self.is(TokenKind::Punctuation, punct)
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    line_index: LineIndex<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            line_index: LineIndex::new(input),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let logos_token = self.inner.next()?;
            // Unknown characters never reach the parser.
            let Ok(logos_token) = logos_token else {
                continue;
            };
            let span = self.inner.span();
            let span = TextRange::new(
                TextSize::new(span.start as u32),
                TextSize::new(span.end as u32),
            );
            return Some(Token {
                kind: logos_token.into(),
                text: SmolStr::new(self.inner.slice()),
                range: self.line_index.range(span),
                span,
            });
        }
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum LogosToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    #[regex(r"'([^'\\\n]|\\(.|\n))*'")]
    String,

    #[regex(r"-?(0[xX][0-9a-fA-F]+|[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?)")]
    Number,

    #[regex(r"[a-zA-Z_.][a-zA-Z0-9_.]*")]
    Identifier,

    #[regex(r"[{}\[\]()<>;=,]")]
    Punctuation,
}

/// Extend a block comment through the next `*/`, or to the end of input
/// when it is never closed.
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::LineComment | LogosToken::BlockComment => TokenKind::Comment,
            LogosToken::String => TokenKind::String,
            LogosToken::Number => TokenKind::Number,
            LogosToken::Identifier => TokenKind::Identifier,
            LogosToken::Punctuation => TokenKind::Punctuation,
        }
    }
}
