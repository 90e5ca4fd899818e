//! Grammar rules, split by construct.
//!
//! - [`file`] - syntax/edition, package, import, top-level dispatch
//! - [`message`] - messages, fields, maps, oneofs, reserved, extensions, extend
//! - [`enums`] - enums and enum values
//! - [`service`] - services and rpcs
//!
//! This module holds the pieces shared by all of them: option names, literal
//! values and bracketed option lists.

mod enums;
mod file;
mod message;
mod service;

use super::ast::{FieldOption, OptionStatement, OptionValue};
use super::errors::{ParseError, ParseResult};
use super::lexer::{Token, TokenKind};
use super::parser::Parser;
use crate::base::Range;

impl Parser<'_> {
    /// OptionName = ( "(" Ident ")" | Ident ) ( "." Ident )*
    ///
    /// The lexer folds `.field` suffixes into identifier tokens, so
    /// `(my.ext).field` arrives as `(`, `my.ext`, `)`, `.field`.
    pub(crate) fn parse_option_name(&mut self) -> ParseResult<(String, Range)> {
        let mut name = String::new();
        let start;

        if self.at_punct("(") {
            start = self.expect_punct("(")?.range.start;
            let ext = self.expect_ident()?;
            self.expect_punct(")")?;
            name.push('(');
            name.push_str(&ext.text);
            name.push(')');
        } else {
            let ident = self.expect_ident()?;
            start = ident.range.start;
            name.push_str(&ident.text);
        }

        while let Some(token) = self.peek() {
            if token.kind == TokenKind::Identifier && token.text.starts_with('.') {
                self.advance();
                name.push_str(&token.text);
            } else if token.is_punct("(") && name.ends_with('.') {
                // `foo.(bar.baz)` style sub-extension
                self.advance();
                let ext = self.expect_ident()?;
                self.expect_punct(")")?;
                name.push('(');
                name.push_str(&ext.text);
                name.push(')');
            } else {
                break;
            }
        }

        Ok((name, self.range_from(start)))
    }

    /// OptionValue = String+ | Number | Ident | "{" ... "}"
    pub(crate) fn parse_option_value(&mut self) -> ParseResult<OptionValue> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("option value"));
        };
        match token.kind {
            TokenKind::String => {
                // Adjacent string literals concatenate.
                let mut value = String::new();
                while let Some(part) = self.peek().filter(|t| t.kind == TokenKind::String) {
                    self.advance();
                    value.push_str(&unquote(&part.text));
                }
                Ok(OptionValue::String(value))
            }
            TokenKind::Number => {
                self.advance();
                parse_float(&token.text)
                    .map(OptionValue::Number)
                    .ok_or_else(|| invalid_number(token))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(literal_word(&token.text))
            }
            TokenKind::Punctuation if token.is_punct("{") => {
                self.advance();
                let mut depth = 1usize;
                while let Some(inner) = self.advance() {
                    if inner.is_punct("{") {
                        depth += 1;
                    } else if inner.is_punct("}") {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                }
                // Kept verbatim; `:` and other text-format characters never
                // become tokens.
                let raw = self.source_from(token.span.start());
                Ok(OptionValue::Identifier(raw.to_string()))
            }
            _ => Err(self.unexpected("option value")),
        }
    }

    /// `option Name = Value ;` with the `option` keyword already peeked.
    pub(crate) fn parse_option_statement(&mut self) -> ParseResult<OptionStatement> {
        let start = self.expect_keyword("option")?.range.start;
        let (name, name_range) = self.parse_option_name()?;
        self.expect_punct("=")?;
        let value = self.parse_option_value()?;
        self.expect_punct(";")?;
        Ok(OptionStatement {
            name,
            name_range,
            value,
            range: self.range_from(start),
        })
    }

    /// FieldOptions = "[" FieldOption ( "," FieldOption )* "]"
    ///
    /// Returns an empty list when no `[` follows.
    pub(crate) fn parse_field_options(&mut self) -> ParseResult<Vec<FieldOption>> {
        let mut options = Vec::new();
        if !self.eat_punct("[") {
            return Ok(options);
        }
        if self.eat_punct("]") {
            return Ok(options);
        }
        loop {
            let (name, name_range) = self.parse_option_name()?;
            self.expect_punct("=")?;
            let value = self.parse_option_value()?;
            options.push(FieldOption {
                name,
                name_range,
                value,
                range: self.range_from(name_range.start),
            });
            if self.eat_punct(",") {
                continue;
            }
            self.expect_punct("]")?;
            return Ok(options);
        }
    }

    /// An integer literal (field numbers, enum values, reserved ranges).
    pub(crate) fn expect_integer(&mut self) -> ParseResult<(i64, Range)> {
        let token = self.expect(TokenKind::Number, None)?;
        parse_int(&token.text)
            .map(|n| (n, token.range))
            .ok_or_else(|| invalid_number(token))
    }
}

fn invalid_number(token: &Token) -> ParseError {
    ParseError::InvalidNumber {
        text: token.text.to_string(),
        range: token.range,
    }
}

/// Convert a bare word into its natural literal.
pub(crate) fn literal_word(text: &str) -> OptionValue {
    match text {
        "true" => OptionValue::Boolean(true),
        "false" => OptionValue::Boolean(false),
        other => OptionValue::Identifier(other.to_string()),
    }
}

/// Parse an integer literal: decimal or `0x` hex, optionally negative.
pub(crate) fn parse_int(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse any numeric literal as a float.
pub(crate) fn parse_float(text: &str) -> Option<f64> {
    parse_int(text)
        .map(|n| n as f64)
        .or_else(|| text.parse::<f64>().ok())
}

/// Strip the quotes of a string literal and decode its escapes.
pub(crate) fn unquote(literal: &str) -> String {
    let inner = if literal.len() >= 2 {
        &literal[1..literal.len() - 1]
    } else {
        literal
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{07}'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0C}'),
            Some('v') => out.push('\u{0B}'),
            Some(first @ '0'..='7') => {
                // Up to three octal digits.
                let mut value = first.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
            }
            Some('x') | Some('X') => {
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 2 {
                    match chars.peek().and_then(|c| c.to_digit(16)) {
                        Some(d) => {
                            value = value * 16 + d;
                            chars.next();
                            digits += 1;
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
            }
            // Escaped newline: line continuation.
            Some('\n') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
