//! Error-tolerant parser for `.proto` files
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with kind, text, byte span and UTF-16 range
//!     ↓
//! Parser → recursive descent with skip-and-resync recovery
//!     ↓
//! ProtoFile → typed AST, owned by value
//!     ↓
//! HIR → symbols, references, resolution
//! ```
//!
//! Parsing never fails. Malformed regions are skipped and every construct
//! that did parse keeps its exact source range.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod errors;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use errors::{ParseError, ParseResult};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::parse;
