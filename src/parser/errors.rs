//! Internal parse errors.
//!
//! Grammar rules return these through `?`; the recovery loops in
//! [`super::parser`] absorb them, so they never escape [`super::parse`].

use thiserror::Error;

use crate::base::Range;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        range: Range,
    },

    #[error("expected {expected}, found end of file")]
    UnexpectedEof { expected: String },

    #[error("invalid number '{text}'")]
    InvalidNumber { text: String, range: Range },
}

impl ParseError {
    /// Where the error was detected, if anywhere in the text.
    pub fn range(&self) -> Option<Range> {
        match self {
            ParseError::UnexpectedToken { range, .. } | ParseError::InvalidNumber { range, .. } => {
                Some(*range)
            }
            ParseError::UnexpectedEof { .. } => None,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
