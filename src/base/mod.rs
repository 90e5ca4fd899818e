//! Foundation types for the protols toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Range`], [`Location`] - Editor-protocol coordinates
//! - [`LineIndex`] - Byte offset to line/character conversion
//! - [`path_utils`] - Lexical URI/path normalization
//! - [`text_utils`] - Identifier lookup under a cursor
//!
//! This module has NO dependencies on other protols modules.

mod line_index;
pub mod path_utils;
mod position;
pub mod text_utils;

pub use line_index::LineIndex;
pub use path_utils::{PathError, normalize_path, path_to_uri, uri_to_path};
pub use position::{Location, Position, Range};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
