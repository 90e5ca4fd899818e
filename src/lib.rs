//! # protols-base
//!
//! Core library for Protocol Buffers (`.proto`) parsing and semantic analysis.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! hir       → Symbol index, name resolution, imports, Analyzer
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (Position, Range, LineIndex, path utilities)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir)
// ============================================================================

/// Foundation types: positions, line index, lexical paths
pub mod base;

/// Parser: Logos lexer, recursive-descent parser with error recovery
pub mod parser;

/// High-level IR: symbol index and resolution
pub mod hir;

// Re-export the main entry points
pub use hir::{Analyzer, AnalyzerConfig, SharedAnalyzer, SymbolInfo, SymbolKind};
pub use parser::{ProtoFile, parse};

// Re-export foundation types
pub use base::{LineIndex, Location, Position, Range, TextRange, TextSize};
