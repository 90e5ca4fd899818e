//! HIR layer tests
//!
//! Tests for the semantic model over parsed files:
//! - Symbol extraction and qualified names
//! - Scoped name resolution
//! - Cross-file references
//! - Import resolution and proto-root detection
//! - Analyzer lifecycle (update, remove, idempotency)

pub mod tests_analyzer;
pub mod tests_symbol_extraction;
