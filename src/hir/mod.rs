//! High-level IR (HIR): Semantic model over parsed `.proto` files.
//!
//! ## Key Types
//!
//! - [`Analyzer`]: Owns documents, the symbol index and the import graph
//! - [`SymbolInfo`]: A declaration with its fully qualified name
//! - [`ReferenceSite`]: An unresolved type usage
//! - [`SymbolIndex`]: Workspace-wide declaration table
//! - [`Resolver`]: Scoped type-name resolution
//! - [`ImportResolver`]: Import string to document mapping
//!
//! ## Layers
//!
//! ```text
//! ProtoFile (AST)
//!     │
//!     ▼
//! extract_symbols(uri, file)   ← symbols + reference sites (per-file)
//!     │
//!     ▼
//! SymbolIndex                  ← workspace-wide, insertion ordered
//!     │
//!     ▼
//! Resolver::resolve(name)      ← lazy, scope-walking resolution
//! ```

mod analyzer;
mod config;
mod imports;
mod names;
mod resolve;
mod shared;
mod symbols;

pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use imports::{DocumentPaths, ImportResolver, detect_proto_roots};
pub use names::{minimize_name, unambiguous_name};
pub use resolve::{Resolver, SymbolIndex, scope_at};
pub use shared::SharedAnalyzer;
pub use symbols::{
    ExtractionResult, ReferenceKind, ReferenceSite, SCALAR_TYPES, SymbolInfo, SymbolKind,
    extract_symbols, is_scalar_type, qualify,
};
