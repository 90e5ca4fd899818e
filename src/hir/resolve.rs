//! Name resolution: resolving type references to their definitions.
//!
//! ## Key Data Structures
//!
//! - [`SymbolIndex`] - Workspace-wide declaration table and reference sites
//! - [`Resolver`] - Query-time resolution of a type name seen from a scope
//!
//! ## Resolution order
//!
//! 1. A root-anchored name (`.pkg.Type`) matches exactly or not at all.
//! 2. Walk from the use-site scope towards the root, trying
//!    `scope + "." + name` at each level.
//! 3. Fall back to the first declared type whose full name ends with
//!    `"." + name`, in registration order.
//!
//! Only messages and enums are candidates.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{trace, warn};

use super::symbols::{
    ExtractionResult, ReferenceSite, SymbolInfo, SymbolKind, last_segment, qualify,
};
use crate::base::Position;
use crate::parser::ast::ProtoFile;

// ============================================================================
// SYMBOL INDEX
// ============================================================================

/// Index of all declarations and type references across the workspace.
///
/// Declarations are keyed by full name in registration order. Two files may
/// declare the same full name; both are kept and the first registered wins
/// lookups until it is removed.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    /// Full name → every declaration with that name, oldest first.
    declarations: IndexMap<String, Vec<SymbolInfo>>,
    /// Written type text → every site using that text.
    references: FxHashMap<String, Vec<ReferenceSite>>,
    /// File URI → full names it declared.
    file_symbols: FxHashMap<String, IndexSet<String>>,
    /// File URI → written texts it referenced.
    file_references: FxHashMap<String, FxHashSet<String>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file's symbols and references, replacing anything it
    /// contributed before.
    pub fn add_file(&mut self, uri: &str, extraction: ExtractionResult) {
        self.remove_file(uri);

        let mut names = IndexSet::with_capacity(extraction.symbols.len());
        for symbol in extraction.symbols {
            let entry = self.declarations
                .entry(symbol.full_name.clone())
                .or_default();
            if let Some(existing) = entry.first() {
                warn!(
                    full_name = %symbol.full_name,
                    uri,
                    existing = existing.uri(),
                    "duplicate declaration"
                );
            }
            names.insert(symbol.full_name.clone());
            entry.push(symbol);
        }
        self.file_symbols.insert(uri.to_string(), names);

        let mut written = FxHashSet::default();
        for site in extraction.references {
            written.insert(site.written.clone());
            self.references
                .entry(site.written.clone())
                .or_default()
                .push(site);
        }
        self.file_references.insert(uri.to_string(), written);
    }

    /// Drop everything a file contributed. Unknown URIs are a no-op.
    pub fn remove_file(&mut self, uri: &str) {
        if let Some(names) = self.file_symbols.remove(uri) {
            for name in names {
                if let Some(entries) = self.declarations.get_mut(&name) {
                    entries.retain(|s| s.uri() != uri);
                    if entries.is_empty() {
                        self.declarations.shift_remove(&name);
                    }
                }
            }
        }
        if let Some(written) = self.file_references.remove(uri) {
            for text in written {
                if let Some(sites) = self.references.get_mut(&text) {
                    sites.retain(|s| s.uri != uri);
                    if sites.is_empty() {
                        self.references.remove(&text);
                    }
                }
            }
        }
    }

    /// Exact lookup of any symbol kind.
    pub fn lookup(&self, full_name: &str) -> Option<&SymbolInfo> {
        self.declarations.get(full_name).and_then(|v| v.first())
    }

    /// Exact lookup of one symbol kind.
    pub fn lookup_kind(&self, full_name: &str, kind: SymbolKind) -> Option<&SymbolInfo> {
        self.declarations
            .get(full_name)?
            .iter()
            .find(|s| s.kind == kind)
    }

    /// Exact lookup restricted to messages and enums.
    pub fn lookup_type(&self, full_name: &str) -> Option<&SymbolInfo> {
        self.declarations
            .get(full_name)?
            .iter()
            .find(|s| s.kind.is_type())
    }

    /// The winning declaration of every full name, in registration order.
    pub fn all_symbols(&self) -> impl Iterator<Item = &SymbolInfo> {
        self.declarations.values().filter_map(|v| v.first())
    }

    /// All declarations from one file, in declaration order.
    pub fn symbols_in_file<'a, 'u>(
        &'a self,
        uri: &'u str,
    ) -> impl Iterator<Item = &'a SymbolInfo> + use<'a, 'u> {
        self.file_symbols
            .get(uri)
            .into_iter()
            .flatten()
            .filter_map(move |name| self.declarations.get(name))
            .flatten()
            .filter(move |s| s.uri() == uri)
    }

    /// Reference sites grouped by written text.
    pub fn references(&self) -> impl Iterator<Item = (&str, &[ReferenceSite])> {
        self.references
            .iter()
            .map(|(text, sites)| (text.as_str(), sites.as_slice()))
    }

    /// Reference sites written in one file.
    pub fn references_in_file<'a, 'u>(
        &'a self,
        uri: &'u str,
    ) -> impl Iterator<Item = &'a ReferenceSite> + use<'a, 'u> {
        self.file_references
            .get(uri)
            .into_iter()
            .flatten()
            .filter_map(move |text| self.references.get(text))
            .flatten()
            .filter(move |site| site.uri == uri)
    }

    /// Number of distinct full names.
    pub fn symbol_count(&self) -> usize {
        self.declarations.len()
    }

    /// Number of reference sites.
    pub fn reference_count(&self) -> usize {
        self.references.values().map(Vec::len).sum()
    }

    /// Find the first type (registration order) whose full name is `name` or
    /// ends with `"." + name`.
    fn find_by_suffix(&self, name: &str) -> Option<&SymbolInfo> {
        let suffix = format!(".{name}");
        self.declarations
            .iter()
            .filter(|(full_name, _)| *full_name == name || full_name.ends_with(&suffix))
            .find_map(|(_, entries)| entries.iter().find(|s| s.kind.is_type()))
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves type names as seen from one scope.
#[derive(Clone, Debug)]
pub struct Resolver<'a> {
    index: &'a SymbolIndex,
    scope: String,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self {
            index,
            scope: String::new(),
        }
    }

    /// Set the dotted scope names are written in (`pkg.Outer.Inner`).
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Resolve a type name to its message or enum declaration.
    pub fn resolve(&self, name: &str) -> Option<&'a SymbolInfo> {
        if name.is_empty() {
            return None;
        }

        if let Some(anchored) = name.strip_prefix('.') {
            trace!(name, "root-anchored lookup");
            return self.index.lookup_type(anchored);
        }

        let mut scope = self.scope.as_str();
        loop {
            let candidate = qualify(scope, name);
            if let Some(symbol) = self.index.lookup_type(&candidate) {
                trace!(name, scope = %self.scope, resolved = %symbol.full_name, "scope hit");
                return Some(symbol);
            }
            if scope.is_empty() {
                break;
            }
            scope = match scope.rfind('.') {
                Some(idx) => &scope[..idx],
                None => "",
            };
        }

        let fallback = self.index.find_by_suffix(name);
        if let Some(symbol) = fallback {
            trace!(name, resolved = %symbol.full_name, "suffix fallback");
        }
        fallback
    }

    /// Resolve a recorded reference site from its own scope.
    pub fn resolve_site(index: &'a SymbolIndex, site: &ReferenceSite) -> Option<&'a SymbolInfo> {
        Resolver::new(index)
            .with_scope(site.scope.as_str())
            .resolve(&site.written)
    }
}

/// Whether a written type text could name the symbol `full_name`.
pub(crate) fn may_refer_to(written: &str, full_name: &str) -> bool {
    last_segment(written) == last_segment(full_name)
}

// ============================================================================
// SCOPE COMPUTATION
// ============================================================================

/// The scope in effect at `position`: the package followed by every message
/// whose range contains the position, outermost first.
pub fn scope_at(file: &ProtoFile, position: Position) -> String {
    let mut scope = file.package_name().to_string();
    for message in file.message_path_at(position) {
        scope = qualify(&scope, &message.name);
    }
    scope
}
