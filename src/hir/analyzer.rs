//! Analyzer: the per-workspace owner of parsed files and index state.
//!
//! ## Usage
//!
//! ```
//! use protols::hir::{Analyzer, AnalyzerConfig};
//!
//! let mut analyzer = Analyzer::new(AnalyzerConfig::default());
//! analyzer.set_file_content(
//!     "file:///ws/user.proto",
//!     "package pkg;\nmessage User { string name = 1; }",
//! );
//! analyzer.set_file_content(
//!     "file:///ws/order.proto",
//!     "package pkg;\nmessage Order { User buyer = 1; }",
//! );
//!
//! let user = analyzer.resolve_type("User", "file:///ws/order.proto", "pkg.Order");
//! assert_eq!(user.map(|s| s.full_name.as_str()), Some("pkg.User"));
//! assert_eq!(analyzer.find_references("pkg.User", None).len(), 1);
//! ```
//!
//! Every update is authoritative for its URI: the previous symbols,
//! references and import edges of that document are replaced as a whole.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use super::config::{AnalyzerConfig, push_unique};
use super::imports::{self, DocumentPaths, ImportResolver, import_file_name};
use super::names::unambiguous_name;
use super::resolve::{Resolver, SymbolIndex, may_refer_to, scope_at};
use super::symbols::{ReferenceSite, SymbolInfo, SymbolKind, extract_symbols};
use crate::base::text_utils::type_name_at;
use crate::base::{Location, Position};
use crate::parser::ast::{EnumDefinition, MessageDefinition, ProtoFile};
use crate::parser::parse;

/// Owns all documents of one workspace and answers semantic queries.
#[derive(Debug, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
    /// Document URI → parsed file
    files: FxHashMap<String, ProtoFile>,
    paths: DocumentPaths,
    symbol_index: SymbolIndex,
    /// Document URI → URIs of the documents it imports
    import_graph: FxHashMap<String, Vec<String>>,
    /// Document URI → file names of its unresolved imports
    missing: FxHashMap<String, Vec<String>>,
    /// File name → documents waiting on an import of that name
    waiting: FxHashMap<String, FxHashSet<String>>,
    manual_roots: Vec<String>,
    detected_roots: Vec<String>,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let config = config.normalized();
        Self {
            manual_roots: config.proto_roots.clone(),
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    // ========================================================================
    // DOCUMENTS
    // ========================================================================

    /// Parse `text` and index it under `uri`.
    pub fn set_file_content(&mut self, uri: &str, text: &str) {
        let file = parse(text, uri);
        self.update_file(uri, file);
    }

    /// Re-index one document from its parsed AST.
    pub fn update_file(&mut self, uri: &str, file: ProtoFile) {
        let extraction = extract_symbols(uri, &file);
        debug!(
            uri,
            symbols = extraction.symbols.len(),
            references = extraction.references.len(),
            "updating file"
        );

        self.symbol_index.add_file(uri, extraction);
        let name = self.paths.insert(uri);
        self.files.insert(uri.to_string(), file);

        self.refresh_imports(uri);
        // Only imports ending in this file name can newly resolve to it.
        let pending: Vec<String> = self
            .waiting
            .get(&name)
            .into_iter()
            .flatten()
            .filter(|other| *other != uri)
            .cloned()
            .collect();
        for other in pending {
            self.refresh_imports(&other);
        }
    }

    /// Forget a document and everything it contributed.
    pub fn remove_file(&mut self, uri: &str) {
        if self.files.remove(uri).is_none() {
            return;
        }
        debug!(uri, "removing file");

        self.symbol_index.remove_file(uri);
        self.paths.remove(uri);
        self.import_graph.remove(uri);
        self.forget_missing(uri);

        let importers: Vec<String> = self
            .get_importing_file_uris(uri)
            .into_iter()
            .map(str::to_string)
            .collect();
        for importer in importers {
            self.refresh_imports(&importer);
        }
    }

    pub fn get_file(&self, uri: &str) -> Option<&ProtoFile> {
        self.files.get(uri)
    }

    /// URIs of all indexed documents, sorted.
    pub fn file_uris(&self) -> Vec<&str> {
        let mut uris: Vec<&str> = self.files.keys().map(String::as_str).collect();
        uris.sort_unstable();
        uris
    }

    pub fn symbol_index(&self) -> &SymbolIndex {
        &self.symbol_index
    }

    // ========================================================================
    // RESOLUTION
    // ========================================================================

    /// Resolve a type name written in `from_uri` inside `scope`.
    pub fn resolve_type(&self, name: &str, from_uri: &str, scope: &str) -> Option<&SymbolInfo> {
        trace!(name, from_uri, scope, "resolve type");
        Resolver::new(&self.symbol_index)
            .with_scope(scope)
            .resolve(name)
    }

    /// The scope in effect at a position of an indexed document.
    pub fn scope_at(&self, uri: &str, position: Position) -> Option<String> {
        self.files.get(uri).map(|file| scope_at(file, position))
    }

    /// Exact lookup of any symbol by full name.
    pub fn lookup(&self, full_name: &str) -> Option<&SymbolInfo> {
        self.symbol_index
            .lookup(full_name.strip_prefix('.').unwrap_or(full_name))
    }

    /// The declaration named at `position`, or the type a reference there
    /// resolves to.
    pub fn symbol_at(&self, uri: &str, position: Position) -> Option<&SymbolInfo> {
        if let Some(symbol) = self
            .symbol_index
            .symbols_in_file(uri)
            .find(|s| s.location.range.contains(position))
        {
            return Some(symbol);
        }
        let site = self
            .symbol_index
            .references_in_file(uri)
            .find(|site| site.range.contains(position))?;
        Resolver::resolve_site(&self.symbol_index, site)
    }

    /// Resolve the dotted type name under the cursor in `text`, the host's
    /// current buffer for `uri`. Covers positions with no indexed reference,
    /// such as a name inside an option value.
    pub fn resolve_at_text(
        &self,
        uri: &str,
        text: &str,
        position: Position,
    ) -> Option<&SymbolInfo> {
        if let Some(symbol) = self.symbol_at(uri, position) {
            return Some(symbol);
        }
        let (name, _) = type_name_at(text, position)?;
        let scope = self.scope_at(uri, position).unwrap_or_default();
        self.resolve_type(&name, uri, &scope)
    }

    /// The shortest spelling of `symbol` that resolves back to it when
    /// written in `use_scope` of `use_package`.
    pub fn display_name(
        &self,
        symbol: &SymbolInfo,
        use_package: &str,
        use_scope: &str,
    ) -> String {
        unambiguous_name(&self.symbol_index, symbol, use_package, use_scope)
    }

    /// Usage sites that resolve to the target symbol, ordered by URI and
    /// position. The target is `full_name` when given, else `name`.
    pub fn find_references(&self, name: &str, full_name: Option<&str>) -> Vec<Location> {
        let target = full_name.unwrap_or(name);
        let target = target.strip_prefix('.').unwrap_or(target);
        if target.is_empty() {
            return Vec::new();
        }

        let mut locations: Vec<Location> = self
            .symbol_index
            .references()
            .filter(|(written, _)| may_refer_to(written, target))
            .flat_map(|(_, sites)| sites.iter())
            .filter(|site| {
                Resolver::resolve_site(&self.symbol_index, site)
                    .is_some_and(|symbol| symbol.full_name == target)
            })
            .map(ReferenceSite::location)
            .collect();

        locations.sort_by(|a, b| {
            a.uri
                .cmp(&b.uri)
                .then_with(|| a.range.start.cmp(&b.range.start))
        });
        trace!(target, count = locations.len(), "find references");
        locations
    }

    pub fn get_message_definition(&self, full_name: &str) -> Option<&MessageDefinition> {
        let full_name = full_name.strip_prefix('.').unwrap_or(full_name);
        let symbol = self
            .symbol_index
            .lookup_kind(full_name, SymbolKind::Message)?;
        let file = self.files.get(symbol.uri())?;
        find_message(&file.messages, symbol)
    }

    pub fn get_enum_definition(&self, full_name: &str) -> Option<&EnumDefinition> {
        let full_name = full_name.strip_prefix('.').unwrap_or(full_name);
        let symbol = self.symbol_index.lookup_kind(full_name, SymbolKind::Enum)?;
        let file = self.files.get(symbol.uri())?;
        find_enum(&file.enums, &file.messages, symbol)
    }

    /// Symbols declared in one document, in declaration order.
    pub fn document_symbols(&self, uri: &str) -> Vec<&SymbolInfo> {
        self.symbol_index.symbols_in_file(uri).collect()
    }

    /// Case-insensitive substring search over simple names.
    pub fn workspace_symbols(&self, query: &str) -> Vec<&SymbolInfo> {
        let query = query.to_lowercase();
        self.symbol_index
            .all_symbols()
            .filter(|s| query.is_empty() || s.name.to_lowercase().contains(&query))
            .collect()
    }

    // ========================================================================
    // IMPORTS
    // ========================================================================

    /// Map an import string written in `from_uri` to an indexed document.
    pub fn resolve_import_to_uri(&self, from_uri: &str, import_path: &str) -> Option<String> {
        let roots = self.get_proto_roots();
        self.import_resolver(&roots)
            .resolve(from_uri, import_path)
            .map(str::to_string)
    }

    pub fn get_import_paths(&self) -> &[String] {
        &self.config.import_paths
    }

    pub fn get_workspace_roots(&self) -> &[String] {
        &self.config.workspace_roots
    }

    /// Manually added roots first, then detected ones.
    pub fn get_proto_roots(&self) -> Vec<String> {
        let mut roots = self.manual_roots.clone();
        for root in &self.detected_roots {
            if !roots.contains(root) {
                roots.push(root.clone());
            }
        }
        roots
    }

    pub fn add_proto_root(&mut self, path: &str) {
        if push_unique(&mut self.manual_roots, path) {
            debug!(path, "added proto root");
            self.refresh_all_imports();
        }
    }

    /// Infer proto roots from the indexed documents and their imports.
    ///
    /// Replaces the previous detection; manually added roots are kept.
    /// Returns the detected roots, best first.
    pub fn detect_proto_roots(&mut self) -> Vec<String> {
        if !self.config.auto_detect_proto_roots {
            debug!("proto root detection disabled");
            return Vec::new();
        }

        let detected = imports::detect_proto_roots(
            self.paths.paths(),
            self.files
                .values()
                .flat_map(|file| file.imports.iter().map(|i| i.path.as_str())),
        );
        debug!(roots = ?detected, "detected proto roots");

        self.detected_roots = detected.clone();
        self.refresh_all_imports();
        detected
    }

    /// URIs a document imports, in import order. Unresolved imports are
    /// omitted.
    pub fn get_imported_file_uris(&self, uri: &str) -> &[String] {
        self.import_graph.get(uri).map(Vec::as_slice).unwrap_or(&[])
    }

    /// URIs of documents that import `uri`, sorted.
    pub fn get_importing_file_uris(&self, uri: &str) -> Vec<&str> {
        let mut importers: Vec<&str> = self
            .import_graph
            .iter()
            .filter(|(_, targets)| targets.iter().any(|t| t == uri))
            .map(|(importer, _)| importer.as_str())
            .collect();
        importers.sort_unstable();
        importers
    }

    fn import_resolver<'a>(&'a self, roots: &'a [String]) -> ImportResolver<'a> {
        ImportResolver {
            import_paths: &self.config.import_paths,
            proto_roots: roots,
            workspace_roots: &self.config.workspace_roots,
            files: &self.paths,
        }
    }

    fn refresh_imports(&mut self, uri: &str) {
        let Some(file) = self.files.get(uri) else {
            return;
        };
        let roots = self.get_proto_roots();
        let resolver = self.import_resolver(&roots);

        let mut targets: Vec<String> = Vec::new();
        let mut missing: Vec<String> = Vec::new();
        for import in &file.imports {
            match resolver.resolve(uri, &import.path) {
                Some(target) => {
                    if !targets.iter().any(|t| t == target) {
                        targets.push(target.to_string());
                    }
                }
                None => {
                    debug!(uri, import = %import.path, "unresolved import");
                    let name = import_file_name(&import.path);
                    if !missing.contains(&name) {
                        missing.push(name);
                    }
                }
            }
        }

        self.forget_missing(uri);
        for name in &missing {
            self.waiting
                .entry(name.clone())
                .or_default()
                .insert(uri.to_string());
        }
        if !missing.is_empty() {
            self.missing.insert(uri.to_string(), missing);
        }
        self.import_graph.insert(uri.to_string(), targets);
    }

    fn forget_missing(&mut self, uri: &str) {
        for name in self.missing.remove(uri).unwrap_or_default() {
            if let Some(importers) = self.waiting.get_mut(&name) {
                importers.remove(uri);
                if importers.is_empty() {
                    self.waiting.remove(&name);
                }
            }
        }
    }

    fn refresh_all_imports(&mut self) {
        let uris: Vec<String> = self.files.keys().cloned().collect();
        for uri in uris {
            self.refresh_imports(&uri);
        }
    }
}

fn find_message<'f>(
    messages: &'f [MessageDefinition],
    symbol: &SymbolInfo,
) -> Option<&'f MessageDefinition> {
    messages.iter().find_map(|message| {
        if message.name == symbol.name && message.name_range == symbol.location.range {
            Some(message)
        } else {
            find_message(&message.nested_messages, symbol)
        }
    })
}

fn find_enum<'f>(
    enums: &'f [EnumDefinition],
    messages: &'f [MessageDefinition],
    symbol: &SymbolInfo,
) -> Option<&'f EnumDefinition> {
    enums
        .iter()
        .find(|e| e.name == symbol.name && e.name_range == symbol.location.range)
        .or_else(|| {
            messages
                .iter()
                .find_map(|m| find_enum(&m.nested_enums, &m.nested_messages, symbol))
        })
}
