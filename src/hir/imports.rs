//! Import path resolution and proto-root detection.
//!
//! Import statements name files relative to some include directory. The
//! resolver tries each configured base in priority order and accepts the
//! first candidate that is a currently indexed document. All path arithmetic
//! is lexical; nothing here reads the file system.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::base::path_utils::{file_name, join_within, parent_dir};
use crate::base::{normalize_path, uri_to_path};

/// Indexed documents by normalized path and by file name.
#[derive(Debug, Clone, Default)]
pub struct DocumentPaths {
    /// Normalized path → document URI
    by_path: FxHashMap<String, String>,
    /// File name → URIs, sorted
    by_name: FxHashMap<String, BTreeSet<String>>,
}

impl DocumentPaths {
    /// Register `uri`, returning its file name.
    pub fn insert(&mut self, uri: &str) -> String {
        let path = uri_to_path(uri);
        let name = file_name(&path).to_string();
        self.by_name
            .entry(name.clone())
            .or_default()
            .insert(uri.to_string());
        self.by_path.insert(path, uri.to_string());
        name
    }

    pub fn remove(&mut self, uri: &str) {
        let path = uri_to_path(uri);
        if let Some(uris) = self.by_name.get_mut(file_name(&path)) {
            uris.remove(uri);
            if uris.is_empty() {
                self.by_name.remove(file_name(&path));
            }
        }
        self.by_path.remove(&path);
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.by_path.get(path).map(String::as_str)
    }

    /// The smallest URI among documents called `name`.
    pub fn first_named(&self, name: &str) -> Option<&str> {
        self.by_name.get(name)?.first().map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.by_path.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

/// The file name an import can only ever resolve to.
pub(crate) fn import_file_name(import_path: &str) -> String {
    file_name(&normalize_path(import_path.trim())).to_string()
}

/// Resolves import strings against a set of indexed documents.
#[derive(Debug, Clone, Copy)]
pub struct ImportResolver<'a> {
    pub import_paths: &'a [String],
    /// Manual roots first, then detected ones.
    pub proto_roots: &'a [String],
    pub workspace_roots: &'a [String],
    pub files: &'a DocumentPaths,
}

impl<'a> ImportResolver<'a> {
    /// Resolve `import_path` as written in `from_uri` to an indexed URI.
    pub fn resolve(&self, from_uri: &str, import_path: &str) -> Option<&'a str> {
        let import_path = import_path.trim();
        if import_path.is_empty() {
            return None;
        }

        let from_dir = uri_to_path(from_uri);
        let from_dir = parent_dir(&from_dir);

        let bases = self
            .import_paths
            .iter()
            .chain(self.proto_roots)
            .chain(self.workspace_roots)
            .map(String::as_str)
            .chain(std::iter::once(from_dir));

        for base in bases {
            if let Some(uri) = self.try_base(base, import_path) {
                return Some(uri);
            }
        }

        self.by_file_name(import_path)
    }

    fn try_base(&self, base: &str, import_path: &str) -> Option<&'a str> {
        match join_within(base, import_path, base) {
            Ok(candidate) => self.files.get(&candidate),
            Err(err) => {
                debug!(base, import_path, error = %err, "rejected import candidate");
                None
            }
        }
    }

    /// Last resort: any indexed file with the same base name, first by URI.
    fn by_file_name(&self, import_path: &str) -> Option<&'a str> {
        self.files.first_named(&import_file_name(import_path))
    }
}

/// Infer include directories from how imports line up with indexed paths.
///
/// For every import and every indexed path ending in `/<import>`, the prefix
/// before the import is a candidate root. Candidates are ranked by how many
/// imports they satisfy (most first, ties by path) and every candidate with at
/// least one hit is returned.
pub fn detect_proto_roots<'p, 'i>(
    paths: impl IntoIterator<Item = &'p str>,
    imports: impl IntoIterator<Item = &'i str>,
) -> Vec<String> {
    let paths: Vec<&str> = paths.into_iter().collect();
    let mut hits: BTreeMap<String, usize> = BTreeMap::new();

    for import in imports {
        let import = normalize_path(import.trim());
        if import.is_empty() || import.starts_with("..") || import.starts_with('/') {
            continue;
        }
        let suffix = format!("/{import}");
        for path in &paths {
            if let Some(prefix) = path.strip_suffix(&suffix) {
                let root = if prefix.is_empty() { "/" } else { prefix };
                *hits.entry(root.to_string()).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = hits.into_iter().collect();
    // BTreeMap order gives the path tie-break; the sort is stable.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(root, _)| root).collect()
}
