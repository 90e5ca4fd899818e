//! Analyzer configuration

use crate::base::uri_to_path;

/// Where imports are looked up, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalyzerConfig {
    /// Explicit include directories, tried first
    pub import_paths: Vec<String>,
    /// Workspace folders, tried after proto roots
    pub workspace_roots: Vec<String>,
    /// Proto roots known up front (kept across detection runs)
    pub proto_roots: Vec<String>,
    /// Whether `detect_proto_roots` may infer additional roots
    pub auto_detect_proto_roots: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            import_paths: Vec::new(),
            workspace_roots: Vec::new(),
            proto_roots: Vec::new(),
            auto_detect_proto_roots: true,
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_import_path(mut self, path: impl AsRef<str>) -> Self {
        push_unique(&mut self.import_paths, path.as_ref());
        self
    }

    pub fn with_workspace_root(mut self, path: impl AsRef<str>) -> Self {
        push_unique(&mut self.workspace_roots, path.as_ref());
        self
    }

    pub fn with_proto_root(mut self, path: impl AsRef<str>) -> Self {
        push_unique(&mut self.proto_roots, path.as_ref());
        self
    }

    pub fn with_auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect_proto_roots = enabled;
        self
    }

    /// The same configuration with every directory normalized to a plain
    /// path (URIs decoded, `.`/`..` folded) and duplicates removed.
    pub fn normalized(&self) -> Self {
        let normalize = |paths: &[String]| {
            let mut out = Vec::with_capacity(paths.len());
            for path in paths {
                push_unique(&mut out, path);
            }
            out
        };
        Self {
            import_paths: normalize(&self.import_paths),
            workspace_roots: normalize(&self.workspace_roots),
            proto_roots: normalize(&self.proto_roots),
            auto_detect_proto_roots: self.auto_detect_proto_roots,
        }
    }
}

/// Normalize `path` and append it unless already present.
pub(crate) fn push_unique(paths: &mut Vec<String>, path: &str) -> bool {
    let path = uri_to_path(path);
    if path.is_empty() || paths.contains(&path) {
        return false;
    }
    paths.push(path);
    true
}
