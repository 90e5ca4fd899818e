//! Path normalization utilities for consistent file identity handling.
//!
//! Documents are identified by URI strings (`file:///ws/protos/a.proto`), while
//! import statements carry slash-separated relative paths. Everything here is
//! purely lexical: no function touches the file system, so results are stable
//! regardless of what exists on disk.

use thiserror::Error;

const FILE_SCHEME: &str = "file://";

/// A rejected path computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path '{path}' escapes root '{root}'")]
    EscapesRoot { path: String, root: String },

    #[error("empty import path")]
    EmptyPath,
}

/// Convert a document URI into a normalized slash-separated path.
///
/// `file://` URIs are stripped and percent-decoded. Other strings are treated
/// as paths already, so tests and in-memory documents can use bare paths.
///
/// ```
/// use protols::base::uri_to_path;
///
/// assert_eq!(uri_to_path("file:///ws/my%20protos/a.proto"), "/ws/my protos/a.proto");
/// assert_eq!(uri_to_path("/ws/./b/../a.proto"), "/ws/a.proto");
/// ```
pub fn uri_to_path(uri: &str) -> String {
    let raw = match uri.strip_prefix(FILE_SCHEME) {
        Some(rest) => percent_decode(rest),
        None => uri.to_string(),
    };
    normalize_path(&raw)
}

/// Convert an absolute path into a `file://` URI.
pub fn path_to_uri(path: &str) -> String {
    let path = normalize_path(path);
    let mut uri = String::with_capacity(FILE_SCHEME.len() + path.len() + 1);
    uri.push_str(FILE_SCHEME);
    if !path.starts_with('/') {
        uri.push('/');
    }
    for ch in path.chars() {
        match ch {
            ' ' => uri.push_str("%20"),
            '#' => uri.push_str("%23"),
            '?' => uri.push_str("%3F"),
            '%' => uri.push_str("%25"),
            _ => uri.push(ch),
        }
    }
    uri
}

/// Lexically normalize a path: unify separators, drop `.` segments, fold `..`
/// into the preceding segment and remove trailing slashes.
///
/// A `..` that would climb above the start of a relative path is kept, so the
/// caller can still detect that the path escapes its base.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Join `relative` onto `base` and require the result to stay under `root`.
pub fn join_within(base: &str, relative: &str, root: &str) -> Result<String, PathError> {
    let relative = relative.trim();
    if relative.is_empty() {
        return Err(PathError::EmptyPath);
    }
    let joined = normalize_path(&format!("{base}/{relative}"));
    let root = normalize_path(root);
    if is_within(&joined, &root) {
        Ok(joined)
    } else {
        Err(PathError::EscapesRoot { path: joined, root })
    }
}

/// Check whether normalized `path` equals `root` or lies beneath it.
pub fn is_within(path: &str, root: &str) -> bool {
    if root.is_empty() || root == "/" {
        return true;
    }
    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// The directory part of a normalized path (`/a/b.proto` → `/a`).
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// The final segment of a path (`a/b/c.proto` → `c.proto`).
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
