//! Shortest readable spelling of a qualified name at a use site.

use super::resolve::{Resolver, SymbolIndex};
use super::symbols::SymbolInfo;

/// Render `symbol`'s name the way it should be written from `use_scope`
/// inside `use_package`.
///
/// Within the same package the package prefix is dropped, then the leading
/// segments shared with the use-site scope. The symbol's own name is always
/// kept. Across packages the full dotted name is returned.
///
/// The result is purely lexical; see [`unambiguous_name`] for a spelling
/// that is checked against the index.
///
/// ```
/// use protols::base::{Location, Range};
/// use protols::hir::{SymbolInfo, SymbolKind, minimize_name};
///
/// let symbol = SymbolInfo {
///     kind: SymbolKind::Message,
///     name: "Inner".to_string(),
///     full_name: "pkg.Outer.Inner".to_string(),
///     container_name: "pkg.Outer".to_string(),
///     package: "pkg".to_string(),
///     location: Location::new("file:///a.proto", Range::default()),
///     range: Range::default(),
/// };
/// assert_eq!(minimize_name(&symbol, "pkg", "pkg.Outer"), "Inner");
/// assert_eq!(minimize_name(&symbol, "pkg", "pkg.Other"), "Outer.Inner");
/// assert_eq!(minimize_name(&symbol, "other", "other"), "pkg.Outer.Inner");
/// ```
pub fn minimize_name(symbol: &SymbolInfo, use_package: &str, use_scope: &str) -> String {
    if symbol.package != use_package {
        return symbol.full_name.clone();
    }

    let (segments, shared) = split_relative(symbol, use_package, use_scope);
    segments[shared..].join(".")
}

/// Like [`minimize_name`], but adds qualifying segments until the name
/// resolves back to `symbol` from `use_scope`.
///
/// A nearer declaration with the same name would otherwise capture the short
/// spelling. Falls back to the root-anchored `.full.name`, which is exact.
/// Non-type symbols are never resolved through scopes and get the lexical
/// result.
pub fn unambiguous_name(
    index: &SymbolIndex,
    symbol: &SymbolInfo,
    use_package: &str,
    use_scope: &str,
) -> String {
    if !symbol.kind.is_type() {
        return minimize_name(symbol, use_package, use_scope);
    }

    let resolver = Resolver::new(index).with_scope(use_scope);
    let round_trips = |name: &str| {
        resolver
            .resolve(name)
            .is_some_and(|s| s.full_name == symbol.full_name)
    };

    if symbol.package == use_package {
        let (segments, shared) = split_relative(symbol, use_package, use_scope);
        for start in (0..=shared).rev() {
            let candidate = segments[start..].join(".");
            if round_trips(&candidate) {
                return candidate;
            }
        }
    }
    if round_trips(&symbol.full_name) {
        return symbol.full_name.clone();
    }
    format!(".{}", symbol.full_name)
}

/// Package-relative segments of the symbol and how many of them lead the
/// use-site scope, never counting the symbol's own name.
fn split_relative<'s>(
    symbol: &'s SymbolInfo,
    use_package: &str,
    use_scope: &str,
) -> (Vec<&'s str>, usize) {
    let relative = strip_package(&symbol.full_name, use_package);
    let scope = strip_package(use_scope, use_package);

    let segments: Vec<&str> = relative.split('.').collect();
    let shared = segments
        .iter()
        .zip(scope.split('.').filter(|s| !s.is_empty()))
        .take_while(|(a, b)| **a == *b)
        .count()
        .min(segments.len().saturating_sub(1));

    (segments, shared)
}

fn strip_package<'a>(name: &'a str, package: &str) -> &'a str {
    if package.is_empty() {
        return name;
    }
    match name.strip_prefix(package) {
        Some("") => "",
        Some(rest) => rest.strip_prefix('.').unwrap_or(name),
        None => name,
    }
}
