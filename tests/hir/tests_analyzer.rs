//! Analyzer lifecycle tests: update, remove, idempotency and lookups.

use std::thread;

use protols::hir::{AnalyzerConfig, SharedAnalyzer, SymbolKind};
use protols::parser::parse;

use crate::helpers::analyzer_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::symbol_assertions::*;

const USER_URI: &str = "file:///ws/user.proto";
const ORDER_URI: &str = "file:///ws/order.proto";

// =============================================================================
// UPDATE AND REMOVE
// =============================================================================

#[test]
fn test_update_twice_is_idempotent() {
    let mut analyzer = analyzer_from_sources(&[(USER_URI, USER_PROTO), (ORDER_URI, ORDER_PROTO)]);
    let before = index_snapshot(&analyzer, ORDER_URI);
    let references_before = analyzer.find_references("pkg.User", None);

    analyzer.update_file(ORDER_URI, parse(ORDER_PROTO, ORDER_URI));

    assert_eq!(index_snapshot(&analyzer, ORDER_URI), before);
    assert_eq!(analyzer.find_references("pkg.User", None), references_before);
}

#[test]
fn test_update_file_matches_set_file_content() {
    let mut by_text = analyzer_from_source(FULL_SERVICE);
    let mut by_ast = analyzer_from_sources(&[]);
    by_ast.update_file(TEST_URI, parse(FULL_SERVICE, TEST_URI));
    assert_eq!(
        full_names_in(&by_text, TEST_URI),
        full_names_in(&by_ast, TEST_URI)
    );

    by_text.remove_file(TEST_URI);
    by_ast.remove_file(TEST_URI);
    assert_eq!(by_text.symbol_index().symbol_count(), 0);
    assert_eq!(by_ast.symbol_index().reference_count(), 0);
}

#[test]
fn test_remove_file_only_affects_its_uri() {
    let mut analyzer = analyzer_from_sources(&[(USER_URI, USER_PROTO), (ORDER_URI, ORDER_PROTO)]);
    analyzer.remove_file(ORDER_URI);
    assert!(analyzer.get_file(ORDER_URI).is_none());
    assert!(analyzer.lookup("pkg.Order").is_none());
    assert!(analyzer.lookup("pkg.User").is_some());
    assert!(analyzer.find_references("pkg.User", None).is_empty());

    // Removing twice is harmless.
    analyzer.remove_file(ORDER_URI);
    assert_eq!(analyzer.file_uris(), vec![USER_URI]);
}

#[test]
fn test_removed_winner_hands_over_to_duplicate() {
    let mut analyzer = analyzer_from_sources(&[
        ("file:///ws/a.proto", "package dup;\nmessage Same {}"),
        ("file:///ws/b.proto", "package dup;\nmessage Same {}"),
    ]);
    analyzer.remove_file("file:///ws/a.proto");
    assert_eq!(get_symbol(&analyzer, "dup.Same").uri(), "file:///ws/b.proto");
}

#[test]
fn test_incomplete_source_is_indexed() {
    let analyzer = analyzer_from_source("message Incomplete { string name = \n }");
    assert_symbol_kind(get_symbol(&analyzer, "Incomplete"), SymbolKind::Message);
}

// =============================================================================
// DEFINITION LOOKUPS
// =============================================================================

#[test]
fn test_get_message_and_enum_definition() {
    let analyzer = analyzer_from_source(FULL_SERVICE);
    let request = analyzer
        .get_message_definition("shop.v1.StartRequest")
        .expect("StartRequest definition");
    assert_eq!(request.map_fields.len(), 1);
    let status = analyzer
        .get_enum_definition("shop.v1.Status")
        .expect("Status definition");
    assert_eq!(status.values.len(), 2);

    assert!(analyzer.get_message_definition("shop.v1.Status").is_none());
    assert!(analyzer.get_enum_definition("shop.v1.Missing").is_none());
}

#[test]
fn test_workspace_symbols() {
    let analyzer = analyzer_from_sources(&[(USER_URI, USER_PROTO), (ORDER_URI, ORDER_PROTO)]);
    let names: Vec<_> = analyzer
        .workspace_symbols("ORD")
        .into_iter()
        .map(|s| s.full_name.as_str())
        .collect();
    assert_eq!(names, vec!["pkg.Order"]);
    assert!(analyzer.workspace_symbols("").len() >= 4);
}

// =============================================================================
// SHARED HANDLE
// =============================================================================

#[test]
fn test_shared_analyzer_concurrent_readers() {
    let shared = SharedAnalyzer::new(AnalyzerConfig::default());
    shared.update(|a| {
        a.set_file_content(USER_URI, USER_PROTO);
        a.set_file_content(ORDER_URI, ORDER_PROTO);
    });

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let reader = shared.clone();
            thread::spawn(move || reader.with(|a| a.find_references("pkg.User", None).len()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("reader thread panicked"), 3);
    }
    assert_eq!(shared.read().file_uris().len(), 2);
}
