//! Symbol extraction tests for the HIR layer.

use protols::Range;
use protols::hir::SymbolKind;

use crate::helpers::analyzer_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::symbol_assertions::*;

#[test]
fn test_every_declaration_kind_is_indexed() {
    let analyzer = analyzer_from_source(FULL_SERVICE);

    assert_symbol_kind(get_symbol(&analyzer, "shop.v1.Checkout"), SymbolKind::Service);
    assert_symbol_kind(get_symbol(&analyzer, "shop.v1.Checkout.Start"), SymbolKind::Rpc);
    assert_symbol_kind(get_symbol(&analyzer, "shop.v1.StartRequest"), SymbolKind::Message);
    assert_symbol_kind(get_symbol(&analyzer, "shop.v1.StartRequest.items"), SymbolKind::Field);
    assert_symbol_kind(get_symbol(&analyzer, "shop.v1.StartRequest.payment"), SymbolKind::Oneof);
    assert_symbol_kind(get_symbol(&analyzer, "shop.v1.StartRequest.card"), SymbolKind::Field);
    assert_symbol_kind(get_symbol(&analyzer, "shop.v1.Status"), SymbolKind::Enum);
    assert_symbol_kind(get_symbol(&analyzer, "shop.v1.Status.STATUS_OK"), SymbolKind::EnumValue);
}

#[test]
fn test_symbol_info_fields() {
    let analyzer = analyzer_from_source("package pkg;\nmessage Outer {\n  message Inner {}\n}");
    let inner = get_symbol(&analyzer, "pkg.Outer.Inner");
    assert_eq!(inner.name, "Inner");
    assert_eq!(inner.container_name, "pkg.Outer");
    assert_eq!(inner.package, "pkg");
    assert_eq!(inner.location.uri, TEST_URI);
    assert_eq!(inner.location.range, Range::from_coords(2, 10, 2, 15));
    assert_eq!(inner.range, Range::from_coords(2, 2, 2, 18));
}

#[test]
fn test_document_symbols_in_declaration_order() {
    let analyzer = analyzer_from_source("message A { int32 x = 1; }\nenum E { V = 0; }");
    assert_eq!(full_names_in(&analyzer, TEST_URI), vec!["A", "A.x", "E", "E.V"]);
}

#[test]
fn test_extension_fields_under_enclosing_scope() {
    let analyzer = analyzer_from_source(
        "package pkg;\nextend google.protobuf.FieldOptions { string label = 50000; }",
    );
    assert_symbol_kind(get_symbol(&analyzer, "pkg.label"), SymbolKind::Field);
}

#[test]
fn test_empty_ast_leaves_no_symbols() {
    let analyzer = analyzer_from_source("");
    assert!(analyzer.document_symbols(TEST_URI).is_empty());
    assert_eq!(analyzer.symbol_index().symbol_count(), 0);
}

#[test]
fn test_duplicate_full_names_first_registered_wins() {
    let analyzer = analyzer_from_sources(&[
        ("file:///ws/a.proto", "package dup;\nmessage Same {}"),
        ("file:///ws/b.proto", "package dup;\nmessage Same {}"),
    ]);
    assert_eq!(get_symbol(&analyzer, "dup.Same").uri(), "file:///ws/a.proto");
    assert_eq!(analyzer.document_symbols("file:///ws/b.proto").len(), 1);
}
