//! Top-level statement tests: syntax/edition, package, imports, options.

use protols::parser::{ImportModifier, OptionValue, SyntaxKeyword};
use protols::{Position, Range};
use rstest::rstest;

use crate::helpers::analyzer_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// SYNTAX AND EDITION
// =============================================================================

#[rstest]
#[case("syntax = \"proto2\";", SyntaxKeyword::Syntax, "proto2")]
#[case("syntax = \"proto3\";", SyntaxKeyword::Syntax, "proto3")]
#[case("syntax = 'proto3';", SyntaxKeyword::Syntax, "proto3")]
#[case("edition = \"2023\";", SyntaxKeyword::Edition, "2023")]
fn test_syntax_version(
    #[case] source: &str,
    #[case] keyword: SyntaxKeyword,
    #[case] version: &str,
) {
    let file = parse_source(source);
    let syntax = file.syntax.expect("syntax declaration");
    assert_eq!(syntax.keyword, keyword);
    assert_eq!(syntax.version, version);
}

#[test]
fn test_first_syntax_declaration_wins() {
    let file = parse_source("syntax = \"proto3\";\nedition = \"2023\";");
    let syntax = file.syntax.expect("syntax declaration");
    assert!(!syntax.is_edition());
    assert_eq!(syntax.version, "proto3");
}

#[test]
fn test_syntax_version_range_covers_literal() {
    let file = parse_source("syntax = \"proto3\";");
    let syntax = file.syntax.expect("syntax declaration");
    assert_eq!(syntax.version_range, Range::from_coords(0, 9, 0, 17));
    assert_eq!(syntax.range, Range::from_coords(0, 0, 0, 18));
}

// =============================================================================
// PACKAGE
// =============================================================================

#[test]
fn test_dotted_package() {
    let file = parse_source("package foo.bar.v1;");
    let package = file.package.as_ref().expect("package");
    assert_eq!(package.name, "foo.bar.v1");
    assert_eq!(package.name_range, Range::from_coords(0, 8, 0, 18));
    assert_eq!(file.package_name(), "foo.bar.v1");
}

#[test]
fn test_missing_package_is_empty_name() {
    let file = parse_source("message A {}");
    assert!(file.package.is_none());
    assert_eq!(file.package_name(), "");
}

// =============================================================================
// IMPORTS
// =============================================================================

#[test]
fn test_import_modifiers() {
    let file = parse_source(
        "import public \"other.proto\";\nimport weak \"x.proto\";\nimport \"y.proto\";",
    );
    let imports: Vec<_> = file
        .imports
        .iter()
        .map(|i| (i.path.as_str(), i.modifier))
        .collect();
    assert_eq!(
        imports,
        vec![
            ("other.proto", Some(ImportModifier::Public)),
            ("x.proto", Some(ImportModifier::Weak)),
            ("y.proto", None),
        ]
    );
}

#[test]
fn test_import_path_range() {
    let file = parse_source("import \"a/b.proto\";");
    assert_eq!(file.imports[0].path_range, Range::from_coords(0, 7, 0, 18));
}

// =============================================================================
// OPTIONS
// =============================================================================

#[test]
fn test_file_option_values() {
    let file = parse_source(FULL_SERVICE);
    let options: Vec<_> = file
        .options
        .iter()
        .map(|o| (o.name.as_str(), o.value.clone()))
        .collect();
    assert_eq!(
        options,
        vec![
            (
                "java_package",
                OptionValue::String("com.example.shop".to_string())
            ),
            ("optimize_for", OptionValue::Identifier("SPEED".to_string())),
        ]
    );
}

#[rstest]
#[case("option a = 42;", OptionValue::Number(42.0))]
#[case("option a = -1.5;", OptionValue::Number(-1.5))]
#[case("option a = 0x10;", OptionValue::Number(16.0))]
#[case("option a = true;", OptionValue::Boolean(true))]
#[case("option a = false;", OptionValue::Boolean(false))]
#[case("option a = \"x\" \"y\";", OptionValue::String("xy".to_string()))]
#[case("option a = NONE;", OptionValue::Identifier("NONE".to_string()))]
fn test_option_literal_conversion(#[case] source: &str, #[case] expected: OptionValue) {
    let file = parse_source(source);
    assert_eq!(file.options.len(), 1);
    assert_eq!(file.options[0].value, expected);
}

#[test]
fn test_parenthesized_option_name() {
    let file = parse_source("option (my.ext).field = 1;\noption (custom) = \"v\";");
    let names: Vec<_> = file.options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["(my.ext).field", "(custom)"]);
    assert_eq!(file.options[0].name_range.start, Position::new(0, 7));
}

#[test]
fn test_aggregate_option_value_kept_raw() {
    let file = parse_source("option (rules) = { min: 1 max: 5 };\nmessage After {}");
    assert_eq!(
        file.options[0].value,
        OptionValue::Identifier("{ min: 1 max: 5 }".to_string())
    );
    assert_eq!(file.messages.len(), 1);
    assert_eq!(file.messages[0].name, "After");
}

#[test]
fn test_nested_aggregate_field_option_keeps_source_text() {
    let file = parse_source(
        "message M {\n  int32 x = 1 [(v) = {\n    range: { lo: -1, hi: 9 }\n  }];\n}",
    );
    let option = &file.messages[0].fields[0].options[0];
    assert_eq!(
        option.value,
        OptionValue::Identifier("{\n    range: { lo: -1, hi: 9 }\n  }".to_string())
    );
}

// =============================================================================
// FILE-LEVEL DATA
// =============================================================================

#[test]
fn test_comments_collected() {
    let file = parse_source("// first\nmessage A {} /* second */");
    let texts: Vec<_> = file.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["// first", "/* second */"]);
}

#[test]
fn test_file_range_spans_source() {
    let file = parse_source("message A {}\n\n");
    assert_eq!(file.range.start, Position::new(0, 0));
    assert_eq!(file.range.end, Position::new(2, 0));
}

#[test]
fn test_empty_statements_ignored() {
    let file = parse_source(";;\nmessage A {};\n;");
    assert_eq!(file.messages.len(), 1);
    assert!(file.imports.is_empty());
}
