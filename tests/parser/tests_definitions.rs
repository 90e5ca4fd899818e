//! Definition tests: messages, fields, maps, oneofs, reserved, enums,
//! services and extend blocks.

use protols::Range;
use protols::parser::{FieldModifier, NumberRange, OptionValue, RangeEnd};

use crate::helpers::analyzer_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// MESSAGES AND FIELDS
// =============================================================================

#[test]
fn test_field_ranges() {
    let file = parse_source("message User {\n  string name = 1;\n}");
    let message = &file.messages[0];
    assert_eq!(message.name_range, Range::from_coords(0, 8, 0, 12));
    assert_eq!(message.range, Range::from_coords(0, 0, 2, 1));

    let field = &message.fields[0];
    assert_eq!(field.type_name, "string");
    assert_eq!(field.type_range, Range::from_coords(1, 2, 1, 8));
    assert_eq!(field.name, "name");
    assert_eq!(field.name_range, Range::from_coords(1, 9, 1, 13));
    assert_eq!(field.number, 1);
    assert_eq!(field.range, Range::from_coords(1, 2, 1, 18));
}

#[test]
fn test_field_modifiers() {
    let file = parse_source(
        "message M {\n  optional int32 a = 1;\n  required B b = 2;\n  repeated .pkg.C c = 3;\n  D d = 4;\n}",
    );
    let fields: Vec<_> = file.messages[0]
        .fields
        .iter()
        .map(|f| (f.modifier, f.type_name.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            (Some(FieldModifier::Optional), "int32"),
            (Some(FieldModifier::Required), "B"),
            (Some(FieldModifier::Repeated), ".pkg.C"),
            (None, "D"),
        ]
    );
}

#[test]
fn test_field_named_like_a_modifier() {
    let file = parse_source("message M { optional optional = 1; }");
    let field = &file.messages[0].fields[0];
    assert_eq!(field.modifier, None);
    assert_eq!(field.type_name, "optional");
    assert_eq!(field.name, "optional");
}

#[test]
fn test_field_options() {
    let file =
        parse_source("message M { int32 old = 1 [deprecated = true, (custom.opt) = \"x\"]; }");
    let options = &file.messages[0].fields[0].options;
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].name, "deprecated");
    assert_eq!(options[0].value, OptionValue::Boolean(true));
    assert_eq!(options[1].name, "(custom.opt)");
}

#[test]
fn test_map_field() {
    let file = parse_source(FULL_SERVICE);
    let request = file
        .messages
        .iter()
        .find(|m| m.name == "StartRequest")
        .expect("StartRequest");
    let map = &request.map_fields[0];
    assert_eq!(map.key_type, "string");
    assert_eq!(map.value_type, "Item");
    assert_eq!(map.name, "items");
    assert_eq!(map.number, 1);
}

#[test]
fn test_oneof_fields() {
    let file = parse_source(FULL_SERVICE);
    let request = file
        .messages
        .iter()
        .find(|m| m.name == "StartRequest")
        .expect("StartRequest");
    let oneof = &request.oneofs[0];
    assert_eq!(oneof.name, "payment");
    let names: Vec<_> = oneof.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["card", "voucher"]);
    assert_eq!(request.all_fields().count(), 2);
}

#[test]
fn test_reserved_ranges_and_names() {
    let file =
        parse_source("message M {\n  reserved 2, 15, 9 to 11;\n  reserved \"foo\", \"bar\";\n}");
    let message = &file.messages[0];
    assert_eq!(
        message.reserved[0].ranges,
        vec![
            NumberRange::single(2),
            NumberRange::single(15),
            NumberRange::new(9, 11)
        ]
    );
    assert_eq!(message.reserved[1].names, vec!["foo", "bar"]);
    assert!(message.is_reserved_number(10));
    assert!(!message.is_reserved_number(12));
    assert!(message.is_reserved_name("bar"));
}

#[test]
fn test_reserved_bare_names_in_editions() {
    let file = parse_source("edition = \"2023\";\nmessage M { reserved foo, bar; }");
    assert_eq!(file.messages[0].reserved[0].names, vec!["foo", "bar"]);
}

#[test]
fn test_extensions_to_max() {
    let file = parse_source(
        "message M { extensions 100 to max; extensions 5, 7 to 9 [verification = UNVERIFIED]; }",
    );
    let extensions = &file.messages[0].extensions;
    assert_eq!(extensions[0].ranges[0].end, RangeEnd::Max);
    assert!(extensions[0].ranges[0].contains(1_000_000));
    assert_eq!(extensions[1].ranges.len(), 2);
    assert_eq!(extensions[1].options[0].name, "verification");
}

#[test]
fn test_nested_definitions() {
    let file = parse_source(
        "message Outer {\n  message Inner { int32 x = 1; }\n  enum Kind { A = 0; }\n  Inner inner = 1;\n}",
    );
    let outer = &file.messages[0];
    assert_eq!(outer.nested_messages[0].name, "Inner");
    assert_eq!(outer.nested_enums[0].name, "Kind");
    assert_eq!(outer.fields[0].type_name, "Inner");
}

#[test]
fn test_message_options() {
    let file = parse_source("message M { option deprecated = true; int32 a = 1; }");
    let message = &file.messages[0];
    assert_eq!(message.options[0].name, "deprecated");
    assert_eq!(message.fields.len(), 1);
}

#[test]
fn test_proto2_group_is_skipped_not_fatal() {
    let file = parse_source(
        "syntax = \"proto2\";\nmessage M {\n  optional group Result = 1 {\n    required string url = 2;\n  }\n  optional int32 after = 3;\n}",
    );
    let message = &file.messages[0];
    let names: Vec<_> = message.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["after"]);
}

// =============================================================================
// ENUMS
// =============================================================================

#[test]
fn test_enum_values_and_options() {
    let file = parse_source(FULL_SERVICE);
    let status = &file.enums[0];
    assert_eq!(status.name, "Status");
    assert_eq!(status.options[0].name, "allow_alias");
    let values: Vec<_> = status
        .values
        .iter()
        .map(|v| (v.name.as_str(), v.number))
        .collect();
    assert_eq!(values, vec![("STATUS_UNSPECIFIED", 0), ("STATUS_OK", 1)]);
    assert_eq!(status.values[1].options[0].name, "deprecated");
    assert_eq!(status.reserved[0].ranges, vec![NumberRange::new(5, 7)]);
    assert_eq!(status.value("STATUS_OK").map(|v| v.number), Some(1));
}

#[test]
fn test_negative_and_hex_enum_values() {
    let file = parse_source("enum E { NEG = -1; HEX = 0x10; }");
    let numbers: Vec<_> = file.enums[0].values.iter().map(|v| v.number).collect();
    assert_eq!(numbers, vec![-1, 16]);
}

// =============================================================================
// SERVICES
// =============================================================================

#[test]
fn test_rpc_streaming_flags() {
    let file = parse_source(FULL_SERVICE);
    let service = &file.services[0];
    assert_eq!(service.name, "Checkout");
    assert_eq!(service.options[0].name, "deprecated");

    let start = service.rpc("Start").expect("Start rpc");
    assert_eq!(start.input_type, "StartRequest");
    assert_eq!(start.output_type, "StartReply");
    assert!(!start.client_streaming && !start.server_streaming);

    let stream = service.rpc("Stream").expect("Stream rpc");
    assert!(stream.client_streaming && stream.server_streaming);
    assert_eq!(stream.input_type, "Item");
    assert_eq!(stream.options[0].name, "(shop.v1.idempotent)");
}

#[test]
fn test_message_named_stream() {
    let file = parse_source("service S { rpc Get(stream) returns (Reply); }");
    let rpc = &file.services[0].rpcs[0];
    assert!(!rpc.client_streaming);
    assert_eq!(rpc.input_type, "stream");
}

#[test]
fn test_rpc_type_ranges() {
    let file = parse_source("service S {\n  rpc Get(Req) returns (Rep);\n}");
    let rpc = &file.services[0].rpcs[0];
    assert_eq!(rpc.name_range, Range::from_coords(1, 6, 1, 9));
    assert_eq!(rpc.input_type_range, Range::from_coords(1, 10, 1, 13));
    assert_eq!(rpc.output_type_range, Range::from_coords(1, 24, 1, 27));
}

// =============================================================================
// EXTEND
// =============================================================================

#[test]
fn test_top_level_and_nested_extend() {
    let file = parse_source(
        "extend google.protobuf.FieldOptions {\n  string label = 50000;\n}\nmessage M {\n  extend Base { int32 extra = 100; }\n}",
    );
    assert_eq!(file.extends[0].extendee, "google.protobuf.FieldOptions");
    assert_eq!(file.extends[0].fields[0].name, "label");
    assert_eq!(file.messages[0].extends[0].extendee, "Base");
}

// =============================================================================
// DOC COMMENTS
// =============================================================================

#[test]
fn test_leading_doc_comment() {
    let file = parse_source(USER_PROTO);
    assert_eq!(file.messages[0].doc.as_deref(), Some("A registered user."));
}

#[test]
fn test_block_doc_on_service() {
    let file = parse_source(FULL_SERVICE);
    assert_eq!(file.services[0].doc.as_deref(), Some("Checkout flow."));
}

#[test]
fn test_trailing_doc_on_field() {
    let file = parse_source("message M {\n  int32 a = 1; // the a\n  int32 b = 2;\n}");
    let fields = &file.messages[0].fields;
    assert_eq!(fields[0].doc.as_deref(), Some("the a"));
    assert_eq!(fields[1].doc, None);
}

#[test]
fn test_detached_comment_is_not_doc() {
    let file = parse_source("// detached\n\nmessage M {}");
    assert_eq!(file.messages[0].doc, None);
}
