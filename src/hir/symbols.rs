//! Symbol extraction from AST: pure functions that return symbols.
//!
//! [`extract_symbols`] walks one parsed file and returns every declaration
//! with its fully qualified name, plus every place a message or enum type is
//! named. Nothing is resolved here; reference sites keep the type text exactly
//! as written together with the scope it was written in, and resolution
//! happens lazily in [`super::resolve`].

use crate::base::{Location, Range};
use crate::parser::ast::{
    EnumDefinition, ExtendDefinition, FieldDefinition, MessageDefinition, ProtoFile,
    ServiceDefinition,
};

/// Builtin scalar type names. These never produce reference sites.
pub const SCALAR_TYPES: &[&str] = &[
    "double", "float", "int32", "int64", "uint32", "uint64", "sint32", "sint64", "fixed32",
    "fixed64", "sfixed32", "sfixed64", "bool", "string", "bytes",
];

/// Returns true for builtin scalar type names such as `int32` or `bytes`.
pub fn is_scalar_type(name: &str) -> bool {
    SCALAR_TYPES.contains(&name)
}

/// The kind of a declared symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    Message,
    Enum,
    EnumValue,
    Service,
    Rpc,
    Field,
    Oneof,
}

impl SymbolKind {
    /// Only messages and enums can appear where a type is expected.
    pub fn is_type(&self) -> bool {
        matches!(self, SymbolKind::Message | SymbolKind::Enum)
    }
}

/// A declaration registered in the workspace index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolInfo {
    pub kind: SymbolKind,
    /// Simple name (`Inner`)
    pub name: String,
    /// Package + enclosing scopes + name (`pkg.Outer.Inner`)
    pub full_name: String,
    /// Full name of the enclosing scope, or the package at top level.
    pub container_name: String,
    pub package: String,
    /// Where the name itself is written.
    pub location: Location,
    /// The whole declaration.
    pub range: Range,
}

impl SymbolInfo {
    pub fn uri(&self) -> &str {
        &self.location.uri
    }
}

/// Where a type name was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceKind {
    FieldType,
    MapKeyType,
    MapValueType,
    RpcInput,
    RpcOutput,
    ExtendTarget,
}

/// One usage of a type name, kept unresolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceSite {
    /// Type text as written, possibly dotted or root-anchored.
    pub written: String,
    pub uri: String,
    pub range: Range,
    /// The scope the name is resolved from.
    pub scope: String,
    pub kind: ReferenceKind,
}

impl ReferenceSite {
    pub fn location(&self) -> Location {
        Location::new(self.uri.clone(), self.range)
    }
}

/// Everything one file contributes to the index.
#[derive(Clone, Debug, Default)]
pub struct ExtractionResult {
    pub symbols: Vec<SymbolInfo>,
    pub references: Vec<ReferenceSite>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty() && self.references.is_empty()
    }
}

/// Join a scope and a simple name into a dotted name.
pub fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

/// The last dotted segment of a (possibly root-anchored) name.
pub fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Extract all symbols and type references from a parsed file.
pub fn extract_symbols(uri: &str, file: &ProtoFile) -> ExtractionResult {
    let mut extractor = Extractor {
        uri,
        package: file.package_name(),
        result: ExtractionResult::default(),
    };
    let package = file.package_name();

    for message in &file.messages {
        extractor.message(message, package);
    }
    for definition in &file.enums {
        extractor.enumeration(definition, package);
    }
    for service in &file.services {
        extractor.service(service, package);
    }
    for extend in &file.extends {
        extractor.extend(extend, package);
    }

    extractor.result
}

struct Extractor<'a> {
    uri: &'a str,
    package: &'a str,
    result: ExtractionResult,
}

impl Extractor<'_> {
    fn symbol(
        &mut self,
        kind: SymbolKind,
        name: &str,
        scope: &str,
        name_range: Range,
        range: Range,
    ) {
        self.result.symbols.push(SymbolInfo {
            kind,
            name: name.to_string(),
            full_name: qualify(scope, name),
            container_name: scope.to_string(),
            package: self.package.to_string(),
            location: Location::new(self.uri, name_range),
            range,
        });
    }

    fn reference(&mut self, written: &str, range: Range, scope: &str, kind: ReferenceKind) {
        if written.is_empty() || is_scalar_type(written) {
            return;
        }
        self.result.references.push(ReferenceSite {
            written: written.to_string(),
            uri: self.uri.to_string(),
            range,
            scope: scope.to_string(),
            kind,
        });
    }

    fn message(&mut self, message: &MessageDefinition, scope: &str) {
        let full_name = qualify(scope, &message.name);
        self.symbol(
            SymbolKind::Message,
            &message.name,
            scope,
            message.name_range,
            message.range,
        );

        for field in &message.fields {
            self.field(field, &full_name);
        }
        for map in &message.map_fields {
            self.symbol(SymbolKind::Field, &map.name, &full_name, map.name_range, map.range);
            self.reference(
                &map.key_type,
                map.key_type_range,
                &full_name,
                ReferenceKind::MapKeyType,
            );
            self.reference(
                &map.value_type,
                map.value_type_range,
                &full_name,
                ReferenceKind::MapValueType,
            );
        }
        for oneof in &message.oneofs {
            self.symbol(
                SymbolKind::Oneof,
                &oneof.name,
                &full_name,
                oneof.name_range,
                oneof.range,
            );
            // Oneof members belong to the message, not the oneof.
            for field in &oneof.fields {
                self.field(field, &full_name);
            }
        }
        for nested in &message.nested_messages {
            self.message(nested, &full_name);
        }
        for nested in &message.nested_enums {
            self.enumeration(nested, &full_name);
        }
        for extend in &message.extends {
            self.extend(extend, &full_name);
        }
    }

    /// Fields are named and resolve their type in the same scope.
    fn field(&mut self, field: &FieldDefinition, scope: &str) {
        self.symbol(
            SymbolKind::Field,
            &field.name,
            scope,
            field.name_range,
            field.range,
        );
        self.reference(
            &field.type_name,
            field.type_range,
            scope,
            ReferenceKind::FieldType,
        );
    }

    fn enumeration(&mut self, definition: &EnumDefinition, scope: &str) {
        let full_name = qualify(scope, &definition.name);
        self.symbol(
            SymbolKind::Enum,
            &definition.name,
            scope,
            definition.name_range,
            definition.range,
        );
        for value in &definition.values {
            self.symbol(
                SymbolKind::EnumValue,
                &value.name,
                &full_name,
                value.name_range,
                value.range,
            );
        }
    }

    fn service(&mut self, service: &ServiceDefinition, scope: &str) {
        let full_name = qualify(scope, &service.name);
        self.symbol(
            SymbolKind::Service,
            &service.name,
            scope,
            service.name_range,
            service.range,
        );
        for rpc in &service.rpcs {
            self.symbol(SymbolKind::Rpc, &rpc.name, &full_name, rpc.name_range, rpc.range);
            // Services declare no types, so rpc types resolve from the package.
            self.reference(&rpc.input_type, rpc.input_type_range, scope, ReferenceKind::RpcInput);
            self.reference(
                &rpc.output_type,
                rpc.output_type_range,
                scope,
                ReferenceKind::RpcOutput,
            );
        }
    }

    fn extend(&mut self, extend: &ExtendDefinition, scope: &str) {
        self.reference(
            &extend.extendee,
            extend.extendee_range,
            scope,
            ReferenceKind::ExtendTarget,
        );
        for field in &extend.fields {
            self.field(field, scope);
        }
    }
}
