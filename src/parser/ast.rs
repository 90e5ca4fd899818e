//! Typed AST for `.proto` files.
//!
//! Every node owns its children by value. No node stores a link to its parent;
//! the enclosing scope of a position is recomputed by walking the tree from the
//! root (see [`ProtoFile::message_path_at`]).
//!
//! Each named construct carries a `name_range` in addition to its overall
//! `range` so hover and rename can target just the identifier.

use crate::base::{Position, Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProtoFile {
    pub uri: String,
    pub syntax: Option<SyntaxDeclaration>,
    pub package: Option<PackageDeclaration>,
    pub imports: Vec<ImportStatement>,
    pub options: Vec<OptionStatement>,
    pub messages: Vec<MessageDefinition>,
    pub enums: Vec<EnumDefinition>,
    pub services: Vec<ServiceDefinition>,
    pub extends: Vec<ExtendDefinition>,
    pub comments: Vec<Comment>,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SyntaxKeyword {
    Syntax,
    Edition,
}

/// `syntax = "proto3";` or `edition = "2023";`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyntaxDeclaration {
    pub keyword: SyntaxKeyword,
    /// The literal exactly as written, without quotes.
    pub version: String,
    pub version_range: Range,
    pub range: Range,
}

impl SyntaxDeclaration {
    pub fn is_edition(&self) -> bool {
        self.keyword == SyntaxKeyword::Edition
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackageDeclaration {
    pub name: String,
    pub name_range: Range,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ImportModifier {
    Weak,
    Public,
}

impl ImportModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportModifier::Weak => "weak",
            ImportModifier::Public => "public",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImportStatement {
    pub path: String,
    pub path_range: Range,
    pub modifier: Option<ImportModifier>,
    pub range: Range,
}

/// A literal on the right-hand side of an option.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptionValue {
    String(String),
    Number(f64),
    Boolean(bool),
    /// A bare word such as an enum constant, or an aggregate `{ ... }` value
    /// kept as its raw text.
    Identifier(String),
}

/// `option java_package = "com.example";` and friends.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionStatement {
    pub name: String,
    pub name_range: Range,
    pub value: OptionValue,
    pub range: Range,
}

/// One `name = value` entry of a bracketed option list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldOption {
    pub name: String,
    pub name_range: Range,
    pub value: OptionValue,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldModifier {
    Optional,
    Required,
    Repeated,
}

impl FieldModifier {
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "optional" => Some(FieldModifier::Optional),
            "required" => Some(FieldModifier::Required),
            "repeated" => Some(FieldModifier::Repeated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldModifier::Optional => "optional",
            FieldModifier::Required => "required",
            FieldModifier::Repeated => "repeated",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldDefinition {
    pub modifier: Option<FieldModifier>,
    pub type_name: String,
    pub type_range: Range,
    pub name: String,
    pub name_range: Range,
    pub number: i64,
    pub options: Vec<FieldOption>,
    pub doc: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapFieldDefinition {
    pub key_type: String,
    pub key_type_range: Range,
    pub value_type: String,
    pub value_type_range: Range,
    pub name: String,
    pub name_range: Range,
    pub number: i64,
    pub options: Vec<FieldOption>,
    pub doc: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OneofDefinition {
    pub name: String,
    pub name_range: Range,
    pub fields: Vec<FieldDefinition>,
    pub options: Vec<OptionStatement>,
    pub doc: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MessageDefinition {
    pub name: String,
    pub name_range: Range,
    pub fields: Vec<FieldDefinition>,
    pub nested_messages: Vec<MessageDefinition>,
    pub nested_enums: Vec<EnumDefinition>,
    pub oneofs: Vec<OneofDefinition>,
    pub options: Vec<OptionStatement>,
    pub reserved: Vec<ReservedStatement>,
    pub extensions: Vec<ExtensionsStatement>,
    pub map_fields: Vec<MapFieldDefinition>,
    pub extends: Vec<ExtendDefinition>,
    pub doc: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValue {
    pub name: String,
    pub name_range: Range,
    pub number: i64,
    pub options: Vec<FieldOption>,
    pub doc: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumDefinition {
    pub name: String,
    pub name_range: Range,
    pub values: Vec<EnumValue>,
    pub options: Vec<OptionStatement>,
    pub reserved: Vec<ReservedStatement>,
    pub doc: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RpcDefinition {
    pub name: String,
    pub name_range: Range,
    pub input_type: String,
    pub input_type_range: Range,
    pub output_type: String,
    pub output_type_range: Range,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub options: Vec<OptionStatement>,
    pub doc: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServiceDefinition {
    pub name: String,
    pub name_range: Range,
    pub rpcs: Vec<RpcDefinition>,
    pub options: Vec<OptionStatement>,
    pub doc: Option<String>,
    pub range: Range,
}

/// `extend Foo { ... }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtendDefinition {
    pub extendee: String,
    pub extendee_range: Range,
    pub fields: Vec<FieldDefinition>,
    pub range: Range,
}

/// Upper bound of a reserved/extension range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RangeEnd {
    Number(i64),
    /// The `max` keyword: unbounded.
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberRange {
    pub start: i64,
    pub end: RangeEnd,
}

impl NumberRange {
    pub fn single(number: i64) -> Self {
        Self {
            start: number,
            end: RangeEnd::Number(number),
        }
    }

    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end: RangeEnd::Number(end),
        }
    }

    pub fn contains(&self, number: i64) -> bool {
        match self.end {
            RangeEnd::Number(end) => self.start <= number && number <= end,
            RangeEnd::Max => self.start <= number,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReservedStatement {
    pub ranges: Vec<NumberRange>,
    pub names: Vec<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtensionsStatement {
    pub ranges: Vec<NumberRange>,
    pub options: Vec<FieldOption>,
    pub range: Range,
}

/// A comment token preserved from the source.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Comment {
    pub text: String,
    pub range: Range,
}

impl ProtoFile {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    pub fn package_name(&self) -> &str {
        self.package.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }

    /// The chain of messages whose ranges contain `position`, outermost first.
    pub fn message_path_at(&self, position: Position) -> Vec<&MessageDefinition> {
        let mut path = Vec::new();
        let mut candidates = &self.messages;
        while let Some(message) = candidates.iter().find(|m| m.range.contains(position)) {
            path.push(message);
            candidates = &message.nested_messages;
        }
        path
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
            && self.enums.is_empty()
            && self.services.is_empty()
            && self.extends.is_empty()
    }
}

impl MessageDefinition {
    pub fn new(name: impl Into<String>, name_range: Range) -> Self {
        Self {
            name: name.into(),
            name_range,
            fields: Vec::new(),
            nested_messages: Vec::new(),
            nested_enums: Vec::new(),
            oneofs: Vec::new(),
            options: Vec::new(),
            reserved: Vec::new(),
            extensions: Vec::new(),
            map_fields: Vec::new(),
            extends: Vec::new(),
            doc: None,
            range: name_range,
        }
    }

    /// Direct fields plus the fields declared inside this message's oneofs.
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields
            .iter()
            .chain(self.oneofs.iter().flat_map(|o| o.fields.iter()))
    }

    pub fn is_reserved_number(&self, number: i64) -> bool {
        self.reserved
            .iter()
            .any(|r| r.ranges.iter().any(|range| range.contains(number)))
    }

    pub fn is_reserved_name(&self, name: &str) -> bool {
        self.reserved
            .iter()
            .any(|r| r.names.iter().any(|n| n == name))
    }
}

impl EnumDefinition {
    pub fn new(name: impl Into<String>, name_range: Range) -> Self {
        Self {
            name: name.into(),
            name_range,
            values: Vec::new(),
            options: Vec::new(),
            reserved: Vec::new(),
            doc: None,
            range: name_range,
        }
    }
}

impl ServiceDefinition {
    pub fn rpc(&self, name: &str) -> Option<&RpcDefinition> {
        self.rpcs.iter().find(|r| r.name == name)
    }
}
