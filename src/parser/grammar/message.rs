//! Messages and everything that can appear in a message body.

use crate::parser::ast::{
    ExtendDefinition, ExtensionsStatement, FieldDefinition, FieldModifier, MapFieldDefinition,
    MessageDefinition, NumberRange, OneofDefinition, RangeEnd, ReservedStatement,
};
use crate::parser::errors::ParseResult;
use crate::parser::lexer::TokenKind;
use crate::parser::parser::Parser;

use super::unquote;

impl Parser<'_> {
    /// Message = "message" Ident "{" MessageMember* "}"
    pub(crate) fn parse_message(&mut self) -> ParseResult<MessageDefinition> {
        let doc = self.leading_doc();
        let start = self.expect_keyword("message")?.range.start;
        let name = self.expect_ident()?;
        let mut message = MessageDefinition::new(name.text.to_string(), name.range);
        message.doc = doc;
        self.expect_punct("{")?;

        while !self.at_eof() && !self.at_punct("}") {
            self.recover_member(|p| p.parse_message_member(&mut message));
        }
        // A missing `}` at EOF still yields the message.
        self.eat_punct("}");

        message.range = self.range_from(start);
        Ok(message)
    }

    fn parse_message_member(&mut self, message: &mut MessageDefinition) -> ParseResult<()> {
        let Some(token) = self.peek() else {
            return Ok(());
        };
        if token.is_punct(";") {
            self.advance();
            return Ok(());
        }

        match token.text.as_str() {
            "message" => message.nested_messages.push(self.parse_message()?),
            "enum" => message.nested_enums.push(self.parse_enum()?),
            "oneof" => message.oneofs.push(self.parse_oneof()?),
            "map" if self.nth_is_punct(1, "<") => message.map_fields.push(self.parse_map_field()?),
            "option" => message.options.push(self.parse_option_statement()?),
            "reserved" => message.reserved.push(self.parse_reserved()?),
            "extensions" => message.extensions.push(self.parse_extensions()?),
            "extend" => message.extends.push(self.parse_extend()?),
            _ => message.fields.push(self.parse_field()?),
        }
        Ok(())
    }

    /// Field = [ Modifier ] Type Ident "=" Int [ FieldOptions ] ";"
    pub(crate) fn parse_field(&mut self) -> ParseResult<FieldDefinition> {
        let doc = self.leading_doc();
        let Some(first) = self.peek() else {
            return Err(self.unexpected("field"));
        };
        let start = first.range.start;

        // `optional` is only a modifier when a type and a name follow it.
        let modifier = if first.kind == TokenKind::Identifier
            && self.nth_kind(1) == Some(TokenKind::Identifier)
            && self.nth_kind(2) == Some(TokenKind::Identifier)
        {
            FieldModifier::from_keyword(&first.text)
        } else {
            None
        };
        if modifier.is_some() {
            self.advance();
        }

        let type_token = self.expect_ident()?;
        let name = self.expect_ident()?;
        self.expect_punct("=")?;
        let (number, _) = self.expect_integer()?;
        let options = self.parse_field_options()?;
        self.expect_punct(";")?;
        let doc = doc.or_else(|| self.trailing_doc());

        Ok(FieldDefinition {
            modifier,
            type_name: type_token.text.to_string(),
            type_range: type_token.range,
            name: name.text.to_string(),
            name_range: name.range,
            number,
            options,
            doc,
            range: self.range_from(start),
        })
    }

    /// MapField = "map" "<" KeyType "," Type ">" Ident "=" Int [ FieldOptions ] ";"
    fn parse_map_field(&mut self) -> ParseResult<MapFieldDefinition> {
        let doc = self.leading_doc();
        let start = self.expect_keyword("map")?.range.start;
        self.expect_punct("<")?;
        let key = self.expect_ident()?;
        self.expect_punct(",")?;
        let value = self.expect_ident()?;
        self.expect_punct(">")?;
        let name = self.expect_ident()?;
        self.expect_punct("=")?;
        let (number, _) = self.expect_integer()?;
        let options = self.parse_field_options()?;
        self.expect_punct(";")?;
        let doc = doc.or_else(|| self.trailing_doc());

        Ok(MapFieldDefinition {
            key_type: key.text.to_string(),
            key_type_range: key.range,
            value_type: value.text.to_string(),
            value_type_range: value.range,
            name: name.text.to_string(),
            name_range: name.range,
            number,
            options,
            doc,
            range: self.range_from(start),
        })
    }

    /// Oneof = "oneof" Ident "{" ( Option | Field | ";" )* "}"
    fn parse_oneof(&mut self) -> ParseResult<OneofDefinition> {
        let doc = self.leading_doc();
        let start = self.expect_keyword("oneof")?.range.start;
        let name = self.expect_ident()?;
        self.expect_punct("{")?;

        let mut oneof = OneofDefinition {
            name: name.text.to_string(),
            name_range: name.range,
            fields: Vec::new(),
            options: Vec::new(),
            doc,
            range: name.range,
        };
        while !self.at_eof() && !self.at_punct("}") {
            self.recover_member(|p| {
                if p.eat_punct(";") {
                    Ok(())
                } else if p.at_keyword("option") {
                    oneof.options.push(p.parse_option_statement()?);
                    Ok(())
                } else {
                    oneof.fields.push(p.parse_field()?);
                    Ok(())
                }
            });
        }
        self.eat_punct("}");

        oneof.range = self.range_from(start);
        Ok(oneof)
    }

    /// Reserved = "reserved" ( Range | String | Ident ) ( "," ... )* ";"
    ///
    /// Bare identifiers are the edition spelling of reserved names.
    pub(crate) fn parse_reserved(&mut self) -> ParseResult<ReservedStatement> {
        let start = self.expect_keyword("reserved")?.range.start;
        let mut ranges = Vec::new();
        let mut names = Vec::new();

        loop {
            match self.peek().map(|t| (t.kind, t)) {
                Some((TokenKind::String, token)) => {
                    self.advance();
                    names.push(unquote(&token.text));
                }
                Some((TokenKind::Identifier, token)) => {
                    self.advance();
                    names.push(token.text.to_string());
                }
                Some((TokenKind::Number, _)) => ranges.push(self.parse_number_range()?),
                _ => return Err(self.unexpected("reserved range or name")),
            }
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(";")?;

        Ok(ReservedStatement {
            ranges,
            names,
            range: self.range_from(start),
        })
    }

    /// Extensions = "extensions" Range ( "," Range )* [ FieldOptions ] ";"
    fn parse_extensions(&mut self) -> ParseResult<ExtensionsStatement> {
        let start = self.expect_keyword("extensions")?.range.start;
        let mut ranges = vec![self.parse_number_range()?];
        while self.eat_punct(",") {
            ranges.push(self.parse_number_range()?);
        }
        let options = self.parse_field_options()?;
        self.expect_punct(";")?;

        Ok(ExtensionsStatement {
            ranges,
            options,
            range: self.range_from(start),
        })
    }

    /// Range = Int [ "to" ( Int | "max" ) ]
    fn parse_number_range(&mut self) -> ParseResult<NumberRange> {
        let (start, _) = self.expect_integer()?;
        if !self.eat_keyword("to") {
            return Ok(NumberRange::single(start));
        }
        if self.eat_keyword("max") {
            return Ok(NumberRange {
                start,
                end: RangeEnd::Max,
            });
        }
        let (end, _) = self.expect_integer()?;
        Ok(NumberRange::new(start, end))
    }

    /// Extend = "extend" Type "{" ( Field | ";" )* "}"
    pub(crate) fn parse_extend(&mut self) -> ParseResult<ExtendDefinition> {
        let start = self.expect_keyword("extend")?.range.start;
        let extendee = self.expect_ident()?;
        self.expect_punct("{")?;

        let mut fields = Vec::new();
        while !self.at_eof() && !self.at_punct("}") {
            self.recover_member(|p| {
                if !p.eat_punct(";") {
                    fields.push(p.parse_field()?);
                }
                Ok(())
            });
        }
        self.eat_punct("}");

        Ok(ExtendDefinition {
            extendee: extendee.text.to_string(),
            extendee_range: extendee.range,
            fields,
            range: self.range_from(start),
        })
    }
}
