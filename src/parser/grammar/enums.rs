//! Enum definitions.

use crate::parser::ast::{EnumDefinition, EnumValue};
use crate::parser::errors::ParseResult;
use crate::parser::parser::Parser;

impl Parser<'_> {
    /// Enum = "enum" Ident "{" ( Option | Reserved | EnumValue | ";" )* "}"
    pub(crate) fn parse_enum(&mut self) -> ParseResult<EnumDefinition> {
        let doc = self.leading_doc();
        let start = self.expect_keyword("enum")?.range.start;
        let name = self.expect_ident()?;
        let mut definition = EnumDefinition::new(name.text.to_string(), name.range);
        definition.doc = doc;
        self.expect_punct("{")?;

        while !self.at_eof() && !self.at_punct("}") {
            self.recover_member(|p| p.parse_enum_member(&mut definition));
        }
        self.eat_punct("}");

        definition.range = self.range_from(start);
        Ok(definition)
    }

    fn parse_enum_member(&mut self, definition: &mut EnumDefinition) -> ParseResult<()> {
        if self.eat_punct(";") {
            return Ok(());
        }
        // `option = 1;` would be a value named `option`.
        if self.at_keyword("option") && !self.nth_is_punct(1, "=") {
            definition.options.push(self.parse_option_statement()?);
        } else if self.at_keyword("reserved") && !self.nth_is_punct(1, "=") {
            definition.reserved.push(self.parse_reserved()?);
        } else {
            definition.values.push(self.parse_enum_value()?);
        }
        Ok(())
    }

    /// EnumValue = Ident "=" Int [ FieldOptions ] ";"
    fn parse_enum_value(&mut self) -> ParseResult<EnumValue> {
        let doc = self.leading_doc();
        let name = self.expect_ident()?;
        self.expect_punct("=")?;
        let (number, _) = self.expect_integer()?;
        let options = self.parse_field_options()?;
        self.expect_punct(";")?;
        let doc = doc.or_else(|| self.trailing_doc());

        Ok(EnumValue {
            name: name.text.to_string(),
            name_range: name.range,
            number,
            options,
            doc,
            range: self.range_from(name.range.start),
        })
    }
}
