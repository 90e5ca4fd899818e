//! Top-level statements.

use crate::parser::ast::{
    ImportModifier, ImportStatement, PackageDeclaration, ProtoFile, SyntaxDeclaration,
    SyntaxKeyword,
};
use crate::parser::errors::ParseResult;
use crate::parser::lexer::TokenKind;
use crate::parser::parser::Parser;

use super::unquote;

impl Parser<'_> {
    /// TopLevel = Syntax | Edition | Package | Import | Option | Message
    ///          | Enum | Service | Extend | ";"
    pub(crate) fn parse_top_level(&mut self, file: &mut ProtoFile) -> ParseResult<()> {
        let Some(token) = self.peek() else {
            return Ok(());
        };

        if token.is_punct(";") {
            self.advance();
            return Ok(());
        }
        if token.kind != TokenKind::Identifier {
            return Err(self.unexpected("top-level declaration"));
        }

        match token.text.as_str() {
            "syntax" | "edition" => {
                let declaration = self.parse_syntax()?;
                // Only the first declaration counts; they are mutually exclusive.
                if file.syntax.is_none() {
                    file.syntax = Some(declaration);
                }
            }
            "package" => {
                let package = self.parse_package()?;
                if file.package.is_none() {
                    file.package = Some(package);
                }
            }
            "import" => file.imports.push(self.parse_import()?),
            "option" => file.options.push(self.parse_option_statement()?),
            "message" => file.messages.push(self.parse_message()?),
            "enum" => file.enums.push(self.parse_enum()?),
            "service" => file.services.push(self.parse_service()?),
            "extend" => file.extends.push(self.parse_extend()?),
            _ => return Err(self.unexpected("top-level declaration")),
        }
        Ok(())
    }

    /// Syntax = ( "syntax" | "edition" ) "=" String ";"
    fn parse_syntax(&mut self) -> ParseResult<SyntaxDeclaration> {
        let keyword_token = self.expect_ident()?;
        let keyword = if keyword_token.text == "edition" {
            SyntaxKeyword::Edition
        } else {
            SyntaxKeyword::Syntax
        };
        self.expect_punct("=")?;
        let literal = self.expect_string()?;
        self.expect_punct(";")?;
        Ok(SyntaxDeclaration {
            keyword,
            version: unquote(&literal.text),
            version_range: literal.range,
            range: self.range_from(keyword_token.range.start),
        })
    }

    /// Package = "package" FullIdent ";"
    fn parse_package(&mut self) -> ParseResult<PackageDeclaration> {
        let start = self.expect_keyword("package")?.range.start;
        let name = self.expect_ident()?;
        self.expect_punct(";")?;
        Ok(PackageDeclaration {
            name: name.text.to_string(),
            name_range: name.range,
            range: self.range_from(start),
        })
    }

    /// Import = "import" [ "weak" | "public" ] String ";"
    fn parse_import(&mut self) -> ParseResult<ImportStatement> {
        let start = self.expect_keyword("import")?.range.start;
        let modifier = if self.eat_keyword("weak") {
            Some(ImportModifier::Weak)
        } else if self.eat_keyword("public") {
            Some(ImportModifier::Public)
        } else {
            None
        };
        let path = self.expect_string()?;
        self.expect_punct(";")?;
        Ok(ImportStatement {
            path: unquote(&path.text),
            path_range: path.range,
            modifier,
            range: self.range_from(start),
        })
    }
}
