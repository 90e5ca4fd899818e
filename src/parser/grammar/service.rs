//! Services and rpcs.

use crate::parser::ast::{RpcDefinition, ServiceDefinition};
use crate::parser::errors::ParseResult;
use crate::parser::lexer::TokenKind;
use crate::parser::parser::Parser;

impl Parser<'_> {
    /// Service = "service" Ident "{" ( Option | Rpc | ";" )* "}"
    pub(crate) fn parse_service(&mut self) -> ParseResult<ServiceDefinition> {
        let doc = self.leading_doc();
        let start = self.expect_keyword("service")?.range.start;
        let name = self.expect_ident()?;
        self.expect_punct("{")?;

        let mut service = ServiceDefinition {
            name: name.text.to_string(),
            name_range: name.range,
            rpcs: Vec::new(),
            options: Vec::new(),
            doc,
            range: name.range,
        };
        while !self.at_eof() && !self.at_punct("}") {
            self.recover_member(|p| {
                if p.eat_punct(";") {
                    return Ok(());
                }
                if p.at_keyword("option") {
                    service.options.push(p.parse_option_statement()?);
                } else {
                    service.rpcs.push(p.parse_rpc()?);
                }
                Ok(())
            });
        }
        self.eat_punct("}");

        service.range = self.range_from(start);
        Ok(service)
    }

    /// Rpc = "rpc" Ident "(" [ "stream" ] Type ")" "returns" "(" [ "stream" ] Type ")"
    ///       ( ";" | "{" ( Option | ";" )* "}" )
    fn parse_rpc(&mut self) -> ParseResult<RpcDefinition> {
        let doc = self.leading_doc();
        let start = self.expect_keyword("rpc")?.range.start;
        let name = self.expect_ident()?;

        self.expect_punct("(")?;
        let client_streaming = self.eat_stream_keyword();
        let input = self.expect_ident()?;
        self.expect_punct(")")?;

        self.expect_keyword("returns")?;

        self.expect_punct("(")?;
        let server_streaming = self.eat_stream_keyword();
        let output = self.expect_ident()?;
        self.expect_punct(")")?;

        let mut options = Vec::new();
        if self.eat_punct("{") {
            while !self.at_eof() && !self.at_punct("}") {
                self.recover_member(|p| {
                    if !p.eat_punct(";") {
                        options.push(p.parse_option_statement()?);
                    }
                    Ok(())
                });
            }
            self.expect_punct("}")?;
            // An optional `;` may follow the body.
            self.eat_punct(";");
        } else {
            self.expect_punct(";")?;
        }

        Ok(RpcDefinition {
            name: name.text.to_string(),
            name_range: name.range,
            input_type: input.text.to_string(),
            input_type_range: input.range,
            output_type: output.text.to_string(),
            output_type_range: output.range,
            client_streaming,
            server_streaming,
            options,
            doc,
            range: self.range_from(start),
        })
    }

    /// `stream` is a modifier only when a type name follows it.
    fn eat_stream_keyword(&mut self) -> bool {
        if self.at_keyword("stream") && self.nth_kind(1) == Some(TokenKind::Identifier) {
            self.advance();
            true
        } else {
            false
        }
    }
}
