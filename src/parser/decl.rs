//! Declaration grammar: `import`, `const`, `var`, `type`, and signatures.

use crate::lexer::{Keyword, LiteralKind, OperatorKind, TokenKind};
use crate::parser::ast::DeclKind;
use crate::parser::parser::{ParseResult, Parser};

impl Parser<'_, '_> {
    pub(crate) fn parse_import_decl(&mut self) -> ParseResult<DeclKind> {
        self.expect_keyword(Keyword::Import, "import")?;
        self.parse_spec_group(|parser| parser.parse_import_spec())?;
        Ok(DeclKind::Import)
    }

    pub(crate) fn parse_value_decl(&mut self, keyword: Keyword) -> ParseResult<DeclKind> {
        self.expect_keyword(keyword, if keyword == Keyword::Const { "const" } else { "var" })?;
        if keyword == Keyword::Const {
            self.parse_spec_group(|parser| parser.parse_const_spec())?;
            Ok(DeclKind::Const)
        } else {
            self.parse_spec_group(|parser| parser.parse_var_spec())?;
            Ok(DeclKind::Var)
        }
    }

    pub(crate) fn parse_type_decl(&mut self) -> ParseResult<DeclKind> {
        self.expect_keyword(Keyword::Type, "type")?;
        self.parse_spec_group(|parser| parser.parse_type_spec())?;
        Ok(DeclKind::Type)
    }

    /// Parses one spec or a parenthesized, `;`-separated group of specs.
    fn parse_spec_group(
        &mut self,
        mut parse_spec: impl FnMut(&mut Self) -> ParseResult<()>,
    ) -> ParseResult<()> {
        if self.eat_operator(OperatorKind::LeftParen)?.is_none() {
            return parse_spec(self);
        }

        loop {
            match self.peek_kind(0)? {
                Some(TokenKind::Operator(OperatorKind::RightParen)) => break,
                Some(TokenKind::Semicolon(_)) => {
                    self.bump()?;
                    continue;
                }
                _ => {}
            }
            parse_spec(self)?;
            match self.peek_kind(0)? {
                Some(TokenKind::Semicolon(_)) => {
                    self.bump()?;
                }
                Some(TokenKind::Operator(OperatorKind::RightParen)) => break,
                _ => return Err(self.reject_next(&[";", ")"])),
            }
        }
        self.expect_operator(OperatorKind::RightParen, ")")?;
        Ok(())
    }

    fn parse_import_spec(&mut self) -> ParseResult<()> {
        match self.peek_kind(0)? {
            Some(TokenKind::Operator(OperatorKind::Period) | TokenKind::Identifier) => {
                self.bump()?;
            }
            _ => {}
        }
        match self.peek(0)? {
            Some(token) if token.kind == TokenKind::Literal(LiteralKind::String) => {
                self.bump()?;
                Ok(())
            }
            _ => Err(self.reject_next(&["import path"])),
        }
    }

    fn parse_const_spec(&mut self) -> ParseResult<()> {
        self.parse_identifier_list()?;
        if !self.at_operator(OperatorKind::Assign)? && self.can_start_type()? {
            self.parse_type()?;
        }
        if self.eat_operator(OperatorKind::Assign)?.is_some() {
            self.parse_expr_list()?;
        }
        Ok(())
    }

    fn parse_var_spec(&mut self) -> ParseResult<()> {
        self.parse_identifier_list()?;
        if self.eat_operator(OperatorKind::Assign)?.is_some() {
            self.parse_expr_list()?;
            return Ok(());
        }
        self.parse_type()?;
        if self.eat_operator(OperatorKind::Assign)?.is_some() {
            self.parse_expr_list()?;
        }
        Ok(())
    }

    fn parse_type_spec(&mut self) -> ParseResult<()> {
        self.expect_identifier()?;
        self.eat_operator(OperatorKind::Assign)?;
        self.parse_type()?;
        Ok(())
    }

    pub(crate) fn parse_identifier_list(&mut self) -> ParseResult<usize> {
        self.expect_identifier()?;
        let mut count = 1;
        while self.eat_operator(OperatorKind::Comma)?.is_some() {
            self.expect_identifier()?;
            count += 1;
        }
        Ok(count)
    }

    /// Parses parameters and an optional result.
    pub(crate) fn parse_signature(&mut self) -> ParseResult<()> {
        self.parse_parameters()?;
        self.parse_result()
    }

    pub(crate) fn parse_result(&mut self) -> ParseResult<()> {
        if self.at_operator(OperatorKind::LeftParen)? {
            return self.parse_parameters();
        }
        if self.can_start_type()? {
            self.parse_type()?;
        }
        Ok(())
    }

    /// Parses `( [ParameterDecl {, ParameterDecl} [,]] )`.
    ///
    /// Named and unnamed parameters are not cross-checked; `(a, b int)` and
    /// `(int, string)` both parse.
    pub(crate) fn parse_parameters(&mut self) -> ParseResult<()> {
        self.expect_operator(OperatorKind::LeftParen, "(")?;
        loop {
            if self.at_operator(OperatorKind::RightParen)? {
                break;
            }
            self.parse_parameter_decl()?;
            match self.peek_operator(0)? {
                Some(OperatorKind::Comma) => {
                    self.bump()?;
                }
                Some(OperatorKind::RightParen) => break,
                _ => return Err(self.reject_next(&[",", ")"])),
            }
        }
        self.expect_operator(OperatorKind::RightParen, ")")?;
        Ok(())
    }

    fn parse_parameter_decl(&mut self) -> ParseResult<()> {
        if self.eat_operator(OperatorKind::Ellipsis)?.is_some() {
            self.parse_type()?;
            return Ok(());
        }

        if self.peek_kind(0)? != Some(TokenKind::Identifier) {
            self.parse_type()?;
            return Ok(());
        }

        match self.peek_operator(1)? {
            Some(OperatorKind::Period) => {
                self.parse_type()?;
            }
            Some(OperatorKind::Comma | OperatorKind::RightParen) => {
                self.bump()?;
            }
            Some(OperatorKind::Ellipsis) => {
                self.bump()?;
                self.bump()?;
                self.parse_type()?;
            }
            _ => {
                self.bump()?;
                if self.peek_kind(0)?.is_some() {
                    self.parse_type()?;
                }
            }
        }
        Ok(())
    }
}
