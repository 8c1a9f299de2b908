//! Type grammar.

use crate::lexer::{Keyword, LiteralKind, OperatorKind, TokenKind};
use crate::parser::ast::ExprShape;
use crate::parser::parser::{ParseResult, Parser};

impl Parser<'_, '_> {
    /// Returns `true` when the next token can begin a type.
    pub(crate) fn can_start_type(&mut self) -> ParseResult<bool> {
        Ok(match self.peek_kind(0)? {
            Some(TokenKind::Identifier) => true,
            Some(TokenKind::Operator(operator)) => matches!(
                operator,
                OperatorKind::Mul
                    | OperatorKind::LeftBracket
                    | OperatorKind::LeftParen
                    | OperatorKind::Arrow
            ),
            Some(TokenKind::Keyword(keyword)) => matches!(
                keyword,
                Keyword::Map | Keyword::Chan | Keyword::Func | Keyword::Struct | Keyword::Interface
            ),
            _ => false,
        })
    }

    pub(crate) fn parse_type(&mut self) -> ParseResult<ExprShape> {
        self.nested(|parser| parser.parse_type_inner())
    }

    fn parse_type_inner(&mut self) -> ParseResult<ExprShape> {
        let Some(token) = self.peek(0)? else {
            return Err(self.end_of_input(&["type"]));
        };

        match token.kind {
            TokenKind::Identifier => self.parse_type_name(),
            TokenKind::Operator(OperatorKind::Mul) => {
                self.bump()?;
                self.parse_type()?;
                Ok(ExprShape::Other)
            }
            TokenKind::Operator(OperatorKind::LeftParen) => {
                self.bump()?;
                self.parse_type()?;
                self.expect_operator(OperatorKind::RightParen, ")")?;
                Ok(ExprShape::Other)
            }
            TokenKind::Operator(OperatorKind::LeftBracket) => self.parse_array_or_slice_type(false),
            TokenKind::Operator(OperatorKind::Arrow) => {
                self.bump()?;
                self.expect_keyword(Keyword::Chan, "chan")?;
                self.parse_type()?;
                Ok(ExprShape::Other)
            }
            TokenKind::Keyword(Keyword::Chan) => {
                self.bump()?;
                self.eat_operator(OperatorKind::Arrow)?;
                self.parse_type()?;
                Ok(ExprShape::Other)
            }
            TokenKind::Keyword(Keyword::Map) => self.parse_map_type(),
            TokenKind::Keyword(Keyword::Func) => {
                self.bump()?;
                self.parse_signature()?;
                Ok(ExprShape::Other)
            }
            TokenKind::Keyword(Keyword::Struct) => self.parse_struct_type(),
            TokenKind::Keyword(Keyword::Interface) => self.parse_interface_type(),
            _ => Err(self.unexpected(&token, &["type"])),
        }
    }

    /// `Name` or `pkg.Name`.
    fn parse_type_name(&mut self) -> ParseResult<ExprShape> {
        self.expect_identifier()?;
        if self.eat_operator(OperatorKind::Period)?.is_some() {
            self.expect_identifier()?;
            return Ok(ExprShape::QualifiedName);
        }
        Ok(ExprShape::Identifier)
    }

    /// `[]T`, `[N]T`, and, where a composite literal follows, `[...]T`.
    pub(crate) fn parse_array_or_slice_type(&mut self, allow_ellipsis: bool) -> ParseResult<ExprShape> {
        self.expect_operator(OperatorKind::LeftBracket, "[")?;
        match self.peek_operator(0)? {
            Some(OperatorKind::RightBracket) => {}
            Some(OperatorKind::Ellipsis) if allow_ellipsis => {
                self.bump()?;
            }
            _ => {
                self.bracketed(|parser| parser.parse_expr())?;
            }
        }
        self.expect_operator(OperatorKind::RightBracket, "]")?;
        self.parse_type()?;
        Ok(ExprShape::LiteralType)
    }

    pub(crate) fn parse_map_type(&mut self) -> ParseResult<ExprShape> {
        self.expect_keyword(Keyword::Map, "map")?;
        self.expect_operator(OperatorKind::LeftBracket, "[")?;
        self.parse_type()?;
        self.expect_operator(OperatorKind::RightBracket, "]")?;
        self.parse_type()?;
        Ok(ExprShape::LiteralType)
    }

    pub(crate) fn parse_struct_type(&mut self) -> ParseResult<ExprShape> {
        self.expect_keyword(Keyword::Struct, "struct")?;
        self.expect_operator(OperatorKind::LeftBrace, "{")?;
        self.parse_member_list(|parser| parser.parse_field_decl())?;
        self.expect_operator(OperatorKind::RightBrace, "}")?;
        Ok(ExprShape::LiteralType)
    }

    pub(crate) fn parse_interface_type(&mut self) -> ParseResult<ExprShape> {
        self.expect_keyword(Keyword::Interface, "interface")?;
        self.expect_operator(OperatorKind::LeftBrace, "{")?;
        self.parse_member_list(|parser| parser.parse_interface_elem())?;
        self.expect_operator(OperatorKind::RightBrace, "}")?;
        Ok(ExprShape::Other)
    }

    /// Parses `;`-separated members up to (not including) `}`.
    fn parse_member_list(
        &mut self,
        mut parse_member: impl FnMut(&mut Self) -> ParseResult<()>,
    ) -> ParseResult<()> {
        loop {
            match self.peek_kind(0)? {
                Some(TokenKind::Operator(OperatorKind::RightBrace)) => return Ok(()),
                Some(TokenKind::Semicolon(_)) => {
                    self.bump()?;
                    continue;
                }
                _ => {}
            }
            parse_member(self)?;
            match self.peek_kind(0)? {
                Some(TokenKind::Semicolon(_)) => {
                    self.bump()?;
                }
                Some(TokenKind::Operator(OperatorKind::RightBrace)) => return Ok(()),
                _ => return Err(self.reject_next(&[";", "}"])),
            }
        }
    }

    fn parse_field_decl(&mut self) -> ParseResult<()> {
        match self.peek_kind(0)? {
            Some(TokenKind::Operator(OperatorKind::Mul)) => {
                self.bump()?;
                self.parse_type_name()?;
            }
            Some(TokenKind::Identifier) => match self.peek_kind(1)? {
                Some(TokenKind::Operator(OperatorKind::Period)) => {
                    self.parse_type_name()?;
                }
                Some(
                    TokenKind::Semicolon(_)
                    | TokenKind::Operator(OperatorKind::RightBrace)
                    | TokenKind::Literal(LiteralKind::String),
                ) => {
                    self.bump()?;
                }
                _ => {
                    self.parse_identifier_list()?;
                    self.parse_type()?;
                }
            },
            _ => return Err(self.reject_next(&["field name", "embedded type"])),
        }

        if self.peek_kind(0)? == Some(TokenKind::Literal(LiteralKind::String)) {
            self.bump()?;
        }
        Ok(())
    }

    /// Method spec, embedded type, or type union (`~int | string`).
    fn parse_interface_elem(&mut self) -> ParseResult<()> {
        if self.peek_kind(0)? == Some(TokenKind::Identifier)
            && self.peek_operator(1)? == Some(OperatorKind::LeftParen)
        {
            self.bump()?;
            return self.parse_signature();
        }

        loop {
            self.eat_operator(OperatorKind::Tilde)?;
            self.parse_type()?;
            if self.eat_operator(OperatorKind::Or)?.is_none() {
                return Ok(());
            }
        }
    }

    /// Comma-separated types, as in a type switch `case`.
    pub(crate) fn parse_type_list(&mut self) -> ParseResult<usize> {
        self.parse_type()?;
        let mut count = 1;
        while self.eat_operator(OperatorKind::Comma)?.is_some() {
            self.parse_type()?;
            count += 1;
        }
        Ok(count)
    }
}
