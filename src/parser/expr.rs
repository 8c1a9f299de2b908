//! Expression grammar.
//!
//! Binary expressions use precedence climbing over Go's five levels. Unary
//! `*` is not part of this subset: a `*` can only appear as a binary operator
//! or in a type position.

use crate::lexer::{Keyword, OperatorKind, TokenKind};
use crate::parser::ast::{Expr, ExprShape};
use crate::parser::parser::{ParseResult, Parser};

/// Summary of a comma-separated expression list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExprList {
    pub(crate) count: usize,
    pub(crate) first: Expr,
    pub(crate) last: Expr,
}

impl Parser<'_, '_> {
    pub(crate) fn parse_expr_list(&mut self) -> ParseResult<ExprList> {
        let first = self.parse_expr()?;
        self.parse_expr_list_from(first)
    }

    pub(crate) fn parse_expr_list_from(&mut self, first: Expr) -> ParseResult<ExprList> {
        let mut list = ExprList {
            count: 1,
            first,
            last: first,
        };
        while self.eat_operator(OperatorKind::Comma)?.is_some() {
            list.last = self.parse_expr()?;
            list.count += 1;
        }
        Ok(list)
    }

    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.nested(|parser| parser.parse_binary_expr(1))
    }

    /// Continues an expression whose leading operand is already parsed.
    pub(crate) fn parse_expr_from_operand(&mut self, operand: Expr) -> ParseResult<Expr> {
        let primary = self.parse_primary_suffixes(operand)?;
        self.parse_binary_tail(primary, 1)
    }

    fn parse_binary_expr(&mut self, min_precedence: u8) -> ParseResult<Expr> {
        let lhs = self.parse_unary_expr()?;
        self.parse_binary_tail(lhs, min_precedence)
    }

    fn parse_binary_tail(&mut self, mut lhs: Expr, min_precedence: u8) -> ParseResult<Expr> {
        while let Some(operator) = self.peek_operator(0)? {
            let precedence = operator.binary_precedence();
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            self.bump()?;
            let rhs = self.parse_binary_expr(precedence + 1)?;
            lhs = Expr::new(ExprShape::Other, lhs.span.merge(rhs.span));
        }
        Ok(lhs)
    }

    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        self.nested(|parser| {
            let Some(token) = parser.peek(0)? else {
                return Err(parser.end_of_input(&["expression"]));
            };

            match token.operator() {
                Some(
                    OperatorKind::Add
                    | OperatorKind::Sub
                    | OperatorKind::Not
                    | OperatorKind::Xor
                    | OperatorKind::And,
                ) => {
                    parser.bump()?;
                    let operand = parser.parse_unary_expr()?;
                    Ok(Expr::new(ExprShape::Other, token.span.merge(operand.span)))
                }
                Some(OperatorKind::Arrow) => {
                    parser.bump()?;
                    if parser.at_keyword(Keyword::Chan)? {
                        // `<-chan T` used as an operand, e.g. in a conversion.
                        parser.bump()?;
                        parser.parse_type()?;
                        let operand = Expr::new(ExprShape::Other, parser.span_from(token.span));
                        return parser.parse_primary_suffixes(operand);
                    }
                    let operand = parser.parse_unary_expr()?;
                    Ok(Expr::new(ExprShape::Other, token.span.merge(operand.span)))
                }
                _ => parser.parse_primary_expr(),
            }
        })
    }

    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        let operand = self.parse_operand()?;
        self.parse_primary_suffixes(operand)
    }

    fn parse_operand(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.peek(0)? else {
            return Err(self.end_of_input(&["expression"]));
        };
        let start = token.span;

        let shape = match token.kind {
            TokenKind::Literal(_) => {
                self.bump()?;
                ExprShape::Other
            }
            TokenKind::Identifier => {
                self.bump()?;
                ExprShape::Identifier
            }
            TokenKind::Operator(OperatorKind::LeftParen) => {
                self.bump()?;
                self.bracketed(|parser| parser.parse_expr())?;
                self.expect_operator(OperatorKind::RightParen, ")")?;
                ExprShape::Other
            }
            TokenKind::Operator(OperatorKind::LeftBracket) => self.parse_array_or_slice_type(true)?,
            TokenKind::Keyword(Keyword::Map) => self.parse_map_type()?,
            TokenKind::Keyword(Keyword::Struct) => self.parse_struct_type()?,
            TokenKind::Keyword(Keyword::Chan | Keyword::Interface) => {
                self.parse_type()?;
                ExprShape::Other
            }
            TokenKind::Keyword(Keyword::Func) => {
                self.bump()?;
                self.parse_signature()?;
                if self.at_operator(OperatorKind::LeftBrace)? {
                    self.parse_block()?;
                }
                ExprShape::Other
            }
            _ => return Err(self.unexpected(&token, &["expression"])),
        };

        Ok(Expr::new(shape, self.span_from(start)))
    }

    /// Parses selectors, index and slice expressions, type assertions,
    /// calls, and composite literal bodies following an operand.
    pub(crate) fn parse_primary_suffixes(&mut self, mut expr: Expr) -> ParseResult<Expr> {
        while let Some(operator) = self.peek_operator(0)? {
            let shape = match operator {
                OperatorKind::Period => {
                    self.bump()?;
                    self.parse_selector_or_assertion(expr.shape)?
                }
                OperatorKind::LeftBracket => {
                    self.bump()?;
                    self.bracketed(|parser| parser.parse_index_or_slice())?;
                    self.expect_operator(OperatorKind::RightBracket, "]")?;
                    ExprShape::Other
                }
                OperatorKind::LeftParen => {
                    self.bump()?;
                    self.bracketed(|parser| parser.parse_call_arguments())?;
                    self.expect_operator(OperatorKind::RightParen, ")")?;
                    ExprShape::Other
                }
                OperatorKind::LeftBrace
                    if expr.shape.is_literal_type()
                        && (self.expr_level >= 0 || !expr.shape.is_type_name()) =>
                {
                    self.parse_literal_value()?;
                    ExprShape::Other
                }
                _ => break,
            };
            expr = Expr::new(shape, self.span_from(expr.span));
        }
        Ok(expr)
    }

    /// After `.`: a field or method name, `(T)`, or `(type)`.
    ///
    /// `.(type)` is accepted anywhere; whether it sits in a type switch header
    /// is decided by the statement that contains it.
    fn parse_selector_or_assertion(&mut self, base: ExprShape) -> ParseResult<ExprShape> {
        match self.peek_kind(0)? {
            Some(TokenKind::Identifier) => {
                self.bump()?;
                Ok(if base == ExprShape::Identifier {
                    ExprShape::QualifiedName
                } else {
                    ExprShape::Other
                })
            }
            Some(TokenKind::Operator(OperatorKind::LeftParen)) => {
                self.bump()?;
                let shape = if self.at_keyword(Keyword::Type)? {
                    self.bump()?;
                    ExprShape::TypeGuard
                } else {
                    self.bracketed(|parser| parser.parse_type())?;
                    ExprShape::Other
                };
                self.expect_operator(OperatorKind::RightParen, ")")?;
                Ok(shape)
            }
            _ => Err(self.reject_next(&["name", "("])),
        }
    }

    /// `[i]`, `[lo:hi]`, `[lo:hi:max]` with optional bounds.
    fn parse_index_or_slice(&mut self) -> ParseResult<()> {
        if !self.at_operator(OperatorKind::Colon)? {
            self.parse_expr()?;
        }
        let mut colons = 0;
        while colons < 2 && self.eat_operator(OperatorKind::Colon)?.is_some() {
            colons += 1;
            if !self.at_operator(OperatorKind::Colon)? && !self.at_operator(OperatorKind::RightBracket)? {
                self.parse_expr()?;
            }
        }
        Ok(())
    }

    fn parse_call_arguments(&mut self) -> ParseResult<()> {
        loop {
            if self.at_operator(OperatorKind::RightParen)? {
                return Ok(());
            }
            self.parse_expr()?;
            self.eat_operator(OperatorKind::Ellipsis)?;
            match self.peek_operator(0)? {
                Some(OperatorKind::Comma) => {
                    self.bump()?;
                }
                Some(OperatorKind::RightParen) => return Ok(()),
                _ => return Err(self.reject_next(&[",", ")"])),
            }
        }
    }

    /// `{ [key:] value, ... }` with elided nested literal types.
    pub(crate) fn parse_literal_value(&mut self) -> ParseResult<()> {
        self.expect_operator(OperatorKind::LeftBrace, "{")?;
        self.bracketed(|parser| {
            loop {
                if parser.at_operator(OperatorKind::RightBrace)? {
                    return Ok(());
                }
                parser.parse_element()?;
                if parser.eat_operator(OperatorKind::Colon)?.is_some() {
                    parser.parse_element()?;
                }
                match parser.peek_operator(0)? {
                    Some(OperatorKind::Comma) => {
                        parser.bump()?;
                    }
                    Some(OperatorKind::RightBrace) => return Ok(()),
                    _ => return Err(parser.reject_next(&[",", "}"])),
                }
            }
        })?;
        self.expect_operator(OperatorKind::RightBrace, "}")?;
        Ok(())
    }

    fn parse_element(&mut self) -> ParseResult<()> {
        if self.at_operator(OperatorKind::LeftBrace)? {
            return self.nested(|parser| parser.parse_literal_value());
        }
        self.parse_expr().map(|_| ())
    }
}
