//! Statement grammar.

use crate::lexer::{Keyword, OperatorKind, TokenKind};
use crate::parser::ast::{DeclKind, Expr, ExprShape, StatementKind, TopLevelStatement};
use crate::parser::expr::ExprList;
use crate::parser::parser::{ParseResult, Parser};

/// Where a statement appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementContext {
    /// Directly at the prompt: `import` and function declarations are allowed.
    TopLevel,
    /// Inside a block or clause.
    Block,
}

/// Which simple statements a position accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SimpleMode {
    /// Statement position: labels are allowed.
    Statement,
    /// `if`/`switch`/`select` headers and `for` conditions.
    Header,
    /// First clause of a `for` header: `range` is allowed.
    ForHeader,
}

/// Summary of one simple statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SimpleStmt {
    pub(crate) kind: StatementKind,
    /// Shape of the last expression, used to spot type switch guards.
    pub(crate) last: Option<Expr>,
    pub(crate) is_range: bool,
}

impl SimpleStmt {
    fn new(kind: StatementKind, last: Option<Expr>) -> Self {
        Self {
            kind,
            last,
            is_range: false,
        }
    }

    fn range() -> Self {
        Self {
            kind: StatementKind::For,
            last: None,
            is_range: true,
        }
    }

    fn is_type_switch_guard(&self) -> bool {
        matches!(
            self.kind,
            StatementKind::Expression | StatementKind::ShortVarDecl
        ) && self
            .last
            .is_some_and(|expr| expr.shape == ExprShape::TypeGuard)
    }
}

impl Parser<'_, '_> {
    pub(crate) fn parse_statement(
        &mut self,
        context: StatementContext,
    ) -> ParseResult<TopLevelStatement> {
        self.nested(|parser| parser.parse_statement_inner(context))
    }

    fn parse_statement_inner(&mut self, context: StatementContext) -> ParseResult<TopLevelStatement> {
        let Some(token) = self.peek(0)? else {
            return Err(self.end_of_input(&["statement"]));
        };
        let start = token.span;

        let kind = match token.kind {
            TokenKind::Keyword(Keyword::Const) => {
                StatementKind::Declaration(self.parse_value_decl(Keyword::Const)?)
            }
            TokenKind::Keyword(Keyword::Var) => {
                StatementKind::Declaration(self.parse_value_decl(Keyword::Var)?)
            }
            TokenKind::Keyword(Keyword::Type) => StatementKind::Declaration(self.parse_type_decl()?),
            TokenKind::Keyword(Keyword::Import) if context == StatementContext::TopLevel => {
                StatementKind::Declaration(self.parse_import_decl()?)
            }
            TokenKind::Keyword(Keyword::Import) => {
                return Err(self.unexpected(&token, &["statement"]));
            }
            TokenKind::Keyword(Keyword::Func) if context == StatementContext::TopLevel => {
                self.parse_top_level_func()?
            }
            TokenKind::Keyword(keyword @ (Keyword::Go | Keyword::Defer)) => {
                self.bump()?;
                self.parse_expr()?;
                if keyword == Keyword::Go {
                    StatementKind::Go
                } else {
                    StatementKind::Defer
                }
            }
            TokenKind::Keyword(Keyword::Return) => {
                self.bump()?;
                if !self.at_statement_end()? {
                    self.parse_expr_list()?;
                }
                StatementKind::Return
            }
            TokenKind::Keyword(keyword @ (Keyword::Break | Keyword::Continue)) => {
                self.bump()?;
                if self.peek_kind(0)? == Some(TokenKind::Identifier) {
                    self.bump()?;
                }
                if keyword == Keyword::Break {
                    StatementKind::Break
                } else {
                    StatementKind::Continue
                }
            }
            TokenKind::Keyword(Keyword::Goto) => {
                self.bump()?;
                self.expect_identifier()?;
                StatementKind::Goto
            }
            TokenKind::Keyword(Keyword::Fallthrough) => {
                self.bump()?;
                StatementKind::Fallthrough
            }
            TokenKind::Keyword(Keyword::If) => self.parse_if()?,
            TokenKind::Keyword(Keyword::For) => self.parse_for()?,
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch()?,
            TokenKind::Keyword(Keyword::Select) => self.parse_select()?,
            TokenKind::Operator(OperatorKind::LeftBrace) => {
                self.parse_block()?;
                StatementKind::Block
            }
            _ => self.parse_simple_stmt(SimpleMode::Statement)?.kind,
        };

        Ok(TopLevelStatement {
            kind,
            span: self.span_from(start),
        })
    }

    pub(crate) fn parse_simple_stmt(&mut self, mode: SimpleMode) -> ParseResult<SimpleStmt> {
        if mode == SimpleMode::ForHeader && self.at_keyword(Keyword::Range)? {
            self.bump()?;
            self.parse_expr()?;
            return Ok(SimpleStmt::range());
        }

        let lhs = self.parse_expr_list()?;
        self.parse_simple_stmt_tail(lhs, mode)
    }

    /// Finishes a simple statement whose left-hand expression list is parsed.
    pub(crate) fn parse_simple_stmt_tail(
        &mut self,
        lhs: ExprList,
        mode: SimpleMode,
    ) -> ParseResult<SimpleStmt> {
        let Some(operator) = self.peek_operator(0)? else {
            if lhs.count == 1 {
                return Ok(SimpleStmt::new(StatementKind::Expression, Some(lhs.last)));
            }
            return Err(self.reject_next(&[":=", "=", ","]));
        };

        match operator {
            OperatorKind::Define => {
                self.bump()?;
                if mode == SimpleMode::ForHeader && self.at_keyword(Keyword::Range)? {
                    self.bump()?;
                    self.parse_expr()?;
                    return Ok(SimpleStmt::range());
                }
                let rhs = self.parse_expr_list()?;
                Ok(SimpleStmt::new(StatementKind::ShortVarDecl, Some(rhs.last)))
            }
            assign if assign.is_assignment() => {
                self.bump()?;
                if assign == OperatorKind::Assign
                    && mode == SimpleMode::ForHeader
                    && self.at_keyword(Keyword::Range)?
                {
                    self.bump()?;
                    self.parse_expr()?;
                    return Ok(SimpleStmt::range());
                }
                let rhs = self.parse_expr_list()?;
                Ok(SimpleStmt::new(StatementKind::Assignment, Some(rhs.last)))
            }
            OperatorKind::Colon
                if mode == SimpleMode::Statement
                    && lhs.count == 1
                    && lhs.first.shape == ExprShape::Identifier =>
            {
                self.bump()?;
                self.parse_labeled_statement()?;
                Ok(SimpleStmt::new(StatementKind::Labeled, None))
            }
            OperatorKind::Arrow if lhs.count == 1 => {
                self.bump()?;
                let value = self.parse_expr()?;
                Ok(SimpleStmt::new(StatementKind::Send, Some(value)))
            }
            OperatorKind::Inc | OperatorKind::Dec if lhs.count == 1 => {
                self.bump()?;
                Ok(SimpleStmt::new(StatementKind::IncDec, None))
            }
            _ if lhs.count == 1 => Ok(SimpleStmt::new(StatementKind::Expression, Some(lhs.last))),
            _ => Err(self.reject_next(&[":=", "=", ","])),
        }
    }

    fn parse_labeled_statement(&mut self) -> ParseResult<()> {
        match self.peek_kind(0)? {
            None => Err(self.end_of_input(&["statement"])),
            Some(TokenKind::Semicolon(_) | TokenKind::Operator(OperatorKind::RightBrace)) => Ok(()),
            Some(_) => self.parse_statement(StatementContext::Block).map(|_| ()),
        }
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<()> {
        self.expect_operator(OperatorKind::LeftBrace, "{")?;
        self.with_expr_level(0, |parser| parser.parse_statement_list())?;
        self.expect_operator(OperatorKind::RightBrace, "}")?;
        Ok(())
    }

    /// Parses statements up to `}`, `case`, or `default` (not consumed).
    fn parse_statement_list(&mut self) -> ParseResult<()> {
        loop {
            let Some(token) = self.peek(0)? else {
                return Err(self.end_of_input(&["}"]));
            };
            match token.kind {
                TokenKind::Operator(OperatorKind::RightBrace)
                | TokenKind::Keyword(Keyword::Case | Keyword::Default) => return Ok(()),
                TokenKind::Semicolon(_) => {
                    self.bump()?;
                    continue;
                }
                _ => {}
            }

            self.parse_statement(StatementContext::Block)?;

            match self.peek_kind(0)? {
                Some(TokenKind::Semicolon(_)) => {
                    self.bump()?;
                }
                Some(TokenKind::Operator(OperatorKind::RightBrace)) => return Ok(()),
                _ => return Err(self.reject_next(&[";", "}"])),
            }
        }
    }

    fn parse_if(&mut self) -> ParseResult<StatementKind> {
        self.expect_keyword(Keyword::If, "if")?;
        self.parse_if_header()?;
        self.parse_block()?;

        if self.at_keyword(Keyword::Else)? {
            self.bump()?;
            match self.peek_kind(0)? {
                Some(TokenKind::Keyword(Keyword::If)) => {
                    self.nested(|parser| parser.parse_if())?;
                }
                Some(TokenKind::Operator(OperatorKind::LeftBrace)) => self.parse_block()?,
                _ => return Err(self.reject_next(&["if statement or block"])),
            }
        }
        Ok(StatementKind::If)
    }

    fn parse_if_header(&mut self) -> ParseResult<()> {
        if self.at_operator(OperatorKind::LeftBrace)? {
            return Err(self.reject_next(&["condition"]));
        }

        self.with_expr_level(-1, |parser| {
            let mut init = None;
            if !parser.at_semicolon()? {
                init = Some(parser.parse_simple_stmt(SimpleMode::Header)?);
            }

            let condition = if parser.at_semicolon()? {
                parser.bump()?;
                if parser.at_operator(OperatorKind::LeftBrace)? {
                    return Err(parser.reject_next(&["condition"]));
                }
                Some(parser.parse_simple_stmt(SimpleMode::Header)?)
            } else {
                init
            };

            match condition {
                Some(condition) if condition.kind == StatementKind::Expression => Ok(()),
                _ => Err(parser.reject_next(&["condition expression"])),
            }
        })
    }

    fn parse_for(&mut self) -> ParseResult<StatementKind> {
        self.expect_keyword(Keyword::For, "for")?;

        self.with_expr_level(-1, |parser| {
            if parser.at_operator(OperatorKind::LeftBrace)? {
                return Ok(());
            }

            let mut first = None;
            if !parser.at_semicolon()? {
                let clause = parser.parse_simple_stmt(SimpleMode::ForHeader)?;
                if clause.is_range {
                    return Ok(());
                }
                first = Some(clause);
            }

            if !parser.at_semicolon()? {
                return match first {
                    Some(condition) if condition.kind == StatementKind::Expression => Ok(()),
                    _ => Err(parser.reject_next(&["{"])),
                };
            }

            parser.bump()?;
            if !parser.at_semicolon()? {
                let condition = parser.parse_simple_stmt(SimpleMode::Header)?;
                if condition.kind != StatementKind::Expression {
                    return Err(parser.reject_next(&["for loop condition"]));
                }
            }
            parser.expect_semicolon(&[";"])?;
            if !parser.at_operator(OperatorKind::LeftBrace)? {
                parser.parse_simple_stmt(SimpleMode::Header)?;
            }
            Ok(())
        })?;

        self.parse_block()?;
        Ok(StatementKind::For)
    }

    fn parse_switch(&mut self) -> ParseResult<StatementKind> {
        self.expect_keyword(Keyword::Switch, "switch")?;

        let type_switch = self.with_expr_level(-1, |parser| {
            if parser.at_operator(OperatorKind::LeftBrace)? {
                return Ok(false);
            }

            let mut tag = None;
            if !parser.at_semicolon()? {
                tag = Some(parser.parse_simple_stmt(SimpleMode::Header)?);
            }
            if parser.at_semicolon()? {
                parser.bump()?;
                tag = None;
                if !parser.at_operator(OperatorKind::LeftBrace)? {
                    tag = Some(parser.parse_simple_stmt(SimpleMode::Header)?);
                }
            }

            match tag {
                None => Ok(false),
                Some(tag) if tag.is_type_switch_guard() => Ok(true),
                Some(tag) if tag.kind == StatementKind::Expression => Ok(false),
                Some(_) => Err(parser.reject_next(&["switch expression"])),
            }
        })?;

        self.expect_operator(OperatorKind::LeftBrace, "{")?;
        self.with_expr_level(0, |parser| {
            loop {
                match parser.peek_kind(0)? {
                    Some(TokenKind::Operator(OperatorKind::RightBrace)) => return Ok(()),
                    Some(TokenKind::Keyword(Keyword::Case)) => {
                        parser.bump()?;
                        if type_switch {
                            parser.parse_type_list()?;
                        } else {
                            parser.parse_expr_list()?;
                        }
                    }
                    Some(TokenKind::Keyword(Keyword::Default)) => {
                        parser.bump()?;
                    }
                    _ => return Err(parser.reject_next(&["case", "default", "}"])),
                }
                parser.expect_operator(OperatorKind::Colon, ":")?;
                parser.parse_statement_list()?;
            }
        })?;
        self.expect_operator(OperatorKind::RightBrace, "}")?;

        Ok(if type_switch {
            StatementKind::TypeSwitch
        } else {
            StatementKind::Switch
        })
    }

    fn parse_select(&mut self) -> ParseResult<StatementKind> {
        self.expect_keyword(Keyword::Select, "select")?;
        self.expect_operator(OperatorKind::LeftBrace, "{")?;

        self.with_expr_level(0, |parser| {
            loop {
                match parser.peek_kind(0)? {
                    Some(TokenKind::Operator(OperatorKind::RightBrace)) => return Ok(()),
                    Some(TokenKind::Keyword(Keyword::Case)) => {
                        parser.bump()?;
                        let comm = parser.parse_simple_stmt(SimpleMode::Header)?;
                        if !matches!(
                            comm.kind,
                            StatementKind::Send
                                | StatementKind::Expression
                                | StatementKind::ShortVarDecl
                                | StatementKind::Assignment
                        ) {
                            return Err(parser.reject_next(&["send or receive"]));
                        }
                    }
                    Some(TokenKind::Keyword(Keyword::Default)) => {
                        parser.bump()?;
                    }
                    _ => return Err(parser.reject_next(&["case", "default", "}"])),
                }
                parser.expect_operator(OperatorKind::Colon, ":")?;
                parser.parse_statement_list()?;
            }
        })?;
        self.expect_operator(OperatorKind::RightBrace, "}")?;

        Ok(StatementKind::Select)
    }

    /// `func` at the prompt: a declaration, or a function literal statement.
    fn parse_top_level_func(&mut self) -> ParseResult<StatementKind> {
        let func = self.expect_keyword(Keyword::Func, "func")?;

        match self.peek_kind(0)? {
            Some(TokenKind::Identifier) => {
                self.bump()?;
                self.parse_signature()?;
                self.parse_optional_body()?;
                Ok(StatementKind::Declaration(DeclKind::Func))
            }
            Some(TokenKind::Operator(OperatorKind::LeftParen)) => {
                self.parse_parameters()?;
                let is_method = self.peek_kind(0)? == Some(TokenKind::Identifier)
                    && self.peek_operator(1)? == Some(OperatorKind::LeftParen);
                if is_method {
                    self.bump()?;
                    self.parse_signature()?;
                    self.parse_optional_body()?;
                    return Ok(StatementKind::Declaration(DeclKind::Method));
                }

                self.parse_result()?;
                if self.at_operator(OperatorKind::LeftBrace)? {
                    self.parse_block()?;
                }
                let literal = Expr::new(ExprShape::Other, self.span_from(func.span));
                let first = self.parse_expr_from_operand(literal)?;
                let lhs = self.parse_expr_list_from(first)?;
                Ok(self.parse_simple_stmt_tail(lhs, SimpleMode::Statement)?.kind)
            }
            _ => Err(self.reject_next(&["function name", "("])),
        }
    }

    fn parse_optional_body(&mut self) -> ParseResult<()> {
        if self.at_operator(OperatorKind::LeftBrace)? {
            self.parse_block()?;
        }
        Ok(())
    }
}
