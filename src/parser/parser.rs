//! Parser entrypoints and shared grammar helpers.

use crate::lexer::{
    ByteOffset, Keyword, Lexer, LineIndex, OperatorKind, RecoverableLexError, SemicolonKind, Span,
    Token, TokenKind,
};
use crate::parser::ast::TopLevelStatement;
use crate::parser::error::{ParseError, ParseErrorKind};
use crate::parser::listener::{Diagnostic, DiagnosticKind, DiagnosticListener, Offending};
use crate::parser::recovery::{NeedMoreInputReason, SyncStop, synchronize};
use crate::parser::stmt::StatementContext;
use crate::parser::token_stream::TokenStream;

/// Parser behavior options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// Maximum syntactic nesting depth.
    ///
    /// A [`Parser`] runs on the caller's stack; the classifier runs it on a
    /// dedicated thread sized for this budget.
    pub max_nesting: usize,
    /// Maximum tokens scanned for one parse.
    pub max_tokens: usize,
    /// Maximum diagnostics reported, including the primary one.
    pub max_diagnostics: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting: 256,
            max_tokens: 65_536,
            max_diagnostics: 16,
        }
    }
}

/// Result of the primary top-level parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseStep {
    /// One complete statement was parsed and nothing follows it.
    Complete(TopLevelStatement),
    /// The input ended before the statement could be completed.
    NeedMoreInput(NeedMoreInputReason),
    /// A concrete token was rejected.
    SyntaxError(ParseError),
}

/// Primary parse result plus the stream facts gathered while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelReport {
    /// Verdict of the primary parse.
    pub step: ParseStep,
    /// Whether the primary parse asked for a token past the end of input.
    pub observed_end_of_input: bool,
    /// Tokens scanned by the primary parse.
    pub tokens_scanned: usize,
}

/// Grammar-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseFailure {
    /// The grammar needs tokens that are not there yet.
    NeedMoreInput(ParseError),
    /// A concrete token was rejected, or a fault occurred.
    Error(ParseError),
}

impl From<ParseError> for ParseFailure {
    fn from(value: ParseError) -> Self {
        Self::Error(value)
    }
}

pub(crate) type ParseResult<T> = Result<T, ParseFailure>;

/// Recursive-descent parser for one Go-subset top-level statement.
pub struct Parser<'a, 'l> {
    options: ParseOptions,
    stream: TokenStream<'a>,
    listener: &'l mut dyn DiagnosticListener,
    line_index: LineIndex<'a>,
    depth: usize,
    reported: usize,
    last_span: Span,
    pub(crate) expr_level: i32,
}

impl<'a, 'l> Parser<'a, 'l> {
    /// Creates a parser over an existing token stream.
    pub fn new(
        options: ParseOptions,
        stream: TokenStream<'a>,
        listener: &'l mut dyn DiagnosticListener,
    ) -> Self {
        let input = stream.input();
        Self {
            options,
            stream,
            listener,
            line_index: LineIndex::new(input),
            depth: 0,
            reported: 0,
            last_span: Span::default(),
            expr_level: 0,
        }
    }

    /// Creates a parser for `input` with the token budget from `options`.
    pub fn for_input(
        input: &'a str,
        options: ParseOptions,
        listener: &'l mut dyn DiagnosticListener,
    ) -> Self {
        let stream = TokenStream::with_token_limit(Lexer::new(input), options.max_tokens);
        Self::new(options, stream, listener)
    }

    /// Runs the primary parse of `statement [";"] EOF`.
    ///
    /// The first failure decides the step. Faults (budgets, invariants) are
    /// returned as `Err` and never folded into a syntax verdict.
    pub fn parse_top_level(&mut self) -> Result<TopLevelReport, ParseError> {
        let step = match self.parse_top_level_statement() {
            Ok(statement) => match self.stream.incomplete_tail().cloned() {
                Some(tail) => {
                    self.report_lexical_tail(&tail);
                    ParseStep::NeedMoreInput(NeedMoreInputReason::from_recoverable_lexer_error(
                        &tail,
                    ))
                }
                None => ParseStep::Complete(statement),
            },
            Err(ParseFailure::NeedMoreInput(error)) => {
                let reason = self.stream.pending_reason();
                match self.stream.incomplete_tail().cloned() {
                    Some(tail) => self.report_lexical_tail(&tail),
                    None => self.report(&error),
                }
                ParseStep::NeedMoreInput(reason)
            }
            Err(ParseFailure::Error(error)) if error.is_fault() => return Err(error),
            Err(ParseFailure::Error(error)) => {
                self.report(&error);
                ParseStep::SyntaxError(error)
            }
        };

        Ok(TopLevelReport {
            step,
            observed_end_of_input: self.stream.observed_end_of_input(),
            tokens_scanned: self.stream.scanned(),
        })
    }

    /// Continues past a syntax error, reporting further diagnostics.
    ///
    /// Skips to the next statement separator outside brackets and parses
    /// another statement, until the input or the diagnostic budget runs out.
    /// Returns the number of diagnostics reported during recovery.
    pub fn recover(&mut self) -> Result<usize, ParseError> {
        let before = self.reported;
        self.depth = 0;
        self.expr_level = 0;

        while self.reported < self.options.max_diagnostics && !self.listener.is_saturated() {
            if synchronize(&mut self.stream)? == SyncStop::EndOfInput {
                break;
            }
            if self.stream.peek(0)?.is_none() {
                break;
            }

            match self.parse_statement(StatementContext::TopLevel) {
                Ok(_) => {}
                Err(ParseFailure::NeedMoreInput(error)) => {
                    self.report(&error);
                    break;
                }
                Err(ParseFailure::Error(error)) if error.is_fault() => return Err(error),
                Err(ParseFailure::Error(error)) => {
                    self.report(&error);
                    self.depth = 0;
                    self.expr_level = 0;
                }
            }
        }

        Ok(self.reported - before)
    }

    fn parse_top_level_statement(&mut self) -> ParseResult<TopLevelStatement> {
        let Some(first) = self.peek(0)? else {
            return Err(self.end_of_input(&["statement"]));
        };
        if matches!(first.kind, TokenKind::Semicolon(_)) {
            return Err(self.unexpected(&first, &["statement"]));
        }

        let statement = self.parse_statement(StatementContext::TopLevel)?;
        self.eat_semicolon()?;
        if let Some(token) = self.peek(0)? {
            return Err(self.unexpected(&token, &["end of statement"]));
        }
        Ok(statement)
    }

    fn report(&mut self, error: &ParseError) {
        let span = error
            .span
            .unwrap_or_else(|| Span::point(Default::default(), self.end_offset()));
        let (kind, offending) = match error.kind {
            ParseErrorKind::InvalidToken => (
                DiagnosticKind::Lexer,
                Offending::Token(error.found.clone().unwrap_or_default()),
            ),
            ParseErrorKind::UnexpectedEndOfInput => {
                (DiagnosticKind::Parser, Offending::EndOfInput)
            }
            _ => (
                DiagnosticKind::Parser,
                Offending::Token(self.source_text(span)),
            ),
        };
        let diagnostic = Diagnostic::new(
            kind,
            error.to_string(),
            span,
            self.line_index.position(span.start),
            offending,
        );
        self.emit(diagnostic);
    }

    fn report_lexical_tail(&mut self, tail: &RecoverableLexError) {
        let lexical = tail.diagnostic();
        let diagnostic = Diagnostic::new(
            DiagnosticKind::Lexer,
            lexical.to_string(),
            lexical.span,
            self.line_index.position(lexical.span.start),
            Offending::EndOfInput,
        );
        self.emit(diagnostic);
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        self.reported += 1;
        self.listener.report(diagnostic);
    }

    fn end_offset(&self) -> ByteOffset {
        ByteOffset::from_usize(self.stream.input().len())
    }

    fn source_text(&self, span: Span) -> String {
        self.stream
            .input()
            .get(span.start.as_usize()..span.end.as_usize())
            .unwrap_or_default()
            .to_string()
    }

    // ---------------------------------------------------------------------
    // Shared helpers for the grammar modules
    // ---------------------------------------------------------------------

    /// Runs `parse` one nesting level deeper.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.depth += 1;
        if self.depth > self.options.max_nesting {
            let span = self.stream.peek(0)?.map(|token| token.span);
            return Err(ParseError::nesting_limit_exceeded(self.options.max_nesting, span).into());
        }
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Runs `parse` with the composite-literal level set to `level`.
    ///
    /// A negative level (control clause headers) forbids composite literals
    /// of bare type names.
    pub(crate) fn with_expr_level<T>(
        &mut self,
        level: i32,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = self.expr_level;
        self.expr_level = level;
        let result = parse(self);
        self.expr_level = saved;
        result
    }

    /// Runs `parse` inside brackets, which re-allow composite literals.
    pub(crate) fn bracketed<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let level = self.expr_level.max(0) + 1;
        self.with_expr_level(level, parse)
    }

    pub(crate) fn peek(&mut self, n: usize) -> ParseResult<Option<Token>> {
        Ok(self.stream.peek(n)?.cloned())
    }

    pub(crate) fn peek_kind(&mut self, n: usize) -> ParseResult<Option<TokenKind>> {
        Ok(self.stream.peek(n)?.map(|token| token.kind))
    }

    pub(crate) fn peek_operator(&mut self, n: usize) -> ParseResult<Option<OperatorKind>> {
        Ok(self.stream.peek(n)?.and_then(Token::operator))
    }

    pub(crate) fn at_operator(&mut self, operator: OperatorKind) -> ParseResult<bool> {
        Ok(self.peek_operator(0)? == Some(operator))
    }

    pub(crate) fn at_keyword(&mut self, keyword: Keyword) -> ParseResult<bool> {
        Ok(self.peek_kind(0)? == Some(TokenKind::Keyword(keyword)))
    }

    pub(crate) fn at_semicolon(&mut self) -> ParseResult<bool> {
        Ok(matches!(self.peek_kind(0)?, Some(TokenKind::Semicolon(_))))
    }

    /// Returns `true` at `;`, `}`, or the end of the stream.
    pub(crate) fn at_statement_end(&mut self) -> ParseResult<bool> {
        Ok(matches!(
            self.peek_kind(0)?,
            None | Some(TokenKind::Semicolon(_))
                | Some(TokenKind::Operator(OperatorKind::RightBrace))
        ))
    }

    /// Consumes the next token.
    pub(crate) fn bump(&mut self) -> ParseResult<Token> {
        match self.stream.next()? {
            Some(token) => {
                self.last_span = token.span;
                Ok(token)
            }
            None => Err(self.end_of_input(&["token"])),
        }
    }

    pub(crate) fn eat_operator(&mut self, operator: OperatorKind) -> ParseResult<Option<Token>> {
        if self.at_operator(operator)? {
            return self.bump().map(Some);
        }
        Ok(None)
    }

    pub(crate) fn eat_semicolon(&mut self) -> ParseResult<Option<Token>> {
        if self.at_semicolon()? {
            return self.bump().map(Some);
        }
        Ok(None)
    }

    pub(crate) fn expect_operator(
        &mut self,
        operator: OperatorKind,
        label: &str,
    ) -> ParseResult<Token> {
        self.expect(|kind| kind == TokenKind::Operator(operator), &[label])
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword, label: &str) -> ParseResult<Token> {
        self.expect(|kind| kind == TokenKind::Keyword(keyword), &[label])
    }

    pub(crate) fn expect_identifier(&mut self) -> ParseResult<Token> {
        self.expect(|kind| kind == TokenKind::Identifier, &["name"])
    }

    pub(crate) fn expect_semicolon(&mut self, expected: &[&str]) -> ParseResult<Token> {
        self.expect(|kind| matches!(kind, TokenKind::Semicolon(_)), expected)
    }

    fn expect<P>(&mut self, predicate: P, expected: &[&str]) -> ParseResult<Token>
    where
        P: Fn(TokenKind) -> bool,
    {
        match self.peek(0)? {
            Some(token) if predicate(token.kind) => self.bump(),
            Some(token) => Err(self.unexpected(&token, expected)),
            None => Err(self.end_of_input(expected)),
        }
    }

    /// Builds the failure for rejecting `token`.
    ///
    /// The `;` inserted at end of input is not real text, so rejecting it
    /// means the grammar wanted more input.
    pub(crate) fn unexpected(&mut self, token: &Token, expected: &[&str]) -> ParseFailure {
        match token.kind {
            TokenKind::Semicolon(SemicolonKind::EndOfInput) => {
                self.stream.note_end_of_input();
                ParseFailure::NeedMoreInput(ParseError::unexpected_end_of_input(
                    Some(token.span),
                    expected.iter().copied(),
                ))
            }
            TokenKind::Illegal => {
                let error = match self.stream.invalid_diagnostic(token) {
                    Some(diagnostic) => ParseError::invalid_token(token, diagnostic.clone()),
                    None => ParseError::internal_invariant(
                        "illegal token without lexer diagnostic",
                        Some(token.span),
                    ),
                };
                ParseFailure::Error(error)
            }
            _ => ParseFailure::Error(ParseError::unexpected_token(token, expected.iter().copied())),
        }
    }

    pub(crate) fn end_of_input(&mut self, expected: &[&str]) -> ParseFailure {
        let span = Span::point(Default::default(), self.end_offset());
        ParseFailure::NeedMoreInput(ParseError::unexpected_end_of_input(
            Some(span),
            expected.iter().copied(),
        ))
    }

    /// Rejects whatever comes next: a concrete token or the end of input.
    pub(crate) fn reject_next(&mut self, expected: &[&str]) -> ParseFailure {
        match self.peek(0) {
            Ok(Some(token)) => self.unexpected(&token, expected),
            Ok(None) => self.end_of_input(expected),
            Err(failure) => failure,
        }
    }

    /// Span from `start` through the last consumed token.
    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.merge(self.last_span)
    }
}
