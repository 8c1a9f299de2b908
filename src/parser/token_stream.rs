//! Lexer-backed parser token stream with bounded lookahead.

use std::collections::VecDeque;

use crate::lexer::{
    LexDiagnostic, LexStep, Lexer, OperatorKind, RecoverableLexError, Token, TokenKind,
};

use crate::parser::error::ParseError;
use crate::parser::recovery::NeedMoreInputReason;

/// Maximum supported lookahead index (`peek(0..=3)`).
pub const MAX_LOOKAHEAD: usize = 3;

/// Fixed-lookahead token stream over the lexer.
///
/// A truncated token (for example an unterminated string) is delivered as a
/// normal token and ends the stream; the truncation is kept as the stream's
/// incomplete tail. Illegal tokens are delivered too, with their lexer
/// diagnostic available through [`Self::invalid_diagnostic`].
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    lookahead: VecDeque<Token>,
    exhausted: bool,
    incomplete_tail: Option<RecoverableLexError>,
    invalid: Vec<(Token, LexDiagnostic)>,
    observed_end_of_input: bool,
    scanned: usize,
    max_tokens: usize,
    open_delimiters: Vec<OperatorKind>,
    last_consumed: Option<TokenKind>,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream from an existing lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self::with_token_limit(lexer, usize::MAX)
    }

    /// Creates a stream that fails after scanning `max_tokens` tokens.
    pub fn with_token_limit(lexer: Lexer<'a>, max_tokens: usize) -> Self {
        Self {
            lexer,
            lookahead: VecDeque::new(),
            exhausted: false,
            incomplete_tail: None,
            invalid: Vec::new(),
            observed_end_of_input: false,
            scanned: 0,
            max_tokens,
            open_delimiters: Vec::new(),
            last_consumed: None,
        }
    }

    /// Returns the input being scanned.
    pub fn input(&self) -> &'a str {
        self.lexer.input()
    }

    /// Peeks a token by bounded lookahead index.
    ///
    /// `peek(0)` is the next token to be consumed by [`Self::next`]. A `peek(0)`
    /// that finds nothing marks the end of input as observed; deeper lookahead
    /// past the end does not.
    pub fn peek(&mut self, n: usize) -> Result<Option<&Token>, ParseError> {
        if n > MAX_LOOKAHEAD {
            return Err(ParseError::lookahead_exceeded(n, MAX_LOOKAHEAD));
        }

        self.fill_to(n)?;
        if n == 0 && self.lookahead.is_empty() {
            self.observed_end_of_input = true;
        }
        Ok(self.lookahead.get(n))
    }

    /// Consumes and returns the next token from the stream.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<Token>, ParseError> {
        self.fill_to(0)?;
        let Some(token) = self.lookahead.pop_front() else {
            self.observed_end_of_input = true;
            return Ok(None);
        };

        match token.kind {
            TokenKind::Operator(
                open @ (OperatorKind::LeftParen | OperatorKind::LeftBracket | OperatorKind::LeftBrace),
            ) => self.open_delimiters.push(open),
            TokenKind::Operator(
                OperatorKind::RightParen | OperatorKind::RightBracket | OperatorKind::RightBrace,
            ) => {
                self.open_delimiters.pop();
            }
            _ => {}
        }
        self.last_consumed = Some(token.kind);
        Ok(Some(token))
    }

    /// Returns `true` once a `peek(0)` or `next` found no token.
    pub fn observed_end_of_input(&self) -> bool {
        self.observed_end_of_input
    }

    /// Records that the parser wanted input past the end.
    ///
    /// Used when the grammar rejects the `;` inserted at end of input.
    pub(crate) fn note_end_of_input(&mut self) {
        self.observed_end_of_input = true;
    }

    /// Returns the truncation that ended the stream, if any.
    pub fn incomplete_tail(&self) -> Option<&RecoverableLexError> {
        self.incomplete_tail.as_ref()
    }

    /// Returns the lexer diagnostic recorded for an illegal token.
    pub fn invalid_diagnostic(&self, token: &Token) -> Option<&LexDiagnostic> {
        self.invalid
            .iter()
            .find(|(invalid, _)| invalid.span == token.span)
            .map(|(_, diagnostic)| diagnostic)
    }

    /// Returns the number of tokens scanned from the lexer so far.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Explains why the stream cannot satisfy the parser right now.
    pub fn pending_reason(&self) -> NeedMoreInputReason {
        if let Some(tail) = &self.incomplete_tail {
            return NeedMoreInputReason::from_recoverable_lexer_error(tail);
        }
        if let Some(reason) = self
            .open_delimiters
            .last()
            .copied()
            .and_then(NeedMoreInputReason::from_open_delimiter)
        {
            return reason;
        }
        NeedMoreInputReason::from_last_token(self.last_consumed)
    }

    fn fill_to(&mut self, index: usize) -> Result<(), ParseError> {
        while self.lookahead.len() <= index && !self.exhausted {
            let step = self
                .lexer
                .next_token()
                .map_err(|error| ParseError::lexer_fault(&error))?;
            match step {
                LexStep::Token(token) => self.push(token)?,
                LexStep::Truncated(token, error) => {
                    self.push(token)?;
                    self.incomplete_tail = Some(error);
                    self.exhausted = true;
                }
                LexStep::Invalid(token, diagnostic) => {
                    self.invalid.push((token.clone(), diagnostic));
                    self.push(token)?;
                }
                LexStep::Incomplete(error) => {
                    self.incomplete_tail = Some(error);
                    self.exhausted = true;
                }
                LexStep::EndOfInput => self.exhausted = true,
            }
        }

        Ok(())
    }

    fn push(&mut self, token: Token) -> Result<(), ParseError> {
        if self.scanned >= self.max_tokens {
            return Err(ParseError::token_limit_exceeded(
                self.max_tokens,
                Some(token.span),
            ));
        }
        self.scanned += 1;
        self.lookahead.push_back(token);
        Ok(())
    }
}
