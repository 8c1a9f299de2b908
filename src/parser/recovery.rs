//! Continuation reasons and error recovery for interactive parsing.

use serde::Serialize;

use crate::lexer::{OperatorKind, RecoverableLexError, SemicolonKind, TokenKind};
use crate::parser::error::ParseError;
use crate::parser::token_stream::TokenStream;

/// Reason why interactive parsing needs more input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NeedMoreInputReason {
    /// No token was present at all.
    EmptyInput,
    /// An interpreted string literal is unterminated.
    UnterminatedString,
    /// A raw string literal is unterminated.
    UnterminatedRawString,
    /// A rune literal is unterminated.
    UnterminatedRune,
    /// A block comment is unterminated.
    UnterminatedComment,
    /// A numeric literal still needs digits.
    IncompleteNumber,
    /// A `(` is still open.
    UnclosedParen,
    /// A `[` is still open.
    UnclosedBracket,
    /// A `{` is still open.
    UnclosedBrace,
    /// The input ended after an operator that needs a right operand.
    TrailingOperator,
    /// The input ended after a `,`.
    TrailingComma,
    /// The statement needs more tokens.
    IncompleteStatement,
}

impl NeedMoreInputReason {
    /// Maps a recoverable lexer error to a parser continuation reason.
    pub fn from_recoverable_lexer_error(error: &RecoverableLexError) -> Self {
        match error {
            RecoverableLexError::UnterminatedString(_) => Self::UnterminatedString,
            RecoverableLexError::UnterminatedRawString(_) => Self::UnterminatedRawString,
            RecoverableLexError::UnterminatedRune(_) => Self::UnterminatedRune,
            RecoverableLexError::UnterminatedComment(_) => Self::UnterminatedComment,
            RecoverableLexError::IncompleteNumber(_) => Self::IncompleteNumber,
        }
    }

    /// Maps the innermost open delimiter to a continuation reason.
    pub fn from_open_delimiter(delimiter: OperatorKind) -> Option<Self> {
        match delimiter {
            OperatorKind::LeftParen => Some(Self::UnclosedParen),
            OperatorKind::LeftBracket => Some(Self::UnclosedBracket),
            OperatorKind::LeftBrace => Some(Self::UnclosedBrace),
            _ => None,
        }
    }

    /// Maps the last consumed token to a continuation reason.
    pub fn from_last_token(kind: Option<TokenKind>) -> Self {
        match kind {
            None => Self::EmptyInput,
            Some(TokenKind::Operator(OperatorKind::Comma)) => Self::TrailingComma,
            Some(TokenKind::Operator(operator))
                if operator.binary_precedence() > 0
                    || operator.is_assignment()
                    || matches!(
                        operator,
                        OperatorKind::Define
                            | OperatorKind::Arrow
                            | OperatorKind::Period
                            | OperatorKind::Not
                            | OperatorKind::Colon
                    ) =>
            {
                Self::TrailingOperator
            }
            Some(_) => Self::IncompleteStatement,
        }
    }

    /// Returns a short human-readable description.
    pub fn describe(self) -> &'static str {
        match self {
            Self::EmptyInput => "empty input",
            Self::UnterminatedString => "unterminated string literal",
            Self::UnterminatedRawString => "unterminated raw string literal",
            Self::UnterminatedRune => "unterminated rune literal",
            Self::UnterminatedComment => "unterminated block comment",
            Self::IncompleteNumber => "incomplete numeric literal",
            Self::UnclosedParen => "unclosed `(`",
            Self::UnclosedBracket => "unclosed `[`",
            Self::UnclosedBrace => "unclosed `{`",
            Self::TrailingOperator => "operator needs an operand",
            Self::TrailingComma => "list continues after `,`",
            Self::IncompleteStatement => "incomplete statement",
        }
    }
}

/// Where [`synchronize`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SyncStop {
    /// A statement separator at bracket depth zero was consumed.
    Separator,
    /// The token stream is exhausted.
    EndOfInput,
}

/// Skips tokens up to and including the next `;` outside brackets.
///
/// Brackets are counted from the current position; unmatched closers are
/// skipped without going below depth zero.
pub(crate) fn synchronize(stream: &mut TokenStream<'_>) -> Result<SyncStop, ParseError> {
    let mut depth = 0usize;
    loop {
        let Some(token) = stream.next()? else {
            return Ok(SyncStop::EndOfInput);
        };
        match token.kind {
            TokenKind::Operator(
                OperatorKind::LeftParen | OperatorKind::LeftBracket | OperatorKind::LeftBrace,
            ) => depth += 1,
            TokenKind::Operator(
                OperatorKind::RightParen | OperatorKind::RightBracket | OperatorKind::RightBrace,
            ) => depth = depth.saturating_sub(1),
            TokenKind::Semicolon(SemicolonKind::EndOfInput) => return Ok(SyncStop::EndOfInput),
            TokenKind::Semicolon(_) if depth == 0 => return Ok(SyncStop::Separator),
            _ => {}
        }
    }
}
