//! Parser error contracts.

use std::fmt;

use serde::Serialize;

use crate::lexer::{FatalLexError, LexDiagnostic, Span, Token};

/// Stable parser error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParseErrorKind {
    /// A concrete token did not match grammar expectations.
    UnexpectedToken,
    /// The lexer produced text that can never form a token.
    InvalidToken,
    /// Input ended before required grammar elements were found.
    UnexpectedEndOfInput,
    /// The token budget was exhausted.
    TokenLimitExceeded,
    /// The syntactic nesting budget was exhausted.
    NestingLimitExceeded,
    /// Parser requested lookahead beyond the supported bound.
    LookaheadExceeded,
    /// Lexer reported input that is not valid source text.
    MalformedInput,
    /// Lexer or parser reached a state it should never reach.
    InternalInvariant,
}

impl ParseErrorKind {
    /// Returns `true` for errors that say nothing about the input's syntax.
    pub fn is_fault(self) -> bool {
        matches!(
            self,
            Self::TokenLimitExceeded
                | Self::NestingLimitExceeded
                | Self::LookaheadExceeded
                | Self::MalformedInput
                | Self::InternalInvariant
        )
    }
}

/// Parser error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// Error category.
    pub kind: ParseErrorKind,
    /// Optional source span near the failure.
    pub span: Option<Span>,
    /// Expected token labels.
    pub expected: Vec<String>,
    /// Found token/terminal label.
    pub found: Option<String>,
    /// Lexer diagnostic for [`ParseErrorKind::InvalidToken`] and lexer faults.
    pub lexical: Option<LexDiagnostic>,
}

impl ParseError {
    /// Creates a parser error.
    pub fn new(
        kind: ParseErrorKind,
        span: Option<Span>,
        expected: Vec<String>,
        found: Option<String>,
    ) -> Self {
        Self {
            kind,
            span,
            expected,
            found,
            lexical: None,
        }
    }

    /// Creates an `UnexpectedToken` error.
    pub fn unexpected_token(
        token: &Token,
        expected: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            Some(token.span),
            expected.into_iter().map(Into::into).collect(),
            Some(token.describe()),
        )
    }

    /// Creates an `InvalidToken` error from the lexer diagnostic of an illegal token.
    pub fn invalid_token(token: &Token, diagnostic: LexDiagnostic) -> Self {
        let mut error = Self::new(
            ParseErrorKind::InvalidToken,
            Some(token.span),
            Vec::new(),
            Some(token.lexeme.clone()),
        );
        error.lexical = Some(diagnostic);
        error
    }

    /// Creates an `UnexpectedEndOfInput` error.
    pub fn unexpected_end_of_input(
        span: Option<Span>,
        expected: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEndOfInput,
            span,
            expected.into_iter().map(Into::into).collect(),
            Some("EOF".to_string()),
        )
    }

    /// Creates a `TokenLimitExceeded` error.
    pub fn token_limit_exceeded(max: usize, span: Option<Span>) -> Self {
        Self::new(
            ParseErrorKind::TokenLimitExceeded,
            span,
            vec![format!("at most {max} tokens")],
            None,
        )
    }

    /// Creates a `NestingLimitExceeded` error.
    pub fn nesting_limit_exceeded(max: usize, span: Option<Span>) -> Self {
        Self::new(
            ParseErrorKind::NestingLimitExceeded,
            span,
            vec![format!("nesting depth <= {max}")],
            None,
        )
    }

    /// Creates a `LookaheadExceeded` error.
    pub fn lookahead_exceeded(requested: usize, max: usize) -> Self {
        Self::new(
            ParseErrorKind::LookaheadExceeded,
            None,
            vec![format!("lookahead <= {max}")],
            Some(format!("lookahead {requested}")),
        )
    }

    /// Creates an `InternalInvariant` error.
    pub fn internal_invariant(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::new(
            ParseErrorKind::InternalInvariant,
            span,
            Vec::new(),
            Some(message.into()),
        )
    }

    /// Wraps a fatal lexer error surfaced through the token stream.
    pub fn lexer_fault(error: &FatalLexError) -> Self {
        let kind = match error {
            FatalLexError::MalformedInput(_) => ParseErrorKind::MalformedInput,
            FatalLexError::InternalInvariant(_) => ParseErrorKind::InternalInvariant,
        };
        let diagnostic = error.diagnostic().clone();
        let mut parse_error = Self::new(
            kind,
            Some(diagnostic.span),
            Vec::new(),
            Some(diagnostic.message.clone()),
        );
        parse_error.lexical = Some(diagnostic);
        parse_error
    }

    /// Returns `true` when the error is a fault rather than a syntax verdict.
    pub fn is_fault(&self) -> bool {
        self.kind.is_fault()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::InvalidToken | ParseErrorKind::MalformedInput => {
                match &self.lexical {
                    Some(diagnostic) => write!(f, "{}", diagnostic.message),
                    None => write!(f, "invalid token"),
                }
            }
            ParseErrorKind::UnexpectedToken | ParseErrorKind::UnexpectedEndOfInput => {
                let found = self.found.as_deref().unwrap_or("EOF");
                write!(f, "syntax error: unexpected {found}")?;
                if !self.expected.is_empty() {
                    write!(f, ", expected {}", self.expected.join(" or "))?;
                }
                Ok(())
            }
            ParseErrorKind::TokenLimitExceeded => {
                write!(f, "token limit exceeded ({})", self.expected.join(", "))
            }
            ParseErrorKind::NestingLimitExceeded => {
                write!(f, "nesting limit exceeded ({})", self.expected.join(", "))
            }
            ParseErrorKind::LookaheadExceeded => write!(
                f,
                "{} exceeds supported {}",
                self.found.as_deref().unwrap_or("lookahead"),
                self.expected.join(", ")
            ),
            ParseErrorKind::InternalInvariant => write!(
                f,
                "internal invariant violated: {}",
                self.found.as_deref().unwrap_or("unknown")
            ),
        }
    }
}

impl std::error::Error for ParseError {}
