//! Classification errors.

use thiserror::Error;

use crate::front::outcome::ParseOutcome;
use crate::lexer::{FatalLexError, LexDiagnostic};
use crate::parser::{ParseError, ParseErrorKind};

/// A condition that says nothing about the fragment's syntax.
///
/// Never reclassified as a syntax error or as EOF-pending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalFault {
    #[error("contradictory parse signals: {outcome:?}")]
    ConflictingSignals { outcome: ParseOutcome },

    #[error("classification cannot be both EOF-pending and a syntax error")]
    InvalidClassification,

    #[error("parser fault: {0}")]
    Parser(#[from] ParseError),

    #[error("grammar panicked: {message}")]
    Panic { message: String },

    #[error("cannot start the parse thread: {message}")]
    ParseThread { message: String },
}

/// Failure of one classification call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("malformed input: {0}")]
    MalformedInput(LexDiagnostic),

    #[error(transparent)]
    InternalFault(#[from] InternalFault),
}

impl ClassifyError {
    /// Returns `true` for [`ClassifyError::MalformedInput`].
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }

    /// Lexical diagnostic attached to the error, if any.
    pub fn diagnostic(&self) -> Option<&LexDiagnostic> {
        match self {
            Self::MalformedInput(diagnostic) => Some(diagnostic),
            Self::InternalFault(InternalFault::Parser(error)) => error.lexical.as_ref(),
            Self::InternalFault(_) => None,
        }
    }
}

impl From<FatalLexError> for ClassifyError {
    fn from(error: FatalLexError) -> Self {
        match error {
            FatalLexError::MalformedInput(diagnostic) => Self::MalformedInput(diagnostic),
            FatalLexError::InternalInvariant(_) => {
                Self::InternalFault(InternalFault::Parser(ParseError::lexer_fault(&error)))
            }
        }
    }
}

impl From<ParseError> for ClassifyError {
    fn from(error: ParseError) -> Self {
        match (error.kind, &error.lexical) {
            (ParseErrorKind::MalformedInput, Some(diagnostic)) => {
                Self::MalformedInput(diagnostic.clone())
            }
            _ => Self::InternalFault(InternalFault::Parser(error)),
        }
    }
}
