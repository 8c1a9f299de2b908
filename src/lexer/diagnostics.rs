//! Diagnostic and error contracts for the lexer.

use serde::Serialize;

use crate::lexer::span::{ByteOffset, Span};

/// Maximum number of bytes kept in [`LexDiagnostic::near_text`].
const NEAR_TEXT_LIMIT: usize = 24;

/// Stable diagnostic codes produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    /// End of input inside an interpreted string literal.
    UnterminatedString,
    /// End of input inside a raw string literal.
    UnterminatedRawString,
    /// End of input inside a rune literal.
    UnterminatedRune,
    /// End of input inside a block comment.
    UnterminatedComment,
    /// End of input before a numeric literal received its digits.
    IncompleteNumber,
    /// Newline inside an interpreted string literal.
    NewlineInString,
    /// Newline inside a rune literal.
    NewlineInRune,
    /// Rune literal with no character.
    EmptyRune,
    /// Rune literal with more than one character.
    RuneTooLong,
    /// Unknown or malformed escape sequence.
    InvalidEscape,
    /// Digit outside the literal's base.
    InvalidDigit,
    /// `_` that does not separate two digits.
    MisplacedSeparator,
    /// Numeric literal that can never be completed (for example `0x;`).
    MalformedNumber,
    /// Character that can never begin a token.
    InvalidCharacter,
    /// NUL character in the input.
    NulCharacter,
    /// Byte-order mark after the start of input.
    MisplacedByteOrderMark,
    /// Byte sequence that is not valid UTF-8.
    InvalidEncoding,
    /// An invariant required for scanning was violated.
    InternalInvariant,
}

/// User-facing diagnostic payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexDiagnostic {
    /// Machine-readable diagnostic code.
    pub code: DiagnosticCode,
    /// Human-readable message text.
    pub message: String,
    /// Source span associated with this diagnostic.
    pub span: Span,
    /// Source text near the problem, when available.
    pub near_text: Option<String>,
    /// Suggested fix, when one is obvious.
    pub suggestion: Option<String>,
}

impl LexDiagnostic {
    /// Creates a diagnostic value.
    pub fn new(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            near_text: None,
            suggestion: None,
        }
    }

    /// Creates a diagnostic value with optional context fields.
    pub fn with_context(
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
        near_text: Option<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            near_text,
            suggestion,
        }
    }
}

impl std::fmt::Display for LexDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(near) = &self.near_text {
            write!(f, " near `{near}`")?;
        }
        Ok(())
    }
}

/// Lexical condition that more input may resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverableLexError {
    /// Input ended inside `"..."`.
    UnterminatedString(LexDiagnostic),
    /// Input ended inside a backquoted raw string.
    UnterminatedRawString(LexDiagnostic),
    /// Input ended inside `'...'`.
    UnterminatedRune(LexDiagnostic),
    /// Input ended inside `/* ... */`.
    UnterminatedComment(LexDiagnostic),
    /// Input ended inside a numeric literal that still needs digits.
    IncompleteNumber(LexDiagnostic),
}

impl RecoverableLexError {
    /// Returns the diagnostic payload.
    pub fn diagnostic(&self) -> &LexDiagnostic {
        match self {
            Self::UnterminatedString(diagnostic)
            | Self::UnterminatedRawString(diagnostic)
            | Self::UnterminatedRune(diagnostic)
            | Self::UnterminatedComment(diagnostic)
            | Self::IncompleteNumber(diagnostic) => diagnostic,
        }
    }
}

/// Fatal lexical error.
///
/// These never describe Go syntax; they mean the text cannot be scanned at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FatalLexError {
    /// The input is not acceptable source text (NUL, stray byte-order mark,
    /// invalid UTF-8).
    #[error("malformed input at byte {}: {}", .0.span.start.value(), .0.message)]
    MalformedInput(LexDiagnostic),
    /// An invariant required for scanning was violated.
    #[error("lexer invariant violated: {}", .0.message)]
    InternalInvariant(LexDiagnostic),
}

impl FatalLexError {
    /// Returns the diagnostic payload.
    pub fn diagnostic(&self) -> &LexDiagnostic {
        match self {
            Self::MalformedInput(diagnostic) | Self::InternalInvariant(diagnostic) => diagnostic,
        }
    }
}

/// Returns a short, single-line snippet of `input` between two offsets.
pub(crate) fn near_text_snippet(
    input: &str,
    start: ByteOffset,
    end: ByteOffset,
) -> Option<String> {
    let start = start.as_usize().min(input.len());
    let end = end.as_usize().min(input.len());
    let text = input.get(start..end)?;
    let line = text.lines().next().unwrap_or_default();
    if line.is_empty() {
        return None;
    }

    let mut limit = line.len().min(NEAR_TEXT_LIMIT);
    while !line.is_char_boundary(limit) {
        limit -= 1;
    }
    Some(line[..limit].to_string())
}

/// Builds the suggestion text for an unterminated literal.
pub(crate) fn suggestion_close(construct: &str, closer: &str) -> String {
    format!("close the {construct} with `{closer}`.")
}
