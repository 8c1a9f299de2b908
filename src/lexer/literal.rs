//! Numeric literal scanning.

use crate::lexer::cursor::Cursor;
use crate::lexer::diagnostics::{
    DiagnosticCode, LexDiagnostic, RecoverableLexError, near_text_snippet,
};
use crate::lexer::span::{ByteOffset, SourceId, Span};
use crate::lexer::token::LiteralKind;

/// Result of scanning one literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LiteralScan {
    /// A well-formed literal.
    Complete(LiteralKind),
    /// End of input arrived before the literal could be finished.
    Truncated(LiteralKind, RecoverableLexError),
    /// The literal is malformed regardless of further input.
    Invalid(LexDiagnostic),
}

/// Digit run summary for one mantissa or exponent section.
#[derive(Debug, Default, Clone, Copy)]
struct DigitRun {
    has_digits: bool,
    invalid_digit: Option<char>,
}

/// Numeric base prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    None,
    LegacyOctal,
    Hex,
    Octal,
    Binary,
}

impl Prefix {
    fn base(self) -> u32 {
        match self {
            Self::None => 10,
            Self::LegacyOctal | Self::Octal => 8,
            Self::Hex => 16,
            Self::Binary => 2,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::None => "decimal literal",
            Self::LegacyOctal | Self::Octal => "octal literal",
            Self::Hex => "hexadecimal literal",
            Self::Binary => "binary literal",
        }
    }
}

/// Scans an integer, floating-point, or imaginary literal.
///
/// The cursor must rest on a decimal digit or on a `.` followed by one.
pub(crate) fn scan_number(cursor: &mut Cursor, input: &str, source_id: SourceId) -> LiteralScan {
    let start = cursor.offset();
    let mut kind = LiteralKind::Int;
    let mut prefix = Prefix::None;
    let mut mantissa = DigitRun::default();

    if cursor.peek_char(input) != Some('.') {
        if cursor.peek_char(input) == Some('0') {
            let _ = cursor.advance_char(input);
            match cursor.peek_char(input).map(|ch| ch.to_ascii_lowercase()) {
                Some('x') => {
                    let _ = cursor.advance_char(input);
                    prefix = Prefix::Hex;
                }
                Some('o') => {
                    let _ = cursor.advance_char(input);
                    prefix = Prefix::Octal;
                }
                Some('b') => {
                    let _ = cursor.advance_char(input);
                    prefix = Prefix::Binary;
                }
                _ => {
                    prefix = Prefix::LegacyOctal;
                    mantissa.has_digits = true;
                }
            }
        }
        scan_digits(cursor, input, prefix.base(), &mut mantissa);
    }

    if cursor.peek_char(input) == Some('.') {
        kind = LiteralKind::Float;
        if matches!(prefix, Prefix::Octal | Prefix::Binary) {
            let _ = cursor.advance_char(input);
            return invalid(
                DiagnosticCode::MalformedNumber,
                format!("invalid radix point in {}", prefix.name()),
                source_id,
                input,
                start,
                cursor.offset(),
            );
        }
        let _ = cursor.advance_char(input);
        scan_digits(cursor, input, prefix.base(), &mut mantissa);
    }

    if !mantissa.has_digits {
        return incomplete_or_invalid(
            cursor,
            kind,
            format!("{} has no digits", prefix.name()),
            source_id,
            input,
            start,
        );
    }

    let exponent = cursor.peek_char(input).map(|ch| ch.to_ascii_lowercase());
    if matches!(exponent, Some('e') | Some('p')) {
        let exponent = exponent.unwrap_or_default();
        if exponent == 'e' && !matches!(prefix, Prefix::None | Prefix::LegacyOctal) {
            // `e` is a hex digit, so only octal and binary literals reach here.
            let _ = cursor.advance_char(input);
            return invalid(
                DiagnosticCode::MalformedNumber,
                "'e' exponent requires decimal mantissa",
                source_id,
                input,
                start,
                cursor.offset(),
            );
        }
        if exponent == 'p' && prefix != Prefix::Hex {
            let _ = cursor.advance_char(input);
            return invalid(
                DiagnosticCode::MalformedNumber,
                "'p' exponent requires hexadecimal mantissa",
                source_id,
                input,
                start,
                cursor.offset(),
            );
        }

        let _ = cursor.advance_char(input);
        kind = LiteralKind::Float;
        if matches!(cursor.peek_char(input), Some('+') | Some('-')) {
            let _ = cursor.advance_char(input);
        }
        let mut run = DigitRun::default();
        scan_digits(cursor, input, 10, &mut run);
        if !run.has_digits {
            return incomplete_or_invalid(
                cursor,
                kind,
                "exponent has no digits".to_string(),
                source_id,
                input,
                start,
            );
        }
    } else if prefix == Prefix::Hex && kind == LiteralKind::Float {
        return incomplete_or_invalid(
            cursor,
            kind,
            "hexadecimal mantissa requires a 'p' exponent".to_string(),
            source_id,
            input,
            start,
        );
    }

    if cursor.peek_char(input) == Some('i') {
        let _ = cursor.advance_char(input);
        kind = LiteralKind::Imaginary;
    }

    let lexeme = &input[start.as_usize()..cursor.offset().as_usize()];

    if let Some(digit) = mantissa.invalid_digit {
        let legacy_int = prefix == Prefix::LegacyOctal && kind == LiteralKind::Int;
        if prefix != Prefix::LegacyOctal || legacy_int {
            // `08` may still grow into the float `08.5`.
            if legacy_int && cursor.is_eof(input) {
                return truncated(
                    kind,
                    format!("invalid digit {digit:?} in octal literal"),
                    source_id,
                    input,
                    start,
                    cursor.offset(),
                );
            }
            return invalid(
                DiagnosticCode::InvalidDigit,
                format!("invalid digit {digit:?} in {}", prefix.name()),
                source_id,
                input,
                start,
                cursor.offset(),
            );
        }
    }

    if let Some(index) = misplaced_separator(lexeme) {
        if index + 1 == lexeme.len() && cursor.is_eof(input) {
            return truncated(
                kind,
                "'_' must separate successive digits".to_string(),
                source_id,
                input,
                start,
                cursor.offset(),
            );
        }
        return invalid(
            DiagnosticCode::MisplacedSeparator,
            "'_' must separate successive digits",
            source_id,
            input,
            start,
            cursor.offset(),
        );
    }

    LiteralScan::Complete(kind)
}

fn scan_digits(cursor: &mut Cursor, input: &str, base: u32, run: &mut DigitRun) {
    while let Some(ch) = cursor.peek_char(input) {
        if ch == '_' {
            let _ = cursor.advance_char(input);
            continue;
        }

        let max = if base <= 10 { 10 } else { base };
        let Some(value) = ch.to_digit(max) else {
            break;
        };
        if value >= base && run.invalid_digit.is_none() {
            run.invalid_digit = Some(ch);
        }
        run.has_digits = true;
        let _ = cursor.advance_char(input);
    }
}

/// Returns the byte index of the first `_` that does not separate digits.
///
/// A `_` directly after a base prefix (`0x_1`) is allowed.
fn misplaced_separator(lexeme: &str) -> Option<usize> {
    let bytes = lexeme.as_bytes();
    let prefixed = bytes.len() >= 2
        && bytes[0] == b'0'
        && matches!(bytes[1].to_ascii_lowercase(), b'x' | b'o' | b'b');

    for (index, byte) in bytes.iter().copied().enumerate() {
        if byte != b'_' {
            continue;
        }
        let before = index.checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(index + 1).copied();
        let before_ok = before.is_some_and(|b| b.is_ascii_hexdigit()) || (prefixed && index == 2);
        let after_ok = after.is_some_and(|b| b.is_ascii_hexdigit());
        if !before_ok || !after_ok {
            return Some(index);
        }
    }
    None
}

fn incomplete_or_invalid(
    cursor: &Cursor,
    kind: LiteralKind,
    message: String,
    source_id: SourceId,
    input: &str,
    start: ByteOffset,
) -> LiteralScan {
    if cursor.is_eof(input) {
        truncated(kind, message, source_id, input, start, cursor.offset())
    } else {
        invalid(
            DiagnosticCode::MalformedNumber,
            message,
            source_id,
            input,
            start,
            cursor.offset(),
        )
    }
}

fn truncated(
    kind: LiteralKind,
    message: String,
    source_id: SourceId,
    input: &str,
    start: ByteOffset,
    end: ByteOffset,
) -> LiteralScan {
    LiteralScan::Truncated(
        kind,
        RecoverableLexError::IncompleteNumber(LexDiagnostic::with_context(
            DiagnosticCode::IncompleteNumber,
            message,
            Span::new(source_id, start, end),
            near_text_snippet(input, start, end),
            None,
        )),
    )
}

fn invalid(
    code: DiagnosticCode,
    message: impl Into<String>,
    source_id: SourceId,
    input: &str,
    start: ByteOffset,
    end: ByteOffset,
) -> LiteralScan {
    LiteralScan::Invalid(LexDiagnostic::with_context(
        code,
        message,
        Span::new(source_id, start, end),
        near_text_snippet(input, start, end),
        None,
    ))
}
