//! Quoted literal scanning: interpreted strings, raw strings, and runes.

use crate::lexer::cursor::Cursor;
use crate::lexer::diagnostics::{
    DiagnosticCode, LexDiagnostic, RecoverableLexError, near_text_snippet, suggestion_close,
};
use crate::lexer::literal::LiteralScan;
use crate::lexer::span::{ByteOffset, SourceId, Span};
use crate::lexer::token::LiteralKind;

/// Outcome of scanning one escape sequence.
enum EscapeScan {
    Valid,
    Invalid(LexDiagnostic),
    Truncated,
}

/// Scans `"..."` starting at the opening quote.
pub(crate) fn scan_interpreted_string(
    cursor: &mut Cursor,
    input: &str,
    source_id: SourceId,
) -> LiteralScan {
    let start = cursor.offset();
    let _ = cursor.advance_char(input);
    let mut invalid = None;

    loop {
        match cursor.peek_char(input) {
            None => {
                return LiteralScan::Truncated(
                    LiteralKind::String,
                    RecoverableLexError::UnterminatedString(unterminated(
                        DiagnosticCode::UnterminatedString,
                        "string literal not terminated",
                        "string",
                        "\"",
                        source_id,
                        input,
                        start,
                        cursor.offset(),
                    )),
                );
            }
            Some('"') => {
                let _ = cursor.advance_char(input);
                break;
            }
            Some('\n') => {
                let diagnostic = LexDiagnostic::with_context(
                    DiagnosticCode::NewlineInString,
                    "newline in string",
                    Span::new(source_id, start, cursor.offset()),
                    near_text_snippet(input, start, cursor.offset()),
                    Some("use a raw string (`...`) or `\\n` for multi-line text.".to_string()),
                );
                return LiteralScan::Invalid(invalid.unwrap_or(diagnostic));
            }
            Some('\\') => match scan_escape(cursor, input, source_id, '"') {
                EscapeScan::Valid => {}
                EscapeScan::Invalid(diagnostic) => {
                    invalid.get_or_insert(diagnostic);
                }
                EscapeScan::Truncated => {
                    return LiteralScan::Truncated(
                        LiteralKind::String,
                        RecoverableLexError::UnterminatedString(unterminated(
                            DiagnosticCode::UnterminatedString,
                            "escape sequence not terminated",
                            "string",
                            "\"",
                            source_id,
                            input,
                            start,
                            cursor.offset(),
                        )),
                    );
                }
            },
            Some(_) => {
                let _ = cursor.advance_char(input);
            }
        }
    }

    match invalid {
        Some(diagnostic) => LiteralScan::Invalid(diagnostic),
        None => LiteralScan::Complete(LiteralKind::String),
    }
}

/// Scans a backquoted raw string starting at the opening backquote.
pub(crate) fn scan_raw_string(cursor: &mut Cursor, input: &str, source_id: SourceId) -> LiteralScan {
    let start = cursor.offset();
    let _ = cursor.advance_char(input);

    loop {
        match cursor.advance_char(input) {
            Some('`') => return LiteralScan::Complete(LiteralKind::String),
            Some(_) => {}
            None => {
                return LiteralScan::Truncated(
                    LiteralKind::String,
                    RecoverableLexError::UnterminatedRawString(unterminated(
                        DiagnosticCode::UnterminatedRawString,
                        "raw string literal not terminated",
                        "raw string",
                        "`",
                        source_id,
                        input,
                        start,
                        cursor.offset(),
                    )),
                );
            }
        }
    }
}

/// Scans `'...'` starting at the opening quote.
pub(crate) fn scan_rune(cursor: &mut Cursor, input: &str, source_id: SourceId) -> LiteralScan {
    let start = cursor.offset();
    let _ = cursor.advance_char(input);
    let mut count = 0usize;
    let mut invalid = None;

    loop {
        match cursor.peek_char(input) {
            None => {
                return LiteralScan::Truncated(
                    LiteralKind::Rune,
                    RecoverableLexError::UnterminatedRune(unterminated(
                        DiagnosticCode::UnterminatedRune,
                        "rune literal not terminated",
                        "rune literal",
                        "'",
                        source_id,
                        input,
                        start,
                        cursor.offset(),
                    )),
                );
            }
            Some('\'') => {
                let _ = cursor.advance_char(input);
                if count == 0 {
                    invalid.get_or_insert(LexDiagnostic::new(
                        DiagnosticCode::EmptyRune,
                        "empty rune literal or unescaped ' in rune literal",
                        Span::new(source_id, start, cursor.offset()),
                    ));
                }
                break;
            }
            Some('\n') => {
                let diagnostic = LexDiagnostic::new(
                    DiagnosticCode::NewlineInRune,
                    "newline in rune literal",
                    Span::new(source_id, start, cursor.offset()),
                );
                return LiteralScan::Invalid(invalid.unwrap_or(diagnostic));
            }
            Some('\\') => {
                count += 1;
                match scan_escape(cursor, input, source_id, '\'') {
                    EscapeScan::Valid => {}
                    EscapeScan::Invalid(diagnostic) => {
                        invalid.get_or_insert(diagnostic);
                    }
                    EscapeScan::Truncated => {
                        return LiteralScan::Truncated(
                            LiteralKind::Rune,
                            RecoverableLexError::UnterminatedRune(unterminated(
                                DiagnosticCode::UnterminatedRune,
                                "escape sequence not terminated",
                                "rune literal",
                                "'",
                                source_id,
                                input,
                                start,
                                cursor.offset(),
                            )),
                        );
                    }
                }
            }
            Some(_) => {
                count += 1;
                let _ = cursor.advance_char(input);
            }
        }
    }

    if invalid.is_none() && count > 1 {
        invalid = Some(LexDiagnostic::new(
            DiagnosticCode::RuneTooLong,
            "more than one character in rune literal",
            Span::new(source_id, start, cursor.offset()),
        ));
    }

    match invalid {
        Some(diagnostic) => LiteralScan::Invalid(diagnostic),
        None => LiteralScan::Complete(LiteralKind::Rune),
    }
}

fn scan_escape(cursor: &mut Cursor, input: &str, source_id: SourceId, quote: char) -> EscapeScan {
    let start = cursor.offset();
    let _ = cursor.advance_char(input);

    let Some(ch) = cursor.peek_char(input) else {
        return EscapeScan::Truncated;
    };

    let (digits, base, max) = match ch {
        'a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\' => {
            let _ = cursor.advance_char(input);
            return EscapeScan::Valid;
        }
        ch if ch == quote => {
            let _ = cursor.advance_char(input);
            return EscapeScan::Valid;
        }
        '0'..='7' => (3, 8, 255),
        'x' => {
            let _ = cursor.advance_char(input);
            (2, 16, 255)
        }
        'u' => {
            let _ = cursor.advance_char(input);
            (4, 16, 0x10_FFFF)
        }
        'U' => {
            let _ = cursor.advance_char(input);
            (8, 16, 0x10_FFFF)
        }
        _ => {
            return EscapeScan::Invalid(LexDiagnostic::new(
                DiagnosticCode::InvalidEscape,
                "unknown escape sequence",
                Span::new(source_id, start, cursor.offset()),
            ));
        }
    };

    let mut value: u32 = 0;
    for _ in 0..digits {
        let Some(ch) = cursor.peek_char(input) else {
            return EscapeScan::Truncated;
        };
        let Some(digit) = ch.to_digit(base) else {
            return EscapeScan::Invalid(LexDiagnostic::new(
                DiagnosticCode::InvalidEscape,
                format!("illegal character {ch:?} in escape sequence"),
                Span::new(source_id, start, cursor.offset()),
            ));
        };
        value = value * base + digit;
        let _ = cursor.advance_char(input);
    }

    if value > max || (0xD800..0xE000).contains(&value) {
        return EscapeScan::Invalid(LexDiagnostic::new(
            DiagnosticCode::InvalidEscape,
            "escape sequence is invalid Unicode code point",
            Span::new(source_id, start, cursor.offset()),
        ));
    }

    EscapeScan::Valid
}

#[allow(clippy::too_many_arguments)]
fn unterminated(
    code: DiagnosticCode,
    message: &str,
    construct: &str,
    closer: &str,
    source_id: SourceId,
    input: &str,
    start: ByteOffset,
    end: ByteOffset,
) -> LexDiagnostic {
    LexDiagnostic::with_context(
        code,
        message,
        Span::new(source_id, start, end),
        near_text_snippet(input, start, end),
        Some(suggestion_close(construct, closer)),
    )
}
