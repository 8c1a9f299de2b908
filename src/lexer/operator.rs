//! Operator scanning helpers for longest-match tokenization.

use crate::lexer::cursor::Cursor;
use crate::lexer::span::ByteOffset;
use crate::lexer::token::OperatorKind;

/// Result of scanning one operator token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OperatorScan {
    /// Operator category.
    pub(crate) kind: OperatorKind,
    /// Exact source lexeme.
    pub(crate) lexeme: &'static str,
    /// Source start offset.
    pub(crate) start: ByteOffset,
    /// Source end offset.
    pub(crate) end: ByteOffset,
}

const THREE_BYTE: &[(&[u8; 3], OperatorKind, &str)] = &[
    (b"<<=", OperatorKind::ShlAssign, "<<="),
    (b">>=", OperatorKind::ShrAssign, ">>="),
    (b"&^=", OperatorKind::AndNotAssign, "&^="),
    (b"...", OperatorKind::Ellipsis, "..."),
];

const TWO_BYTE: &[(&[u8; 2], OperatorKind, &str)] = &[
    (b"<<", OperatorKind::Shl, "<<"),
    (b">>", OperatorKind::Shr, ">>"),
    (b"&^", OperatorKind::AndNot, "&^"),
    (b"+=", OperatorKind::AddAssign, "+="),
    (b"-=", OperatorKind::SubAssign, "-="),
    (b"*=", OperatorKind::MulAssign, "*="),
    (b"/=", OperatorKind::QuoAssign, "/="),
    (b"%=", OperatorKind::RemAssign, "%="),
    (b"&=", OperatorKind::AndAssign, "&="),
    (b"|=", OperatorKind::OrAssign, "|="),
    (b"^=", OperatorKind::XorAssign, "^="),
    (b"&&", OperatorKind::LogicalAnd, "&&"),
    (b"||", OperatorKind::LogicalOr, "||"),
    (b"<-", OperatorKind::Arrow, "<-"),
    (b"++", OperatorKind::Inc, "++"),
    (b"--", OperatorKind::Dec, "--"),
    (b"==", OperatorKind::Eql, "=="),
    (b"!=", OperatorKind::Neq, "!="),
    (b"<=", OperatorKind::Leq, "<="),
    (b">=", OperatorKind::Geq, ">="),
    (b":=", OperatorKind::Define, ":="),
];

/// Scans an operator at cursor position using longest-match rules.
pub(crate) fn scan_operator(cursor: &mut Cursor, input: &str) -> Option<OperatorScan> {
    let start = cursor.offset();
    let (kind, lexeme) = match_operator_at(input, start)?;
    cursor.advance_by(lexeme.len(), input);
    let end = cursor.offset();

    Some(OperatorScan {
        kind,
        lexeme,
        start,
        end,
    })
}

fn match_operator_at(input: &str, offset: ByteOffset) -> Option<(OperatorKind, &'static str)> {
    let bytes = input.as_bytes();
    let start = offset.as_usize();
    if start >= bytes.len() {
        return None;
    }
    let tail = &bytes[start..];

    // Longest-match precedence.
    if tail.len() >= 3
        && let Some((_, kind, lexeme)) = THREE_BYTE.iter().find(|(seq, _, _)| &tail[..3] == *seq)
    {
        return Some((*kind, *lexeme));
    }

    if tail.len() >= 2
        && let Some((_, kind, lexeme)) = TWO_BYTE.iter().find(|(seq, _, _)| &tail[..2] == *seq)
    {
        return Some((*kind, *lexeme));
    }

    match tail[0] {
        b'+' => Some((OperatorKind::Add, "+")),
        b'-' => Some((OperatorKind::Sub, "-")),
        b'*' => Some((OperatorKind::Mul, "*")),
        b'/' => Some((OperatorKind::Quo, "/")),
        b'%' => Some((OperatorKind::Rem, "%")),
        b'&' => Some((OperatorKind::And, "&")),
        b'|' => Some((OperatorKind::Or, "|")),
        b'^' => Some((OperatorKind::Xor, "^")),
        b'<' => Some((OperatorKind::Lss, "<")),
        b'>' => Some((OperatorKind::Gtr, ">")),
        b'=' => Some((OperatorKind::Assign, "=")),
        b'!' => Some((OperatorKind::Not, "!")),
        b'(' => Some((OperatorKind::LeftParen, "(")),
        b'[' => Some((OperatorKind::LeftBracket, "[")),
        b'{' => Some((OperatorKind::LeftBrace, "{")),
        b',' => Some((OperatorKind::Comma, ",")),
        b'.' => Some((OperatorKind::Period, ".")),
        b')' => Some((OperatorKind::RightParen, ")")),
        b']' => Some((OperatorKind::RightBracket, "]")),
        b'}' => Some((OperatorKind::RightBrace, "}")),
        b':' => Some((OperatorKind::Colon, ":")),
        b'~' => Some((OperatorKind::Tilde, "~")),
        _ => None,
    }
}
