//! Go-subset lexer.
//!
//! The lexer produces one [`LexStep`] at a time and performs Go's automatic
//! semicolon insertion, so newline sensitivity is fully resolved before the
//! parser sees the stream. Conditions that more input could repair (an open
//! string, comment, or numeric prefix at end of input) are reported apart from
//! text that can never form a token, and both apart from encoding problems.

pub mod diagnostics;
pub mod span;
pub mod token;

mod cursor;
mod literal;
mod operator;
mod quote;

use crate::lexer::cursor::Cursor;
use crate::lexer::literal::{LiteralScan, scan_number};
use crate::lexer::operator::scan_operator;
use crate::lexer::quote::{scan_interpreted_string, scan_raw_string, scan_rune};

pub use diagnostics::{DiagnosticCode, FatalLexError, LexDiagnostic, RecoverableLexError};
pub use span::{ByteOffset, LineIndex, Position, SourceId, Span};
pub use token::{
    Keyword, LexStep, LiteralKind, OperatorKind, SemicolonKind, Token, TokenKind,
};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Go-subset lexer over a borrowed source string.
pub struct Lexer<'a> {
    input: &'a str,
    source_id: SourceId,
    cursor: Cursor,
    insert_semicolon: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer for the provided input.
    ///
    /// A leading byte-order mark is skipped.
    pub fn new(input: &'a str) -> Self {
        let mut cursor = Cursor::new();
        if input.starts_with(BYTE_ORDER_MARK) {
            cursor.advance_by(BYTE_ORDER_MARK.len_utf8(), input);
        }

        Self {
            input,
            source_id: SourceId::new(0),
            cursor,
            insert_semicolon: false,
        }
    }

    /// Sets the source id attached to produced spans.
    pub fn with_source_id(mut self, source_id: SourceId) -> Self {
        self.source_id = source_id;
        self
    }

    /// Returns the input being scanned.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the source id attached to produced spans.
    pub fn source_id(&self) -> SourceId {
        self.source_id
    }

    /// Returns the current byte offset.
    pub fn offset(&self) -> ByteOffset {
        self.cursor.offset()
    }

    /// Scans and returns the next lexical step.
    ///
    /// A [`LexStep::Truncated`] or [`LexStep::Incomplete`] step consumes the
    /// rest of the input, and no `;` is inserted after it. Once the input is
    /// exhausted every further call returns [`LexStep::EndOfInput`].
    pub fn next_token(&mut self) -> Result<LexStep, FatalLexError> {
        loop {
            self.skip_horizontal_whitespace();

            let start = self.cursor.offset();
            let Some(ch) = self.cursor.peek_char(self.input) else {
                if self.insert_semicolon {
                    self.insert_semicolon = false;
                    return Ok(LexStep::Token(self.token_at(
                        TokenKind::Semicolon(SemicolonKind::EndOfInput),
                        start,
                        start,
                    )));
                }
                return Ok(LexStep::EndOfInput);
            };

            match ch {
                '\n' => {
                    self.cursor.advance_by(1, self.input);
                    if self.insert_semicolon {
                        self.insert_semicolon = false;
                        return Ok(LexStep::Token(self.token_at(
                            TokenKind::Semicolon(SemicolonKind::Newline),
                            start,
                            self.cursor.offset(),
                        )));
                    }
                }
                '\0' => {
                    return Err(self.malformed(
                        DiagnosticCode::NulCharacter,
                        "invalid NUL character",
                        start,
                    ));
                }
                BYTE_ORDER_MARK => {
                    return Err(self.malformed(
                        DiagnosticCode::MisplacedByteOrderMark,
                        "invalid BOM in the middle of the input",
                        start,
                    ));
                }
                ';' => {
                    self.cursor.advance_by(1, self.input);
                    self.insert_semicolon = false;
                    return Ok(LexStep::Token(self.token_at(
                        TokenKind::Semicolon(SemicolonKind::Explicit),
                        start,
                        self.cursor.offset(),
                    )));
                }
                '/' if self.cursor.starts_with(self.input, "//") => {
                    self.cursor.advance_while(self.input, |ch| ch != '\n');
                }
                '/' if self.cursor.starts_with(self.input, "/*") => {
                    if let Some(step) = self.scan_block_comment()? {
                        return Ok(step);
                    }
                }
                _ => return self.scan_token(ch),
            }
        }
    }

    /// Scans the remaining input into a step list.
    ///
    /// The list ends before [`LexStep::EndOfInput`]; an [`LexStep::Incomplete`]
    /// step, when present, is last.
    pub fn collect_steps(&mut self) -> Result<Vec<LexStep>, FatalLexError> {
        let mut steps = Vec::new();
        loop {
            match self.next_token()? {
                LexStep::EndOfInput => return Ok(steps),
                step @ LexStep::Incomplete(_) => {
                    steps.push(step);
                    return Ok(steps);
                }
                step => steps.push(step),
            }
        }
    }

    fn scan_token(&mut self, ch: char) -> Result<LexStep, FatalLexError> {
        let start = self.cursor.offset();

        if ch.is_alphabetic() || ch == '_' {
            self.cursor
                .advance_while(self.input, |ch| ch.is_alphanumeric() || ch == '_');
            let lexeme = &self.input[start.as_usize()..self.cursor.offset().as_usize()];
            let kind = match Keyword::from_lexeme(lexeme) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Identifier,
            };
            return Ok(self.finish(kind, start));
        }

        let starts_number = ch.is_ascii_digit()
            || (ch == '.'
                && self
                    .cursor
                    .peek_nth_char(self.input, 1)
                    .is_some_and(|next| next.is_ascii_digit()));
        let literal = if starts_number {
            Some(scan_number(&mut self.cursor, self.input, self.source_id))
        } else {
            match ch {
                '"' => Some(scan_interpreted_string(
                    &mut self.cursor,
                    self.input,
                    self.source_id,
                )),
                '`' => Some(scan_raw_string(&mut self.cursor, self.input, self.source_id)),
                '\'' => Some(scan_rune(&mut self.cursor, self.input, self.source_id)),
                _ => None,
            }
        };

        if let Some(scan) = literal {
            return Ok(match scan {
                LiteralScan::Complete(kind) => self.finish(TokenKind::Literal(kind), start),
                LiteralScan::Truncated(kind, error) => {
                    if !self.cursor.is_eof(self.input) {
                        return Err(self.invariant("truncated literal before end of input", start));
                    }
                    self.insert_semicolon = false;
                    let token =
                        self.token_at(TokenKind::Literal(kind), start, self.cursor.offset());
                    LexStep::Truncated(token, error)
                }
                LiteralScan::Invalid(diagnostic) => {
                    let token = self.token_at(TokenKind::Illegal, start, self.cursor.offset());
                    LexStep::Invalid(token, diagnostic)
                }
            });
        }

        if let Some(scan) = scan_operator(&mut self.cursor, self.input) {
            let token = Token::new(
                TokenKind::Operator(scan.kind),
                scan.lexeme.to_string(),
                Span::new(self.source_id, scan.start, scan.end),
            );
            self.insert_semicolon = token.kind.terminates_line();
            return Ok(LexStep::Token(token));
        }

        let _ = self.cursor.advance_char(self.input);
        let token = self.token_at(TokenKind::Illegal, start, self.cursor.offset());
        let diagnostic = LexDiagnostic::new(
            DiagnosticCode::InvalidCharacter,
            format!("invalid character U+{:04X} {ch:?}", u32::from(ch)),
            token.span,
        );
        Ok(LexStep::Invalid(token, diagnostic))
    }

    /// Scans `/* ... */`; a comment spanning lines acts like a newline.
    fn scan_block_comment(&mut self) -> Result<Option<LexStep>, FatalLexError> {
        let start = self.cursor.offset();
        self.cursor.advance_by(2, self.input);
        let mut saw_newline = false;

        loop {
            if self.cursor.starts_with(self.input, "*/") {
                self.cursor.advance_by(2, self.input);
                break;
            }
            match self.cursor.advance_char(self.input) {
                Some('\n') => saw_newline = true,
                Some('\0') => {
                    let at = ByteOffset::from_usize(self.cursor.offset().as_usize() - 1);
                    return Err(self.malformed(
                        DiagnosticCode::NulCharacter,
                        "invalid NUL character",
                        at,
                    ));
                }
                Some(_) => {}
                None => {
                    self.insert_semicolon = false;
                    let span = Span::new(self.source_id, start, self.cursor.offset());
                    let diagnostic = LexDiagnostic::with_context(
                        DiagnosticCode::UnterminatedComment,
                        "comment not terminated",
                        span,
                        diagnostics::near_text_snippet(self.input, start, self.cursor.offset()),
                        Some(diagnostics::suggestion_close("comment", "*/")),
                    );
                    return Ok(Some(LexStep::Incomplete(
                        RecoverableLexError::UnterminatedComment(diagnostic),
                    )));
                }
            }
        }

        if saw_newline && self.insert_semicolon {
            self.insert_semicolon = false;
            return Ok(Some(LexStep::Token(self.token_at(
                TokenKind::Semicolon(SemicolonKind::Newline),
                start,
                self.cursor.offset(),
            ))));
        }
        Ok(None)
    }

    fn skip_horizontal_whitespace(&mut self) {
        self.cursor
            .advance_while(self.input, |ch| matches!(ch, ' ' | '\t' | '\r'));
    }

    fn finish(&mut self, kind: TokenKind, start: ByteOffset) -> LexStep {
        self.insert_semicolon = kind.terminates_line();
        LexStep::Token(self.token_at(kind, start, self.cursor.offset()))
    }

    fn token_at(&self, kind: TokenKind, start: ByteOffset, end: ByteOffset) -> Token {
        let lexeme = match kind {
            TokenKind::Semicolon(SemicolonKind::Newline) => "\n".to_string(),
            TokenKind::Semicolon(SemicolonKind::EndOfInput) => String::new(),
            _ => self.input[start.as_usize()..end.as_usize()].to_string(),
        };
        Token::new(kind, lexeme, Span::new(self.source_id, start, end))
    }

    fn malformed(&self, code: DiagnosticCode, message: &str, at: ByteOffset) -> FatalLexError {
        let end = ByteOffset::from_usize(
            self.input[at.as_usize()..]
                .chars()
                .next()
                .map_or(at.as_usize(), |ch| at.as_usize() + ch.len_utf8()),
        );
        FatalLexError::MalformedInput(LexDiagnostic::new(
            code,
            message,
            Span::new(self.source_id, at, end),
        ))
    }

    fn invariant(&self, message: &str, at: ByteOffset) -> FatalLexError {
        FatalLexError::InternalInvariant(LexDiagnostic::new(
            DiagnosticCode::InternalInvariant,
            message,
            Span::point(self.source_id, at),
        ))
    }
}

/// Checks that `input` contains no encoding-level problems.
///
/// Rejects NUL characters anywhere and byte-order marks anywhere but the first
/// character. These conditions are independent of Go syntax, so they are
/// detected before any token is scanned.
pub fn check_encoding(input: &str, source_id: SourceId) -> Result<(), FatalLexError> {
    for (index, ch) in input.char_indices() {
        let (code, message) = match ch {
            '\0' => (DiagnosticCode::NulCharacter, "invalid NUL character"),
            BYTE_ORDER_MARK if index > 0 => (
                DiagnosticCode::MisplacedByteOrderMark,
                "invalid BOM in the middle of the input",
            ),
            _ => continue,
        };
        let span = Span::new(
            source_id,
            ByteOffset::from_usize(index),
            ByteOffset::from_usize(index + ch.len_utf8()),
        );
        return Err(FatalLexError::MalformedInput(LexDiagnostic::new(
            code, message, span,
        )));
    }
    Ok(())
}

/// Validates raw bytes as UTF-8 source text.
pub fn decode_source(bytes: &[u8], source_id: SourceId) -> Result<&str, FatalLexError> {
    std::str::from_utf8(bytes).map_err(|error| {
        let start = ByteOffset::from_usize(error.valid_up_to());
        let end = ByteOffset::from_usize(
            error.valid_up_to() + error.error_len().unwrap_or(bytes.len() - error.valid_up_to()),
        );
        FatalLexError::MalformedInput(LexDiagnostic::new(
            DiagnosticCode::InvalidEncoding,
            "invalid UTF-8 encoding",
            Span::new(source_id, start, end),
        ))
    })
}
