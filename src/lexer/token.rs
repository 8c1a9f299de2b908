//! Token and lexical step contracts.

use serde::Serialize;

use crate::lexer::diagnostics::{LexDiagnostic, RecoverableLexError};
use crate::lexer::span::Span;

/// Go keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    /// `break`
    Break,
    /// `case`
    Case,
    /// `chan`
    Chan,
    /// `const`
    Const,
    /// `continue`
    Continue,
    /// `default`
    Default,
    /// `defer`
    Defer,
    /// `else`
    Else,
    /// `fallthrough`
    Fallthrough,
    /// `for`
    For,
    /// `func`
    Func,
    /// `go`
    Go,
    /// `goto`
    Goto,
    /// `if`
    If,
    /// `import`
    Import,
    /// `interface`
    Interface,
    /// `map`
    Map,
    /// `package`
    Package,
    /// `range`
    Range,
    /// `return`
    Return,
    /// `select`
    Select,
    /// `struct`
    Struct,
    /// `switch`
    Switch,
    /// `type`
    Type,
    /// `var`
    Var,
}

impl Keyword {
    /// Parses an identifier lexeme into a keyword.
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "break" => Some(Self::Break),
            "case" => Some(Self::Case),
            "chan" => Some(Self::Chan),
            "const" => Some(Self::Const),
            "continue" => Some(Self::Continue),
            "default" => Some(Self::Default),
            "defer" => Some(Self::Defer),
            "else" => Some(Self::Else),
            "fallthrough" => Some(Self::Fallthrough),
            "for" => Some(Self::For),
            "func" => Some(Self::Func),
            "go" => Some(Self::Go),
            "goto" => Some(Self::Goto),
            "if" => Some(Self::If),
            "import" => Some(Self::Import),
            "interface" => Some(Self::Interface),
            "map" => Some(Self::Map),
            "package" => Some(Self::Package),
            "range" => Some(Self::Range),
            "return" => Some(Self::Return),
            "select" => Some(Self::Select),
            "struct" => Some(Self::Struct),
            "switch" => Some(Self::Switch),
            "type" => Some(Self::Type),
            "var" => Some(Self::Var),
            _ => None,
        }
    }

    /// Returns `true` when a newline after this keyword ends the statement.
    pub fn terminates_line(self) -> bool {
        matches!(
            self,
            Self::Break | Self::Continue | Self::Fallthrough | Self::Return
        )
    }
}

/// Literal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    /// Integer literal.
    Int,
    /// Floating-point literal.
    Float,
    /// Imaginary literal.
    Imaginary,
    /// Rune literal.
    Rune,
    /// Interpreted or raw string literal.
    String,
}

/// Go operators and punctuation, excluding `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperatorKind {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Quo,
    /// `%`
    Rem,
    /// `&`
    And,
    /// `|`
    Or,
    /// `^`
    Xor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `&^`
    AndNot,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    QuoAssign,
    /// `%=`
    RemAssign,
    /// `&=`
    AndAssign,
    /// `|=`
    OrAssign,
    /// `^=`
    XorAssign,
    /// `<<=`
    ShlAssign,
    /// `>>=`
    ShrAssign,
    /// `&^=`
    AndNotAssign,
    /// `&&`
    LogicalAnd,
    /// `||`
    LogicalOr,
    /// `<-`
    Arrow,
    /// `++`
    Inc,
    /// `--`
    Dec,
    /// `==`
    Eql,
    /// `<`
    Lss,
    /// `>`
    Gtr,
    /// `=`
    Assign,
    /// `!`
    Not,
    /// `!=`
    Neq,
    /// `<=`
    Leq,
    /// `>=`
    Geq,
    /// `:=`
    Define,
    /// `...`
    Ellipsis,
    /// `(`
    LeftParen,
    /// `[`
    LeftBracket,
    /// `{`
    LeftBrace,
    /// `,`
    Comma,
    /// `.`
    Period,
    /// `)`
    RightParen,
    /// `]`
    RightBracket,
    /// `}`
    RightBrace,
    /// `:`
    Colon,
    /// `~`
    Tilde,
}

impl OperatorKind {
    /// Returns binary precedence (`1..=5`), or `0` for non-binary operators.
    pub fn binary_precedence(self) -> u8 {
        match self {
            Self::LogicalOr => 1,
            Self::LogicalAnd => 2,
            Self::Eql | Self::Neq | Self::Lss | Self::Leq | Self::Gtr | Self::Geq => 3,
            Self::Add | Self::Sub | Self::Or | Self::Xor => 4,
            Self::Mul | Self::Quo | Self::Rem | Self::Shl | Self::Shr | Self::And | Self::AndNot => {
                5
            }
            _ => 0,
        }
    }

    /// Returns `true` for `=` and the compound assignment operators.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::AddAssign
                | Self::SubAssign
                | Self::MulAssign
                | Self::QuoAssign
                | Self::RemAssign
                | Self::AndAssign
                | Self::OrAssign
                | Self::XorAssign
                | Self::ShlAssign
                | Self::ShrAssign
                | Self::AndNotAssign
        )
    }

    /// Returns `true` when a newline after this operator ends the statement.
    pub fn terminates_line(self) -> bool {
        matches!(
            self,
            Self::Inc | Self::Dec | Self::RightParen | Self::RightBracket | Self::RightBrace
        )
    }
}

/// Origin of a `;` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SemicolonKind {
    /// Written in the source.
    Explicit,
    /// Inserted at a newline (or a block comment spanning lines).
    Newline,
    /// Inserted at end of input.
    EndOfInput,
}

/// Token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Identifier.
    Identifier,
    /// Reserved keyword.
    Keyword(Keyword),
    /// Literal value.
    Literal(LiteralKind),
    /// Operator or punctuation.
    Operator(OperatorKind),
    /// Statement terminator.
    Semicolon(SemicolonKind),
    /// Text that can never form a token.
    Illegal,
}

impl TokenKind {
    /// Returns `true` when a newline after this token inserts a `;`.
    pub fn terminates_line(self) -> bool {
        match self {
            Self::Identifier | Self::Literal(_) => true,
            Self::Keyword(keyword) => keyword.terminates_line(),
            Self::Operator(operator) => operator.terminates_line(),
            Self::Semicolon(_) | Self::Illegal => false,
        }
    }
}

/// A lexical token with raw text and source span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Token category.
    pub kind: TokenKind,
    /// Token text preserved as scanned.
    pub lexeme: String,
    /// Byte-oriented source span.
    pub span: Span,
}

impl Token {
    /// Creates a token value.
    pub fn new(kind: TokenKind, lexeme: String, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// Returns the operator kind when this token is an operator.
    pub fn operator(&self) -> Option<OperatorKind> {
        match self.kind {
            TokenKind::Operator(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns a short label for diagnostics (`newline`, `EOF`, or the lexeme).
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Semicolon(SemicolonKind::Newline) => "newline".to_string(),
            TokenKind::Semicolon(SemicolonKind::EndOfInput) => "EOF".to_string(),
            TokenKind::Literal(_) => format!("literal {}", self.lexeme),
            TokenKind::Keyword(_) => format!("keyword {}", self.lexeme),
            TokenKind::Identifier => format!("name {}", self.lexeme),
            _ => self.lexeme.clone(),
        }
    }
}

/// One step produced by [`crate::lexer::Lexer::next_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexStep {
    /// A concrete token was produced.
    Token(Token),
    /// A token was cut off by the end of input; more text may complete it.
    ///
    /// The token kind is final: every completion of the text yields a token
    /// of the same kind.
    Truncated(Token, RecoverableLexError),
    /// Text that can never be valid; carried as a [`TokenKind::Illegal`] token
    /// so the parser rejects it at the position where it appears.
    Invalid(Token, LexDiagnostic),
    /// Input ended inside a construct that produces no token (a block comment).
    Incomplete(RecoverableLexError),
    /// End of input was reached.
    EndOfInput,
}
