//! Syntax summaries produced by the parser.
//!
//! The front-end only needs to know that a statement reduces and what kind of
//! statement it is, so the parser keeps shapes rather than full trees.

use std::fmt;

use serde::Serialize;

use crate::lexer::Span;

/// Kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclKind {
    /// `import` declaration.
    Import,
    /// `const` declaration.
    Const,
    /// `var` declaration.
    Var,
    /// `type` declaration.
    Type,
    /// Function declaration.
    Func,
    /// Method declaration (function with receiver).
    Method,
}

/// Kind of a complete top-level statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatementKind {
    /// Declaration.
    Declaration(DeclKind),
    /// Expression statement.
    Expression,
    /// Channel send (`ch <- v`).
    Send,
    /// `x++` or `x--`.
    IncDec,
    /// `=` or compound assignment.
    Assignment,
    /// Short variable declaration (`:=`).
    ShortVarDecl,
    /// `go` statement.
    Go,
    /// `defer` statement.
    Defer,
    /// `return` statement.
    Return,
    /// `break` statement.
    Break,
    /// `continue` statement.
    Continue,
    /// `goto` statement.
    Goto,
    /// `fallthrough` statement.
    Fallthrough,
    /// Block statement.
    Block,
    /// `if` statement.
    If,
    /// Expression `switch` statement.
    Switch,
    /// Type `switch` statement.
    TypeSwitch,
    /// `select` statement.
    Select,
    /// `for` statement.
    For,
    /// Labeled statement.
    Labeled,
    /// Empty statement (only after a label).
    Empty,
}

impl StatementKind {
    /// Returns a short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Declaration(DeclKind::Import) => "import declaration",
            Self::Declaration(DeclKind::Const) => "const declaration",
            Self::Declaration(DeclKind::Var) => "var declaration",
            Self::Declaration(DeclKind::Type) => "type declaration",
            Self::Declaration(DeclKind::Func) => "function declaration",
            Self::Declaration(DeclKind::Method) => "method declaration",
            Self::Expression => "expression statement",
            Self::Send => "send statement",
            Self::IncDec => "increment statement",
            Self::Assignment => "assignment",
            Self::ShortVarDecl => "short variable declaration",
            Self::Go => "go statement",
            Self::Defer => "defer statement",
            Self::Return => "return statement",
            Self::Break => "break statement",
            Self::Continue => "continue statement",
            Self::Goto => "goto statement",
            Self::Fallthrough => "fallthrough statement",
            Self::Block => "block",
            Self::If => "if statement",
            Self::Switch => "switch statement",
            Self::TypeSwitch => "type switch statement",
            Self::Select => "select statement",
            Self::For => "for statement",
            Self::Labeled => "labeled statement",
            Self::Empty => "empty statement",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One reduced top-level statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopLevelStatement {
    /// Statement kind.
    pub kind: StatementKind,
    /// Source span, excluding the terminating `;`.
    pub span: Span,
}

/// Syntactic shape of a parsed expression.
///
/// Only the distinctions the grammar needs downstream are kept: whether an
/// operand may be followed by a composite literal body, whether it can be a
/// label, and whether it is a `.(type)` guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprShape {
    /// Bare identifier.
    Identifier,
    /// `pkg.Name` (or any `x.f` selector on an identifier).
    QualifiedName,
    /// Array, slice, map, or struct type used as an operand.
    LiteralType,
    /// `x.(type)`.
    TypeGuard,
    /// Any other expression.
    Other,
}

impl ExprShape {
    /// Returns `true` when a composite literal body may follow.
    pub fn is_literal_type(self) -> bool {
        matches!(self, Self::Identifier | Self::QualifiedName | Self::LiteralType)
    }

    /// Returns `true` for bare and qualified names.
    pub fn is_type_name(self) -> bool {
        matches!(self, Self::Identifier | Self::QualifiedName)
    }
}

/// Parsed expression summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expr {
    /// Expression shape.
    pub shape: ExprShape,
    /// Source span.
    pub span: Span,
}

impl Expr {
    /// Creates an expression summary.
    pub fn new(shape: ExprShape, span: Span) -> Self {
        Self { shape, span }
    }
}
