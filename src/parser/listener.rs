//! Diagnostic listener contracts.
//!
//! The parser never prints and never aborts on a syntax problem. Every
//! problem it finds is handed to a [`DiagnosticListener`], and the caller
//! decides what to keep.

use serde::Serialize;

use crate::lexer::{Position, Span};

/// Which stage produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Tokenization problem: invalid or unterminated token.
    Lexer,
    /// Grammar problem: a token the grammar cannot accept, or missing tokens.
    Parser,
}

/// What the parser was looking at when the problem was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Offending {
    /// A concrete token, by its source text.
    Token(String),
    /// The end of the input.
    EndOfInput,
}

impl Offending {
    /// Returns `true` for [`Offending::EndOfInput`].
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Producing stage.
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
    /// Source span of the offending text.
    pub span: Span,
    /// One-based line and column of `span.start`.
    pub position: Position,
    /// Offending token or end of input.
    pub offending: Offending,
}

impl Diagnostic {
    /// Creates a diagnostic value.
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        span: Span,
        position: Position,
        offending: Offending,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            position,
            offending,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

/// Sink for diagnostics produced during one parse attempt.
pub trait DiagnosticListener {
    /// Receives one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Returns `true` once the listener wants no further diagnostics.
    fn is_saturated(&self) -> bool {
        false
    }
}

/// Listener that keeps diagnostics in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    limit: Option<usize>,
}

impl DiagnosticCollector {
    /// Creates an unbounded collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collector that keeps at most `limit` diagnostics.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            diagnostics: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Clears collected diagnostics before a new attempt.
    pub fn reset(&mut self) {
        self.diagnostics.clear();
    }

    /// Returns collected diagnostics in report order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the first collected diagnostic.
    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }

    /// Returns the number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` when nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Moves the collected diagnostics out, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl DiagnosticListener for DiagnosticCollector {
    fn report(&mut self, diagnostic: Diagnostic) {
        if self.is_saturated() {
            return;
        }
        tracing::trace!(
            kind = ?diagnostic.kind,
            position = %diagnostic.position,
            message = %diagnostic.message,
            "diagnostic recorded"
        );
        self.diagnostics.push(diagnostic);
    }

    fn is_saturated(&self) -> bool {
        self.limit
            .is_some_and(|limit| self.diagnostics.len() >= limit)
    }
}
