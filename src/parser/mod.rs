//! Go-subset parser for single top-level statements.
//!
//! The parser consumes a lexer-backed [`TokenStream`] and decides whether the
//! input holds exactly one complete statement, stops early at the end of input,
//! or rejects a concrete token. Diagnostics go to a [`DiagnosticListener`].

pub mod ast;
mod decl;
pub mod error;
mod expr;
pub mod listener;
pub mod parser;
pub mod recovery;
mod stmt;
pub mod token_stream;
mod types;

pub use ast::{DeclKind, Expr, ExprShape, StatementKind, TopLevelStatement};
pub use error::{ParseError, ParseErrorKind};
pub use listener::{Diagnostic, DiagnosticCollector, DiagnosticKind, DiagnosticListener, Offending};
pub use parser::{ParseOptions, ParseStep, Parser, TopLevelReport};
pub use recovery::NeedMoreInputReason;
pub use token_stream::{MAX_LOOKAHEAD, TokenStream};
