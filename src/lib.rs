//! Library entrypoint for `gifront`.
//!
//! The crate exposes the Go-subset lexer and parser, the fragment classifier
//! that drives an interactive prompt, and the REPL session built on it.

pub mod front;
pub mod lexer;
pub mod parser;
pub mod repl;

pub use front::{
    Classification, ClassificationResult, ClassifyError, ClassifyOptions, Session, SourceFragment,
    classify,
};
