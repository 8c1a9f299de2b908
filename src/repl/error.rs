//! REPL session errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::front::ClassifyError;

/// Failure reported by an [`crate::repl::Evaluator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvalError {
    message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// REPL session errors.
///
/// Only I/O on the session's own input or output ends the session; the rest
/// are reported and the prompt continues.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Command(String),

    #[error("bad history request: {0}")]
    History(String),

    #[error("cannot source {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot classify input: {0}")]
    Classify(#[from] ClassifyError),

    #[error("evaluation failed: {0}")]
    Evaluate(#[from] EvalError),
}

impl ReplError {
    /// Returns `true` when the session cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
