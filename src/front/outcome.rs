//! Parse signals and the classification derived from them.

use std::fmt;

use serde::Serialize;

use crate::front::error::InternalFault;
use crate::parser::{ParseErrorKind, ParseStep, TopLevelReport};

/// Signals gathered from one primary parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ParseOutcome {
    /// The lexer or the grammar ran past the end of the input.
    pub reached_end_of_input: bool,
    /// A concrete token was rejected before the end of the input.
    pub saw_mismatch_before_eof: bool,
    /// The input reduced to exactly one complete statement.
    pub tree_is_well_formed_statement: bool,
}

impl ParseOutcome {
    /// Reads the three signals off a primary parse report.
    pub fn from_report(report: &TopLevelReport) -> Self {
        match &report.step {
            ParseStep::Complete(_) => Self {
                reached_end_of_input: report.observed_end_of_input,
                saw_mismatch_before_eof: false,
                tree_is_well_formed_statement: true,
            },
            ParseStep::NeedMoreInput(_) => Self {
                reached_end_of_input: report.observed_end_of_input,
                saw_mismatch_before_eof: false,
                tree_is_well_formed_statement: false,
            },
            ParseStep::SyntaxError(error) => Self {
                reached_end_of_input: error.kind == ParseErrorKind::UnexpectedEndOfInput,
                saw_mismatch_before_eof: true,
                tree_is_well_formed_statement: false,
            },
        }
    }
}

/// Coarse verdict for one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Complete,
    NeedMoreInput,
    SyntaxError,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::NeedMoreInput => "need-more-input",
            Self::SyntaxError => "syntax-error",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair of flags a prompt acts on.
///
/// `(false, false)` is complete, `(true, false)` needs more input, and
/// `(false, true)` is a syntax error. Both flags set is not constructible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClassificationResult {
    is_eof: bool,
    is_syntax_error: bool,
}

impl ClassificationResult {
    pub const COMPLETE: Self = Self {
        is_eof: false,
        is_syntax_error: false,
    };
    pub const NEED_MORE_INPUT: Self = Self {
        is_eof: true,
        is_syntax_error: false,
    };
    pub const SYNTAX_ERROR: Self = Self {
        is_eof: false,
        is_syntax_error: true,
    };

    /// Builds a result, rejecting the `(true, true)` combination.
    pub fn new(is_eof: bool, is_syntax_error: bool) -> Result<Self, InternalFault> {
        if is_eof && is_syntax_error {
            return Err(InternalFault::InvalidClassification);
        }
        Ok(Self {
            is_eof,
            is_syntax_error,
        })
    }

    pub fn is_eof(self) -> bool {
        self.is_eof
    }

    pub fn is_syntax_error(self) -> bool {
        self.is_syntax_error
    }

    pub fn is_complete(self) -> bool {
        !self.is_eof && !self.is_syntax_error
    }

    pub fn verdict(self) -> Verdict {
        if self.is_syntax_error {
            Verdict::SyntaxError
        } else if self.is_eof {
            Verdict::NeedMoreInput
        } else {
            Verdict::Complete
        }
    }

    /// Returns `(is_eof, is_syntax_error)`.
    pub fn flags(self) -> (bool, bool) {
        (self.is_eof, self.is_syntax_error)
    }
}

/// Maps parse signals to a classification.
///
/// Exactly one of the three signal patterns is consistent per verdict:
///
/// | reached | mismatch | well-formed | verdict |
/// |---|---|---|---|
/// | yes | no | yes | complete |
/// | yes | no | no | EOF-pending |
/// | no | yes | no | syntax error |
///
/// Anything else is an internal fault.
pub fn classify_outcome(outcome: ParseOutcome) -> Result<ClassificationResult, InternalFault> {
    let ParseOutcome {
        reached_end_of_input: reached,
        saw_mismatch_before_eof: mismatch,
        tree_is_well_formed_statement: well_formed,
    } = outcome;

    let conflicting = (reached && mismatch)
        || (well_formed && mismatch)
        || (well_formed && !reached)
        || (!reached && !mismatch && !well_formed);
    if conflicting {
        return Err(InternalFault::ConflictingSignals { outcome });
    }

    ClassificationResult::new(reached && !well_formed && !mismatch, mismatch)
}

