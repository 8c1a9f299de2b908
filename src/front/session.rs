//! Session harness: the public entrypoint for classifying fragments.

use std::borrow::Cow;

use serde::Serialize;
use tracing::debug;

use crate::front::driver;
use crate::front::error::ClassifyError;
use crate::front::outcome::{ClassificationResult, ParseOutcome, Verdict, classify_outcome};
use crate::lexer::{SourceId, check_encoding, decode_source};
use crate::parser::{
    Diagnostic, DiagnosticCollector, NeedMoreInputReason, ParseOptions, ParseStep, StatementKind,
};

/// Text typed so far, borrowed for one classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFragment<'a> {
    text: &'a str,
    boundary: bool,
}

impl<'a> SourceFragment<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            boundary: false,
        }
    }

    /// A fragment terminated by a line boundary, as after the user pressed enter.
    pub fn with_boundary(text: &'a str) -> Self {
        Self {
            text,
            boundary: true,
        }
    }

    /// Validates `bytes` as UTF-8 source text.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, ClassifyError> {
        Ok(Self::new(decode_source(bytes, SourceId::default())?))
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn has_boundary(&self) -> bool {
        self.boundary
    }

    /// Returns `true` when the fragment holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Text handed to the lexer: the fragment plus its boundary newline.
    pub fn source(&self) -> Cow<'a, str> {
        if self.boundary && !self.text.ends_with('\n') {
            Cow::Owned(format!("{}\n", self.text))
        } else {
            Cow::Borrowed(self.text)
        }
    }
}

impl<'a> From<&'a str> for SourceFragment<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

/// Budgets for one classification call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassifyOptions {
    /// Maximum tokens scanned before the call aborts with an internal fault.
    pub max_tokens: usize,
    /// Maximum syntactic nesting depth, capped at [`crate::front::MAX_NESTING_CEILING`].
    pub max_nesting: usize,
    /// Maximum diagnostics kept, including the primary one.
    pub max_diagnostics: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        let parse = ParseOptions::default();
        Self {
            max_tokens: parse.max_tokens,
            max_nesting: parse.max_nesting,
            max_diagnostics: parse.max_diagnostics,
        }
    }
}

impl ClassifyOptions {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_nesting: self.max_nesting,
            max_tokens: self.max_tokens,
            max_diagnostics: self.max_diagnostics.max(1),
        }
    }
}

/// Classification of one fragment, with the diagnostics that explain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    #[serde(flatten)]
    result: ClassificationResult,
    verdict: Verdict,
    statement: Option<StatementKind>,
    pending: Option<NeedMoreInputReason>,
    tokens_scanned: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Classification {
    pub fn result(&self) -> ClassificationResult {
        self.result
    }

    pub fn is_eof(&self) -> bool {
        self.result.is_eof()
    }

    pub fn is_syntax_error(&self) -> bool {
        self.result.is_syntax_error()
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_complete()
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Kind of the parsed statement when the fragment is complete.
    pub fn statement(&self) -> Option<StatementKind> {
        self.statement
    }

    /// Why more input is needed, when the fragment is EOF-pending.
    pub fn pending_reason(&self) -> Option<NeedMoreInputReason> {
        self.pending
    }

    pub fn tokens_scanned(&self) -> usize {
        self.tokens_scanned
    }

    /// Diagnostics in report order; the first one explains the verdict.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn first_diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }
}

/// Stateless classifier configured with budgets.
///
/// Every call builds its own lexer, parser, and collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    options: ClassifyOptions,
}

impl Session {
    pub fn new(options: ClassifyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClassifyOptions {
        &self.options
    }

    /// Decides whether `fragment` is complete, EOF-pending, or a syntax error.
    pub fn classify(&self, fragment: &SourceFragment<'_>) -> Result<Classification, ClassifyError> {
        let source = fragment.source();
        check_encoding(&source, SourceId::default())?;

        let mut collector = DiagnosticCollector::with_limit(self.options.max_diagnostics.max(1));
        let report = driver::run(&source, self.options.parse_options(), &mut collector)?;
        let result = classify_outcome(ParseOutcome::from_report(&report))?;

        let (statement, pending) = match &report.step {
            ParseStep::Complete(statement) => (Some(statement.kind), None),
            ParseStep::NeedMoreInput(reason) => (None, Some(*reason)),
            ParseStep::SyntaxError(_) => (None, None),
        };

        debug!(
            verdict = %result.verdict(),
            diagnostics = collector.len(),
            "fragment classified"
        );

        Ok(Classification {
            result,
            verdict: result.verdict(),
            statement,
            pending,
            tokens_scanned: report.tokens_scanned,
            diagnostics: collector.take(),
        })
    }

    pub fn classify_str(&self, text: &str) -> Result<Classification, ClassifyError> {
        self.classify(&SourceFragment::new(text))
    }
}

/// Classifies `text` with default budgets.
pub fn classify(text: &str) -> Result<Classification, ClassifyError> {
    Session::default().classify_str(text)
}
