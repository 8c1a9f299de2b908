//! Interactive session built on the fragment classifier.
//!
//! Lines accumulate in a buffer that is classified after each line. A
//! complete buffer goes to the [`Evaluator`] and into history, an EOF-pending
//! buffer waits for the next line, and a syntax error discards the buffer.

pub mod command;
pub mod error;
pub mod history;

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::front::{Classification, ClassifyError, ClassifyOptions, Session, SourceFragment};
use crate::lexer::{Keyword, LexStep, Lexer, SemicolonKind, TokenKind};
use crate::parser::{NeedMoreInputReason, StatementKind};

pub use command::{Command, HELP_TEXT, Verbosity, parse_command};
pub use error::{EvalError, ReplError};
pub use history::{History, HistoryRange};

/// Consumer of complete statements.
pub trait Evaluator {
    /// Evaluates one complete statement and returns text to show, if any.
    fn evaluate(&mut self, source: &str, statement: StatementKind)
    -> Result<Option<String>, EvalError>;
}

/// Evaluator that echoes each statement with its kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoEvaluator;

impl Evaluator for EchoEvaluator {
    fn evaluate(
        &mut self,
        source: &str,
        statement: StatementKind,
    ) -> Result<Option<String>, EvalError> {
        Ok(Some(format!("{statement}: {}", source.trim())))
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    pub prompt: String,
    pub continuation_prompt: String,
    /// Suppresses the banner and prompts.
    pub quiet: bool,
    /// Maximum history entries kept; `None` keeps everything.
    pub history_limit: Option<usize>,
    pub verbosity: Verbosity,
    pub classify: ClassifyOptions,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "gi> ".to_string(),
            continuation_prompt: "...> ".to_string(),
            quiet: false,
            history_limit: Some(1000),
            verbosity: Verbosity::Quiet,
            classify: ClassifyOptions::default(),
        }
    }
}

/// Something the session wants shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplEvent {
    /// The buffer is EOF-pending; the continuation prompt applies.
    NeedMoreInput(Option<NeedMoreInputReason>),
    /// A complete statement was evaluated.
    Evaluated {
        source: String,
        statement: StatementKind,
        output: Option<String>,
    },
    /// The buffer was rejected and discarded.
    SyntaxError { source: String, message: String },
    /// The buffer could not be classified (malformed input or an internal
    /// fault) and was discarded.
    Fault { source: String, error: ClassifyError },
    /// Replay or sourcing ended while a statement was still open.
    Unfinished { source: String },
    /// Informational output from a command.
    Message(String),
    /// The session should end.
    Exit,
}

/// Line-oriented session driving an [`Evaluator`].
pub struct Repl<E: Evaluator> {
    config: ReplConfig,
    session: Session,
    evaluator: E,
    history: History,
    buffer: String,
}

impl<E: Evaluator> Repl<E> {
    pub fn new(config: ReplConfig, evaluator: E) -> Self {
        Self {
            session: Session::new(config.classify),
            history: History::new(config.history_limit),
            config,
            evaluator,
            buffer: String::new(),
        }
    }

    pub fn config(&self) -> &ReplConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Returns `true` while a statement is waiting for more lines.
    pub fn is_continuing(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Prompt for the next line.
    pub fn prompt(&self) -> &str {
        if self.is_continuing() {
            &self.config.continuation_prompt
        } else {
            &self.config.prompt
        }
    }

    /// Handles one input line (without its newline).
    pub fn handle_line(&mut self, line: &str) -> Result<Vec<ReplEvent>, ReplError> {
        if !self.is_continuing()
            && let Some(command) = parse_command(line)
        {
            return self.run_command(command?);
        }
        Ok(self.accept_line(line).into_iter().collect())
    }

    /// Reads lines from `input` until it ends or `:exit`, writing to `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), ReplError> {
        if !self.config.quiet {
            writeln!(output, "gifront: type :help for commands, :exit to quit")?;
        }

        let mut lines = input.lines();
        loop {
            if !self.config.quiet {
                write!(output, "{}", self.prompt())?;
                output.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            let events = match self.handle_line(&line) {
                Ok(events) => events,
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    writeln!(output, "error: {error}")?;
                    continue;
                }
            };

            for event in &events {
                if *event == ReplEvent::Exit {
                    return Ok(());
                }
                self.write_event(&mut output, event)?;
            }
        }

        if self.is_continuing() {
            let source = std::mem::take(&mut self.buffer);
            self.write_event(&mut output, &ReplEvent::Unfinished { source })?;
        }
        Ok(())
    }

    fn write_event<W: Write>(&self, output: &mut W, event: &ReplEvent) -> Result<(), ReplError> {
        match event {
            ReplEvent::NeedMoreInput(Some(reason)) if self.config.verbosity > Verbosity::Quiet => {
                writeln!(output, "(waiting: {})", reason.describe())?
            }
            ReplEvent::NeedMoreInput(_) | ReplEvent::Exit => {}
            ReplEvent::Evaluated { output: text, .. } => {
                if let Some(text) = text {
                    writeln!(output, "{text}")?;
                }
            }
            ReplEvent::SyntaxError { message, .. } => writeln!(output, "{message}")?,
            ReplEvent::Fault { error, .. } if error.is_malformed_input() => {
                writeln!(output, "error: {error}")?
            }
            ReplEvent::Fault { error, .. } => writeln!(output, "internal fault: {error}")?,
            ReplEvent::Unfinished { source } => {
                writeln!(output, "incomplete statement discarded: {}", source.trim())?
            }
            ReplEvent::Message(text) => writeln!(output, "{text}")?,
        }
        Ok(())
    }

    fn run_command(&mut self, command: Command) -> Result<Vec<ReplEvent>, ReplError> {
        debug!(?command, "repl command");
        match command {
            Command::Help => Ok(vec![ReplEvent::Message(HELP_TEXT.to_string())]),
            Command::ShowHistory => Ok(vec![ReplEvent::Message(self.history.render())]),
            Command::Replay(range) => {
                let source = self.history.replay(range)?;
                let (start, end) = range.resolve(self.history.len())?;
                let banner = if range.is_range() {
                    format!("replay history {start:03} - {end:03}:")
                } else {
                    format!("replay history {start:03}:")
                };
                let mut events = vec![ReplEvent::Message(banner)];
                events.extend(self.feed_text(&source));
                Ok(events)
            }
            Command::Remove(range) => {
                let (start, end) = self.history.remove(range)?;
                let message = if start == end {
                    format!("removed history {start:03}.")
                } else {
                    format!("removed history {start:03} - {end:03}.")
                };
                Ok(vec![ReplEvent::Message(message)])
            }
            Command::Reset => {
                self.history.clear();
                Ok(vec![ReplEvent::Message("history cleared.".to_string())])
            }
            Command::SetVerbosity(level) => {
                self.config.verbosity = level;
                Ok(vec![ReplEvent::Message(format!("verbosity: {level:?}"))])
            }
            Command::Source(paths) => {
                let mut events = Vec::new();
                for path in &paths {
                    let text = read_source(path)?;
                    events.push(ReplEvent::Message(format!("sourcing {}", path.display())));
                    events.extend(self.feed_text(&text));
                }
                Ok(events)
            }
            Command::Exit => Ok(vec![ReplEvent::Exit]),
        }
    }

    /// Feeds `text` line by line as if typed, then closes any open statement.
    fn feed_text(&mut self, text: &str) -> Vec<ReplEvent> {
        let mut events: Vec<ReplEvent> = text
            .lines()
            .filter_map(|line| self.accept_line(line))
            .collect();
        if self.is_continuing() {
            events.push(ReplEvent::Unfinished {
                source: std::mem::take(&mut self.buffer),
            });
        }
        events
    }

    /// Appends `line` to the buffer and acts on the buffer's classification.
    fn accept_line(&mut self, line: &str) -> Option<ReplEvent> {
        if !self.is_continuing() && line.trim().is_empty() {
            return None;
        }

        let candidate = if self.buffer.is_empty() {
            line.to_string()
        } else {
            format!("{}\n{line}", self.buffer)
        };

        match self.session.classify(&SourceFragment::new(&candidate)) {
            Ok(classification)
                if classification.pending_reason() == Some(NeedMoreInputReason::EmptyInput) =>
            {
                // Comments only.
                self.buffer.clear();
                None
            }
            Ok(classification) if classification.is_eof() => {
                trace!(pending = ?classification.pending_reason(), "continuation");
                self.buffer = candidate;
                Some(ReplEvent::NeedMoreInput(classification.pending_reason()))
            }
            Ok(classification) if classification.is_syntax_error() => {
                self.buffer.clear();
                let message = self.render_syntax_error(&classification);
                Some(ReplEvent::SyntaxError {
                    source: candidate,
                    message,
                })
            }
            Ok(classification) => {
                self.buffer.clear();
                Some(self.evaluate(candidate, &classification))
            }
            Err(error) => {
                debug!(%error, "classification failed");
                self.buffer.clear();
                Some(ReplEvent::Fault {
                    source: candidate,
                    error,
                })
            }
        }
    }

    fn evaluate(&mut self, source: String, classification: &Classification) -> ReplEvent {
        let statement = classification
            .statement()
            .unwrap_or(StatementKind::Expression);
        debug!(%statement, "evaluating statement");
        self.history.record(&source);

        let output = match self.evaluator.evaluate(&source, statement) {
            Ok(output) => output,
            Err(error) => Some(ReplError::from(error).to_string()),
        };
        let output = match (self.config.verbosity, output) {
            (Verbosity::VeryVerbose, output) => Some(format!(
                "[{statement}, {} tokens]{}",
                classification.tokens_scanned(),
                output.map(|text| format!(" {text}")).unwrap_or_default()
            )),
            (_, output) => output,
        };

        ReplEvent::Evaluated {
            source,
            statement,
            output,
        }
    }

    fn render_syntax_error(&self, classification: &Classification) -> String {
        let diagnostics = classification.diagnostics();
        let shown = match self.config.verbosity {
            Verbosity::Quiet => diagnostics.len().min(1),
            _ => diagnostics.len(),
        };
        if shown == 0 {
            return "syntax error".to_string();
        }
        diagnostics[..shown]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reads a Go file for sourcing, dropping its package clause.
fn read_source(path: &Path) -> Result<String, ReplError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplError::Source {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(strip_package_clause(&text))
}

/// Removes a leading `package name` clause; comments before it are kept.
fn strip_package_clause(text: &str) -> String {
    let mut lexer = Lexer::new(text);
    let clause = match (lexer.next_token(), lexer.next_token()) {
        (Ok(LexStep::Token(keyword)), Ok(LexStep::Token(name)))
            if keyword.kind == TokenKind::Keyword(Keyword::Package)
                && name.kind == TokenKind::Identifier =>
        {
            let end = match lexer.next_token() {
                Ok(LexStep::Token(semicolon))
                    if semicolon.kind == TokenKind::Semicolon(SemicolonKind::Explicit) =>
                {
                    semicolon.span.end
                }
                _ => name.span.end,
            };
            Some((keyword.span.start, end))
        }
        _ => None,
    };

    match clause {
        Some((start, end)) => {
            trace!(start = start.as_usize(), end = end.as_usize(), "package clause dropped");
            format!("{}{}", &text[..start.as_usize()], &text[end.as_usize()..])
        }
        None => text.to_string(),
    }
}
