//! Colon commands accepted at a fresh prompt.

use std::path::PathBuf;

use crate::repl::error::ReplError;
use crate::repl::history::HistoryRange;

pub const HELP_TEXT: &str = "\
 :help, :?        Show this help.
 :h               Show command line history.
 :30              Replay history entry 30.
 :10-15           Replay history entries 10 through 15.
 :rm 3-4          Remove entries 3-4 from history (also :rm 3, :rm -4, :rm 4-).
 :reset           Clear history (also :clear).
 :v               Show all diagnostics and continuation reasons.
 :vv              Also show statement kinds and token counts.
 :q               Show only the first diagnostic (default).
 :source <path>   Replay Go code from files (comma-separated).
 :exit            Leave the session (also end of input).";

/// How much the session reports about each fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Verbosity {
    #[default]
    Quiet,
    Verbose,
    VeryVerbose,
}

impl Verbosity {
    /// Maps a `-v` count onto a level.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Quiet,
            1 => Self::Verbose,
            _ => Self::VeryVerbose,
        }
    }
}

/// A parsed colon command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    ShowHistory,
    Replay(HistoryRange),
    Remove(HistoryRange),
    Reset,
    SetVerbosity(Verbosity),
    Source(Vec<PathBuf>),
    Exit,
}

/// Parses `line` as a colon command.
///
/// Returns `None` when the line is not a command and should be treated as
/// source text. A line starting with `::` is never a command.
pub fn parse_command(line: &str) -> Option<Result<Command, ReplError>> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix(':')?;
    if rest.is_empty() || rest.starts_with(':') {
        return None;
    }

    if rest.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        return Some(HistoryRange::parse(rest).map(Command::Replay));
    }

    let (word, argument) = match rest.find(char::is_whitespace) {
        Some(split) => (&rest[..split], rest[split..].trim()),
        None => (rest, ""),
    };
    let word = word.to_ascii_lowercase();

    let command = match word.as_str() {
        "help" | "?" => Ok(Command::Help),
        "h" => Ok(Command::ShowHistory),
        "reset" | "clear" => Ok(Command::Reset),
        "v" => Ok(Command::SetVerbosity(Verbosity::Verbose)),
        "vv" => Ok(Command::SetVerbosity(Verbosity::VeryVerbose)),
        "q" => Ok(Command::SetVerbosity(Verbosity::Quiet)),
        "exit" => Ok(Command::Exit),
        "rm" if argument.is_empty() => Err(ReplError::Command(
            ":rm needs an entry or range, e.g. :rm 3-4".to_string(),
        )),
        "rm" => HistoryRange::parse(argument).map(Command::Remove),
        "source" => parse_source_paths(argument).map(Command::Source),
        _ if word.starts_with("rm") => HistoryRange::parse(&word[2..]).map(Command::Remove),
        _ => Err(ReplError::Command(format!(
            "unknown command ':{word}', try :help"
        ))),
    };
    Some(command)
}

fn parse_source_paths(argument: &str) -> Result<Vec<PathBuf>, ReplError> {
    let home = std::env::var("HOME").ok();
    let paths: Vec<PathBuf> = argument
        .split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(|path| match (&home, path.strip_prefix("~/")) {
            (Some(home), Some(relative)) => PathBuf::from(home).join(relative),
            _ => PathBuf::from(path),
        })
        .collect();

    if paths.is_empty() {
        return Err(ReplError::Command(":source needs at least one path".to_string()));
    }
    Ok(paths)
}
