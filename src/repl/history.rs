//! Line history for the REPL session.
//!
//! Entries are numbered from 1. Accepted statements are stored line by line,
//! so a multi-line statement occupies several entries.

use std::fmt::Write as _;

use tracing::trace;

use crate::repl::error::ReplError;

/// A 1-based history selection such as `3`, `3-5`, `-4`, or `2-`.
///
/// An open start means the first entry; an open end means the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRange {
    start: Option<usize>,
    end: Option<usize>,
    is_range: bool,
}

impl HistoryRange {
    /// Selects one entry.
    pub fn single(index: usize) -> Self {
        Self {
            start: Some(index),
            end: Some(index),
            is_range: false,
        }
    }

    /// Selects `start..=end`; `None` leaves that side open.
    pub fn span(start: Option<usize>, end: Option<usize>) -> Self {
        Self {
            start,
            end,
            is_range: true,
        }
    }

    /// Parses `N`, `N-M`, `-M`, or `N-`.
    pub fn parse(text: &str) -> Result<Self, ReplError> {
        let text = text.trim();
        let parts: Vec<&str> = text.split('-').collect();
        match parts.as_slice() {
            [single] => Ok(Self::single(parse_index(single)?)),
            [start, end] => Ok(Self::span(parse_bound(start)?, parse_bound(end)?)),
            _ => Err(ReplError::History(
                "more than one '-' in history range".to_string(),
            )),
        }
    }

    pub fn is_range(&self) -> bool {
        self.is_range
    }

    /// Resolves the selection against `len` entries to inclusive 1-based bounds.
    pub fn resolve(&self, len: usize) -> Result<(usize, usize), ReplError> {
        let start = self.start.unwrap_or(1);
        let end = self.end.unwrap_or(len);
        for index in [start, end] {
            if index < 1 || index > len {
                return Err(ReplError::History(format!(
                    "entry {index} out of range (history has {len})"
                )));
            }
        }
        if end < start {
            return Err(ReplError::History("end before beginning".to_string()));
        }
        Ok((start, end))
    }
}

fn parse_bound(text: &str) -> Result<Option<usize>, ReplError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_index(text).map(Some)
}

fn parse_index(text: &str) -> Result<usize, ReplError> {
    let text = text.trim();
    text.parse::<usize>()
        .map_err(|_| ReplError::History(format!("could not convert '{text}' to an entry number")))
}

/// Bounded, ordered history of accepted source lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    limit: Option<usize>,
}

impl History {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry `index`, counting from 1.
    pub fn get(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|slot| self.entries.get(slot))
            .map(String::as_str)
    }

    /// Records an accepted statement, one entry per line.
    ///
    /// A trailing blank line is not recorded. When the limit is exceeded the
    /// oldest entries are dropped.
    pub fn record(&mut self, source: &str) {
        let mut lines: Vec<&str> = source.split('\n').collect();
        if lines.len() > 1 && lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        self.entries.extend(lines.into_iter().map(str::to_string));

        if let Some(limit) = self.limit
            && self.entries.len() > limit
        {
            let excess = self.entries.len() - limit;
            self.entries.drain(..excess);
            trace!(excess, "history trimmed");
        }
    }

    /// Joins the selected entries with newlines.
    pub fn replay(&self, range: HistoryRange) -> Result<String, ReplError> {
        let (start, end) = range.resolve(self.len())?;
        Ok(self.entries[start - 1..end].join("\n"))
    }

    /// Removes the selected entries and returns the resolved bounds.
    pub fn remove(&mut self, range: HistoryRange) -> Result<(usize, usize), ReplError> {
        let (start, end) = range.resolve(self.len())?;
        self.entries.drain(start - 1..end);
        trace!(start, end, "history entries removed");
        Ok((start, end))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Numbered listing, one entry per line.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "history: empty".to_string();
        }
        let mut out = String::from("history:");
        for (slot, entry) in self.entries.iter().enumerate() {
            let _ = write!(out, "\n{:03}: {}", slot + 1, entry);
        }
        out
    }
}
