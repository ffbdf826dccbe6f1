//! Detail stitching for stack traces and error continuations.
//!
//! Runs after every line has been classified. A single forward pass builds
//! the output sequence: each error entry pulls the continuation lines that
//! immediately follow it into its `details`, and those lines never reach
//! the output as entries of their own.

use std::sync::LazyLock;
use regex::Regex;

use crate::conf::ParserConfig;
use super::metrics::ParseStats;
use super::model::{LogEntry, ScannedLine};

static NAMED_ERROR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+Error:").expect("continuation pattern must compile")
});

/// Continuation pattern kinds (used for tracing diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContinuationPattern {
    /// `  at com.foo.Bar(Bar.java:10)`
    StackFrame,
    /// Any line starting with two spaces
    Indented,
    /// `TypeError: ...`, `IOError: ...`
    NamedError,
    /// `Caused by: ...`
    CausedBy,
}

/// Decide whether a source line continues the error entry above it.
///
/// `line` is the source text with leading indentation intact.
pub(crate) fn continuation_pattern(line: &str) -> Option<ContinuationPattern> {
    if line.starts_with("  at ") {
        return Some(ContinuationPattern::StackFrame);
    }
    if line.starts_with("  ") {
        return Some(ContinuationPattern::Indented);
    }
    message_pattern(line)
}

/// Shapes that also count when they open a parsed entry's message, e.g.
/// `2024-01-01 10:00:01 INFO Caused by: timeout`. Indentation is only
/// meaningful on the source line since messages are trimmed.
fn message_pattern(text: &str) -> Option<ContinuationPattern> {
    if NAMED_ERROR.is_match(text) {
        return Some(ContinuationPattern::NamedError);
    }
    if text.starts_with("Caused by:") {
        return Some(ContinuationPattern::CausedBy);
    }
    None
}

/// Continuation shape of a scanned line, from its source text or its message.
pub(crate) fn continuation_of(line: &ScannedLine) -> Option<ContinuationPattern> {
    continuation_pattern(&line.text).or_else(|| message_pattern(&line.outcome.entry().message))
}

/// Text a continuation line contributes to `details`: the source line when
/// it carries the shape itself, otherwise the entry's message.
fn detail_text(line: ScannedLine) -> String {
    if continuation_pattern(&line.text).is_some() {
        line.text
    } else {
        line.outcome.into_entry().message
    }
}

/// Folds continuation lines into the error entry that precedes them.
pub struct DetailStitcher {
    enabled: bool,
    max_lines: Option<usize>,
}

impl DetailStitcher {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            enabled: config.stitch_details,
            max_lines: config.max_detail_lines,
        }
    }

    /// Consume the classified lines and produce the final entry sequence.
    ///
    /// Order of the surviving entries matches the source order.
    pub fn stitch(&self, lines: Vec<ScannedLine>, stats: &mut ParseStats) -> Vec<LogEntry> {
        if !self.enabled {
            return lines.into_iter().map(|line| line.outcome.into_entry()).collect();
        }

        let mut entries = Vec::with_capacity(lines.len());
        let mut cursor = lines.into_iter().peekable();

        while let Some(line) = cursor.next() {
            let entry = line.outcome.into_entry();
            if !entry.is_error() {
                entries.push(entry);
                continue;
            }

            let mut group = LogGroup::new(entry);
            while self.has_room(&group) {
                let Some(next) = cursor.next_if(|next| continuation_of(next).is_some()) else {
                    break;
                };
                tracing::trace!(pattern = ?continuation_of(&next), "stitch: continuation detected");
                group.add_continuation(detail_text(next));
            }

            let truncated = cursor.peek().is_some_and(|next| continuation_of(next).is_some());
            if truncated {
                tracing::debug!(max_lines = ?self.max_lines, "stitch: max_detail_lines reached");
            }

            stats.stitched_lines += group.continuations.len();
            entries.push(group.into_entry());
        }

        entries
    }

    fn has_room(&self, group: &LogGroup) -> bool {
        self.max_lines.map_or(true, |max| group.continuations.len() < max)
    }
}

struct LogGroup {
    primary: LogEntry,
    continuations: Vec<String>,
}

impl LogGroup {
    fn new(primary: LogEntry) -> Self {
        Self {
            primary,
            continuations: Vec::new(),
        }
    }

    fn add_continuation(&mut self, text: String) {
        self.continuations.push(text);
    }

    fn into_entry(self) -> LogEntry {
        let mut entry = self.primary;
        if !self.continuations.is_empty() {
            entry.details = self.continuations.join("\n");
        }
        entry
    }
}
