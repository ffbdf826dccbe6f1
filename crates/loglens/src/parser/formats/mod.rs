//! Extraction rules, one per `LineShape` variant

pub mod timestamped;
pub mod epoch;
pub mod bare;

use chrono::{DateTime, Utc};
use regex::{Captures, Regex};

use crate::parser::model::{Level, LineOutcome, LineShape, LogEntry, UnparsedReason};

/// Level token shared by the timestamped shapes: `LEVEL`, `LEVEL:` or `[LEVEL]`.
pub(crate) const LEVEL_TOKEN: &str =
    r"(?:\[(?P<blevel>[A-Za-z0-9_]+)\]|(?P<level>[A-Za-z0-9_]+):?)";

/// Fields lifted out of a line by a matching shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<'a> {
    /// `None` when the shape matched but its timestamp is not a real instant
    pub timestamp: Option<DateTime<Utc>>,
    pub level: &'a str,
    pub message: &'a str,
}

impl LineShape {
    /// Apply this shape's extraction rule. `now` stamps shapes that carry
    /// no timestamp of their own.
    pub fn extract<'a>(&self, line: &'a str, now: DateTime<Utc>) -> Option<Extracted<'a>> {
        match self {
            LineShape::IsoTimestamp => timestamped::iso(line),
            LineShape::SpacedTimestamp => timestamped::spaced(line),
            LineShape::BracketedTimestamp => timestamped::bracketed(line),
            LineShape::EpochTimestamp => epoch::extract(line),
            LineShape::LevelFirst => timestamped::level_first(line),
            LineShape::BareLevel => bare::extract(line, now),
        }
    }
}

/// Offer `line` to every shape in priority order and build its outcome.
///
/// The first matching shape decides. If that shape's timestamp fails
/// validation the line is unparsed; later shapes are not consulted.
pub fn classify(line: &str, now: DateTime<Utc>) -> LineOutcome {
    for shape in LineShape::PRIORITY {
        let Some(fields) = shape.extract(line, now) else {
            continue;
        };

        return match fields.timestamp {
            Some(timestamp) => LineOutcome::Parsed {
                shape,
                entry: LogEntry::new(timestamp, Level::normalize(fields.level), fields.message),
            },
            None => {
                tracing::trace!(shape = shape.as_str(), "matched line carries an invalid timestamp");
                LineOutcome::Unparsed {
                    reason: UnparsedReason::InvalidTimestamp(shape),
                    entry: LogEntry::fallback(line, now),
                }
            }
        };
    }

    LineOutcome::Unparsed {
        reason: UnparsedReason::NoMatch,
        entry: LogEntry::fallback(line, now),
    }
}

pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("line shape pattern must compile")
}

pub(crate) fn level_token<'a>(caps: &Captures<'a>) -> Option<&'a str> {
    caps.name("level")
        .or_else(|| caps.name("blevel"))
        .map(|m| m.as_str())
}
