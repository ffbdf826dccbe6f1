use std::fmt;
use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

/// Canonical severity. Every raw level token collapses into exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// Map a raw level token onto a canonical level.
    ///
    /// Matching is case-insensitive. Tokens outside the known aliases
    /// default to `Info`.
    pub fn normalize(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "error" | "err" | "fatal" => Level::Error,
            "warn" | "warning" => Level::Warn,
            "info" | "information" => Level::Info,
            "debug" | "trace" | "verbose" => Level::Debug,
            _ => Level::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    /// Primary text, trimmed of surrounding whitespace
    pub message: String,
    /// Stitched continuation lines (stack trace, nested cause). Empty when absent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl LogEntry {
    pub fn new(timestamp: DateTime<Utc>, level: Level, message: &str) -> Self {
        Self {
            timestamp,
            level,
            message: message.trim().to_string(),
            details: String::new(),
        }
    }

    /// Best-effort record for a line no shape could claim.
    pub fn fallback(line: &str, now: DateTime<Utc>) -> Self {
        Self::new(now, Level::Info, line)
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Closed set of recognised line layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineShape {
    /// `2024-01-01T10:00:00.123+02:00 LEVEL message`
    IsoTimestamp,
    /// `2024-01-01 10:00:00 LEVEL message`
    SpacedTimestamp,
    /// `[2024-01-01 10:00:00] LEVEL message`
    BracketedTimestamp,
    /// `1704067200 LEVEL message` (10 digits = seconds, otherwise milliseconds)
    EpochTimestamp,
    /// `LEVEL 2024-01-01 10:00:00 message`
    LevelFirst,
    /// `level: message`, stamped with the moment of parsing
    BareLevel,
}

impl LineShape {
    /// Order in which shapes are offered a line. Earlier shapes win;
    /// `BareLevel` is the most permissive and must stay last.
    pub const PRIORITY: [LineShape; 6] = [
        LineShape::IsoTimestamp,
        LineShape::SpacedTimestamp,
        LineShape::BracketedTimestamp,
        LineShape::EpochTimestamp,
        LineShape::LevelFirst,
        LineShape::BareLevel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LineShape::IsoTimestamp => "iso_timestamp",
            LineShape::SpacedTimestamp => "spaced_timestamp",
            LineShape::BracketedTimestamp => "bracketed_timestamp",
            LineShape::EpochTimestamp => "epoch_timestamp",
            LineShape::LevelFirst => "level_first",
            LineShape::BareLevel => "bare_level",
        }
    }
}

/// Why a line ended up on the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnparsedReason {
    /// No shape matched the line
    NoMatch,
    /// A shape matched but its timestamp did not describe a real instant
    InvalidTimestamp(LineShape),
}

/// Result of offering one line to the shape list. Never an error:
/// unparsed lines still carry a fallback entry.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Parsed { shape: LineShape, entry: LogEntry },
    Unparsed { reason: UnparsedReason, entry: LogEntry },
}

impl LineOutcome {
    pub fn entry(&self) -> &LogEntry {
        match self {
            LineOutcome::Parsed { entry, .. } | LineOutcome::Unparsed { entry, .. } => entry,
        }
    }

    pub fn into_entry(self) -> LogEntry {
        match self {
            LineOutcome::Parsed { entry, .. } | LineOutcome::Unparsed { entry, .. } => entry,
        }
    }
}

/// A non-blank source line paired with what the shape list made of it.
///
/// `text` keeps leading indentation (trailing whitespace removed) so the
/// detail-stitching pass can see continuation indents that the trimmed
/// message has lost.
#[derive(Debug, Clone)]
pub struct ScannedLine {
    pub text: String,
    pub outcome: LineOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_warn_variants() {
        assert_eq!(Level::normalize("WARNING"), Level::Warn);
        assert_eq!(Level::normalize("warn"), Level::Warn);
        assert_eq!(Level::normalize("Warn"), Level::Warn);
    }

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(Level::normalize("ERR"), Level::Error);
        assert_eq!(Level::normalize("Fatal"), Level::Error);
        assert_eq!(Level::normalize("information"), Level::Info);
        assert_eq!(Level::normalize("TRACE"), Level::Debug);
        assert_eq!(Level::normalize("verbose"), Level::Debug);
    }

    #[test]
    fn test_normalize_unknown_defaults_to_info() {
        assert_eq!(Level::normalize("notice"), Level::Info);
        assert_eq!(Level::normalize("critical"), Level::Info);
        assert_eq!(Level::normalize(""), Level::Info);
    }

    #[test]
    fn test_entry_trims_message() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entry = LogEntry::new(ts, Level::Info, "  hello world \r");
        assert_eq!(entry.message, "hello world");
        assert!(entry.details.is_empty());
    }

    #[test]
    fn test_entry_serializes_camel_case_lowercase_level() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut entry = LogEntry::new(ts, Level::Error, "boom");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00Z");
        assert!(json.get("details").is_none(), "empty details are omitted");

        entry.details = "  at main".to_string();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["details"], "  at main");
    }

    #[test]
    fn test_priority_ends_with_bare_level() {
        assert_eq!(LineShape::PRIORITY.first(), Some(&LineShape::IsoTimestamp));
        assert_eq!(LineShape::PRIORITY.last(), Some(&LineShape::BareLevel));
    }
}
