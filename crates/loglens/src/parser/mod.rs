//! Log parsing and normalization module
//!
//! Converts raw, heterogeneous log text into an ordered sequence of
//! normalized `LogEntry` values.
//!
//! # Architecture
//!
//! - `model.rs`: `Level`, `LogEntry`, `LineShape`, `LineOutcome`
//! - `formats/`: one extraction rule per line shape, tried in `LineShape::PRIORITY` order
//! - `timestamp.rs`: calendar-validated instant construction
//! - `ansi.rs`: escape-code stripping ahead of classification
//! - `stitch.rs`: folds stack traces and causes into the preceding error
//! - `metrics.rs`: per-invocation parse counters
//!
//! # Totality
//!
//! Parsing never fails. A line no shape can claim, or one whose timestamp
//! does not validate, becomes an `info` entry stamped with the current
//! moment and carrying the trimmed line as its message.

pub mod model;
pub mod formats;
pub mod timestamp;
pub mod metrics;
pub mod stitch;
mod ansi;

use chrono::{DateTime, Utc};

use crate::conf::ParserConfig;

pub use ansi::strip_ansi_codes;
pub use metrics::ParseStats;
pub use model::{Level, LineOutcome, LineShape, LogEntry, ScannedLine, UnparsedReason};
pub use stitch::DetailStitcher;

/// Parse `raw` using the wall clock for lines without a timestamp.
pub fn parse(raw: &str) -> Vec<LogEntry> {
    parse_at(raw, Utc::now())
}

/// Parse `raw` with an explicit "current moment".
pub fn parse_at(raw: &str, now: DateTime<Utc>) -> Vec<LogEntry> {
    LogParser::new(&ParserConfig::default()).parse(raw, now).0
}

/// Parse `raw` with explicit settings, also returning the invocation's counters.
pub fn parse_with_stats(raw: &str, now: DateTime<Utc>, config: &ParserConfig) -> (Vec<LogEntry>, ParseStats) {
    LogParser::new(config).parse(raw, now)
}

/// Two-pass parser: classify every line, then stitch details.
#[derive(Debug, Clone)]
pub struct LogParser {
    config: ParserConfig,
}

impl LogParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn parse(&self, raw: &str, now: DateTime<Utc>) -> (Vec<LogEntry>, ParseStats) {
        let mut stats = ParseStats::new();
        let scanned: Vec<ScannedLine> = raw
            .lines()
            .filter_map(|line| self.scan_line(line, now, &mut stats))
            .collect();

        let entries = DetailStitcher::new(&self.config).stitch(scanned, &mut stats);
        stats.emit();
        (entries, stats)
    }

    /// Classify one source line. Blank lines yield `None`.
    fn scan_line(&self, line: &str, now: DateTime<Utc>, stats: &mut ParseStats) -> Option<ScannedLine> {
        let text = if self.config.strip_ansi {
            strip_ansi_codes(line)
        } else {
            std::borrow::Cow::Borrowed(line)
        };
        let text = text.trim_end();

        if text.trim_start().is_empty() {
            stats.record_blank();
            return None;
        }

        let outcome = formats::classify(text, now);
        stats.record(&outcome);
        Some(ScannedLine {
            text: text.to_string(),
            outcome,
        })
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}
