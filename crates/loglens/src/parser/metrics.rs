use serde::Serialize;

use super::model::{LineOutcome, LineShape, UnparsedReason};

/// Lines claimed by each shape
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeCounts {
    pub iso_timestamp: usize,
    pub spaced_timestamp: usize,
    pub bracketed_timestamp: usize,
    pub epoch_timestamp: usize,
    pub level_first: usize,
    pub bare_level: usize,
}

impl ShapeCounts {
    pub fn get(&self, shape: LineShape) -> usize {
        match shape {
            LineShape::IsoTimestamp => self.iso_timestamp,
            LineShape::SpacedTimestamp => self.spaced_timestamp,
            LineShape::BracketedTimestamp => self.bracketed_timestamp,
            LineShape::EpochTimestamp => self.epoch_timestamp,
            LineShape::LevelFirst => self.level_first,
            LineShape::BareLevel => self.bare_level,
        }
    }

    fn slot(&mut self, shape: LineShape) -> &mut usize {
        match shape {
            LineShape::IsoTimestamp => &mut self.iso_timestamp,
            LineShape::SpacedTimestamp => &mut self.spaced_timestamp,
            LineShape::BracketedTimestamp => &mut self.bracketed_timestamp,
            LineShape::EpochTimestamp => &mut self.epoch_timestamp,
            LineShape::LevelFirst => &mut self.level_first,
            LineShape::BareLevel => &mut self.bare_level,
        }
    }

    pub fn total(&self) -> usize {
        LineShape::PRIORITY.iter().map(|shape| self.get(*shape)).sum()
    }
}

/// Counters for a single `parse` invocation.
///
/// Purely advisory: nothing in the parsed output depends on these values.
/// Each invocation owns its own instance, so there is no sharing between
/// concurrent parses.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Every line in the input, blank or not
    pub lines_seen: usize,
    /// Empty or whitespace-only lines that were discarded
    pub blank_lines: usize,
    /// Lines parsed, by shape
    pub shapes: ShapeCounts,
    /// Lines that fell back to an `info` entry (no match + invalid timestamp)
    pub unparsed_lines: usize,
    /// Subset of `unparsed_lines` whose shape matched but whose timestamp was invalid
    pub invalid_timestamps: usize,
    /// Continuation lines folded into an error's details
    pub stitched_lines: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_blank(&mut self) {
        self.lines_seen += 1;
        self.blank_lines += 1;
    }

    /// Record the outcome of one non-blank line
    #[inline]
    pub fn record(&mut self, outcome: &LineOutcome) {
        self.lines_seen += 1;
        match outcome {
            LineOutcome::Parsed { shape, .. } => *self.shapes.slot(*shape) += 1,
            LineOutcome::Unparsed { reason, .. } => {
                self.unparsed_lines += 1;
                if matches!(reason, UnparsedReason::InvalidTimestamp(_)) {
                    self.invalid_timestamps += 1;
                }
            }
        }
    }

    pub fn parsed_lines(&self) -> usize {
        self.shapes.total()
    }

    /// Share of non-blank lines claimed by a structured shape (1.0 when empty).
    pub fn success_rate(&self) -> f64 {
        let attempted = self.parsed_lines() + self.unparsed_lines;
        if attempted == 0 {
            1.0
        } else {
            self.parsed_lines() as f64 / attempted as f64
        }
    }

    /// Emit the operator-facing diagnostics for this invocation.
    pub fn emit(&self) {
        if self.unparsed_lines > 0 {
            tracing::warn!(
                unparsed_lines = self.unparsed_lines,
                invalid_timestamps = self.invalid_timestamps,
                "{} lines couldn't be parsed with standard patterns",
                self.unparsed_lines
            );
        }

        tracing::debug!(
            lines_seen = self.lines_seen,
            blank_lines = self.blank_lines,
            parsed = self.parsed_lines(),
            iso = self.shapes.iso_timestamp,
            spaced = self.shapes.spaced_timestamp,
            bracketed = self.shapes.bracketed_timestamp,
            epoch = self.shapes.epoch_timestamp,
            level_first = self.shapes.level_first,
            bare = self.shapes.bare_level,
            stitched = self.stitched_lines,
            "parse complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::model::LogEntry;
    use chrono::{TimeZone, Utc};

    fn entry() -> LogEntry {
        LogEntry::fallback("x", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_record_parsed_and_unparsed() {
        let mut stats = ParseStats::new();
        stats.record(&LineOutcome::Parsed { shape: LineShape::EpochTimestamp, entry: entry() });
        stats.record(&LineOutcome::Parsed { shape: LineShape::EpochTimestamp, entry: entry() });
        stats.record(&LineOutcome::Unparsed { reason: UnparsedReason::NoMatch, entry: entry() });
        stats.record(&LineOutcome::Unparsed {
            reason: UnparsedReason::InvalidTimestamp(LineShape::IsoTimestamp),
            entry: entry(),
        });
        stats.record_blank();

        assert_eq!(stats.lines_seen, 5);
        assert_eq!(stats.blank_lines, 1);
        assert_eq!(stats.shapes.get(LineShape::EpochTimestamp), 2);
        assert_eq!(stats.parsed_lines(), 2);
        assert_eq!(stats.unparsed_lines, 2);
        assert_eq!(stats.invalid_timestamps, 1);
        assert!((stats.success_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_success_rate_empty() {
        assert_eq!(ParseStats::new().success_rate(), 1.0);
    }
}
