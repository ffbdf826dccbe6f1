//! Recency-window analysis over parsed entries
//!
//! # Architecture
//!
//! - `label.rs`: error type-label derivation
//! - `summary.rs`: `LogSummary` value type
//!
//! Analysis is total: any entry sequence, including an empty one, yields a
//! summary.

pub mod label;
pub mod summary;

use chrono::{DateTime, Months, Utc};

use crate::conf::AnalyzerConfig;
use crate::parser::model::{Level, LogEntry};

pub use label::error_type_label;
pub use summary::LogSummary;

/// Summarize `entries` against the wall clock.
pub fn analyze(entries: &[LogEntry]) -> LogSummary {
    analyze_at(entries, Utc::now())
}

/// Summarize `entries` with an explicit moment of analysis.
pub fn analyze_at(entries: &[LogEntry], now: DateTime<Utc>) -> LogSummary {
    Analyzer::default().analyze(entries, now)
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    window: Months,
    recent_errors_limit: usize,
}

impl Analyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            window: Months::new(config.window_months),
            recent_errors_limit: config.recent_errors_limit,
        }
    }

    /// Start of the recency window; entries strictly before it are excluded.
    ///
    /// Calendar-month arithmetic clamps the day, so 31 March maps to the
    /// last day of February.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(self.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn analyze(&self, entries: &[LogEntry], now: DateTime<Utc>) -> LogSummary {
        let cutoff = self.cutoff(now);
        let mut summary = LogSummary::empty(now);
        let mut errors: Vec<&LogEntry> = Vec::new();

        for entry in entries.iter().filter(|e| e.timestamp >= cutoff) {
            summary.total_entries += 1;
            let day = entry.timestamp.date_naive();

            match entry.level {
                Level::Error => {
                    summary.total_errors += 1;
                    *summary
                        .errors_by_type
                        .entry(error_type_label(&entry.message).to_string())
                        .or_insert(0) += 1;
                    *summary.errors_by_day.entry(day).or_insert(0) += 1;
                    errors.push(entry);
                }
                Level::Warn => {
                    summary.total_warnings += 1;
                    *summary.warnings_by_day.entry(day).or_insert(0) += 1;
                }
                Level::Info | Level::Debug => {}
            }
        }

        // Stable: equal timestamps keep source order.
        errors.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        summary.recent_errors = errors
            .into_iter()
            .take(self.recent_errors_limit)
            .cloned()
            .collect();

        tracing::debug!(
            cutoff = %cutoff,
            in_window = summary.total_entries,
            errors = summary.total_errors,
            warnings = summary.total_warnings,
            "analysis complete"
        );

        summary
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}
