use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::parser::model::LogEntry;

/// Aggregate view of the entries inside the recency window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSummary {
    pub total_errors: usize,
    pub total_warnings: usize,
    /// Entries of any level inside the window
    pub total_entries: usize,
    pub errors_by_type: BTreeMap<String, usize>,
    /// UTC calendar day -> error count
    pub errors_by_day: BTreeMap<NaiveDate, usize>,
    pub warnings_by_day: BTreeMap<NaiveDate, usize>,
    /// Newest first
    pub recent_errors: Vec<LogEntry>,
    pub last_updated: DateTime<Utc>,
}

impl LogSummary {
    /// A summary with zero counts.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            total_errors: 0,
            total_warnings: 0,
            total_entries: 0,
            errors_by_type: BTreeMap::new(),
            errors_by_day: BTreeMap::new(),
            warnings_by_day: BTreeMap::new(),
            recent_errors: Vec::new(),
            last_updated: now,
        }
    }

    /// Most frequent error label, ties broken by label order.
    pub fn top_error_type(&self) -> Option<(&str, usize)> {
        self.errors_by_type
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(label, count)| (label.as_str(), *count))
    }
}
