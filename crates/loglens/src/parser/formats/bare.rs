use std::sync::LazyLock;
use chrono::{DateTime, Utc};
use regex::Regex;

use crate::parser::formats::{compile, Extracted};

static BARE_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<level>[A-Za-z0-9_]+):\s+(?P<message>.+)$"));

/// `level: message`. The line has no timestamp, so `now` is used.
pub fn extract(line: &str, now: DateTime<Utc>) -> Option<Extracted<'_>> {
    let caps = BARE_LEVEL.captures(line)?;

    Some(Extracted {
        timestamp: Some(now),
        level: caps.name("level")?.as_str(),
        message: caps.name("message")?.as_str(),
    })
}
