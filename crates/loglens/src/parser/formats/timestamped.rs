use std::sync::LazyLock;
use regex::Regex;

use crate::parser::formats::{compile, level_token, Extracted, LEVEL_TOKEN};
use crate::parser::timestamp;

const DATE: &str = r"(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})";
// `,` covers the Python logging millisecond separator.
const TIME: &str = r"(?P<time>[0-9]{2}:[0-9]{2}:[0-9]{2})(?:[.,](?P<frac>[0-9]+))?";
const OFFSET: &str = r"(?P<offset>Z|[+-][0-9]{2}:?[0-9]{2})?";

static ISO: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"^{DATE}T{TIME}{OFFSET}\s+{LEVEL_TOKEN}\s+(?P<message>.+)$"))
});

static SPACED: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"^{DATE}\s+{TIME}\s+{LEVEL_TOKEN}\s+(?P<message>.+)$"))
});

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"^\[{DATE}\s+{TIME}\]\s+{LEVEL_TOKEN}\s+(?P<message>.+)$"))
});

static LEVEL_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"^{LEVEL_TOKEN}\s+{DATE}\s+{TIME}\s+(?P<message>.+)$"))
});

/// `2024-01-01T10:00:00[.fff][Z|±HH:MM] LEVEL message`
pub fn iso(line: &str) -> Option<Extracted<'_>> {
    extract_with(&ISO, line)
}

/// `2024-01-01 10:00:00[.fff] LEVEL message`
pub fn spaced(line: &str) -> Option<Extracted<'_>> {
    extract_with(&SPACED, line)
}

/// `[2024-01-01 10:00:00[.fff]] LEVEL message`
pub fn bracketed(line: &str) -> Option<Extracted<'_>> {
    extract_with(&BRACKETED, line)
}

/// `LEVEL 2024-01-01 10:00:00[.fff] message`
pub fn level_first(line: &str) -> Option<Extracted<'_>> {
    extract_with(&LEVEL_FIRST, line)
}

fn extract_with<'a>(pattern: &Regex, line: &'a str) -> Option<Extracted<'a>> {
    let caps = pattern.captures(line)?;

    let timestamp = timestamp::from_parts(
        caps.name("date")?.as_str(),
        caps.name("time")?.as_str(),
        caps.name("frac").map(|m| m.as_str()),
        caps.name("offset").map(|m| m.as_str()),
    );

    Some(Extracted {
        timestamp,
        level: level_token(&caps)?,
        message: caps.name("message")?.as_str(),
    })
}
