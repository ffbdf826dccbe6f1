use std::sync::LazyLock;
use regex::Regex;

use crate::parser::formats::{compile, level_token, Extracted, LEVEL_TOKEN};
use crate::parser::timestamp;

const EPOCH: &str = r"(?P<epoch>[0-9]{10,13})(?:\.(?P<frac>[0-9]+))?";

static EPOCH_LINE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"^{EPOCH}\s+{LEVEL_TOKEN}\s+(?P<message>.+)$"))
});

/// `1704067200[.fff] LEVEL message` or `1704067200000 LEVEL message`
pub fn extract(line: &str) -> Option<Extracted<'_>> {
    let caps = EPOCH_LINE.captures(line)?;

    let timestamp = timestamp::from_epoch(
        caps.name("epoch")?.as_str(),
        caps.name("frac").map(|m| m.as_str()),
    );

    Some(Extracted {
        timestamp,
        level: level_token(&caps)?,
        message: caps.name("message")?.as_str(),
    })
}
