//! Error type-label derivation for `errorsByType` buckets.

use std::sync::LazyLock;
use regex::Regex;

pub const UNKNOWN_ERROR: &str = "Unknown Error";

static NAMED_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+(?:Error|Exception))").expect("type label pattern must compile")
});

/// Derive a short category label from an error message.
///
/// A leading word ending in `Error` or `Exception` wins; otherwise the first
/// token before whitespace or `:` is used. Empty messages map to
/// [`UNKNOWN_ERROR`].
pub fn error_type_label(message: &str) -> &str {
    if let Some(name) = NAMED_TYPE.captures(message).and_then(|caps| caps.get(1)) {
        return name.as_str();
    }

    message
        .split(|c: char| c.is_whitespace() || c == ':')
        .next()
        .filter(|token| !token.is_empty())
        .unwrap_or(UNKNOWN_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_error_and_exception() {
        assert_eq!(error_type_label("TypeError: x is undefined"), "TypeError");
        assert_eq!(error_type_label("NullPointerException at line 4"), "NullPointerException");
        assert_eq!(error_type_label("IOErrorish: partial"), "IOError");
    }

    #[test]
    fn test_first_token_fallback() {
        assert_eq!(error_type_label("disk full"), "disk");
        assert_eq!(error_type_label("timeout: upstream"), "timeout");
        assert_eq!(error_type_label("Error"), "Error");
    }

    #[test]
    fn test_empty_message_is_unknown() {
        assert_eq!(error_type_label(""), UNKNOWN_ERROR);
        assert_eq!(error_type_label(":leading colon"), UNKNOWN_ERROR);
    }
}
