//! ANSI escape code stripping
//!
//! Log files captured from a terminal often keep the colour codes the
//! application emitted. They sit in front of timestamps and level tokens
//! and would stop every line shape from matching, so they are removed
//! before classification.

use std::borrow::Cow;

const ESC: char = '\u{1b}';
const BEL: char = '\u{07}';

/// Strip ANSI escape codes from a line
///
/// Handles:
/// - CSI sequences: `ESC [ ... final` (final byte in `@`..=`~`, usually `m`)
/// - OSC sequences: `ESC ] ...` terminated by BEL or `ESC \`
/// - Two-character Fe sequences: `ESC` followed by `@`..=`_`
///
/// Returns `Cow::Borrowed` when the line has no ESC character.
pub fn strip_ansi_codes(input: &str) -> Cow<'_, str> {
    if !input.contains(ESC) {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ESC {
            output.push(c);
            continue;
        }

        match chars.peek().copied() {
            // Lone trailing ESC: drop it
            None => break,
            Some('[') => {
                chars.next();
                for b in chars.by_ref() {
                    if ('@'..='~').contains(&b) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(b) = chars.next() {
                    if b == BEL {
                        break;
                    }
                    if b == ESC && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            Some(next) if ('@'..='_').contains(&next) => {
                chars.next();
            }
            // Unknown escape: drop the ESC, keep what follows
            Some(_) => {}
        }
    }

    Cow::Owned(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_cow_optimization() {
        let output = strip_ansi_codes("Hello World");
        match output {
            Cow::Borrowed(s) => assert_eq!(s, "Hello World"),
            Cow::Owned(_) => panic!("Should not have allocated"),
        }
    }

    #[test]
    fn test_strip_simple_ansi() {
        let output = strip_ansi_codes("\x1b[32mHello\x1b[0m World");
        assert_eq!(output, "Hello World");
    }

    #[test]
    fn test_strip_colored_log_line() {
        let input = "\x1b[2m2024-01-01 10:00:00\x1b[0m \x1b[31mERROR\x1b[0m db timeout";
        assert_eq!(strip_ansi_codes(input), "2024-01-01 10:00:00 ERROR db timeout");
    }

    #[test]
    fn test_only_ansi_codes() {
        assert_eq!(strip_ansi_codes("\x1b[0m\x1b[32m\x1b[1m"), "");
    }

    #[test]
    fn test_osc_hyperlink() {
        let input = "\x1b]8;;https://example.com\x07Link\x1b]8;;\x07";
        assert_eq!(strip_ansi_codes(input), "Link");
    }

    #[test]
    fn test_osc_string_terminator() {
        let input = "\x1b]0;title\x1b\\after";
        assert_eq!(strip_ansi_codes(input), "after");
    }

    #[test]
    fn test_lone_trailing_escape() {
        assert_eq!(strip_ansi_codes("text\x1b"), "text");
    }

    #[test]
    fn test_multibyte_text_preserved() {
        let input = "\x1b[33mwarn\x1b[0m: café ☕ überfüllt";
        assert_eq!(strip_ansi_codes(input), "warn: café ☕ überfüllt");
    }
}
