//! Line sanitization before matching.
//!
//! Every raw line goes through `sanitize_line` before any matcher sees it.
//! Over-long lines are dropped and bundler `(error: ...)` wrappers are
//! unwrapped.

use crate::utils::config::MAX_LINE_LENGTH;
use log::trace;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

// Bundlers (webpack) wrap locations as "(error: <location>)". Group 1 is set
// only when the wrapper directly follows "at ", i.e. there is no label.
static BUNDLER_ERROR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(at (?:async )?)?\(error: (.*)\)").unwrap());

/// Clean a raw stack line for matching
///
/// **Public** - applied by `StackParser::parse` to every line
///
/// # Returns
/// * `None` - line exceeds `MAX_LINE_LENGTH` characters and must be skipped
/// * `Some(line)` - cleaned line, borrowed when nothing changed
pub fn sanitize_line(line: &str) -> Option<Cow<'_, str>> {
    // Byte length is an upper bound on char count, so short lines skip the count
    if line.len() > MAX_LINE_LENGTH && line.chars().count() > MAX_LINE_LENGTH {
        trace!("Skipping stack line of {} bytes", line.len());
        return None;
    }

    Some(BUNDLER_ERROR_REGEX.replace(line, unwrap_bundler_location))
}

/// **Private** - labeled frames keep their parentheses, bare locations drop them
fn unwrap_bundler_location(caps: &Captures<'_>) -> String {
    match caps.get(1) {
        Some(prefix) => format!("{}{}", prefix.as_str(), &caps[2]),
        None => format!("({})", &caps[2]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_borrowed() {
        let line = "    at foo (/app/file.js:1:1)";
        let cleaned = sanitize_line(line).unwrap();
        assert!(matches!(cleaned, Cow::Borrowed(_)));
        assert_eq!(cleaned, line);
    }

    #[test]
    fn test_unwraps_bundler_error() {
        let cleaned = sanitize_line("at foo (error: /app/file.js:1:1)").unwrap();
        assert_eq!(cleaned, "at foo (/app/file.js:1:1)");
    }

    #[test]
    fn test_unwraps_unlabeled_bundler_error() {
        let cleaned = sanitize_line("    at (error: /app/file.js:1:1)").unwrap();
        assert_eq!(cleaned, "    at /app/file.js:1:1");

        let cleaned = sanitize_line("at async (error: /app/file.js:1:1)").unwrap();
        assert_eq!(cleaned, "at async /app/file.js:1:1");
    }

    #[test]
    fn test_length_cap_boundary() {
        let at_cap = "a".repeat(MAX_LINE_LENGTH);
        assert!(sanitize_line(&at_cap).is_some());

        let over_cap = "a".repeat(MAX_LINE_LENGTH + 1);
        assert!(sanitize_line(&over_cap).is_none());
    }

    #[test]
    fn test_length_cap_counts_chars() {
        // 600 two-byte chars: over the cap in bytes, under it in chars
        let line = "é".repeat(600);
        assert!(sanitize_line(&line).is_some());
    }
}
