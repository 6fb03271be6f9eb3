// ABOUTME: Shared utility functions for modelpin
// ABOUTME: Display helpers used by the CLI tables

use chrono::{DateTime, Local, Utc};

/// Truncate a string to `max` characters, appending an ellipsis when cut
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Render a UTC timestamp in local time for tables
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("short", 10, "short")]
    #[case("exactly-ten", 11, "exactly-ten")]
    #[case("claude-sonnet-4-5", 10, "claude-...")]
    #[case("abcdef", 3, "abc")]
    fn test_truncate(#[case] input: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(truncate(input, max), expected);
    }

    #[test]
    fn test_format_timestamp_shape() {
        let ts = Utc::now();
        let formatted = format_timestamp(&ts);
        assert_eq!(formatted.len(), "2025-01-01 12:00".len());
    }
}
