//! Text shaping for table cells and timestamps.

/// Cut `s` to at most `max_len` characters, marking the cut with `...`.
pub fn truncate(s: &str, max_len: usize) -> String {
    let Some((cut, _)) = s.char_indices().nth(max_len) else {
        return s.to_string();
    };
    if max_len <= 3 {
        return s[..cut].to_string();
    }
    let keep = s
        .char_indices()
        .nth(max_len - 3)
        .map_or(cut, |(index, _)| index);
    format!("{}...", &s[..keep])
}

/// Collapse line breaks so a value fits on one row.
pub fn single_line(s: &str) -> String {
    s.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Minute precision for people, full RFC 3339 for scripts.
pub fn format_millis(millis: i64, pretty: bool) -> String {
    match chrono::DateTime::from_timestamp_millis(millis) {
        Some(dt) if pretty => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        Some(dt) => dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Trip", 10), "Trip");
        assert_eq!(truncate("Trip", 4), "Trip");
        assert_eq!(truncate("Ski day in the Alps", 10), "Ski day...");
        assert_eq!(truncate("Ski", 2), "Sk");
        assert_eq!(truncate("Café au lait", 7), "Café...");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("Coffee\non the porch"), "Coffee on the porch");
        assert_eq!(single_line("a\r\n\r\nb"), "a b");
        assert_eq!(single_line(""), "");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(1_709_285_400_000, true), "2024-03-01 09:30 UTC");
        assert_eq!(format_millis(1_500, false), "1970-01-01T00:00:01.500Z");
    }
}
