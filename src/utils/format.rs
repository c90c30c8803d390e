//! Output formatting utilities

/// Truncate to at most `max_len` characters, marking the cut with `...`.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len < 3 {
        return "...".to_string();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{kept}...")
}

/// `1 record`, `2 records`.
#[must_use]
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_string("Jane", 10), "Jane");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate_string("Jane Elizabeth Doe", 10), "Jane El...");
        assert_eq!(truncate_string("abcdef", 2), "...");
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize(1, "record"), "1 record");
        assert_eq!(pluralize(0, "record"), "0 records");
    }
}
