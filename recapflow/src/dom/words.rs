//! Whitespace word counting.

/// Counts the whitespace-separated words in `text`.
///
/// Leading, trailing and repeated whitespace never produce empty words, so a
/// blank string has zero words.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Returns the last `count` words of `text`, in order.
#[must_use]
pub fn last_words(text: &str, count: usize) -> Vec<&str> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let start = words.len().saturating_sub(count);
    words[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("  one   two\nthree "), 3);
    }

    #[test]
    fn test_count_words_non_breaking_space() {
        assert_eq!(count_words("one\u{a0}two"), 2);
    }

    #[test]
    fn test_last_words() {
        assert_eq!(last_words("a b c d", 2), vec!["c", "d"]);
        assert_eq!(last_words("a b", 5), vec!["a", "b"]);
        assert!(last_words("a b", 0).is_empty());
    }
}
