//! Format placeholder comparison

use std::collections::HashMap;

use regex::Regex;

lazy_static::lazy_static! {
    /// `%%` or `%` followed by one of `s d i f u x`
    static ref PLACEHOLDER: Regex =
        Regex::new(r"%(?:%|[sdifux])").expect("valid placeholder pattern");
}

/// Count each placeholder token in `text`
pub fn placeholder_counts(text: &str) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for m in PLACEHOLDER.find_iter(text) {
        *counts.entry(m.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Same placeholder multiset and same number of newlines
pub fn is_consistent(source: &str, translation: &str) -> bool {
    placeholder_counts(source) == placeholder_counts(translation)
        && newline_count(source) == newline_count(translation)
}

fn newline_count(text: &str) -> usize {
    text.matches('\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let counts = placeholder_counts("%s has %d of %d (100%%) %q");
        assert_eq!(counts.get("%s"), Some(&1));
        assert_eq!(counts.get("%d"), Some(&2));
        assert_eq!(counts.get("%%"), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_order_does_not_matter() {
        assert!(is_consistent("%s got %d", "%d отримав %s"));
    }

    #[test]
    fn test_missing_placeholder() {
        assert!(!is_consistent("Hello %s, you have %d items", "Привіт %s"));
    }

    #[test]
    fn test_newline_mismatch() {
        assert!(is_consistent("a\nb", "в\nг"));
        assert!(!is_consistent("a\nb", "вг"));
    }
}
