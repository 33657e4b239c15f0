/// Truncates a string to at most `max_chars` characters, respecting
/// character boundaries so multi-byte text never splits mid-codepoint.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}

/// Collapses all runs of whitespace in `text` into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compares two hosts, treating a leading `www.` as insignificant.
pub fn same_host(a: &str, b: &str) -> bool {
    let a = a.strip_prefix("www.").unwrap_or(a);
    let b = b.strip_prefix("www.").unwrap_or(b);
    a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_input_untouched() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_chars_multibyte_safe() {
        // Each é is one char but two bytes
        let s = "éééééé";
        assert_eq!(truncate_chars(s, 3), "ééé");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("  green \n\t fees   $45  "),
            "green fees $45"
        );
    }

    #[test]
    fn test_same_host_ignores_www() {
        assert!(same_host("www.pinehurstgolf.com", "pinehurstgolf.com"));
        assert!(same_host("PineHurstGolf.com", "pinehurstgolf.com"));
        assert!(!same_host("pinehurstgolf.com", "othercourse.com"));
    }
}
