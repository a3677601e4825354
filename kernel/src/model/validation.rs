use std::sync::OnceLock;

use regex::Regex;

pub const MAX_EMAIL_LEN: usize = 100;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9+_.-]+@([A-Za-z0-9.-]+\.[A-Za-z]{2,})$";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// 文字数は UTF-8 のバイト数ではなく文字単位で数える
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("guest@example.com", true)]
    #[case("first.last+tag@mail.example.ec", true)]
    #[case("guest@example.c", false)]
    #[case("guest@localhost", false)]
    #[case("guest.example.com", false)]
    #[case("gu est@example.com", false)]
    #[case("guest@exa_mple.com", false)]
    fn email_format(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }

    #[test]
    fn blank_means_whitespace_only() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn length_counts_characters() {
        assert_eq!(char_len("Ñandú"), 5);
    }
}
