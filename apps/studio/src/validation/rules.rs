use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("Invalid email regex")
});

/// Length in Unicode scalar values, not bytes.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn has_min_chars(value: &str, min: usize) -> bool {
    char_len(value) >= min
}

/// Accepts the common `local@domain.tld` shape.
///
/// The local part may not start with a dot or contain `..`; the TLD must be
/// at least two letters.
pub fn is_email(value: &str) -> bool {
    if value.starts_with('.') || value.contains("..") {
        return false;
    }
    EMAIL_RE.is_match(value)
}

/// Any absolute URL the `url` crate can parse.
pub fn is_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// Absent and empty both mean "not provided"; anything else must be a URL.
pub fn is_optional_url(value: Option<&str>) -> bool {
    match value {
        None | Some("") => true,
        Some(v) => is_url(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("Zoë"), 3);
        assert!(has_min_chars("Jo", 2));
        assert!(!has_min_chars("J", 2));
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_email("jo@x.com"));
        assert!(is_email("first.last+tag@mail.example.org"));
        assert!(is_email("o'neil@company.io"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_email("not-an-email"));
        assert!(!is_email("a@b"));
        assert!(!is_email(".jo@x.com"));
        assert!(!is_email("jo..lee@x.com"));
        assert!(!is_email("jo.@x.com"));
        assert!(!is_email("jo@x.c"));
        assert!(!is_email(""));
    }

    #[test]
    fn test_urls() {
        assert!(is_url("https://linkedin.com/in/jolee"));
        assert!(is_url("http://localhost:3000"));
        assert!(!is_url("linkedin.com/in/jolee"));
        assert!(!is_url("not a url"));
    }

    #[test]
    fn test_optional_url_sentinels() {
        assert!(is_optional_url(None));
        assert!(is_optional_url(Some("")));
        assert!(is_optional_url(Some("https://jo.dev")));
        assert!(!is_optional_url(Some("jo dot dev")));
    }
}
