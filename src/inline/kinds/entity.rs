//! HTML entity and numeric character reference matching.

use std::sync::OnceLock;

use regex::Regex;

pub struct Entity;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^&(#x[a-f0-9]{1,8}|#[0-9]{1,8}|[a-z][a-z0-9]{1,31});")
            .expect("entity pattern is valid")
    })
}

impl Entity {
    /// Returns the full matched entity text (including `&` and `;`) at
    /// the start of `text`, if any.
    pub fn try_match(text: &str) -> Option<&str> {
        pattern().find(text).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_named_entity() {
        assert_eq!(Entity::try_match("&amp; rest"), Some("&amp;"));
    }

    #[test]
    fn matches_decimal_reference() {
        assert_eq!(Entity::try_match("&#38; rest"), Some("&#38;"));
    }

    #[test]
    fn matches_hex_reference_case_insensitively() {
        assert_eq!(Entity::try_match("&#X26; rest"), Some("&#X26;"));
    }

    #[test]
    fn rejects_missing_semicolon() {
        assert_eq!(Entity::try_match("&amp rest"), None);
    }

    #[test]
    fn rejects_non_entity() {
        assert_eq!(Entity::try_match("plain text"), None);
    }
}
