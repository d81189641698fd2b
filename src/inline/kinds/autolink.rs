//! Autolink: `<...>` recognized as an email address or a scheme URI.

use std::sync::OnceLock;

use regex::Regex;

use crate::inline::types::Inline;

pub struct Autolink;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email autolink pattern is valid")
    })
}

fn scheme_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[a-z][a-z0-9.+-]{1,31}:[^<>\x00-\x20]*$")
            .expect("scheme autolink pattern is valid")
    })
}

impl Autolink {
    /// Recognizes `content` (the text between `<` and `>`, exclusive) as
    /// an email or scheme autolink, returning the `Link` inline node to
    /// emit.
    pub fn recognize(content: &str) -> Option<Inline> {
        if email_pattern().is_match(content) {
            return Some(Inline::Link {
                destination: content.to_string(),
                title: String::new(),
                label: vec![Inline::Str(format!("mailto:{content}"))],
            });
        }
        if scheme_pattern().is_match(content) {
            return Some(Inline::Link {
                destination: content.to_string(),
                title: String::new(),
                label: vec![Inline::Str(content.to_string())],
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_email() {
        let result = Autolink::recognize("foo@example.com").unwrap();
        match result {
            Inline::Link {
                destination,
                label,
                ..
            } => {
                assert_eq!(destination, "foo@example.com");
                assert_eq!(label, vec![Inline::Str("mailto:foo@example.com".to_string())]);
            }
            _ => panic!("expected Link"),
        }
    }

    #[test]
    fn recognizes_scheme_uri() {
        let result = Autolink::recognize("https://example.com/path").unwrap();
        match result {
            Inline::Link {
                destination,
                label,
                ..
            } => {
                assert_eq!(destination, "https://example.com/path");
                assert_eq!(
                    label,
                    vec![Inline::Str("https://example.com/path".to_string())]
                );
            }
            _ => panic!("expected Link"),
        }
    }

    #[test]
    fn rejects_space_in_content() {
        assert_eq!(Autolink::recognize("not a link"), None);
    }

    #[test]
    fn rejects_missing_scheme_colon() {
        assert_eq!(Autolink::recognize("example.com"), None);
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(Autolink::recognize("http://exa\u{1}mple.com"), None);
    }
}
