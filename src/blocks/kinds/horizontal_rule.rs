//! Horizontal rule: 3+ matching `*`, `-`, or `_` characters, optionally
//! interspersed with spaces, indent ≤ 3.

use crate::blocks::scan::{first_non_space, indent_width};

pub struct HorizontalRule;

impl HorizontalRule {
    pub const CHARS: [char; 3] = ['*', '-', '_'];

    pub fn matches(line: &str, offset: usize) -> bool {
        if indent_width(line, offset) > 3 {
            return false;
        }
        let start = first_non_space(line, offset);
        let rest = &line[start..];
        let mut first_char = None;
        let mut count = 0usize;
        for c in rest.chars() {
            if c == ' ' {
                continue;
            }
            match first_char {
                None if Self::CHARS.contains(&c) => {
                    first_char = Some(c);
                    count += 1;
                }
                Some(ch) if ch == c => count += 1,
                _ => return false,
            }
        }
        count >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_plain_rule() {
        assert!(HorizontalRule::matches("***", 0));
        assert!(HorizontalRule::matches("---", 0));
        assert!(HorizontalRule::matches("___", 0));
    }

    #[test]
    fn matches_spaced_rule() {
        assert!(HorizontalRule::matches("* * *", 0));
        assert!(HorizontalRule::matches(" -  -  - ", 0));
    }

    #[test]
    fn rejects_too_few_characters() {
        assert!(!HorizontalRule::matches("**", 0));
    }

    #[test]
    fn rejects_mixed_characters() {
        assert!(!HorizontalRule::matches("*-*", 0));
    }

    #[test]
    fn rejects_stray_text() {
        assert!(!HorizontalRule::matches("*** x", 0));
    }

    #[test]
    fn rejects_too_much_indent() {
        assert!(!HorizontalRule::matches("    ***", 0));
    }
}
