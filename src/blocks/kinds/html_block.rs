//! HTML block: a single generic open pattern, closed by the next blank
//! line.
//!
//! CommonMark proper distinguishes seven HTML block sub-types with
//! different closing conditions. This crate folds them into one rule: any
//! line at indent ≤ 3 that opens a tag, comment, processing instruction,
//! declaration, or CDATA section starts an HtmlBlock, and the block ends
//! at the next blank line (§4.2(a) HtmlBlock continuation rule).

use std::sync::OnceLock;

use regex::Regex;

use crate::blocks::scan::{first_non_space, indent_width};

pub struct HtmlBlock;

fn open_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:</?[a-zA-Z][a-zA-Z0-9-]*(?:\s|/?>|$)|<!--|<\?|<!\[CDATA\[|<![A-Za-z])")
            .expect("html block open pattern is valid")
    })
}

impl HtmlBlock {
    pub fn matches_open(line: &str, offset: usize) -> bool {
        if indent_width(line, offset) > 3 {
            return false;
        }
        let start = first_non_space(line, offset);
        open_pattern().is_match(&line[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_opening_tag() {
        assert!(HtmlBlock::matches_open("<div>", 0));
        assert!(HtmlBlock::matches_open("<div class=\"x\">", 0));
    }

    #[test]
    fn matches_closing_tag() {
        assert!(HtmlBlock::matches_open("</div>", 0));
    }

    #[test]
    fn matches_comment_open() {
        assert!(HtmlBlock::matches_open("<!-- comment", 0));
    }

    #[test]
    fn matches_processing_instruction() {
        assert!(HtmlBlock::matches_open("<?php echo 1; ?>", 0));
    }

    #[test]
    fn matches_cdata() {
        assert!(HtmlBlock::matches_open("<![CDATA[ data ]]>", 0));
    }

    #[test]
    fn rejects_plain_text() {
        assert!(!HtmlBlock::matches_open("hello <div>", 0));
    }

    #[test]
    fn rejects_too_much_indent() {
        assert!(!HtmlBlock::matches_open("    <div>", 0));
    }
}
