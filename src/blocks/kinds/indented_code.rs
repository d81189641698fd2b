//! Indented code block: 4+ columns of indent, no other opener pending.

use crate::blocks::scan::indent_width;

pub struct IndentedCode;

impl IndentedCode {
    pub const INDENT: usize = 4;

    pub fn matches(line: &str, offset: usize) -> bool {
        indent_width(line, offset) >= Self::INDENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_four_spaces() {
        assert!(IndentedCode::matches("    code", 0));
    }

    #[test]
    fn rejects_three_spaces() {
        assert!(!IndentedCode::matches("   code", 0));
    }
}
