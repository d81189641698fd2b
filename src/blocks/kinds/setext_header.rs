//! Setext header underline: `^(=+|-+) *$`, only recognized as a rewrite of
//! a single-line open Paragraph.

use crate::blocks::scan::indent_width;

pub struct SetextHeader;

impl SetextHeader {
    /// Tries to match a setext underline at `offset`. Returns the header
    /// level (1 for `=`, 2 for `-`) if the remainder is a run of one
    /// underline character followed only by spaces.
    pub fn try_match(line: &str, offset: usize) -> Option<u8> {
        if indent_width(line, offset) > 3 {
            return None;
        }
        let start = offset + indent_width(line, offset);
        let rest = &line[start..];
        let mut chars = rest.chars();
        let first = chars.next()?;
        let ch = match first {
            '=' | '-' => first,
            _ => return None,
        };
        let mut saw_other = false;
        for c in rest.chars() {
            if c == ch {
                continue;
            }
            if c == ' ' {
                saw_other = true;
                continue;
            }
            return None;
        }
        let _ = saw_other;
        Some(if ch == '=' { 1 } else { 2 })
    }
}
