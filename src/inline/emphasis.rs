//! Delimiter-run scanning for emphasis and strong emphasis (§4.5).
//!
//! The actual provisional-Str/splice state machine lives in
//! [`crate::inline::parser::InlineParser`], since it needs simultaneous
//! mutable access to the cursor and the output sequence being built;
//! this module owns only the pure predicate used to decide whether a
//! delimiter run can open, close, or both.

use crate::inline::cursor::Cursor;

/// `(run_length, can_open, can_close)` for the delimiter run of `ch`
/// starting at the cursor. Does not consume anything.
pub fn scan_delims(cursor: &Cursor, ch: char) -> (usize, bool, bool) {
    let count = cursor.run_length(ch);
    if count == 0 {
        return (0, false, false);
    }
    let prev = cursor.prev_char();
    let after_byte = cursor.pos() + count;
    let next = cursor.source()[after_byte..].chars().next();

    let is_whitespace = |c: Option<char>| c.map(char::is_whitespace).unwrap_or(true);
    let is_alphanumeric = |c: Option<char>| c.map(char::is_alphanumeric).unwrap_or(false);

    let in_range = (1..=3).contains(&count);
    let can_open = in_range && !is_whitespace(next) && (ch != '_' || !is_alphanumeric(prev));
    let can_close = in_range && !is_whitespace(prev) && (ch != '_' || !is_alphanumeric(next));
    (count, can_open, can_close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_opens_before_word() {
        let cur = Cursor::new("*foo*");
        let (count, can_open, can_close) = scan_delims(&cur, '*');
        assert_eq!(count, 1);
        assert!(can_open);
        assert!(!can_close);
    }

    #[test]
    fn star_closes_after_word() {
        let mut cur = Cursor::new("foo*");
        cur.advance_bytes(3);
        let (count, can_open, can_close) = scan_delims(&cur, '*');
        assert_eq!(count, 1);
        assert!(!can_open);
        assert!(can_close);
    }

    #[test]
    fn underscore_does_not_open_mid_word() {
        let mut cur = Cursor::new("foo_bar_");
        cur.advance_bytes(3);
        let (_, can_open, _) = scan_delims(&cur, '_');
        assert!(!can_open);
    }

    #[test]
    fn run_longer_than_three_cannot_open_or_close() {
        let cur = Cursor::new("****foo");
        let (count, can_open, can_close) = scan_delims(&cur, '*');
        assert_eq!(count, 4);
        assert!(!can_open);
        assert!(!can_close);
    }

    #[test]
    fn whitespace_after_prevents_open() {
        let cur = Cursor::new("* foo*");
        let (_, can_open, _) = scan_delims(&cur, '*');
        assert!(!can_open);
    }

    #[test]
    fn start_of_text_does_not_block_open() {
        let cur = Cursor::new("_foo_");
        let (_, can_open, _) = scan_delims(&cur, '_');
        assert!(can_open);
    }
}
