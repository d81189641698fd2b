//! Code span: backtick-run matching and whitespace collapsing.

use crate::inline::cursor::Cursor;

pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: char = '`';

    /// Tries to match a code span at the cursor, which must be positioned
    /// at the opening backtick run. On success, advances the cursor past
    /// the closing run and returns the collapsed content. On failure
    /// (no closing run of the same length), the cursor is left
    /// untouched and the caller falls back to a literal `Str` of the
    /// opening run.
    pub fn try_match(cursor: &mut Cursor) -> Option<String> {
        let start = cursor.pos();
        let open_len = cursor.run_length(Self::TICK);
        cursor.advance_bytes(open_len);
        let content_start = cursor.pos();

        let source = cursor.source();
        let mut search = content_start;
        loop {
            let Some(rel) = source[search..].find(Self::TICK) else {
                cursor.set_pos(start);
                return None;
            };
            let run_start = search + rel;
            let run_len = source[run_start..]
                .chars()
                .take_while(|&c| c == Self::TICK)
                .count();
            if run_len == open_len {
                let raw = &source[content_start..run_start];
                cursor.set_pos(run_start + run_len);
                return Some(Self::collapse(raw));
            }
            search = run_start + run_len;
        }
    }

    /// Collapses every run of `[ \n]+` to a single space, then trims.
    fn collapse(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut in_run = false;
        for c in raw.chars() {
            if c == ' ' || c == '\n' {
                if !in_run {
                    out.push(' ');
                    in_run = true;
                }
            } else {
                out.push(c);
                in_run = false;
            }
        }
        out.trim().to_string()
    }
}
