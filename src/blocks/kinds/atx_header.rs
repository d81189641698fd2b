//! ATX header: `^#{1,6}( +|$)`, with trailing `#`-run stripped from content.

use crate::blocks::scan::{first_non_space, indent_width};

pub struct AtxHeader;

impl AtxHeader {
    /// Tries to open an ATX header at `offset`. Returns `(level, content)`
    /// where `content` has the closing `#` run (if any) already stripped.
    pub fn try_open(line: &str, offset: usize) -> Option<(u8, String)> {
        if indent_width(line, offset) > 3 {
            return None;
        }
        let start = first_non_space(line, offset);
        let rest = &line[start..];
        let level = rest.chars().take_while(|&c| c == '#').count();
        if level == 0 || level > 6 {
            return None;
        }
        let after_hashes = &rest[level..];
        if !after_hashes.is_empty() && !after_hashes.starts_with(' ') {
            return None;
        }
        let content = Self::strip_closing_sequence(after_hashes.trim_start_matches(' '));
        Some((level as u8, content))
    }

    /// Strips a trailing run of spaces then `#`s then spaces, unless the
    /// last `#` in that run is escaped (`\#`), in which case it is kept
    /// literal and the strip does not happen.
    fn strip_closing_sequence(content: &str) -> String {
        let trimmed_end = content.trim_end_matches(' ');
        let hash_start = {
            let mut i = trimmed_end.len();
            let bytes = trimmed_end.as_bytes();
            while i > 0 && bytes[i - 1] == b'#' {
                i -= 1;
            }
            i
        };
        if hash_start == trimmed_end.len() {
            return content.trim().to_string();
        }
        if hash_start > 0 && trimmed_end.as_bytes()[hash_start - 1] == b'\\' {
            return content.trim().to_string();
        }
        let before_hashes = &trimmed_end[..hash_start];
        if hash_start == 0 || before_hashes.ends_with(' ') {
            before_hashes.trim_end_matches(' ').to_string()
        } else {
            content.trim().to_string()
        }
    }
}
