//! Fenced code block: fence-open detection, fence-close matching, and
//! info-string unescaping.

use crate::blocks::scan::{first_non_space, indent_width};

/// ASCII punctuation that `\x` escapes to a literal `x` in an info string.
const ESCAPABLE: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<',
    '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
];

pub struct CodeFence;

/// The opening fence's recognized shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FenceOpen {
    pub offset: usize,
    pub fence_char: char,
    pub fence_length: usize,
    pub info: String,
}

impl CodeFence {
    /// Recognizes an opening fence at `offset`: a run of 3+ backticks with
    /// no further backtick on the line, or a run of 3+ tildes with no
    /// further tilde. Returns the fence shape and unescaped info string.
    pub fn try_open(line: &str, offset: usize) -> Option<FenceOpen> {
        let start = first_non_space(line, offset);
        let rest = &line[start..];
        let fence_char = rest.chars().next()?;
        if fence_char != '`' && fence_char != '~' {
            return None;
        }
        let fence_length = rest.chars().take_while(|&c| c == fence_char).count();
        if fence_length < 3 {
            return None;
        }
        let remainder = &rest[fence_length..];
        if fence_char == '`' && remainder.contains('`') {
            return None;
        }
        let info = Self::unescape(remainder.trim());
        Some(FenceOpen {
            offset: indent_width(line, offset),
            fence_char,
            fence_length,
            info,
        })
    }

    /// Checks whether `line` closes a fence of `fence_char`/`fence_length`:
    /// indent ≤ 3, then a run of the same character, length ≥ opener's,
    /// followed only by spaces.
    pub fn closes(line: &str, offset: usize, fence_char: char, fence_length: usize) -> bool {
        if indent_width(line, offset) > 3 {
            return false;
        }
        let start = first_non_space(line, offset);
        let rest = &line[start..];
        let run = rest.chars().take_while(|&c| c == fence_char).count();
        if run < fence_length {
            return false;
        }
        rest[run..].chars().all(|c| c == ' ')
    }

    fn unescape(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(&next) = chars.peek() {
                    if ESCAPABLE.contains(&next) {
                        out.push(next);
                        chars.next();
                        continue;
                    }
                }
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_backtick_fence_with_info() {
        let open = CodeFence::try_open("```rust", 0).unwrap();
        assert_eq!(open.fence_char, '`');
        assert_eq!(open.fence_length, 3);
        assert_eq!(open.info, "rust");
    }

    #[test]
    fn opens_tilde_fence() {
        let open = CodeFence::try_open("~~~~", 0).unwrap();
        assert_eq!(open.fence_char, '~');
        assert_eq!(open.fence_length, 4);
    }

    #[test]
    fn rejects_backtick_fence_with_backtick_in_info() {
        assert_eq!(CodeFence::try_open("```r`ust", 0), None);
    }

    #[test]
    fn allows_tilde_in_tilde_fence_info() {
        assert!(CodeFence::try_open("~~~ r~ust", 0).is_some());
    }

    #[test]
    fn rejects_short_run() {
        assert_eq!(CodeFence::try_open("``", 0), None);
    }

    #[test]
    fn unescapes_info_string() {
        let open = CodeFence::try_open(r"```c\+\+", 0).unwrap();
        assert_eq!(open.info, "c++");
    }

    #[test]
    fn closing_fence_must_match_char_and_length() {
        assert!(CodeFence::closes("```", 0, '`', 3));
        assert!(CodeFence::closes("````", 0, '`', 3));
        assert!(!CodeFence::closes("``", 0, '`', 3));
        assert!(!CodeFence::closes("~~~", 0, '`', 3));
    }

    #[test]
    fn closing_fence_allows_trailing_spaces_only() {
        assert!(CodeFence::closes("   ``` ", 0, '`', 3));
        assert!(!CodeFence::closes("``` x", 0, '`', 3));
    }

    #[test]
    fn closing_fence_rejects_too_much_indent() {
        assert!(!CodeFence::closes("    ```", 0, '`', 3));
    }
}
