//! Line-ending normalization, line splitting, and tab expansion (§4.1).
//!
//! This step is destructive: tabs are expanded to spaces and the original
//! line-ending style is discarded. There is no channel carrying original
//! tab positions or line endings forward, which is why byte-exact
//! round-tripping is an explicit non-goal of this crate.

const TAB_WIDTH: usize = 4;

/// Normalizes line endings to `\n`, splits on `\n`, and detabs each line.
///
/// Trailing empty elements produced by a final `\n` are dropped, matching
/// `str::split('\n')` semantics minus the empty tail.
pub fn normalize_and_split(input: &str) -> Vec<String> {
    let normalized = normalize_newlines(input);
    let mut lines: Vec<&str> = normalized.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines.into_iter().map(detab).collect()
}

/// Collapses `\r\n` and lone `\r` into `\n`.
pub fn normalize_newlines(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            other => out.push(other),
        }
    }
    out
}

/// Expands tabs to 1-4 spaces so the next column is the next multiple of
/// `TAB_WIDTH`, with tab stops computed relative to the start of `line`.
pub fn detab(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len());
    let mut column = 0usize;
    for c in line.chars() {
        if c == '\t' {
            let spaces = TAB_WIDTH - (column % TAB_WIDTH);
            for _ in 0..spaces {
                out.push(' ');
            }
            column += spaces;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}
