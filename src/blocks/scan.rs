//! Column-counting helpers shared by the container-match walk and the
//! block-opener recognizers.
//!
//! Every line reaching this module has already been detabbed (§4.1), so
//! every structural marker character is single-byte ASCII and byte offset
//! and column number coincide; there is no separate column-tracking type.

/// Byte offset (== column) of the first non-space character at or after
/// `from`, or `line.len()` if the remainder is all spaces.
pub fn first_non_space(line: &str, from: usize) -> usize {
    let bytes = line.as_bytes();
    let mut i = from.min(bytes.len());
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    i
}

/// Number of leading spaces starting at `from`.
pub fn indent_width(line: &str, from: usize) -> usize {
    first_non_space(line, from) - from.min(line.len())
}

/// True if the line from `from` onward is empty or all spaces.
pub fn is_blank(line: &str, from: usize) -> bool {
    first_non_space(line, from) == line.len()
}
