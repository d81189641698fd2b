//! The ASCII punctuation set that `\x` escapes to a literal `x`.

pub const ESCAPABLE: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<',
    '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
];

pub fn is_escapable(c: char) -> bool {
    ESCAPABLE.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_ascii_punctuation() {
        assert!(is_escapable('*'));
        assert!(is_escapable('#'));
    }

    #[test]
    fn rejects_alphanumeric() {
        assert!(!is_escapable('a'));
        assert!(!is_escapable('1'));
    }
}
