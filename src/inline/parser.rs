//! Inline parsing: the top-level dispatch loop and the per-construct
//! handlers it drives (§4.4, §4.5).

use crate::inline::cursor::Cursor;
use crate::inline::emphasis::scan_delims;
use crate::inline::escape::is_escapable;
use crate::inline::kinds::{Autolink, CodeSpan, Entity};
use crate::inline::types::Inline;

/// Stateless entry point for decomposing a finalized leaf's text into
/// inline nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineParser;

impl InlineParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses `subject` into a sequence of inline nodes, repeatedly
    /// invoking the dispatch loop until the cursor reaches EOF.
    pub fn parse(&self, subject: &str) -> Vec<Inline> {
        let mut state = State::new(subject);
        while !state.cursor.is_eof() {
            state.parse_inline();
        }
        state.out
    }

    /// Reference-definition extraction at the head of a paragraph's
    /// content. Not implemented in this core; always reports no match so
    /// callers keep the content as-is.
    pub fn parse_reference(&self, _content: &mut String) -> bool {
        false
    }
}

fn is_special(c: char) -> bool {
    matches!(c, '\n' | '\\' | '`' | '*' | '_' | '[' | '!' | '<' | '&')
}

struct State<'a> {
    cursor: Cursor<'a>,
    out: Vec<Inline>,
}

impl<'a> State<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            cursor: Cursor::new(text),
            out: Vec::new(),
        }
    }

    /// Appends `s` as its own `Str` node.
    ///
    /// Deliberately never merges with a preceding `Str`: the provisional
    /// delimiter marker pushed by [`Self::parse_emphasis`] is itself a
    /// `Str`, and merging into it would make `out.split_off(open_idx + 1)`
    /// splice the wrong content when a closer is later found.
    fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.out.push(Inline::Str(s.to_string()));
    }

    fn parse_inline(&mut self) {
        match self.cursor.peek() {
            None => {}
            Some('\n') => self.parse_newline(),
            Some('\\') => self.parse_backslash_escape(),
            Some('`') => self.parse_code_span(),
            Some(c) if c == '*' || c == '_' => self.parse_emphasis(c),
            Some('<') => {
                if !self.parse_autolink() {
                    self.push_str("<");
                    self.cursor.advance_char();
                }
            }
            Some('&') => {
                if !self.parse_entity() {
                    self.push_str("&");
                    self.cursor.advance_char();
                }
            }
            Some(_) => self.parse_string_run(),
        }
    }

    /// Consumes a maximal run of characters that do not open a special
    /// construct and appends it as a single `Str`.
    fn parse_string_run(&mut self) {
        let start = self.cursor.pos();
        while let Some(c) = self.cursor.peek() {
            if is_special(c) {
                break;
            }
            self.cursor.advance_char();
        }
        let run = &self.cursor.source()[start..self.cursor.pos()];
        if run.is_empty() {
            // The current character is special but had no dedicated
            // handler reach this point (e.g. `[` / `!`, whose real
            // constructs are out of scope here); treat it literally.
            if let Some(c) = self.cursor.advance_char() {
                let mut buf = [0u8; 4];
                self.push_str(c.encode_utf8(&mut buf));
            }
            return;
        }
        self.push_str(run);
    }

    fn parse_newline(&mut self) {
        self.cursor.advance_char();
        let mut stripped = 0usize;
        if let Some(Inline::Str(s)) = self.out.last_mut() {
            let trimmed_len = s.trim_end_matches(' ').len();
            stripped = s.len() - trimmed_len;
            s.truncate(trimmed_len);
        }
        if let Some(Inline::Str(s)) = self.out.last() {
            if s.is_empty() {
                self.out.pop();
            }
        }
        if stripped >= 2 {
            self.out.push(Inline::Hardbreak);
        } else {
            self.out.push(Inline::Softbreak);
        }
    }

    fn parse_backslash_escape(&mut self) {
        self.cursor.advance_char();
        match self.cursor.peek() {
            Some('\n') => {
                self.cursor.advance_char();
                self.out.push(Inline::Hardbreak);
            }
            Some(c) if is_escapable(c) => {
                self.cursor.advance_char();
                let mut buf = [0u8; 4];
                self.push_str(c.encode_utf8(&mut buf));
            }
            _ => self.push_str("\\"),
        }
    }

    fn parse_code_span(&mut self) {
        let start = self.cursor.pos();
        match CodeSpan::try_match(&mut self.cursor) {
            Some(content) => self.out.push(Inline::Code(content)),
            None => {
                let run_len = self.cursor.run_length('`');
                let literal = self.cursor.source()[start..start + run_len].to_string();
                self.cursor.advance_bytes(run_len);
                self.push_str(&literal);
            }
        }
    }

    fn parse_autolink(&mut self) -> bool {
        let start = self.cursor.pos();
        let text = self.cursor.source();
        let Some(close_rel) = text[start + 1..].find('>') else {
            return false;
        };
        let content_end = start + 1 + close_rel;
        let content = &text[start + 1..content_end];
        if content.is_empty() || content.contains('<') || content.contains(char::is_whitespace) {
            return false;
        }
        match Autolink::recognize(content) {
            Some(inline) => {
                self.out.push(inline);
                self.cursor.set_pos(content_end + 1);
                true
            }
            None => false,
        }
    }

    fn parse_entity(&mut self) -> bool {
        match Entity::try_match(self.cursor.remaining()) {
            Some(matched) => {
                let len = matched.len();
                self.out.push(Inline::Entity(matched.to_string()));
                self.cursor.advance_bytes(len);
                true
            }
            None => false,
        }
    }

    fn parse_emphasis(&mut self, ch: char) {
        let (count, can_open, _) = scan_delims(&self.cursor, ch);
        let start = self.cursor.pos();
        self.cursor.advance_bytes(count);
        let run = self.cursor.source()[start..start + count].to_string();
        let open_idx = self.out.len();
        self.out.push(Inline::Str(run));

        if !can_open || count == 0 {
            return;
        }

        match count.min(3) {
            1 => self.close_single(ch, open_idx),
            2 => self.close_double(ch, open_idx),
            3 => self.close_triple(ch, open_idx),
            _ => unreachable!(),
        }
    }

    fn close_single(&mut self, ch: char, open_idx: usize) {
        loop {
            if self.cursor.is_eof() {
                return;
            }
            let (close_count, _, can_close) = scan_delims(&self.cursor, ch);
            if close_count >= 1 && can_close {
                self.cursor.advance_bytes(1);
                let between = self.out.split_off(open_idx + 1);
                self.out[open_idx] = Inline::Emphasis(between);
                return;
            }
            let before = self.out.len();
            self.parse_inline();
            if self.out.len() == before {
                return;
            }
        }
    }

    fn close_double(&mut self, ch: char, open_idx: usize) {
        loop {
            if self.cursor.is_eof() {
                return;
            }
            let (close_count, _, can_close) = scan_delims(&self.cursor, ch);
            if close_count >= 2 && can_close {
                self.cursor.advance_bytes(2);
                let between = self.out.split_off(open_idx + 1);
                self.out[open_idx] = Inline::Strong(between);
                return;
            }
            let before = self.out.len();
            self.parse_inline();
            if self.out.len() == before {
                return;
            }
        }
    }

    fn close_triple(&mut self, ch: char, open_idx: usize) {
        let mut first_close: Option<(usize, usize)> = None;
        loop {
            if self.cursor.is_eof() {
                return;
            }
            let (close_count, _, can_close) = scan_delims(&self.cursor, ch);
            let normalized = if close_count == 3 { 1 } else { close_count };
            let is_new_closer = (1..=3).contains(&close_count)
                && can_close
                && first_close.map_or(true, |(_, n)| normalized != n);

            if is_new_closer {
                if let Some((marker_pos, first_count)) = first_close {
                    self.cursor.advance_bytes(close_count);
                    let shallow = self.out.split_off(marker_pos + 1);
                    self.out.truncate(marker_pos);
                    let deep = self.out.split_off(open_idx + 1);
                    let inner = if first_count == 1 {
                        Inline::Emphasis(deep)
                    } else {
                        Inline::Strong(deep)
                    };
                    let mut subinlines = vec![inner];
                    subinlines.extend(shallow);
                    let outer = if first_count == 1 {
                        Inline::Strong(subinlines)
                    } else {
                        Inline::Emphasis(subinlines)
                    };
                    self.out[open_idx] = outer;
                    return;
                } else {
                    let marker_pos = self.out.len();
                    let start = self.cursor.pos();
                    self.cursor.advance_bytes(close_count);
                    let literal = self.cursor.source()[start..start + close_count].to_string();
                    self.out.push(Inline::Str(literal));
                    first_close = Some((marker_pos, normalized));
                    continue;
                }
            }

            let before = self.out.len();
            self.parse_inline();
            if self.out.len() == before {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_string() {
        let parser = InlineParser::new();
        assert_eq!(parser.parse("hello"), vec![Inline::Str("hello".to_string())]);
    }

    #[test]
    fn parses_softbreak() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse("a\nb"),
            vec![
                Inline::Str("a".to_string()),
                Inline::Softbreak,
                Inline::Str("b".to_string())
            ]
        );
    }

    #[test]
    fn parses_hardbreak_from_trailing_spaces() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse("a  \nb"),
            vec![
                Inline::Str("a".to_string()),
                Inline::Hardbreak,
                Inline::Str("b".to_string())
            ]
        );
    }

    #[test]
    fn parses_backslash_escape() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse(r"\*foo\*"),
            vec![
                Inline::Str("*".to_string()),
                Inline::Str("foo".to_string()),
                Inline::Str("*".to_string()),
            ]
        );
    }

    #[test]
    fn parses_backslash_hardbreak() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse("a\\\nb"),
            vec![
                Inline::Str("a".to_string()),
                Inline::Hardbreak,
                Inline::Str("b".to_string())
            ]
        );
    }

    #[test]
    fn parses_code_span() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse("`foo`"),
            vec![Inline::Code("foo".to_string())]
        );
    }

    #[test]
    fn parses_simple_emphasis() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse("*foo*"),
            vec![Inline::Emphasis(vec![Inline::Str("foo".to_string())])]
        );
    }

    #[test]
    fn parses_simple_strong() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse("**foo**"),
            vec![Inline::Strong(vec![Inline::Str("foo".to_string())])]
        );
    }

    #[test]
    fn parses_nested_strong_inside_emphasis() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse("*foo **bar** baz*"),
            vec![Inline::Emphasis(vec![
                Inline::Str("foo ".to_string()),
                Inline::Strong(vec![Inline::Str("bar".to_string())]),
                Inline::Str(" baz".to_string()),
            ])]
        );
    }

    #[test]
    fn leaves_unclosed_emphasis_literal() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse("*foo"),
            vec![
                Inline::Str("*".to_string()),
                Inline::Str("foo".to_string())
            ]
        );
    }

    #[test]
    fn parses_entity() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse("&amp;"),
            vec![Inline::Entity("&amp;".to_string())]
        );
    }

    #[test]
    fn parses_email_autolink() {
        let parser = InlineParser::new();
        let result = parser.parse("<foo@example.com>");
        assert_eq!(result.len(), 1);
        assert!(matches!(result[0], Inline::Link { .. }));
    }

    #[test]
    fn falls_back_to_literal_angle_bracket() {
        let parser = InlineParser::new();
        assert_eq!(
            parser.parse("<not a link"),
            vec![
                Inline::Str("<".to_string()),
                Inline::Str("not a link".to_string())
            ]
        );
    }
}
