//! List marker recognition (§4.6): bullets, ordered markers, and the
//! `padding` computation that determines a list item's continuation
//! indent.

use crate::blocks::kinds::horizontal_rule::HorizontalRule;
use crate::blocks::types::{ListData, ListType};

pub struct ListMarker;

const BULLET_CHARS: [char; 3] = ['*', '+', '-'];

impl ListMarker {
    /// Tries to recognize a list marker at `marker_offset` (already
    /// resolved to the line's first non-space column by the caller).
    /// A horizontal rule at the same position wins over a `-`/`*` bullet.
    pub fn parse(line: &str, marker_offset: usize) -> Option<ListData> {
        if HorizontalRule::matches(line, marker_offset) {
            return None;
        }
        let rest = &line[marker_offset..];
        let mut chars = rest.chars();
        let first = chars.next()?;

        let (list_type, marker_len) = if BULLET_CHARS.contains(&first) {
            (ListType::Bullet(first), 1usize)
        } else if first.is_ascii_digit() {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            let after_digits = &rest[digits.len()..];
            let delimiter = after_digits.chars().next()?;
            if delimiter != '.' && delimiter != ')' {
                return None;
            }
            let start: i64 = digits.parse().ok()?;
            (
                ListType::Ordered { start, delimiter },
                digits.len() + 1,
            )
        } else {
            return None;
        };

        let after_marker = &rest[marker_len..];
        if !after_marker.is_empty() && !after_marker.starts_with(' ') {
            return None;
        }
        let spaces_after_marker = after_marker.chars().take_while(|&c| c == ' ').count();
        let blank_item = after_marker.len() == spaces_after_marker;

        let padding = if spaces_after_marker >= 5 || spaces_after_marker < 1 || blank_item {
            marker_len + 1
        } else {
            marker_len + spaces_after_marker
        };

        Some(ListData {
            list_type,
            marker_offset,
            padding,
        })
    }
}
