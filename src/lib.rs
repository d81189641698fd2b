//! # CommonMark parsing core
//!
//! A two-phase Markdown parser: a line-oriented **block** phase builds a
//! tree of containers and leaves, then an **inline** phase decomposes each
//! leaf's accumulated text into emphasis, code spans, links, and friends.
//!
//! ## Architecture
//!
//! ### 1. Two-Phase Parsing
//! - **Block phase**: [`blocks::DocumentParser`] consumes the document one
//!   line at a time, walking the open-container chain (the "tip chain"),
//!   opening new containers, and appending unconsumed text to the deepest
//!   accepting block.
//! - **Inline phase**: [`inline::InlineParser`] walks the finished tree and
//!   replaces each inline-capable leaf's `string_content` with a sequence of
//!   [`Inline`] nodes.
//!
//! ### 2. Arena-Based Tree
//! - The tree lives in one `Vec<Block>` per parse call, addressed by
//!   [`blocks::BlockId`] (a plain arena index).
//! - `parent` and `children` are `BlockId`s, not boxed nodes or
//!   `Rc<RefCell<_>>` — mutation goes through `&mut Vec<Block>` indexing,
//!   so the borrow checker verifies tree edits statically.
//!
//! ### 3. Knowledge Ownership
//! - Each block/inline construct's recognition logic and delimiter
//!   constants live in its own module under `blocks::kinds` or
//!   `inline::kinds` (fence characters in [`blocks::kinds::code_fence`],
//!   the escapable punctuation set in [`inline::escape`], and so on).
//!   Dispatch code in [`blocks::DocumentParser`] and [`inline::parser`] calls
//!   these helpers; it never hardcodes a delimiter itself.
//!
//! ### 4. Total Parser
//! - Every input string produces a tree; there are no user-visible parse
//!   errors. The only fallible operation, [`blocks::DocumentParser::incorporate_line`],
//!   can only fail on the defensive invariant described in
//!   [`BlockError`] — never on data reachable through [`parse`].
//!
//! ## Usage
//!
//! ```
//! use commonmark_core::parse;
//!
//! let doc = parse("# Title\n\nSome *emphasis* and `code`.\n");
//! assert_eq!(doc.root().children.len(), 2);
//! ```

pub mod blocks;
pub mod error;
pub mod inline;
pub mod text;

pub use blocks::{Block, BlockId, BlockType, Document, DocumentParser, ListData, ListType};
pub use error::BlockError;
pub use inline::{Inline, InlineParser};

/// Parses a complete Markdown document into a block tree with inline
/// content already resolved.
///
/// This is the full pipeline: input normalization, the block phase, and
/// the inline phase. It never fails — [`DocumentParser::incorporate_line`]
/// can only return [`BlockError`] through a defensive invariant that valid
/// input (anything reachable from this function) never triggers.
///
/// The arena and its root travel together in the returned [`Document`];
/// a bare [`Block`] would carry `BlockId`s with nothing to resolve them
/// against.
pub fn parse(markdown: &str) -> Document {
    let lines = text::normalize::normalize_and_split(markdown);

    let mut parser = DocumentParser::new();
    for (line_number, line) in lines.iter().enumerate() {
        parser
            .incorporate_line(line, line_number + 1)
            .expect("incorporate_line defensive invariant violated on parser-generated input");
    }
    parser.finish()
}
