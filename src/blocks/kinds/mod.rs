//! Block-specific recognizers that own their syntax delimiters.
//!
//! Each module below is the single place that knows a construct's literal
//! syntax (the `>` prefix, the fence characters, the `#` run, ...);
//! [`crate::blocks::DocumentParser`] calls into these helpers and never
//! hardcodes a delimiter itself.

pub mod atx_header;
pub mod block_quote;
pub mod code_fence;
pub mod horizontal_rule;
pub mod html_block;
pub mod indented_code;
pub mod list_marker;
pub mod setext_header;

pub use atx_header::AtxHeader;
pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use horizontal_rule::HorizontalRule;
pub use html_block::HtmlBlock;
pub use indented_code::IndentedCode;
pub use list_marker::ListMarker;
pub use setext_header::SetextHeader;
