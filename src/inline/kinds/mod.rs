//! Inline-specific recognizers that own their syntax delimiters.

pub mod autolink;
pub mod code_span;
pub mod entity;

pub use autolink::Autolink;
pub use code_span::CodeSpan;
pub use entity::Entity;
