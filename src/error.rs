//! Crate-wide error types.
//!
//! The block and inline phases are both total over their input — see
//! [`crate::parse`] — so the only error this crate exposes models the one
//! documented defensive failure mode of the block phase: a line targeted at
//! a container that has already been finalized.

/// Defensive-invariant violation raised by [`crate::blocks::DocumentParser::incorporate_line`].
///
/// Never expected from [`crate::parse`]; the parser always targets the
/// current tip, which is open by construction. This exists so that a
/// hand-built [`crate::blocks::DocumentParser`] driven line-by-line (the
/// streaming surface in §6 of the design) fails loudly instead of silently
/// corrupting the tree if a caller calls `incorporate_line` after
/// `finish`.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("line {line_number}: attempted to append to closed container ({container_type})")]
pub struct BlockError {
    pub line_number: usize,
    pub container_type: &'static str,
}
