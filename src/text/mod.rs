//! Input normalization shared by the block phase.
//!
//! ## Modules
//!
//! - [`normalize`]: line-ending normalization, line splitting, and tab
//!   expansion (§4.1).

pub mod normalize;
