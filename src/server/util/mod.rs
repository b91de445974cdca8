//! Small helpers shared across layers.

pub mod code;
pub mod parse;
pub mod slug;
