//! Consensus module - Block headers, proof-of-work targets, and rewards

mod block;
mod target;
mod rewards;

pub use block::*;
pub use target::*;
pub use rewards::*;
