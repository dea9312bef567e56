// Thin re-export module: implementation is in `blockchain/core.rs`, split
// into the block aggregate, Merkle reduction and construction stages.

pub mod core;
pub use self::core::*;
