// core.rs splits block construction into submodules: the block aggregate,
// the Merkle reduction and the intermediate construction stages.
pub mod chain;
pub mod merkle;
mod state;

pub use chain::*;
pub use merkle::merkle_root;
