//! Blockseal - block assembly with transaction authentication and
//! proof-of-work sealing
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core
//! - [`transaction`] - Coinbase/payload records and their validation
//! - [`blockchain`] - Block aggregate and Merkle root computation
//!
//! ## Consensus
//! - [`miner`] - Bounded proof-of-work sealing
//!
//! ## Cryptography
//! - [`crypto`] - Hash primitive (SHA-256)
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`events`] - Warning/error reporting and tracing setup

#![forbid(unsafe_code)]

// ============================================================================
// Core
// ============================================================================
pub mod blockchain;
pub mod transaction;

// ============================================================================
// Consensus
// ============================================================================
pub mod miner;

// ============================================================================
// Cryptography
// ============================================================================
pub mod crypto;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
pub mod events;

pub use blockchain::{Block, BlockContext};
pub use error::{ChainError, Result};
pub use transaction::{Transaction, TxKind};
