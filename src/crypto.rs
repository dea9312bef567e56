//! Hash primitive used for transaction, Merkle and block hashing

use crate::error::{ChainError, Result};
use crate::events::EventSink;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Deterministic message digest.
///
/// Implementations must fail rather than succeed on degenerate input such as
/// an empty message.
pub trait HashPrimitive {
    fn compute(&self, message: &str) -> Result<String>;

    /// Returns whether `message` digests to `expected_hash`, propagating any
    /// failure of [`HashPrimitive::compute`].
    fn is_valid(&self, message: &str, expected_hash: &str) -> Result<bool> {
        Ok(self.compute(message)? == expected_hash)
    }
}

impl<T: HashPrimitive + ?Sized> HashPrimitive for &T {
    fn compute(&self, message: &str) -> Result<String> {
        (**self).compute(message)
    }
}

impl<T: HashPrimitive + ?Sized> HashPrimitive for Box<T> {
    fn compute(&self, message: &str) -> Result<String> {
        (**self).compute(message)
    }
}

impl<T: HashPrimitive + ?Sized> HashPrimitive for Arc<T> {
    fn compute(&self, message: &str) -> Result<String> {
        (**self).compute(message)
    }
}

/// Report a failure of the hash primitive and turn it into the fatal
/// [`ChainError::HashCalculation`], whatever variant the primitive returned.
pub(crate) fn hash_failure(err: ChainError, operation: &str, events: &dyn EventSink) -> ChainError {
    let message = match err {
        ChainError::HashCalculation(msg) => msg,
        other => other.to_string(),
    };
    events.error(operation, &message);
    ChainError::HashCalculation(message)
}

/// SHA-256 over the UTF-8 bytes of the message, hex encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl HashPrimitive for Sha256Hasher {
    fn compute(&self, message: &str) -> Result<String> {
        if message.is_empty() {
            return Err(ChainError::HashCalculation(format!(
                "Hash calculation failed for message: {}",
                message
            )));
        }
        Ok(hex::encode(Sha256::digest(message.as_bytes())))
    }
}
