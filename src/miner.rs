//! Proof-of-work sealing
//!
//! The header is the decimal index, the previous hash, the Merkle root and the
//! decimal creation time, concatenated. Candidates are `hash(header ++ nonce)`
//! for nonces counting up from zero.

use crate::crypto::{hash_failure, HashPrimitive};
use crate::error::{ChainError, Result};
use crate::events::EventSink;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound (exclusive) on the nonces tried before giving up.
pub const MAX_ATTEMPTS: u64 = 1_000_000;

/// Required prefix of a sealed block hash in strict mode.
pub const TARGET_DIFFICULTY: &str = "00";

const OPERATION: &str = "miner::seal";

/// How candidate hashes are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SealingMode {
    /// Only a hash starting with [`TARGET_DIFFICULTY`] seals the block.
    #[default]
    Strict,
    /// The first candidate (nonce 0) seals the block.
    Relaxed,
}

impl fmt::Display for SealingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SealingMode::Strict => write!(f, "strict"),
            SealingMode::Relaxed => write!(f, "relaxed"),
        }
    }
}

impl FromStr for SealingMode {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(SealingMode::Strict),
            "relaxed" => Ok(SealingMode::Relaxed),
            other => Err(ChainError::Config(format!(
                "Unknown sealing mode '{}', expected 'strict' or 'relaxed'",
                other
            ))),
        }
    }
}

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seal {
    pub nonce: u64,
    pub hash: String,
}

pub fn block_header(index: u32, previous_hash: &str, merkle_root: &str, creation_time: i64) -> String {
    format!("{}{}{}{}", index, previous_hash, merkle_root, creation_time)
}

pub fn meets_difficulty(hash: &str) -> bool {
    hash.starts_with(TARGET_DIFFICULTY)
}

/// Search for a nonce sealing `header`.
///
/// Strict mode tries every nonce below [`MAX_ATTEMPTS`] and fails with
/// [`ChainError::BlockHashCalculationFailure`] if none qualifies. The search
/// is never retried here; callers change the header and call again.
pub fn seal(header: &str, mode: SealingMode, hasher: &dyn HashPrimitive, events: &dyn EventSink) -> Result<Seal> {
    for nonce in 0..MAX_ATTEMPTS {
        let candidate = hasher
            .compute(&format!("{}{}", header, nonce))
            .map_err(|e| hash_failure(e, OPERATION, events))?;

        let accepted = match mode {
            SealingMode::Relaxed => true,
            SealingMode::Strict => meets_difficulty(&candidate),
        };
        if accepted {
            tracing::debug!(nonce, hash = %candidate, "block sealed");
            return Ok(Seal { nonce, hash: candidate });
        }
    }

    let message = format!(
        "Block hash calculation failed for target difficulty: {}",
        TARGET_DIFFICULTY
    );
    events.error(OPERATION, &message);
    Err(ChainError::BlockHashCalculationFailure(message))
}
