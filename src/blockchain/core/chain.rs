use super::state::Validated;
use crate::config::Config;
use crate::crypto::{HashPrimitive, Sha256Hasher};
use crate::error::ChainError;
use crate::events::{EventSink, TracingSink};
use crate::miner::{block_header, seal, SealingMode};
use crate::transaction::Transaction;
use serde::Serialize;

/// Collaborators used while constructing a block.
///
/// Nothing global is consulted during construction; everything the pipeline
/// hashes or reports goes through this context.
pub struct BlockContext {
    hasher: Box<dyn HashPrimitive>,
    events: Box<dyn EventSink>,
    mode: SealingMode,
}

impl BlockContext {
    pub fn new(hasher: impl HashPrimitive + 'static, events: impl EventSink + 'static, mode: SealingMode) -> Self {
        BlockContext {
            hasher: Box::new(hasher),
            events: Box::new(events),
            mode,
        }
    }

    /// SHA-256 and tracing, with the sealing mode taken from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Sha256Hasher, TracingSink, config.sealing.mode)
    }

    pub fn with_mode(mut self, mode: SealingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn hasher(&self) -> &dyn HashPrimitive {
        self.hasher.as_ref()
    }

    pub fn events(&self) -> &dyn EventSink {
        self.events.as_ref()
    }

    pub fn mode(&self) -> SealingMode {
        self.mode
    }
}

impl Default for BlockContext {
    fn default() -> Self {
        Self::new(Sha256Hasher, TracingSink, SealingMode::Strict)
    }
}

/// A sealed block. Immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct Block {
    index: u32,
    previous_hash: String,
    creation_time: i64,
    nonce: u64,
    merkle_root: String,
    hash: String,
    coinbases: Option<Vec<Transaction>>,
    payloads: Option<Vec<Transaction>>,
}

impl Block {
    /// Validate, aggregate and seal the given transactions into a block
    /// created now.
    pub fn new(
        index: u32,
        previous_hash: impl Into<String>,
        coinbases: Option<Vec<Transaction>>,
        payloads: Option<Vec<Transaction>>,
        ctx: &BlockContext,
    ) -> Result<Self, ChainError> {
        let creation_time = chrono::Utc::now().timestamp();
        Self::with_creation_time(index, previous_hash, creation_time, coinbases, payloads, ctx)
    }

    /// Same as [`Block::new`] with an explicit creation time in unix seconds.
    ///
    /// A different creation time changes the header, which is how a caller
    /// retries after a strict search ran out of nonces.
    pub fn with_creation_time(
        index: u32,
        previous_hash: impl Into<String>,
        creation_time: i64,
        coinbases: Option<Vec<Transaction>>,
        payloads: Option<Vec<Transaction>>,
        ctx: &BlockContext,
    ) -> Result<Self, ChainError> {
        let previous_hash = previous_hash.into();
        let hasher = ctx.hasher();
        let events = ctx.events();

        let merkle = Validated::new(coinbases, payloads, hasher, events)?.into_merkle(hasher, events)?;

        let header = block_header(index, &previous_hash, &merkle.merkle_root, creation_time);
        let sealed = seal(&header, ctx.mode(), hasher, events)?;

        let Validated { coinbases, payloads } = merkle.validated;
        Ok(Block {
            index,
            previous_hash,
            creation_time,
            nonce: sealed.nonce,
            merkle_root: merkle.merkle_root,
            hash: sealed.hash,
            coinbases: (!coinbases.is_empty()).then_some(coinbases),
            payloads: (!payloads.is_empty()).then_some(payloads),
        })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn merkle_root(&self) -> &str {
        &self.merkle_root
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Creation time in unix seconds
    pub fn creation_time(&self) -> i64 {
        self.creation_time
    }

    /// Accepted coinbases; `None` when none were accepted.
    pub fn coinbases(&self) -> Option<&[Transaction]> {
        self.coinbases.as_deref()
    }

    /// Accepted payloads; `None` when none were accepted.
    pub fn payloads(&self) -> Option<&[Transaction]> {
        self.payloads.as_deref()
    }

    /// Number of accepted transactions across both lists.
    pub fn transaction_count(&self) -> usize {
        self.coinbases().map_or(0, <[_]>::len) + self.payloads().map_or(0, <[_]>::len)
    }
}
