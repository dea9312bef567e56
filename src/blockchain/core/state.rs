//! Intermediate stages of block construction.
//!
//! Each stage consumes the previous one, so a block that failed half way has
//! nothing left to observe.

use super::merkle::merkle_root;
use crate::error::{ChainError, Result};
use crate::events::EventSink;
use crate::crypto::HashPrimitive;
use crate::transaction::{validate_and_store, Transaction, TxCategory};

const OPERATION: &str = "block::group_transaction_hashes";

/// Transactions that authenticated, at least one in total.
#[derive(Debug)]
pub(crate) struct Validated {
    pub(crate) coinbases: Vec<Transaction>,
    pub(crate) payloads: Vec<Transaction>,
}

impl Validated {
    /// Validate coinbases first, then payloads.
    pub(crate) fn new(
        coinbases: Option<Vec<Transaction>>,
        payloads: Option<Vec<Transaction>>,
        hasher: &dyn HashPrimitive,
        events: &dyn EventSink,
    ) -> Result<Self> {
        let coinbases = match coinbases {
            Some(batch) => validate_and_store(TxCategory::Coinbase, batch, hasher, events)?,
            None => Vec::new(),
        };
        let payloads = match payloads {
            Some(batch) => validate_and_store(TxCategory::Payload, batch, hasher, events)?,
            None => Vec::new(),
        };

        if coinbases.is_empty() && payloads.is_empty() {
            let message = "No valid transaction(s) found to store.";
            events.error(OPERATION, message);
            return Err(ChainError::TransactionConsistency(message.to_string()));
        }

        Ok(Validated { coinbases, payloads })
    }

    /// Hashes of all accepted transactions, coinbases before payloads.
    pub(crate) fn transaction_hashes(&self, hasher: &dyn HashPrimitive) -> Result<Vec<String>> {
        self.coinbases
            .iter()
            .chain(self.payloads.iter())
            .map(|tx| tx.hash(hasher).map(str::to_string))
            .collect()
    }

    pub(crate) fn into_merkle(self, hasher: &dyn HashPrimitive, events: &dyn EventSink) -> Result<MerkleComputed> {
        let hashes = self.transaction_hashes(hasher)?;
        let merkle_root = merkle_root(&hashes, hasher, events)?;
        Ok(MerkleComputed {
            validated: self,
            merkle_root,
        })
    }
}

/// Accepted transactions together with their Merkle root.
#[derive(Debug)]
pub(crate) struct MerkleComputed {
    pub(crate) validated: Validated,
    pub(crate) merkle_root: String,
}
