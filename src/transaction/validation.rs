/// Authentication of submitted transactions against their reported hashes
use crate::crypto::{hash_failure, HashPrimitive};
use crate::error::Result;
use crate::events::EventSink;
use crate::transaction::types::Transaction;
use std::fmt;

const OPERATION: &str = "transaction::validate_and_store";

/// The two transaction lists a block is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxCategory {
    Coinbase,
    Payload,
}

impl TxCategory {
    fn admits(self, tx: &Transaction) -> bool {
        match self {
            TxCategory::Coinbase => tx.is_coinbase(),
            TxCategory::Payload => tx.is_payload(),
        }
    }
}

impl fmt::Display for TxCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TxCategory::Coinbase => write!(f, "coinbase"),
            TxCategory::Payload => write!(f, "payload"),
        }
    }
}

/// Keep the transactions whose reported hash matches their canonical message.
///
/// Mismatching records, and records submitted under the wrong category, are
/// dropped with a warning. A failure of the hash primitive aborts the whole
/// batch. Accepted transactions keep their input order.
pub fn validate_and_store(
    category: TxCategory,
    transactions: Vec<Transaction>,
    hasher: &dyn HashPrimitive,
    events: &dyn EventSink,
) -> Result<Vec<Transaction>> {
    let mut accepted = Vec::with_capacity(transactions.len());

    for tx in transactions {
        let message = tx.canonical_message();

        if !category.admits(&tx) {
            events.warning(
                OPERATION,
                &format!(
                    "Transaction with message '{}' submitted as {} was dropped",
                    message, category
                ),
            );
            continue;
        }

        let expected_hash = tx
            .hash(hasher)
            .map_err(|e| hash_failure(e, OPERATION, events))?
            .to_string();

        match hasher.is_valid(&message, &expected_hash) {
            Ok(true) => accepted.push(tx),
            Ok(false) => events.warning(
                OPERATION,
                &format!(
                    "Hash inconsistency detected for message '{}', with expected hash: {}",
                    message, expected_hash
                ),
            ),
            Err(e) => return Err(hash_failure(e, OPERATION, events)),
        }
    }

    Ok(accepted)
}
