//! Merkle root over the accepted transaction hashes.
//!
//! - A single leaf is hashed once; the leaf itself is never the root.
//! - Adjacent leaves are paired left to right and hashed as `left ++ right`.
//! - On odd levels the last entry is carried into the next level unchanged.

use crate::crypto::{hash_failure, HashPrimitive};
use crate::error::{ChainError, Result};
use crate::events::EventSink;

const OPERATION: &str = "merkle::merkle_root";

/// Reduce `leaves` to a single root hash.
pub fn merkle_root(leaves: &[String], hasher: &dyn HashPrimitive, events: &dyn EventSink) -> Result<String> {
    match leaves {
        [] => {
            let message = "Merkle root requested for an empty set of hashes.";
            events.error(OPERATION, message);
            Err(ChainError::TransactionConsistency(message.to_string()))
        }
        [single] => hash(single, hasher, events),
        _ => {
            let mut level = leaves.to_vec();
            while level.len() > 1 {
                let mut pairs = level.chunks_exact(2);
                let mut next = pairs
                    .by_ref()
                    .map(|pair| hash(&format!("{}{}", pair[0], pair[1]), hasher, events))
                    .collect::<Result<Vec<_>>>()?;
                // odd level: the last entry moves up unchanged
                next.extend(pairs.remainder().iter().cloned());
                level = next;
            }
            Ok(level.remove(0))
        }
    }
}

fn hash(message: &str, hasher: &dyn HashPrimitive, events: &dyn EventSink) -> Result<String> {
    hasher
        .compute(message)
        .map_err(|e| hash_failure(e, OPERATION, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Sha256Hasher;
    use crate::events::{EventLevel, RecordingSink};

    fn h(message: &str) -> String {
        Sha256Hasher.compute(message).unwrap()
    }

    fn leaves(n: usize) -> Vec<String> {
        (0..n).map(|i| h(&format!("leaf{}", i))).collect()
    }

    #[test]
    fn test_single_leaf_is_rehashed() {
        let l = leaves(1);
        let root = merkle_root(&l, &Sha256Hasher, &RecordingSink::new()).unwrap();
        assert_eq!(root, h(&l[0]));
        assert_ne!(root, l[0]);
    }

    #[test]
    fn test_two_leaves() {
        let l = leaves(2);
        let root = merkle_root(&l, &Sha256Hasher, &RecordingSink::new()).unwrap();
        assert_eq!(root, h(&format!("{}{}", l[0], l[1])));
    }

    #[test]
    fn test_odd_leaf_is_carried_unchanged() {
        let l = leaves(3);
        let root = merkle_root(&l, &Sha256Hasher, &RecordingSink::new()).unwrap();
        let left = h(&format!("{}{}", l[0], l[1]));
        assert_eq!(root, h(&format!("{}{}", left, l[2])));
    }

    #[test]
    fn test_five_leaves() {
        let l = leaves(5);
        let root = merkle_root(&l, &Sha256Hasher, &RecordingSink::new()).unwrap();

        let ab = h(&format!("{}{}", l[0], l[1]));
        let cd = h(&format!("{}{}", l[2], l[3]));
        let abcd = h(&format!("{}{}", ab, cd));
        assert_eq!(root, h(&format!("{}{}", abcd, l[4])));
    }

    #[test]
    fn test_order_matters() {
        let l = leaves(2);
        let reversed: Vec<String> = l.iter().rev().cloned().collect();
        let sink = RecordingSink::new();
        assert_ne!(
            merkle_root(&l, &Sha256Hasher, &sink).unwrap(),
            merkle_root(&reversed, &Sha256Hasher, &sink).unwrap()
        );
    }

    #[test]
    fn test_empty_leaf_fails_to_hash() {
        let sink = RecordingSink::new();
        let err = merkle_root(&[String::new()], &Sha256Hasher, &sink).unwrap_err();
        assert!(matches!(err, ChainError::HashCalculation(_)));
        assert_eq!(sink.count(EventLevel::Error), 1);
    }

    #[test]
    fn test_any_primitive_error_is_hash_calculation() {
        struct Unavailable;
        impl HashPrimitive for Unavailable {
            fn compute(&self, _message: &str) -> Result<String> {
                Err(ChainError::Io("disk".to_string()))
            }
        }

        let sink = RecordingSink::new();
        let err = merkle_root(&leaves(2), &Unavailable, &sink).unwrap_err();
        assert_eq!(err, ChainError::HashCalculation("IO error: disk".to_string()));
        assert_eq!(sink.count(EventLevel::Error), 1);
    }

    #[test]
    fn test_seven_leaves_carry_twice() {
        let l = leaves(7);
        let root = merkle_root(&l, &Sha256Hasher, &RecordingSink::new()).unwrap();

        let ab = h(&format!("{}{}", l[0], l[1]));
        let cd = h(&format!("{}{}", l[2], l[3]));
        let ef = h(&format!("{}{}", l[4], l[5]));
        let abcd = h(&format!("{}{}", ab, cd));
        let efg = h(&format!("{}{}", ef, l[6]));
        assert_eq!(root, h(&format!("{}{}", abcd, efg)));
    }

    #[test]
    fn test_no_leaves() {
        let sink = RecordingSink::new();
        let err = merkle_root(&[], &Sha256Hasher, &sink).unwrap_err();
        assert!(matches!(err, ChainError::TransactionConsistency(_)));
    }
}
