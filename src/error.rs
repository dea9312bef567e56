//! Error types for block assembly

use thiserror::Error;

/// Fatal errors raised while assembling a block.
///
/// Hash mismatches on individual transactions are not errors: those records
/// are dropped and reported through the event sink instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The hash primitive refused or failed to digest a message.
    #[error("Hash calculation error: {0}")]
    HashCalculation(String),
    /// No transaction survived validation.
    #[error("Transaction consistency error: {0}")]
    TransactionConsistency(String),
    /// Strict sealing ran out of nonces.
    #[error("Block hash calculation failure: {0}")]
    BlockHashCalculationFailure(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::Config(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = ChainError::HashCalculation("Hash calculation failed for message: ".to_string());
        assert_eq!(
            err.to_string(),
            "Hash calculation error: Hash calculation failed for message: "
        );

        let err = ChainError::TransactionConsistency("No valid transaction(s) found to store.".to_string());
        assert!(err.to_string().starts_with("Transaction consistency error"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ChainError = io.into();
        assert_eq!(err, ChainError::Io("missing".to_string()));
    }
}
