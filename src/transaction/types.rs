/// Transaction types for block assembly
use crate::crypto::HashPrimitive;
use crate::error::Result;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize, Serializer};

/// Number of satoshis in one bitcoin
pub const SATOSHIS_PER_BITCOIN: f64 = 1e8;

/// Convert a bitcoin amount to satoshis, truncating toward zero.
/// Negative and NaN amounts saturate to zero.
pub fn bitcoin_to_satoshi(bitcoin_amount: f64) -> u64 {
    (bitcoin_amount * SATOSHIS_PER_BITCOIN) as u64
}

/// Bitcoin amount for display: eight fixed decimals with trailing zeros removed.
pub fn bitcoin_representation(bitcoin_amount: f64) -> String {
    let fixed = format!("{:.8}", bitcoin_amount);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// What a transaction is; a payload additionally names its receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TxKind {
    Coinbase,
    Payload { receiver: String },
}

/// A coinbase or payload transaction.
///
/// All derived fields are computed once at construction. The hash is computed
/// lazily on first request and never changes afterwards. Deserialization
/// rebuilds the derived fields from the stored inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTransaction")]
pub struct Transaction {
    #[serde(flatten)]
    kind: TxKind,
    owner: String,
    bitcoin_amount: f64,
    satoshi_amount: u64,
    bitcoin_representation: String,
    timestamp: DateTime<Utc>,
    unix_timestamp: i64,
    #[serde(serialize_with = "serialize_cached_hash")]
    hash: OnceCell<String>,
}

/// Stored form of a [`Transaction`]: only the inputs and the reported hash.
#[derive(Deserialize)]
struct RawTransaction {
    #[serde(flatten)]
    kind: TxKind,
    owner: String,
    bitcoin_amount: f64,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    hash: Option<String>,
}

impl From<RawTransaction> for Transaction {
    fn from(raw: RawTransaction) -> Self {
        let tx = Transaction::build(raw.kind, raw.owner, raw.bitcoin_amount, raw.timestamp);
        match raw.hash {
            Some(hash) => tx.with_reported_hash(hash),
            None => tx,
        }
    }
}

impl Transaction {
    /// Reward or origin transaction created now.
    pub fn coinbase(owner: impl Into<String>, bitcoin_amount: f64) -> Self {
        Self::coinbase_at(owner, bitcoin_amount, Utc::now())
    }

    pub fn coinbase_at(owner: impl Into<String>, bitcoin_amount: f64, timestamp: DateTime<Utc>) -> Self {
        Self::build(TxKind::Coinbase, owner.into(), bitcoin_amount, timestamp)
    }

    /// Transfer from `owner` to `receiver` created now.
    pub fn payload(owner: impl Into<String>, receiver: impl Into<String>, bitcoin_amount: f64) -> Self {
        Self::payload_at(owner, receiver, bitcoin_amount, Utc::now())
    }

    pub fn payload_at(
        owner: impl Into<String>,
        receiver: impl Into<String>,
        bitcoin_amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let kind = TxKind::Payload {
            receiver: receiver.into(),
        };
        Self::build(kind, owner.into(), bitcoin_amount, timestamp)
    }

    fn build(kind: TxKind, owner: String, bitcoin_amount: f64, timestamp: DateTime<Utc>) -> Self {
        Transaction {
            kind,
            owner,
            bitcoin_amount,
            satoshi_amount: bitcoin_to_satoshi(bitcoin_amount),
            bitcoin_representation: bitcoin_representation(bitcoin_amount),
            unix_timestamp: timestamp.timestamp(),
            timestamp,
            hash: OnceCell::new(),
        }
    }

    /// Attach the hash reported by the transaction's originator.
    ///
    /// Replaces any hash cached so far; validation later checks it against
    /// the canonical message.
    pub fn with_reported_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = OnceCell::from(hash.into());
        self
    }

    pub fn kind(&self) -> &TxKind {
        &self.kind
    }

    pub fn is_coinbase(&self) -> bool {
        matches!(self.kind, TxKind::Coinbase)
    }

    pub fn is_payload(&self) -> bool {
        matches!(self.kind, TxKind::Payload { .. })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Receiver of a payload; `None` for coinbases.
    pub fn receiver(&self) -> Option<&str> {
        match &self.kind {
            TxKind::Coinbase => None,
            TxKind::Payload { receiver } => Some(receiver),
        }
    }

    pub fn bitcoin_amount(&self) -> f64 {
        self.bitcoin_amount
    }

    pub fn satoshi_amount(&self) -> u64 {
        self.satoshi_amount
    }

    pub fn bitcoin_representation(&self) -> &str {
        &self.bitcoin_representation
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn unix_timestamp(&self) -> i64 {
        self.unix_timestamp
    }

    /// Message the hash is computed over: owner, receiver (payloads only),
    /// satoshi amount and unix timestamp, concatenated without separators.
    pub fn canonical_message(&self) -> String {
        match &self.kind {
            TxKind::Coinbase => format!(
                "{}{}{}",
                self.owner, self.satoshi_amount, self.unix_timestamp
            ),
            TxKind::Payload { receiver } => format!(
                "{}{}{}{}",
                self.owner, receiver, self.satoshi_amount, self.unix_timestamp
            ),
        }
    }

    /// Hash of this transaction, computed with `hasher` on first call and
    /// cached for every later call.
    pub fn hash(&self, hasher: &dyn HashPrimitive) -> Result<&str> {
        self.hash
            .get_or_try_init(|| hasher.compute(&self.canonical_message()))
            .map(String::as_str)
    }

    /// Hash if already computed or reported.
    pub fn cached_hash(&self) -> Option<&str> {
        self.hash.get().map(String::as_str)
    }
}

fn serialize_cached_hash<S: Serializer>(cell: &OnceCell<String>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    cell.get().serialize(serializer)
}
