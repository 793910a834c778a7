//! Transaction-related types for the authorizer
//!
//! This module defines the authorization request for a transaction and the
//! structural key used to group "the same" transaction for duplicate detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instant at which a transaction was attempted
pub type Timestamp = DateTime<Utc>;

/// Authorization request for a transaction
///
/// Transactions are presented to the ledger one at a time, in the order they
/// were received, with non-decreasing timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Merchant the transaction is being made with
    pub merchant: String,

    /// Units of currency (minor units) the transaction would consume
    pub amount: i64,

    /// Exact time the transaction was attempted (RFC 3339)
    #[serde(alias = "timestamp")]
    pub time: Timestamp,
}

impl Transaction {
    /// Create a new transaction request
    pub fn new(merchant: impl Into<String>, amount: i64, time: Timestamp) -> Self {
        Transaction {
            merchant: merchant.into(),
            amount,
            time,
        }
    }

    /// Key grouping transactions considered equal for duplicate detection
    pub fn key(&self) -> TransactionKey {
        TransactionKey {
            merchant: self.merchant.clone(),
            amount: self.amount,
        }
    }
}

/// Structural identity of a transaction, ignoring its timestamp
///
/// Two transactions are "the same" iff merchant and amount are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionKey {
    pub merchant: String,
    pub amount: i64,
}
