//! Violation types for the authorizer
//!
//! A violation is an expected, recoverable business outcome: the operation is
//! refused with a well-known code and processing continues with the next
//! request. Fatal conditions live in [`crate::types::AuthorizerError`] instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Well-known violation codes reported in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationCode {
    /// A transaction or deny list arrived before any account was created
    AccountNotInitialized,
    /// An account creation arrived after the account already existed
    AccountAlreadyInitialized,
    /// The transaction amount exceeds the available limit
    InsufficientLimit,
    /// The account card is not active
    CardNotActive,
    /// Too many transactions within the frequency window
    HighFrequencySmallInterval,
    /// Same merchant and amount seen within the duplicate window
    DoubleTransaction,
    /// The merchant is on the account deny list
    MerchantDenied,
}

impl ViolationCode {
    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationCode::AccountNotInitialized => "account-not-initialized",
            ViolationCode::AccountAlreadyInitialized => "account-already-initialized",
            ViolationCode::InsufficientLimit => "insufficient-limit",
            ViolationCode::CardNotActive => "card-not-active",
            ViolationCode::HighFrequencySmallInterval => "high-frequency-small-interval",
            ViolationCode::DoubleTransaction => "double-transaction",
            ViolationCode::MerchantDenied => "merchant-denied",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coded business-rule failure
///
/// Displays as its free-form message; the code is what reaches the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Violation {
    /// Well-known code for the caller
    pub code: ViolationCode,
    /// Friendly description of the violation
    pub message: String,
}

impl Violation {
    /// Create a violation with the given code and message
    pub fn new(code: ViolationCode, message: impl Into<String>) -> Self {
        Violation {
            code,
            message: message.into(),
        }
    }

    pub fn account_not_initialized() -> Self {
        Self::new(
            ViolationCode::AccountNotInitialized,
            "Account hasn't been initialized",
        )
    }

    pub fn account_already_initialized() -> Self {
        Self::new(
            ViolationCode::AccountAlreadyInitialized,
            "Account has already been initialized",
        )
    }

    pub fn card_not_active() -> Self {
        Self::new(ViolationCode::CardNotActive, "Account card is not active")
    }

    pub fn insufficient_limit(available: i64, requested: i64) -> Self {
        Self::new(
            ViolationCode::InsufficientLimit,
            format!("Transaction amount {requested} is higher than available limit {available}"),
        )
    }

    pub fn high_frequency_small_interval() -> Self {
        Self::new(
            ViolationCode::HighFrequencySmallInterval,
            "Too many transactions in a small interval",
        )
    }

    pub fn double_transaction(merchant: &str, amount: i64) -> Self {
        Self::new(
            ViolationCode::DoubleTransaction,
            format!("Duplicate transaction of {amount} at {merchant}"),
        )
    }

    pub fn merchant_denied(merchant: &str) -> Self {
        Self::new(
            ViolationCode::MerchantDenied,
            format!("Merchant {merchant} is denied any transaction"),
        )
    }
}
