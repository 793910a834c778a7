//! Operations accepted by the ledger and the outcome it reports for each

use super::account::Account;
use super::transaction::Transaction;
use super::violation::{Violation, ViolationCode};
use std::collections::BTreeSet;

/// A single decoded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Initialize the account with the given state
    CreateAccount(Account),
    /// Authorize and, if accepted, apply a transaction
    PerformTransaction(Transaction),
    /// Replace the account deny list
    SetDenyList(BTreeSet<String>),
}

/// Account state and violations resulting from one operation
///
/// `account` is `None` only when no account exists yet. On rejection it holds
/// the unchanged state; on acceptance, the updated one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub account: Option<Account>,
    pub violations: Vec<Violation>,
}

impl Outcome {
    /// Outcome of an operation that went through
    pub fn accepted(account: Account) -> Self {
        Outcome {
            account: Some(account),
            violations: Vec::new(),
        }
    }

    /// Outcome of an operation refused with the given violations
    pub fn rejected(account: Option<Account>, violations: Vec<Violation>) -> Self {
        Outcome {
            account,
            violations,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation codes in the order they were raised
    pub fn codes(&self) -> Vec<ViolationCode> {
        self.violations.iter().map(|v| v.code).collect()
    }
}
