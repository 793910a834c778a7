//! Account-related types for the authorizer
//!
//! This module defines the Account structure, which doubles as the account
//! creation payload and as the account snapshot reported after every operation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// State of the single account managed by the ledger
///
/// The same shape is used for the initial state received on account creation
/// and for the state written back on every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Whether the account card is active
    ///
    /// An inactive card does not authorize any transaction.
    #[serde(rename = "active-card")]
    pub active_card: bool,

    /// Units of currency (minor units) the account still has
    ///
    /// Only ever decreased by the amount of an accepted transaction.
    #[serde(rename = "available-limit")]
    pub available_limit: i64,

    /// Merchants the account refuses to transact with
    ///
    /// Optional on input and omitted from output while empty.
    #[serde(
        rename = "deny-list",
        default,
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub deny_list: BTreeSet<String>,
}

impl Account {
    /// Create an account with an empty deny list
    pub fn new(active_card: bool, available_limit: i64) -> Self {
        Account {
            active_card,
            available_limit,
            deny_list: BTreeSet::new(),
        }
    }

    /// Whether transactions to `merchant` are refused by this account
    pub fn denies(&self, merchant: &str) -> bool {
        self.deny_list.contains(merchant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::without_deny_list(
        r#"{"active-card":true,"available-limit":100}"#,
        Account::new(true, 100)
    )]
    #[case::with_deny_list(
        r#"{"active-card":false,"available-limit":0,"deny-list":["Uber","Amazon"]}"#,
        Account {
            active_card: false,
            available_limit: 0,
            deny_list: ["Amazon".to_string(), "Uber".to_string()].into_iter().collect(),
        }
    )]
    fn test_account_deserialization(#[case] json: &str, #[case] expected: Account) {
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account, expected);
    }

    #[test]
    fn test_empty_deny_list_is_omitted() {
        let json = serde_json::to_string(&Account::new(true, 80)).unwrap();
        assert_eq!(json, r#"{"active-card":true,"available-limit":80}"#);
    }

    #[test]
    fn test_missing_limit_is_rejected() {
        let result = serde_json::from_str::<Account>(r#"{"active-card":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_denies() {
        let mut account = Account::new(true, 100);
        assert!(!account.denies("Amazon"));

        account.deny_list.insert("Amazon".to_string());
        assert!(account.denies("Amazon"));
        assert!(!account.denies("amazon"));
    }
}
