//! Account ledger
//!
//! This module provides the Ledger, which owns the single account and drives
//! the evaluate-then-apply cycle of every transaction.
//!
//! The ledger enforces the account lifecycle:
//! - Transactions and deny list updates require an initialized account
//! - The account can only be created once
//! - A refused transaction leaves the account and every rule untouched

use crate::core::chain::RuleChain;
use crate::core::rules::{default_chain, RuleConfig};
use crate::core::traits::Authorizer;
use crate::types::{Account, AuthorizerError, Operation, Outcome, Transaction, Violation};
use std::collections::BTreeSet;
use tracing::debug;

/// Owner of the account state and of the authorizer guarding it
///
/// Generic over the [`Authorizer`] so the rule set can be swapped in tests;
/// production code uses the default [`RuleChain`].
#[derive(Debug)]
pub struct Ledger<A: Authorizer = RuleChain> {
    account: Option<Account>,
    authorizer: A,
}

impl Ledger<RuleChain> {
    /// Create an uninitialized ledger guarded by the default rule chain
    pub fn new() -> Self {
        Ledger::with_config(&RuleConfig::default())
    }

    /// Create an uninitialized ledger with a tuned default rule chain
    pub fn with_config(config: &RuleConfig) -> Self {
        Ledger::with_authorizer(default_chain(config))
    }
}

impl Default for Ledger<RuleChain> {
    fn default() -> Self {
        Ledger::new()
    }
}

impl<A: Authorizer> Ledger<A> {
    /// Create an uninitialized ledger guarded by `authorizer`
    pub fn with_authorizer(authorizer: A) -> Self {
        Ledger {
            account: None,
            authorizer,
        }
    }

    /// Current account state, if initialized
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn authorizer(&self) -> &A {
        &self.authorizer
    }

    pub fn is_initialized(&self) -> bool {
        self.account.is_some()
    }

    /// Process a single decoded operation
    ///
    /// Business refusals are reported as violations inside the returned
    /// [`Outcome`]. An `Err` means the input stream itself is broken and
    /// processing should stop.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A transaction is older than one already accepted
    /// - Deducting the amount overflows the available limit
    pub fn process(&mut self, operation: Operation) -> Result<Outcome, AuthorizerError> {
        match operation {
            Operation::CreateAccount(account) => Ok(self.create_account(account)),
            Operation::PerformTransaction(transaction) => self.perform_transaction(transaction),
            Operation::SetDenyList(merchants) => Ok(self.set_deny_list(merchants)),
        }
    }

    /// Initialize the account
    ///
    /// A repeated creation is refused with `account-already-initialized` and
    /// reports the existing state.
    pub fn create_account(&mut self, account: Account) -> Outcome {
        if let Some(current) = &self.account {
            debug!("account already initialized");
            return Outcome::rejected(
                Some(current.clone()),
                vec![Violation::account_already_initialized()],
            );
        }

        debug!(
            active_card = account.active_card,
            available_limit = account.available_limit,
            "account initialized"
        );
        self.account = Some(account.clone());
        Outcome::accepted(account)
    }

    /// Authorize a transaction and apply it if no rule objects
    ///
    /// The available limit and every rule's state change together, or not at
    /// all.
    pub fn perform_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<Outcome, AuthorizerError> {
        let Some(account) = self.account.as_mut() else {
            return Ok(Outcome::rejected(
                None,
                vec![Violation::account_not_initialized()],
            ));
        };

        let authorization = self.authorizer.authorize(account, &transaction)?;
        if !authorization.is_authorized() {
            debug!(
                merchant = %transaction.merchant,
                amount = transaction.amount,
                violations = authorization.violations.len(),
                "transaction refused"
            );
            return Ok(Outcome::rejected(
                Some(account.clone()),
                authorization.violations,
            ));
        }

        let available_limit = account
            .available_limit
            .checked_sub(transaction.amount)
            .ok_or_else(|| AuthorizerError::arithmetic_overflow("transaction"))?;

        self.authorizer.commit(authorization.plan)?;
        account.available_limit = available_limit;

        debug!(
            merchant = %transaction.merchant,
            amount = transaction.amount,
            available_limit,
            "transaction accepted"
        );
        Ok(Outcome::accepted(account.clone()))
    }

    /// Replace the account deny list
    pub fn set_deny_list(&mut self, merchants: BTreeSet<String>) -> Outcome {
        let Some(account) = self.account.as_mut() else {
            return Outcome::rejected(None, vec![Violation::account_not_initialized()]);
        };

        debug!(merchants = merchants.len(), "deny list replaced");
        account.deny_list = merchants;
        Outcome::accepted(account.clone())
    }
}
