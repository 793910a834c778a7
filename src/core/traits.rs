//! Core traits for authorization rules and the authorizers built from them
//!
//! A [`Rule`] is one independent check. An [`Authorizer`] is what the ledger
//! talks to: it evaluates a transaction as a whole and later commits the
//! deferred effects of an accepted one. The rule chain implements
//! [`Authorizer`] on top of a list of rules; tests can substitute their own.

use crate::core::commit::{Authorization, CommitPlan, Effect, Verdict};
use crate::types::{Account, AuthorizerError, Transaction};
use std::fmt;

/// One unit of transaction validation logic
///
/// The check phase takes `&self`, so no rule can change its state while a
/// transaction is still being evaluated. State only moves in [`apply`], with
/// an effect this same rule produced from an accepted transaction.
///
/// [`apply`]: Rule::apply
pub trait Rule: fmt::Debug + Send {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Evaluate the transaction against a snapshot of the account
    ///
    /// Returns `Err` only for fatal conditions (a broken protocol
    /// precondition), never for ordinary rule failures.
    fn check(&self, account: &Account, transaction: &Transaction)
        -> Result<Verdict, AuthorizerError>;

    /// Apply an effect previously returned from [`check`](Rule::check)
    ///
    /// Stateless rules never produce effects and keep this default.
    fn apply(&mut self, effect: &Effect) -> Result<(), AuthorizerError> {
        let _ = effect;
        Ok(())
    }
}

/// Authorizes transactions against an account as a single unit
pub trait Authorizer {
    /// Evaluate every rule without mutating anything
    fn authorize(
        &self,
        account: &Account,
        transaction: &Transaction,
    ) -> Result<Authorization, AuthorizerError>;

    /// Apply the deferred effects of an accepted transaction, in plan order
    ///
    /// A plan commits cleanly when no other plan was committed since it was
    /// authorized. Effects applied before a failing one are not rolled back,
    /// so an error here is fatal to the stream.
    fn commit(&mut self, plan: CommitPlan) -> Result<(), AuthorizerError>;
}
