//! Chronological order rule
//!
//! Sanity check of an assumption the whole system rests on: transactions
//! arrive with non-decreasing timestamps. The sliding windows used by the
//! frequency rules are only correct under that assumption.

use crate::core::commit::{Effect, Verdict};
use crate::core::traits::Rule;
use crate::types::{Account, AuthorizerError, Timestamp, Transaction};

/// Rejects, as a fatal error, any transaction older than the last accepted one
///
/// The watermark only advances through the commit phase, so a transaction
/// refused by another rule does not move it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChronologicalOrder {
    last_seen: Option<Timestamp>,
}

impl ChronologicalOrder {
    pub fn new() -> Self {
        ChronologicalOrder::default()
    }

    /// Timestamp of the latest accepted transaction
    pub fn last_seen(&self) -> Option<Timestamp> {
        self.last_seen
    }
}

impl Rule for ChronologicalOrder {
    fn name(&self) -> &'static str {
        "chronological-order"
    }

    fn check(
        &self,
        _account: &Account,
        transaction: &Transaction,
    ) -> Result<Verdict, AuthorizerError> {
        match self.last_seen {
            Some(last) if transaction.time < last => {
                Err(AuthorizerError::out_of_order(transaction.time, last))
            }
            _ => Ok(Verdict::defer(Effect::AdvanceWatermark(transaction.time))),
        }
    }

    fn apply(&mut self, effect: &Effect) -> Result<(), AuthorizerError> {
        if let Effect::AdvanceWatermark(at) = effect {
            self.last_seen = Some(self.last_seen.map_or(*at, |last| last.max(*at)));
        }
        Ok(())
    }
}
