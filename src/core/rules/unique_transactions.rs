//! Duplicate transaction detection
//!
//! Two transactions are doubles when they share merchant and amount and fall
//! within the configured interval of each other. Each `(merchant, amount)` key
//! gets its own single-slot sliding window. Windows whose event has aged out
//! are swept once the map doubles in size since the last sweep.

use crate::core::commit::{Effect, Verdict};
use crate::core::traits::Rule;
use crate::core::window::SlidingWindow;
use crate::types::{Account, AuthorizerError, Timestamp, Transaction, TransactionKey, Violation};
use chrono::TimeDelta;
use std::collections::HashMap;
use tracing::debug;

/// Map size below which expired windows are left in place
const SWEEP_THRESHOLD: usize = 64;

/// Refuses a transaction already accepted with the same key within `interval`
///
/// Windows are created lazily. A key never seen before counts as an empty
/// window during the check phase and only gets an entry when the transaction
/// is committed, so refused transactions leave the map untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueTransactions {
    interval: TimeDelta,
    windows: HashMap<TransactionKey, SlidingWindow>,
    next_sweep: usize,
}

impl UniqueTransactions {
    pub fn new(interval: TimeDelta) -> Self {
        UniqueTransactions {
            interval,
            windows: HashMap::new(),
            next_sweep: SWEEP_THRESHOLD,
        }
    }

    /// Number of keys with a window
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }

    fn template(&self) -> SlidingWindow {
        SlidingWindow::new(1, self.interval)
    }

    /// Drop the windows with no event inside the interval ending at `now`
    fn sweep(&mut self, now: Timestamp) {
        let before = self.windows.len();
        self.windows.retain(|_, window| !window.is_expired(now));
        self.next_sweep = (self.windows.len() * 2).max(SWEEP_THRESHOLD);
        debug!(
            dropped = before - self.windows.len(),
            tracked = self.windows.len(),
            "swept expired duplicate windows"
        );
    }
}

impl Rule for UniqueTransactions {
    fn name(&self) -> &'static str {
        "unique-transactions"
    }

    fn check(
        &self,
        _account: &Account,
        transaction: &Transaction,
    ) -> Result<Verdict, AuthorizerError> {
        let key = transaction.key();
        if let Some(window) = self.windows.get(&key) {
            window.check_order(transaction.time)?;
            if !window.allow(transaction.time) {
                return Ok(Verdict::reject(Violation::double_transaction(
                    &transaction.merchant,
                    transaction.amount,
                )));
            }
        } else if !self.template().allow(transaction.time) {
            return Ok(Verdict::reject(Violation::double_transaction(
                &transaction.merchant,
                transaction.amount,
            )));
        }
        Ok(Verdict::defer(Effect::RecordKeyedEvent {
            key,
            at: transaction.time,
        }))
    }

    fn apply(&mut self, effect: &Effect) -> Result<(), AuthorizerError> {
        if let Effect::RecordKeyedEvent { key, at } = effect {
            let template = self.template();
            let window = self.windows.entry(key.clone()).or_insert(template);
            if !window.take(*at)? {
                return Err(AuthorizerError::rejected_effect(self.name()));
            }
            if self.windows.len() > self.next_sweep {
                self.sweep(*at);
            }
        }
        Ok(())
    }
}
