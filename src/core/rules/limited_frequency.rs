//! Global transaction frequency cap

use crate::core::commit::{Effect, Verdict};
use crate::core::traits::Rule;
use crate::core::window::SlidingWindow;
use crate::types::{Account, AuthorizerError, Transaction, Violation};
use chrono::TimeDelta;

/// Refuses transactions once `max_transactions` were accepted within `interval`
///
/// One window is shared across all transactions. The check phase only asks
/// the window; the event is recorded by the commit phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitedFrequency {
    window: SlidingWindow,
}

impl LimitedFrequency {
    pub fn new(max_transactions: usize, interval: TimeDelta) -> Self {
        LimitedFrequency {
            window: SlidingWindow::new(max_transactions, interval),
        }
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }
}

impl Rule for LimitedFrequency {
    fn name(&self) -> &'static str {
        "limited-frequency"
    }

    fn check(
        &self,
        _account: &Account,
        transaction: &Transaction,
    ) -> Result<Verdict, AuthorizerError> {
        self.window.check_order(transaction.time)?;
        if !self.window.allow(transaction.time) {
            return Ok(Verdict::reject(Violation::high_frequency_small_interval()));
        }
        Ok(Verdict::defer(Effect::RecordEvent(transaction.time)))
    }

    fn apply(&mut self, effect: &Effect) -> Result<(), AuthorizerError> {
        if let Effect::RecordEvent(at) = effect {
            if !self.window.take(*at)? {
                return Err(AuthorizerError::rejected_effect(self.name()));
            }
        }
        Ok(())
    }
}
