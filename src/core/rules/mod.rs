//! Authorization rules
//!
//! Each rule is a small [`Rule`](crate::core::traits::Rule) implementation
//! with its own state. [`default_chain`] assembles them in the order their
//! violations are reported.

mod account_state;
mod chronological_order;
mod limited_frequency;
mod unique_transactions;

pub use account_state::{CardActive, MerchantDenyList, SufficientLimit};
pub use chronological_order::ChronologicalOrder;
pub use limited_frequency::LimitedFrequency;
pub use unique_transactions::UniqueTransactions;

use crate::core::chain::RuleChain;
use chrono::TimeDelta;
use tracing::warn;

/// Default number of transactions allowed within the frequency window
pub const DEFAULT_MAX_TRANSACTIONS: usize = 3;

/// Default length, in seconds, of both frequency windows
pub const DEFAULT_WINDOW_SECS: u64 = 120;

/// Tunables of the default rule chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleConfig {
    /// Transactions allowed within `frequency_window`
    pub max_transactions: usize,
    /// Window of the high-frequency rule
    pub frequency_window: TimeDelta,
    /// Window within which a repeated merchant and amount is a double
    pub duplicate_window: TimeDelta,
}

impl Default for RuleConfig {
    fn default() -> Self {
        let window = TimeDelta::seconds(DEFAULT_WINDOW_SECS as i64);
        RuleConfig {
            max_transactions: DEFAULT_MAX_TRANSACTIONS,
            frequency_window: window,
            duplicate_window: window,
        }
    }
}

impl RuleConfig {
    /// Build a configuration from window lengths in seconds
    ///
    /// A window too large to represent falls back to the default length with
    /// a warning.
    pub fn new(max_transactions: usize, frequency_secs: u64, duplicate_secs: u64) -> Self {
        RuleConfig {
            max_transactions,
            frequency_window: window_from_secs("frequency", frequency_secs),
            duplicate_window: window_from_secs("duplicate", duplicate_secs),
        }
    }
}

fn window_from_secs(name: &str, secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or_else(|| {
            warn!(
                window = name,
                secs,
                default = DEFAULT_WINDOW_SECS,
                "window length out of range, using default"
            );
            TimeDelta::seconds(DEFAULT_WINDOW_SECS as i64)
        })
}

/// The production rule chain
///
/// Order: chronological order, card active, sufficient limit, limited
/// frequency, unique transactions, merchant deny list.
pub fn default_chain(config: &RuleConfig) -> RuleChain {
    RuleChain::new()
        .with_rule(ChronologicalOrder::new())
        .with_rule(CardActive)
        .with_rule(SufficientLimit)
        .with_rule(LimitedFrequency::new(
            config.max_transactions,
            config.frequency_window,
        ))
        .with_rule(UniqueTransactions::new(config.duplicate_window))
        .with_rule(MerchantDenyList)
}
