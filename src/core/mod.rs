//! Core business logic module
//!
//! This module contains the authorization components:
//! - `window` - Sliding window event-rate limiter
//! - `commit` - Verdicts, deferred effects and commit plans
//! - `traits` - The `Rule` and `Authorizer` seams
//! - `chain` - Ordered rule chain implementing two-phase authorization
//! - `rules` - The production rules and their configuration
//! - `ledger` - Account lifecycle and evaluate-then-apply orchestration

pub mod chain;
pub mod commit;
pub mod ledger;
pub mod rules;
pub mod traits;
pub mod window;

pub use chain::RuleChain;
pub use commit::{Authorization, CommitPlan, Effect, PendingEffect, Verdict};
pub use ledger::Ledger;
pub use rules::{default_chain, RuleConfig};
pub use traits::{Authorizer, Rule};
pub use window::SlidingWindow;
