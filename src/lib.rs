//! Rust Transaction Authorizer Library
//! # Overview
//!
//! This library authorizes transactions against a single in-memory account,
//! reading JSON lines operations through either a sync or an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, Violation, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::window`] - Sliding window event-rate limiter
//!   - [`core::chain`] - Rule chain with two-phase check/commit
//!   - [`core::rules`] - The authorization rules
//!   - [`core::ledger`] - Account lifecycle and evaluate-then-apply
//! - [`io`] - JSON lines reading and writing
//! - [`strategy`] - Complete processing pipelines
//!
//! # Operations
//!
//! - **Account creation**: Initialize the account, once
//! - **Transaction**: Authorize against every rule, then deduct the amount
//! - **Deny list**: Replace the merchants the account refuses
//!
//! # Rules
//!
//! Every rule is consulted on every transaction, and violations are reported
//! in this order:
//!
//! - **card-not-active**: The card is inactive
//! - **insufficient-limit**: The amount exceeds the available limit
//! - **high-frequency-small-interval**: More than 3 transactions within 2 minutes
//! - **double-transaction**: Same merchant and amount within 2 minutes
//! - **merchant-denied**: The merchant is on the deny list
//!
//! A transaction older than one already accepted is a fatal error.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{Authorizer, Ledger, Rule, RuleChain, RuleConfig, SlidingWindow};
pub use io::write_state;
pub use types::{
    Account, AuthorizerError, Operation, Outcome, Transaction, TransactionKey, Violation,
    ViolationCode,
};
