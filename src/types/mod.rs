//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state
//! - `transaction`: Transaction requests and their duplicate-detection key
//! - `operation`: Decoded requests and the outcome reported for each
//! - `violation`: Coded, recoverable business-rule failures
//! - `error`: Fatal error types for the authorizer

pub mod account;
pub mod error;
pub mod operation;
pub mod transaction;
pub mod violation;

pub use account::Account;
pub use error::AuthorizerError;
pub use operation::{Operation, Outcome};
pub use transaction::{Timestamp, Transaction, TransactionKey};
pub use violation::{Violation, ViolationCode};
