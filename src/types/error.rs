//! Error types for the authorizer
//!
//! This module defines the fatal errors that can occur while processing the
//! request stream. Unlike violations, these signal a broken precondition and
//! terminate processing of the remaining requests.
//!
//! # Error Categories
//!
//! - **Input Errors**: File not found, I/O failures, malformed JSON lines
//! - **Protocol Errors**: Out-of-order timestamps, ambiguous operations
//! - **Arithmetic Errors**: Overflow when applying an accepted transaction
//! - **Runtime Errors**: Async pipeline failures

use super::transaction::Timestamp;
use thiserror::Error;

/// Main fatal error type for the authorizer
///
/// Each variant includes relevant context to help diagnose which request
/// broke the protocol and why.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthorizerError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading input or writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// An input line could not be decoded as an operation
    #[error("JSON parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The operation names none, or more than one, of the known request shapes
    #[error("Bad operation object{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedOperation {
        /// Line number of the offending request (if available)
        line: Option<u64>,
        /// Description of what is wrong with the request
        message: String,
    },

    /// A timestamp arrived earlier than one that was already accepted
    #[error("Events must be sent in chronological order: received {received} after {last}")]
    OutOfOrder {
        /// Timestamp of the offending event
        received: Timestamp,
        /// Latest timestamp already accepted
        last: Timestamp,
    },

    /// Applying an accepted transaction would overflow the available limit
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// A commit plan refers to a rule the chain does not hold
    #[error("Commit plan refers to unknown rule #{index}")]
    InvalidCommit {
        /// Position of the missing rule
        index: usize,
    },

    /// A rule refused to record an effect it had authorized
    #[error("Rule {rule} refused a committed effect")]
    RejectedEffect {
        /// Name of the rule
        rule: String,
    },

    /// The async pipeline failed outside of request handling
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for AuthorizerError {
    fn from(error: std::io::Error) -> Self {
        AuthorizerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AuthorizerError {
    fn from(error: serde_json::Error) -> Self {
        AuthorizerError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

impl AuthorizerError {
    /// Create an OutOfOrder error
    pub fn out_of_order(received: Timestamp, last: Timestamp) -> Self {
        AuthorizerError::OutOfOrder { received, last }
    }

    /// Create a MalformedOperation error without line information
    pub fn malformed_operation(message: &str) -> Self {
        AuthorizerError::MalformedOperation {
            line: None,
            message: message.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        AuthorizerError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create a RejectedEffect error
    pub fn rejected_effect(rule: &str) -> Self {
        AuthorizerError::RejectedEffect {
            rule: rule.to_string(),
        }
    }

    /// Create a RuntimeError
    pub fn runtime(message: impl std::fmt::Display) -> Self {
        AuthorizerError::RuntimeError {
            message: message.to_string(),
        }
    }

    /// Attach an input line number to errors that originate from a request line
    pub fn at_line(self, line: u64) -> Self {
        match self {
            AuthorizerError::ParseError { message, .. } => AuthorizerError::ParseError {
                line: Some(line),
                message,
            },
            AuthorizerError::MalformedOperation { message, .. } => {
                AuthorizerError::MalformedOperation {
                    line: Some(line),
                    message,
                }
            }
            other => other,
        }
    }
}
