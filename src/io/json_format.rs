//! JSON format handling for operations and account state output
//!
//! This module centralizes all wire format concerns, providing:
//! - OperationInput structure for deserialization
//! - OperationDecoder for a whitespace-separated stream of input objects
//! - Conversion from wire objects to domain operations
//! - StateOutput serialization, one object per line
//!
//! Apart from `write_state`, nothing here performs I/O.

use crate::types::{Account, AuthorizerError, Operation, Outcome, Transaction, ViolationCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;

/// Wire shape of one input object
///
/// Exactly one field must be present. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperationInput {
    pub account: Option<Account>,
    pub transaction: Option<Transaction>,
    #[serde(rename = "deny-list")]
    pub deny_list: Option<BTreeSet<String>>,
}

/// Wire shape of one output line
///
/// `account` serializes as `null` while the ledger has no account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateOutput {
    pub account: Option<Account>,
    pub violations: Vec<ViolationCode>,
}

impl From<Outcome> for StateOutput {
    fn from(outcome: Outcome) -> Self {
        StateOutput {
            violations: outcome.codes(),
            account: outcome.account,
        }
    }
}

/// Convert an OperationInput to an Operation
///
/// # Errors
///
/// Returns `MalformedOperation` unless exactly one of `account`,
/// `transaction` or `deny-list` is set.
pub fn convert_operation_input(input: OperationInput) -> Result<Operation, AuthorizerError> {
    match (input.account, input.transaction, input.deny_list) {
        (Some(account), None, None) => Ok(Operation::CreateAccount(account)),
        (None, Some(transaction), None) => Ok(Operation::PerformTransaction(transaction)),
        (None, None, Some(merchants)) => Ok(Operation::SetDenyList(merchants)),
        _ => Err(AuthorizerError::malformed_operation(
            "Must have exactly 1 of \"account\", \"transaction\" or \"deny-list\" fields set",
        )),
    }
}

/// Decode a single operation object
///
/// Errors carry no line number.
pub fn parse_operation(line: &str) -> Result<Operation, AuthorizerError> {
    let input: OperationInput = serde_json::from_str(line)?;
    convert_operation_input(input)
}

/// Incremental decoder for a whitespace-separated stream of operation objects
///
/// Input is fed one line at a time. An object may span several lines and a
/// line may hold several objects. Errors are tagged with the 1-based input
/// line they occurred on, and the first error ends the stream.
#[derive(Debug, Default)]
pub struct OperationDecoder {
    pending: String,
    /// Input line holding the first byte of `pending`
    first_line: u64,
    lines_fed: u64,
    failed: bool,
}

impl OperationDecoder {
    pub fn new() -> Self {
        OperationDecoder::default()
    }

    /// Number of input lines fed so far
    pub fn lines_fed(&self) -> u64 {
        self.lines_fed
    }

    /// Whether an error has ended the stream
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Append one input line, without its terminator
    pub fn feed(&mut self, line: &str) {
        self.lines_fed += 1;
        if self.pending.trim().is_empty() {
            self.pending.clear();
            self.first_line = self.lines_fed;
        }
        self.pending.push_str(line);
        self.pending.push('\n');
    }

    /// Decode the next complete operation
    ///
    /// Returns `None` when the buffered input holds no complete object yet.
    pub fn next_operation(&mut self) -> Option<Result<Operation, AuthorizerError>> {
        self.decode(false)
    }

    /// Decode what is left once the input has ended
    ///
    /// An unterminated object is reported as a parse error.
    pub fn finish(&mut self) -> Option<Result<Operation, AuthorizerError>> {
        self.decode(true)
    }

    fn decode(&mut self, at_end: bool) -> Option<Result<Operation, AuthorizerError>> {
        if self.failed {
            return None;
        }

        let (decoded, consumed) = {
            let mut stream =
                serde_json::Deserializer::from_str(&self.pending).into_iter::<OperationInput>();
            let decoded = stream.next()?;
            (decoded, stream.byte_offset())
        };

        let result = match decoded {
            Err(e) if e.is_eof() && !at_end => return None,
            Err(e) => Err(self.decode_error(e)),
            Ok(input) => {
                let skipped = self.pending.len() - self.pending.trim_start().len();
                let line = self.first_line + count_lines(&self.pending[..skipped]);
                self.first_line += count_lines(&self.pending[..consumed]);
                self.pending.drain(..consumed);
                convert_operation_input(input).map_err(|e| e.at_line(line))
            }
        };

        if result.is_err() {
            self.failed = true;
            self.pending.clear();
        }
        Some(result)
    }

    fn decode_error(&self, error: serde_json::Error) -> AuthorizerError {
        let line = (self.first_line + (error.line().max(1) as u64 - 1)).min(self.lines_fed);
        let position = format!(" at line {} column {}", error.line(), error.column());
        let text = error.to_string();
        let message = match text.strip_suffix(&position) {
            Some(message) => format!("{} at column {}", message, error.column()),
            None => text,
        };
        AuthorizerError::ParseError {
            line: Some(line),
            message,
        }
    }
}

fn count_lines(text: &str) -> u64 {
    text.bytes().filter(|&b| b == b'\n').count() as u64
}

/// Write the outcome of one operation as a single JSON line and flush it
///
/// # Arguments
///
/// * `outcome` - Outcome reported by the ledger
/// * `output` - Destination of the line
pub fn write_state(outcome: Outcome, output: &mut dyn Write) -> Result<(), AuthorizerError> {
    let state = StateOutput::from(outcome);
    serde_json::to_writer(&mut *output, &state)?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}
