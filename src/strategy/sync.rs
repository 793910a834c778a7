//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates processing by coordinating
//! between the SyncReader (for input) and the Ledger (for business logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - Line decoding to `SyncReader` (iterator interface)
//! - Authorization to `Ledger` (business logic)
//! - Output to `json_format::write_state` (format handling)
//!
//! Each operation is read, authorized and written before the next line is
//! read, so memory usage does not grow with the input.

use crate::core::{Ledger, RuleConfig};
use crate::io::json_format::write_state;
use crate::io::{InputSource, SyncReader};
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::AuthorizerError;
use std::io::Write;
use tracing::debug;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_authorizer::core::RuleConfig;
/// use rust_authorizer::io::InputSource;
/// use rust_authorizer::strategy::{ProcessingStrategy, SyncProcessingStrategy};
///
/// let strategy = SyncProcessingStrategy::new(RuleConfig::default());
/// let mut output = std::io::stdout();
///
/// strategy
///     .process(&InputSource::Stdin, &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    rules: RuleConfig,
}

impl SyncProcessingStrategy {
    pub fn new(rules: RuleConfig) -> Self {
        SyncProcessingStrategy { rules }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input: &InputSource,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, AuthorizerError> {
        let mut ledger = Ledger::with_config(&self.rules);
        let reader = SyncReader::open(input)?;
        debug!(%input, "reading operations");

        let mut summary = ProcessingSummary::default();
        for operation in reader {
            let outcome = ledger.process(operation?)?;
            summary.record(&outcome);
            write_state(outcome, output)?;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary JSON lines file for testing
    fn create_temp_jsonl(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(content: &str) -> (Result<ProcessingSummary, AuthorizerError>, String) {
        let file = create_temp_jsonl(content);
        let strategy = SyncProcessingStrategy::default();
        let mut output = Vec::new();

        let result = strategy.process(&InputSource::File(file.path().to_path_buf()), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_sync_strategy_writes_one_line_per_operation() {
        let (result, output) = run(
            "{\"account\": {\"active-card\": true, \"available-limit\": 100}}\n\
             {\"transaction\": {\"merchant\": \"Burger King\", \"amount\": 20, \"time\": \"2019-02-13T10:00:00.000Z\"}}\n\
             {\"transaction\": {\"merchant\": \"Habbib's\", \"amount\": 90, \"time\": \"2019-02-13T11:00:00.000Z\"}}\n",
        );

        assert_eq!(
            result.unwrap(),
            ProcessingSummary {
                operations: 3,
                rejected: 1
            }
        );
        assert_eq!(
            output,
            "{\"account\":{\"active-card\":true,\"available-limit\":100},\"violations\":[]}\n\
             {\"account\":{\"active-card\":true,\"available-limit\":80},\"violations\":[]}\n\
             {\"account\":{\"active-card\":true,\"available-limit\":80},\"violations\":[\"insufficient-limit\"]}\n"
        );
    }

    #[test]
    fn test_sync_strategy_stops_at_parse_error() {
        let (result, output) = run(
            "{\"account\": {\"active-card\": true, \"available-limit\": 100}}\n\
             not json\n\
             {\"account\": {\"active-card\": true, \"available-limit\": 100}}\n",
        );

        assert!(matches!(
            result,
            Err(AuthorizerError::ParseError { line: Some(2), .. })
        ));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_sync_strategy_stops_at_out_of_order() {
        let (result, output) = run(
            "{\"account\": {\"active-card\": true, \"available-limit\": 100}}\n\
             {\"transaction\": {\"merchant\": \"A\", \"amount\": 1, \"time\": \"2019-02-13T10:01:00.000Z\"}}\n\
             {\"transaction\": {\"merchant\": \"B\", \"amount\": 1, \"time\": \"2019-02-13T10:00:00.000Z\"}}\n",
        );

        assert!(matches!(result, Err(AuthorizerError::OutOfOrder { .. })));
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy::default();
        let mut output = Vec::new();

        let result = strategy.process(
            &InputSource::File(PathBuf::from("nonexistent.jsonl")),
            &mut output,
        );

        assert!(matches!(result, Err(AuthorizerError::FileNotFound { .. })));
        assert!(output.is_empty());
    }

    #[test]
    fn test_sync_strategy_applies_rule_config() {
        let file = create_temp_jsonl(
            "{\"account\": {\"active-card\": true, \"available-limit\": 100}}\n\
             {\"transaction\": {\"merchant\": \"A\", \"amount\": 1, \"time\": \"2019-02-13T10:00:00.000Z\"}}\n\
             {\"transaction\": {\"merchant\": \"B\", \"amount\": 1, \"time\": \"2019-02-13T10:00:01.000Z\"}}\n",
        );
        let strategy = SyncProcessingStrategy::new(RuleConfig::new(1, 60, 60));
        let mut output = Vec::new();

        let summary = strategy
            .process(&InputSource::File(file.path().to_path_buf()), &mut output)
            .unwrap();

        assert_eq!(summary.rejected, 1);
        let last = String::from_utf8(output).unwrap();
        assert!(last
            .lines()
            .last()
            .unwrap()
            .contains("high-frequency-small-interval"));
    }
}
