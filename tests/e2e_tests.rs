//! End-to-end integration tests
//!
//! These tests validate the complete processing pipeline using predefined
//! JSON fixtures. Each test:
//! 1. Reads input.jsonl from a fixture directory
//! 2. Processes all operations through a fresh ledger
//! 3. Collects the output lines
//! 4. Compares actual output with expected.jsonl
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path and account lifecycle scenarios
//! - Every violation code, alone and combined
//! - Deny list updates
//! - Objects spanning several lines, and several objects on one line
//! - Fatal errors, which keep every output line written before them
//!
//! Each test is run twice: once with the synchronous strategy and once with the async pipeline.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_authorizer::cli::StrategyType;
    use rust_authorizer::core::RuleConfig;
    use rust_authorizer::io::InputSource;
    use rust_authorizer::strategy::{create_strategy, ProcessingSummary};
    use rust_authorizer::AuthorizerError;
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::NamedTempFile;

    /// Process `tests/fixtures/{fixture_name}/input.jsonl` with the given strategy
    ///
    /// Returns the processing result, the actual output and the expected output.
    ///
    /// # Panics
    ///
    /// Panics if the fixture files cannot be read.
    fn run_fixture(
        fixture_name: &str,
        strategy_type: StrategyType,
    ) -> (Result<ProcessingSummary, AuthorizerError>, String, String) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.jsonl", fixture_dir);
        let expected_path = format!("{}/expected.jsonl", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );

        let strategy = create_strategy(strategy_type, RuleConfig::default(), None);
        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        let result = strategy.process(
            &InputSource::File(PathBuf::from(&input_path)),
            &mut temp_output,
        );
        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        (result, actual_output, expected_output)
    }

    /// End-to-end test for all successful fixtures with both strategies
    #[rstest]
    #[case("happy_path")]
    #[case("account_not_initialized")]
    #[case("account_already_initialized")]
    #[case("card_not_active")]
    #[case("insufficient_limit")]
    #[case("high_frequency")]
    #[case("double_transaction")]
    #[case("multiple_violations")]
    #[case("deny_list")]
    #[case("multi_line_operations")]
    #[case("same_line_operations")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let (result, actual_output, expected_output) = run_fixture(fixture, strategy);

        if let Err(e) = result {
            panic!("Failed to process {} ({:?}): {}", fixture, strategy, e);
        }
        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture, strategy, actual_output, expected_output
        );
    }

    #[rstest]
    fn test_out_of_order_stops_processing(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let (result, actual_output, expected_output) = run_fixture("out_of_order", strategy);

        assert!(
            matches!(result, Err(AuthorizerError::OutOfOrder { .. })),
            "unexpected result: {:?}",
            result
        );
        assert_eq!(actual_output, expected_output);
    }

    #[rstest]
    fn test_malformed_operation_stops_processing(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let (result, actual_output, expected_output) =
            run_fixture("malformed_operation", strategy);

        assert_eq!(
            result,
            Err(AuthorizerError::MalformedOperation {
                line: Some(2),
                message:
                    "Must have exactly 1 of \"account\", \"transaction\" or \"deny-list\" fields set"
                        .to_string(),
            })
        );
        assert_eq!(actual_output, expected_output);
    }

    #[rstest]
    fn test_summary_counts(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let (result, _, _) = run_fixture("multiple_violations", strategy);

        assert_eq!(
            result.unwrap(),
            ProcessingSummary {
                operations: 8,
                rejected: 3
            }
        );
    }
}
