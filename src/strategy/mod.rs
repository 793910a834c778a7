//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! encompassing reading, authorization and output. This allows different
//! implementations (synchronous, asynchronous pipeline) to be selected at
//! runtime while producing identical output.

use crate::cli::StrategyType;
use crate::core::RuleConfig;
use crate::io::InputSource;
use crate::types::{AuthorizerError, Outcome};
use std::io::Write;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, PipelineConfig};
pub use sync::SyncProcessingStrategy;

/// Counters reported once the input is exhausted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Operations processed, including refused ones
    pub operations: u64,
    /// Operations refused with at least one violation
    pub rejected: u64,
}

impl ProcessingSummary {
    /// Account for one processed operation
    pub fn record(&mut self, outcome: &Outcome) {
        self.operations += 1;
        if !outcome.is_accepted() {
            self.rejected += 1;
        }
    }
}

/// Processing strategy trait for complete authorization pipelines
///
/// Each strategy reads operations from the input source, runs them through a
/// single ledger in input order, and writes one state line per operation.
pub trait ProcessingStrategy: Send + Sync {
    /// Process operations from `input` and write one line per outcome
    ///
    /// # Arguments
    ///
    /// * `input` - Where operations are read from
    /// * `output` - Writer receiving one JSON line per processed operation
    ///
    /// # Returns
    ///
    /// * `Ok(ProcessingSummary)` once the input is exhausted
    /// * `Err(AuthorizerError)` on the first fatal error
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input cannot be opened or read
    /// - A line cannot be decoded into an operation
    /// - The ledger reports a fatal error (out-of-order timestamp, overflow)
    /// - Output cannot be written
    ///
    /// Every outcome preceding the fatal error has already been written.
    fn process(
        &self,
        input: &InputSource,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, AuthorizerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `rules` - Tunables of the rule chain each run starts with
/// * `pipeline` - Optional channel configuration (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    rules: RuleConfig,
    pipeline: Option<PipelineConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(rules)),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(
            rules,
            pipeline.unwrap_or_default(),
        )),
    }
}
