//! Asynchronous pipeline processing strategy
//!
//! This module provides an asynchronous implementation of the
//! ProcessingStrategy trait. Reading, authorization and writing run as
//! separate stages connected by bounded channels.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── reader task (AsyncReader)
//!     │       │ mpsc<Result<Operation>>
//!     ├── ledger worker task (sole owner of the Ledger)
//!     │       │ mpsc<Result<Outcome>>
//!     └── writer (json_format::write_state, on the calling thread)
//! ```
//!
//! The ledger lives in exactly one task, so all account and rule state is
//! mutated by a single writer and operations are applied in input order.
//! Bounded channels apply backpressure to the reader when output lags.

use crate::core::{Ledger, RuleConfig};
use crate::io::json_format::write_state;
use crate::io::{AsyncReader, InputSource};
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::{AuthorizerError, Operation, Outcome};
use std::io::Write;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Default capacity of each pipeline channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Configuration for the async pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of in-flight items each channel holds before applying backpressure
    pub channel_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl PipelineConfig {
    /// Create a pipeline configuration
    ///
    /// A zero capacity falls back to the default with a warning.
    pub fn new(channel_capacity: usize) -> Self {
        let channel_capacity = if channel_capacity == 0 {
            warn!(
                channel_capacity,
                default = DEFAULT_CHANNEL_CAPACITY,
                "invalid channel capacity, using default"
            );
            DEFAULT_CHANNEL_CAPACITY
        } else {
            channel_capacity
        };

        Self { channel_capacity }
    }
}

/// Asynchronous pipeline processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    rules: RuleConfig,
    config: PipelineConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(rules: RuleConfig, config: PipelineConfig) -> Self {
        Self { rules, config }
    }

    async fn run(
        &self,
        input: &InputSource,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, AuthorizerError> {
        let capacity = self.config.channel_capacity;
        let (operation_tx, mut operation_rx) =
            mpsc::channel::<Result<Operation, AuthorizerError>>(capacity);
        let (outcome_tx, mut outcome_rx) =
            mpsc::channel::<Result<Outcome, AuthorizerError>>(capacity);

        let source = input.clone();
        let reader = tokio::spawn(async move {
            let mut reader = match AsyncReader::open(&source).await {
                Ok(reader) => reader,
                Err(e) => {
                    let _ = operation_tx.send(Err(e)).await;
                    return;
                }
            };
            while let Some(item) = reader.next_operation().await {
                let failed = item.is_err();
                if operation_tx.send(item).await.is_err() || failed {
                    break;
                }
            }
        });

        let rules = self.rules;
        let worker = tokio::spawn(async move {
            let mut ledger = Ledger::with_config(&rules);
            while let Some(item) = operation_rx.recv().await {
                let result = item.and_then(|operation| ledger.process(operation));
                let failed = result.is_err();
                if outcome_tx.send(result).await.is_err() || failed {
                    break;
                }
            }
        });

        let mut summary = ProcessingSummary::default();
        let mut failure = None;
        while let Some(result) = outcome_rx.recv().await {
            match result {
                Ok(outcome) => {
                    summary.record(&outcome);
                    if let Err(e) = write_state(outcome, output) {
                        failure = Some(e);
                        break;
                    }
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        // The reader may be parked on a blocking stdin read.
        reader.abort();
        drop(outcome_rx);
        worker.await.map_err(AuthorizerError::runtime)?;

        match failure {
            Some(e) => Err(e),
            None => Ok(summary),
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input: &InputSource,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, AuthorizerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .map_err(|e| {
                AuthorizerError::runtime(format!("Failed to create tokio runtime: {}", e))
            })?;

        debug!(%input, capacity = self.config.channel_capacity, "starting pipeline");
        let result = runtime.block_on(self.run(input, output));

        // Do not wait on a reader blocked in stdin.
        runtime.shutdown_background();
        result
    }
}
