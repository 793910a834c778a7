use crate::core::rules::{RuleConfig, DEFAULT_MAX_TRANSACTIONS, DEFAULT_WINDOW_SECS};
use crate::strategy::PipelineConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for the authorizer
///
/// # Examples
///
/// ```bash
/// # Read operations from stdin with the default synchronous strategy
/// authorizer < operations.jsonl
///
/// # Read from a file through the async pipeline
/// authorizer --strategy async operations.jsonl
///
/// # Tune the rules
/// authorizer --max-transactions 5 --frequency-window 60 operations.jsonl
/// ```
#[derive(Parser, Debug)]
#[command(name = "authorizer")]
#[command(about = "Authorize transactions against a single in-memory account", long_about = None)]
pub struct CliArgs {
    /// Path to a JSON lines file of operations (stdin when omitted)
    #[arg(value_name = "INPUT")]
    pub input_file: Option<PathBuf>,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for synchronous or 'async' for a channel pipeline"
    )]
    pub strategy: StrategyType,

    /// Transactions allowed within the frequency window
    #[arg(long = "max-transactions", value_name = "COUNT", default_value_t = DEFAULT_MAX_TRANSACTIONS)]
    pub max_transactions: usize,

    /// Length of the high-frequency window in seconds
    #[arg(long = "frequency-window", value_name = "SECS", default_value_t = DEFAULT_WINDOW_SECS)]
    pub frequency_window: u64,

    /// Length of the double-transaction window in seconds
    #[arg(long = "duplicate-window", value_name = "SECS", default_value_t = DEFAULT_WINDOW_SECS)]
    pub duplicate_window: u64,

    /// Capacity of each async pipeline channel
    #[arg(
        long = "channel-capacity",
        value_name = "SIZE",
        help = "Capacity of each async pipeline channel (default: 1024)"
    )]
    pub channel_capacity: Option<usize>,

    /// Log filter directive; RUST_LOG takes precedence when set
    #[arg(long = "log-level", value_name = "FILTER", default_value = "warn")]
    pub log_level: String,
}

/// Processing strategy type selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    /// Read, authorize and write one operation at a time
    Sync,
    /// Reader, ledger worker and writer connected by bounded channels
    Async,
}

impl CliArgs {
    /// Rule chain tunables from the command line
    pub fn to_rule_config(&self) -> RuleConfig {
        RuleConfig::new(
            self.max_transactions,
            self.frequency_window,
            self.duplicate_window,
        )
    }

    /// Pipeline configuration, or `None` to use the defaults
    pub fn to_pipeline_config(&self) -> Option<PipelineConfig> {
        self.channel_capacity.map(PipelineConfig::new)
    }
}
