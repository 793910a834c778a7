//! Transaction authorizer CLI
//!
//! Reads one JSON operation per line, authorizes it against a single
//! in-memory account, and writes the resulting account state and violations
//! as one JSON line per operation.
//!
//! # Usage
//!
//! ```bash
//! cargo run < operations.jsonl
//! cargo run -- operations.jsonl
//! cargo run -- --strategy async operations.jsonl
//! cargo run -- --max-transactions 5 --frequency-window 60 operations.jsonl
//! ```
//!
//! Diagnostics go to stderr; stdout only carries protocol output.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (file not found, malformed input, out-of-order events, etc.)

use rust_authorizer::cli;
use rust_authorizer::io::InputSource;
use rust_authorizer::strategy;
use std::process;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let strategy = {
        let pipeline = if matches!(args.strategy, cli::StrategyType::Async) {
            args.to_pipeline_config()
        } else {
            None
        };
        strategy::create_strategy(args.strategy, args.to_rule_config(), pipeline)
    };

    let input = InputSource::from_path(args.input_file);
    let mut output = std::io::stdout().lock();
    match strategy.process(&input, &mut output) {
        Ok(summary) => info!(
            operations = summary.operations,
            rejected = summary.rejected,
            "input exhausted"
        ),
        Err(e) => {
            error!(error = %e, "processing stopped");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
