//! Point Ledger CLI
//!
//! Command-line interface for applying point operations from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > balances.csv
//! cargo run -- --strategy sync operations.csv > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 operations.csv > balances.csv
//! ```
//!
//! The program reads charge/use operation records from the input CSV file,
//! applies them through the selected ledger pipeline, and writes the final
//! balances to stdout. Rejected operations are logged at warn level
//! (set `RUST_LOG=warn` to see them) and skipped.
//!
//! # Processing Strategies
//!
//! - **sync**: sequential application through one process-wide lock
//! - **async**: batched parallel application with per-user lock sharding
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (missing arguments, file not found, commit mismatch)

use point_ledger::cli;
use point_ledger::strategy;
use std::process;

fn main() {
    env_logger::init();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
