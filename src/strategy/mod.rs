//! Processing strategy module for point operation pipelines
//!
//! This module defines the Strategy pattern for complete operation
//! processing pipelines, encompassing CSV parsing, ledger application, and
//! balance output. This allows different processing implementations
//! (synchronous, asynchronous batch) to be selected at runtime.

use crate::cli::StrategyType;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete operation pipelines
///
/// Each strategy reads operation records from a CSV file, applies them
/// through a ledger, and writes the final balances to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process operations from input file and write final balances to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing operation records
    /// * `output` - Mutable reference to a writer for the final balances
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all processing completed (rejected operations included;
    ///   they are logged and skipped)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error,
    ///   ledger commit mismatch)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - A fatal I/O error occurs during reading or writing
    /// - The ledger reports a commit mismatch, which indicates a broken
    ///   locking discipline and must never be skipped over
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// Factory selecting the pipeline implementation at runtime. The sync
/// pipeline drives the globally locked ledger; the async pipeline drives the
/// sharded ledger with batched fan-out.
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
