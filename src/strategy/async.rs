//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of
//! the ProcessingStrategy trait. It applies operations in batches against a
//! shared [`ShardedPointLedger`] using user-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batched CSV reading)
//!     ├── BatchProcessor (user partitioning + task fan-out)
//!     └── ShardedPointLedger (per-user critical sections)
//! ```
//!
//! # Ordering
//!
//! Batches are driven sequentially so each user's operations keep their
//! input order across the entire file; within a batch, different users'
//! operations run in parallel. That is exactly the latitude the ledger
//! contract allows: cross-user ordering is unspecified, per-user ordering
//! is commit order.
//!
//! [`ShardedPointLedger`]: crate::core::sharded::ShardedPointLedger

use crate::core::sharded::{BatchProcessor, ShardedPointLedger};
use crate::core::{Ledger, MemoryBalanceStore, MemoryHistoryStore};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_balances_csv;
use crate::strategy::ProcessingStrategy;
use log::warn;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio_util::compat::TokioAsyncReadCompatExt;

/// Configuration for batch processing
///
/// Controls how many operations are read per batch and how many worker
/// threads the runtime uses.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Maximum number of worker threads applying a batch concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a logged warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Reads operations in batches and applies each batch through the
/// BatchProcessor before reading the next, so per-user ordering holds
/// across batches while unrelated users proceed in parallel within one.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process operations from input file and write final balances to output
    ///
    /// Pipeline steps:
    /// 1. Build a tokio multi-thread runtime sized by the configuration
    /// 2. Create the sharded ledger over shared in-memory stores
    /// 3. Read operation batches with AsyncReader
    /// 4. Apply each batch through the BatchProcessor, waiting for it to
    ///    finish before reading the next
    /// 5. Classify per-operation outcomes: rejections are logged, a fatal
    ///    ledger error aborts the run
    /// 6. Write the final balances sorted by user
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let balances = Arc::new(MemoryBalanceStore::new());
            let ledger = Arc::new(ShardedPointLedger::with_stores(
                Arc::clone(&balances),
                MemoryHistoryStore::new(),
            ));
            let processor = BatchProcessor::new(ledger as Arc<dyn Ledger>);

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;
            let mut reader = AsyncReader::new(file.compat());

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let results = processor
                    .process_batch(batch)
                    .await
                    .map_err(|e| format!("Batch processing failed: {}", e))?;

                for processed in results {
                    if let Err(e) = processed.result {
                        if e.is_rejection() {
                            warn!("Operation rejected: {}", e);
                        } else {
                            return Err(format!("Fatal ledger error: {}", e));
                        }
                    }
                }
            }

            write_balances_csv(&balances.all_balances(), output)?;

            Ok(())
        })
    }
}
