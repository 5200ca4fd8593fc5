//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It streams operation records from CSV through
//! the globally locked [`PointLedger`] and writes the final balances.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Balance mutation to `PointLedger` (business logic)
//! - CSV output to `csv_format::write_balances_csv` (format handling)
//!
//! # Error Handling
//!
//! Rejected operations (non-positive amounts, cap exceeded, insufficient
//! balance) and malformed rows are logged at warn level and skipped. A
//! ledger commit mismatch aborts the run; it signals a broken locking
//! discipline, not bad input.

use crate::core::{Ledger, MemoryBalanceStore, MemoryHistoryStore, PointLedger};
use crate::io::csv_format::write_balances_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::TransactionType;
use log::warn;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Synchronous processing strategy
///
/// Applies every operation sequentially against a fresh ledger. With a
/// single caller the global lock is uncontended; this pipeline exists for
/// deterministic runs and as the baseline the async pipeline is compared
/// against.
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process operations from input file and write final balances to output
    ///
    /// Pipeline steps:
    /// 1. Create a fresh ledger over shared in-memory stores
    /// 2. Stream operation records from the CSV file
    /// 3. Apply each record through the ledger, logging rejections
    /// 4. Write the final balances sorted by user
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        // The balance store is shared so the final state can be read back
        // after the ledger is done with it.
        let balances = Arc::new(MemoryBalanceStore::new());
        let ledger = PointLedger::with_stores(Arc::clone(&balances), MemoryHistoryStore::new());

        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(operation) => {
                    let outcome = match operation.kind {
                        TransactionType::Charge => ledger.charge(operation.user, operation.amount),
                        TransactionType::Use => ledger.deduct(operation.user, operation.amount),
                    };
                    if let Err(e) = outcome {
                        if e.is_rejection() {
                            warn!("Operation rejected: {}", e);
                        } else {
                            return Err(format!("Fatal ledger error: {}", e));
                        }
                    }
                }
                Err(e) => {
                    warn!("CSV parsing error: {}", e);
                }
            }
        }

        write_balances_csv(&balances.all_balances(), output)?;

        Ok(())
    }
}
