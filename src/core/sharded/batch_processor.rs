//! Batch processing with user-based partitioning for concurrent operation
//! application
//!
//! This module provides the `BatchProcessor` struct, which applies batches
//! of parsed operations against a shared ledger, partitioned by user so that
//! different users' operations run concurrently while each user's operations
//! stay in input order.
//!
//! # Ordering
//!
//! Partitioning preserves per-user input order inside a batch, and the
//! pipeline drives batches sequentially, so the per-user order also holds
//! across batches. Cross-user ordering is unspecified, which the ledger
//! contract permits.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::traits::Ledger;
use crate::types::{LedgerError, OperationRecord, TransactionType, UserId};

/// Result of applying a single operation
///
/// Contains the original operation record and the outcome of applying it.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation that was applied
    pub record: OperationRecord,

    /// The outcome (resulting balance amount, or the error)
    pub result: Result<i64, LedgerError>,
}

/// Batch processor with user-based partitioning
///
/// Cloneable; clones share the same underlying ledger. Works against any
/// [`Ledger`] implementation, though the sharded ledger is the one that
/// actually benefits from the parallel fan-out.
#[derive(Clone)]
pub struct BatchProcessor {
    /// Shared ledger the operations are applied to
    ledger: Arc<dyn Ledger>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor over a shared ledger
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }

    /// Partition a batch of operations by user ID
    ///
    /// Each operation lands in exactly one sub-batch and sub-batches keep
    /// the original input order for their user.
    pub fn partition_by_user(
        &self,
        batch: Vec<OperationRecord>,
    ) -> HashMap<UserId, Vec<OperationRecord>> {
        let mut user_batches: HashMap<UserId, Vec<OperationRecord>> = HashMap::new();

        for record in batch {
            user_batches.entry(record.user).or_default().push(record);
        }

        user_batches
    }

    /// Apply all operations for a single user sequentially
    ///
    /// Operations are applied in input order; failures are captured per
    /// operation and do not stop the remaining ones for this user.
    pub async fn process_user_operations(
        &self,
        operations: Vec<OperationRecord>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(operations.len());

        for record in operations {
            let outcome = match record.kind {
                TransactionType::Charge => self.ledger.charge(record.user, record.amount),
                TransactionType::Use => self.ledger.deduct(record.user, record.amount),
            };
            results.push(ProcessingResult {
                record,
                result: outcome.map(|balance| balance.amount),
            });
        }

        results
    }

    /// Apply a batch of operations with user-based partitioning
    ///
    /// Partitions the batch by user, spawns one tokio task per user, waits
    /// for all of them, and returns every operation's outcome. Results may
    /// interleave across users; each user's results stay in input order.
    ///
    /// # Errors
    ///
    /// Returns an error only when a worker task itself dies (panic or
    /// cancellation). Per-operation failures, including fatal ledger errors,
    /// are reported inside the returned results for the caller to classify.
    pub async fn process_batch(
        &self,
        batch: Vec<OperationRecord>,
    ) -> Result<Vec<ProcessingResult>, LedgerError> {
        let user_batches = self.partition_by_user(batch);

        let mut tasks = Vec::new();
        for (_user, operations) in user_batches {
            let processor = self.clone();
            let task =
                tokio::spawn(async move { processor.process_user_operations(operations).await });
            tasks.push(task);
        }

        let mut results = Vec::new();
        for task in tasks {
            let user_results = task.await.map_err(|e| LedgerError::IoError {
                message: format!("worker task failed: {}", e),
            })?;
            results.extend(user_results);
        }

        Ok(results)
    }
}
