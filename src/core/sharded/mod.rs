//! Per-user sharded implementations of the ledger core
//!
//! This module provides the lock-sharded counterpart of the globally locked
//! ledger, plus the batch machinery the async pipeline drives it with.
//!
//! # Architecture
//!
//! The sharded components keep the same operation contract as the baseline
//! ledger but replace the process-wide lock:
//!
//! - **ShardedPointLedger**: one exclusive lock per user, created on first
//!   access, so unrelated users never contend
//! - **BatchProcessor**: partitions operation batches by user and applies
//!   the partitions as parallel tasks
//!
//! # Atomicity
//!
//! For any single user the guarantees are unchanged: the whole
//! read-validate-write-append sequence runs under that user's lock, and the
//! committed history order matches the committed balance order.

pub mod batch_processor;
pub mod ledger;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use ledger::ShardedPointLedger;
