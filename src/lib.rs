//! Point Ledger Library
//! # Overview
//!
//! This library maintains per-user point balances and an append-only
//! transaction history under concurrent access, with two mutating
//! operations: charge (credit) and deduct (debit).
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Balance, HistoryRecord, errors)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Baseline ledger with a single process-wide lock
//!   - [`core::sharded`] - Per-user lock sharding and batch fan-out
//!   - [`core::balance_store`] / [`core::history_store`] - In-memory stores
//! - [`io`] - CSV input/output with sync and async readers
//! - [`strategy`] - Runtime-selectable processing pipelines
//!
//! # The Critical Section
//!
//! Every charge and deduct executes read-validate-write-append as one
//! exclusive critical section: the current balance is read, business rules
//! are checked (positive amounts, the balance cap, sufficient balance), the
//! new balance is written, and a matching history record is appended. A
//! rejected operation mutates nothing; a committed one always leaves the
//! balance and its history record in agreement.
//!
//! # Balance Invariant
//!
//! After any successful operation a balance lies in `[0, POINT_LIMIT]`, and
//! a user's history records carry the resulting balances in commit order.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{
    BalanceStore, HistoryStore, Ledger, MemoryBalanceStore, MemoryHistoryStore, PointLedger,
    ShardedPointLedger,
};
pub use crate::io::write_balances_csv;
pub use crate::types::{
    Balance, HistoryRecord, LedgerError, OperationRecord, TransactionType, UserId, POINT_LIMIT,
};
