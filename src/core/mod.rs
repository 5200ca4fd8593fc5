//! Core business logic module
//!
//! This module contains the ledger core and its storage collaborators:
//! - `traits` - Trait abstractions for the stores and the ledger surface
//! - `ledger` - Baseline ledger with one process-wide write lock
//! - `balance_store` - In-memory latest-balance store
//! - `history_store` - In-memory append-only history store
//! - `sharded` - Per-user lock sharding and concurrent batch application

pub mod balance_store;
pub mod history_store;
pub mod ledger;
pub mod sharded;
pub mod traits;

pub use balance_store::MemoryBalanceStore;
pub use history_store::MemoryHistoryStore;
pub use ledger::PointLedger;
pub use sharded::{BatchProcessor, ShardedPointLedger};
pub use traits::{BalanceStore, HistoryStore, Ledger};
