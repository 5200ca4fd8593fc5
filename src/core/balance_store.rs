//! In-memory balance store
//!
//! This module provides the `MemoryBalanceStore` struct, which holds the
//! latest balance per user in a concurrent map.
//!
//! # Design
//!
//! The store uses `DashMap` for thread-safe access with fine-grained locking,
//! so concurrent reads and writes to different users never contend. The store
//! itself guarantees nothing across operations; the ledger's critical section
//! is what makes a read-then-write sequence atomic.

use crate::core::traits::BalanceStore;
use crate::types::{unix_millis, Balance, UserId};
use dashmap::DashMap;

/// Thread-safe in-memory store for the latest balance per user
///
/// Writes are unconditional overwrites and reads never fail; a user with no
/// committed writes reads as a zero balance. Rows are never deleted.
#[derive(Debug, Default)]
pub struct MemoryBalanceStore {
    /// Latest balance row per user
    balances: DashMap<UserId, Balance>,
}

impl MemoryBalanceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            balances: DashMap::new(),
        }
    }

    /// Get all stored balances sorted by user ID
    ///
    /// Returns owned snapshots in ascending user order for deterministic
    /// output generation. Users that were only ever read (never written) do
    /// not appear.
    pub fn all_balances(&self) -> Vec<Balance> {
        let mut balances: Vec<Balance> = self
            .balances
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        balances.sort_by_key(|balance| balance.user);
        balances
    }
}

impl BalanceStore for MemoryBalanceStore {
    /// Read the current balance, materializing a zero row for unknown users
    ///
    /// The zero row is not inserted into the map; only committed writes
    /// create entries.
    fn select_by_id(&self, user: UserId) -> Balance {
        self.balances
            .get(&user)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| Balance::empty(user, unix_millis()))
    }

    /// Overwrite the stored balance and return the stored row
    fn insert_or_update(&self, user: UserId, amount: i64) -> Balance {
        let row = Balance::new(user, amount, unix_millis());
        self.balances.insert(user, row.clone());
        row
    }
}
