//! In-memory transaction history store
//!
//! This module provides the `MemoryHistoryStore` struct, an append-only log
//! of committed balance mutations keyed by user.
//!
//! # Design
//!
//! Each user's records live in a `Vec` behind a `DashMap` entry, so appends
//! for the same user serialize on that entry while appends for different
//! users proceed in parallel. Records are immutable once inserted and reads
//! return owned snapshots in insertion order.

use crate::core::traits::HistoryStore;
use crate::types::{HistoryRecord, TransactionType, UserId};
use dashmap::DashMap;

/// Thread-safe append-only history store
///
/// Holds the insertion-ordered sequence of committed mutations per user.
/// Records are never overwritten or deleted.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    /// Insertion-ordered records per user
    records: DashMap<UserId, Vec<HistoryRecord>>,
}

impl MemoryHistoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn insert(
        &self,
        user: UserId,
        amount: i64,
        kind: TransactionType,
        timestamp_millis: i64,
    ) -> HistoryRecord {
        let record = HistoryRecord {
            user,
            amount,
            kind,
            timestamp_millis,
        };
        self.records.entry(user).or_default().push(record.clone());
        record
    }

    fn select_all_by_user_id(&self, user: UserId) -> Vec<HistoryRecord> {
        self.records
            .get(&user)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_returns_stored_record() {
        let store = MemoryHistoryStore::new();

        let record = store.insert(1, 5000, TransactionType::Charge, 1_700_000_000_000);

        assert_eq!(record.user, 1);
        assert_eq!(record.amount, 5000);
        assert_eq!(record.kind, TransactionType::Charge);
        assert_eq!(record.timestamp_millis, 1_700_000_000_000);
    }

    #[test]
    fn test_select_all_filters_by_user() {
        let store = MemoryHistoryStore::new();

        store.insert(1, 5000, TransactionType::Charge, 1);
        store.insert(1, 2000, TransactionType::Use, 2);
        store.insert(2, 10_000, TransactionType::Charge, 3);

        let result = store.select_all_by_user_id(1);

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|record| record.user == 1));
    }

    #[test]
    fn test_select_all_unknown_user_is_empty() {
        let store = MemoryHistoryStore::new();

        assert!(store.select_all_by_user_id(99).is_empty());
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let store = MemoryHistoryStore::new();

        store.insert(1, 10_000, TransactionType::Charge, 1);
        store.insert(1, 7000, TransactionType::Use, 2);
        store.insert(1, 17_000, TransactionType::Charge, 3);

        let amounts: Vec<_> = store
            .select_all_by_user_id(1)
            .iter()
            .map(|record| record.amount)
            .collect();
        assert_eq!(amounts, vec![10_000, 7000, 17_000]);
    }

    #[test]
    fn test_select_all_is_restartable() {
        let store = MemoryHistoryStore::new();
        store.insert(1, 100, TransactionType::Charge, 1);

        let first = store.select_all_by_user_id(1);
        let second = store.select_all_by_user_id(1);

        assert_eq!(first, second);
    }
}
