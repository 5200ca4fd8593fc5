//! Point ledger with per-user lock sharding
//!
//! This module provides the `ShardedPointLedger` struct, which keeps the
//! same atomicity contract as [`PointLedger`] for any single user while
//! letting operations on distinct users proceed in parallel.
//!
//! # Design
//!
//! Instead of one process-wide mutex, the ledger keeps a lock table mapping
//! each user to a dedicated mutex, created on first access and never removed.
//! A charge or deduct acquires only its user's lock for the whole
//! read-validate-write-append sequence, so two users never contend while two
//! operations on the same user still fully serialize.
//!
//! [`PointLedger`]: crate::core::ledger::PointLedger

use crate::core::balance_store::MemoryBalanceStore;
use crate::core::history_store::MemoryHistoryStore;
use crate::core::traits::{BalanceStore, HistoryStore, Ledger};
use crate::types::{Balance, HistoryRecord, LedgerError, TransactionType, UserId, POINT_LIMIT};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Point ledger with one exclusive lock per user
///
/// Exposes the same [`Ledger`] contract as the globally locked variant.
/// Intended to be wrapped in `Arc` and shared across worker tasks.
pub struct ShardedPointLedger<B, H> {
    /// Latest-balance store
    balances: B,

    /// Append-only history store
    history: H,

    /// Balance cap checked on every charge
    limit: i64,

    /// Per-user critical-section locks, created on first mutation
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl ShardedPointLedger<MemoryBalanceStore, MemoryHistoryStore> {
    /// Create a ledger over fresh in-memory stores with the default cap
    pub fn new() -> Self {
        Self::with_stores(MemoryBalanceStore::new(), MemoryHistoryStore::new())
    }
}

impl Default for ShardedPointLedger<MemoryBalanceStore, MemoryHistoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BalanceStore, H: HistoryStore> ShardedPointLedger<B, H> {
    /// Create a ledger over the given stores with the default cap
    pub fn with_stores(balances: B, history: H) -> Self {
        Self::with_limit(balances, history, POINT_LIMIT)
    }

    /// Create a ledger with an explicit balance cap
    pub fn with_limit(balances: B, history: H, limit: i64) -> Self {
        Self {
            balances,
            history,
            limit,
            locks: DashMap::new(),
        }
    }

    /// Get the lock guarding a user's critical section, creating it on
    /// first access
    ///
    /// The Arc is cloned out of the map entry before locking so the map
    /// shard is not held while the caller blocks on the mutex.
    fn user_lock(&self, user: UserId) -> Arc<Mutex<()>> {
        self.locks
            .entry(user)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Write the target balance, verify the commit, and append history
    ///
    /// Must be called with the user's lock held. Same verification policy as
    /// the globally locked ledger: a stored amount that differs from the
    /// computed target is the fatal [`LedgerError::CommitMismatch`].
    fn commit(
        &self,
        user: UserId,
        target: i64,
        kind: TransactionType,
    ) -> Result<Balance, LedgerError> {
        let stored = self.balances.insert_or_update(user, target);
        if stored.amount != target {
            return Err(LedgerError::commit_mismatch(user, target, stored.amount));
        }

        self.history
            .insert(user, target, kind, stored.updated_millis);

        Ok(stored)
    }
}

impl<B: BalanceStore, H: HistoryStore> Ledger for ShardedPointLedger<B, H> {
    fn get_balance(&self, user: UserId) -> Balance {
        self.balances.select_by_id(user)
    }

    fn charge(&self, user: UserId, amount: i64) -> Result<Balance, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::non_positive_charge(user, amount));
        }

        let lock = self.user_lock(user);
        let _guard = lock.lock();

        let current = self.balances.select_by_id(user).amount;
        let target = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::exceeds_limit(user, current, amount, self.limit))?;
        if target > self.limit {
            return Err(LedgerError::exceeds_limit(user, current, amount, self.limit));
        }

        self.commit(user, target, TransactionType::Charge)
    }

    fn deduct(&self, user: UserId, amount: i64) -> Result<Balance, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::non_positive_deduct(user, amount));
        }

        let lock = self.user_lock(user);
        let _guard = lock.lock();

        let current = self.balances.select_by_id(user).amount;
        if amount > current {
            return Err(LedgerError::insufficient_balance(user, current, amount));
        }

        self.commit(user, current - amount, TransactionType::Use)
    }

    fn get_all_history(&self, user: UserId) -> Vec<HistoryRecord> {
        self.history.select_all_by_user_id(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_and_deduct_flow() {
        let ledger = ShardedPointLedger::new();

        ledger.charge(1, 10_000).unwrap();
        let updated = ledger.deduct(1, 3000).unwrap();

        assert_eq!(updated.amount, 7000);
        let histories = ledger.get_all_history(1);
        assert_eq!(histories.len(), 2);
        assert_eq!(histories[0].amount, 10_000);
        assert_eq!(histories[1].amount, 7000);
    }

    #[test]
    fn test_rejections_match_global_ledger() {
        let ledger = ShardedPointLedger::new();

        assert!(matches!(
            ledger.charge(1, 0).unwrap_err(),
            LedgerError::NonPositiveCharge { .. }
        ));
        assert!(matches!(
            ledger.deduct(1, -5).unwrap_err(),
            LedgerError::NonPositiveDeduct { .. }
        ));
        assert!(matches!(
            ledger.deduct(1, 100).unwrap_err(),
            LedgerError::InsufficientBalance { .. }
        ));

        ledger.charge(1, 95_000_000).unwrap();
        assert!(matches!(
            ledger.charge(1, 10_000_000).unwrap_err(),
            LedgerError::ExceedsLimit { .. }
        ));
    }

    #[test]
    fn test_lock_created_once_per_user() {
        let ledger = ShardedPointLedger::new();

        ledger.charge(1, 100).unwrap();
        ledger.charge(1, 100).unwrap();
        ledger.charge(2, 100).unwrap();

        assert_eq!(ledger.locks.len(), 2);
    }

    #[test]
    fn test_users_are_isolated() {
        let ledger = ShardedPointLedger::new();

        ledger.charge(1, 1000).unwrap();
        ledger.charge(2, 2000).unwrap();
        ledger.deduct(2, 500).unwrap();

        assert_eq!(ledger.get_balance(1).amount, 1000);
        assert_eq!(ledger.get_balance(2).amount, 1500);
        assert_eq!(ledger.get_all_history(1).len(), 1);
        assert_eq!(ledger.get_all_history(2).len(), 2);
    }
}
