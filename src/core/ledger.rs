//! Point ledger with a single process-wide write lock
//!
//! This module provides the `PointLedger` struct, the sole writer of balance
//! state. It coordinates the balance store and the history store so that a
//! balance mutation and its matching history record commit together or not
//! at all, even under concurrent calls.
//!
//! # Locking discipline
//!
//! One process-wide mutex serializes every charge and deduct call, across all
//! users. Simple and contention-heavy; [`ShardedPointLedger`] trades the
//! single lock for a per-user lock table when cross-user throughput matters.
//! The guard is scoped, so the lock is released on every exit path including
//! validation failures.
//!
//! Reads (`get_balance`, `get_all_history`) take no lock. A reader racing a
//! writer sees either the pre-commit or the post-commit state of that write,
//! never a torn one.
//!
//! [`ShardedPointLedger`]: crate::core::sharded::ShardedPointLedger

use crate::core::balance_store::MemoryBalanceStore;
use crate::core::history_store::MemoryHistoryStore;
use crate::core::traits::{BalanceStore, HistoryStore, Ledger};
use crate::types::{Balance, HistoryRecord, LedgerError, TransactionType, UserId, POINT_LIMIT};
use parking_lot::Mutex;

/// Point ledger serializing all mutations through one exclusive lock
///
/// Generic over its stores so tests can substitute doubles; production code
/// uses the in-memory stores via [`PointLedger::new`].
///
/// # Invariants
///
/// After every successful operation the stored balance lies in
/// `[0, limit]`, and each committed mutation has appended exactly one history
/// record whose amount equals the resulting balance.
pub struct PointLedger<B, H> {
    /// Latest-balance store
    balances: B,

    /// Append-only history store
    history: H,

    /// Balance cap checked on every charge
    limit: i64,

    /// Process-wide lock guarding the read-validate-write-append sequence
    write_lock: Mutex<()>,
}

impl PointLedger<MemoryBalanceStore, MemoryHistoryStore> {
    /// Create a ledger over fresh in-memory stores with the default cap
    pub fn new() -> Self {
        Self::with_stores(MemoryBalanceStore::new(), MemoryHistoryStore::new())
    }
}

impl Default for PointLedger<MemoryBalanceStore, MemoryHistoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BalanceStore, H: HistoryStore> PointLedger<B, H> {
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
            write_lock: Mutex::new(()),
        }
    }

    /// Write the target balance, verify the commit, and append history
    ///
    /// Must be called with the write lock held. The stored amount not
    /// matching the computed target means another writer got inside the
    /// critical section, which the locking discipline rules out; that is
    /// reported as the fatal [`LedgerError::CommitMismatch`] and no history
    /// record is appended.
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

        // Stamp the history row with the committed write's timestamp so the
        // balance row and its record agree.
        self.history
            .insert(user, target, kind, stored.updated_millis);

        Ok(stored)
    }
}

impl<B: BalanceStore, H: HistoryStore> Ledger for PointLedger<B, H> {
    /// Read the current balance without taking the write lock
    fn get_balance(&self, user: UserId) -> Balance {
        self.balances.select_by_id(user)
    }

    /// Credit points to a user's balance
    ///
    /// The amount must be strictly positive and the resulting balance must
    /// not exceed the cap. Overflow of the addition is treated as exceeding
    /// the cap. On success the new balance is stored and one `Charge` record
    /// is appended.
    ///
    /// # Errors
    ///
    /// * [`LedgerError::NonPositiveCharge`] for `amount <= 0`
    /// * [`LedgerError::ExceedsLimit`] when `current + amount` passes the cap
    /// * [`LedgerError::CommitMismatch`] when the stored value fails
    ///   post-write verification
    fn charge(&self, user: UserId, amount: i64) -> Result<Balance, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::non_positive_charge(user, amount));
        }

        let _guard = self.write_lock.lock();

        let current = self.balances.select_by_id(user).amount;
        let target = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::exceeds_limit(user, current, amount, self.limit))?;
        if target > self.limit {
            return Err(LedgerError::exceeds_limit(user, current, amount, self.limit));
        }

        self.commit(user, target, TransactionType::Charge)
    }

    /// Debit points from a user's balance
    ///
    /// The amount must be strictly positive and must not exceed the current
    /// balance. On success the new balance is stored and one `Use` record is
    /// appended.
    ///
    /// # Errors
    ///
    /// * [`LedgerError::NonPositiveDeduct`] for `amount <= 0`
    /// * [`LedgerError::InsufficientBalance`] when `amount` exceeds the
    ///   current balance
    /// * [`LedgerError::CommitMismatch`] when the stored value fails
    ///   post-write verification
    fn deduct(&self, user: UserId, amount: i64) -> Result<Balance, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::non_positive_deduct(user, amount));
        }

        let _guard = self.write_lock.lock();

        let current = self.balances.select_by_id(user).amount;
        if amount > current {
            return Err(LedgerError::insufficient_balance(user, current, amount));
        }

        self.commit(user, current - amount, TransactionType::Use)
    }

    /// Read the full history without taking the write lock
    fn get_all_history(&self, user: UserId) -> Vec<HistoryRecord> {
        self.history.select_all_by_user_id(user)
    }
}
