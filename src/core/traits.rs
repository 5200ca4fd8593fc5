//! Core traits for balance storage, history storage, and ledger operations
//!
//! This module defines the trait abstractions that separate the ledger's
//! critical section from the storage primitives it coordinates, and the
//! shared operation surface implemented by both ledger variants.

use crate::types::{Balance, HistoryRecord, LedgerError, TransactionType, UserId};
use std::sync::Arc;

/// Trait for the latest-balance store
///
/// The store is a plain key-to-value mapping: reads never fail and writes are
/// unconditional full-state overwrites. It performs no arithmetic and no
/// validation; computing the target amount is the ledger's job so that the
/// invariant check and the write stay atomic from the ledger's point of view.
/// Implementations must be individually thread-safe, but cross-store
/// atomicity is provided by the ledger's locking, not by the store.
pub trait BalanceStore: Send + Sync {
    /// Read the current balance for a user
    ///
    /// Unknown users yield a zero balance rather than an error.
    fn select_by_id(&self, user: UserId) -> Balance;

    /// Overwrite the stored balance for a user and return the stored row
    ///
    /// Last write wins; this is state replacement, not an increment.
    fn insert_or_update(&self, user: UserId, amount: i64) -> Balance;
}

/// Trait for the append-only transaction history store
///
/// Records are immutable once inserted and kept in insertion order per user.
pub trait HistoryStore: Send + Sync {
    /// Append a history record and return it
    ///
    /// The amount is the balance that resulted from the operation, not the
    /// delta that was applied.
    fn insert(
        &self,
        user: UserId,
        amount: i64,
        kind: TransactionType,
        timestamp_millis: i64,
    ) -> HistoryRecord;

    /// Return all records for a user in insertion order
    ///
    /// The returned vector is a finite, owned snapshot; calling again yields
    /// the full sequence from the start.
    fn select_all_by_user_id(&self, user: UserId) -> Vec<HistoryRecord>;
}

/// Trait for point ledger operations
///
/// The operation surface exposed to callers. Both the globally locked and the
/// per-user sharded implementations provide the same contract: charge and
/// deduct execute their read-validate-write-append sequence as one exclusive
/// critical section, while the read operations take no lock.
pub trait Ledger: Send + Sync {
    /// Read the current balance for a user (zero for unknown users)
    fn get_balance(&self, user: UserId) -> Balance;

    /// Credit points to a user's balance
    fn charge(&self, user: UserId, amount: i64) -> Result<Balance, LedgerError>;

    /// Debit points from a user's balance
    fn deduct(&self, user: UserId, amount: i64) -> Result<Balance, LedgerError>;

    /// Return the full transaction history for a user in commit order
    fn get_all_history(&self, user: UserId) -> Vec<HistoryRecord>;
}

// Arc delegation so stores can be shared between a ledger and the pipeline
// that inspects them after processing.

impl<S: BalanceStore + ?Sized> BalanceStore for Arc<S> {
    fn select_by_id(&self, user: UserId) -> Balance {
        (**self).select_by_id(user)
    }

    fn insert_or_update(&self, user: UserId, amount: i64) -> Balance {
        (**self).insert_or_update(user, amount)
    }
}

impl<S: HistoryStore + ?Sized> HistoryStore for Arc<S> {
    fn insert(
        &self,
        user: UserId,
        amount: i64,
        kind: TransactionType,
        timestamp_millis: i64,
    ) -> HistoryRecord {
        (**self).insert(user, amount, kind, timestamp_millis)
    }

    fn select_all_by_user_id(&self, user: UserId) -> Vec<HistoryRecord> {
        (**self).select_all_by_user_id(user)
    }
}
