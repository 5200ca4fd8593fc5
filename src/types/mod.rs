//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `balance`: Balance row and the point cap
//! - `transaction`: Operation kinds, history rows, and parsed input records
//! - `error`: Error types for the point ledger

pub mod balance;
pub mod error;
pub mod transaction;

pub use balance::{Balance, POINT_LIMIT};
pub use error::LedgerError;
pub use transaction::{HistoryRecord, OperationRecord, TransactionType, UserId};

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as milliseconds since the Unix epoch
///
/// Used to stamp balance writes and history rows. Clamps to zero if the
/// system clock reads before the epoch.
pub fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
