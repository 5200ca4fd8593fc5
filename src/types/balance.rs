//! Balance types for the point ledger
//!
//! This module defines the per-user balance row and the balance cap that
//! every mutation is validated against.

use super::transaction::UserId;
use serde::Serialize;

/// Maximum number of points a single user may hold
///
/// Defined once here and referenced everywhere the cap is needed; ledgers
/// default to it and expose a constructor override for tests.
pub const POINT_LIMIT: i64 = 100_000_000;

/// Current point balance of a single user
///
/// Represents the latest committed balance state. The amount is always in
/// `[0, limit]` after a successful ledger operation; amounts are signed so
/// that invalid caller input is rejected by validation rather than wrapped
/// by the type system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    /// The user this balance belongs to
    pub user: UserId,

    /// Current point total
    pub amount: i64,

    /// Milliseconds since the Unix epoch at the last committed write
    pub updated_millis: i64,
}

impl Balance {
    /// Create a balance row with an explicit amount and timestamp
    pub fn new(user: UserId, amount: i64, updated_millis: i64) -> Self {
        Balance {
            user,
            amount,
            updated_millis,
        }
    }

    /// Create the implicit zero balance for a user with no committed writes
    ///
    /// Unknown users read as zero rather than as an error; the row is stamped
    /// with the read time so callers always see a plausible timestamp.
    pub fn empty(user: UserId, now_millis: i64) -> Self {
        Balance {
            user,
            amount: 0,
            updated_millis: now_millis,
        }
    }
}
