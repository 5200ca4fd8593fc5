//! Transaction types for the point ledger
//!
//! This module defines the operation kinds, the immutable history row
//! appended after each committed mutation, and the parsed operation record
//! consumed by the processing pipelines.

use serde::{Deserialize, Serialize};

/// User identifier
///
/// Supports user IDs from 0 to 18,446,744,073,709,551,615
pub type UserId = u64;

/// Operation kinds recorded in the transaction history
///
/// This enumeration is closed: every history row is either a credit
/// (`Charge`) or a debit (`Use`). The lowercase serde names match the
/// CSV input format (`charge` / `use`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Credit points to a user's balance
    Charge,

    /// Debit points from a user's balance
    Use,
}

/// Immutable history row for one committed balance mutation
///
/// Exactly one record is appended per successful charge or deduct, and none
/// for a rejected call. The `amount` field carries the balance that resulted
/// from the operation, not the delta that was applied; insertion order per
/// user matches the order in which balance writes were committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    /// The user whose balance was mutated
    pub user: UserId,

    /// Resulting balance immediately after the mutation
    pub amount: i64,

    /// Whether the mutation was a charge or a use
    pub kind: TransactionType,

    /// Milliseconds since the Unix epoch when the mutation committed
    pub timestamp_millis: i64,
}

/// Parsed input operation from the CSV pipelines
///
/// Represents one requested mutation before validation. The amount is kept
/// signed exactly as parsed; non-positive values are rejected by the ledger,
/// not by the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    /// The operation to perform (charge or use)
    pub kind: TransactionType,

    /// The user the operation applies to
    pub user: UserId,

    /// Requested point delta
    pub amount: i64,
}
