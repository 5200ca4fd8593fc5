//! Error types for the point ledger
//!
//! This module defines all error types that can occur while processing
//! point operations.
//!
//! # Error Categories
//!
//! - **Rejections**: caller-correctable validation failures (non-positive
//!   amounts, balance cap exceeded, insufficient balance). The ledger state
//!   is untouched and processing may continue with the next operation.
//! - **Commit mismatch**: the balance store returned a post-write value that
//!   differs from the computed target. This only happens when the exclusive
//!   locking discipline is broken and is therefore fatal.
//! - **Pipeline errors**: file I/O and CSV parsing failures from the
//!   surrounding input handling.

use crate::types::transaction::UserId;
use thiserror::Error;

/// Main error type for the point ledger
///
/// Each variant carries enough context to diagnose the failing operation.
/// Use [`LedgerError::is_rejection`] to distinguish caller-correctable
/// validation failures from errors that must abort processing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Charge was requested with a zero or negative amount
    ///
    /// No balance read happens before this check; the ledger state is
    /// untouched.
    #[error("charge amount must be positive (user {user}, got {amount})")]
    NonPositiveCharge {
        /// User the charge was requested for
        user: UserId,
        /// The rejected amount
        amount: i64,
    },

    /// Charging would push the balance past the configured cap
    #[error("exceeds chargeable limit (user {user}: balance {current} + charge {requested} > limit {limit})")]
    ExceedsLimit {
        /// User the charge was requested for
        user: UserId,
        /// Balance at the time of the check
        current: i64,
        /// The rejected charge amount
        requested: i64,
        /// The cap the target balance was checked against
        limit: i64,
    },

    /// Deduct was requested with a zero or negative amount
    ///
    /// Mirrors the charge-side positivity rule so both mutating operations
    /// apply the same input contract.
    #[error("deduct amount must be positive (user {user}, got {amount})")]
    NonPositiveDeduct {
        /// User the deduct was requested for
        user: UserId,
        /// The rejected amount
        amount: i64,
    },

    /// Deduct was requested for more points than the user holds
    #[error("insufficient balance (user {user}: balance {current}, requested {requested})")]
    InsufficientBalance {
        /// User the deduct was requested for
        user: UserId,
        /// Balance at the time of the check
        current: i64,
        /// The rejected deduct amount
        requested: i64,
    },

    /// The stored post-write balance does not match the computed target
    ///
    /// Only possible when a concurrent writer slipped inside the critical
    /// section, i.e. the locking discipline is broken. Fatal; must never be
    /// swallowed or retried.
    #[error("balance commit mismatch (user {user}: wrote {expected}, store returned {stored})")]
    CommitMismatch {
        /// User whose write failed verification
        user: UserId,
        /// The target amount the ledger computed and wrote
        expected: i64,
        /// The amount the store reported after the write
        stored: i64,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable at the pipeline level: the malformed record is skipped
    /// and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a NonPositiveCharge rejection
    pub fn non_positive_charge(user: UserId, amount: i64) -> Self {
        LedgerError::NonPositiveCharge { user, amount }
    }

    /// Create an ExceedsLimit rejection
    pub fn exceeds_limit(user: UserId, current: i64, requested: i64, limit: i64) -> Self {
        LedgerError::ExceedsLimit {
            user,
            current,
            requested,
            limit,
        }
    }

    /// Create a NonPositiveDeduct rejection
    pub fn non_positive_deduct(user: UserId, amount: i64) -> Self {
        LedgerError::NonPositiveDeduct { user, amount }
    }

    /// Create an InsufficientBalance rejection
    pub fn insufficient_balance(user: UserId, current: i64, requested: i64) -> Self {
        LedgerError::InsufficientBalance {
            user,
            current,
            requested,
        }
    }

    /// Create a CommitMismatch error
    pub fn commit_mismatch(user: UserId, expected: i64, stored: i64) -> Self {
        LedgerError::CommitMismatch {
            user,
            expected,
            stored,
        }
    }

    /// Whether this error is a caller-correctable validation rejection
    ///
    /// Rejections leave the ledger untouched and a pipeline may log them and
    /// continue. Everything else (commit mismatch, I/O, parse failures at
    /// file level) must stop the caller.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::NonPositiveCharge { .. }
                | LedgerError::ExceedsLimit { .. }
                | LedgerError::NonPositiveDeduct { .. }
                | LedgerError::InsufficientBalance { .. }
        )
    }
}
