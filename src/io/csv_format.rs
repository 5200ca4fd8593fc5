//! CSV format handling for operation records and balance output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Balance output serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{Balance, OperationRecord, TransactionType, UserId};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, user, amount.
/// The amount is kept as a string so parse failures produce a targeted
/// error instead of a serde type error for the whole row.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub user: UserId,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to an OperationRecord
///
/// This function:
/// - Parses the operation kind string into a TransactionType (`charge` or
///   `use`, case-insensitive)
/// - Parses the amount string into an i64
/// - Requires an amount for both operation kinds
///
/// Negative or zero amounts parse successfully here; rejecting them is the
/// ledger's validation, not the reader's.
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
///
/// # Returns
///
/// Result containing either:
/// - Ok(OperationRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<OperationRecord, String> {
    let kind = match csv_record.kind.to_lowercase().as_str() {
        "charge" => TransactionType::Charge,
        "use" => TransactionType::Use,
        _ => {
            return Err(format!(
                "Invalid operation type '{}' for user {}",
                csv_record.kind, csv_record.user
            ))
        }
    };

    let amount = match csv_record.amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            amount_str.trim().parse::<i64>().map_err(|_| {
                format!(
                    "Invalid amount '{}' for user {}",
                    amount_str, csv_record.user
                )
            })?
        }
        _ => {
            return Err(format!(
                "{:?} operation for user {} requires an amount",
                kind, csv_record.user
            ))
        }
    };

    Ok(OperationRecord {
        kind,
        user: csv_record.user,
        amount,
    })
}

/// Write final balances to CSV format
///
/// Writes balances in CSV format with columns: user, amount. Callers pass
/// the rows already sorted by user ID for deterministic output. Timestamps
/// are not part of the output contract.
///
/// # Arguments
///
/// * `balances` - Slice of balance rows to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_balances_csv(balances: &[Balance], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["user", "amount"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for balance in balances {
        writer
            .write_record([balance.user.to_string(), balance.amount.to_string()])
            .map_err(|e| format!("Failed to write CSV record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush CSV output: {}", e))?;

    Ok(())
}
