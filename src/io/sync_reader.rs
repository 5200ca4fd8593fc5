//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over operation records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<OperationRecord, String>` for each CSV row:
//!
//! ```no_run
//! use point_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("operations.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Applying operation: {:?}", record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the
//!   iterator, with line numbers for debugging
//!
//! # Memory Efficiency
//!
//! Records are read one at a time; memory usage does not grow with the file.

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::OperationRecord;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Provides an iterator interface over operation records with streaming
/// behavior and constant memory usage.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// Opens the CSV file and prepares it for streaming iteration. The
    /// reader trims whitespace from all fields and tolerates rows with a
    /// missing amount column.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        Ok(SyncReader {
            reader,
            line_num: 1, // header occupies line 1
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<OperationRecord, String>;

    fn next(&mut self) -> Option<Self::Item> {
        // deserialize() resumes from the reader's current position, so a
        // fresh call per next() still streams the file once.
        let result = self.reader.deserialize::<CsvRecord>().next()?;
        self.line_num += 1;

        Some(match result {
            Ok(csv_record) => convert_csv_record(csv_record)
                .map_err(|e| format!("line {}: {}", self.line_num, e)),
            Err(e) => Err(format!("line {}: {}", self.line_num, e)),
        })
    }
}
