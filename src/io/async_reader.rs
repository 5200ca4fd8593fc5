//! Asynchronous CSV reader with batch interface
//!
//! Provides batched reading of operation records from an async byte source.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - Batch reading so the pipeline can fan a chunk of operations out to
//!   worker tasks between reads
//!
//! Malformed rows are logged at warn level and skipped; they never abort
//! the batch.

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::OperationRecord;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use log::warn;

/// Asynchronous CSV reader
///
/// Provides a batch reading interface over operation records while keeping
/// streaming behavior and constant memory usage.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async byte source
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read a batch of operation records
    ///
    /// Reads up to `batch_size` rows, converting them to OperationRecords.
    /// Invalid rows are logged and skipped.
    ///
    /// # Arguments
    ///
    /// * `batch_size` - Maximum number of records to read
    ///
    /// # Returns
    ///
    /// A vector of successfully converted operation records. Returns an
    /// empty vector when the end of the input is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<OperationRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(operation) => batch.push(operation),
                    Err(e) => warn!("Record conversion error: {}", e),
                },
                Some(Err(e)) => warn!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionType;
    use futures::io::Cursor;

    #[tokio::test]
    async fn test_read_batch_respects_batch_size() {
        let csv_content = "type,user,amount\ncharge,1,100\nuse,1,50\ncharge,2,200\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].user, 1);
        assert_eq!(batch[0].amount, 100);
        assert_eq!(batch[1].kind, TransactionType::Use);

        let batch = reader.read_batch(2).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].user, 2);

        let batch = reader.read_batch(2).await;
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_read_batch_empty_csv() {
        let csv_content = "type,user,amount\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;
        assert_eq!(batch.len(), 0);
    }

    #[tokio::test]
    async fn test_read_batch_skips_invalid_rows() {
        let csv_content = "type,user,amount\nrefund,1,100\ncharge,1,50\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].amount, 50);
    }

    #[tokio::test]
    async fn test_read_batch_larger_than_input() {
        let csv_content = "type,user,amount\ncharge,1,100\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(100).await;
        assert_eq!(batch.len(), 1);
    }

    #[tokio::test]
    async fn test_read_batch_case_insensitive_type() {
        let csv_content = "type,user,amount\nCHARGE,1,100\nUse,1,50\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;
        assert_eq!(batch.len(), 2);
    }

    #[tokio::test]
    async fn test_read_batch_whitespace_handling() {
        let csv_content = "type,user,amount\n  charge  ,  1  ,  100  \n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].user, 1);
        assert_eq!(batch[0].amount, 100);
    }
}
