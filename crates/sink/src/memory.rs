use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SinkError;
use crate::sink::{RecordAck, StreamSink};

const MEMORY_SHARD_ID: &str = "shardId-000000000000";

/// Record captured by the in-memory sink
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub partition_key: String,
    pub payload: Bytes,
}

/// In-memory sink for tests. Stores every record and hands out
/// monotonically increasing sequence numbers on a single shard.
pub struct InMemorySink {
    records: Mutex<Vec<StoredRecord>>,
    sequence: AtomicU64,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn records(&self) -> Vec<StoredRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamSink for InMemorySink {
    async fn put_record(
        &self,
        partition_key: &str,
        payload: Bytes,
    ) -> Result<RecordAck, SinkError> {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.records.lock().unwrap().push(StoredRecord {
            partition_key: partition_key.to_string(),
            payload,
        });
        Ok(RecordAck {
            shard_id: MEMORY_SHARD_ID.to_string(),
            sequence_number: seq.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_record_stores_payload() {
        let sink = InMemorySink::new();
        let ack = sink
            .put_record("abc123", Bytes::from(r#"{"blockHash":"abc123"}|||"#))
            .await
            .unwrap();

        assert_eq!(ack.shard_id, MEMORY_SHARD_ID);
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].partition_key, "abc123");
        assert_eq!(records[0].payload.as_ref(), br#"{"blockHash":"abc123"}|||"#);
    }

    #[tokio::test]
    async fn test_sequence_numbers_increment() {
        let sink = InMemorySink::new();
        let ack1 = sink.put_record("a", Bytes::from("1")).await.unwrap();
        let ack2 = sink.put_record("b", Bytes::from("2")).await.unwrap();
        assert_eq!(ack1.sequence_number, "0");
        assert_eq!(ack2.sequence_number, "1");
    }
}
