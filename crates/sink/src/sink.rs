use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SinkError;

/// Write acknowledgement returned by the stream service
#[derive(Debug, Clone, PartialEq)]
pub struct RecordAck {
    pub shard_id: String,
    pub sequence_number: String,
}

/// Sink abstraction for partition-keyed stream writes
#[async_trait]
pub trait StreamSink: Send + Sync {
    /// Write one record. Exactly one call per record - no retry, no batching.
    async fn put_record(&self, partition_key: &str, payload: Bytes)
        -> Result<RecordAck, SinkError>;
}
