//! Block writer - routes decoded frames to the stream sink.
//!
//! A frame carrying a `blockHash` field is a block notification: it is
//! published once, partition-keyed by that hash, with the record delimiter
//! appended to the raw bytes. Anything else is logged and dropped. Malformed
//! JSON is an error that propagates; the pipeline has no recovery path.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info};

use blockrelay_sink::StreamSink;

use crate::error::WriterError;
use crate::message::Frame;
use crate::traits::Writer;

/// Sentinel appended to every published payload, a record delimiter for
/// downstream consumers
pub const RECORD_DELIMITER: &str = "|||";

/// Field that marks a frame as a block notification and supplies the
/// partition key
pub const BLOCK_HASH_FIELD: &str = "blockHash";

pub struct BlockWriter {
    sink: Arc<dyn StreamSink>,
    records_published: u64,
    frames_skipped: u64,
}

impl BlockWriter {
    pub fn new(sink: Arc<dyn StreamSink>) -> Self {
        Self {
            sink,
            records_published: 0,
            frames_skipped: 0,
        }
    }

    /// Count of records published to the sink
    pub fn records_published(&self) -> u64 {
        self.records_published
    }

    /// Count of non-block frames that were logged and dropped
    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }
}

#[async_trait]
impl Writer for BlockWriter {
    async fn write(&mut self, frame: &Frame) -> Result<(), WriterError> {
        let value: Value = serde_json::from_slice(&frame.data).map_err(|e| {
            let preview: String = String::from_utf8_lossy(&frame.data)
                .chars()
                .take(500)
                .collect();
            WriterError::Malformed(format!("{}. Preview: {}", e, preview))
        })?;

        let Some(hash) = value.get(BLOCK_HASH_FIELD) else {
            // Non-block message: surface it and move on
            info!(relay = %frame.relay, payload = %value, "Non-block message");
            self.frames_skipped += 1;
            return Ok(());
        };

        let partition_key = hash.as_str().ok_or_else(|| {
            WriterError::InvalidPartitionKey(format!(
                "{} is not a string: {}",
                BLOCK_HASH_FIELD, hash
            ))
        })?;

        // Raw bytes plus the delimiter - no re-serialization
        let mut payload = Vec::with_capacity(frame.data.len() + RECORD_DELIMITER.len());
        payload.extend_from_slice(&frame.data);
        payload.extend_from_slice(RECORD_DELIMITER.as_bytes());

        let ack = self
            .sink
            .put_record(partition_key, Bytes::from(payload))
            .await
            .map_err(|e| WriterError::WriteFailed(e.to_string()))?;

        info!(
            partition_key = %partition_key,
            shard = %ack.shard_id,
            sequence = %ack.sequence_number,
            "Published block event"
        );
        self.records_published += 1;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), WriterError> {
        debug!(
            published = self.records_published,
            skipped = self.frames_skipped,
            "BlockWriter closing"
        );
        Ok(())
    }
}
