//! Kinesis sink - one PutRecord call per block event.
//!
//! Credentials and region come from the ambient AWS SDK chain; the client is
//! built once at startup and only invoked afterwards.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_kinesis::primitives::Blob;
use aws_sdk_kinesis::Client;
use bytes::Bytes;
use tracing::info;

use crate::error::SinkError;
use crate::sink::{RecordAck, StreamSink};

pub struct KinesisSink {
    client: Client,
    stream_name: String,
}

impl KinesisSink {
    /// Build a sink from the ambient credential chain, with an optional
    /// region override.
    pub async fn connect(stream_name: impl Into<String>, region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        let config = loader.load().await;

        Self {
            client: Client::new(&config),
            stream_name: stream_name.into(),
        }
    }

    /// Build a sink and fail fast when the target stream cannot be described.
    pub async fn connect_validated(
        stream_name: impl Into<String>,
        region: Option<&str>,
    ) -> Result<Self, SinkError> {
        let sink = Self::connect(stream_name, region).await;
        sink.client
            .describe_stream_summary()
            .stream_name(&sink.stream_name)
            .send()
            .await
            .map_err(|e| {
                SinkError::StreamUnavailable(format!("{}: {}", sink.stream_name, e))
            })?;
        info!(stream = %sink.stream_name, "Kinesis stream validated");
        Ok(sink)
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }
}

#[async_trait]
impl StreamSink for KinesisSink {
    async fn put_record(
        &self,
        partition_key: &str,
        payload: Bytes,
    ) -> Result<RecordAck, SinkError> {
        let output = self
            .client
            .put_record()
            .stream_name(&self.stream_name)
            .partition_key(partition_key)
            .data(Blob::new(payload.to_vec()))
            .send()
            .await
            .map_err(|e| SinkError::PutFailed(e.to_string()))?;

        Ok(RecordAck {
            shard_id: output.shard_id().to_string(),
            sequence_number: output.sequence_number().to_string(),
        })
    }
}
