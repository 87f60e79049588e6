use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{ConnectorError, WriterError};
use crate::message::Frame;

/// Connector trait for inbound frame sources
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish the connection and send the subscription message
    async fn connect(&mut self) -> Result<(), ConnectorError>;

    /// Get receiver for inbound frame bytes
    fn frames(&mut self) -> mpsc::Receiver<Vec<u8>>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), ConnectorError>;
}

/// Writer trait for the outbound side of the pipeline
#[async_trait]
pub trait Writer: Send + Sync {
    /// Handle one frame: publish or discard
    async fn write(&mut self, frame: &Frame) -> Result<(), WriterError>;

    /// Close the writer
    async fn close(&mut self) -> Result<(), WriterError>;
}
