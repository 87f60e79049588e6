use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("subscribe failed: {0}")]
    SubscribeFailed(String),
    #[error("disconnected: {0}")]
    Disconnected(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
}

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("malformed frame: {0}")]
    Malformed(String),
    #[error("invalid partition key: {0}")]
    InvalidPartitionKey(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
}
