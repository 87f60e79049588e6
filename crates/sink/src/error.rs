use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("stream unavailable: {0}")]
    StreamUnavailable(String),
    #[error("put record failed: {0}")]
    PutFailed(String),
}
