//! blockrelay-sink: Stream-sink abstraction
//!
//! Provides the StreamSink trait with a Kinesis implementation and an
//! in-memory implementation for testing.

pub mod error;
pub mod kinesis;
pub mod memory;
pub mod sink;

pub use error::SinkError;
pub use kinesis::KinesisSink;
pub use memory::{InMemorySink, StoredRecord};
pub use sink::{RecordAck, StreamSink};
