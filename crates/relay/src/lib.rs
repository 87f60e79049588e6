//! blockrelay-lib: Relay runtime components
//!
//! Connects to a block notification feed over websocket, subscribes once,
//! and routes each frame: block events go to the stream sink, everything
//! else is logged. Raw JSON passthrough - no transformation beyond the
//! record delimiter suffix.

pub mod block_writer;
pub mod error;
pub mod message;
pub mod runner;
pub mod server;
pub mod subscription;
pub mod traits;
pub mod websocket;

pub use block_writer::{BlockWriter, BLOCK_HASH_FIELD, RECORD_DELIMITER};
pub use error::{ConnectorError, WriterError};
pub use message::Frame;
pub use runner::Runner;
pub use server::{create_router, run_server, ServerState};
pub use subscription::{Channel, SubscribeRequest};
pub use traits::{Connector, Writer};
pub use websocket::WebSocketConnector;
