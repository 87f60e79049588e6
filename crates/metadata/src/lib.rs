//! blockrelay-metadata: Relay configuration types

pub mod config;
pub mod error;

pub use config::{
    FeedConfig, RelayConfig, SinkConfig, SinkType, SubscriptionConfig, DEFAULT_ENDPOINT,
};
pub use error::MetadataError;
