use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::MetadataError;

/// Websocket endpoint the relay was originally written against.
pub const DEFAULT_ENDPOINT: &str = "wss://testnet-explorer.binance.org/ws/block";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    Kinesis,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Websocket endpoint delivering block notifications
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

/// Channel subscription sent on connect.
///
/// The upstream API takes a channel name plus product ids. The defaults
/// reproduce the pair the explorer feed was observed with; note the feed
/// answers with `blockHash`-keyed payloads regardless of the product ids
/// requested here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionConfig {
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default = "default_product_ids")]
    pub product_ids: Vec<String>,
}

fn default_channel() -> String {
    "ticker".to_string()
}

fn default_product_ids() -> Vec<String> {
    vec!["blockHeight".to_string(), "blockNode".to_string()]
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            product_ids: default_product_ids(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    #[serde(rename = "type")]
    pub sink_type: SinkType,
    /// Kinesis stream name (required when type is kinesis)
    pub stream: Option<String>,
    /// AWS region override; falls back to the ambient SDK chain when unset
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub name: String,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub subscription: SubscriptionConfig,
    pub sink: SinkConfig,
}

impl RelayConfig {
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path)?;
        let config: RelayConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.feed.endpoint.is_empty() {
            return Err(MetadataError::Validation(
                "feed.endpoint must not be empty".to_string(),
            ));
        }
        if self.subscription.product_ids.is_empty() {
            return Err(MetadataError::Validation(
                "subscription.product_ids must not be empty".to_string(),
            ));
        }
        if self.sink.sink_type == SinkType::Kinesis && self.sink.stream.is_none() {
            return Err(MetadataError::Validation(
                "sink.stream is required for a kinesis sink".to_string(),
            ));
        }
        Ok(())
    }

    /// Kinesis stream name, or empty string for non-kinesis sinks
    pub fn stream_name(&self) -> &str {
        self.sink.stream.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
name: bsc-testnet-dev
feed:
  endpoint: wss://testnet-explorer.binance.org/ws/block
subscription:
  channel: ticker
  product_ids:
    - blockHeight
    - blockNode
sink:
  type: kinesis
  stream: brianz-gdax-dev-kinesis-stream
  region: us-east-1
"#
        )
        .unwrap();

        let config = RelayConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "bsc-testnet-dev");
        assert_eq!(
            config.feed.endpoint,
            "wss://testnet-explorer.binance.org/ws/block"
        );
        assert_eq!(config.subscription.channel, "ticker");
        assert_eq!(config.stream_name(), "brianz-gdax-dev-kinesis-stream");
        assert_eq!(config.sink.region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn test_defaults_reproduce_upstream_pair() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
name: bsc-testnet-dev
sink:
  type: memory
"#
        )
        .unwrap();

        let config = RelayConfig::load(file.path()).unwrap();
        assert_eq!(config.feed.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.subscription.channel, "ticker");
        assert_eq!(
            config.subscription.product_ids,
            vec!["blockHeight", "blockNode"]
        );
    }

    #[test]
    fn test_kinesis_requires_stream() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
name: bsc-testnet-dev
sink:
  type: kinesis
"#
        )
        .unwrap();

        let err = RelayConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, MetadataError::Validation(_)));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let config = RelayConfig {
            name: "x".to_string(),
            feed: FeedConfig {
                endpoint: String::new(),
            },
            subscription: SubscriptionConfig::default(),
            sink: SinkConfig {
                sink_type: SinkType::Memory,
                stream: None,
                region: None,
            },
        };
        assert!(config.validate().is_err());
    }
}
