//! Subscription control message sent once after connect.
//!
//! The explorer feed speaks an exchange-style subscribe protocol: a channel
//! name plus product ids. The default pair below is what the feed was
//! observed with; responses are still keyed by `blockHash`, and that mismatch
//! is reproduced deliberately.

use serde::Serialize;

pub const TICKER_CHANNEL: &str = "ticker";
pub const DEFAULT_PRODUCT_IDS: [&str; 2] = ["blockHeight", "blockNode"];

#[derive(Debug, Clone, Serialize)]
pub struct Channel {
    pub name: String,
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscribeRequest {
    #[serde(rename = "type")]
    message_type: &'static str,
    pub channels: Vec<Channel>,
}

impl SubscribeRequest {
    pub fn new(channel: impl Into<String>, product_ids: Vec<String>) -> Self {
        Self {
            message_type: "subscribe",
            channels: vec![Channel {
                name: channel.into(),
                product_ids,
            }],
        }
    }

    /// The default ticker subscription for block notifications
    pub fn block_ticker() -> Self {
        Self::new(
            TICKER_CHANNEL,
            DEFAULT_PRODUCT_IDS.iter().map(ToString::to_string).collect(),
        )
    }

    /// Serialize to the wire format. Infallible for this shape.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("subscribe request serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_ticker_wire_format() {
        assert_eq!(
            SubscribeRequest::block_ticker().to_json(),
            r#"{"type":"subscribe","channels":[{"name":"ticker","product_ids":["blockHeight","blockNode"]}]}"#
        );
    }

    #[test]
    fn test_custom_channel() {
        let req = SubscribeRequest::new("blocks", vec!["blockHash".to_string()]);
        assert_eq!(
            req.to_json(),
            r#"{"type":"subscribe","channels":[{"name":"blocks","product_ids":["blockHash"]}]}"#
        );
    }
}
